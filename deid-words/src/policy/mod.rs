//! Word policies, queries, and persistence.
//!
//! This module ties the pieces together:
//!
//! - **`mode`**: which list is authoritative (`PolicyMode`) and its file marker
//! - **`word_policy`**: construction and queries (`WordPolicy`, `WordPolicyBuilder`)
//! - **`persist`**: the line-oriented text format behind `save` and `load`
//!
//! Vocabulary producers live in `crate::vocabulary`.

mod mode;
mod persist;
mod word_policy;

pub use mode::{PolicyMode, ALLOWED_WORDS_MARKER, FORBIDDEN_WORDS_MARKER};
pub use word_policy::{
    normalize, PolicySummary, WordPolicy, WordPolicyBuilder, MIN_IDENTIFYING_LEN,
};
