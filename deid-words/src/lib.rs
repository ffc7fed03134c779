//! Word-level de-identification policy for clinical text.
//!
//! This crate answers one question for a single, already-tokenized word: may it
//! pass through unchanged, or must it be scrubbed? The answer comes from static
//! word lists rather than a model.
//!
//! It separates:
//! - **Vocabulary**: where the word lists come from (a medical lexicon, an
//!   identifiers dump, a frequency-ranked vocabulary).
//! - **Policy**: how an allow list, a forbid list and an always-keep list
//!   combine into one membership test, and how that test is persisted.
//!
//! Key rules:
//! - Words shorter than two characters are always allowed.
//! - Comparison is case-insensitive; stored words are lowercase.
//! - A forbidden word can never be allowed, unless it is also always-keep.
//! - A [`WordPolicy`] is immutable once built.
//!
//! ```rust
//! use deid_words::WordPolicy;
//!
//! let policy = WordPolicy::builder()
//!     .allowed(["fever", "cough", "Smith"])
//!     .forbidden(["smith"])
//!     .build();
//!
//! assert!(policy.is_allowed("Fever"));
//! assert!(!policy.is_allowed("SMITH"));
//! assert!(policy.is_allowed("x"));
//! ```
//!
//! What this crate does not do:
//! - tokenize text or rewrite documents
//! - look at the context around a word
//!
//! Vocabulary extraction lives behind the default `vocabulary` feature, which
//! also enables the `slog` feature and its `slog::Value` adapters.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
mod error;
mod policy;
#[cfg(feature = "slog")]
pub mod slog;
#[cfg(feature = "vocabulary")]
pub mod vocabulary;

// Re-exports
pub use error::{PolicyError, Result};
pub use policy::{
    normalize, PolicyMode, PolicySummary, WordPolicy, WordPolicyBuilder, ALLOWED_WORDS_MARKER,
    FORBIDDEN_WORDS_MARKER, MIN_IDENTIFYING_LEN,
};
#[cfg(feature = "vocabulary")]
pub use vocabulary::{
    extract_allowed_vocabulary, extract_forbidden_vocabulary, extract_frequent_vocabulary,
    VocabularyExtractor,
};
