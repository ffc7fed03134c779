//! Construction and queries for word policies.
//!
//! A policy is built once from up to three vocabularies and then only read.
//! All stored words are normalized, so queries reduce to a single set lookup.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::mode::PolicyMode;

/// Words with fewer Unicode scalar values than this are always allowed.
pub const MIN_IDENTIFYING_LEN: usize = 2;

/// Normalizes a word for comparison and storage.
///
/// Normalization is Unicode lowercasing and is idempotent.
///
/// ```rust
/// assert_eq!(deid_words::normalize("McDonald"), "mcdonald");
/// ```
#[must_use]
pub fn normalize(word: &str) -> String {
    word.to_lowercase()
}

fn normalize_all<I>(words: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    words
        .into_iter()
        .map(|word| normalize(word.as_ref()))
        .collect()
}

// The active vocabulary. Only one list survives construction.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Vocabulary {
    Allow(HashSet<String>),
    Forbid(HashSet<String>),
}

/// An immutable decision policy over single words.
///
/// In allow-list mode a word passes only if it is listed; in forbid-list mode
/// a word passes unless it is listed. Words shorter than
/// [`MIN_IDENTIFYING_LEN`] always pass, and case never matters.
///
/// A policy has no mutating methods. To change it, build a new one:
///
/// ```compile_fail
/// use deid_words::WordPolicy;
///
/// let mut policy = WordPolicy::forbid_list(["smith"]);
/// policy.insert("jones");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PolicyRecord", from = "PolicyRecord")]
pub struct WordPolicy {
    vocabulary: Vocabulary,
}

impl WordPolicy {
    /// Combines the optional vocabularies into a policy.
    ///
    /// - `always_keep` words are removed from `forbidden` first.
    /// - The remaining `forbidden` words are removed from `allowed`.
    /// - With `allowed` present the policy is in allow-list mode; otherwise it
    ///   is in forbid-list mode, with an empty list if `forbidden` is absent.
    ///
    /// The inputs are copied and normalized; the caller's sets are untouched.
    ///
    /// ```rust
    /// use std::collections::HashSet;
    ///
    /// use deid_words::WordPolicy;
    ///
    /// let forbidden: HashSet<String> = ["smith", "jones"].map(String::from).into();
    /// let keep: HashSet<String> = ["jones"].map(String::from).into();
    /// let policy = WordPolicy::new(None, Some(&forbidden), Some(&keep));
    ///
    /// assert!(policy.is_allowed("jones"));
    /// assert!(!policy.is_allowed("smith"));
    /// ```
    #[must_use]
    pub fn new(
        allowed: Option<&HashSet<String>>,
        forbidden: Option<&HashSet<String>>,
        always_keep: Option<&HashSet<String>>,
    ) -> Self {
        Self::combine(
            allowed.map(normalize_all),
            forbidden.map(normalize_all),
            always_keep.map(normalize_all),
        )
    }

    /// Starts a [`WordPolicyBuilder`].
    pub fn builder() -> WordPolicyBuilder {
        WordPolicyBuilder::default()
    }

    /// Allow-list policy over `words`.
    #[must_use]
    pub fn allow_list<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::builder().allowed(words).build()
    }

    /// Forbid-list policy over `words`.
    #[must_use]
    pub fn forbid_list<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::builder().forbidden(words).build()
    }

    // Inputs must already be normalized.
    fn combine(
        allowed: Option<HashSet<String>>,
        forbidden: Option<HashSet<String>>,
        always_keep: Option<HashSet<String>>,
    ) -> Self {
        let forbidden = forbidden.map(|mut forbidden| {
            if let Some(keep) = &always_keep {
                forbidden.retain(|word| !keep.contains(word));
            }
            forbidden
        });

        let vocabulary = match allowed {
            Some(mut allowed) => {
                if let Some(forbidden) = &forbidden {
                    allowed.retain(|word| !forbidden.contains(word));
                }
                Vocabulary::Allow(allowed)
            }
            None => Vocabulary::Forbid(forbidden.unwrap_or_default()),
        };

        Self { vocabulary }
    }

    /// Rebuilds a policy from its active list alone.
    pub(crate) fn from_active<I>(mode: PolicyMode, words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        match mode {
            PolicyMode::Allow => Self::allow_list(words),
            PolicyMode::Forbid => Self::forbid_list(words),
        }
    }

    /// Decides whether `word` may pass through unscrubbed.
    ///
    /// This method is total: every string, including the empty one, has an
    /// answer.
    #[must_use]
    pub fn is_allowed(&self, word: &str) -> bool {
        if word.chars().take(MIN_IDENTIFYING_LEN).count() < MIN_IDENTIFYING_LEN {
            return true;
        }
        let word = normalize(word);
        match &self.vocabulary {
            Vocabulary::Allow(allowed) => allowed.contains(&word),
            Vocabulary::Forbid(forbidden) => !forbidden.contains(&word),
        }
    }

    /// Which list decides queries.
    #[must_use]
    pub fn mode(&self) -> PolicyMode {
        match &self.vocabulary {
            Vocabulary::Allow(_) => PolicyMode::Allow,
            Vocabulary::Forbid(_) => PolicyMode::Forbid,
        }
    }

    fn active(&self) -> &HashSet<String> {
        match &self.vocabulary {
            Vocabulary::Allow(words) | Vocabulary::Forbid(words) => words,
        }
    }

    /// Iterates over the active list in no particular order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.active().iter().map(String::as_str)
    }

    /// The active list in lexicographic order.
    pub(crate) fn sorted_words(&self) -> BTreeSet<&str> {
        self.words().collect()
    }

    /// Number of words in the active list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active().len()
    }

    /// Returns `true` if the active list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    /// Returns `true` if the normalized `word` is in the active list.
    ///
    /// Unlike [`WordPolicy::is_allowed`], this ignores the short-word rule and
    /// the mode.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.active().contains(&normalize(word))
    }

    /// Mode and list size, for logging.
    #[must_use]
    pub fn summary(&self) -> PolicySummary {
        PolicySummary {
            mode: self.mode(),
            words: self.len(),
        }
    }
}

impl Default for WordPolicy {
    /// Forbid-list mode with nothing forbidden.
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::Forbid(HashSet::new()),
        }
    }
}

/// A size-only description of a policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PolicySummary {
    /// Which list decides queries.
    pub mode: PolicyMode,
    /// Number of words in the active list.
    pub words: usize,
}

// Serde shape of a policy: `{"mode": "allow", "words": [...]}`.
#[derive(Serialize, Deserialize)]
struct PolicyRecord {
    mode: PolicyMode,
    words: BTreeSet<String>,
}

impl From<WordPolicy> for PolicyRecord {
    fn from(policy: WordPolicy) -> Self {
        let mode = policy.mode();
        let words = match policy.vocabulary {
            Vocabulary::Allow(words) | Vocabulary::Forbid(words) => words.into_iter().collect(),
        };
        Self { mode, words }
    }
}

impl From<PolicyRecord> for WordPolicy {
    fn from(record: PolicyRecord) -> Self {
        Self::from_active(record.mode, record.words)
    }
}

/// Builder for [`WordPolicy`].
///
/// Each setter replaces any list given earlier for the same slot. Unset slots
/// are absent, exactly as `None` in [`WordPolicy::new`].
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct WordPolicyBuilder {
    allowed: Option<HashSet<String>>,
    forbidden: Option<HashSet<String>>,
    always_keep: Option<HashSet<String>>,
}

impl WordPolicyBuilder {
    /// Words to allow. Presence switches the policy to allow-list mode.
    pub fn allowed<I>(mut self, words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.allowed = Some(normalize_all(words));
        self
    }

    /// Words to forbid.
    pub fn forbidden<I>(mut self, words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.forbidden = Some(normalize_all(words));
        self
    }

    /// Words that are never forbidden, e.g. very common words.
    pub fn always_keep<I>(mut self, words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.always_keep = Some(normalize_all(words));
        self
    }

    /// Combines the lists into a policy.
    #[must_use]
    pub fn build(self) -> WordPolicy {
        WordPolicy::combine(self.allowed, self.forbidden, self.always_keep)
    }
}
