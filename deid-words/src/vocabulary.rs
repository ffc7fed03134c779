//! Vocabulary producers that feed [`WordPolicy`](crate::WordPolicy) construction.
//!
//! Each producer scans one kind of source once and returns a set of
//! normalized words:
//!
//! | Source | Producer | Typical slot |
//! |--------|----------|--------------|
//! | SPECIALIST-style lexicon | [`VocabularyExtractor::allowed_from_lexicon`] | `allowed` |
//! | Names/addresses dump | [`VocabularyExtractor::forbidden_from_identifiers`] | `forbidden` |
//! | Frequency-ranked vocabulary | [`VocabularyExtractor::frequent_from_vocab`] | `always_keep` |
//!
//! Words are split on runs of non-word characters (Unicode `\W`).

use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use once_cell::sync::Lazy;
use regex::Regex;
use slog::{debug, info, o, Discard, Logger};

use crate::{
    error::Result,
    policy::{normalize, MIN_IDENTIFYING_LEN},
};

/// Introduces each lexicon entry; the headword follows on the same line.
const ENTRY_DELIMITER: &str = "base=";

/// Line flag marking a proper-noun lexicon entry.
const PROPER_NOUN_FLAG: &str = "proper";

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    NON_WORD.split(text).filter(|token| !token.is_empty())
}

// A lexicon entry seen so far: its headword and whether a flag line marked
// it as a proper noun.
struct LexiconEntry {
    headword: String,
    proper: bool,
}

impl LexiconEntry {
    fn new(headword: &str) -> Self {
        Self {
            headword: normalize(headword),
            proper: false,
        }
    }

    fn collect_into(self, words: &mut HashSet<String>, proper_entries: &mut usize) {
        if self.proper {
            *proper_entries += 1;
        } else {
            words.extend(word_tokens(&self.headword).map(str::to_owned));
        }
    }
}

/// Reads vocabulary sources and logs progress to an `slog::Logger`.
#[derive(Clone, Debug)]
pub struct VocabularyExtractor {
    logger: Logger,
}

impl Default for VocabularyExtractor {
    fn default() -> Self {
        Self::new(None)
    }
}

impl VocabularyExtractor {
    /// Creates an extractor. Without a logger, records are discarded.
    pub fn new<L: Into<Option<Logger>>>(logger: L) -> Self {
        let logger = logger
            .into()
            .unwrap_or_else(|| Logger::root(Discard, o!()));
        Self {
            logger: logger.new(o!("component" => "vocabulary")),
        }
    }

    /// Headwords of a lexicon file, excluding proper-noun entries.
    pub fn allowed_from_lexicon<P: AsRef<Path>>(&self, path: P) -> Result<HashSet<String>> {
        let path = path.as_ref();
        info!(self.logger, "parsing lexicon for allowed words"; "path" => %path.display());
        self.allowed_from_lexicon_reader(BufReader::new(File::open(path)?))
    }

    /// Headwords of a lexicon, excluding proper-noun entries.
    ///
    /// Entries start at `base=`; the rest of that line is the headword. An
    /// entry with a flag line reading `proper` is skipped. Headwords are
    /// lowercased and split into word tokens, so `base=Crohn's disease`
    /// yields `crohn`, `s` and `disease`.
    ///
    /// The input is read one line at a time.
    pub fn allowed_from_lexicon_reader<R: BufRead>(&self, reader: R) -> Result<HashSet<String>> {
        let mut words = HashSet::new();
        let mut proper_entries = 0_usize;
        // Lines before the first delimiter belong to no entry.
        let mut entry: Option<LexiconEntry> = None;

        for line in reader.lines() {
            let line = line?;
            if let Some(start) = line.find(ENTRY_DELIMITER) {
                if let Some(done) = entry.take() {
                    done.collect_into(&mut words, &mut proper_entries);
                }
                entry = Some(LexiconEntry::new(&line[start + ENTRY_DELIMITER.len()..]));
            } else if let Some(current) = entry.as_mut() {
                if line.trim() == PROPER_NOUN_FLAG {
                    current.proper = true;
                }
            }
        }
        if let Some(done) = entry {
            done.collect_into(&mut words, &mut proper_entries);
        }

        debug!(self.logger, "skipped proper noun entries"; "entries" => proper_entries);
        info!(self.logger, "extracted allowed vocabulary"; "words" => words.len());
        Ok(words)
    }

    /// Word tokens of an identifiers dump, e.g. patient names and addresses.
    pub fn forbidden_from_identifiers<P: AsRef<Path>>(&self, path: P) -> Result<HashSet<String>> {
        let path = path.as_ref();
        info!(self.logger, "parsing identifiers for forbidden words"; "path" => %path.display());
        self.forbidden_from_identifiers_reader(BufReader::new(File::open(path)?))
    }

    /// Every word token of at least two characters, lowercased, from any
    /// line-oriented text.
    pub fn forbidden_from_identifiers_reader<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<HashSet<String>> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = normalize(&line?);
            words.extend(
                word_tokens(&line)
                    .filter(|token| token.chars().count() >= MIN_IDENTIFYING_LEN)
                    .map(str::to_owned),
            );
        }

        info!(self.logger, "extracted forbidden vocabulary"; "words" => words.len());
        Ok(words)
    }

    /// The `n` most frequent words of a word2vec-style vocabulary file.
    pub fn frequent_from_vocab<P: AsRef<Path>>(&self, path: P, n: usize) -> Result<HashSet<String>> {
        let path = path.as_ref();
        info!(self.logger, "parsing vocabulary for most frequent words"; "path" => %path.display(), "n" => n);
        self.frequent_from_vocab_reader(BufReader::new(File::open(path)?), n)
    }

    /// The first whitespace-delimited field of each of the first `n` non-blank
    /// lines, lowercased.
    ///
    /// The input is expected to be ordered most frequent first. A shorter
    /// input yields every word it has.
    pub fn frequent_from_vocab_reader<R: BufRead>(
        &self,
        reader: R,
        n: usize,
    ) -> Result<HashSet<String>> {
        let mut words = HashSet::new();
        let mut taken = 0_usize;
        for line in reader.lines() {
            if taken == n {
                break;
            }
            let line = line?;
            // Blank lines do not count toward `n`.
            let Some(word) = line.split_whitespace().next() else {
                continue;
            };
            words.insert(normalize(word));
            taken += 1;
        }

        if taken < n {
            debug!(self.logger, "vocabulary shorter than requested"; "requested" => n, "available" => taken);
        }
        info!(self.logger, "extracted frequent vocabulary"; "words" => words.len());
        Ok(words)
    }
}

/// Allowed vocabulary from a lexicon file, without logging.
pub fn extract_allowed_vocabulary<P: AsRef<Path>>(path: P) -> Result<HashSet<String>> {
    VocabularyExtractor::default().allowed_from_lexicon(path)
}

/// Forbidden vocabulary from an identifiers dump, without logging.
pub fn extract_forbidden_vocabulary<P: AsRef<Path>>(path: P) -> Result<HashSet<String>> {
    VocabularyExtractor::default().forbidden_from_identifiers(path)
}

/// Top-`n` vocabulary from a frequency-ranked file, without logging.
pub fn extract_frequent_vocabulary<P: AsRef<Path>>(path: P, n: usize) -> Result<HashSet<String>> {
    VocabularyExtractor::default().frequent_from_vocab(path, n)
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, io::Cursor};

    use super::{word_tokens, VocabularyExtractor};

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|word| (*word).to_string()).collect()
    }

    const LEXICON: &str = "\
{base=Fever
entry=E0027454
\tcat=noun
\tvariants=reg
}
{base=Abbott
entry=E0006302
\tcat=noun
\tvariants=uncount
\tproper
}
{base=Crohn's disease
entry=E0019436
\tcat=noun
\tvariants=uncount
}
";

    #[test]
    fn tokens_split_on_non_word_runs() {
        let tokens: Vec<&str> = word_tokens("o'brien,  st.-paul_2").collect();
        assert_eq!(tokens, ["o", "brien", "st", "paul_2"]);
    }

    #[test]
    fn tokens_keep_non_ascii_letters() {
        let tokens: Vec<&str> = word_tokens("josé müller").collect();
        assert_eq!(tokens, ["josé", "müller"]);
    }

    #[test]
    fn lexicon_skips_proper_nouns_and_splits_headwords() {
        let words = VocabularyExtractor::default()
            .allowed_from_lexicon_reader(Cursor::new(LEXICON))
            .unwrap();
        assert_eq!(words, set(&["fever", "crohn", "s", "disease"]));
    }

    #[test]
    fn lexicon_keeps_headword_proper_without_flag() {
        let lexicon = "\
{base=proper
entry=E0050237
\tcat=adj
\tvariants=inv
}
{base=Proper
entry=E0099999
\tcat=noun
\tproper
}
{base=fever
entry=E0027454
\tcat=noun
}
";
        let words = VocabularyExtractor::default()
            .allowed_from_lexicon_reader(Cursor::new(lexicon))
            .unwrap();
        assert_eq!(words, set(&["proper", "fever"]));
    }

    #[test]
    fn lexicon_ignores_flags_before_first_entry() {
        let lexicon = "\tproper\n{base=fever\nentry=E0027454\n}\n";
        let words = VocabularyExtractor::default()
            .allowed_from_lexicon_reader(Cursor::new(lexicon))
            .unwrap();
        assert_eq!(words, set(&["fever"]));
    }

    #[test]
    fn lexicon_accepts_crlf_line_endings() {
        let lexicon = "{base=Abbott\r\n\tproper\r\n}\r\n{base=cough\r\n}\r\n";
        let words = VocabularyExtractor::default()
            .allowed_from_lexicon_reader(Cursor::new(lexicon))
            .unwrap();
        assert_eq!(words, set(&["cough"]));
    }

    #[test]
    fn lexicon_without_entries_is_empty() {
        let words = VocabularyExtractor::default()
            .allowed_from_lexicon_reader(Cursor::new("no entries here\n"))
            .unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn identifiers_drop_single_characters() {
        let dump = "Smith, John A.\n42 Elm St, Apt B\n";
        let words = VocabularyExtractor::default()
            .forbidden_from_identifiers_reader(Cursor::new(dump))
            .unwrap();
        assert_eq!(words, set(&["smith", "john", "42", "elm", "st", "apt"]));
    }

    #[test]
    fn frequent_takes_first_field_of_top_lines() {
        let vocab = "the 1061396\nOf 593677\n\nand 416629\nin 397049\n";
        let words = VocabularyExtractor::default()
            .frequent_from_vocab_reader(Cursor::new(vocab), 3)
            .unwrap();
        assert_eq!(words, set(&["the", "of", "and"]));
    }

    #[test]
    fn frequent_with_short_input_returns_everything() {
        let words = VocabularyExtractor::default()
            .frequent_from_vocab_reader(Cursor::new("the\nof\n"), 10)
            .unwrap();
        assert_eq!(words, set(&["the", "of"]));
    }

    #[test]
    fn frequent_with_zero_is_empty() {
        let words = VocabularyExtractor::default()
            .frequent_from_vocab_reader(Cursor::new("the\nof\n"), 0)
            .unwrap();
        assert!(words.is_empty());
    }
}
