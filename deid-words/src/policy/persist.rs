//! Line-oriented text persistence for word policies.
//!
//! The format is a mode marker on the first line followed by one word per
//! line. Only the active list is written, so a restored policy answers every
//! query the same way but cannot be split back into its original inputs.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use super::{mode::PolicyMode, word_policy::WordPolicy};
use crate::error::{PolicyError, Result};

impl WordPolicy {
    /// Writes the policy to `path`, creating or truncating the file.
    ///
    /// A failed write may leave a partial file behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    /// Writes the marker line and then the active list, one word per line.
    ///
    /// Words are written in lexicographic order.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", self.mode().marker())?;
        for word in self.sorted_words() {
            writeln!(writer, "{word}")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Reads a policy previously written by [`WordPolicy::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Reads a marker line and then one word per remaining line.
    ///
    /// Blank lines are kept as empty words; they never affect a query because
    /// short words are always allowed.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let marker = lines.next().transpose()?;
        let mode = marker
            .as_deref()
            .and_then(PolicyMode::from_marker)
            .ok_or_else(|| PolicyError::format(marker.as_deref()))?;

        let words = lines.collect::<std::io::Result<Vec<String>>>()?;
        Ok(Self::from_active(mode, words))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::WordPolicy;
    use crate::policy::mode::{PolicyMode, ALLOWED_WORDS_MARKER, FORBIDDEN_WORDS_MARKER};

    fn to_text(policy: &WordPolicy) -> String {
        let mut out = Vec::new();
        policy.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_marker_then_sorted_words() {
        let policy = WordPolicy::allow_list(["fever", "cough", "asthma"]);
        assert_eq!(
            to_text(&policy),
            format!("{ALLOWED_WORDS_MARKER}\nasthma\ncough\nfever\n")
        );
    }

    #[test]
    fn only_active_list_is_written() {
        let policy = WordPolicy::builder()
            .allowed(["apple", "banana"])
            .forbidden(["banana", "smith"])
            .build();
        assert_eq!(to_text(&policy), format!("{ALLOWED_WORDS_MARKER}\napple\n"));
    }

    #[test]
    fn empty_forbid_policy_writes_marker_only() {
        assert_eq!(
            to_text(&WordPolicy::default()),
            format!("{FORBIDDEN_WORDS_MARKER}\n")
        );
    }

    #[test]
    fn reads_forbid_list() {
        let text = format!("{FORBIDDEN_WORDS_MARKER}\nsmith\njones\n");
        let policy = WordPolicy::read_from(Cursor::new(text)).unwrap();
        assert_eq!(policy.mode(), PolicyMode::Forbid);
        assert_eq!(policy.len(), 2);
        assert!(!policy.is_allowed("Smith"));
        assert!(policy.is_allowed("fever"));
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let text = format!("{ALLOWED_WORDS_MARKER}\r\nfever\r\ncough\r\n");
        let policy = WordPolicy::read_from(Cursor::new(text)).unwrap();
        assert_eq!(policy.mode(), PolicyMode::Allow);
        assert!(policy.is_allowed("fever"));
        assert!(policy.is_allowed("cough"));
    }

    #[test]
    fn blank_lines_become_empty_words() {
        let text = format!("{ALLOWED_WORDS_MARKER}\nfever\n\ncough\n");
        let policy = WordPolicy::read_from(Cursor::new(text)).unwrap();
        assert_eq!(policy.len(), 3);
        assert!(policy.contains(""));
        assert!(policy.is_allowed(""));
    }

    #[test]
    fn marker_without_words_is_valid() {
        let policy = WordPolicy::read_from(Cursor::new(ALLOWED_WORDS_MARKER)).unwrap();
        assert_eq!(policy.mode(), PolicyMode::Allow);
        assert!(policy.is_empty());
    }

    #[test]
    fn unknown_marker_is_a_format_error() {
        let err = WordPolicy::read_from(Cursor::new("fever\ncough\n")).unwrap_err();
        assert!(err.is_format());
        assert_eq!(
            err.to_string(),
            "malformed policy file: expected a mode marker, found Some(\"fever\")"
        );
    }

    #[test]
    fn empty_input_is_a_format_error() {
        let err = WordPolicy::read_from(Cursor::new("")).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn invalid_utf8_is_an_io_error() {
        let mut bytes = format!("{ALLOWED_WORDS_MARKER}\n").into_bytes();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let err = WordPolicy::read_from(Cursor::new(bytes)).unwrap_err();
        assert!(err.is_io());
    }
}
