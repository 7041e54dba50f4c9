//! Word list module
//!
//! Holds the ordered list of accepted words. Position in the list doubles as
//! the day offset of each answer.
//!
//! Supported files:
//! - plain text, one word per line (blank lines skipped)
//! - JSON, either `["word", ...]` or `[{"word": "..."}, ...]`

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading a word list
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse word list {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("word list is empty")]
    Empty,
    #[error("entry {position} '{word}' has {actual} letters, expected {expected}")]
    WordLength {
        position: usize,
        word: String,
        actual: usize,
        expected: usize,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonEntry {
    Plain(String),
    Object { word: String },
}

impl JsonEntry {
    fn into_word(self) -> String {
        match self {
            Self::Plain(word) | Self::Object { word } => word,
        }
    }
}

/// Ordered, read-only word list
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
    lookup: HashSet<String>,
    word_length: usize,
}

impl Dictionary {
    /// Build a dictionary from words in day order.
    ///
    /// Entries are trimmed and blank entries dropped. Every remaining word must
    /// have exactly `word_length` characters.
    pub fn from_words<I, S>(words: I, word_length: usize) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Err(DictionaryError::Empty);
        }

        for (position, word) in words.iter().enumerate() {
            let actual = word.chars().count();
            if actual != word_length {
                return Err(DictionaryError::WordLength {
                    position,
                    word: word.clone(),
                    actual,
                    expected: word_length,
                });
            }
        }

        let lookup = words.iter().cloned().collect();
        Ok(Self {
            words,
            lookup,
            word_length,
        })
    }

    /// Load a word list file; `.json` files are parsed as JSON, anything
    /// else as one word per line.
    pub fn load(path: impl AsRef<Path>, word_length: usize) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            let entries: Vec<JsonEntry> =
                serde_json::from_str(&content).map_err(|source| DictionaryError::Json {
                    path: path.to_path_buf(),
                    source,
                })?;
            Self::from_words(entries.into_iter().map(JsonEntry::into_word), word_length)
        } else {
            Self::from_words(content.lines(), word_length)
        }
    }

    /// Exact, case-sensitive membership
    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    /// Answer for a day offset.
    ///
    /// Past the end of the list the answer is `None` unless `wrap_around`
    /// is set, in which case the list repeats.
    pub fn word_for_day(&self, day: usize, wrap_around: bool) -> Option<&str> {
        let index = if wrap_around {
            day % self.words.len()
        } else {
            day
        };
        self.words.get(index).map(String::as_str)
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub const fn word_length(&self) -> usize {
        self.word_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wordle_server_dict_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_from_words_keeps_order() {
        let dict = Dictionary::from_words(["crane", " slate ", "", "pious"], 5).unwrap();
        assert_eq!(dict.word_count(), 3);
        assert_eq!(dict.word_for_day(0, false), Some("crane"));
        assert_eq!(dict.word_for_day(1, false), Some("slate"));
        assert_eq!(dict.word_for_day(2, false), Some("pious"));
        assert_eq!(dict.word_length(), 5);
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let dict = Dictionary::from_words(["crane"], 5).unwrap();
        assert!(dict.contains("crane"));
        assert!(!dict.contains("CRANE"));
        assert!(!dict.contains("cran"));
    }

    #[test]
    fn test_rejects_wrong_length_and_empty() {
        let err = Dictionary::from_words(["crane", "cranes"], 5).unwrap_err();
        assert!(matches!(
            err,
            DictionaryError::WordLength { position: 1, actual: 6, expected: 5, .. }
        ));
        assert!(matches!(
            Dictionary::from_words(Vec::<String>::new(), 5),
            Err(DictionaryError::Empty)
        ));
    }

    #[test]
    fn test_word_for_day() {
        let dict = Dictionary::from_words(["aaaaa", "bbbbb", "ccccc"], 5).unwrap();
        assert_eq!(dict.word_for_day(1, false), Some("bbbbb"));
        assert_eq!(dict.word_for_day(3, false), None);
        assert_eq!(dict.word_for_day(3, true), Some("aaaaa"));
        assert_eq!(dict.word_for_day(7, true), Some("bbbbb"));
    }

    #[test]
    fn test_load_text_file() {
        let path = temp_file("words.txt", "crane\nslate\n\npious\n");
        let dict = Dictionary::load(&path, 5).unwrap();
        assert_eq!(dict.word_count(), 3);
        assert_eq!(dict.word_for_day(2, false), Some("pious"));
    }

    #[test]
    fn test_load_json_objects_and_strings() {
        let objects = temp_file("objects.json", r#"[{"word":"crane"},{"word":"slate"}]"#);
        let dict = Dictionary::load(&objects, 5).unwrap();
        assert_eq!(dict.word_for_day(1, false), Some("slate"));

        let plain = temp_file("plain.json", r#"["crane","slate"]"#);
        let dict = Dictionary::load(&plain, 5).unwrap();
        assert!(dict.contains("crane"));
    }

    #[test]
    fn test_load_errors() {
        let missing = std::env::temp_dir().join("wordle_server_missing_words.txt");
        assert!(matches!(
            Dictionary::load(&missing, 5),
            Err(DictionaryError::Io { .. })
        ));

        let broken = temp_file("broken.json", "[{\"word\":");
        assert!(matches!(
            Dictionary::load(&broken, 5),
            Err(DictionaryError::Json { .. })
        ));
    }
}
