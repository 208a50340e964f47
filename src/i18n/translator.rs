use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display languages supported by the operations screens.
///
/// The numeric value is the column index into a dictionary row. Column 0 is
/// the source word itself, so English translation is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Sinhala,
    Tamil,
}

impl Language {
    /// Column index of this language in a dictionary row.
    pub fn column(self) -> usize {
        match self {
            Language::English => 0,
            Language::Sinhala => 1,
            Language::Tamil => 2,
        }
    }

    /// Number of columns every dictionary row must carry.
    pub const COLUMNS: usize = 3;
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "sinhala" | "si" => Ok(Language::Sinhala),
            "tamil" | "ta" => Ok(Language::Tamil),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::English => "english",
            Language::Sinhala => "sinhala",
            Language::Tamil => "tamil",
        };
        write!(f, "{}", name)
    }
}

/// Errors raised while loading the dictionary resource.
///
/// All of these are fatal at startup; there is no partial-load recovery.
#[derive(Debug, thiserror::Error)]
pub enum TranslatorError {
    #[error("Failed to read dictionary resource {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dictionary row {line}: expected {expected} columns, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate dictionary entry for \"{word}\" at row {line}")]
    DuplicateEntry { word: String, line: usize },
}

/// Immutable word-to-translation lookup table.
///
/// Constructed once at process startup and shared read-only afterwards, so
/// concurrent use needs no synchronization.
#[derive(Debug, Clone)]
pub struct Translator {
    dictionary: HashMap<String, Vec<String>>,
}

impl Translator {
    /// Load the dictionary from a comma-separated resource file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TranslatorError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| TranslatorError::Io {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;
        Self::from_str_content(&content)
    }

    /// Parse dictionary rows from in-memory content (one `word,si,ta` row per
    /// line, blank lines skipped).
    pub fn from_str_content(content: &str) -> Result<Self, TranslatorError> {
        let mut dictionary = HashMap::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let columns: Vec<String> = line.split(',').map(|c| c.trim().to_string()).collect();
            if columns.len() < Language::COLUMNS {
                return Err(TranslatorError::MalformedRow {
                    line: idx + 1,
                    expected: Language::COLUMNS,
                    found: columns.len(),
                });
            }
            let word = columns[0].clone();
            if dictionary.insert(word.clone(), columns).is_some() {
                return Err(TranslatorError::DuplicateEntry {
                    word,
                    line: idx + 1,
                });
            }
        }

        Ok(Self { dictionary })
    }

    /// Build an empty translator; every word passes through unchanged.
    pub fn empty() -> Self {
        Self {
            dictionary: HashMap::new(),
        }
    }

    /// Number of dictionary entries.
    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    /// Translate a single word. Words absent from the dictionary pass through
    /// unchanged.
    pub fn translate_word<'a>(&'a self, word: &'a str, language: Language) -> &'a str {
        match self.dictionary.get(word) {
            Some(row) => row[language.column()].as_str(),
            None => word,
        }
    }

    /// Translate a phrase token by token.
    ///
    /// Tokens are whitespace-separated and only exact token matches are
    /// replaced. The historical implementation performed whole-string
    /// substring substitution, which corrupted unrelated words whenever a
    /// dictionary key was a substring of another token ("a" inside "cat");
    /// the token-boundary semantics here are the deliberate replacement.
    pub fn translate(&self, text: &str, language: Language) -> String {
        text.split_whitespace()
            .map(|word| self.translate_word(word, language))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Translator {
        Translator::from_str_content("go,ada,gaman\nnow,den,ippo\na,x,y\n").unwrap()
    }

    #[test]
    fn translates_known_words_at_language_index() {
        let t = sample();
        assert_eq!(t.translate_word("go", Language::Sinhala), "ada");
        assert_eq!(t.translate_word("go", Language::Tamil), "gaman");
        // English is the identity column.
        assert_eq!(t.translate_word("go", Language::English), "go");
    }

    #[test]
    fn unknown_words_pass_through() {
        let t = sample();
        assert_eq!(t.translate_word("depot", Language::Tamil), "depot");
        assert_eq!(t.translate("depot open", Language::Sinhala), "depot open");
    }

    #[test]
    fn phrase_translation_replaces_each_matching_token() {
        let t = sample();
        assert_eq!(t.translate("go now", Language::Tamil), "gaman now");
        assert_eq!(t.translate("go now", Language::Sinhala), "ada den");
    }

    // The historical substring semantics would have mangled "cat" and "has"
    // here because "a" is a dictionary key. Token-boundary replacement leaves
    // them intact and only replaces the standalone token.
    #[test]
    fn substring_keys_do_not_corrupt_other_tokens() {
        let t = sample();
        assert_eq!(t.translate("cat has a", Language::Sinhala), "cat has x");
    }

    #[test]
    fn malformed_row_fails_to_load() {
        let err = Translator::from_str_content("stop,nawathinna\n").unwrap_err();
        assert!(matches!(
            err,
            TranslatorError::MalformedRow {
                line: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn duplicate_rows_fail_to_load() {
        let err = Translator::from_str_content("go,ada,gaman\ngo,x,y\n").unwrap_err();
        assert!(matches!(err, TranslatorError::DuplicateEntry { line: 2, .. }));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let t = Translator::from_str_content("\ngo,ada,gaman\n\n").unwrap();
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn loads_from_a_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "go,ada,gaman").unwrap();
        let t = Translator::from_path(file.path()).unwrap();
        assert_eq!(t.translate("go", Language::Sinhala), "ada");
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = Translator::from_path("/nonexistent/simple-translator.csv").unwrap_err();
        assert!(matches!(err, TranslatorError::Io { .. }));
    }

    #[test]
    fn language_parses_from_query_values() {
        assert_eq!("si".parse::<Language>().unwrap(), Language::Sinhala);
        assert_eq!("TAMIL".parse::<Language>().unwrap(), Language::Tamil);
        assert!("klingon".parse::<Language>().is_err());
    }
}
