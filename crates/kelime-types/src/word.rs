use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Identity key of a word: NFKC normalized, trimmed and lowercased
pub fn word_key(word: &str) -> String {
    word.trim().nfkc().collect::<String>().to_lowercase()
}

/// A generated vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyWord {
    /// English word
    pub word: String,
    /// Turkish translation in a professional context
    pub translation: String,
    /// Example sentence using the word
    pub sentence: String,
}

impl VocabularyWord {
    pub fn new(
        word: impl Into<String>,
        translation: impl Into<String>,
        sentence: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            sentence: sentence.into(),
        }
    }

    pub fn key(&self) -> String {
        word_key(&self.word)
    }

    /// Case-insensitive identity comparison
    pub fn same_word(&self, other: &VocabularyWord) -> bool {
        self.key() == other.key()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    pub en: String,
    pub tr: String,
}

/// On-demand detail record for a single word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDetails {
    pub definition: BilingualText,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub examples: Vec<BilingualText>,
    pub collocations: BilingualText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ignores_case_and_padding() {
        assert_eq!(word_key("  Invoice "), "invoice");
        assert_eq!(word_key("ＡＰＩ"), "api");
    }

    #[test]
    fn same_word_compares_keys_only() {
        let a = VocabularyWord::new("Ledger", "defter", "Update the ledger.");
        let b = VocabularyWord::new("ledger", "büyük defter", "Check the ledger.");
        assert!(a.same_word(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn details_require_all_fields() {
        let json = r#"{"definition":{"en":"a","tr":"b"},"synonyms":[],"antonyms":[]}"#;
        assert!(serde_json::from_str::<WordDetails>(json).is_err());
    }
}
