use serde::{Deserialize, Serialize};

use crate::word::VocabularyWord;

/// Ordered list of saved words, unique by case-insensitive word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<VocabularyWord>", into = "Vec<VocabularyWord>")]
pub struct SavedWordSet {
    words: Vec<VocabularyWord>,
}

impl SavedWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self) -> &[VocabularyWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &VocabularyWord) -> bool {
        self.words.iter().any(|w| w.same_word(word))
    }

    /// Append a word unless one with the same key is already saved
    pub fn insert(&mut self, word: VocabularyWord) -> bool {
        if self.contains(&word) {
            return false;
        }
        self.words.push(word);
        true
    }

    pub fn remove(&mut self, word: &VocabularyWord) -> Option<VocabularyWord> {
        let pos = self.words.iter().position(|w| w.same_word(word))?;
        Some(self.words.remove(pos))
    }

    /// Returns whether the word is saved afterwards
    pub fn toggle(&mut self, word: &VocabularyWord) -> bool {
        if self.remove(word).is_some() {
            false
        } else {
            self.words.push(word.clone());
            true
        }
    }

    /// Plain words, used as the exclusion list for generation
    pub fn keys(&self) -> Vec<String> {
        self.words.iter().map(|w| w.word.clone()).collect()
    }
}

impl From<Vec<VocabularyWord>> for SavedWordSet {
    fn from(words: Vec<VocabularyWord>) -> Self {
        let mut set = SavedWordSet::new();
        for word in words {
            set.insert(word);
        }
        set
    }
}

impl From<SavedWordSet> for Vec<VocabularyWord> {
    fn from(set: SavedWordSet) -> Self {
        set.words
    }
}

impl FromIterator<VocabularyWord> for SavedWordSet {
    fn from_iter<I: IntoIterator<Item = VocabularyWord>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(w: &str) -> VocabularyWord {
        VocabularyWord::new(w, format!("{w}-tr"), format!("Use {w}."))
    }

    #[test]
    fn insert_is_case_insensitive() {
        let mut set = SavedWordSet::new();
        assert!(set.insert(word("Audit")));
        assert!(!set.insert(word("audit")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = SavedWordSet::new();
        assert!(set.toggle(&word("budget")));
        assert!(set.contains(&word("BUDGET")));
        assert!(!set.toggle(&word("Budget")));
        assert!(set.is_empty());
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut set: SavedWordSet = vec![word("a"), word("b"), word("c")].into();
        assert_eq!(set.remove(&word("B")).map(|w| w.word), Some("b".into()));
        assert_eq!(set.keys(), vec!["a", "c"]);
    }

    #[test]
    fn deserialize_drops_duplicates() {
        let json = r#"[
            {"word":"Asset","translation":"varlık","sentence":"s1"},
            {"word":"asset","translation":"varlık","sentence":"s2"},
            {"word":"Equity","translation":"özkaynak","sentence":"s3"}
        ]"#;
        let set: SavedWordSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.keys(), vec!["Asset", "Equity"]);
        assert_eq!(set.words()[0].sentence, "s1");
        assert!(set.contains(&word("ASSET")));
    }

    #[test]
    fn serializes_as_plain_array() {
        let set: SavedWordSet = vec![word("a")].into();
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
    }
}
