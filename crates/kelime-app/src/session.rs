use kelime_core::{FlashcardDeck, StoreError, WordStore};
use kelime_types::{
    AppEvent, CardView, SavedWordSet, View, VocabularyEntry, VocabularyWord, WordDetails,
};
use uuid::Uuid;

/// Where a generated batch goes once it arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Replace,
    Append,
}

#[derive(Debug, Clone, Copy)]
pub struct PendingGeneration {
    pub id: Uuid,
    pub mode: GenerationMode,
}

/// An open detail view. Results are only applied to the session that
/// asked for them.
#[derive(Debug, Clone)]
pub struct DetailSession {
    pub id: Uuid,
    pub word: VocabularyWord,
    pub details: Option<WordDetails>,
    pub error: Option<String>,
}

/// Everything the user is looking at, owned by the event loop task
#[derive(Debug)]
pub struct Session {
    pub profession: String,
    pub vocabulary: Vec<VocabularyWord>,
    pub saved: SavedWordSet,
    pub deck: FlashcardDeck,
    pub view: View,
    pub error: Option<String>,
    pub detail: Option<DetailSession>,
    pub generation: Option<PendingGeneration>,
    /// Set when the slot exists but could not be read, so writing would
    /// overwrite words we never loaded
    pub store_locked: bool,
}

impl Session {
    pub fn new(saved: SavedWordSet) -> Self {
        let deck = FlashcardDeck::from_saved(&saved);
        Self {
            profession: String::new(),
            vocabulary: Vec::new(),
            saved,
            deck,
            view: View::Learn,
            error: None,
            detail: None,
            generation: None,
            store_locked: false,
        }
    }

    /// Start from whatever the store holds. A failed read starts empty and
    /// leaves a message in `error` for the user.
    pub fn load(store: &dyn WordStore) -> Self {
        let err = match store.read() {
            Ok(saved) => return Self::new(saved),
            Err(e) => e,
        };

        let mut session = Self::new(SavedWordSet::new());
        match err {
            StoreError::Corrupt { backup, .. } => {
                session.error = Some(format!(
                    "Your saved words could not be read. The old file was kept at {}.",
                    backup.display()
                ));
            }
            e => {
                tracing::error!("Failed to read saved words: {}. Not writing this session.", e);
                session.store_locked = true;
                session.error = Some(format!(
                    "Could not read your saved words ({e}). Changes will not be saved."
                ));
            }
        }
        session
    }

    pub fn is_loading(&self) -> bool {
        self.generation.is_some()
    }

    pub fn is_saved(&self, word: &VocabularyWord) -> bool {
        self.saved.contains(word)
    }

    /// Words the next generation request must not return
    pub fn exclusions(&self, mode: GenerationMode) -> Vec<String> {
        let mut words = self.saved.keys();
        if mode == GenerationMode::Append {
            words.extend(self.vocabulary.iter().map(|w| w.word.clone()));
        }
        words
    }

    pub fn vocabulary_view(&self) -> AppEvent {
        AppEvent::ShowVocabulary {
            profession: self.profession.clone(),
            entries: self
                .vocabulary
                .iter()
                .map(|word| VocabularyEntry {
                    word: word.clone(),
                    saved: self.is_saved(word),
                })
                .collect(),
            saved_count: self.saved.len(),
        }
    }

    pub fn deck_view(&self) -> AppEvent {
        match self.deck.current_word() {
            Some(word) => {
                let (position, total) = self.deck.position();
                AppEvent::ShowCard(CardView {
                    word: word.clone(),
                    face: self.deck.face(),
                    position,
                    total,
                })
            }
            None => AppEvent::ShowEmptyDeck,
        }
    }

    pub fn current_view(&self) -> AppEvent {
        match self.view {
            View::Learn => self.vocabulary_view(),
            View::MyWords => self.deck_view(),
        }
    }
}
