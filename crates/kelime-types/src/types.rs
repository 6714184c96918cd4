use crate::word::{VocabularyWord, WordDetails};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Ask for a fresh batch for a profession
    Generate(String),
    /// Ask for more words for the current profession
    LoadMore,
    /// Save or unsave an entry of the current batch
    ToggleSave(usize),
    ShowDetails(DetailTarget),
    CloseDetails,
    SwitchView(View),
    Deck(DeckCommand),
    Key {
        key: Key,
        focus: Focus,
    },
    Speak(SpeakTarget),
    Quit,

    // App -> UI
    ShowVocabulary {
        profession: String,
        entries: Vec<VocabularyEntry>,
        saved_count: usize,
    },
    ShowCard(CardView),
    ShowEmptyDeck,
    ShowWordDetails {
        word: VocabularyWord,
        details: WordDetails,
    },
    Loading(bool),
    Status(String),
    Notice(Notice),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Learn,
    MyWords,
}

/// Which word a detail request is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTarget {
    Batch(usize),
    CurrentCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakTarget {
    Word,
    Sentence,
}

/// Commands the flashcard deck understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckCommand {
    Next,
    Previous,
    Flip,
    Shuffle,
    RemoveCurrent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Char(char),
    Other,
}

/// Where keyboard focus currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    TextEntry,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Front,
    Back,
}

#[derive(Debug, Clone)]
pub struct VocabularyEntry {
    pub word: VocabularyWord,
    pub saved: bool,
}

#[derive(Debug, Clone)]
pub struct CardView {
    pub word: VocabularyWord,
    pub face: CardFace,
    /// 1-based position of the visible card
    pub position: usize,
    pub total: usize,
}

/// Non-error outcomes worth telling the user about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Generation succeeded but produced nothing new
    EmptyResult { profession: String },
}
