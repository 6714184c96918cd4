use kelime_types::{CardFace, VocabularyWord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardCommand {
    Flip,
}

/// Flip state of the card currently on screen.
///
/// A card belongs to one word; showing another word means a new card,
/// which always starts on its front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    key: Option<String>,
    face: CardFace,
}

impl Flashcard {
    pub fn new(word: Option<&VocabularyWord>) -> Self {
        Self {
            key: word.map(VocabularyWord::key),
            face: CardFace::Front,
        }
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    pub fn is_for(&self, word: Option<&VocabularyWord>) -> bool {
        self.key == word.map(VocabularyWord::key)
    }

    /// Apply a command, returns whether the face changed.
    /// Flips are dropped while speech is playing.
    pub fn handle(&mut self, command: CardCommand, speaking: bool) -> bool {
        match command {
            CardCommand::Flip => {
                if speaking {
                    tracing::debug!("flip dropped while speaking");
                    return false;
                }
                self.face = match self.face {
                    CardFace::Front => CardFace::Back,
                    CardFace::Back => CardFace::Front,
                };
                true
            }
        }
    }
}

impl Default for Flashcard {
    fn default() -> Self {
        Self::new(None)
    }
}
