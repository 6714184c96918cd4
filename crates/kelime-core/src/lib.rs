pub mod card;
pub mod deck;
pub mod keys;
pub mod speech;
pub mod store;

pub use card::{CardCommand, Flashcard};
pub use deck::{DeckEffect, FlashcardDeck};
pub use keys::{KeyBinding, bind};
pub use speech::{SilentSpeech, SpeechCue};
pub use store::{StoreError, WordStore};
