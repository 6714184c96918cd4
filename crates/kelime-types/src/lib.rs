pub mod saved;
pub mod types;
pub mod word;

pub use saved::SavedWordSet;
pub use types::*;
pub use word::{BilingualText, VocabularyWord, WordDetails, word_key};
