use std::collections::HashSet;

use kelime_types::{VocabularyWord, WordDetails, word_key};
use serde::Deserialize;

use crate::{DetailFetchError, GenerationError};

#[derive(Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, trimmed. Empty when there is none.
    pub(crate) fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

/// Parse the generated vocabulary text. Empty text is an empty batch.
pub fn parse_vocabulary(text: &str) -> Result<Vec<VocabularyWord>, GenerationError> {
    let text = text.trim();
    if text.is_empty() {
        tracing::warn!("Gemini API returned an empty response string");
        return Ok(Vec::new());
    }

    serde_json::from_str(text).map_err(|e| GenerationError::InvalidResponse(e.to_string()))
}

/// Parse the detail text. Details are never legitimately empty.
pub fn parse_details(text: &str) -> Result<WordDetails, DetailFetchError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DetailFetchError::EmptyResponse);
    }

    serde_json::from_str(text).map_err(|e| DetailFetchError::InvalidResponse(e.to_string()))
}

/// Drop words that repeat an excluded word or an earlier word of the batch
pub fn retain_new_words(words: Vec<VocabularyWord>, exclude_words: &[String]) -> Vec<VocabularyWord> {
    let mut seen: HashSet<String> = exclude_words.iter().map(|w| word_key(w)).collect();
    let before = words.len();

    let kept: Vec<VocabularyWord> = words
        .into_iter()
        .filter(|w| !w.word.trim().is_empty() && seen.insert(w.key()))
        .collect();

    if kept.len() != before {
        tracing::debug!("Dropped {} repeated words", before - kept.len());
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vocabulary_text_is_an_empty_batch() {
        assert!(parse_vocabulary("   ").unwrap().is_empty());
        assert!(parse_vocabulary("[]").unwrap().is_empty());
    }

    #[test]
    fn vocabulary_parses_required_fields() {
        let text = r#"[{"word":"scalpel","translation":"neşter","sentence":"Hand me the scalpel."}]"#;
        let words = parse_vocabulary(text).unwrap();
        assert_eq!(words, vec![VocabularyWord::new("scalpel", "neşter", "Hand me the scalpel.")]);
    }

    #[test]
    fn vocabulary_schema_mismatch_is_an_error() {
        let text = r#"[{"word":"scalpel","translation":"neşter"}]"#;
        assert!(matches!(
            parse_vocabulary(text),
            Err(GenerationError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_vocabulary("not json"),
            Err(GenerationError::InvalidResponse(_))
        ));
    }

    #[test]
    fn empty_details_text_is_an_error() {
        assert!(matches!(parse_details(""), Err(DetailFetchError::EmptyResponse)));
    }

    #[test]
    fn details_accept_any_example_count() {
        let text = r#"{
            "definition": {"en": "a check", "tr": "bir kontrol"},
            "synonyms": [],
            "antonyms": [],
            "examples": [{"en": "e1", "tr": "t1"}],
            "collocations": {"en": "conduct an audit", "tr": "denetim yapmak"}
        }"#;
        let details = parse_details(text).unwrap();
        assert_eq!(details.examples.len(), 1);
        assert!(details.synonyms.is_empty());
    }

    #[test]
    fn details_schema_mismatch_is_an_error() {
        assert!(matches!(
            parse_details(r#"{"definition": "plain"}"#),
            Err(DetailFetchError::InvalidResponse(_))
        ));
    }

    #[test]
    fn retain_new_words_applies_exclusions_case_insensitively() {
        let words = vec![
            VocabularyWord::new("Audit", "denetim", "s"),
            VocabularyWord::new("ledger", "defter", "s"),
            VocabularyWord::new("LEDGER", "defter", "s"),
            VocabularyWord::new(" ", "", ""),
        ];
        let kept = retain_new_words(words, &["audit".to_string()]);
        assert_eq!(kept, vec![VocabularyWord::new("ledger", "defter", "s")]);
    }

    #[test]
    fn candidate_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":" [1,"},{"text":"2] "}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text(), "[1,2]");

        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), "");
    }
}
