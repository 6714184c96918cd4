use kelime_types::VocabularyWord;
use serde_json::{Value, json};

pub(crate) const VOCABULARY_SYSTEM: &str = "You are an expert linguist specializing in professional and technical English terminology. Your task is to identify and provide the most essential and frequently used vocabulary for various professions to help users master their business English skills.";

pub(crate) const DETAILS_SYSTEM: &str = "You are an expert linguist and a business English teacher. Your task is to provide a detailed analysis of a given English word within the context of a specific profession. For any content you generate, you must also provide a high-quality Turkish translation.";

pub(crate) fn vocabulary_prompt(profession: &str, exclude_words: &[String], batch_size: u32) -> String {
    let mut prompt = format!(
        "I am a \"{profession}\". Generate a list of the {batch_size} most frequently used and essential English vocabulary words for someone in my profession. \
Prioritize words that are critical for daily tasks, communication, and understanding core concepts in this field. \
These should be the words a professional in this area uses almost every day.\n\n\
For each word:\n\
1. Provide the English word.\n\
2. Provide its precise Turkish translation in a professional context.\n\
3. Provide a clear and practical example sentence showing its common usage for a \"{profession}\".\n\n\
Avoid overly generic business terms unless they have a very specific and frequent meaning within this profession. \
Also, avoid extremely niche or obscure jargon unless it is fundamentally essential.\n"
    );

    if !exclude_words.is_empty() {
        prompt.push_str(&format!(
            "Exclude these words from your response: {}.\n",
            exclude_words.join(", ")
        ));
    }

    prompt.push_str(
        "The output must be a JSON array of objects, with the keys \"word\", \"translation\", and \"sentence\".",
    );
    prompt
}

pub(crate) fn details_prompt(word: &VocabularyWord, profession: &str, example_count: u32) -> String {
    let VocabularyWord {
        word,
        translation,
        sentence,
    } = word;

    format!(
        "As an expert linguist for a \"{profession}\", provide a detailed analysis of the word \"{word}\".\n\
The user already knows its Turkish translation is \"{translation}\" and has seen it in the sentence: \"{sentence}\".\n\n\
Provide the following details in a structured JSON format:\n\
1. \"definition\": An object with \"en\" and \"tr\" keys. \"en\" should be a clear, concise definition of the word in English, tailored to its use within the \"{profession}\" field. \"tr\" should be the Turkish translation of this definition.\n\
2. \"synonyms\": An array of 3-5 relevant English synonyms. If none, provide an empty array.\n\
3. \"antonyms\": An array of 1-3 relevant English antonyms. If none, provide an empty array.\n\
4. \"examples\": An array of {example_count} objects, each with \"en\" and \"tr\" keys. Each object should represent an additional, diverse example sentence that is different from the one provided and showcases the word's usage in various contexts for a \"{profession}\". \"en\" is the English sentence, \"tr\" is its Turkish translation.\n\
5. \"collocations\": An object with \"en\" and \"tr\" keys. \"en\" should be a short explanation of common words or phrases that are frequently used with \"{word}\" (e.g., \"implement a strategy\", \"conduct an analysis\"). \"tr\" should be the Turkish translation of this explanation."
    )
}

fn bilingual_schema(en: &str, tr: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "en": { "type": "STRING", "description": en },
            "tr": { "type": "STRING", "description": tr }
        },
        "required": ["en", "tr"]
    })
}

pub(crate) fn vocabulary_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "word": {
                    "type": "STRING",
                    "description": "The English vocabulary word."
                },
                "translation": {
                    "type": "STRING",
                    "description": "The Turkish translation of the word."
                },
                "sentence": {
                    "type": "STRING",
                    "description": "An example sentence using the word in an English business context."
                }
            },
            "required": ["word", "translation", "sentence"]
        }
    })
}

pub(crate) fn details_schema(example_count: u32) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "definition": bilingual_schema(
                "A clear, concise definition of the word in English, tailored to its professional use.",
                "The Turkish translation of the English definition."
            ),
            "synonyms": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of relevant English synonyms."
            },
            "antonyms": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of relevant English antonyms."
            },
            "examples": {
                "type": "ARRAY",
                "items": bilingual_schema(
                    "An additional, diverse example sentence in English.",
                    "The Turkish translation of the example sentence."
                ),
                "description": format!(
                    "An array of {example_count} additional, diverse example sentences, each with an English and Turkish version."
                )
            },
            "collocations": bilingual_schema(
                "A short explanation in English of common words or phrases frequently used with the target word.",
                "The Turkish translation of the collocations explanation."
            )
        },
        "required": ["definition", "synonyms", "antonyms", "examples", "collocations"]
    })
}

/// Body of a `generateContent` call asking for JSON output
pub(crate) fn request_body(system: &str, prompt: &str, schema: Value) -> Value {
    json!({
        "systemInstruction": { "parts": [{ "text": system }] },
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema
        }
    })
}
