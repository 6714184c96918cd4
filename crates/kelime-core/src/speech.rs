/// Text-to-speech collaborator. Fire and forget, with a busy flag.
pub trait SpeechCue: Send + Sync {
    /// Speak text aloud, cancelling whatever is being spoken
    fn speak(&self, text: &str);

    /// True while an utterance is playing
    fn is_speaking(&self) -> bool;

    /// Whether a voice is available at all
    fn is_supported(&self) -> bool;
}

/// Used when speech is disabled or no voice could be found
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeech;

impl SpeechCue for SilentSpeech {
    fn speak(&self, text: &str) {
        tracing::warn!("Speech not supported, skipping {} chars", text.len());
    }

    fn is_speaking(&self) -> bool {
        false
    }

    fn is_supported(&self) -> bool {
        false
    }
}
