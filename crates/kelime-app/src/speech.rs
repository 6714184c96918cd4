use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use kelime_config::speech::SpeechConfig;
use kelime_core::SpeechCue;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Tracks which utterance is playing. 0 means silence.
#[derive(Debug, Default)]
struct Utterances {
    active: AtomicU64,
    next: AtomicU64,
}

impl Utterances {
    /// Mark a new utterance as the playing one and return its id
    fn begin(&self) -> u64 {
        let id = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        self.active.store(id, Ordering::SeqCst);
        id
    }

    /// Clear the flag only if `id` is still the playing utterance
    fn finish(&self, id: u64) {
        let _ = self
            .active
            .compare_exchange(id, 0, Ordering::SeqCst, Ordering::SeqCst);
    }

    fn silence(&self) {
        self.active.store(0, Ordering::SeqCst);
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst) != 0
    }
}

/// Speaks through an external text-to-speech program
pub struct CommandSpeech {
    command: String,
    voice: String,
    supported: bool,
    utterances: Arc<Utterances>,
    current: Mutex<Option<CancellationToken>>,
}

impl CommandSpeech {
    pub fn new(config: &SpeechConfig) -> Self {
        let supported = command_available(&config.command);
        if supported {
            tracing::info!("Speech via '{}' ({})", config.command, config.voice);
        } else {
            tracing::warn!("Speech command '{}' not found", config.command);
        }

        Self {
            command: config.command.clone(),
            voice: config.voice.clone(),
            supported,
            utterances: Arc::new(Utterances::default()),
            current: Mutex::new(None),
        }
    }

    /// Stop the running utterance, if any
    pub fn cancel(&self) {
        if let Ok(mut current) = self.current.lock()
            && let Some(token) = current.take()
        {
            token.cancel();
            self.utterances.silence();
        }
    }
}

impl SpeechCue for CommandSpeech {
    fn speak(&self, text: &str) {
        if !self.supported {
            tracing::warn!("Speech not supported or voice not ready");
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!("Speech requested outside the runtime");
            return;
        };

        // Always cancel the previous utterance first
        self.cancel();

        let token = CancellationToken::new();
        if let Ok(mut current) = self.current.lock() {
            *current = Some(token.clone());
        }

        let utterances = self.utterances.clone();
        let id = utterances.begin();

        let mut command = Command::new(&self.command);
        command
            .arg("-v")
            .arg(&self.voice)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        runtime.spawn(async move {
            match command.spawn() {
                Ok(mut child) => {
                    tokio::select! {
                        status = child.wait() => match status {
                            Ok(status) if !status.success() => {
                                tracing::error!("Speech command exited with {}", status);
                            }
                            Err(e) => tracing::error!("Speech command failed: {}", e),
                            Ok(_) => {}
                        },
                        _ = token.cancelled() => {
                            let _ = child.kill().await;
                        }
                    }
                }
                Err(e) => tracing::error!("Failed to start speech command: {}", e),
            }

            utterances.finish(id);
        });
    }

    fn is_speaking(&self) -> bool {
        self.utterances.is_active()
    }

    fn is_supported(&self) -> bool {
        self.supported
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn command_available(command: &str) -> bool {
    let path = Path::new(command);
    if path.components().count() > 1 {
        return path.is_file();
    }

    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}
