use std::fmt::Write as _;
use std::io::{BufRead, BufReader, Write};

use kanal::{AsyncReceiver, AsyncSender};
use kelime_types::{
    AppEvent, CardFace, CardView, DeckCommand, DetailTarget, Focus, Key, Notice, SpeakTarget,
    View, VocabularyEntry, VocabularyWord, WordDetails,
};
use tokio_util::sync::CancellationToken;

const HELP_LEARN: &str = "\
Learn view:
  <profession>      generate words for a profession (or: gen <profession>)
  more              load more words
  save <n>          save or unsave word n
  info <n>          show details of word n
  close             close the details
  cards             switch to your flashcards
  quit              exit";

const HELP_CARDS: &str = "\
Flashcards:
  <enter>, space    flip the card
  h, left, <-       previous card
  l, right, ->      next card
  shuffle           shuffle the deck
  rm                remove the card from your words
  say, say-sentence pronounce the word or the sentence
  info, close       open or close the details of the card
  learn             back to the learn view
  quit              exit";

/// What a typed line means
#[derive(Debug)]
pub enum Input {
    Event(AppEvent),
    Help,
    Unknown(String),
}

/// Interpret a line in the context of the visible view. In the learn view
/// the line is a text field, so nothing is routed through key bindings.
pub fn parse_input(line: &str, view: View) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();
    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (trimmed, ""),
    };

    match (view, command) {
        (_, "quit" | "q" | "exit") => Input::Event(AppEvent::Quit),
        (_, "help" | "?") => Input::Help,
        (_, "close") => Input::Event(AppEvent::CloseDetails),

        (View::Learn, "gen" | "g") if !arg.is_empty() => {
            Input::Event(AppEvent::Generate(arg.to_string()))
        }
        (View::Learn, "more") => Input::Event(AppEvent::LoadMore),
        (View::Learn, "save" | "s") => match parse_index(arg) {
            Some(index) => Input::Event(AppEvent::ToggleSave(index)),
            None => Input::Unknown(trimmed.to_string()),
        },
        (View::Learn, "info" | "i") => match parse_index(arg) {
            Some(index) => Input::Event(AppEvent::ShowDetails(DetailTarget::Batch(index))),
            None => Input::Unknown(trimmed.to_string()),
        },
        (View::Learn, "cards" | "words") => Input::Event(AppEvent::SwitchView(View::MyWords)),
        (View::Learn, "") => Input::Help,
        (View::Learn, _) => Input::Event(AppEvent::Generate(trimmed.to_string())),

        (View::MyWords, "learn") => Input::Event(AppEvent::SwitchView(View::Learn)),
        (View::MyWords, "shuffle") => Input::Event(AppEvent::Deck(DeckCommand::Shuffle)),
        (View::MyWords, "rm" | "remove") => Input::Event(AppEvent::Deck(DeckCommand::RemoveCurrent)),
        (View::MyWords, "say") => Input::Event(AppEvent::Speak(SpeakTarget::Word)),
        (View::MyWords, "say-sentence") => Input::Event(AppEvent::Speak(SpeakTarget::Sentence)),
        (View::MyWords, "info" | "i") => {
            Input::Event(AppEvent::ShowDetails(DetailTarget::CurrentCard))
        }
        (View::MyWords, _) => match parse_key(line) {
            Key::Other => Input::Unknown(trimmed.to_string()),
            key => Input::Event(AppEvent::Key {
                key,
                focus: Focus::Page,
            }),
        },
    }
}

fn parse_index(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok().filter(|n| *n > 0).map(|n| n - 1)
}

/// Raw arrow escape sequences show up when the terminal echoes them
fn parse_key(line: &str) -> Key {
    match line.trim_matches(['\r', '\n']) {
        "" | " " => Key::Space,
        line if line.trim() == "space" => Key::Space,
        "\u{1b}[D" => Key::ArrowLeft,
        "\u{1b}[C" => Key::ArrowRight,
        line => match line.trim() {
            "h" | "left" | "<-" | "←" | "p" => Key::ArrowLeft,
            "l" | "right" | "->" | "→" | "n" => Key::ArrowRight,
            _ => Key::Other,
        },
    }
}

fn render_entry(out: &mut String, index: usize, entry: &VocabularyEntry) {
    let mark = if entry.saved { "*" } else { " " };
    let _ = writeln!(
        out,
        "{:>3}. [{}] {} - {}\n       \"{}\"",
        index + 1,
        mark,
        entry.word.word,
        entry.word.translation,
        entry.word.sentence
    );
}

fn render_card(card: &CardView) -> String {
    let mut out = format!("[ {} / {} ]\n", card.position, card.total);
    match card.face {
        CardFace::Front => {
            let _ = writeln!(out, "    {}", card.word.word);
            out.push_str("    (enter to flip)");
        }
        CardFace::Back => {
            let _ = writeln!(out, "    {}", card.word.translation);
            let _ = write!(out, "    Example: \"{}\"", card.word.sentence);
        }
    }
    out
}

fn render_details(word: &VocabularyWord, details: &WordDetails) -> String {
    let mut out = format!("== {} ({}) ==\n", word.word, word.translation);
    let _ = writeln!(
        out,
        "Definition:\n  {}\n  {}",
        details.definition.en, details.definition.tr
    );
    if !details.synonyms.is_empty() {
        let _ = writeln!(out, "Synonyms: {}", details.synonyms.join(", "));
    }
    if !details.antonyms.is_empty() {
        let _ = writeln!(out, "Antonyms: {}", details.antonyms.join(", "));
    }
    if !details.examples.is_empty() {
        out.push_str("Examples:\n");
        for example in &details.examples {
            let _ = writeln!(out, "  - {}\n    {}", example.en, example.tr);
        }
    }
    let _ = write!(
        out,
        "Collocations:\n  {}\n  {}",
        details.collocations.en, details.collocations.tr
    );
    out
}

/// Text for an app event, `None` for events with nothing to show
pub fn render(event: &AppEvent) -> Option<String> {
    match event {
        AppEvent::ShowVocabulary {
            profession,
            entries,
            saved_count,
        } => {
            let mut out = String::new();
            if profession.is_empty() {
                let _ = write!(
                    out,
                    "Enter your profession to get started. (my words: {saved_count})"
                );
                return Some(out);
            }

            let _ = writeln!(out, "== {} == (my words: {})", profession, saved_count);
            for (index, entry) in entries.iter().enumerate() {
                render_entry(&mut out, index, entry);
            }
            if !entries.is_empty() {
                out.push_str("Type 'more' for more words.");
            }
            Some(out.trim_end().to_string())
        }
        AppEvent::ShowCard(card) => Some(render_card(card)),
        AppEvent::ShowEmptyDeck => Some(
            "No saved words yet. Save words in the learn view to see flashcards.".to_string(),
        ),
        AppEvent::ShowWordDetails { word, details } => Some(render_details(word, details)),
        AppEvent::Loading(true) => Some("Preparing words for you...".to_string()),
        AppEvent::Status(text) => Some(text.clone()),
        AppEvent::Notice(Notice::EmptyResult { profession }) => Some(format!(
            "No new words for '{}'. Everything suggested is already in your lists.",
            profession
        )),
        AppEvent::Error(message) => Some(format!("error: {}", message)),
        _ => None,
    }
}

fn prompt(view: View) -> &'static str {
    match view {
        View::Learn => "learn> ",
        View::MyWords => "cards> ",
    }
}

/// Read lines on a plain thread, a blocking read can't be cancelled.
/// The channel closes at end of input or on a read error.
pub(crate) fn spawn_line_reader<R>(reader: R) -> AsyncReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = kanal::bounded::<String>(16);
    std::thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
        tracing::debug!("input closed");
    });
    rx.to_async()
}

/// Terminal front-end
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let lines = spawn_line_reader(BufReader::new(std::io::stdin()));
    let mut view = View::Learn;

    let show_prompt = |view: View| {
        if interactive {
            print!("{}", prompt(view));
            let _ = std::io::stdout().flush();
        }
    };

    show_prompt(view);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => {
                let event = event?;
                if let Some(text) = render(&event) {
                    if interactive {
                        println!();
                    }
                    println!("{}", text);
                    show_prompt(view);
                }
            }
            line = lines.recv() => {
                let Ok(line) = line else {
                    tracing::info!("Input closed, quitting");
                    ui_to_app_tx.send(AppEvent::Quit).await?;
                    break;
                };

                match parse_input(&line, view) {
                    Input::Event(event) => {
                        if let AppEvent::SwitchView(next) = event {
                            view = next;
                        }
                        ui_to_app_tx.send(event).await?;
                    }
                    Input::Help => {
                        println!("{}", match view {
                            View::Learn => HELP_LEARN,
                            View::MyWords => HELP_CARDS,
                        });
                        show_prompt(view);
                    }
                    Input::Unknown(text) => {
                        println!("Unknown command '{}', type 'help'.", text);
                        show_prompt(view);
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use kelime_types::BilingualText;

    use super::*;

    fn event(input: Input) -> AppEvent {
        match input {
            Input::Event(event) => event,
            other => panic!("expected an event, got {other:?}"),
        }
    }

    #[test]
    fn learn_view_treats_text_as_profession() {
        match event(parse_input("Software Developer", View::Learn)) {
            AppEvent::Generate(p) => assert_eq!(p, "Software Developer"),
            other => panic!("unexpected {other:?}"),
        }
        match event(parse_input("gen nurse", View::Learn)) {
            AppEvent::Generate(p) => assert_eq!(p, "nurse"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn learn_view_never_produces_keys() {
        for line in ["h", "l", " ", "space"] {
            assert!(!matches!(
                parse_input(line, View::Learn),
                Input::Event(AppEvent::Key { .. })
            ));
        }
    }

    #[test]
    fn indices_are_one_based() {
        assert!(matches!(
            event(parse_input("save 2", View::Learn)),
            AppEvent::ToggleSave(1)
        ));
        assert!(matches!(
            event(parse_input("info 1", View::Learn)),
            AppEvent::ShowDetails(DetailTarget::Batch(0))
        ));
        assert!(matches!(parse_input("save 0", View::Learn), Input::Unknown(_)));
    }

    #[test]
    fn card_view_maps_keys() {
        let key = |line: &str| match event(parse_input(line, View::MyWords)) {
            AppEvent::Key { key, focus } => {
                assert_eq!(focus, Focus::Page);
                key
            }
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(key(""), Key::Space);
        assert_eq!(key("space"), Key::Space);
        assert_eq!(key("h"), Key::ArrowLeft);
        assert_eq!(key("\u{1b}[C"), Key::ArrowRight);
        assert!(matches!(parse_input("zzz", View::MyWords), Input::Unknown(_)));
    }

    #[test]
    fn card_view_commands() {
        assert!(matches!(
            event(parse_input("shuffle", View::MyWords)),
            AppEvent::Deck(DeckCommand::Shuffle)
        ));
        assert!(matches!(
            event(parse_input("rm", View::MyWords)),
            AppEvent::Deck(DeckCommand::RemoveCurrent)
        ));
        assert!(matches!(
            event(parse_input("learn", View::MyWords)),
            AppEvent::SwitchView(View::Learn)
        ));
    }

    #[test]
    fn renders_card_faces() {
        let mut card = CardView {
            word: VocabularyWord::new("invoice", "fatura", "Send the invoice."),
            face: CardFace::Front,
            position: 2,
            total: 3,
        };
        let front = render(&AppEvent::ShowCard(card.clone())).unwrap();
        assert!(front.contains("[ 2 / 3 ]"));
        assert!(front.contains("invoice"));
        assert!(!front.contains("fatura"));

        card.face = CardFace::Back;
        let back = render(&AppEvent::ShowCard(card)).unwrap();
        assert!(back.contains("fatura"));
        assert!(back.contains("Send the invoice."));
    }

    #[test]
    fn renders_details_without_empty_sections() {
        let details = WordDetails {
            definition: BilingualText {
                en: "a bill".into(),
                tr: "bir fatura".into(),
            },
            synonyms: vec!["bill".into()],
            antonyms: vec![],
            examples: vec![],
            collocations: BilingualText {
                en: "issue an invoice".into(),
                tr: "fatura kesmek".into(),
            },
        };
        let word = VocabularyWord::new("invoice", "fatura", "s");
        let text = render(&AppEvent::ShowWordDetails { word, details }).unwrap();
        assert!(text.contains("Synonyms: bill"));
        assert!(!text.contains("Antonyms"));
        assert!(text.contains("issue an invoice"));
    }

    #[test]
    fn loading_done_renders_nothing() {
        assert!(render(&AppEvent::Loading(false)).is_none());
    }
}
