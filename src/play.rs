//! Line-oriented terminal play loop.

use anyhow::Result;
use strictly_words::{GameSession, HintOutcome, SessionError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument, warn};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A guess.
    Guess(String),
    /// Reveal a letter.
    Hint,
    /// Reorder the letters.
    Shuffle,
    /// Finish the round.
    Finish,
    /// Start another round.
    New,
    /// Define a word.
    Define(String),
    /// Submit the finished score.
    Submit(Option<String>),
    /// Retype the last accepted guess.
    Back,
    /// Show the letters and progress again.
    Show,
    /// List commands.
    Help,
    /// Leave.
    Quit,
    /// Something unrecognized.
    Unknown(String),
}

impl Input {
    /// Parses a line. Commands start with `:`; anything else is a guess.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Self::Guess(line.to_string());
        };
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        match name.to_lowercase().as_str() {
            "hint" | "h" => Self::Hint,
            "shuffle" | "s" => Self::Shuffle,
            "finish" | "f" => Self::Finish,
            "new" | "n" => Self::New,
            "define" | "d" if !arg.is_empty() => Self::Define(arg.to_string()),
            "submit" => Self::Submit((!arg.is_empty()).then(|| arg.to_string())),
            "back" | "b" => Self::Back,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "\
Type a word to guess it. Commands:
  :hint           reveal a letter
  :shuffle        reorder the letters
  :finish         end the round and show every word
  :new            start another round
  :define <word>  look a word up
  :submit [name]  submit your finished score
  :back           retype your last accepted word
  :show           show the letters again
  :quit           leave";

fn render(session: &GameSession) {
    let Some(letters) = session.letters() else {
        println!("No round in play. Type :new to start one.");
        return;
    };
    let found = session.guesses().map_or(0, |log| log.earned().count());
    println!();
    println!("  {}", letters.chars().map(String::from).collect::<Vec<_>>().join(" "));
    println!(
        "  score {}  found {}/{}  hints {}",
        session.score(),
        found,
        session.anagram_words().len(),
        session.hint_count()
    );
    let masked = session.masked_unguessed();
    if !masked.is_empty() && masked.len() <= 40 {
        println!("  {}", masked.join(" "));
    }
}

fn render_summary(session: &GameSession) {
    for line in session.score_info() {
        println!(
            "  {} letters x{} = {}",
            line.length(),
            line.count(),
            line.points()
        );
    }
    if let Some(log) = session.guesses() {
        let words: Vec<String> = log
            .entries()
            .iter()
            .map(|g| {
                if g.is_earned() {
                    g.word().to_uppercase()
                } else {
                    g.word().to_lowercase()
                }
            })
            .collect();
        println!("  {}", words.join(" "));
    }
}

fn report(err: &SessionError) {
    if err.is_transient() {
        println!("! {}", err);
    } else {
        warn!(error = %err, "Session error");
        println!("!! {}", err);
    }
}

async fn start(session: &mut GameSession) {
    println!("Loading a new word...");
    if let Err(err) = session.start_new_game().await {
        report(&err);
        return;
    }
    if session.got_new_hint() {
        println!("You earned a hint for the new round.");
        session.acknowledge_new_hint();
    }
    render(session);
}

/// Runs the play loop until `:quit` or end of input.
#[instrument(skip(session))]
pub async fn run(session: &mut GameSession, name: Option<String>) -> Result<()> {
    info!("Starting play loop");
    println!("{}", HELP);
    start(session).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = Input::parse(&line);
        debug!(?input, "Player input");
        session.dismiss_message();

        match input {
            // An empty line submits whatever :back restored
            Input::Guess(word) if word.is_empty() => {
                let pending = session
                    .round()
                    .is_some_and(|r| !r.buffer().pending().is_empty());
                if pending {
                    match session.submit_pending_guess() {
                        Ok(outcome) => {
                            println!("{}", outcome);
                            render(session);
                        }
                        Err(err) => report(&err),
                    }
                }
            }
            Input::Guess(word) => match session.submit_guess(&word) {
                Ok(outcome) => {
                    println!("{}", outcome);
                    render(session);
                }
                Err(err) => report(&err),
            },
            Input::Hint => match session.use_hint() {
                Ok(HintOutcome::Revealed(letter)) => {
                    println!("Revealed {}", letter);
                    render(session);
                }
                Ok(HintOutcome::NoHintsLeft) => println!("No hints left."),
                Ok(HintOutcome::AllRevealed) => println!("Every letter is already revealed."),
                Err(err) => report(&err),
            },
            Input::Shuffle => {
                session.shuffle_letters();
                render(session);
            }
            Input::Finish => match session.finish() {
                Ok(summary) => {
                    println!(
                        "Final score {} ({} of {} words)",
                        summary.score(),
                        summary.found(),
                        summary.total()
                    );
                    render_summary(session);
                    if *summary.carryover_earned() {
                        println!("You earned a hint for the next round.");
                    }
                }
                Err(err) => report(&err),
            },
            Input::New => start(session).await,
            Input::Define(word) => match session.lookup_definition(&word).await {
                Ok(definition) => println!("{}: {}", definition.word(), definition.definition()),
                Err(err) => report(&err),
            },
            Input::Submit(given) => {
                let Some(player) = given.or_else(|| name.clone()) else {
                    println!("Give a name: :submit <name>");
                    continue;
                };
                match session.submit_high_score(&player).await {
                    Ok(()) => println!("Submitted {} for {}", session.score(), player),
                    Err(err) => report(&err),
                }
            }
            Input::Back => {
                session.bring_back_word();
                if let Some(round) = session.round() {
                    println!("> {} (press enter to submit)", round.buffer().pending());
                }
            }
            Input::Show => render(session),
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
            Input::Unknown(text) => println!("Unknown command {}. Type :help.", text),
        }
    }

    info!("Play loop ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_guess() {
        assert_eq!(Input::parse("  rat "), Input::Guess("rat".into()));
    }

    #[test]
    fn test_commands() {
        assert_eq!(Input::parse(":hint"), Input::Hint);
        assert_eq!(Input::parse(":S"), Input::Shuffle);
        assert_eq!(Input::parse(":define tar"), Input::Define("tar".into()));
        assert_eq!(Input::parse(":submit"), Input::Submit(None));
        assert_eq!(Input::parse(":submit Ann Lee"), Input::Submit(Some("Ann Lee".into())));
        assert_eq!(Input::parse(":q"), Input::Quit);
    }

    #[test]
    fn test_define_needs_a_word() {
        assert_eq!(Input::parse(":define"), Input::Unknown(":define".into()));
    }
}
