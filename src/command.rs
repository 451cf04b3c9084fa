//! Chat-line commands for the checkers game.
//!
//! A chat line such as `d A6 B5` or `plateau` is parsed into a [`Command`],
//! run against a [`DamesService`] with [`dispatch`], and answered with a
//! [`Reply`] that renders either as chat text or as JSON.

use crate::error::ServiceError;
use crate::service::{DamesService, Inspection, MoveReport, StartReport};
use derive_more::{Display, From};
use serde::Serialize;
use std::str::FromStr;
use strictly_dames::{Color, Coord, CoordParseError, Move, Rejection};
use tracing::{debug, instrument};

/// Words that may precede a command, e.g. `.d plateau`.
const GAME_WORDS: [&str; 4] = ["d", "dame", "dames", "checkers"];

/// A parsed chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `start` / `nouveau`: begin a new game.
    Start,
    /// `plateau` / `board`: show the board.
    Board,
    /// `stats` / `statistiques`: show piece and capture tallies.
    Stats,
    /// `aide` / `help`: show usage.
    Help,
    /// `quit` / `quitter`: end the game.
    Quit,
    /// Two coordinates, e.g. `A6 B5`.
    Move(Coord, Coord),
}

/// A chat line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum CommandError {
    /// Nothing but whitespace (or the game word alone).
    #[display("Empty command")]
    Empty,

    /// Not a keyword and not a pair of coordinates.
    #[display("Unknown command {:?}", _0)]
    Unknown(String),

    /// Two words, but one is not a coordinate.
    #[display("{}", _0)]
    #[from]
    InvalidCoordinate(CoordParseError),
}

impl std::error::Error for CommandError {}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words: Vec<&str> = line.split_whitespace().collect();
        if let Some(first) = words.first() {
            let first = first.trim_start_matches('.').to_lowercase();
            if GAME_WORDS.contains(&first.as_str()) {
                words.remove(0);
            }
        }

        match words.as_slice() {
            [] => Err(CommandError::Empty),
            [word] => match word.to_lowercase().as_str() {
                "start" | "nouveau" => Ok(Command::Start),
                "plateau" | "board" => Ok(Command::Board),
                "stats" | "statistiques" => Ok(Command::Stats),
                "aide" | "help" => Ok(Command::Help),
                "quit" | "quitter" => Ok(Command::Quit),
                _ => Err(CommandError::Unknown((*word).to_string())),
            },
            [from, to] => Ok(Command::Move(from.parse()?, to.parse()?)),
            _ => Err(CommandError::Unknown(words.join(" "))),
        }
    }
}

/// Splits an optional `<chat-id>:` prefix off a line.
///
/// Lines without a prefix belong to `default_chat`.
pub fn split_chat<'a>(line: &'a str, default_chat: &'a str) -> (&'a str, &'a str) {
    match line.split_once(':').map(|(chat, rest)| (chat.trim(), rest.trim())) {
        Some((chat, rest)) if !chat.is_empty() && !chat.contains(char::is_whitespace) => {
            (chat, rest)
        }
        _ => (default_chat, line.trim()),
    }
}

/// Answer to one chat command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// A game started.
    Started(StartReport),
    /// A move was played.
    Moved {
        /// The move as typed.
        played: Move,
        /// Engine result.
        #[serde(flatten)]
        report: MoveReport,
    },
    /// Board view.
    Board(Inspection),
    /// Statistics view.
    Stats(Inspection),
    /// Usage text.
    Help,
    /// Result of a quit.
    Quit {
        /// Whether a game was actually running.
        ended: bool,
    },
    /// The command failed.
    Error {
        /// Human-readable message.
        message: String,
        /// Stable tag for illegal moves.
        rejection: Option<Rejection>,
    },
}

impl From<ServiceError> for Reply {
    fn from(error: ServiceError) -> Self {
        let rejection = match &error {
            ServiceError::IllegalMove(reason) => Some(*reason),
            _ => None,
        };
        Reply::Error {
            message: error.to_string(),
            rejection,
        }
    }
}

impl From<CommandError> for Reply {
    fn from(error: CommandError) -> Self {
        Reply::Error {
            message: format!("{error}. Type \"aide\" for help."),
            rejection: None,
        }
    }
}

/// Runs `command` for `chat_id`.
#[instrument(skip(service))]
pub fn dispatch(service: &DamesService, chat_id: &str, command: Command) -> Reply {
    let reply = match command {
        Command::Start => Reply::Started(service.start(chat_id)),
        Command::Board => service.inspect(chat_id).map_or_else(Reply::from, Reply::Board),
        Command::Stats => service.inspect(chat_id).map_or_else(Reply::from, Reply::Stats),
        Command::Help => Reply::Help,
        Command::Quit => Reply::Quit {
            ended: service.quit(chat_id),
        },
        Command::Move(from, to) => {
            let played = Move::new(from, to);
            service
                .play_move(chat_id, from.into(), to.into())
                .map_or_else(Reply::from, |report| Reply::Moved { played, report })
        }
    };
    debug!(?reply, "Dispatched command");
    reply
}

/// Parses and runs one chat line. Returns `None` for blank lines.
#[instrument(skip(service))]
pub fn respond(service: &DamesService, default_chat: &str, line: &str) -> Option<(String, Reply)> {
    if line.trim().is_empty() {
        return None;
    }
    let (chat_id, text) = split_chat(line, default_chat);
    let reply = match text.parse::<Command>() {
        Ok(command) => dispatch(service, chat_id, command),
        Err(e) => Reply::from(e),
    };
    Some((chat_id.to_string(), reply))
}

const HELP: &str = "\
Checkers commands:
  A6 B5      move a piece (column A-H, row 1-8)
  plateau    show the board
  start      start a new game
  stats      show statistics
  quit       end the game
Pieces move diagonally on dark squares and capture by jumping.
A man reaching the far row is crowned. Light moves first.
Symbols: l/d men, L/D kings, _ empty dark square, . light square";

fn side(color: Color) -> &'static str {
    match color {
        Color::Light => "Light (l)",
        Color::Dark => "Dark (d)",
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Started(start) => {
                writeln!(f, "New game of checkers!")?;
                writeln!(f, "{}", start.board)?;
                write!(f, "{} to move. Type two squares, e.g. \"A6 B5\".", side(start.turn))
            }
            Reply::Moved { played, report } => {
                write!(f, "Move: {played}")?;
                if let Some(at) = report.captured {
                    write!(f, " (captured {at})")?;
                }
                if report.promoted {
                    write!(f, " (crowned)")?;
                }
                writeln!(f)?;
                writeln!(f, "{}", report.board)?;
                if report.is_terminal() {
                    write!(f, "{}. Game over.", report.status)
                } else {
                    write!(f, "{} to move.", side(report.turn))
                }
            }
            Reply::Board(view) => {
                writeln!(f, "{}", view.board)?;
                writeln!(f, "Turn: {}", side(view.turn))?;
                writeln!(
                    f,
                    "Pieces: Light {} vs Dark {}",
                    view.pieces.of(Color::Light),
                    view.pieces.of(Color::Dark)
                )?;
                writeln!(
                    f,
                    "Captures: Light {} vs Dark {}",
                    view.captures.light, view.captures.dark
                )?;
                write!(f, "Moves: {}", view.move_count)
            }
            Reply::Stats(view) => {
                writeln!(f, "Game statistics")?;
                writeln!(f, "Turn: {}", side(view.turn))?;
                writeln!(f, "Moves played: {}", view.move_count)?;
                writeln!(
                    f,
                    "Captures: Light {} vs Dark {}",
                    view.captures.light, view.captures.dark
                )?;
                writeln!(f, "Light men: {}", view.pieces.light_men)?;
                writeln!(f, "Light kings: {}", view.pieces.light_kings)?;
                writeln!(f, "Dark men: {}", view.pieces.dark_men)?;
                writeln!(f, "Dark kings: {}", view.pieces.dark_kings)?;
                writeln!(f, "Total: {} pieces on the board", view.pieces.total())?;
                if let Some(last) = view.last_move {
                    writeln!(f, "Last move: {} -> {} ({})", last.from, last.to, last.piece.color)?;
                }
                write!(f, "Elapsed: {}s", view.elapsed_secs)
            }
            Reply::Help => write!(f, "{HELP}"),
            Reply::Quit { ended: true } => write!(f, "Game ended. Thanks for playing!"),
            Reply::Quit { ended: false } => write!(f, "No active game."),
            Reply::Error { message, .. } => write!(f, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_keyword_aliases() {
        assert_eq!("start".parse::<Command>(), Ok(Command::Start));
        assert_eq!("NOUVEAU".parse::<Command>(), Ok(Command::Start));
        assert_eq!("plateau".parse::<Command>(), Ok(Command::Board));
        assert_eq!("statistiques".parse::<Command>(), Ok(Command::Stats));
        assert_eq!("aide".parse::<Command>(), Ok(Command::Help));
        assert_eq!("quitter".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_game_word_prefix() {
        assert_eq!(".d board".parse::<Command>(), Ok(Command::Board));
        assert_eq!("dames a6 b5".parse::<Command>(), Ok(Command::Move(at("A6"), at("B5"))));
        assert_eq!("d".parse::<Command>(), Err(CommandError::Empty));
    }

    #[test]
    fn test_bad_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert!(matches!("dance".parse::<Command>(), Err(CommandError::Unknown(_))));
        assert!(matches!(
            "A6 Z9".parse::<Command>(),
            Err(CommandError::InvalidCoordinate(_))
        ));
        assert!(matches!("A6 B5 C4".parse::<Command>(), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn test_split_chat() {
        assert_eq!(split_chat("room-1: A6 B5", "local"), ("room-1", "A6 B5"));
        assert_eq!(split_chat("plateau", "local"), ("local", "plateau"));
        assert_eq!(split_chat("my room: x", "local"), ("local", "my room: x"));
    }
}
