//! Parsing of console input lines.

use std::path::PathBuf;

use chess_core::{ChessError, Coordinates, PieceKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `new [time] [increment]`; missing values come from the config.
    New {
        game_time: Option<String>,
        increment: Option<String>,
    },
    Start,
    Pause,
    Resume,
    Move {
        from: Coordinates,
        to: Coordinates,
    },
    Promote(PieceKind),
    Undo,
    Board,
    Time,
    Log,
    Save(PathBuf),
    Load(PathBuf),
    SaveLog(Option<PathBuf>),
    Fen(String),
    End,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Square(#[from] ChessError),

    #[error("'{0}' is not a promotion piece, use q, r, b or n")]
    Piece(String),
}

pub const HELP: &str = "\
commands:
  new [time] [inc]   start a new game, times as [[h:]m:]s
  start | resume     run the clock
  pause              stop the clock
  move e2e4 | e2e4   play a move (also 'move e2 e4')
  promote q|r|b|n    finish a pending promotion
  undo               take back the last move
  board | time | log show the position, clocks or move log
  save <file>        save the game as JSON
  load <file>        load a saved game
  savelog [file]     write the move log
  fen <fen>          set up a position
  end                end the game
  quit";

/// Parses one input line. Blank lines give `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = parts.split_first() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "new" => Command::New {
            game_time: args.first().map(|s| s.to_string()),
            increment: args.get(1).map(|s| s.to_string()),
        },
        "start" => Command::Start,
        "pause" => Command::Pause,
        "resume" => Command::Resume,
        "move" | "m" => {
            if args.is_empty() {
                return Err(ParseError::MissingArgument("move"));
            }
            parse_move(&args.concat())?
        }
        "promote" | "p" => {
            let arg = args.first().ok_or(ParseError::MissingArgument("promote"))?;
            Command::Promote(parse_piece(arg)?)
        }
        "undo" | "u" => Command::Undo,
        "board" | "b" => Command::Board,
        "time" | "t" => Command::Time,
        "log" => Command::Log,
        "save" => Command::Save(path_arg(args, "save")?),
        "load" => Command::Load(path_arg(args, "load")?),
        "savelog" => Command::SaveLog(args.first().map(PathBuf::from)),
        "fen" => {
            if args.is_empty() {
                return Err(ParseError::MissingArgument("fen"));
            }
            Command::Fen(args.join(" "))
        }
        "end" => Command::End,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other if other.len() == 4 && args.is_empty() => {
            parse_move(other).map_err(|_| ParseError::Unknown(head.to_string()))?
        }
        _ => return Err(ParseError::Unknown(head.to_string())),
    };
    Ok(Some(command))
}

/// `e2e4` or `e2-e4`.
fn parse_move(text: &str) -> Result<Command, ParseError> {
    let text: String = text.chars().filter(|c| *c != '-').collect();
    if text.len() != 4 || !text.is_ascii() {
        return Err(ChessError::InvalidSquare(text).into());
    }
    let (from, to) = text.split_at(2);
    Ok(Command::Move {
        from: from.parse()?,
        to: to.parse()?,
    })
}

fn parse_piece(arg: &str) -> Result<PieceKind, ParseError> {
    let mut chars = arg.chars();
    match (chars.next().and_then(PieceKind::from_letter), chars.next()) {
        (Some(kind), None) if kind.is_promotion_choice() => Ok(kind),
        _ => {
            let by_name = PieceKind::PROMOTIONS
                .into_iter()
                .find(|k| k.log_name().eq_ignore_ascii_case(arg));
            by_name.ok_or_else(|| ParseError::Piece(arg.to_string()))
        }
    }
}

fn path_arg(args: &[&str], command: &'static str) -> Result<PathBuf, ParseError> {
    args.first()
        .map(PathBuf::from)
        .ok_or(ParseError::MissingArgument(command))
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
