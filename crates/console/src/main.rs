mod commands;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context};
use chess_core::{Color, GameState};
use chess_session::{GameSession, MoveOutcome, SessionConfig, SessionPhase};
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, HELP};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    // Optional path to a TOML config as the only argument.
    let config = match env::args().nth(1) {
        Some(path) => SessionConfig::load(Path::new(&path))
            .with_context(|| format!("failed to load config from {path}"))?,
        None => SessionConfig::default(),
    };

    let session = GameSession::new()?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "chess console, type 'help' for commands")?;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "error: {e}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(e) = execute(&session, &config, command, &mut stdout) {
            writeln!(stdout, "error: {e:#}")?;
        }
        stdout.flush()?;
    }
    Ok(())
}

fn execute(session: &GameSession, config: &SessionConfig, command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::New { game_time, increment } => {
            let game_time = game_time.unwrap_or_else(|| config.game_time.to_string());
            let increment = increment.unwrap_or_else(|| config.increment.to_string());
            session.new_game_from_str(&game_time, &increment)?;
            print_board(session, out)?;
        }
        Command::Start | Command::Resume => session.start_or_resume()?,
        Command::Pause => session.pause(true)?,
        Command::Move { from, to } => {
            let reply = match session.try_move(from, to)? {
                MoveOutcome::Rejected => "illegal move",
                MoveOutcome::Accepted => "ok",
                MoveOutcome::Castling => "castled",
                MoveOutcome::EnPassant => "en passant",
                MoveOutcome::Promotion => "choose a piece: promote q|r|b|n",
            };
            writeln!(out, "{reply}")?;
        }
        Command::Promote(kind) => {
            session.promote(kind)?;
            writeln!(out, "promoted to {kind}")?;
        }
        Command::Undo => {
            session.revert_move()?;
            print_board(session, out)?;
        }
        Command::Board => print_board(session, out)?,
        Command::Time => {
            writeln!(
                out,
                "White {}  Black {}{}",
                session.player_time(Color::White),
                session.player_time(Color::Black),
                if session.is_paused() { "  (paused)" } else { "" }
            )?;
        }
        Command::Log => {
            for (i, line) in session.move_log().iter().enumerate() {
                writeln!(out, "{:>3}. {line}", i + 1)?;
            }
        }
        Command::Save(path) => {
            session.save_to(&path)?;
            writeln!(out, "saved to {}", path.display())?;
        }
        Command::Load(path) => {
            session.load_from(&path)?;
            print_board(session, out)?;
        }
        Command::SaveLog(path) => {
            let Some(path) = path.or_else(|| config.log_file.clone()) else {
                bail!("no log file given and none configured");
            };
            session.export_log(&path)?;
            writeln!(out, "log written to {}", path.display())?;
        }
        Command::Fen(fen) => {
            let mut state = GameState::from_fen(&fen)?;
            state.set_time_for_players(config.game_time);
            session.load_position(&state, config.increment);
            print_board(session, out)?;
        }
        Command::End => {
            session.end_game()?;
            writeln!(out, "game over")?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

fn print_board(session: &GameSession, out: &mut impl Write) -> io::Result<()> {
    let state = session.snapshot();
    writeln!(out, "{}", state.board)?;
    match session.phase() {
        SessionPhase::PromotionPending => writeln!(out, "{} to promote", state.whose_move),
        SessionPhase::Active => writeln!(out, "{} to move", state.whose_move),
        phase => writeln!(out, "session {phase}"),
    }
}
