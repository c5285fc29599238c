//! The game session: owns the live [`GameState`], the undo history and the
//! background clock, and serialises every operation behind one lock.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use chess_core::rules::{self, MoveVerdict};
use chess_core::{Color, Coordinates, GameState, MoveHistory, Piece, PieceKind, Time};
use tracing::{debug, info};

use crate::clock;
use crate::error::SessionError;
use crate::persistence::{self, SavedGame};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No board set up yet.
    Idle,
    Active,
    /// A pawn reached the last rank; waiting for the piece choice.
    PromotionPending,
    Ended,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Active => "active",
            SessionPhase::PromotionPending => "waiting for a promotion",
            SessionPhase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Result of [`GameSession::try_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    Accepted,
    Rejected,
    Castling,
    EnPassant,
    /// The move is legal but on hold until [`GameSession::promote`].
    Promotion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PendingPromotion {
    pub(crate) from: Coordinates,
    pub(crate) to: Coordinates,
}

/// Everything guarded by the session lock.
pub(crate) struct Live {
    pub(crate) state: GameState,
    pub(crate) history: MoveHistory,
    pub(crate) phase: SessionPhase,
    pub(crate) pending: Option<PendingPromotion>,
    pub(crate) increment: Time,
    pub(crate) shutdown: bool,
}

impl Live {
    fn idle() -> Self {
        let state = GameState::empty(Time::ZERO);
        Live {
            history: MoveHistory::new(&state),
            state,
            phase: SessionPhase::Idle,
            pending: None,
            increment: Time::ZERO,
            shutdown: false,
        }
    }

    /// Should the clock be running right now?
    pub(crate) fn ticking(&self) -> bool {
        !self.shutdown && self.phase == SessionPhase::Active && !self.state.paused
    }

    fn require(&self, operation: &'static str, allowed: &[SessionPhase]) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }

    /// Replaces the game with `history`, positioned at its newest snapshot.
    fn install(&mut self, history: MoveHistory, increment: Time) {
        self.state = history.peek().clone();
        self.state.paused = true;
        self.history = history;
        self.increment = increment;
        self.pending = None;
        self.phase = SessionPhase::Active;
    }

    /// Pays the increment, records the snapshot and log line.
    fn commit(&mut self, mover: Color, from: Coordinates, to: Coordinates, promotion: Option<PieceKind>) {
        self.state.add_player_time(mover, self.increment);
        self.history.push(&self.state, from, to, promotion);
    }
}

pub(crate) struct Shared {
    pub(crate) live: Mutex<Live>,
    /// Signalled whenever the clock should re-check the live state.
    pub(crate) wake: Condvar,
}

impl Shared {
    pub(crate) fn lock(&self) -> MutexGuard<'_, Live> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

const ACTIVE: &[SessionPhase] = &[SessionPhase::Active];
const IN_GAME: &[SessionPhase] = &[SessionPhase::Active, SessionPhase::PromotionPending];
const PROMOTING: &[SessionPhase] = &[SessionPhase::PromotionPending];
const HAS_GAME: &[SessionPhase] = &[
    SessionPhase::Active,
    SessionPhase::PromotionPending,
    SessionPhase::Ended,
];

/// A two-player game with clocks.
///
/// All methods take `&self`; the session can be shared between threads
/// (e.g. behind an `Arc`). Dropping it stops the clock thread.
pub struct GameSession {
    shared: Arc<Shared>,
    clock: Option<JoinHandle<()>>,
}

impl GameSession {
    /// Creates an idle session and starts its clock thread.
    pub fn new() -> Result<Self, SessionError> {
        let shared = Arc::new(Shared {
            live: Mutex::new(Live::idle()),
            wake: Condvar::new(),
        });
        let clock = clock::spawn(Arc::clone(&shared)).map_err(SessionError::ClockThread)?;
        Ok(GameSession {
            shared,
            clock: Some(clock),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Live> {
        self.shared.lock()
    }

    fn wake_clock(&self) {
        self.shared.wake.notify_all();
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Sets up the standard position with `game_time` on both clocks.
    /// The new game starts paused.
    pub fn new_game(&self, game_time: Time, increment: Time) -> Result<(), SessionError> {
        if !game_time.is_positive() {
            return Err(SessionError::MalformedTime(format!(
                "game time must be positive, got {game_time}"
            )));
        }
        if increment.is_negative() {
            return Err(SessionError::MalformedTime(format!(
                "increment must not be negative, got {increment}"
            )));
        }

        let state = GameState::start_position(game_time);
        self.lock().install(MoveHistory::new(&state), increment);
        self.wake_clock();
        info!(%game_time, %increment, "new game");
        Ok(())
    }

    /// Like [`new_game`](Self::new_game), parsing `[[h:]m:]s` strings.
    pub fn new_game_from_str(&self, game_time: &str, increment: &str) -> Result<(), SessionError> {
        let parse = |s: &str| {
            s.parse::<Time>()
                .map_err(|_| SessionError::MalformedTime(s.to_string()))
        };
        self.new_game(parse(game_time)?, parse(increment)?)
    }

    /// Continues from the newest snapshot of `history`, paused.
    /// The per-move increment is kept.
    pub fn load_game(&self, history: &MoveHistory) {
        let mut live = self.lock();
        let increment = live.increment;
        live.install(history.clone(), increment);
        drop(live);
        self.wake_clock();
        info!(plies = history.plies(), "game loaded");
    }

    /// Starts a fresh game from an arbitrary position.
    pub fn load_position(&self, state: &GameState, increment: Time) {
        self.lock().install(MoveHistory::new(state), increment);
        self.wake_clock();
        info!("position loaded");
    }

    pub fn start_or_resume(&self) -> Result<(), SessionError> {
        self.pause(false)
    }

    pub fn pause(&self, paused: bool) -> Result<(), SessionError> {
        let mut live = self.lock();
        live.require(if paused { "pause" } else { "resume" }, IN_GAME)?;
        live.state.paused = paused;
        drop(live);
        self.wake_clock();
        debug!(paused, "pause toggled");
        Ok(())
    }

    /// Stops the clocks and clears the board. The history is kept.
    pub fn end_game(&self) -> Result<(), SessionError> {
        let mut live = self.lock();
        live.require("end the game", IN_GAME)?;
        live.state.paused = true;
        live.state.clear_board();
        live.pending = None;
        live.phase = SessionPhase::Ended;
        let plies = live.history.plies();
        drop(live);
        self.wake_clock();
        info!(plies, "game ended");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Moves
    // ---------------------------------------------------------------------

    /// Proposes a move for the side to move.
    ///
    /// Moves are accepted while paused. A `Promotion` outcome leaves the
    /// board untouched until [`promote`](Self::promote) is called.
    pub fn try_move(&self, from: Coordinates, to: Coordinates) -> Result<MoveOutcome, SessionError> {
        let mut guard = self.lock();
        guard.require("move", ACTIVE)?;
        let live = &mut *guard;

        let verdict = rules::evaluate_move(&mut live.state, from, to);
        let outcome = match verdict {
            MoveVerdict::Illegal => {
                debug!(%from, %to, "move rejected");
                return Ok(MoveOutcome::Rejected);
            }
            MoveVerdict::Promotion => {
                live.pending = Some(PendingPromotion { from, to });
                live.phase = SessionPhase::PromotionPending;
                drop(guard);
                self.wake_clock();
                debug!(%from, %to, "promotion pending");
                return Ok(MoveOutcome::Promotion);
            }
            MoveVerdict::Legal => MoveOutcome::Accepted,
            MoveVerdict::Castling => MoveOutcome::Castling,
            MoveVerdict::EnPassant => MoveOutcome::EnPassant,
        };

        let mover = live.state.whose_move;
        rules::apply_move(&mut live.state, from, to, verdict, None);
        live.commit(mover, from, to, None);
        drop(guard);
        self.wake_clock();
        debug!(%from, %to, ?outcome, %mover, "move played");
        Ok(outcome)
    }

    /// Completes a pending promotion with the chosen piece.
    pub fn promote(&self, kind: PieceKind) -> Result<(), SessionError> {
        let mut guard = self.lock();
        guard.require("promote", PROMOTING)?;
        if !kind.is_promotion_choice() {
            return Err(SessionError::InvalidPromotion(kind));
        }
        let live = &mut *guard;
        let Some(PendingPromotion { from, to }) = live.pending.take() else {
            // Phase and pending record are always set together.
            live.phase = SessionPhase::Active;
            return Err(SessionError::InvalidState {
                operation: "promote",
                phase: SessionPhase::Active,
            });
        };

        let mover = live.state.whose_move;
        rules::apply_move(&mut live.state, from, to, MoveVerdict::Promotion, Some(kind));
        live.commit(mover, from, to, Some(kind));
        live.phase = SessionPhase::Active;
        drop(guard);
        self.wake_clock();
        debug!(%from, %to, %kind, "promotion played");
        Ok(())
    }

    /// Takes back the last ply and drops any pending promotion.
    ///
    /// While a promotion is pending, one call both cancels the pending pawn
    /// move and takes back the ply before it. The pause flag is not rolled
    /// back with the position.
    pub fn revert_move(&self) -> Result<(), SessionError> {
        let mut guard = self.lock();
        guard.require("undo", IN_GAME)?;
        let live = &mut *guard;

        let paused = live.state.paused;
        match live.history.pop() {
            Some(previous) => live.state = previous.clone(),
            None => return Err(SessionError::HistoryExhausted),
        }
        live.state.paused = paused;
        live.pending = None;
        live.phase = SessionPhase::Active;
        let plies = live.history.plies();
        drop(guard);
        self.wake_clock();
        debug!(plies, "move reverted");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let saved = {
            let live = self.lock();
            live.require("save", HAS_GAME)?;
            SavedGame::new(live.history.clone(), live.increment)
        };
        persistence::save_game(path, &saved)?;
        info!(path = %path.display(), plies = saved.history.plies(), "game saved");
        Ok(())
    }

    pub fn load_from(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let saved = persistence::load_saved_game(path)?;
        self.lock().install(saved.history, saved.increment);
        self.wake_clock();
        info!(path = %path.display(), saved_at = %saved.saved_at, "game loaded");
        Ok(())
    }

    /// Writes the move log, one line per ply.
    pub fn export_log(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let log = self.move_log();
        persistence::export_move_log(path, &log)?;
        info!(path = %path.display(), lines = log.len(), "move log exported");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn phase(&self) -> SessionPhase {
        self.lock().phase
    }

    pub fn piece_at(&self, at: Coordinates) -> Option<Piece> {
        self.lock().state.piece_at(at)
    }

    pub fn whose_move(&self) -> Color {
        self.lock().state.whose_move
    }

    pub fn player_time(&self, color: Color) -> Time {
        self.lock().state.player_time(color)
    }

    pub fn is_paused(&self) -> bool {
        self.lock().state.paused
    }

    pub fn increment(&self) -> Time {
        self.lock().increment
    }

    /// Source and destination of the move waiting for a promotion choice.
    pub fn pending_promotion(&self) -> Option<(Coordinates, Coordinates)> {
        self.lock().pending.map(|p| (p.from, p.to))
    }

    pub fn move_log(&self) -> Vec<String> {
        self.lock().history.move_log().to_vec()
    }

    pub fn move_history(&self) -> MoveHistory {
        self.lock().history.clone()
    }

    /// Copy of the live state.
    pub fn snapshot(&self) -> GameState {
        self.lock().state.clone()
    }

    /// Squares the piece on `from` may legally move to. Empty unless the
    /// session accepts moves.
    pub fn legal_destinations(&self, from: Coordinates) -> Vec<Coordinates> {
        let mut live = self.lock();
        if live.phase != SessionPhase::Active {
            return Vec::new();
        }
        let mut out = Vec::new();
        rules::legal_destinations_into(&mut live.state, from, &mut out);
        out.into_iter().map(|(to, _)| to).collect()
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.lock().shutdown = true;
        self.wake_clock();
        if let Some(handle) = self.clock.take() {
            // A panicked clock thread has nothing left to clean up.
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
