//! Background clock: takes one [`Time::PRECISION`] tick off the side to
//! move for every full quantum the session spends running.

use std::io;
use std::sync::{Arc, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use chess_core::Time;
use tracing::trace;

use crate::session::{Live, Shared};

pub(crate) fn spawn(shared: Arc<Shared>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("chess-clock".to_string())
        .spawn(move || run(&shared))
}

fn run(shared: &Shared) {
    let quantum = Time::precision_duration();
    let mut live = shared.lock();
    // End of the quantum being timed, if the clock is running.
    let mut deadline: Option<Instant> = None;

    while !live.shutdown {
        if !live.ticking() {
            deadline = None;
            live = wait(shared, live);
            trace!("clock woke");
            continue;
        }

        let now = Instant::now();
        let due = *deadline.get_or_insert(now + quantum);
        if now >= due {
            live.state.decrement_current_player_time();
            deadline = Some(due + quantum);
            continue;
        }

        live = match shared.wake.wait_timeout(live, due - now) {
            Ok((guard, _)) => guard,
            Err(poisoned) => poisoned.into_inner().0,
        };
    }
    trace!("clock stopped");
}

fn wait<'a>(shared: &'a Shared, live: MutexGuard<'a, Live>) -> MutexGuard<'a, Live> {
    shared.wake.wait(live).unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;
