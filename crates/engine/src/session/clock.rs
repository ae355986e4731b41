//! Fixed-interval driver for a shared [`GameSession`].

use super::GameSession;
use protocol::{GameEvent, SessionSnapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, broadcast, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

/// Control state of a running clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Paused,
    Stopped,
}

/// Published after every tick.
#[derive(Debug, Clone)]
pub struct TickBroadcast {
    pub events: Vec<GameEvent>,
    pub snapshot: SessionSnapshot,
}

pub struct SimulationClock;

impl SimulationClock {
    /// Spawn the tick task. The first tick fires one `interval` from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        session: Arc<RwLock<GameSession>>,
        interval: Duration,
        updates: broadcast::Sender<TickBroadcast>,
    ) -> ClockHandle {
        let (control, control_rx) = watch::channel(ClockState::Running);
        let task = tokio::spawn(run_clock(session, interval, updates, control_rx));
        ClockHandle { control, task }
    }
}

/// Owner's side of a running clock. Dropping it stops the clock.
#[derive(Debug)]
pub struct ClockHandle {
    control: watch::Sender<ClockState>,
    task: JoinHandle<()>,
}

impl ClockHandle {
    pub fn pause(&self) {
        self.transition(ClockState::Paused);
    }

    pub fn resume(&self) {
        self.transition(ClockState::Running);
    }

    /// Stop ticking. Safe to call more than once.
    pub fn stop(&self) {
        self.control.send_replace(ClockState::Stopped);
    }

    pub fn state(&self) -> ClockState {
        *self.control.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the tick task to exit.
    pub async fn join(self) -> Result<(), JoinError> {
        let ClockHandle { control, task } = self;
        let result = task.await;
        drop(control);
        result
    }

    fn transition(&self, next: ClockState) {
        // Stopped is final.
        self.control.send_if_modified(|state| {
            if *state == ClockState::Stopped || *state == next {
                return false;
            }
            *state = next;
            true
        });
    }
}

async fn run_clock(
    session: Arc<RwLock<GameSession>>,
    interval: Duration,
    updates: broadcast::Sender<TickBroadcast>,
    mut control: watch::Receiver<ClockState>,
) {
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    debug!("Clock started at {:?} per tick", interval);
    let mut was_paused = false;

    loop {
        let state = *control.borrow_and_update();
        match state {
            ClockState::Stopped => break,
            ClockState::Paused => {
                if control.changed().await.is_err() {
                    break;
                }
                ticker.reset();
                continue;
            }
            ClockState::Running => {}
        }

        tokio::select! {
            _ = ticker.tick() => {}
            changed = control.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
        }

        let (events, snapshot, finished) = {
            let mut game = session.write().await;
            let events = game.tick();
            (events, game.snapshot(), !game.is_playing())
        };

        // A paused session ticks as a no-op; only publish the tick that
        // changed the pause state or produced events.
        let idle = snapshot.paused && was_paused && events.is_empty();
        was_paused = snapshot.paused;
        if !idle {
            // Err only means nobody is subscribed right now.
            let _ = updates.send(TickBroadcast { events, snapshot });
        }

        if finished {
            info!("Session finished, stopping clock");
            break;
        }
    }

    debug!("Clock stopped");
}
