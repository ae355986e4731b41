//! Session orchestration: the per-tick update, its state, and the clock that
//! drives it.

mod clock;
mod game;
mod state;

pub use clock::{ClockHandle, ClockState, SimulationClock, TickBroadcast};
pub use game::GameSession;
pub use state::{SimulationState, Status};

use protocol::{GameEvent, Intent, SessionSnapshot};
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// A started session shared with its clock.
#[derive(Debug)]
pub struct SessionHandle {
    session: Arc<RwLock<GameSession>>,
    clock: ClockHandle,
    updates: broadcast::Sender<TickBroadcast>,
}

impl SessionHandle {
    /// Start `session` and begin ticking at its configured speed.
    ///
    /// Returns the events produced while populating the board. Must be called
    /// from within a tokio runtime.
    pub fn launch(mut session: GameSession) -> (Self, Vec<GameEvent>) {
        let opening = session.start();
        let interval = session.tick_interval();
        let session = Arc::new(RwLock::new(session));
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        let clock = SimulationClock::start(session.clone(), interval, updates.clone());
        (
            Self {
                session,
                clock,
                updates,
            },
            opening,
        )
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TickBroadcast> {
        self.updates.subscribe()
    }

    /// Queue an intent for the next tick.
    pub async fn submit(&self, intent: Intent) {
        self.session.write().await.submit(intent);
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.read().await.snapshot()
    }

    /// Pause both the session and its clock. Snapshots report `paused`
    /// right away.
    pub async fn pause(&self) {
        self.session.write().await.set_paused(true);
        self.clock.pause();
    }

    pub async fn resume(&self) {
        self.session.write().await.set_paused(false);
        self.clock.resume();
    }

    pub fn clock(&self) -> &ClockHandle {
        &self.clock
    }

    pub fn session(&self) -> Arc<RwLock<GameSession>> {
        self.session.clone()
    }

    /// Stop the clock and wait for it, then hand back the final snapshot.
    pub async fn shutdown(self) -> SessionSnapshot {
        self.clock.stop();
        if let Err(e) = self.clock.join().await {
            tracing::warn!("Clock task failed: {}", e);
        }
        self.session.read().await.snapshot()
    }
}
