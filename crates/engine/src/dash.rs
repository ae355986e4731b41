//! Phase dash: a cooldown-gated invulnerability window.
//!
//! While active, wall hits wrap to the opposite edge and obstacle/self
//! collisions are ignored. The cooldown is measured from the moment of
//! activation, not from expiry.

use crate::config::DashConfig;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PhaseDashController {
    cooldown_ms: u64,
    duration_ms: u64,
    /// Session time of the last accepted activation.
    last_used: Option<u64>,
    /// Session time at which the active window closes.
    active_until: Option<u64>,
}

impl PhaseDashController {
    pub fn new(config: &DashConfig) -> Self {
        Self {
            cooldown_ms: config.cooldown_ms,
            duration_ms: config.duration_ms,
            last_used: None,
            active_until: None,
        }
    }

    pub fn reset(&mut self) {
        self.last_used = None;
        self.active_until = None;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active_until.is_some()
    }

    pub fn is_ready(&self, now_ms: u64) -> bool {
        self.last_used
            .is_none_or(|used| now_ms.saturating_sub(used) >= self.cooldown_ms)
    }

    /// Request activation at `now_ms`. Returns false, changing nothing, while
    /// the cooldown is still running.
    pub fn try_activate(&mut self, now_ms: u64) -> bool {
        if !self.is_ready(now_ms) {
            debug!("Phase dash rejected at {}ms (cooling down)", now_ms);
            return false;
        }
        self.last_used = Some(now_ms);
        self.active_until = Some(now_ms + self.duration_ms);
        debug!("Phase dash active until {}ms", now_ms + self.duration_ms);
        true
    }

    /// Close the window once `now_ms` reaches its deadline. Returns true on
    /// the call that deactivates.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        match self.active_until {
            Some(until) if now_ms >= until => {
                self.active_until = None;
                debug!("Phase dash expired at {}ms", now_ms);
                true
            }
            _ => false,
        }
    }

    /// Fraction of the cooldown elapsed, 1.0 when ready.
    pub fn cooldown_progress(&self, now_ms: u64) -> f64 {
        match self.last_used {
            Some(used) if self.cooldown_ms > 0 => {
                (now_ms.saturating_sub(used) as f64 / self.cooldown_ms as f64).min(1.0)
            }
            _ => 1.0,
        }
    }
}
