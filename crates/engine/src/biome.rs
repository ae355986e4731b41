//! Biome rotation.

use crate::config::BiomeConfig;
use protocol::BiomeKind;
use rand::Rng;
use tracing::debug;

/// Countdown that rotates fire -> ice -> magnetic -> fire.
#[derive(Debug, Clone)]
pub struct BiomeScheduler {
    current: BiomeKind,
    remaining_ms: i64,
    initial_ms: i64,
    min_ms: i64,
    max_ms: i64,
}

impl BiomeScheduler {
    pub fn new(config: &BiomeConfig) -> Self {
        Self {
            current: BiomeKind::CYCLE[0],
            remaining_ms: config.initial_duration_ms,
            initial_ms: config.initial_duration_ms,
            min_ms: config.min_duration_ms,
            max_ms: config.max_duration_ms,
        }
    }

    /// Back to the first biome with the fixed initial duration.
    pub fn reset(&mut self) {
        self.current = BiomeKind::CYCLE[0];
        self.remaining_ms = self.initial_ms;
    }

    #[inline]
    pub fn current(&self) -> BiomeKind {
        self.current
    }

    #[inline]
    pub fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f64 {
        self.current.speed_multiplier()
    }

    #[inline]
    pub fn score_multiplier(&self) -> f64 {
        self.current.score_multiplier()
    }

    /// Consume `elapsed_ms` of biome time. Returns the new biome when the
    /// countdown ran out; at most one rotation happens per call.
    pub fn advance<R: Rng + ?Sized>(&mut self, elapsed_ms: u64, rng: &mut R) -> Option<BiomeKind> {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms as i64);
        if self.remaining_ms > 0 {
            return None;
        }
        self.current = self.current.next();
        self.remaining_ms = rng.random_range(self.min_ms..self.max_ms);
        debug!("Biome switched to {} for {}ms", self.current, self.remaining_ms);
        Some(self.current)
    }
}
