//! Reward rules.

/// Regular food: `base × level`.
#[inline]
pub fn food_points(base: u64, level: u32) -> u64 {
    base * u64::from(level)
}

/// Critters and special food: `floor(base × biome multiplier × level)`.
#[inline]
pub fn bonus_points(base: u64, multiplier: f64, level: u32) -> u64 {
    (base as f64 * multiplier * f64::from(level)).floor() as u64
}

/// Whether a post-growth body length earns a level.
#[inline]
pub fn earns_level(length: usize, every: usize) -> bool {
    length % every == 0
}
