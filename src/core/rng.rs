//! Spawn RNG
//!
//! Small seeded generator for kickoff layouts. A given seed always yields
//! the same spawn slots on every platform, so runs can be reproduced from
//! the config alone.

use super::rect::Rect;
use super::vec2::Vec2;

/// Seeded xoroshiro128+ generator.
///
/// ```
/// use pitch_sim::core::rect::Rect;
/// use pitch_sim::core::rng::DeterministicRng;
///
/// let area = Rect::new(0.0, 0.0, 100.0, 50.0);
/// let a = DeterministicRng::new(7).spawn_slots(&area, 4);
/// let b = DeterministicRng::new(7).spawn_slots(&area, 4);
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    s0: u64,
    s1: u64,
}

impl DeterministicRng {
    /// Seed the generator. Any seed is fine, zero included.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        let s0 = splitmix64(&mut sm);
        let s1 = splitmix64(&mut sm);
        // An all-zero state would only ever produce zeros
        if s0 | s1 == 0 {
            return Self { s0: 1, s1: 1 };
        }
        Self { s0, s1 }
    }

    /// Next raw 64-bit output.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let (s0, mut s1) = (self.s0, self.s1);
        let out = s0.wrapping_add(s1);
        s1 ^= s0;
        self.s0 = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.s1 = s1.rotate_left(37);
        out
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_unit(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
        (self.next_u64() >> 11) as f64 * SCALE
    }

    /// Uniform in `[min, max)`; `min` when the span is empty.
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            min
        } else {
            min + (max - min) * self.next_unit()
        }
    }

    /// Uniform point in `area` (left/top edges inclusive).
    pub fn random_position(&mut self, area: &Rect) -> Vec2 {
        let x = self.next_range(area.left, area.right);
        let y = self.next_range(area.top, area.bottom);
        Vec2::new(x, y)
    }

    /// `count` independent points in `area`.
    pub fn spawn_slots(&mut self, area: &Rect, count: usize) -> Vec<Vec2> {
        (0..count).map(|_| self.random_position(area)).collect()
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
