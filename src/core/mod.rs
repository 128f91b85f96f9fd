//! Core primitives.
//!
//! Leaf types with no knowledge of actors, teams or threads.

pub mod vec2;
pub mod rect;
pub mod rng;
pub mod clock;

// Re-export core types
pub use vec2::Vec2;
pub use rect::Rect;
pub use rng::DeterministicRng;
pub use clock::FrameClock;
