//! Actor Definitions
//!
//! The ball and the field players share one kinematic record. Identity
//! (`id`, `kind`) is fixed at creation; only the kinematic fields move.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;

// =============================================================================
// ACTOR ID
// =============================================================================

/// Index of an actor in the world's ordered actor sequence.
///
/// The ball always has id 0. Field players follow in team order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    /// The ball's fixed slot.
    pub const BALL: ActorId = ActorId(0);

    /// Slot index into the ordered actor sequence.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Check whether this id names the ball.
    #[inline]
    pub fn is_ball(self) -> bool {
        self == Self::BALL
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// SIDE
// =============================================================================

/// One half of the field. Names both the teams and the goals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    /// Left half / left goal (team 0)
    Left = 0,
    /// Right half / right goal (team 1)
    Right = 1,
}

impl Side {
    /// Both sides in team order.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// Team index (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Side from team index.
    pub fn from_index(index: usize) -> Option<Side> {
        match index {
            0 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }
}

// =============================================================================
// COLOR
// =============================================================================

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// =============================================================================
// ACTOR
// =============================================================================

/// What kind of actor this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// The single ball (slot 0)
    Ball,
    /// A team member
    FieldPlayer,
}

/// One simulated body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Fixed identity
    pub id: ActorId,
    /// Ball or field player
    pub kind: ActorKind,
    /// Mass (divides drag)
    pub mass: u32,
    /// Current position
    pub position: Vec2,
    /// Current velocity (units/second)
    pub velocity: Vec2,
    /// Acceleration applied during the last integration step
    pub acceleration: Vec2,
    /// Drawn side length
    pub visual_side: f64,
    /// Drawn color
    pub color: Rgb,
}

impl Actor {
    /// Create the ball at rest.
    pub fn ball(position: Vec2, mass: u32, visual_side: f64, color: Rgb) -> Self {
        Self {
            id: ActorId::BALL,
            kind: ActorKind::Ball,
            mass,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            visual_side,
            color,
        }
    }

    /// Create a field player at rest.
    pub fn field_player(id: ActorId, position: Vec2, mass: u32, visual_side: f64, color: Rgb) -> Self {
        debug_assert!(!id.is_ball(), "slot 0 is reserved for the ball");
        Self {
            id,
            kind: ActorKind::FieldPlayer,
            mass,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            visual_side,
            color,
        }
    }

    /// Check whether this actor is the ball.
    #[inline]
    pub fn is_ball(&self) -> bool {
        self.kind == ActorKind::Ball
    }

    /// Stop all motion and move to `position`.
    pub fn reset_to(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_occupies_slot_zero() {
        let ball = Actor::ball(Vec2::new(1.0, 2.0), 1, 10.0, Rgb::new(255, 255, 255));
        assert_eq!(ball.id, ActorId::BALL);
        assert!(ball.is_ball());
        assert_eq!(ball.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_reset_to_clears_motion() {
        let mut p = Actor::field_player(ActorId(3), Vec2::ZERO, 5, 20.0, Rgb::new(1, 2, 3));
        p.velocity = Vec2::new(4.0, 5.0);
        p.acceleration = Vec2::new(-1.0, 0.0);
        p.reset_to(Vec2::new(9.0, 9.0));
        assert_eq!(p.position, Vec2::new(9.0, 9.0));
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.acceleration, Vec2::ZERO);
        assert!(!p.is_ball());
    }

    #[test]
    fn test_side_index_round_trip() {
        for side in Side::ALL {
            assert_eq!(Side::from_index(side.index()), Some(side));
        }
        assert_eq!(Side::from_index(2), None);
    }
}
