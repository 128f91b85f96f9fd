//! Field Geometry
//!
//! Immutable layout derived from configuration at startup.

use serde::{Serialize, Deserialize};

use crate::config::{GoalMouth, SimConfig};
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::actor::Side;

/// Playing field, goal mouths and screen size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldGeometry {
    /// Playing field bounds
    pub bounds: Rect,
    /// Goal opening on both short edges
    pub goal_mouth: GoalMouth,
    /// Screen width
    pub screen_width: f64,
    /// Screen height
    pub screen_height: f64,
}

impl FieldGeometry {
    /// Derive the geometry from a validated config.
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            bounds: config.field,
            goal_mouth: config.goal_mouth,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
        }
    }

    /// Kickoff spot.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Midpoint of the goal mouth on the vertical axis.
    #[inline]
    pub fn goal_mid_y(&self) -> f64 {
        (self.goal_mouth.top + self.goal_mouth.bottom) * 0.5
    }

    /// Half of the field a team spawns in.
    pub fn half(&self, side: Side) -> Rect {
        match side {
            Side::Left => self.bounds.left_half(),
            Side::Right => self.bounds.right_half(),
        }
    }

    /// Which goal, if any, a ball at `position` has entered.
    ///
    /// A goal needs the ball on or past a short edge while its vertical
    /// coordinate lies inside the goal mouth.
    pub fn goal_at(&self, position: Vec2) -> Option<Side> {
        let in_mouth = position.y >= self.goal_mouth.top && position.y <= self.goal_mouth.bottom;
        if !in_mouth {
            return None;
        }
        if position.x <= self.bounds.left {
            Some(Side::Left)
        } else if position.x >= self.bounds.right {
            Some(Side::Right)
        } else {
            None
        }
    }
}
