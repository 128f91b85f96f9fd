//! Physics Integration and Boundary Containment
//!
//! Identical for the ball and the field players; only drag and mass differ.
//! Whichever thread owns an actor is the only caller for that actor.

use crate::config::SimConfig;
use crate::core::rect::Rect;
use crate::game::actor::{Actor, ActorKind};

/// Linear drag coefficients by actor kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragModel {
    /// Drag on the ball
    pub ball: f64,
    /// Drag on field players
    pub player: f64,
}

impl DragModel {
    /// Drag coefficients from configuration.
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            ball: config.ball_drag,
            player: config.player_drag,
        }
    }

    /// Coefficient for one kind of actor.
    #[inline]
    pub fn for_kind(&self, kind: ActorKind) -> f64 {
        match kind {
            ActorKind::Ball => self.ball,
            ActorKind::FieldPlayer => self.player,
        }
    }
}

/// Keep an actor inside `bounds`.
///
/// On each axis, a position at or beyond an edge is clamped one unit inside
/// that edge and the velocity component on that axis is negated. Returns
/// whether any reflection happened.
pub fn contain(actor: &mut Actor, bounds: &Rect) -> bool {
    let mut reflected = false;

    if actor.position.x <= bounds.left {
        actor.position.x = bounds.left + 1.0;
        actor.velocity.x = -actor.velocity.x;
        reflected = true;
    } else if actor.position.x >= bounds.right {
        actor.position.x = bounds.right - 1.0;
        actor.velocity.x = -actor.velocity.x;
        reflected = true;
    }

    if actor.position.y <= bounds.top {
        actor.position.y = bounds.top + 1.0;
        actor.velocity.y = -actor.velocity.y;
        reflected = true;
    } else if actor.position.y >= bounds.bottom {
        actor.position.y = bounds.bottom - 1.0;
        actor.velocity.y = -actor.velocity.y;
        reflected = true;
    }

    reflected
}

/// Advance one actor by `dt` seconds under linear drag.
///
/// `a = -(drag / mass) * v`, then `p += v*dt + a*dt^2/2`, then `v += a*dt`.
pub fn integrate(actor: &mut Actor, drag: f64, dt: f64) {
    let mass = actor.mass.max(1) as f64;
    actor.acceleration = actor.velocity.scale(-drag / mass);
    integrate_with_acceleration(actor, dt);
}

/// Advance one actor by `dt` seconds using its current acceleration as-is.
pub fn integrate_with_acceleration(actor: &mut Actor, dt: f64) {
    let a = actor.acceleration;
    actor.position = actor.position + actor.velocity.scale(dt) + a.scale(0.5 * dt * dt);
    actor.velocity = actor.velocity + a.scale(dt);
}
