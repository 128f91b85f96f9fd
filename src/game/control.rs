//! Ball Control State Machine
//!
//! Possession, kick wind-up and kick release, evaluated once per tick by the
//! coordinator after the render gate.
//!
//! ```text
//!            Grab (nearest in reach)          WindUp
//!   Free ─────────────────────────▶ Possessed ───────▶ Charging(1)
//!    ▲  ◀──────────────────────────    │                  │  no event: +1 per tick
//!    │   Drop / reflect / out of reach │                  │
//!    └─────────────────────────────────┴──────────────────┘
//!                          Kick (impulse) / Drop / reflect / out of reach
//! ```
//!
//! Possession and kick charge are both read off the one enum, so a charge
//! can never exist without a holder.

use serde::{Serialize, Deserialize};

use crate::config::SimConfig;
use crate::core::vec2::Vec2;
use crate::game::actor::{Actor, ActorId};
use crate::game::events::{GameEventData, LossReason};
use crate::game::input::PointerAction;

/// Who controls the ball.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallControl {
    /// Nobody; the ball moves freely
    #[default]
    Free,
    /// Glued to a field player
    Possessed(ActorId),
    /// Glued to a field player who is winding up a kick
    Charging {
        /// Player holding the ball
        holder: ActorId,
        /// Wind-up strength, at least 1
        charge: u32,
    },
}

impl BallControl {
    /// Player holding the ball, if any.
    #[inline]
    pub fn holder(&self) -> Option<ActorId> {
        match *self {
            BallControl::Free => None,
            BallControl::Possessed(id) | BallControl::Charging { holder: id, .. } => Some(id),
        }
    }

    /// Current kick charge (0 when idle).
    #[inline]
    pub fn charge(&self) -> u32 {
        match *self {
            BallControl::Charging { charge, .. } => charge,
            _ => 0,
        }
    }

    /// Release the ball. Returns the previous holder.
    pub fn clear(&mut self) -> Option<ActorId> {
        let holder = self.holder();
        *self = BallControl::Free;
        holder
    }
}

/// Tuning for the control state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlRules {
    /// Squared distance under which a player may take the ball
    pub catch_radius_sq: f64,
    /// Squared distance beyond which a holder loses the ball
    pub release_radius_sq: f64,
    /// Ball speed per unit of charge
    pub kick_coefficient: f64,
    /// Charge stops growing here
    pub max_charge: u32,
}

impl ControlRules {
    /// Rules from configuration. The release radius is twice the catch radius.
    pub fn from_config(config: &SimConfig) -> Self {
        let catch = config.catch_radius;
        Self {
            catch_radius_sq: catch * catch,
            release_radius_sq: 4.0 * catch * catch,
            kick_coefficient: config.kick_coefficient,
            max_charge: config.max_kick_charge,
        }
    }
}

/// What the control step needs to know about one field player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Player id
    pub id: ActorId,
    /// Position after this tick's worker phase
    pub position: Vec2,
    /// Velocity after this tick's worker phase
    pub velocity: Vec2,
    /// Player bounced off a wall this tick
    pub reflected: bool,
}

/// Closest player to `point` strictly inside `radius_sq`. Ties go to the lower id.
pub fn nearest_within(players: &[PlayerSnapshot], point: Vec2, radius_sq: f64) -> Option<&PlayerSnapshot> {
    players
        .iter()
        .map(|p| (p, p.position.distance_squared(point)))
        .filter(|(_, d)| *d < radius_sq)
        .min_by(|(a, da), (b, db)| da.total_cmp(db).then(a.id.cmp(&b.id)))
        .map(|(p, _)| p)
}

impl BallControl {
    /// Run one tick of the state machine.
    ///
    /// Applies `actions` in arrival order, grows an existing charge, revokes
    /// possession the holder can no longer keep, and glues the ball to a
    /// surviving holder. Kick impulses are written straight into `ball`.
    pub fn resolve(
        &mut self,
        actions: &[PointerAction],
        ball: &mut Actor,
        players: &[PlayerSnapshot],
        pointer: Vec2,
        rules: &ControlRules,
    ) -> Vec<GameEventData> {
        let mut events = Vec::new();
        let mut wound_up = false;

        for action in actions {
            if let Some(event) = self.apply(*action, ball, players, pointer, rules, &mut wound_up) {
                events.push(event);
            }
        }

        // Wind-up grows on every tick after the one it started on
        if let BallControl::Charging { holder, charge } = *self {
            if !wound_up {
                *self = BallControl::Charging {
                    holder,
                    charge: charge.saturating_add(1).min(rules.max_charge),
                };
            }
        }

        if let Some(event) = self.enforce_reach(ball, players, rules) {
            events.push(event);
        }

        if let Some(holder) = self.holder().and_then(|id| players.iter().find(|p| p.id == id)) {
            ball.velocity = holder.velocity;
            ball.acceleration = Vec2::ZERO;
        }

        events
    }

    fn apply(
        &mut self,
        action: PointerAction,
        ball: &mut Actor,
        players: &[PlayerSnapshot],
        pointer: Vec2,
        rules: &ControlRules,
        wound_up: &mut bool,
    ) -> Option<GameEventData> {
        match (*self, action) {
            (BallControl::Free, PointerAction::Grab) => {
                let taker = nearest_within(players, ball.position, rules.catch_radius_sq)?;
                *self = BallControl::Possessed(taker.id);
                Some(GameEventData::PossessionGained { player_id: taker.id })
            }
            (BallControl::Possessed(holder), PointerAction::Drop)
            | (BallControl::Charging { holder, .. }, PointerAction::Drop) => {
                *self = BallControl::Free;
                Some(GameEventData::PossessionLost { player_id: holder, reason: LossReason::Dropped })
            }
            (BallControl::Possessed(holder), PointerAction::WindUp) => {
                *self = BallControl::Charging { holder, charge: 1 };
                *wound_up = true;
                Some(GameEventData::KickCharging { player_id: holder })
            }
            (BallControl::Charging { holder, charge }, PointerAction::Kick) => {
                *self = BallControl::Free;
                Some(kick(ball, holder, charge, pointer, rules))
            }
            // Everything else is meaningless in the current state
            _ => None,
        }
    }

    /// Drop possession the holder cannot keep.
    fn enforce_reach(
        &mut self,
        ball: &Actor,
        players: &[PlayerSnapshot],
        rules: &ControlRules,
    ) -> Option<GameEventData> {
        let holder_id = self.holder()?;
        let reason = match players.iter().find(|p| p.id == holder_id) {
            None => LossReason::OutOfReach,
            Some(holder) if holder.reflected => LossReason::HolderReflected,
            Some(holder) if holder.position.distance_squared(ball.position) > rules.release_radius_sq => {
                LossReason::OutOfReach
            }
            Some(_) => return None,
        };
        self.clear();
        Some(GameEventData::PossessionLost { player_id: holder_id, reason })
    }
}

/// Launch the ball toward the pointer.
///
/// A pointer sitting exactly on the ball gives no direction; the ball keeps
/// its velocity and only possession is released.
fn kick(ball: &mut Actor, holder: ActorId, charge: u32, pointer: Vec2, rules: &ControlRules) -> GameEventData {
    match (pointer - ball.position).normalize() {
        Some(direction) => {
            ball.velocity = direction.scale(charge as f64 * rules.kick_coefficient);
            ball.acceleration = Vec2::ZERO;
            GameEventData::KickReleased {
                player_id: holder,
                charge,
                velocity: ball.velocity,
            }
        }
        None => GameEventData::PossessionLost {
            player_id: holder,
            reason: LossReason::NoKickDirection,
        },
    }
}

// =============================================================================
// GOAL FLAG
// =============================================================================

/// Transient goal celebration, counted in presented frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalFlash {
    frames_left: u32,
}

impl GoalFlash {
    /// Raise the flag for `frames` presented frames.
    pub fn raise(&mut self, frames: u32) {
        self.frames_left = frames;
    }

    /// Check whether the flag is up.
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.frames_left > 0
    }

    /// Frames until the flag drops.
    pub fn frames_left(&self) -> u32 {
        self.frames_left
    }

    /// Count one presented frame.
    pub fn decay(&mut self) {
        self.frames_left = self.frames_left.saturating_sub(1);
    }
}
