//! Game Events
//!
//! Notable state changes produced by the coordinator's ball phase, kept for
//! logging and for the end-of-run report.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::game::actor::{ActorId, Side};

/// Why a holder lost the ball without kicking it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// Primary button released
    Dropped,
    /// Holder bounced off a wall
    HolderReflected,
    /// Ball bounced off a wall
    BallReflected,
    /// Holder moved out of reach
    OutOfReach,
    /// Kick released with no usable direction
    NoKickDirection,
    /// A goal reset the ball
    Goal,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A player took the ball
    PossessionGained {
        player_id: ActorId,
    },

    /// A player lost the ball without kicking it
    PossessionLost {
        player_id: ActorId,
        reason: LossReason,
    },

    /// A player started winding up a kick
    KickCharging {
        player_id: ActorId,
    },

    /// A kick left the holder's foot
    KickReleased {
        player_id: ActorId,
        charge: u32,
        velocity: Vec2,
    },

    /// The ball crossed a goal line inside the goal mouth
    GoalScored {
        side: Side,
        score: (u32, u32),
    },
}

/// A game event stamped with its tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when the event occurred
    pub tick: u64,
    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u64, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Player involved, if any.
    pub fn player_id(&self) -> Option<ActorId> {
        match &self.data {
            GameEventData::PossessionGained { player_id }
            | GameEventData::PossessionLost { player_id, .. }
            | GameEventData::KickCharging { player_id }
            | GameEventData::KickReleased { player_id, .. } => Some(*player_id),
            GameEventData::GoalScored { .. } => None,
        }
    }

    /// Check whether this is a goal.
    pub fn is_goal(&self) -> bool {
        matches!(self.data, GameEventData::GoalScored { .. })
    }
}
