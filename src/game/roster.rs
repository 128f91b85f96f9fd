//! Team Rosters
//!
//! A roster is one team's contiguous slice of the actor sequence plus the
//! bookkeeping its controller produces each tick. The coordinator keeps an
//! `Arc` to every roster; each team controller gets a [`TeamHandle`] to
//! exactly one.
//!
//! The `RwLock` around [`Squad`] is never contended when the barrier
//! protocol is followed: the controller writes only between the compute and
//! render gates, the coordinator touches it only outside them. It exists so
//! the ownership split is checked by the compiler instead of by convention.

use std::ops::Range;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::actor::{Actor, ActorId, Side};
use crate::game::control::PlayerSnapshot;
use crate::game::physics;

/// One team's actors and per-tick bookkeeping.
#[derive(Debug)]
pub struct Squad {
    /// Field players, in id order
    actors: Vec<Actor>,
    /// Velocity delta to add to every member on the next step
    impulse: Vec2,
    /// Which members bounced off a wall on the last step
    reflected: Vec<bool>,
    /// How many steps each member has received
    updates: Vec<u64>,
}

impl Squad {
    fn new(actors: Vec<Actor>) -> Self {
        let n = actors.len();
        Self {
            actors,
            impulse: Vec2::ZERO,
            reflected: vec![false; n],
            updates: vec![0; n],
        }
    }

    /// Members in id order.
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Per-member step counters, in id order.
    pub fn update_counts(&self) -> &[u64] {
        &self.updates
    }

    /// Per-member "bounced on the last step" flags, in id order.
    pub fn reflected(&self) -> &[bool] {
        &self.reflected
    }

    /// Advance every member by one tick.
    ///
    /// Order per member: pending steering impulse, boundary containment,
    /// drag integration, then `submit` (the draw hook).
    pub fn step<F>(&mut self, bounds: &Rect, drag: f64, dt: f64, mut submit: F)
    where
        F: FnMut(&Actor),
    {
        let impulse = std::mem::take(&mut self.impulse);
        for ((actor, reflected), updates) in self
            .actors
            .iter_mut()
            .zip(self.reflected.iter_mut())
            .zip(self.updates.iter_mut())
        {
            actor.velocity += impulse;
            *reflected = physics::contain(actor, bounds);
            physics::integrate(actor, drag, dt);
            *updates += 1;
            submit(actor);
        }
    }
}

/// One team's slice of the world.
#[derive(Debug)]
pub struct TeamRoster {
    side: Side,
    first_id: ActorId,
    len: u32,
    squad: RwLock<Squad>,
}

impl TeamRoster {
    /// Build a roster. `actors` must carry consecutive ids starting at `first_id`.
    pub fn new(side: Side, first_id: ActorId, actors: Vec<Actor>) -> Self {
        debug_assert!(actors
            .iter()
            .enumerate()
            .all(|(i, a)| a.id.0 == first_id.0 + i as u32 && !a.is_ball()));
        Self {
            side,
            first_id,
            len: actors.len() as u32,
            squad: RwLock::new(Squad::new(actors)),
        }
    }

    /// Team this roster belongs to.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Ids owned by this team.
    pub fn ids(&self) -> Range<u32> {
        self.first_id.0..self.first_id.0 + self.len
    }

    /// Check whether this team owns `id`.
    pub fn owns(&self, id: ActorId) -> bool {
        self.ids().contains(&id.0)
    }

    /// Shared view of the squad (coordinator phase only).
    pub fn read(&self) -> RwLockReadGuard<'_, Squad> {
        self.squad.read()
    }

    /// Queue a velocity delta for every member (before the compute gate).
    pub fn set_impulse(&self, impulse: Vec2) {
        self.squad.write().impulse = impulse;
    }

    /// What the ball-control step needs to see about each member.
    pub fn snapshots(&self) -> Vec<PlayerSnapshot> {
        let squad = self.squad.read();
        squad
            .actors
            .iter()
            .zip(squad.reflected.iter())
            .map(|(a, reflected)| PlayerSnapshot {
                id: a.id,
                position: a.position,
                velocity: a.velocity,
                reflected: *reflected,
            })
            .collect()
    }

    /// Copy of one member, if this team owns `id`.
    pub fn actor(&self, id: ActorId) -> Option<Actor> {
        let index = id.0.checked_sub(self.first_id.0)? as usize;
        self.squad.read().actors.get(index).cloned()
    }

    /// Move one member to `position` at rest.
    #[cfg(test)]
    pub(crate) fn place(&self, id: ActorId, position: Vec2) {
        let index = (id.0 - self.first_id.0) as usize;
        self.squad.write().actors[index].reset_to(position);
    }
}

/// Write access to exactly one team, handed to that team's controller.
#[derive(Debug, Clone)]
pub struct TeamHandle {
    roster: Arc<TeamRoster>,
}

impl TeamHandle {
    pub(crate) fn new(roster: Arc<TeamRoster>) -> Self {
        Self { roster }
    }

    /// Team this handle controls.
    pub fn side(&self) -> Side {
        self.roster.side
    }

    /// Advance every owned actor by one tick (worker phase only).
    pub fn step<F>(&self, bounds: &Rect, drag: f64, dt: f64, submit: F)
    where
        F: FnMut(&Actor),
    {
        self.roster.squad.write().step(bounds, drag, dt, submit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::actor::Rgb;

    const FIELD: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    fn roster() -> TeamRoster {
        let actors = (0..3)
            .map(|i| {
                Actor::field_player(
                    ActorId(4 + i),
                    Vec2::new(10.0 + 10.0 * i as f64, 50.0),
                    5,
                    20.0,
                    Rgb::new(0, 0, 255),
                )
            })
            .collect();
        TeamRoster::new(Side::Right, ActorId(4), actors)
    }

    #[test]
    fn test_ids_and_ownership() {
        let r = roster();
        assert_eq!(r.ids(), 4..7);
        assert!(r.owns(ActorId(6)));
        assert!(!r.owns(ActorId(3)));
        assert!(!r.owns(ActorId::BALL));
        assert_eq!(r.actor(ActorId(5)).map(|a| a.id), Some(ActorId(5)));
        assert!(r.actor(ActorId(2)).is_none());
    }

    #[test]
    fn test_step_applies_impulse_once() {
        let r = Arc::new(roster());
        let handle = TeamHandle::new(r.clone());
        r.set_impulse(Vec2::new(30.0, 0.0));

        let mut drawn = Vec::new();
        handle.step(&FIELD, 0.0, 0.1, |a| drawn.push(a.id));
        assert_eq!(drawn, vec![ActorId(4), ActorId(5), ActorId(6)]);
        for a in r.read().actors() {
            assert_eq!(a.velocity, Vec2::new(30.0, 0.0));
        }

        // Impulse was consumed
        handle.step(&FIELD, 0.0, 0.1, |_| {});
        for a in r.read().actors() {
            assert_eq!(a.velocity, Vec2::new(30.0, 0.0));
        }
        assert_eq!(r.read().update_counts(), &[2, 2, 2]);
    }

    #[test]
    fn test_step_records_reflections() {
        let r = Arc::new(roster());
        let handle = TeamHandle::new(r.clone());
        r.set_impulse(Vec2::new(-200.0, 0.0));

        // One second at -200/s carries every member past the left wall
        handle.step(&FIELD, 0.0, 1.0, |_| {});
        handle.step(&FIELD, 0.0, 0.0, |_| {});

        let snapshots = r.snapshots();
        assert!(snapshots.iter().all(|p| p.reflected));
        assert!(snapshots.iter().all(|p| p.velocity.x > 0.0));
    }
}
