//! World State
//!
//! The coordinator-owned half of the shared world: the ball, ball control,
//! score, goal flag and pending events, plus an `Arc` to every team roster.
//! Field players live in the rosters so that each team controller can own
//! its slice outright (see [`crate::game::roster`]).

use std::sync::Arc;

use crate::config::{SimConfig, TEAM_COUNT};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::game::actor::{Actor, ActorId, Side};
use crate::game::control::{BallControl, ControlRules, GoalFlash, PlayerSnapshot};
use crate::game::events::{GameEvent, GameEventData, LossReason};
use crate::game::field::FieldGeometry;
use crate::game::input::PointerAction;
use crate::game::physics::{self, DragModel};
use crate::game::roster::{TeamHandle, TeamRoster};

/// Complete simulation world.
#[derive(Debug)]
pub struct World {
    /// Current tick (advanced by the coordinator)
    tick: u64,
    /// Immutable layout
    geometry: FieldGeometry,
    /// Slot 0, owned by the coordinator
    ball: Actor,
    /// One roster per team, left first
    rosters: Vec<Arc<TeamRoster>>,
    /// Players per team (fixed at startup)
    players_per_team: usize,
    /// Possession / kick state
    control: BallControl,
    /// Goals scored on the (left, right) goal
    score: (u32, u32),
    /// Transient goal celebration
    goal_flash: GoalFlash,
    /// Events generated since the last take
    pending_events: Vec<GameEvent>,
}

impl World {
    /// Create the world for a validated config.
    ///
    /// The ball starts at rest on the center spot; each team's players start
    /// at rest on seeded random slots in their own half.
    pub fn new(config: &SimConfig) -> Self {
        let geometry = FieldGeometry::from_config(config);
        let mut rng = DeterministicRng::new(config.seed);
        let per_team = config.players_per_team;

        let ball = Actor::ball(geometry.center(), config.ball_mass, config.ball_side, config.ball_color);

        let rosters = Side::ALL
            .iter()
            .map(|&side| {
                let first_id = ActorId(1 + (side.index() * per_team) as u32);
                let area = geometry.half(side).inset(config.player_side);
                let actors = rng
                    .spawn_slots(&area, per_team)
                    .into_iter()
                    .enumerate()
                    .map(|(i, slot)| {
                        Actor::field_player(
                            ActorId(first_id.0 + i as u32),
                            slot,
                            config.player_mass,
                            config.player_side,
                            config.team_colors[side.index()],
                        )
                    })
                    .collect();
                Arc::new(TeamRoster::new(side, first_id, actors))
            })
            .collect();

        Self {
            tick: 0,
            geometry,
            ball,
            rosters,
            players_per_team: per_team,
            control: BallControl::Free,
            score: (0, 0),
            goal_flash: GoalFlash::default(),
            pending_events: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Move to the next tick.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// Field layout.
    pub fn geometry(&self) -> &FieldGeometry {
        &self.geometry
    }

    /// The ball.
    pub fn ball(&self) -> &Actor {
        &self.ball
    }

    /// The ball, mutably (coordinator only).
    pub fn ball_mut(&mut self) -> &mut Actor {
        &mut self.ball
    }

    /// Possession / kick state.
    pub fn control(&self) -> BallControl {
        self.control
    }

    /// Replace the possession / kick state.
    pub fn set_control(&mut self, control: BallControl) {
        self.control = control;
    }

    /// Field player holding the ball, if any.
    pub fn possession(&self) -> Option<ActorId> {
        self.control.holder()
    }

    /// Current kick charge (0 = idle).
    pub fn kick_charge(&self) -> u32 {
        self.control.charge()
    }

    /// Goals scored on the (left, right) goal.
    pub fn score(&self) -> (u32, u32) {
        self.score
    }

    /// Goal celebration state.
    pub fn goal_flash(&self) -> GoalFlash {
        self.goal_flash
    }

    /// Total actor count (ball included).
    pub fn actor_count(&self) -> usize {
        1 + TEAM_COUNT * self.players_per_team
    }

    /// Roster for one team.
    pub fn roster(&self, side: Side) -> &Arc<TeamRoster> {
        &self.rosters[side.index()]
    }

    /// Write handle for the controller of `side`.
    pub fn team_handle(&self, side: Side) -> TeamHandle {
        TeamHandle::new(self.roster(side).clone())
    }

    /// Team owning `id`. `None` for the ball or an unknown id.
    pub fn team_of(&self, id: ActorId) -> Option<Side> {
        if id.is_ball() {
            return None;
        }
        let index = (id.index() - 1) / self.players_per_team;
        Side::from_index(index)
    }

    /// Copy of any actor by id.
    pub fn actor(&self, id: ActorId) -> Option<Actor> {
        if id.is_ball() {
            return Some(self.ball.clone());
        }
        self.roster(self.team_of(id)?).actor(id)
    }

    /// Snapshot of the whole actor sequence in id order (ball first).
    pub fn actors(&self) -> Vec<Actor> {
        let mut all = Vec::with_capacity(self.actor_count());
        all.push(self.ball.clone());
        for roster in &self.rosters {
            all.extend_from_slice(roster.read().actors());
        }
        all
    }

    /// Step counters for every field player, in id order.
    pub fn update_counts(&self) -> Vec<u64> {
        self.rosters
            .iter()
            .flat_map(|r| r.read().update_counts().to_vec())
            .collect()
    }

    /// Snapshot every field player for the ball-control step.
    pub fn snapshots(&self) -> Vec<PlayerSnapshot> {
        self.rosters.iter().flat_map(|r| r.snapshots()).collect()
    }

    // =========================================================================
    // Coordinator phases
    // =========================================================================

    /// Queue one tick of steering for both teams (before the compute gate).
    pub fn publish_steering(&self, steering: &[Vec2; TEAM_COUNT], impulse: f64) {
        for (roster, direction) in self.rosters.iter().zip(steering.iter()) {
            roster.set_impulse(direction.scale(impulse));
        }
    }

    /// Score a goal if the ball is in one.
    ///
    /// On a goal: the matching side's score goes up by one, the ball returns
    /// to the center spot at rest, control is cleared and the goal flag is
    /// raised for `flash_frames` presented frames.
    pub fn check_goal(&mut self, flash_frames: u32) -> Option<Side> {
        let side = self.geometry.goal_at(self.ball.position)?;

        match side {
            Side::Left => self.score.0 += 1,
            Side::Right => self.score.1 += 1,
        }

        if let Some(holder) = self.control.clear() {
            self.push_event(GameEventData::PossessionLost {
                player_id: holder,
                reason: LossReason::Goal,
            });
        }
        self.ball.reset_to(self.geometry.center());
        self.goal_flash.raise(flash_frames);
        self.push_event(GameEventData::GoalScored { side, score: self.score });

        Some(side)
    }

    /// The coordinator's whole ball phase for one tick (after the render gate).
    ///
    /// Ball control, goal check, ball containment (a wall bounce ends
    /// possession), then integration: glued to the holder or under drag.
    pub fn resolve_ball(
        &mut self,
        actions: &[PointerAction],
        pointer: Vec2,
        rules: &ControlRules,
        drag: &DragModel,
        dt: f64,
        flash_frames: u32,
    ) {
        let players = self.snapshots();
        let events = self.control.resolve(actions, &mut self.ball, &players, pointer, rules);
        for event in events {
            self.push_event(event);
        }

        self.check_goal(flash_frames);

        let reflected = physics::contain(&mut self.ball, &self.geometry.bounds);
        if reflected {
            if let Some(holder) = self.control.clear() {
                self.push_event(GameEventData::PossessionLost {
                    player_id: holder,
                    reason: LossReason::BallReflected,
                });
            }
        }

        if self.control.holder().is_some() {
            physics::integrate_with_acceleration(&mut self.ball, dt);
        } else {
            let coeff = drag.for_kind(self.ball.kind);
            physics::integrate(&mut self.ball, coeff, dt);
        }
    }

    /// Count one presented frame against the goal flag.
    pub fn decay_goal_flash(&mut self) {
        self.goal_flash.decay();
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn push_event(&mut self, data: GameEventData) {
        self.pending_events.push(GameEvent::new(self.tick, data));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::actor::ActorKind;

    fn config() -> SimConfig {
        SimConfig { players_per_team: 3, ..SimConfig::default() }
    }

    fn rules(config: &SimConfig) -> ControlRules {
        ControlRules::from_config(config)
    }

    #[test]
    fn test_world_layout() {
        let config = config();
        let world = World::new(&config);
        let actors = world.actors();

        assert_eq!(actors.len(), 7);
        assert_eq!(actors[0].kind, ActorKind::Ball);
        assert_eq!(actors[0].position, world.geometry().center());
        assert_eq!(actors[0].velocity, Vec2::ZERO);

        for (i, actor) in actors.iter().enumerate() {
            assert_eq!(actor.id, ActorId(i as u32));
        }
        for actor in &actors[1..] {
            assert_eq!(actor.kind, ActorKind::FieldPlayer);
            let side = world.team_of(actor.id).unwrap();
            let half = world.geometry().half(side);
            assert!(half.contains_strict(actor.position), "{:?} outside its half", actor.id);
            assert_eq!(actor.color, config.team_colors[side.index()]);
        }

        assert_eq!(world.team_of(ActorId(3)), Some(Side::Left));
        assert_eq!(world.team_of(ActorId(4)), Some(Side::Right));
        assert_eq!(world.team_of(ActorId::BALL), None);
        assert_eq!(world.team_of(ActorId(99)), None);
        assert!(world.actor(ActorId(99)).is_none());
    }

    #[test]
    fn test_spawn_is_seeded() {
        let a = World::new(&config()).actors();
        let b = World::new(&config()).actors();
        assert_eq!(a, b);

        let c = World::new(&SimConfig { seed: 1, ..config() }).actors();
        assert_ne!(a, c);
    }

    #[test]
    fn test_goal_scenario() {
        let config = config();
        let mut world = World::new(&config);
        let g = *world.geometry();
        world.set_control(BallControl::Charging { holder: ActorId(2), charge: 4 });
        world.ball_mut().position = Vec2::new(g.bounds.left - 1.0, g.goal_mid_y());
        world.ball_mut().velocity = Vec2::new(-30.0, 0.0);

        assert_eq!(world.check_goal(config.goal_flash_frames), Some(Side::Left));

        assert_eq!(world.score(), (1, 0));
        assert_eq!(world.ball().position, g.center());
        assert_eq!(world.ball().velocity, Vec2::ZERO);
        assert_eq!(world.possession(), None);
        assert_eq!(world.kick_charge(), 0);
        assert!(world.goal_flash().is_raised());

        let events = world.take_events();
        assert!(events.iter().any(|e| e.is_goal()));
    }

    #[test]
    fn test_goal_through_ball_phase() {
        let config = config();
        let mut world = World::new(&config);
        let g = *world.geometry();
        world.ball_mut().position = Vec2::new(g.bounds.right + 2.0, g.goal_mid_y());

        world.resolve_ball(&[], Vec2::ZERO, &rules(&config), &DragModel::from_config(&config), 1.0 / 60.0, 3);

        assert_eq!(world.score(), (0, 1));
        assert_eq!(world.ball().position, g.center());
        assert_eq!(world.ball().velocity, Vec2::ZERO);

        // Flag decays after the configured number of presented frames
        for _ in 0..3 {
            assert!(world.goal_flash().is_raised());
            world.decay_goal_flash();
        }
        assert!(!world.goal_flash().is_raised());
    }

    #[test]
    fn test_ball_bounce_ends_possession() {
        let config = config();
        let mut world = World::new(&config);
        let g = *world.geometry();

        // Holder stands just inside the left wall, well above the goal mouth,
        // with the ball a few units past the wall in reach.
        let holder = world.snapshots()[0].id;
        let y = g.bounds.top + 20.0;
        world.roster(Side::Left).place(holder, Vec2::new(g.bounds.left + 5.0, y));
        world.set_control(BallControl::Possessed(holder));
        world.ball_mut().position = Vec2::new(g.bounds.left - 2.0, y);

        world.resolve_ball(&[], Vec2::ZERO, &rules(&config), &DragModel::from_config(&config), 0.0, 10);

        assert_eq!(world.score(), (0, 0));
        assert_eq!(world.possession(), None);
        assert_eq!(world.ball().position.x, g.bounds.left + 1.0);
        assert_eq!(
            world.take_events().into_iter().map(|e| e.data).collect::<Vec<_>>(),
            vec![GameEventData::PossessionLost { player_id: holder, reason: LossReason::BallReflected }]
        );
    }

    #[test]
    fn test_holder_in_reach_keeps_possession() {
        let config = config();
        let mut world = World::new(&config);
        let holder = world.snapshots()[0].id;
        let spot = world.geometry().center() - Vec2::new(100.0, 0.0);
        world.roster(Side::Left).place(holder, spot);
        world.set_control(BallControl::Possessed(holder));
        world.ball_mut().position = spot + Vec2::new(6.0, 0.0);

        world.resolve_ball(&[], Vec2::ZERO, &rules(&config), &DragModel::from_config(&config), 1.0 / 60.0, 10);

        assert_eq!(world.possession(), Some(holder));
        assert!(world.take_events().is_empty());
    }

    #[test]
    fn test_free_ball_slows_under_drag() {
        let config = config();
        let mut world = World::new(&config);
        world.ball_mut().velocity = Vec2::new(50.0, 0.0);
        let drag = DragModel::from_config(&config);

        for _ in 0..10 {
            world.resolve_ball(&[], Vec2::ZERO, &rules(&config), &drag, 1.0 / 60.0, 10);
        }

        let v = world.ball().velocity;
        assert!(v.x > 0.0 && v.x < 50.0);
        assert!(world.ball().position.x > world.geometry().center().x);
    }

    #[test]
    fn test_publish_steering_reaches_rosters() {
        let config = config();
        let world = World::new(&config);
        world.publish_steering(&[Vec2::RIGHT, Vec2::ZERO], 10.0);

        let handle = world.team_handle(Side::Left);
        let drag = DragModel::from_config(&config);
        handle.step(&world.geometry().bounds, drag.player, 0.0, |_| {});

        for actor in world.roster(Side::Left).read().actors() {
            assert_eq!(actor.velocity, Vec2::new(10.0, 0.0));
        }
        assert_eq!(world.update_counts(), vec![1, 1, 1, 0, 0, 0]);
    }
}
