//! Simulation Coordinator
//!
//! Owns the world, the ball and tick sequencing. The calling thread becomes
//! the coordinator; one named thread per team runs a [`TeamController`].
//!
//! ## Tick Order
//!
//! ```text
//!  coordinator                              team controllers
//!  ───────────                              ────────────────
//!  drain input, quit / tick-limit check
//!  publish steering
//!  frame clock wait, publish delta
//!  ══════════════ compute gate ══════════════
//!                                           steer, contain, integrate,
//!                                           submit draws
//!  ══════════════ render gate ═══════════════
//!  ball control, goal check,                check run flag
//!  ball containment + integration,
//!  draw ball, present, decay goal flag
//! ```
//!
//! On quit the run flag is cleared before the compute gate, so the final
//! pair of waits carries no work. Workers read the flag right after the
//! compute gate and return once past the render gate.
//!
//! A worker whose step panics still reaches the render gate and leaves its
//! team in the signal's fault slot. The coordinator checks the slot after
//! the render gate, runs the shutdown round and fails with
//! [`EngineError::WorkerPanicked`].

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use serde::{Serialize, Deserialize};
use tracing::{debug, error, info, warn};

use crate::config::{SimConfig, TEAM_COUNT};
use crate::core::clock::FrameClock;
use crate::core::vec2::Vec2;
use crate::engine::barrier::RendezvousBarrier;
use crate::engine::draw::{DrawSerializer, FrameSummary, Renderer};
use crate::engine::signal::TickSignal;
use crate::engine::team::TeamController;
use crate::engine::EngineError;
use crate::game::actor::{Actor, ActorKind, Side};
use crate::game::control::ControlRules;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::input::{InputEvent, InputSource, TickInput};
use crate::game::physics::DragModel;
use crate::game::world::World;

/// Why the run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// A quit event arrived
    Quit,
    /// `max_ticks` was reached
    TickLimit,
}

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Ticks fully simulated
    pub ticks: u64,
    /// Why the loop stopped
    pub stop_reason: StopReason,
    /// Goals on the (left, right) goal
    pub score: (u32, u32),
    /// Every game event, in order
    pub events: Vec<GameEvent>,
    /// Step count per field player, in id order
    pub update_counts: Vec<u64>,
    /// Ticks where the frame clock could not keep up
    pub clock_overruns: u64,
    /// Final state of every actor, ball first
    pub actors: Vec<Actor>,
}

/// A finished run plus the renderer it drew into.
#[derive(Debug)]
pub struct RunOutcome<R> {
    /// Run summary
    pub report: RunReport,
    /// The renderer, handed back
    pub renderer: R,
}

/// A started simulation: workers spawned and waiting at the compute gate.
pub struct Simulation<R, I> {
    config: SimConfig,
    world: World,
    input: I,
    clock: FrameClock,
    rules: ControlRules,
    drag: DragModel,
    barrier: Arc<RendezvousBarrier>,
    draw: Arc<DrawSerializer<R>>,
    signal: Arc<TickSignal>,
    workers: Vec<(Side, JoinHandle<()>)>,
}

impl<R, I> Simulation<R, I>
where
    R: Renderer + 'static,
    I: InputSource,
{
    /// Validate `config`, build the world and spawn the team controllers.
    pub fn start(config: SimConfig, renderer: R, input: I) -> Result<Self, EngineError> {
        Self::start_with(config, renderer, input, spawn_named)
    }

    /// [`Simulation::start`] with a custom thread spawner.
    pub(crate) fn start_with<S>(config: SimConfig, renderer: R, input: I, mut spawn: S) -> Result<Self, EngineError>
    where
        S: FnMut(String, Box<dyn FnOnce() + Send>) -> io::Result<JoinHandle<()>>,
    {
        config.validate()?;

        let world = World::new(&config);
        let barrier = Arc::new(RendezvousBarrier::new(TEAM_COUNT + 1)?);
        let signal = Arc::new(TickSignal::new());
        let draw = Arc::new(DrawSerializer::new(renderer));
        let drag = DragModel::from_config(&config);

        if let Err(e) = draw.prepare() {
            warn!(error = %e, "renderer resources unavailable, continuing without them");
        }

        let (start_tx, start_rx) = crossbeam_channel::bounded::<()>(TEAM_COUNT);
        let mut workers = Vec::with_capacity(TEAM_COUNT);

        for side in Side::ALL {
            let controller = TeamController::new(
                world.team_handle(side),
                world.geometry().bounds,
                drag.for_kind(ActorKind::FieldPlayer),
                Arc::clone(&barrier),
                Arc::clone(&draw),
                Arc::clone(&signal),
            );
            let latch: Receiver<()> = start_rx.clone();
            let name = format!("team-{}", side.index());

            match spawn(name, Box::new(move || controller.run(latch))) {
                Ok(handle) => workers.push((side, handle)),
                Err(source) => {
                    // Closing the latch releases the workers already spawned
                    drop(start_tx);
                    for (_, handle) in workers {
                        let _ = handle.join();
                    }
                    return Err(EngineError::Spawn { team: side, source });
                }
            }
        }

        for _ in 0..workers.len() {
            // Receivers are alive in every spawned worker
            let _ = start_tx.send(());
        }

        info!(
            players_per_team = config.players_per_team,
            actors = world.actor_count(),
            fps = config.target_fps,
            "simulation started"
        );

        Ok(Self {
            clock: FrameClock::from_fps(config.target_fps),
            rules: ControlRules::from_config(&config),
            drag,
            config,
            world,
            input,
            barrier,
            draw,
            signal,
            workers,
        })
    }

    /// Read-only view of the world between runs.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Drive ticks until a quit event or the tick limit, then join the workers.
    pub fn run(mut self) -> Result<RunOutcome<R>, EngineError> {
        let mut pending: Vec<InputEvent> = Vec::new();
        let mut events = Vec::new();
        let mut pointer = self.world.geometry().center();
        self.clock.reset();

        let stop_reason = loop {
            let tick = self.world.tick();

            pending.clear();
            self.input.drain(tick, &mut pending);
            let input = TickInput::collect(&pending);
            if let Some(position) = input.pointer {
                pointer = position;
            }

            let stop = if input.quit {
                Some(StopReason::Quit)
            } else if self.config.max_ticks.is_some_and(|limit| tick >= limit) {
                Some(StopReason::TickLimit)
            } else {
                None
            };
            if let Some(reason) = stop {
                info!(tick, ?reason, "stopping");
                self.shutdown_round();
                break reason;
            }

            self.world.publish_steering(&input.steering, self.config.steer_impulse);

            let dt = self.frame_delta();
            self.signal.publish(tick, dt);

            // Compute gate: workers step their teams
            self.barrier.wait();
            // Render gate: every player for this tick is stepped and drawn
            self.barrier.wait();

            if let Some(team) = self.signal.fault() {
                error!(tick, ?team, "team controller failed, shutting down");
                self.shutdown_round();
                self.join_workers()?;
                return Err(EngineError::WorkerPanicked { team });
            }

            self.ball_phase(&input, pointer, dt);
            for event in self.world.take_events() {
                log_event(&event);
                events.push(event);
            }
            self.world.advance_tick();
        };

        self.join_workers()?;

        let report = RunReport {
            ticks: self.world.tick(),
            stop_reason,
            score: self.world.score(),
            events,
            update_counts: self.world.update_counts(),
            clock_overruns: self.clock.overruns(),
            actors: self.world.actors(),
        };
        info!(ticks = report.ticks, score = ?report.score, "simulation finished");

        // Workers are joined, so this is the only reference left
        let draw = Arc::try_unwrap(self.draw).map_err(|_| EngineError::RendererInUse)?;
        Ok(RunOutcome { report, renderer: draw.into_inner() })
    }

    /// Clamped delta-time for the coming tick.
    fn frame_delta(&mut self) -> f64 {
        let raw = self.clock.tick();
        let max = self.config.max_delta_seconds;
        if raw > max {
            debug!(raw, clamped = max, "frame delta clamped");
            max
        } else {
            raw
        }
    }

    /// Coordinator work after the render gate.
    fn ball_phase(&mut self, input: &TickInput, pointer: Vec2, dt: f64) {
        self.world.resolve_ball(
            &input.actions,
            pointer,
            &self.rules,
            &self.drag,
            dt,
            self.config.goal_flash_frames,
        );

        self.draw.submit(self.world.ball());
        self.draw.present(&FrameSummary {
            tick: self.world.tick(),
            score: self.world.score(),
            goal_flash: self.world.goal_flash().is_raised(),
            kick_charge: self.world.kick_charge(),
        });
        self.world.decay_goal_flash();
    }

    /// Clear the run flag and walk the workers through one empty tick.
    fn shutdown_round(&self) {
        self.signal.stop();
        self.barrier.wait();
        self.barrier.wait();
    }

    fn join_workers(&mut self) -> Result<(), EngineError> {
        let mut panicked = None;
        for (side, handle) in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!(?side, "team controller panicked");
                panicked.get_or_insert(side);
            }
        }
        match panicked {
            Some(team) => Err(EngineError::WorkerPanicked { team }),
            None => Ok(()),
        }
    }
}

fn spawn_named(name: String, body: Box<dyn FnOnce() + Send>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new().name(name).spawn(body)
}

fn log_event(event: &GameEvent) {
    match &event.data {
        GameEventData::GoalScored { side, score } => {
            info!(tick = event.tick, ?side, ?score, "goal");
        }
        data => debug!(tick = event.tick, ?data, "game event"),
    }
}
