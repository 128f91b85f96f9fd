//! Threaded Engine
//!
//! Runs the game layer on a fixed set of threads: the coordinator (the
//! caller of [`Simulation::run`]) and one controller per team, kept in
//! lock-step by a rendezvous barrier.
//!
//! ## Module Structure
//!
//! - `barrier`: N-party rendezvous barrier
//! - `draw`: Renderer trait, draw serializer, bundled renderers
//! - `signal`: Run flag and per-tick delta
//! - `team`: Team controller worker loop
//! - `coordinator`: Startup, tick loop, shutdown

use thiserror::Error;

use crate::config::ConfigError;
use crate::game::actor::Side;

pub mod barrier;
pub mod draw;
pub mod signal;
pub mod team;
pub mod coordinator;

pub use barrier::{BarrierError, RendezvousBarrier};
pub use coordinator::{RunOutcome, RunReport, Simulation, StopReason};
pub use draw::{DrawCommand, DrawSerializer, FrameSummary, RecordingRenderer, RenderError, Renderer, TraceRenderer};
pub use signal::TickSignal;

/// Engine failures. Everything here is fatal to the run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration rejected before any thread was created
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Barrier could not be built
    #[error("barrier setup failed: {0}")]
    Barrier(#[from] BarrierError),

    /// A team controller thread could not be created
    #[error("failed to spawn controller for team {team:?}: {source}")]
    Spawn {
        /// Team whose controller failed to start
        team: Side,
        /// OS error
        #[source]
        source: std::io::Error,
    },

    /// A team controller panicked
    #[error("controller for team {team:?} panicked")]
    WorkerPanicked {
        /// Team whose controller panicked
        team: Side,
    },

    /// The renderer was still shared after every worker was joined
    #[error("renderer still shared after shutdown")]
    RendererInUse,
}
