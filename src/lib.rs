//! # Pitch Sim
//!
//! Barrier-synchronized two-team ball simulation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         PITCH SIM                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Leaf primitives                           │
//! │  ├── vec2.rs     - 2D f64 vector                             │
//! │  ├── rect.rs     - Axis-aligned rectangle                    │
//! │  ├── rng.rs      - Seeded xoroshiro128+ PRNG (spawn slots)   │
//! │  └── clock.rs    - Frame pacing and delta-time               │
//! │                                                              │
//! │  config.rs       - Startup configuration (TOML)              │
//! │                                                              │
//! │  game/           - Simulation rules (single-threaded)        │
//! │  ├── actor.rs    - Ball and field players                    │
//! │  ├── field.rs    - Field bounds and goal mouths              │
//! │  ├── physics.rs  - Drag integration, wall containment        │
//! │  ├── control.rs  - Possession / kick state machine           │
//! │  ├── input.rs    - Input events and sources                  │
//! │  ├── events.rs   - Game events                               │
//! │  ├── roster.rs   - Per-team actor ownership                  │
//! │  └── world.rs    - World state and the ball phase            │
//! │                                                              │
//! │  engine/         - Threads                                   │
//! │  ├── barrier.rs  - Rendezvous barrier                        │
//! │  ├── draw.rs     - Renderer trait and draw serializer        │
//! │  ├── signal.rs   - Run flag and per-tick delta               │
//! │  ├── team.rs     - Team controller worker                    │
//! │  └── coordinator.rs - Tick loop, startup, shutdown           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//!
//! The caller of [`Simulation::run`] is the coordinator. Each team gets one
//! worker thread that owns that team's players outright. All threads meet
//! twice per tick at a [`RendezvousBarrier`]: workers move their players
//! between the two gates, the coordinator handles the ball and presents the
//! frame after the second. The renderer is the only resource touched by
//! more than one thread inside a tick.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;
pub mod engine;

// Re-export commonly used types
pub use config::{ConfigError, SimConfig, TEAM_COUNT};
pub use core::vec2::Vec2;
pub use core::rng::DeterministicRng;
pub use engine::{EngineError, RendezvousBarrier, RunReport, Simulation};
pub use game::{InputEvent, ScriptedInput, World};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
