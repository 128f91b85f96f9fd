//! Game Logic Module
//!
//! Everything the simulation knows about the pitch, independent of threads.
//!
//! ## Module Structure
//!
//! - `actor`: Ball and field player records
//! - `field`: Field bounds and goal mouths
//! - `physics`: Drag integration and boundary containment
//! - `control`: Possession / kick state machine and goal flag
//! - `input`: Input events, per-tick folding, input sources
//! - `events`: Game events for the run report
//! - `roster`: Per-team actor ownership
//! - `world`: Coordinator-owned world state and the ball phase

pub mod actor;
pub mod field;
pub mod physics;
pub mod control;
pub mod input;
pub mod events;
pub mod roster;
pub mod world;

// Re-export key types
pub use actor::{Actor, ActorId, ActorKind, Rgb, Side};
pub use control::{BallControl, ControlRules, GoalFlash};
pub use events::{GameEvent, GameEventData, LossReason};
pub use field::FieldGeometry;
pub use input::{InputEvent, InputSource, ScriptedInput, TickInput};
pub use roster::{TeamHandle, TeamRoster};
pub use world::World;
