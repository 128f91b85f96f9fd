//! Draw Serialization
//!
//! The renderer is the one resource every thread writes to. Team controllers
//! submit their players concurrently during the worker phase, the
//! coordinator submits the ball and presents the frame afterwards. Every
//! call goes through [`DrawSerializer`], which holds the sink behind a
//! `parking_lot::Mutex`.

use parking_lot::Mutex;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::vec2::Vec2;
use crate::game::actor::{Actor, ActorId, ActorKind, Rgb};

/// Renderer failure. Never fatal to the simulation.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Optional drawing resource could not be prepared
    #[error("render resource unavailable: {0}")]
    Unavailable(String),
}

/// One actor's draw request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    /// Actor being drawn
    pub id: ActorId,
    /// Ball or field player
    pub kind: ActorKind,
    /// Center of the square
    pub position: Vec2,
    /// Side length of the square
    pub side: f64,
    /// Fill color
    pub color: Rgb,
}

impl DrawCommand {
    /// Draw request for `actor`'s current state.
    pub fn for_actor(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            kind: actor.kind,
            position: actor.position,
            side: actor.visual_side,
            color: actor.color,
        }
    }
}

/// Frame-level overlay data handed to `present`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSummary {
    /// Tick this frame belongs to
    pub tick: u64,
    /// Goals on the (left, right) goal
    pub score: (u32, u32),
    /// Goal celebration is showing
    pub goal_flash: bool,
    /// Current kick charge (0 = idle)
    pub kick_charge: u32,
}

/// Drawing surface.
pub trait Renderer: Send {
    /// Acquire optional resources (fonts, surfaces). Called once before the
    /// first tick.
    fn prepare(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Queue one actor for the current frame.
    fn draw(&mut self, command: &DrawCommand);

    /// Finish the current frame.
    fn present(&mut self, frame: &FrameSummary);
}

// =============================================================================
// SERIALIZER
// =============================================================================

/// Mutual exclusion around a [`Renderer`].
#[derive(Debug)]
pub struct DrawSerializer<R> {
    sink: Mutex<R>,
}

impl<R: Renderer> DrawSerializer<R> {
    /// Wrap a renderer.
    pub fn new(renderer: R) -> Self {
        Self { sink: Mutex::new(renderer) }
    }

    /// Forward `prepare` to the renderer.
    pub fn prepare(&self) -> Result<(), RenderError> {
        self.sink.lock().prepare()
    }

    /// Submit one actor.
    pub fn submit(&self, actor: &Actor) {
        self.sink.lock().draw(&DrawCommand::for_actor(actor));
    }

    /// Present the frame.
    pub fn present(&self, frame: &FrameSummary) {
        self.sink.lock().present(frame);
    }

    /// Take the renderer back once no thread is drawing.
    pub fn into_inner(self) -> R {
        self.sink.into_inner()
    }
}

// =============================================================================
// RENDERERS
// =============================================================================

/// One presented frame as captured by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Overlay data
    pub summary: FrameSummary,
    /// Draw calls in submission order
    pub draws: Vec<DrawCommand>,
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<RecordedFrame>,
    pending: Vec<DrawCommand>,
    fail_prepare: bool,
}

impl RecordingRenderer {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder whose `prepare` reports a missing resource.
    pub fn without_resources() -> Self {
        Self { fail_prepare: true, ..Self::default() }
    }

    /// Presented frames, oldest first.
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    /// Draws submitted since the last present.
    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }
}

impl Renderer for RecordingRenderer {
    fn prepare(&mut self) -> Result<(), RenderError> {
        if self.fail_prepare {
            return Err(RenderError::Unavailable("overlay font".into()));
        }
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.pending.push(*command);
    }

    fn present(&mut self, frame: &FrameSummary) {
        self.frames.push(RecordedFrame {
            summary: *frame,
            draws: std::mem::take(&mut self.pending),
        });
    }
}

/// Headless renderer that logs frames through `tracing`.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    draws_this_frame: usize,
    frames: u64,
}

impl TraceRenderer {
    /// New headless renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for TraceRenderer {
    fn draw(&mut self, command: &DrawCommand) {
        trace!(id = %command.id, position = %command.position, "draw");
        self.draws_this_frame += 1;
    }

    fn present(&mut self, frame: &FrameSummary) {
        debug!(
            tick = frame.tick,
            draws = self.draws_this_frame,
            score = ?frame.score,
            goal = frame.goal_flash,
            charge = frame.kick_charge,
            "present"
        );
        self.draws_this_frame = 0;
        self.frames += 1;
    }
}
