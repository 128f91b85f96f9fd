//! Team Controller
//!
//! Worker loop for one team. Each tick it waits at the compute gate, steps
//! every player it owns and submits them for drawing, then waits at the
//! render gate. It never touches the ball or the other team.
//!
//! A panic inside the step is caught and reported through the tick signal.
//! The worker still reaches the render gate, so the coordinator never waits
//! on a dead thread.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crossbeam_channel::Receiver;
use tracing::{debug, error, info_span};

use crate::core::rect::Rect;
use crate::engine::barrier::RendezvousBarrier;
use crate::engine::draw::{DrawSerializer, Renderer};
use crate::engine::signal::TickSignal;
use crate::game::actor::Side;
use crate::game::roster::TeamHandle;

/// Everything one worker thread needs.
pub struct TeamController<R> {
    handle: TeamHandle,
    bounds: Rect,
    drag: f64,
    barrier: Arc<RendezvousBarrier>,
    draw: Arc<DrawSerializer<R>>,
    signal: Arc<TickSignal>,
}

impl<R: Renderer> TeamController<R> {
    /// Bundle a worker's shared handles.
    pub fn new(
        handle: TeamHandle,
        bounds: Rect,
        drag: f64,
        barrier: Arc<RendezvousBarrier>,
        draw: Arc<DrawSerializer<R>>,
        signal: Arc<TickSignal>,
    ) -> Self {
        Self { handle, bounds, drag, barrier, draw, signal }
    }

    /// Team this controller drives.
    pub fn side(&self) -> Side {
        self.handle.side()
    }

    /// Thread body.
    ///
    /// Blocks on `start` until every worker exists. A closed latch means
    /// startup failed; the worker returns without ever reaching the barrier.
    pub fn run(self, start: Receiver<()>) {
        let span = info_span!("team", side = ?self.side());
        let _enter = span.enter();

        if start.recv().is_err() {
            debug!("startup aborted before first tick");
            return;
        }
        debug!("controller started");

        let mut ticks = 0u64;
        loop {
            // Compute gate
            self.barrier.wait();

            // stop() only lands before a compute gate, so this holds for the whole round
            let running = self.signal.is_running();

            // The shutdown round carries no work
            if running {
                let dt = self.signal.delta();
                let stepped = panic::catch_unwind(AssertUnwindSafe(|| {
                    self.handle.step(&self.bounds, self.drag, dt, |actor| {
                        #[cfg(feature = "debug-tracing")]
                        tracing::trace!(id = %actor.id, position = %actor.position, "stepped");
                        self.draw.submit(actor);
                    });
                }));
                match stepped {
                    Ok(()) => ticks += 1,
                    Err(_) => {
                        error!(tick = self.signal.tick(), "team step panicked");
                        self.signal.report_fault(self.side());
                    }
                }
            }

            // Render gate
            self.barrier.wait();

            if !running {
                break;
            }
        }

        debug!(ticks, "controller exiting");
    }
}
