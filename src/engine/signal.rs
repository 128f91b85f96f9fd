//! Tick Signal
//!
//! Per-tick values the coordinator publishes before the compute gate and the
//! team controllers read after it, plus the fault slot a controller fills
//! before the render gate. The barrier orders the accesses, so relaxed
//! atomics are enough.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};

use crate::game::actor::Side;

/// `fault` value while no controller has failed
const NO_FAULT: u8 = u8::MAX;

/// Run flag, frame delta and tick number shared with the workers.
#[derive(Debug)]
pub struct TickSignal {
    running: AtomicBool,
    /// `f64` seconds stored as raw bits
    delta_bits: AtomicU64,
    tick: AtomicU64,
    /// Index of the first team whose step panicked
    fault: AtomicU8,
}

impl Default for TickSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSignal {
    /// Running, zero delta, tick 0.
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            delta_bits: AtomicU64::new(0f64.to_bits()),
            tick: AtomicU64::new(0),
            fault: AtomicU8::new(NO_FAULT),
        }
    }

    /// Check whether the simulation should keep going.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Ask every worker to exit after the next render gate.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Publish the delta and tick for the coming worker phase.
    pub fn publish(&self, tick: u64, delta: f64) {
        self.tick.store(tick, Ordering::Relaxed);
        self.delta_bits.store(delta.to_bits(), Ordering::Relaxed);
    }

    /// Seconds to integrate this tick.
    #[inline]
    pub fn delta(&self) -> f64 {
        f64::from_bits(self.delta_bits.load(Ordering::Relaxed))
    }

    /// Tick being simulated.
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick.load(Ordering::Relaxed)
    }

    /// Record that `side`'s step panicked. The first report wins.
    pub fn report_fault(&self, side: Side) {
        let _ = self.fault.compare_exchange(NO_FAULT, side.index() as u8, Ordering::Relaxed, Ordering::Relaxed);
    }

    /// Team whose step panicked, if any.
    pub fn fault(&self) -> Option<Side> {
        match self.fault.load(Ordering::Relaxed) {
            NO_FAULT => None,
            index => Side::from_index(index as usize),
        }
    }
}
