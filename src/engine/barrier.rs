//! Rendezvous Barrier
//!
//! Reusable N-party barrier. The last arrival of a generation releases
//! everyone and the barrier resets for the next round.

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

/// Barrier construction failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BarrierError {
    /// A barrier needs at least one party
    #[error("rendezvous barrier needs at least one party")]
    NoParties,
}

#[derive(Debug)]
struct Gate {
    /// Arrivals in the current generation
    arrived: usize,
    /// Bumped on every release
    generation: u64,
}

/// Fixed-size rendezvous point for the coordinator and the team controllers.
#[derive(Debug)]
pub struct RendezvousBarrier {
    parties: usize,
    gate: Mutex<Gate>,
    released: Condvar,
}

/// Outcome of one [`RendezvousBarrier::wait`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitResult {
    leader: bool,
    generation: u64,
}

impl WaitResult {
    /// This caller was the arrival that released the generation.
    pub fn is_leader(&self) -> bool {
        self.leader
    }

    /// Generation this wait belonged to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl RendezvousBarrier {
    /// Create a barrier for `parties` threads.
    pub fn new(parties: usize) -> Result<Self, BarrierError> {
        if parties == 0 {
            return Err(BarrierError::NoParties);
        }
        Ok(Self {
            parties,
            gate: Mutex::new(Gate { arrived: 0, generation: 0 }),
            released: Condvar::new(),
        })
    }

    /// Number of parties per generation.
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Block until every party has arrived in this generation.
    pub fn wait(&self) -> WaitResult {
        let mut gate = self.gate.lock();
        let generation = gate.generation;
        gate.arrived += 1;

        if gate.arrived == self.parties {
            gate.arrived = 0;
            gate.generation = gate.generation.wrapping_add(1);
            self.released.notify_all();
            return WaitResult { leader: true, generation };
        }

        // Spurious wakeups leave the generation unchanged
        while gate.generation == generation {
            self.released.wait(&mut gate);
        }
        WaitResult { leader: false, generation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_zero_parties_rejected() {
        assert_eq!(RendezvousBarrier::new(0).unwrap_err(), BarrierError::NoParties);
    }

    #[test]
    fn test_single_party_never_blocks() {
        let barrier = RendezvousBarrier::new(1).unwrap();
        for g in 0..5 {
            let result = barrier.wait();
            assert!(result.is_leader());
            assert_eq!(result.generation(), g);
        }
    }

    #[test]
    fn test_exactly_one_leader_per_generation() {
        const PARTIES: usize = 4;
        const ROUNDS: usize = 200;
        let barrier = Arc::new(RendezvousBarrier::new(PARTIES).unwrap());
        let leaders = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..PARTIES)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                let leaders = Arc::clone(&leaders);
                thread::spawn(move || {
                    for _ in 0..ROUNDS {
                        if barrier.wait().is_leader() {
                            leaders.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(leaders.load(Ordering::Relaxed), ROUNDS);
    }

    #[test]
    fn test_nobody_passes_before_last_arrival() {
        let barrier = Arc::new(RendezvousBarrier::new(3).unwrap());
        let arrived = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                let arrived = Arc::clone(&arrived);
                thread::spawn(move || {
                    for round in 1..=50 {
                        arrived.fetch_add(1, Ordering::SeqCst);
                        barrier.wait();
                        // Everyone from this round is in before anyone leaves
                        assert!(arrived.load(Ordering::SeqCst) >= round * 3);
                        barrier.wait();
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
    }
}
