//! # Coordination State
//!
//! The one shared structure every actor rendezvouses through. All counters
//! and the closing flag live in [`CoordState`] behind a single
//! `parking_lot::Mutex`; the gates and barriers that sequence the actors
//! hang off [`Workshop`] next to it.
//!
//! ## Locking discipline
//!
//! The lock is short-held: check, mutate, signal, drop. It is never held
//! across `Gate::enter`, `Barrier::wait`, or a sleep. Gate/barrier posts
//! made while holding the lock are fine - they never block.
//!
//! ## Event ordering
//!
//! The journal sequence counter lives inside [`CoordState`], so a record's
//! number is assigned in the same critical section as the state change it
//! describes. That is what makes "no help after closing" checkable from
//! the log alone.

use std::fmt;
use std::sync::Arc;

use northpole_sync::{Barrier, Gate};
use parking_lot::{Mutex, MutexGuard};

use crate::config::SimulationConfig;
use crate::journal::Journal;

/// The fixed elf group size Santa will help.
pub const ELF_QUORUM: u32 = 3;

/// Mutable coordination state. Only ever touched under the workshop lock.
#[derive(Debug)]
pub struct CoordState {
    /// Elves queued inside the current quorum-forming round (0..=3).
    pub waiting_elves: u32,
    /// Reindeer home and not yet hitched (0..=R).
    pub returned_reindeer: u32,
    /// Elves that have not yet retired (counts down from E). The last
    /// retirement gates Santa's final announcement, so "Christmas started"
    /// is always the journal's last line.
    pub remaining_elves: u32,
    /// Once true, permanently true. Written exactly once.
    pub workshop_closed: bool,
    /// Total order of journal events. Protocol-irrelevant, but mutated
    /// under the same lock so the log stays consistent with the state.
    sequence: u64,
}

impl CoordState {
    fn new(elf_count: u32) -> Self {
        Self {
            waiting_elves: 0,
            returned_reindeer: 0,
            remaining_elves: elf_count,
            workshop_closed: false,
            sequence: 0,
        }
    }

    /// Marks the workshop closed. The false-to-true transition happens at
    /// most once; the abort path may find it already set.
    pub fn close(&mut self) {
        debug_assert!(!self.workshop_closed, "workshop closed twice");
        self.workshop_closed = true;
    }
}

/// The workshop: coordination state plus every rendezvous primitive.
///
/// Created before any actor starts, shared behind an `Arc`, and dropped
/// only after every actor has been joined.
#[derive(Debug)]
pub struct Workshop {
    /// Validated run parameters.
    pub(crate) config: SimulationConfig,
    /// The single exclusion lock over all shared counters.
    pub(crate) state: Mutex<CoordState>,
    /// Elf admission turnstile. Open: one elf may join the queue.
    pub(crate) queue_gate: Gate,
    /// Santa's permission-to-sleep gate. Closed while a quorum is being
    /// served so Santa cannot nap mid-service.
    pub(crate) sleep_gate: Gate,
    /// Wake signal, posted by the third elf of a quorum or the last
    /// returning reindeer.
    pub(crate) santa_wake: Barrier,
    /// Release-three signal for the quorum elves (also posted at closing).
    pub(crate) help_barrier: Barrier,
    /// Release-R signal that starts hitching.
    pub(crate) hitch_barrier: Barrier,
    /// Completion event: the last hitched reindeer posts it once.
    pub(crate) all_hitched: Barrier,
    /// Completion event: the last retiring elf posts it once. Santa's
    /// final announcement waits on this as well as on `all_hitched`.
    pub(crate) all_retired: Barrier,
    /// Event journal, fed while holding the state lock.
    journal: Arc<Journal>,
}

impl Workshop {
    /// Builds a zero-initialized workshop for one run.
    #[must_use]
    pub fn new(config: SimulationConfig, journal: Arc<Journal>) -> Self {
        let state = Mutex::new(CoordState::new(config.elf_count));
        Self {
            config,
            state,
            queue_gate: Gate::open(),
            sleep_gate: Gate::open(),
            santa_wake: Barrier::new(),
            help_barrier: Barrier::new(),
            hitch_barrier: Barrier::new(),
            all_hitched: Barrier::new(),
            all_retired: Barrier::new(),
            journal,
        }
    }

    /// Number of reindeer in this run.
    #[must_use]
    pub fn reindeer_count(&self) -> u32 {
        self.config.reindeer_count
    }

    /// Journals an event inside a critical section the caller already
    /// holds. Assigns the next sequence number under that lock.
    pub(crate) fn record(&self, state: &mut MutexGuard<'_, CoordState>, message: fmt::Arguments) {
        state.sequence += 1;
        self.journal.append(state.sequence, message.to_string());
    }

    /// Journals an event from outside any critical section: takes the
    /// lock, numbers the record, releases.
    pub(crate) fn record_event(&self, message: fmt::Arguments) {
        let mut state = self.state.lock();
        self.record(&mut state, message);
    }

    /// Whether the workshop has closed. Takes the lock; used by tests and
    /// diagnostics, never as a substitute for the in-section checks the
    /// actors perform.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().workshop_closed
    }

    /// Failure-path drain, used when an actor could not be spawned.
    ///
    /// Marks the workshop closed and floods every gate and barrier so each
    /// already-started actor falls through its next wait, observes the
    /// flag, and reaches a terminal state. Every wait site re-checks
    /// `workshop_closed`, so the surplus permits are harmless.
    pub fn abort(&self) {
        let mut state = self.state.lock();
        if !state.workshop_closed {
            state.close();
            // Leave a trace in the journal so a log without a closing
            // record but with hitch events is explicable after the fact.
            self.record(&mut state, format_args!("Workshop: run aborted"));
        }
        drop(state);

        let elves = self.config.elf_count as usize;
        let reindeer = self.config.reindeer_count as usize;
        self.queue_gate.release_many(elves);
        self.help_barrier.post_many(ELF_QUORUM as usize);
        self.hitch_barrier.post_many(reindeer);
        self.santa_wake.post();
        self.sleep_gate.release();
        tracing::warn!("workshop aborted; primitives flooded for drain");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_workshop(elves: u32, reindeer: u32) -> (Workshop, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let journal =
            Arc::new(Journal::create(&dir.path().join("events.out")).expect("create journal"));
        let config = SimulationConfig::from_args([
            "northpole".to_string(),
            elves.to_string(),
            reindeer.to_string(),
            "0".to_string(),
            "0".to_string(),
        ])
        .expect("valid config");
        (Workshop::new(config, journal), dir)
    }

    #[test]
    fn test_starts_zeroed_and_open() {
        let (workshop, _dir) = test_workshop(3, 2);
        let state = workshop.state.lock();
        assert_eq!(state.waiting_elves, 0);
        assert_eq!(state.returned_reindeer, 0);
        assert_eq!(state.remaining_elves, 3);
        assert!(!state.workshop_closed);
        drop(state);
        assert_eq!(workshop.queue_gate.available(), 1);
        assert_eq!(workshop.sleep_gate.available(), 1);
        assert_eq!(workshop.santa_wake.pending(), 0);
    }

    #[test]
    fn test_record_assigns_increasing_sequence() {
        let (workshop, _dir) = test_workshop(3, 2);
        workshop.record_event(format_args!("Elf 1: started"));
        workshop.record_event(format_args!("Elf 2: started"));
        assert_eq!(workshop.state.lock().sequence, 2);
    }

    #[test]
    fn test_abort_closes_and_floods() {
        let (workshop, dir) = test_workshop(4, 2);
        workshop.abort();
        assert!(workshop.is_closed());
        assert_eq!(workshop.queue_gate.available(), 4 + 1);
        assert_eq!(workshop.help_barrier.pending(), 3);
        assert_eq!(workshop.hitch_barrier.pending(), 2);
        assert_eq!(workshop.santa_wake.pending(), 1);

        // Dropping the workshop flushes the journal; the abort must have
        // left a record explaining the torn-down run.
        drop(workshop);
        let contents = std::fs::read_to_string(dir.path().join("events.out"))
            .expect("journal missing");
        assert_eq!(contents, "1: Workshop: run aborted\n");
    }

    #[test]
    fn test_abort_after_close_keeps_flag() {
        let (workshop, _dir) = test_workshop(1, 1);
        workshop.state.lock().close();
        workshop.abort();
        assert!(workshop.is_closed());
    }
}
