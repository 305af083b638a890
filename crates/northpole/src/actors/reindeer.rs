//! # Reindeer
//!
//! Vacations, returns home, waits to be hitched, departs. The last
//! reindeer to return wakes Santa (forcing the closing decision); the last
//! one to be hitched posts the completion event Santa's final wait
//! consumes.

use crate::actors::{actor_rng, random_pause};
use crate::workshop::Workshop;

/// Ordinal offset so reindeer seeds never collide with elf seeds.
const SEED_OFFSET: u64 = 1 << 32;

/// Runs one reindeer to departure.
pub fn run_reindeer(workshop: &Workshop, id: u32) {
    let mut rng = actor_rng(SEED_OFFSET + u64::from(id));
    let vacation_ms = workshop.config.reindeer_vacation_ms;
    let reindeer_count = workshop.reindeer_count();

    workshop.record_event(format_args!("RD {id}: rstarted"));
    random_pause(&mut rng, vacation_ms, vacation_ms.saturating_mul(2));
    workshop.record_event(format_args!("RD {id}: return home"));

    {
        let mut state = workshop.state.lock();
        state.returned_reindeer += 1;
        debug_assert!(state.returned_reindeer <= reindeer_count);
        if state.returned_reindeer == reindeer_count {
            // Everyone is home: force Santa's closing decision.
            tracing::debug!(reindeer = id, "last one home, waking santa");
            workshop.santa_wake.post();
        }
    }

    workshop.hitch_barrier.wait();
    workshop.record_event(format_args!("RD {id}: get hitched"));

    {
        let mut state = workshop.state.lock();
        debug_assert!(state.returned_reindeer > 0);
        state.returned_reindeer -= 1;
        if state.returned_reindeer == 0 {
            // Sleigh is ready; release Santa's final wait.
            workshop.all_hitched.post();
        }
    }
    tracing::debug!(reindeer = id, "departed");
}
