//! # Santa
//!
//! The single decision-maker. Sleeps until woken, then - under the lock -
//! decides with a fixed priority: closing beats helping when both
//! conditions hold at the same instant. Santa is the only writer of
//! `workshop_closed`.

use crate::workshop::{Workshop, ELF_QUORUM};

/// Runs Santa to termination.
///
/// Loop: wait for permission to sleep, announce it, block on the wake
/// signal, decide. Closing posts every drain signal (turnstile ×E, help
/// barrier ×3, hitch barrier ×R) and leaves the loop; helping posts the
/// help barrier ×3 and goes back to the sleep gate. After closing, Santa
/// waits for the last reindeer's "all hitched" event AND the last elf's
/// retirement before announcing Christmas, so the announcement is always
/// the journal's final event.
pub fn run_santa(workshop: &Workshop) {
    let reindeer_count = workshop.reindeer_count();

    loop {
        // Only open when no quorum is mid-service.
        workshop.sleep_gate.enter();
        workshop.record_event(format_args!("Santa: going to sleep"));
        workshop.santa_wake.wait();

        let mut state = workshop.state.lock();
        if state.workshop_closed {
            // Abort drain: the run is being torn down, not closed by us.
            // No sleigh to wait for.
            tracing::debug!("santa woken into an aborted run");
            return;
        }

        if state.returned_reindeer == reindeer_count {
            state.close();
            workshop.record(&mut state, format_args!("Santa: closing workshop"));
            drop(state);
            tracing::debug!("closing: reopening turnstile and starting hitching");
            workshop
                .queue_gate
                .release_many(workshop.config.elf_count as usize);
            workshop.help_barrier.post_many(ELF_QUORUM as usize);
            workshop.hitch_barrier.post_many(reindeer_count as usize);
            break;
        }

        if state.waiting_elves == ELF_QUORUM {
            workshop.record(&mut state, format_args!("Santa: helping elves"));
            drop(state);
            tracing::debug!("releasing elf quorum");
            workshop.help_barrier.post_many(ELF_QUORUM as usize);
        }
        // A wake with neither condition cannot happen in a healthy run:
        // the third elf's signal keeps waiting_elves at 3 until the help
        // barrier is posted, and the last reindeer's keeps the count at R.
    }

    workshop.all_hitched.wait();
    workshop.all_retired.wait();
    workshop.record_event(format_args!("Santa: Christmas started"));
    tracing::debug!("santa departed");
}
