//! # Elf
//!
//! Works, queues through the turnstile, waits for help, repeats - until the
//! workshop closes. The turnstile is a relay baton: every admitted elf
//! reopens it for the next one EXCEPT the elf that completes the quorum,
//! which signals Santa instead and leaves the gate shut until the group
//! has been served.
//!
//! The help-barrier wake carries no reliable meaning on its own: the same
//! channel signals "you were helped" and "the workshop just closed". The
//! closing flag is therefore re-checked under the lock after every wake.
//!
//! Retirement counts down under the lock; the last elf out posts the
//! completion event Santa's final announcement waits on.

use crate::actors::{actor_rng, random_pause};
use crate::workshop::{Workshop, ELF_QUORUM};

/// Runs one elf to retirement.
pub fn run_elf(workshop: &Workshop, id: u32) {
    let mut rng = actor_rng(u64::from(id));
    let work_ms = workshop.config.elf_work_ms;

    workshop.record_event(format_args!("Elf {id}: started"));

    loop {
        random_pause(&mut rng, 0, work_ms);
        workshop.record_event(format_args!("Elf {id}: need help"));

        workshop.queue_gate.enter();
        {
            let mut state = workshop.state.lock();
            if state.workshop_closed {
                // Admitted by the closing flood; retire without ever
                // joining the queue.
                break;
            }
            state.waiting_elves += 1;
            debug_assert!(state.waiting_elves <= ELF_QUORUM);
            if state.waiting_elves == ELF_QUORUM {
                // Quorum complete: wake Santa and keep the gate shut.
                tracing::debug!(elf = id, "quorum complete, waking santa");
                workshop.santa_wake.post();
            } else {
                workshop.queue_gate.release();
            }
        }

        workshop.help_barrier.wait();
        {
            let mut state = workshop.state.lock();
            if state.workshop_closed {
                // Woken by the closing posts, not by being helped.
                break;
            }
            workshop.record(&mut state, format_args!("Elf {id}: get help"));
            state.waiting_elves -= 1;
            if state.waiting_elves == 0 {
                // Last of the quorum: Santa may sleep again and the next
                // round may form.
                workshop.sleep_gate.release();
                workshop.queue_gate.release();
            }
        }
    }

    {
        let mut state = workshop.state.lock();
        workshop.record(&mut state, format_args!("Elf {id}: taking holidays"));
        debug_assert!(state.remaining_elves > 0);
        state.remaining_elves -= 1;
        if state.remaining_elves == 0 {
            // Last elf out the door: Santa's final announcement may run.
            workshop.all_retired.post();
        }
    }
    tracing::debug!(elf = id, "retired");
}
