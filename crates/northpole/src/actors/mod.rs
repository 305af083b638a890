//! # Actor Harness
//!
//! Spawns one OS thread per actor (Santa first, then the reindeer, then
//! the elves), joins them all, and shuts the journal down. A spawn failure
//! mid-way must not leave already-started actors blocked forever, so the
//! failure path closes the workshop and floods every primitive before
//! joining what did start.

pub mod elf;
pub mod reindeer;
pub mod santa;

use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimulationConfig;
use crate::error::{WorkshopError, WorkshopResult};
use crate::journal::Journal;
use crate::workshop::Workshop;

/// A spawned actor, remembered by role for join-time reporting.
struct Actor {
    role: &'static str,
    handle: JoinHandle<()>,
}

/// Runs one complete simulation: journal, workshop, actors, join, flush.
///
/// Returns once every actor has reached its terminal state and the journal
/// is durably written.
///
/// # Errors
///
/// [`WorkshopError::Journal`] if the log file cannot be created or
/// flushed, [`WorkshopError::ActorSpawn`] if any thread fails to start
/// (after draining and joining the others), [`WorkshopError::ActorFailed`]
/// if a joined actor panicked instead of terminating cleanly.
pub fn run(config: &SimulationConfig, log_path: &Path) -> WorkshopResult<()> {
    let journal = Arc::new(Journal::create(log_path)?);
    let workshop = Arc::new(Workshop::new(config.clone(), Arc::clone(&journal)));

    let mut actors: Vec<Actor> = Vec::with_capacity(
        1 + config.reindeer_count as usize + config.elf_count as usize,
    );

    let outcome = spawn_all(config, &workshop, &mut actors);
    if let Err(error) = &outcome {
        tracing::error!(%error, "spawn failed; draining started actors");
        workshop.abort();
    }

    let mut failed: Option<&'static str> = None;
    for actor in actors {
        if actor.handle.join().is_err() {
            failed.get_or_insert(actor.role);
        }
    }

    outcome?;
    if let Some(role) = failed {
        return Err(WorkshopError::ActorFailed { role });
    }
    journal.close()?;
    tracing::info!("all actors terminated; journal flushed");
    Ok(())
}

/// Spawns Santa, the reindeer, and the elves, in that order.
fn spawn_all(
    config: &SimulationConfig,
    workshop: &Arc<Workshop>,
    actors: &mut Vec<Actor>,
) -> WorkshopResult<()> {
    spawn_actor(actors, "santa", "santa".to_string(), {
        let workshop = Arc::clone(workshop);
        move || santa::run_santa(&workshop)
    })?;

    for id in 1..=config.reindeer_count {
        spawn_actor(actors, "reindeer", format!("reindeer-{id}"), {
            let workshop = Arc::clone(workshop);
            move || reindeer::run_reindeer(&workshop, id)
        })?;
    }

    for id in 1..=config.elf_count {
        spawn_actor(actors, "elf", format!("elf-{id}"), {
            let workshop = Arc::clone(workshop);
            move || elf::run_elf(&workshop, id)
        })?;
    }

    Ok(())
}

/// Spawns one named actor thread, mapping the OS error into the taxonomy.
fn spawn_actor<F>(
    actors: &mut Vec<Actor>,
    role: &'static str,
    name: String,
    body: F,
) -> WorkshopResult<()>
where
    F: FnOnce() + Send + 'static,
{
    let handle = thread::Builder::new()
        .name(name)
        .spawn(body)
        .map_err(|source| WorkshopError::ActorSpawn { role, source })?;
    actors.push(Actor { role, handle });
    Ok(())
}

/// Per-actor RNG, seeded from the clock and the actor's ordinal so no two
/// actors share a stream. Replaces the original's per-process seeding.
pub(crate) fn actor_rng(ordinal: u64) -> StdRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::from(elapsed.subsec_nanos()));
    StdRng::seed_from_u64(nanos ^ ordinal.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Sleeps a uniformly random number of milliseconds in `low..=high`.
pub(crate) fn random_pause(rng: &mut StdRng, low: u64, high: u64) {
    let millis = if high == 0 { 0 } else { rng.gen_range(low..=high) };
    if millis > 0 {
        thread::sleep(Duration::from_millis(millis));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_rngs_diverge() {
        let mut a = actor_rng(1);
        let mut b = actor_rng(2);
        let draws_a: Vec<u64> = (0..8).map(|_| a.gen()).collect();
        let draws_b: Vec<u64> = (0..8).map(|_| b.gen()).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn test_random_pause_zero_bound_returns_immediately() {
        let mut rng = actor_rng(7);
        let start = std::time::Instant::now();
        random_pause(&mut rng, 0, 0);
        assert!(start.elapsed() < Duration::from_millis(20));
    }
}
