//! # NORTHPOLE
//!
//! The Santa Claus rendezvous problem: one Santa, E elves, R reindeer, no
//! central scheduler. Elves interrupt Santa only in groups of exactly
//! three; Santa helps a waiting quorum or closes the workshop once every
//! reindeer is home, whichever he observes first; Christmas starts only
//! after every reindeer is hitched.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌───────────────────────────────┐
//!                 │           Workshop            │
//!                 │  Mutex<CoordState>            │
//!                 │  queue_gate     (turnstile)   │
//!                 │  sleep_gate                   │
//!                 │  santa_wake     (signal)      │
//!                 │  help_barrier   (release-3)   │
//!                 │  hitch_barrier  (release-R)   │
//!                 │  all_hitched    (completion)  │
//!                 └──────┬──────────┬─────────┬───┘
//!                        │          │         │
//!                  ┌─────┴───┐ ┌────┴───┐ ┌───┴──────┐
//!                  │  Santa  │ │ Elf ×E │ │ Rndr ×R  │
//!                  └─────────┘ └────────┘ └──────────┘
//! ```
//!
//! Every observable transition is journaled as `"<seq>: <message>"`, with
//! the sequence number assigned under the same lock that guards the
//! protocol counters.

pub mod actors;
pub mod config;
pub mod error;
pub mod journal;
pub mod workshop;

pub use actors::run;
pub use config::SimulationConfig;
pub use error::{WorkshopError, WorkshopResult};
pub use journal::Journal;
pub use workshop::{CoordState, Workshop, ELF_QUORUM};
