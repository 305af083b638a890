//! # NORTHPOLE Sync Primitives
//!
//! Purpose-built rendezvous primitives for the workshop protocol:
//!
//! - [`Gate`] - a one-at-a-time admission turnstile. `enter()` consumes the
//!   single permit (acquire-and-close); whoever holds the baton decides
//!   whether to `release()` it for the next waiter.
//! - [`Barrier`] - a release-N group signal. `post_many(n)` releases exactly
//!   n waiters; posts persist until consumed.
//!
//! ## Why two types
//!
//! A counting semaphore can play both roles, but then baton-passing and
//! group-release semantics are only visible at the call sites. Naming the
//! two usages as distinct types keeps each contract explicit in the API.
//!
//! ## Thread Safety
//!
//! Both primitives are `Sync` and intended to be shared behind an `Arc`.
//! Neither holds its internal lock across a caller-visible suspension
//! beyond the condvar wait itself.

pub mod barrier;
pub mod gate;

pub use barrier::Barrier;
pub use gate::Gate;
