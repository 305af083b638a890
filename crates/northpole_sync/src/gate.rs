//! # Admission Gate
//!
//! A single-slot turnstile. The gate holds a permit count; `enter()` blocks
//! until a permit exists and consumes it, so at most one waiter passes per
//! `release()`. In normal operation the count stays at 0 or 1 and the gate
//! behaves as a relay baton: the admitted party decides whether to reopen.
//! At shutdown the owner may flood the gate with `release_many()` so every
//! remaining waiter passes through and observes the closing flag.

use parking_lot::{Condvar, Mutex};

/// One-at-a-time admission turnstile.
///
/// ## Usage
///
/// ```rust
/// use northpole_sync::Gate;
///
/// let gate = Gate::open();
/// gate.enter();      // consumes the permit, gate is now closed
/// gate.release();    // reopen for the next waiter
/// ```
#[derive(Debug)]
pub struct Gate {
    /// Available permits. 0 = closed, 1 = open; values above 1 only occur
    /// during the shutdown flood.
    permits: Mutex<usize>,
    /// Signaled on every release.
    admitted: Condvar,
}

impl Gate {
    /// Creates a gate that is initially open (one permit).
    #[must_use]
    pub fn open() -> Self {
        Self {
            permits: Mutex::new(1),
            admitted: Condvar::new(),
        }
    }

    /// Creates a gate that is initially closed (no permits).
    #[must_use]
    pub fn closed() -> Self {
        Self {
            permits: Mutex::new(0),
            admitted: Condvar::new(),
        }
    }

    /// Blocks until the gate is open, then atomically closes it behind the
    /// caller. Exactly one waiter is admitted per permit.
    pub fn enter(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.admitted.wait(&mut permits);
        }
        *permits -= 1;
    }

    /// Reopens the gate for one more admission.
    pub fn release(&self) {
        let mut permits = self.permits.lock();
        *permits += 1;
        drop(permits);
        self.admitted.notify_one();
    }

    /// Reopens the gate `count` times at once. Used at shutdown so every
    /// still-waiting party is eventually admitted.
    pub fn release_many(&self, count: usize) {
        if count == 0 {
            return;
        }
        let mut permits = self.permits.lock();
        *permits += count;
        drop(permits);
        self.admitted.notify_all();
    }

    /// Returns the number of currently available permits.
    ///
    /// Diagnostic accessor for assertions and tests; the protocol never
    /// branches on it, and the value may be stale the moment it returns.
    #[must_use]
    pub fn available(&self) -> usize {
        *self.permits.lock()
    }
}
