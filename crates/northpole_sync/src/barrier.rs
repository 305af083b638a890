//! # Release-N Barrier
//!
//! A group-release signal. The owner posts the barrier N times; exactly N
//! waiters each consume one post and proceed. Posts are persistent: a post
//! made before anyone waits is not lost, and a waiter that arrives late
//! consumes a leftover post without blocking.
//!
//! With N = 1 the barrier doubles as a wake signal (one post wakes one
//! waiter), which is how the workshop uses it for "wake Santa" and
//! "all reindeer hitched".

use parking_lot::{Condvar, Mutex};

/// Counting release barrier.
///
/// ## Usage
///
/// ```rust
/// use northpole_sync::Barrier;
///
/// let barrier = Barrier::new();
/// barrier.post_many(3);   // release a group of three
/// barrier.wait();         // consumes one of the three posts
/// ```
#[derive(Debug)]
pub struct Barrier {
    /// Posts not yet consumed by a waiter.
    posts: Mutex<usize>,
    /// Signaled on every post.
    released: Condvar,
}

impl Barrier {
    /// Creates a barrier with no pending posts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(0),
            released: Condvar::new(),
        }
    }

    /// Blocks until a post is available, then consumes exactly one.
    pub fn wait(&self) {
        let mut posts = self.posts.lock();
        while *posts == 0 {
            self.released.wait(&mut posts);
        }
        *posts -= 1;
    }

    /// Releases one waiter (now or later).
    pub fn post(&self) {
        let mut posts = self.posts.lock();
        *posts += 1;
        drop(posts);
        self.released.notify_one();
    }

    /// Releases `count` waiters at once.
    pub fn post_many(&self, count: usize) {
        if count == 0 {
            return;
        }
        let mut posts = self.posts.lock();
        *posts += count;
        drop(posts);
        self.released.notify_all();
    }

    /// Returns the number of posts not yet consumed.
    ///
    /// Diagnostic accessor for assertions and tests; the protocol never
    /// branches on it, and the value may be stale the moment it returns.
    #[must_use]
    pub fn pending(&self) -> usize {
        *self.posts.lock()
    }
}

impl Default for Barrier {
    fn default() -> Self {
        Self::new()
    }
}
