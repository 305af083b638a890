//! # Event Journal
//!
//! Append-only record of every observable protocol transition, one line per
//! event in the form `"<seq>: <message>"`. The file is truncated when the
//! journal is created.
//!
//! Sequence numbers are NOT assigned here. The coordination state owns the
//! counter and increments it under the protocol lock, so journal ordering
//! stays consistent with protocol-state transitions. This module only
//! receives already-numbered records over a channel and writes them from a
//! dedicated thread, keeping file I/O off the lock entirely.
//!
//! Records are sent while the sender holds the protocol lock, so channel
//! order equals sequence order and the file comes out gapless and strictly
//! increasing without the writer knowing anything about the protocol.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Sender};
use parking_lot::Mutex;

/// A numbered journal record, ready to be written.
#[derive(Debug)]
struct Record {
    /// Position in the total event order.
    seq: u64,
    /// Pre-formatted event message.
    message: String,
}

/// Sequenced append-only event log with a dedicated writer thread.
#[derive(Debug)]
pub struct Journal {
    /// Feed into the writer thread. Taken (and dropped) at close.
    feed: Mutex<Option<Sender<Record>>>,
    /// Writer thread handle; its return value carries any I/O failure.
    writer: Mutex<Option<JoinHandle<io::Result<()>>>>,
}

impl Journal {
    /// Creates the journal file (truncating any previous run's output) and
    /// starts the writer thread.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the file cannot be created or the
    /// writer thread cannot be spawned.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        let (sender, receiver) = unbounded::<Record>();

        let handle = thread::Builder::new()
            .name("journal".to_string())
            .spawn(move || -> io::Result<()> {
                let mut out = BufWriter::new(file);
                for record in receiver {
                    writeln!(out, "{}: {}", record.seq, record.message)?;
                }
                out.flush()
            })?;

        Ok(Self {
            feed: Mutex::new(Some(sender)),
            writer: Mutex::new(Some(handle)),
        })
    }

    /// Queues one numbered record for writing.
    ///
    /// The caller is expected to hold the coordination-state lock while the
    /// sequence number is assigned and this send happens; that is what
    /// makes file order match protocol order. A send after `close()` or
    /// after a writer failure is silently dropped - the failure itself is
    /// reported at close time.
    pub fn append(&self, seq: u64, message: String) {
        if let Some(feed) = self.feed.lock().as_ref() {
            let _ = feed.send(Record { seq, message });
        }
    }

    /// Shuts the writer down and reports any I/O failure from the whole
    /// run. Idempotent; later calls return `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns the first write or flush error the writer thread hit.
    pub fn close(&self) -> io::Result<()> {
        // Dropping the sender ends the writer's receive loop.
        drop(self.feed.lock().take());
        let handle = self.writer.lock().take();
        match handle {
            Some(handle) => handle
                .join()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "journal writer panicked"))?,
            None => Ok(()),
        }
    }
}

impl Drop for Journal {
    fn drop(&mut self) {
        // Best-effort flush when the owner forgot to close explicitly.
        let _ = self.close();
    }
}
