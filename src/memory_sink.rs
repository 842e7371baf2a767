// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-memory sink
//!
//! This module provides an in-memory [`Sink`] implementation for testing and
//! debugging purposes. The `MemorySink` captures written bytes in a shared
//! buffer rather than sending them to stderr or a file, making it ideal for:
//!
//! - Unit testing code that emits through a [`Logger`](crate::Logger)
//! - Verifying exactly which bytes a dispatcher delivered to which slot
//! - Capturing logs in environments where stderr is redirected or unavailable
//!
//! ## Architecture
//!
//! The sink is a cheap handle around an `Arc<Mutex<Vec<u8>>>`. Cloning a
//! `MemorySink` clones the handle, not the buffer, so a test can keep one
//! clone for inspection while the dispatcher owns another.

use crate::sink::Sink;
use std::sync::{Arc, Mutex};

/// A [`Sink`] that accumulates written bytes in memory.
///
/// # Example
///
/// ```
/// use logfan::{MemorySink, Sink};
///
/// let sink = MemorySink::new();
/// let handle = sink.clone();
/// sink.write(b"hello\n").unwrap();
/// assert_eq!(handle.take_string(), "hello\n");
/// // The buffer is drained by take_string.
/// assert_eq!(handle.take_string(), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Creates a sink with an empty buffer.
    pub fn new() -> MemorySink {
        MemorySink::default()
    }

    /// A copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Drains the buffer and returns it as a string, replacing invalid UTF-8
    /// with the replacement character.
    pub fn take_string(&self) -> String {
        let mut buffer = self.lock();
        let drained = std::mem::take(&mut *buffer);
        String::from_utf8_lossy(&drained).into_owned()
    }

    /// The accumulated bytes, split into lines (without terminators).
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.lock())
            .lines()
            .map(|line| line.to_string())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        // A panic while holding this lock poisons nothing worth protecting;
        // recover the buffer rather than cascading the panic.
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Sink for MemorySink {
    fn write(&self, bytes: &[u8]) -> std::io::Result<()> {
        self.lock().extend_from_slice(bytes);
        Ok(())
    }
}

/*
Boilerplate notes for MemorySink:

- Clone: implemented, and deliberately shallow; both handles view one buffer
- Default: empty buffer is the obvious zero value
- PartialEq/Eq/Hash: not implemented; handle identity vs buffer equality is
  ambiguous and neither is needed
- Send/Sync: automatic via Arc<Mutex<..>>
*/
