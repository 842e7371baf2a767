// SPDX-License-Identifier: MIT OR Apache-2.0

//! Byte-stream destinations.
//!
//! A [`Sink`] accepts the raw bytes of one rendered log line. Sinks take
//! `&self`: the logger serializes every emission through one mutex, so a sink
//! is never written concurrently with itself and can rely on the interior
//! mutability of its underlying stream (`&File` and a locked stderr both
//! implement `Write`).
//!
//! Sinks are process-lifetime resources. Nothing in the dispatcher tracks or
//! closes them; a file-backed sink stays open until process exit.

use std::io::Write;

/// A single append-only destination for rendered log bytes.
pub trait Sink: Send + Sync + std::fmt::Debug {
    /// Writes the whole buffer, or fails.
    fn write(&self, bytes: &[u8]) -> std::io::Result<()>;
}

/// A sink that writes to the process's standard error stream.
///
/// Stderr is locked for the duration of each write so a line lands as one
/// unit even if something outside the logger also writes to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StderrSink;

impl StderrSink {
    pub const fn new() -> StderrSink {
        StderrSink
    }
}

impl Sink for StderrSink {
    fn write(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut lock = std::io::stderr().lock();
        lock.write_all(bytes)
    }
}

/// A sink that duplicates every write to two child sinks, first `a`, then
/// `b`. The first error wins; `b` is not written once `a` has failed.
///
/// This is how "also mirror to stderr" is realized: the file sink is `a` and
/// a [`StderrSink`] is `b`.
#[derive(Debug)]
pub struct TeeSink {
    a: Box<dyn Sink>,
    b: Box<dyn Sink>,
}

impl TeeSink {
    pub fn new(a: Box<dyn Sink>, b: Box<dyn Sink>) -> TeeSink {
        TeeSink { a, b }
    }
}

impl Sink for TeeSink {
    fn write(&self, bytes: &[u8]) -> std::io::Result<()> {
        self.a.write(bytes)?;
        self.b.write(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_sink::MemorySink;

    #[derive(Debug)]
    struct BrokenSink;

    impl Sink for BrokenSink {
        fn write(&self, _bytes: &[u8]) -> std::io::Result<()> {
            Err(std::io::Error::other("broken pipe"))
        }
    }

    #[test]
    fn tee_writes_both_children() {
        let a = MemorySink::new();
        let b = MemorySink::new();
        let tee = TeeSink::new(Box::new(a.clone()), Box::new(b.clone()));
        tee.write(b"one line\n").unwrap();
        assert_eq!(a.take_string(), "one line\n");
        assert_eq!(b.take_string(), "one line\n");
    }

    #[test]
    fn tee_first_error_wins() {
        let b = MemorySink::new();
        let tee = TeeSink::new(Box::new(BrokenSink), Box::new(b.clone()));
        assert!(tee.write(b"lost\n").is_err());
        assert_eq!(b.take_string(), "", "second child must not see the write");
    }
}
