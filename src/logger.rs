// SPDX-License-Identifier: MIT OR Apache-2.0

//! The emission orchestrator.
//!
//! A [`Logger`] owns the severity threshold, a renderer and a dispatcher,
//! and serializes every emission through one mutex: the whole pipeline for a
//! call (record construction, rendering, newline normalization, fan-out)
//! runs atomically with respect to every other concurrent emission. Two
//! concurrent emissions never interleave their bytes within or across sinks.
//!
//! Emission never returns an error. A failed dispatch is reported on stderr,
//! the diagnostic stream, which stays available even when the configured
//! sinks are broken. The one exception to "emission returns" is the fatal
//! path: [`Logger::fatal`] and [`Logger::fatalf`] write an abort notice plus
//! a backtrace to stderr after dispatch (successful or not) and terminate
//! the process with exit status 255. A fatal call never returns to the
//! caller; that guarantee holds even when the fatal line could not be
//! persisted.

use crate::dispatch::{Dispatch, SingleDispatcher, stack_trace};
use crate::record::{CallSite, Record};
use crate::renderer::{Renderer, TokenRenderer};
use crate::severity::Severity;
use crate::sink::StderrSink;
use std::fmt::Display;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};

/// Process exit status used by the fatal path.
pub const FATAL_EXIT_STATUS: i32 = 255;

/// A severity-filtered logger that renders records and fans them out
/// through a [`Dispatch`].
///
/// # Example
///
/// ```
/// use logfan::{Logger, MemorySink, Severity, SingleDispatcher, TokenRenderer};
///
/// let sink = MemorySink::new();
/// let logger = Logger::new(
///     Severity::Info,
///     Box::new(TokenRenderer::default()),
///     Box::new(SingleDispatcher::new(Box::new(sink.clone()))),
/// );
/// logger.info(&[&"ready"]);
/// logger.debug(&[&"suppressed"]); // below the Info threshold
/// let output = sink.take_string();
/// assert!(output.contains("ready"));
/// assert!(!output.contains("suppressed"));
/// ```
#[derive(Debug)]
pub struct Logger {
    threshold: AtomicU8,
    renderer: Box<dyn Renderer>,
    dispatcher: Box<dyn Dispatch>,
    emission: Mutex<()>,
}

impl Logger {
    pub fn new(
        threshold: Severity,
        renderer: Box<dyn Renderer>,
        dispatcher: Box<dyn Dispatch>,
    ) -> Logger {
        Logger {
            threshold: AtomicU8::new(threshold.ordinal()),
            renderer,
            dispatcher,
            emission: Mutex::new(()),
        }
    }

    /// A logger with the stock renderer and a single stderr sink.
    pub fn to_stderr(threshold: Severity) -> Logger {
        Logger::new(
            threshold,
            Box::new(TokenRenderer::default()),
            Box::new(SingleDispatcher::new(Box::new(StderrSink::new()))),
        )
    }

    /// The current threshold: the least severe severity still emitted.
    pub fn severity(&self) -> Severity {
        // Only set_severity and the constructor store here, so the ordinal
        // is always valid.
        Severity::from_ordinal(self.threshold.load(Ordering::Relaxed)).unwrap_or(Severity::Info)
    }

    /// Changes the threshold. Relaxed, last-write-wins; a change may race
    /// with an in-flight emission's guard check and no stronger guarantee
    /// is made.
    pub fn set_severity(&self, severity: Severity) {
        self.threshold.store(severity.ordinal(), Ordering::Relaxed);
    }

    /// Runs the emission pipeline for one call.
    ///
    /// If `severity` is less severe than the threshold the call is a no-op:
    /// no record is built, the renderer is not invoked, no sink is touched.
    /// Otherwise the message is formatted and dispatched under the emission
    /// mutex. This is the entry point the emission macros expand to; the
    /// per-severity methods are wrappers around it.
    pub fn emit(&self, severity: Severity, args: std::fmt::Arguments<'_>, callsite: CallSite) {
        if severity > self.severity() {
            return;
        }
        let _guard = self.run_pipeline(severity, args, callsite);
    }

    /// Fatal variant of [`emit`](Logger::emit): dispatches, then terminates
    /// the process. Never returns, even when dispatch failed.
    pub fn emit_fatal(&self, args: std::fmt::Arguments<'_>, callsite: CallSite) -> ! {
        // Fatal is ordinal 0 and passes any threshold; no guard check.
        let _guard = self.run_pipeline(Severity::Fatal, args, callsite);
        // The guard stays held through process exit: no other emission can
        // land between the fatal line's fan-out and termination.
        self.abort()
    }

    /// Runs the locked part of the pipeline and hands the emission guard
    /// back to the caller, so the fatal path can keep holding it across
    /// the abort sequence.
    fn run_pipeline(
        &self,
        severity: Severity,
        args: std::fmt::Arguments<'_>,
        callsite: CallSite,
    ) -> std::sync::MutexGuard<'_, ()> {
        // Held across rendering and the whole fan-out: an emission's bytes
        // land in every cascade-selected sink before the next emission
        // starts. Recover from poisoning; a renderer panic on some other
        // thread must not wedge logging forever.
        let guard = self
            .emission
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let record = Record::new(severity, args.to_string(), callsite);
        let mut line = self.renderer.format(&record);
        if !line.ends_with('\n') {
            line.push('\n');
        }

        if let Err(error) = self.dispatcher.dispatch(severity, line.as_bytes()) {
            eprintln!(
                "logfan: couldn't dispatch log line ({}): {error}",
                line.trim_end()
            );
        }
        guard
    }

    /// Writes the abort notice and a current-thread backtrace to the
    /// diagnostic stream, then exits with [`FATAL_EXIT_STATUS`].
    fn abort(&self) -> ! {
        eprintln!(
            "Abort with backtrace for debugging purpose:\n{}",
            stack_trace()
        );
        std::process::exit(FATAL_EXIT_STATUS)
    }

    /// Emits at Fatal severity and terminates the process.
    #[track_caller]
    pub fn fatal(&self, parts: &[&dyn Display]) -> ! {
        let message = join_parts(parts);
        self.emit_fatal(format_args!("{message}"), CallSite::caller())
    }

    /// Emits at Fatal severity with a format string and terminates the
    /// process.
    #[track_caller]
    pub fn fatalf(&self, args: std::fmt::Arguments<'_>) -> ! {
        self.emit_fatal(args, CallSite::caller())
    }

    /// Emits at Error severity, joining `parts` with single spaces.
    #[track_caller]
    pub fn error(&self, parts: &[&dyn Display]) {
        let message = join_parts(parts);
        self.emit(Severity::Error, format_args!("{message}"), CallSite::caller());
    }

    /// Emits at Error severity with a format string.
    #[track_caller]
    pub fn errorf(&self, args: std::fmt::Arguments<'_>) {
        self.emit(Severity::Error, args, CallSite::caller());
    }

    /// Emits at Warning severity, joining `parts` with single spaces.
    #[track_caller]
    pub fn warning(&self, parts: &[&dyn Display]) {
        let message = join_parts(parts);
        self.emit(
            Severity::Warning,
            format_args!("{message}"),
            CallSite::caller(),
        );
    }

    /// Emits at Warning severity with a format string.
    #[track_caller]
    pub fn warningf(&self, args: std::fmt::Arguments<'_>) {
        self.emit(Severity::Warning, args, CallSite::caller());
    }

    /// Emits at Info severity, joining `parts` with single spaces.
    #[track_caller]
    pub fn info(&self, parts: &[&dyn Display]) {
        let message = join_parts(parts);
        self.emit(Severity::Info, format_args!("{message}"), CallSite::caller());
    }

    /// Emits at Info severity with a format string.
    #[track_caller]
    pub fn infof(&self, args: std::fmt::Arguments<'_>) {
        self.emit(Severity::Info, args, CallSite::caller());
    }

    /// Emits at Debug severity, joining `parts` with single spaces.
    #[track_caller]
    pub fn debug(&self, parts: &[&dyn Display]) {
        let message = join_parts(parts);
        self.emit(Severity::Debug, format_args!("{message}"), CallSite::caller());
    }

    /// Emits at Debug severity with a format string.
    #[track_caller]
    pub fn debugf(&self, args: std::fmt::Arguments<'_>) {
        self.emit(Severity::Debug, args, CallSite::caller());
    }
}

fn join_parts(parts: &[&dyn Display]) -> String {
    use std::fmt::Write;
    let mut message = String::new();
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            message.push(' ');
        }
        let _ = write!(message, "{part}");
    }
    message
}

/*
Boilerplate notes.

# Logger

Clone is out: the dispatcher owns sinks and duplicating a logger would
duplicate nothing useful while muddying the single-mutex ordering story.
PartialEq/Ord/Hash make no sense. Default would need to pick a dispatcher,
which is configuration, not a zero value.
*/
