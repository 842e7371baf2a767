// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fan-out of rendered log lines to sinks.
//!
//! A [`Dispatch`] implementation takes the bytes of one rendered line plus
//! the severity they were emitted at, and decides which sinks receive them.
//! Two concrete dispatchers exist:
//!
//! - [`SingleDispatcher`]: one sink, severity ignored for routing. This is
//!   the degenerate configuration used for stderr-only and single-file
//!   logging.
//! - [`CascadeDispatcher`]: one sink per severity ordinal. With the cascade
//!   enabled ("pushed upwards"), a line lands in its own severity's sink and
//!   every less-severe sink, so the Info file accumulates Info, Warning,
//!   Error and Fatal lines while the Error file holds only Error and Fatal.
//!
//! Both augment Fatal-severity bytes with a stack dump before writing, so a
//! fatal line carries its trace into every file that receives it. The
//! dispatcher table is immutable after construction; reconfiguration
//! replaces the whole dispatcher, never individual slots.

use crate::error::Error;
use crate::severity::Severity;
use crate::sink::Sink;
use std::backtrace::Backtrace;
use std::borrow::Cow;

/// Captures a textual stack trace of the current thread.
///
/// Capture is forced regardless of `RUST_BACKTRACE`; a fatal log without a
/// trace is not worth much.
pub(crate) fn stack_trace() -> String {
    Backtrace::force_capture().to_string()
}

fn augment_fatal(severity: Severity, bytes: &[u8]) -> Cow<'_, [u8]> {
    if severity != Severity::Fatal {
        return Cow::Borrowed(bytes);
    }
    let mut augmented = bytes.to_vec();
    augmented.extend_from_slice(stack_trace().as_bytes());
    Cow::Owned(augmented)
}

/// Routes one rendered line to one or more sinks.
pub trait Dispatch: Send + Sync + std::fmt::Debug {
    fn dispatch(&self, severity: Severity, bytes: &[u8]) -> Result<(), Error>;
}

/// A dispatcher with exactly one destination.
///
/// Severity plays no routing role; every line goes to the one sink. Fatal
/// lines are still augmented with a stack dump.
#[derive(Debug)]
pub struct SingleDispatcher {
    sink: Box<dyn Sink>,
}

impl SingleDispatcher {
    pub fn new(sink: Box<dyn Sink>) -> SingleDispatcher {
        SingleDispatcher { sink }
    }
}

impl Dispatch for SingleDispatcher {
    fn dispatch(&self, severity: Severity, bytes: &[u8]) -> Result<(), Error> {
        let bytes = augment_fatal(severity, bytes);
        self.sink.write(&bytes)?;
        Ok(())
    }
}

/// A dispatcher holding one sink per severity ordinal.
#[derive(Debug)]
pub struct CascadeDispatcher {
    slots: Vec<Box<dyn Sink>>,
    pushed_upwards: bool,
}

impl CascadeDispatcher {
    /// Builds a dispatcher over `slots`, indexed by severity ordinal.
    ///
    /// The table is expected to carry [`Severity::COUNT`] entries, one per
    /// level; dispatching a severity whose ordinal has no slot fails with
    /// [`Error::UnknownSeverity`].
    pub fn new(slots: Vec<Box<dyn Sink>>, pushed_upwards: bool) -> CascadeDispatcher {
        CascadeDispatcher {
            slots,
            pushed_upwards,
        }
    }
}

impl Dispatch for CascadeDispatcher {
    /// Writes `bytes` to the slot at `severity`, then, if the cascade is
    /// enabled, to every slot of strictly lesser severity in ascending
    /// ordinal order. The walk stops at the first write error, which is
    /// returned; later slots are not attempted.
    fn dispatch(&self, severity: Severity, bytes: &[u8]) -> Result<(), Error> {
        let ordinal = severity.ordinal() as usize;
        if ordinal >= self.slots.len() {
            return Err(Error::UnknownSeverity(severity.ordinal()));
        }

        let bytes = augment_fatal(severity, bytes);
        for slot in &self.slots[ordinal..] {
            slot.write(&bytes)?;
            if !self.pushed_upwards {
                break;
            }
        }
        Ok(())
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
            Err(std::io::Error::other("disk full"))
        }
    }

    fn table() -> (Vec<MemorySink>, Vec<Box<dyn Sink>>) {
        let handles: Vec<MemorySink> = (0..Severity::COUNT).map(|_| MemorySink::new()).collect();
        let slots = handles
            .iter()
            .map(|sink| Box::new(sink.clone()) as Box<dyn Sink>)
            .collect();
        (handles, slots)
    }

    #[test]
    fn cascade_writes_own_and_less_severe_slots() {
        let (handles, slots) = table();
        let dispatcher = CascadeDispatcher::new(slots, true);
        dispatcher.dispatch(Severity::Error, b"oops\n").unwrap();

        assert_eq!(handles[Severity::Fatal.ordinal() as usize].contents(), b"");
        for severity in [
            Severity::Error,
            Severity::Warning,
            Severity::Info,
            Severity::Debug,
        ] {
            assert_eq!(
                handles[severity.ordinal() as usize].contents(),
                b"oops\n",
                "slot {severity} should hold the line"
            );
        }
    }

    #[test]
    fn disabled_cascade_writes_exactly_one_slot() {
        let (handles, slots) = table();
        let dispatcher = CascadeDispatcher::new(slots, false);
        dispatcher.dispatch(Severity::Warning, b"hm\n").unwrap();

        for (ordinal, handle) in handles.iter().enumerate() {
            let expected: &[u8] = if ordinal == Severity::Warning.ordinal() as usize {
                b"hm\n"
            } else {
                b""
            };
            assert_eq!(handle.contents(), expected, "slot {ordinal}");
        }
    }

    #[test]
    fn first_write_error_stops_the_walk() {
        let fatal = MemorySink::new();
        let error = MemorySink::new();
        let info = MemorySink::new();
        let debug = MemorySink::new();
        let slots: Vec<Box<dyn Sink>> = vec![
            Box::new(fatal.clone()),
            Box::new(error.clone()),
            Box::new(BrokenSink),
            Box::new(info.clone()),
            Box::new(debug.clone()),
        ];
        let dispatcher = CascadeDispatcher::new(slots, true);

        let result = dispatcher.dispatch(Severity::Error, b"oops\n");
        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(error.contents(), b"oops\n");
        assert_eq!(
            info.contents(),
            b"",
            "slots after the failure must stay untouched"
        );
        assert_eq!(debug.contents(), b"");
    }

    #[test]
    fn fatal_bytes_carry_a_stack_payload() {
        let (handles, slots) = table();
        let dispatcher = CascadeDispatcher::new(slots, true);
        dispatcher.dispatch(Severity::Fatal, b"giving up\n").unwrap();

        let written = handles[0].contents();
        assert!(written.starts_with(b"giving up\n"));
        assert!(
            written.len() > b"giving up\n".len(),
            "a stack payload must follow the message"
        );
        // Every cascade-selected slot receives the identical augmented bytes.
        for handle in &handles[1..] {
            assert_eq!(handle.contents(), written);
        }
    }

    #[test]
    fn short_table_rejects_out_of_range_severity() {
        let slots: Vec<Box<dyn Sink>> = (0..3)
            .map(|_| Box::new(MemorySink::new()) as Box<dyn Sink>)
            .collect();
        let dispatcher = CascadeDispatcher::new(slots, true);
        let result = dispatcher.dispatch(Severity::Debug, b"x\n");
        assert!(matches!(result, Err(Error::UnknownSeverity(4))));
    }

    #[test]
    fn single_dispatcher_ignores_severity_for_routing() {
        let sink = MemorySink::new();
        let dispatcher = SingleDispatcher::new(Box::new(sink.clone()));
        dispatcher.dispatch(Severity::Info, b"a\n").unwrap();
        dispatcher.dispatch(Severity::Error, b"b\n").unwrap();
        assert_eq!(sink.take_string(), "a\nb\n");
    }
}
