// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record and call-site types.
//!
//! A [`Record`] is the immutable snapshot of one log event: severity, raw
//! message, call site and emission timestamp. It is built once per emission
//! that passes the threshold, handed to the renderer, and discarded.
//! Records are owned exclusively by the call that produced them; nothing in
//! the pipeline shares or retains one.

use crate::severity::Severity;
use chrono::{DateTime, Local};

/// Placeholder used when a call-site field cannot be acquired.
pub(crate) const UNKNOWN_CALLSITE: &str = "???";

/// Where an emission call originated.
///
/// `file` and `line` come from `#[track_caller]` on the emission methods, so
/// they are available even through the plain method API. The enclosing
/// function's name is only discoverable by a macro expanded at the call site;
/// when a record is produced without one, `function` stays `"???"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    pub(crate) file: &'static str,
    pub(crate) line: u32,
    pub(crate) function: &'static str,
}

impl CallSite {
    /// Captures the immediate caller's file and line.
    #[track_caller]
    pub fn caller() -> CallSite {
        let location = std::panic::Location::caller();
        CallSite {
            file: location.file(),
            line: location.line(),
            function: UNKNOWN_CALLSITE,
        }
    }

    /// A call site with every field filled in, for macro use.
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> CallSite {
        CallSite {
            file,
            line,
            function,
        }
    }

    /// Source file path.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Source line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Enclosing function name, or `"???"` when unknown.
    pub fn function(&self) -> &'static str {
        self.function
    }
}

/// An immutable snapshot of one log event.
#[derive(Debug, Clone)]
pub struct Record {
    severity: Severity,
    message: String,
    callsite: CallSite,
    timestamp: DateTime<Local>,
}

impl Record {
    /// Creates a record stamped with the current local time.
    pub fn new(severity: Severity, message: String, callsite: CallSite) -> Record {
        Record {
            severity,
            message,
            callsite,
            timestamp: Local::now(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn callsite(&self) -> &CallSite {
        &self.callsite
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/*
Boilerplate notes for Record:

IMPLEMENTED:
- Debug: derived, essential for diagnostics
- Clone: derived, cheap enough and useful in tests

NOT IMPLEMENTED:
- Copy: owns a String
- PartialEq/Eq/Hash: the timestamp makes equality useless in practice
- Ord/PartialOrd: no meaningful total order over records
- Default: a record without a severity, message and call site is not a thing
- Display: rendering is the Renderer's job; a second notion of "the text of
  a record" here would invite drift between the two
*/
