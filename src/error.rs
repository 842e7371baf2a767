// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error taxonomy for the logfan logging system.
//!
//! Three failure classes exist:
//!
//! - [`Error::InvalidSeverity`]: a severity could not be parsed from text.
//!   Recoverable; the caller decides what to do with it.
//! - [`Error::Io`]: a sink could not be created or written. Fatal during
//!   setup (there is no degraded mode without a working sink), reported and
//!   swallowed during emission.
//! - [`Error::UnknownSeverity`]: a dispatch-table index was out of range.
//!   This indicates a programming error (a mis-sized slot table), not bad
//!   user input.

/// The error type for logfan operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Text matched neither a known severity name nor an ordinal string.
    #[error("unable to parse severity from {0:?}")]
    InvalidSeverity(String),

    /// A severity ordinal had no slot in the dispatch table.
    #[error("unknown severity ordinal {0}")]
    UnknownSeverity(u8),

    /// Sink creation or a sink write failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/*
Boilerplate notes.

# Error

Clone is out: std::io::Error is not Clone.
PartialEq/Eq are out for the same reason, and error equality is rarely meaningful.
Display and std::error::Error come from thiserror.
Send/Sync hold automatically; all payloads are Send + Sync.
*/
