// SPDX-License-Identifier: MIT OR Apache-2.0

//! The severity scale.
//!
//! Ordinals run from 0 (most severe, [`Severity::Fatal`]) to
//! [`Severity::COUNT`]` - 1` (least severe, [`Severity::Debug`]). The derived
//! `Ord` therefore reads backwards from intuition: `Fatal < Debug`. A logger
//! threshold of `Warning` admits `Fatal`, `Error` and `Warning` and
//! suppresses `Info` and `Debug`.

use crate::error::Error;
use std::str::FromStr;

/// Severity of a log event. Lower ordinal means more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    /// Unrecoverable; emission terminates the process.
    Fatal = 0,
    /// Runtime error worth persisting.
    Error = 1,
    /// Suspicious condition.
    Warning = 2,
    /// Normal operational messages.
    Info = 3,
    /// Detailed debugging.
    Debug = 4,
}

const NAMES: [&str; Severity::COUNT] = ["FATAL", "ERROR", "WARNING", "INFO", "DEBUG"];

/// Marker rendered for ordinals outside the severity scale.
pub(crate) const UNKNOWN_MARKER: &str = "???";

impl Severity {
    /// Number of severity levels.
    pub const COUNT: usize = 5;

    /// All severities, most severe first.
    pub const ALL: [Severity; Severity::COUNT] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Debug,
    ];

    /// The ordinal, 0 (`Fatal`) through 4 (`Debug`).
    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// The severity with the given ordinal, if any.
    pub const fn from_ordinal(ordinal: u8) -> Option<Severity> {
        match ordinal {
            0 => Some(Severity::Fatal),
            1 => Some(Severity::Error),
            2 => Some(Severity::Warning),
            3 => Some(Severity::Info),
            4 => Some(Severity::Debug),
            _ => None,
        }
    }

    /// Canonical upper-case name.
    pub const fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Name for a raw ordinal; out-of-range ordinals render as `"???"`
    /// rather than failing.
    pub fn name_of(ordinal: u8) -> &'static str {
        match Severity::from_ordinal(ordinal) {
            Some(s) => s.name(),
            None => UNKNOWN_MARKER,
        }
    }

    /// First character of the canonical name, e.g. `W` for `Warning`.
    pub fn single(self) -> char {
        // Names are non-empty ASCII by construction.
        self.name().as_bytes()[0] as char
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = Error;

    /// Parses a severity from its name (case-insensitively) or from its
    /// ordinal's decimal string.
    ///
    /// ```
    /// use logfan::Severity;
    /// assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
    /// assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
    /// assert_eq!("2".parse::<Severity>().unwrap(), Severity::Warning);
    /// assert!("bogus".parse::<Severity>().is_err());
    /// ```
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let upper = text.to_ascii_uppercase();
        for severity in Severity::ALL {
            if severity.name() == upper || severity.ordinal().to_string() == upper {
                return Ok(severity);
            }
        }
        Err(Error::InvalidSeverity(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_order() {
        assert!(Severity::Fatal < Severity::Error);
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
        assert!(Severity::Info < Severity::Debug);
    }

    #[test]
    fn ordinals_are_contiguous() {
        for (expected, severity) in Severity::ALL.iter().enumerate() {
            assert_eq!(severity.ordinal() as usize, expected);
            assert_eq!(Severity::from_ordinal(expected as u8), Some(*severity));
        }
        assert_eq!(Severity::from_ordinal(Severity::COUNT as u8), None);
    }

    #[test]
    fn names() {
        assert_eq!(Severity::Fatal.to_string(), "FATAL");
        assert_eq!(Severity::Debug.name(), "DEBUG");
        assert_eq!(Severity::Warning.single(), 'W');
        assert_eq!(Severity::name_of(7), "???");
    }

    #[test]
    fn parse_name_case_insensitive() {
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("Fatal".parse::<Severity>().unwrap(), Severity::Fatal);
    }

    #[test]
    fn parse_ordinal() {
        assert_eq!("2".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("0".parse::<Severity>().unwrap(), Severity::Fatal);
        assert_eq!("4".parse::<Severity>().unwrap(), Severity::Debug);
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["bogus", "", "5", "-1", "FATALITY"] {
            let err = bad.parse::<Severity>().unwrap_err();
            assert!(matches!(err, Error::InvalidSeverity(_)), "{bad:?}: {err}");
        }
    }
}
