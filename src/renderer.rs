// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token-based line rendering.
//!
//! The core depends on rendering only through the [`Renderer`] trait: a pure
//! function from a [`Record`] to a display string, invoked exactly once per
//! passed-filter emission while the emission mutex is held. [`TokenRenderer`]
//! is the stock implementation, a simple template-substitution facility that
//! concatenates the output of a fixed token sequence.
//!
//! # Example
//!
//! ```
//! use logfan::{CallSite, Record, Renderer, Severity, Token, TokenRenderer};
//!
//! let renderer = TokenRenderer::new(vec![
//!     Token::SeverityName { long: true },
//!     Token::Literal(" ".to_string()),
//!     Token::Message,
//! ]);
//! let record = Record::new(
//!     Severity::Warning,
//!     "disk almost full".to_string(),
//!     CallSite::new("main.rs", 3, "main"),
//! );
//! assert_eq!(renderer.format(&record), "WARNING disk almost full");
//! ```

use crate::record::Record;
use std::path::Path;

/// Converts a [`Record`] into a display string.
///
/// Implementations must be pure functions of their input: no I/O, and two
/// invocations on the same record produce byte-identical output.
pub trait Renderer: Send + Sync + std::fmt::Debug {
    fn format(&self, record: &Record) -> String;
}

/// One substitutable element of a rendered log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The severity name; `long` selects `WARNING` over `W`.
    SeverityName { long: bool },
    /// The record timestamp, rendered with a `chrono` format string.
    Date(String),
    /// The call-site file; `long` selects the full path over the base name.
    File { long: bool },
    /// The call-site function, rendered as `name()`.
    Function,
    /// The call-site line number.
    Line,
    /// A fixed string.
    Literal(String),
    /// The raw message.
    Message,
}

impl Token {
    fn render(&self, record: &Record, out: &mut String) {
        use std::fmt::Write;
        match self {
            Token::SeverityName { long: true } => out.push_str(record.severity().name()),
            Token::SeverityName { long: false } => out.push(record.severity().single()),
            Token::Date(format) => {
                let _ = write!(out, "{}", record.timestamp().format(format));
            }
            Token::File { long: true } => out.push_str(record.callsite().file()),
            Token::File { long: false } => {
                let base = Path::new(record.callsite().file())
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default();
                out.push_str(&base);
            }
            Token::Function => {
                let _ = write!(out, "{}()", record.callsite().function());
            }
            Token::Line => {
                let _ = write!(out, "{}", record.callsite().line());
            }
            Token::Literal(text) => out.push_str(text),
            Token::Message => out.push_str(record.message()),
        }
    }
}

/// A [`Renderer`] that concatenates the output of a token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRenderer {
    tokens: Vec<Token>,
}

impl TokenRenderer {
    pub fn new(tokens: Vec<Token>) -> TokenRenderer {
        TokenRenderer { tokens }
    }
}

impl Default for TokenRenderer {
    /// The stock line shape:
    /// `{S}{date} {file}#{function}():{line}: {message}`, where `{S}` is the
    /// single-character severity and the date carries microseconds.
    ///
    /// The fractional seconds always render as six digits; trailing zeros
    /// are not trimmed.
    fn default() -> TokenRenderer {
        TokenRenderer::new(vec![
            Token::SeverityName { long: false },
            Token::Date("%Y-%m-%d %H:%M:%S%.6f".to_string()),
            Token::Literal(" ".to_string()),
            Token::File { long: false },
            Token::Literal("#".to_string()),
            Token::Function,
            Token::Literal(":".to_string()),
            Token::Line,
            Token::Literal(": ".to_string()),
            Token::Message,
        ])
    }
}

impl Renderer for TokenRenderer {
    fn format(&self, record: &Record) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            token.render(record, &mut out);
        }
        out
    }
}
