// SPDX-License-Identifier: MIT OR Apache-2.0

//! Setup-time configuration.
//!
//! [`Config`] is plain data; whatever parses flags, environment or files
//! lives outside this crate and hands one of these in. The interesting part
//! is [`Config::build_dispatcher`], which turns the three booleans into the
//! dispatcher shapes the original tooling knew:
//!
//! | `log_to_stderr` | `single_file` | result                                   |
//! |-----------------|---------------|------------------------------------------|
//! | `true`          | any           | one stderr sink                          |
//! | `false`         | `true`        | one tagged log file                      |
//! | `false`         | `false`       | five per-severity files, cascade enabled |
//!
//! `also_stderr` mirrors output to stderr in the file modes: the single file
//! is tee'd directly, and in per-severity mode the Debug slot is tee'd (the
//! Debug file sees every cascaded line, so its tee sees everything too).

use crate::dispatch::{CascadeDispatcher, Dispatch, SingleDispatcher};
use crate::error::Error;
use crate::file_sink::FileSink;
use crate::severity::Severity;
use crate::sink::{Sink, StderrSink, TeeSink};
use std::path::PathBuf;

/// Logging configuration, supplied at most once, before first emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log to stderr only; the file settings below are ignored.
    pub log_to_stderr: bool,
    /// In a file mode, also mirror every line to stderr.
    pub also_stderr: bool,
    /// One shared log file instead of per-severity files.
    pub single_file: bool,
    /// Directory for log files, created if missing.
    pub directory: PathBuf,
    /// File tag used in single-file mode.
    pub tag: String,
    /// Initial severity threshold.
    pub threshold: Severity,
}

impl Default for Config {
    /// Stderr logging at Info, tag `ALL`, current directory. Matches the
    /// defaults of the original command-line flags.
    fn default() -> Config {
        Config {
            log_to_stderr: true,
            also_stderr: false,
            single_file: false,
            directory: PathBuf::from("."),
            tag: "ALL".to_string(),
            threshold: Severity::Info,
        }
    }
}

impl Config {
    /// Builds the dispatcher this configuration describes.
    ///
    /// Sink creation failure is fatal to setup: there is no degraded mode
    /// without a working sink, so the error propagates instead of silently
    /// falling back to stderr.
    pub fn build_dispatcher(&self) -> Result<Box<dyn Dispatch>, Error> {
        if self.log_to_stderr {
            return Ok(Box::new(SingleDispatcher::new(Box::new(StderrSink::new()))));
        }

        if self.single_file {
            let file = FileSink::create(&self.directory, &self.tag)?;
            let sink: Box<dyn Sink> = if self.also_stderr {
                Box::new(TeeSink::new(Box::new(file), Box::new(StderrSink::new())))
            } else {
                Box::new(file)
            };
            return Ok(Box::new(SingleDispatcher::new(sink)));
        }

        let mut slots: Vec<Box<dyn Sink>> = Vec::with_capacity(Severity::COUNT);
        for severity in Severity::ALL {
            let file = FileSink::create(&self.directory, severity.name())?;
            let slot: Box<dyn Sink> = if self.also_stderr && severity == Severity::Debug {
                // The Debug slot receives every cascaded line, so one tee
                // there mirrors the full stream.
                Box::new(TeeSink::new(Box::new(file), Box::new(StderrSink::new())))
            } else {
                Box::new(file)
            };
            slots.push(slot);
        }
        Ok(Box::new(CascadeDispatcher::new(slots, true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_stderr_at_info() {
        let config = Config::default();
        assert!(config.log_to_stderr);
        assert_eq!(config.threshold, Severity::Info);
        assert_eq!(config.tag, "ALL");
        // Building must not touch the filesystem.
        config.build_dispatcher().unwrap();
    }

    #[test]
    fn per_severity_mode_creates_one_file_per_level() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            log_to_stderr: false,
            directory: dir.path().to_path_buf(),
            ..Config::default()
        };
        config.build_dispatcher().unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), Severity::COUNT);
        for severity in Severity::ALL {
            let tag = format!(".log.{}.", severity.name());
            assert!(
                names.iter().any(|name| name.contains(&tag)),
                "missing file for {severity} in {names:?}"
            );
        }
    }

    #[test]
    fn single_file_mode_creates_exactly_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            log_to_stderr: false,
            single_file: true,
            tag: "EVERYTHING".to_string(),
            directory: dir.path().to_path_buf(),
            ..Config::default()
        };
        config.build_dispatcher().unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let name = entries[0]
            .as_ref()
            .unwrap()
            .file_name()
            .to_string_lossy()
            .into_owned();
        assert!(name.contains(".log.EVERYTHING."), "{name}");
    }

    #[test]
    fn unusable_directory_aborts_setup() {
        let dir = tempfile::tempdir().unwrap();
        let clash = dir.path().join("file-in-the-way");
        std::fs::write(&clash, b"x").unwrap();
        let config = Config {
            log_to_stderr: false,
            directory: clash,
            ..Config::default()
        };
        assert!(matches!(config.build_dispatcher(), Err(Error::Io(_))));
    }
}
