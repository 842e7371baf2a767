// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rotating per-tag log files.
//!
//! [`FileSink::create`] is the file sink factory: it ensures the log
//! directory exists (with restrictive permissions), derives a deterministic,
//! collision-resistant file name, and opens the file in create/truncate mode.
//! The name format is a compatibility surface for tooling that parses log
//! directories:
//!
//! ```text
//! {process}.{shorthost}.{user}.log.{tag}.{YYYYMMDD-HHMMSS}.{pid}
//! ```
//!
//! Hostname and username are resolved once per process and fall back to
//! `"???"` when resolution fails. The timestamp and pid make re-invocations
//! unique per call, which is what makes one sink per severity tag (and fresh
//! files on every process start) work without coordination.
//!
//! A `FileSink` is never explicitly closed or flushed; it lives until
//! process exit.

use crate::error::Error;
use crate::sink::Sink;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Fallback for identity fields that cannot be resolved.
const UNRESOLVED: &str = "???";

fn short_hostname() -> &'static str {
    static HOSTNAME: OnceLock<String> = OnceLock::new();
    HOSTNAME.get_or_init(|| {
        hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .map(|name| match name.split_once('.') {
                Some((short, _)) => short.to_string(),
                None => name,
            })
            .unwrap_or_else(|| UNRESOLVED.to_string())
    })
}

fn username() -> &'static str {
    static USERNAME: OnceLock<String> = OnceLock::new();
    USERNAME.get_or_init(|| {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| UNRESOLVED.to_string())
    })
}

fn process_name() -> &'static str {
    static PROCESS: OnceLock<String> = OnceLock::new();
    PROCESS.get_or_init(|| {
        std::env::args()
            .next()
            .as_deref()
            .map(Path::new)
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNRESOLVED.to_string())
    })
}

fn log_file_name(tag: &str) -> String {
    let now = chrono::Local::now();
    format!(
        "{}.{}.{}.log.{}.{}.{}",
        process_name(),
        short_hostname(),
        username(),
        tag,
        now.format("%Y%m%d-%H%M%S"),
        std::process::id(),
    )
}

/// A [`Sink`] backed by one freshly created log file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: File,
}

impl FileSink {
    /// Creates the log directory (restrictive permissions, intermediate
    /// directories included) and opens a new log file for `tag` inside it.
    ///
    /// Fails with [`Error::Io`] if the directory or file cannot be created;
    /// setup has no degraded mode without a working sink, so callers are
    /// expected to propagate this.
    pub fn create(directory: impl AsRef<Path>, tag: &str) -> Result<FileSink, Error> {
        let directory = directory.as_ref();
        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(directory)?;

        let path = directory.join(log_file_name(tag));
        let file = File::create(&path)?;
        Ok(FileSink { path, file })
    }

    /// The path of the created file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, bytes: &[u8]) -> std::io::Result<()> {
        // &File implements Write; the cursor advances per write, so this
        // appends as long as the caller serializes (the logger does).
        (&self.file).write_all(bytes)
    }
}
