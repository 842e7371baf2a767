// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide logger.
//!
//! One [`Logger`] instance serves the whole process. It is lazily
//! initialized on first use with a stderr-backed single-slot dispatcher,
//! the stock renderer and an Info threshold, so logging works before any
//! configuration happens. [`reconfigure`] replaces it wholesale with a
//! logger built from a [`Config`]; it is meant to run exactly once, early,
//! before emission gets going.
//!
//! The slot hands out `Arc` clones, so an emission that raced a
//! reconfiguration finishes against the logger it started with; nothing is
//! torn down under it.
//!
//! # Reconfiguration constraints
//!
//! Reconfiguring twice is unsupported. The second call will not corrupt
//! anything (the slot swap is atomic and old emissions complete against the
//! old logger), but per-severity file sets from the first call stay open
//! until process exit, and no ordering holds between lines split across the
//! two generations.
//!
//! # Examples
//!
//! ```
//! // The default instance is ready without setup.
//! logfan::info!("hello from the default stderr logger");
//! ```

use crate::config::Config;
use crate::error::Error;
use crate::logger::Logger;
use crate::renderer::TokenRenderer;
use crate::severity::Severity;
use std::sync::{Arc, OnceLock, RwLock};

static CURRENT: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Logger>> {
    CURRENT.get_or_init(|| RwLock::new(Arc::new(Logger::to_stderr(Severity::Info))))
}

/// The current process-wide logger.
///
/// The returned `Arc` keeps the logger alive even across a concurrent
/// [`replace`], so holding on to it is safe (if rarely useful).
pub fn current() -> Arc<Logger> {
    slot()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Installs `logger` as the process-wide instance.
pub fn replace(logger: Arc<Logger>) {
    let mut guard = slot()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = logger;
}

/// Builds a logger from `config` (stock renderer) and installs it.
///
/// Sink creation failure propagates and leaves the previous logger in
/// place. Intended to be called at most once, before heavy emission; see
/// the module docs for what the second call does and does not guarantee.
pub fn reconfigure(config: &Config) -> Result<(), Error> {
    let dispatcher = config.build_dispatcher()?;
    replace(Arc::new(Logger::new(
        config.threshold,
        Box::new(TokenRenderer::default()),
        dispatcher,
    )));
    Ok(())
}

/// Changes the process-wide logger's threshold.
pub fn set_severity(severity: Severity) {
    current().set_severity(severity);
}

/// The process-wide logger's current threshold.
pub fn severity() -> Severity {
    current().severity()
}
