// SPDX-License-Identifier: MIT OR Apache-2.0

//! Emission macros.
//!
//! One macro per severity level, all emitting through the process-wide
//! logger from [`global`](crate::global). The macros exist for one reason
//! the plain methods cannot cover: they expand at the call site, so they can
//! capture the enclosing function's name along with `file!()` and `line!()`.
//! Records emitted through [`Logger`](crate::Logger) methods instead carry
//! `"???"` in the function field.
//!
//! Arguments are standard `format!` syntax. The format arguments are not
//! evaluated into a string unless the message passes the threshold.

/// Captures the current call site, including the enclosing function name.
///
/// The function name is recovered by probing `type_name` of a local item,
/// which names it as `path::to::enclosing::__here`.
#[doc(hidden)]
#[macro_export]
macro_rules! __callsite {
    () => {{
        fn __here() {}
        fn __name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = __name_of(__here);
        let name = name.strip_suffix("::__here").unwrap_or(name);
        $crate::CallSite::new(::core::file!(), ::core::line!(), name)
    }};
}

/// Logs at Fatal severity through the process-wide logger and terminates
/// the process with exit status 255. Never returns.
///
/// The dispatched line is augmented with a stack dump, and an abort notice
/// with a backtrace goes to stderr regardless of whether the dispatch
/// succeeded.
///
/// ```no_run
/// logfan::fatal!("unrecoverable: {}", "lost the database");
/// ```
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        $crate::global::current().emit_fatal(
            ::core::format_args!($($arg)*),
            $crate::__callsite!(),
        )
    };
}

/// Logs at Error severity through the process-wide logger.
///
/// ```
/// logfan::error!("request failed with status {}", 502);
/// ```
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::global::current().emit(
            $crate::Severity::Error,
            ::core::format_args!($($arg)*),
            $crate::__callsite!(),
        )
    };
}

/// Logs at Warning severity through the process-wide logger.
///
/// ```
/// logfan::warning!("retrying ({} attempts left)", 2);
/// ```
#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => {
        $crate::global::current().emit(
            $crate::Severity::Warning,
            ::core::format_args!($($arg)*),
            $crate::__callsite!(),
        )
    };
}

/// Logs at Info severity through the process-wide logger.
///
/// ```
/// logfan::info!("listening on {}", "0.0.0.0:8080");
/// ```
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::global::current().emit(
            $crate::Severity::Info,
            ::core::format_args!($($arg)*),
            $crate::__callsite!(),
        )
    };
}

/// Logs at Debug severity through the process-wide logger.
///
/// Suppressed under the default Info threshold; raise it with
/// [`global::set_severity`](crate::global::set_severity) or via
/// [`global::reconfigure`](crate::global::reconfigure).
///
/// ```
/// logfan::debug!("cache miss for key {:?}", "user:42");
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::global::current().emit(
            $crate::Severity::Debug,
            ::core::format_args!($($arg)*),
            $crate::__callsite!(),
        )
    };
}
