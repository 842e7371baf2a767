// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# logfan

logfan is a leveled, severity-filtered logging library with multi-sink
fan-out.

# The model

Callers emit messages tagged with one of five severities (`Fatal`, `Error`,
`Warning`, `Info`, `Debug`, most severe first). The [`Logger`] decides per
call whether the message passes the current threshold; passing messages are
snapshotted into a [`Record`], rendered to a line by a [`Renderer`], and
handed to a [`Dispatch`] implementation that fans the bytes out to one or
more [`Sink`]s.

The distinguishing piece is the [`CascadeDispatcher`]: it holds one sink per
severity level and, with the cascade enabled, writes each line to its own
severity's sink *and every less severe one*. Each per-severity log file
thereby accumulates every message at its own severity or more severe: the
Info file holds Info, Warning, Error and Fatal lines; the Error file holds
only Error and Fatal.

Fatal emission is special twice over: the dispatched bytes are augmented
with a stack dump, and after dispatch (successful or not) the logger prints
an abort notice to stderr and terminates the process with exit status 255.
A fatal call never returns.

# Getting started

The process-wide logger works without setup and writes to stderr:

```
logfan::info!("hello, {}!", "world");
```

File logging is configured once, early, through [`global::reconfigure`]:

```no_run
use logfan::{Config, Severity};

let config = Config {
    log_to_stderr: false,
    directory: "/var/log/myapp".into(),
    threshold: Severity::Debug,
    ..Config::default()
};
logfan::global::reconfigure(&config)?;
logfan::warning!("this lands in WARNING, INFO and DEBUG files");
# Ok::<(), logfan::Error>(())
```

For dependency injection, construct a [`Logger`] directly and pass it by
reference; each logger carries its own threshold, renderer and dispatcher.

# Concurrency

All emission is serialized through one mutex per logger: an emission's full
fan-out completes before the next emission's begins, so sinks never see
interleaved partial lines. The trade-off is deliberate: a blocked file write
blocks every concurrent emission. There is no async write-behind, no
buffering and no rotation beyond fresh files per process start.
*/

mod config;
mod dispatch;
mod error;
mod file_sink;
pub mod global;
mod logger;
mod macros;
mod memory_sink;
mod record;
mod renderer;
mod severity;
mod sink;

pub use config::Config;
pub use dispatch::{CascadeDispatcher, Dispatch, SingleDispatcher};
pub use error::Error;
pub use file_sink::FileSink;
pub use logger::{FATAL_EXIT_STATUS, Logger};
pub use memory_sink::MemorySink;
pub use record::{CallSite, Record};
pub use renderer::{Renderer, Token, TokenRenderer};
pub use severity::Severity;
pub use sink::{Sink, StderrSink, TeeSink};
