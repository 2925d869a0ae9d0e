//! A small line-oriented logger the emitter can delegate to.
//!
//! Every call produces exactly one line:
//!
//! ```text
//! [prefix][YYYY/MM/DD ][HH:MM:SS[.uuuuuu] ]message\n
//! ```
//!
//! With [`LogFlags::msg_prefix`] the prefix moves from the start of the line
//! to just before the message. A trailing newline is only added when the
//! message does not already end with one.
//!
//! The logger can also be installed as the process's [`log`] backend with
//! [`LineLogger::install`].

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDateTime, Utc};
use log::{LevelFilter, Metadata, Record};
use serde::Deserialize;

use crate::io::{OutputTarget, StderrOutput, StdoutOutput};

/// Which parts of the header a [`LineLogger`] prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogFlags {
    /// Print the date as `YYYY/MM/DD`
    pub date: bool,
    /// Print the time as `HH:MM:SS`
    pub time: bool,
    /// Append microseconds to the time; implies `time`
    pub microseconds: bool,
    /// Use UTC instead of the local time zone
    pub utc: bool,
    /// Put the prefix right before the message instead of at line start
    pub msg_prefix: bool,
}

impl LogFlags {
    /// No header at all; only the prefix and the message.
    pub const NONE: LogFlags = LogFlags {
        date: false,
        time: false,
        microseconds: false,
        utc: false,
        msg_prefix: false,
    };

    /// Date and time, local zone.
    pub const STANDARD: LogFlags = LogFlags {
        date: true,
        time: true,
        ..LogFlags::NONE
    };

    fn prints_time(&self) -> bool {
        self.time || self.microseconds
    }

    fn has_header(&self) -> bool {
        self.date || self.prints_time()
    }
}

impl Default for LogFlags {
    fn default() -> Self {
        LogFlags::STANDARD
    }
}

struct LoggerState {
    prefix: String,
    flags: LogFlags,
    output: Box<dyn Write + Send>,
}

/// A configurable logger that writes one line per message.
///
/// Writes are serialized behind a mutex, so a single logger can be shared by
/// reference between emitters and threads.
pub struct LineLogger {
    id: String,
    level: LevelFilter,
    state: Mutex<LoggerState>,
}

impl LineLogger {
    /// Create a logger writing to `output`.
    pub fn new(output: Box<dyn Write + Send>, prefix: impl Into<String>, flags: LogFlags) -> Self {
        Self::with_id("logger", output, prefix, flags)
    }

    /// Create a logger writing to whatever `target` opens.
    ///
    /// File targets are appended to when `append` is set, truncated otherwise.
    pub fn open(
        target: &dyn OutputTarget,
        append: bool,
        prefix: impl Into<String>,
        flags: LogFlags,
    ) -> io::Result<Self> {
        let output = if append {
            target.open_append()?
        } else {
            target.open_overwrite()?
        };
        Ok(Self::with_id(target.id(), output, prefix, flags))
    }

    /// Create a logger writing to stdout.
    pub fn stdout(prefix: impl Into<String>, flags: LogFlags) -> Self {
        Self::with_id(StdoutOutput::ID, Box::new(io::stdout()), prefix, flags)
    }

    /// Create a logger writing to stderr.
    pub fn stderr(prefix: impl Into<String>, flags: LogFlags) -> Self {
        Self::with_id(StderrOutput::ID, Box::new(io::stderr()), prefix, flags)
    }

    fn with_id(
        id: impl Into<String>,
        output: Box<dyn Write + Send>,
        prefix: impl Into<String>,
        flags: LogFlags,
    ) -> Self {
        Self {
            id: id.into(),
            level: LevelFilter::Trace,
            state: Mutex::new(LoggerState {
                prefix: prefix.into(),
                flags,
                output,
            }),
        }
    }

    /// Set the most verbose level accepted when used as a `log` backend.
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Identifier of the output this logger writes to.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn prefix(&self) -> String {
        self.lock().prefix.clone()
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.lock().prefix = prefix.into();
    }

    pub fn flags(&self) -> LogFlags {
        self.lock().flags
    }

    pub fn set_flags(&self, flags: LogFlags) {
        self.lock().flags = flags;
    }

    /// Write `msg` as one line, ignoring any output failure.
    pub fn println(&self, msg: impl AsRef<[u8]>) {
        let _ = self.try_println(msg);
    }

    /// Write `msg` as one line and report output failures.
    pub fn try_println(&self, msg: impl AsRef<[u8]>) -> io::Result<()> {
        let mut state = self.lock();
        let now = if state.flags.utc {
            Utc::now().naive_utc()
        } else {
            Local::now().naive_local()
        };
        let line = format_line(&state.prefix, state.flags, now, msg.as_ref());
        state.output.write_all(&line)?;
        state.output.flush()
    }

    /// Install this logger as the global `log` backend.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        // The guarded writer carries no invariant a panicking writer could break.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for LineLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("LineLogger")
            .field("id", &self.id)
            .field("level", &self.level)
            .field("prefix", &state.prefix)
            .field("flags", &state.flags)
            .finish_non_exhaustive()
    }
}

impl log::Log for LineLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.println(format!(
            "{} {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
    }

    fn flush(&self) {
        let _ = self.lock().output.flush();
    }
}

/// Build one complete log line for `msg` logged at `now`.
pub(crate) fn format_line(
    prefix: &str,
    flags: LogFlags,
    now: NaiveDateTime,
    msg: &[u8],
) -> Vec<u8> {
    let mut line = Vec::with_capacity(prefix.len() + 27 + msg.len() + 1);

    if !flags.msg_prefix {
        line.extend_from_slice(prefix.as_bytes());
    }
    if flags.has_header() {
        let mut header = String::with_capacity(27);
        if flags.date {
            header.push_str(&now.format("%Y/%m/%d ").to_string());
        }
        if flags.prints_time() {
            header.push_str(&now.format("%H:%M:%S").to_string());
            if flags.microseconds {
                header.push_str(&now.format("%.6f").to_string());
            }
            header.push(' ');
        }
        line.extend_from_slice(header.as_bytes());
    }
    if flags.msg_prefix {
        line.extend_from_slice(prefix.as_bytes());
    }

    line.extend_from_slice(msg);
    if !msg.ends_with(b"\n") {
        line.push(b'\n');
    }
    line
}
