//! # thingio
//!
//! Emit a message through one of three interchangeable outputs.
//!
//! ## Overview
//!
//! thingio provides:
//! - **Emitter**: holds a message and exactly one output target
//! - **File target**: creates (or truncates) a path and writes the raw bytes
//! - **Logger target**: hands the message to a borrowed [`LineLogger`]
//! - **Sink target**: one `write` call against any [`std::io::Write`]
//! - **RecordingSink**: an in-memory `Write` for asserting on emitted bytes
//! - **Configuration**: describe an emitter in JSON, YAML or TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use thingio::{Emitter, RecordingSink};
//!
//! // The default emitter writes to stdout.
//! let mut emitter = Emitter::new("hello");
//! emitter.emit_to_sink().unwrap();
//!
//! // Tests swap stdout for a recorder.
//! let mut recorder = RecordingSink::new();
//! Emitter::to_sink("hello", "recorder", &mut recorder)
//!     .emit_to_sink()
//!     .unwrap();
//! assert_eq!(recorder.records(), &[b"hello".to_vec()]);
//! ```
//!
//! ## Features
//!
//! - `json` - Load configuration from JSON (enabled by default)
//! - `yaml` - Load configuration from YAML (enabled by default)
//! - `toml` - Load configuration from TOML
//! - `miette` - Pretty error reporting with miette
//!
//! ## Logging
//!
//! Emit operations report successes through the [`log`] facade at `debug`
//! and `trace` level. Failures are returned, never logged. The crate does not
//! install a logger; a [`LineLogger`] can be installed with
//! [`LineLogger::install`].

pub mod config;
pub mod emitter;
pub mod error;
pub mod io;
pub mod logger;

// Re-exports for convenience
pub use config::{ConfigFormat, EmitterConfig, LoggerConfig, TargetConfig};
pub use emitter::{Emitter, Target};
pub use error::{EmitError, Stage, TargetKind};
pub use io::{FileOutput, OutputTarget, RecordingSink, StderrOutput, StdoutOutput};
pub use logger::{LineLogger, LogFlags};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::EmitDiagnostic;
