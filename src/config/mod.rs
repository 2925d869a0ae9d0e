//! Configuration types for emitters.
//!
//! This module provides:
//! - `EmitterConfig`: Settings for a single emitter and its target
//! - `LoggerConfig`: Settings for the line logger a logger target uses
//! - `ConfigFormat`: The document formats a configuration can be loaded from

mod document;
mod format;

pub use document::{EmitterConfig, LoggerConfig, TargetConfig};
pub use format::{ConfigFormat, FormatError};
