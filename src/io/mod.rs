//! Output abstractions the emitter writes through.
//!
//! This module provides:
//! - `OutputTarget`: Trait for destinations that can be opened for writing
//! - Standard implementations for files and stdout/stderr
//! - `RecordingSink`: an in-memory `Write` double for tests

mod memory;
mod output;
mod std_io;

pub use memory::RecordingSink;
pub use output::OutputTarget;
pub use std_io::{FileOutput, StderrOutput, StdoutOutput};
