//! Error types for emit operations.
//!
//! This module provides:
//! - `Stage`: Indicates where an error occurred while emitting
//! - `TargetKind`: The kind of output an emitter is bound to
//! - `EmitError`: Every recoverable failure the crate reports

use std::fmt;
use std::io;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Error while creating or opening the output
    Open,
    Write,
    Flush,
    /// Error while parsing a configuration document
    Parse,
    /// Error while turning configuration into an emitter
    Resolve,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Open => write!(f, "Open"),
            Stage::Write => write!(f, "Write"),
            Stage::Flush => write!(f, "Flush"),
            Stage::Parse => write!(f, "Parse"),
            Stage::Resolve => write!(f, "Resolve"),
        }
    }
}

/// The kind of output an [`Emitter`](crate::Emitter) is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    File,
    Logger,
    Sink,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::File => write!(f, "file"),
            TargetKind::Logger => write!(f, "logger"),
            TargetKind::Sink => write!(f, "sink"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EmitError {
    /// Creating, writing or flushing an output failed.
    #[error("[{stage}] {target}: {source}")]
    Io {
        /// Stage where the error occurred
        stage: Stage,
        /// Identifier of the output (file path, "-" for stdout, etc.)
        target: String,
        #[source]
        source: io::Error,
    },

    /// An emit operation was called for a target the emitter is not bound to.
    #[error("emitter is bound to a {actual} target, cannot emit to a {expected}")]
    TargetMismatch {
        expected: TargetKind,
        actual: TargetKind,
    },

    /// The configuration selects a logger target but no logger was supplied.
    #[error("logger target configured but no logger was supplied")]
    MissingLogger,

    /// A configuration document could not be loaded or resolved.
    #[error("[{stage}] invalid configuration in {origin}: {source}")]
    Config {
        stage: Stage,
        /// Where the configuration came from (file path or "<str>")
        origin: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl EmitError {
    pub(crate) fn io(stage: Stage, target: impl Into<String>, source: io::Error) -> Self {
        EmitError::Io {
            stage,
            target: target.into(),
            source,
        }
    }

    pub(crate) fn config(
        stage: Stage,
        origin: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        EmitError::Config {
            stage,
            origin: origin.into(),
            source: source.into(),
        }
    }

    /// Stage where the error occurred, if it has one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            EmitError::Io { stage, .. } | EmitError::Config { stage, .. } => Some(*stage),
            EmitError::TargetMismatch { .. } | EmitError::MissingLogger => None,
        }
    }

    /// Check if this error came from the underlying I/O.
    pub fn is_io(&self) -> bool {
        matches!(self, EmitError::Io { .. })
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
