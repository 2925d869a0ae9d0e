//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::EmitError;

/// A diagnostic wrapper for emit errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct EmitDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<EmitError> for EmitDiagnostic {
    fn from(e: EmitError) -> Self {
        match e {
            EmitError::Io {
                stage,
                target,
                source,
            } => EmitDiagnostic {
                message: format!("[{}] on '{}'", stage, target),
                source: Some(Box::new(source)),
                help: Some("Check that the output exists and is writable".into()),
                severity: Severity::Error,
            },
            EmitError::Config {
                stage,
                origin,
                source,
            } => EmitDiagnostic {
                message: format!("[{}] configuration '{}'", stage, origin),
                source: Some(source),
                help: Some("Check the target kind, path and logger settings".into()),
                severity: Severity::Error,
            },
            other @ (EmitError::TargetMismatch { .. } | EmitError::MissingLogger) => {
                EmitDiagnostic {
                    message: other.to_string(),
                    source: None,
                    help: Some("Call the emit operation that matches the configured target".into()),
                    severity: Severity::Error,
                }
            }
        }
    }
}

impl From<EmitError> for miette::Report {
    fn from(e: EmitError) -> Self {
        miette::Report::new(EmitDiagnostic::from(e))
    }
}
