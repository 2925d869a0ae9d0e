//! Configuration for an emitter and the logger it may use.

use std::path::Path;
use std::sync::Arc;

use log::LevelFilter;
use serde::Deserialize;

use super::format::{self, ConfigFormat, FormatError};
use crate::emitter::Emitter;
use crate::error::{EmitError, Stage};
use crate::io::{FileOutput, OutputTarget, StderrOutput, StdoutOutput};
use crate::logger::{LineLogger, LogFlags};

const INLINE_ORIGIN: &str = "<inline>";

/// Configuration for a single emitter.
#[derive(Debug, Clone, Deserialize)]
pub struct EmitterConfig {
    /// Message to emit, verbatim
    pub message: String,
    /// Output the message goes to
    pub target: TargetConfig,
    /// Logger settings, used when `target.kind` is "logger"
    #[serde(default)]
    pub logger: Option<LoggerConfig>,
    #[serde(skip)]
    origin: Option<String>,
}

/// Configuration for the emitter's output.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Kind of output: "file", "logger", "stdout" (or "-"), "stderr"
    pub kind: String,
    /// File path (for file outputs)
    #[serde(default)]
    pub path: Option<String>,
}

/// Configuration for a [`LineLogger`].
#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub flags: LogFlags,
    /// "stdout" (or "-"), "stderr", or a file path
    #[serde(default = "default_logger_output")]
    pub output: String,
    /// Append to an existing log file instead of truncating it
    #[serde(default = "default_append")]
    pub append: bool,
    /// Level filter when installed as a `log` backend: "info", "debug", ...
    #[serde(default)]
    pub level: Option<String>,
}

fn default_logger_output() -> String {
    StderrOutput::ID.to_string()
}

fn default_append() -> bool {
    true
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            flags: LogFlags::default(),
            output: default_logger_output(),
            append: default_append(),
            level: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolvedKind {
    File,
    Logger,
    Stdout,
    Stderr,
}

impl ResolvedKind {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Some(ResolvedKind::File),
            "logger" | "log" => Some(ResolvedKind::Logger),
            "stdout" | "-" => Some(ResolvedKind::Stdout),
            "stderr" => Some(ResolvedKind::Stderr),
            _ => None,
        }
    }
}

impl TargetConfig {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            kind: "file".into(),
            path: Some(path.into()),
        }
    }

    pub fn logger() -> Self {
        Self::of_kind("logger")
    }

    pub fn stdout() -> Self {
        Self::of_kind("stdout")
    }

    pub fn stderr() -> Self {
        Self::of_kind("stderr")
    }

    fn of_kind(kind: &str) -> Self {
        Self {
            kind: kind.into(),
            path: None,
        }
    }
}

impl LoggerConfig {
    /// Resolve the `output` field into an output target.
    pub fn output_target(&self) -> Arc<dyn OutputTarget> {
        match self.output.as_str() {
            "-" | "stdout" => Arc::new(StdoutOutput::new()),
            "stderr" => Arc::new(StderrOutput::new()),
            path => Arc::new(FileOutput::new(path)),
        }
    }

    fn level_filter(&self, origin: &str) -> Result<LevelFilter, EmitError> {
        match self.level.as_deref() {
            None => Ok(LevelFilter::Trace),
            Some(level) => level
                .parse::<LevelFilter>()
                .map_err(|e| EmitError::config(Stage::Resolve, origin, e)),
        }
    }
}

impl EmitterConfig {
    /// Create a configuration for `message` going to `target`.
    pub fn new(message: impl Into<String>, target: TargetConfig) -> Self {
        Self {
            message: message.into(),
            target,
            logger: None,
            origin: None,
        }
    }

    /// Set the logger configuration.
    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Where this configuration was loaded from, for error messages.
    pub fn origin(&self) -> &str {
        self.origin.as_deref().unwrap_or(INLINE_ORIGIN)
    }

    /// Parse a configuration document held in memory.
    pub fn from_slice(format: ConfigFormat, bytes: &[u8]) -> Result<Self, EmitError> {
        format::deserialize(format, bytes)
            .map_err(|e| EmitError::config(Stage::Parse, INLINE_ORIGIN, e))
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, EmitError> {
        Self::from_slice(ConfigFormat::Json, s.as_bytes())
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, EmitError> {
        Self::from_slice(ConfigFormat::Yaml, s.as_bytes())
    }

    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, EmitError> {
        Self::from_slice(ConfigFormat::Toml, s.as_bytes())
    }

    /// Load a configuration file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EmitError> {
        let path = path.as_ref();
        let origin = path.to_string_lossy().into_owned();

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            EmitError::config(
                Stage::Parse,
                origin.as_str(),
                FormatError::UnknownExtension(origin.clone()),
            )
        })?;
        let bytes =
            std::fs::read(path).map_err(|e| EmitError::io(Stage::Open, origin.as_str(), e))?;

        let mut config: Self = format::deserialize(format, &bytes)
            .map_err(|e| EmitError::config(Stage::Parse, origin.as_str(), e))?;
        config.origin = Some(origin);
        Ok(config)
    }

    /// Build the logger this configuration asks for.
    ///
    /// Returns `None` unless the target kind is "logger". A logger target
    /// without a `logger` section gets [`LoggerConfig::default`].
    pub fn build_logger(&self) -> Result<Option<LineLogger>, EmitError> {
        if self.resolve_kind()? != ResolvedKind::Logger {
            return Ok(None);
        }

        let defaults = LoggerConfig::default();
        let cfg = self.logger.as_ref().unwrap_or(&defaults);
        let level = cfg.level_filter(self.origin())?;
        let target = cfg.output_target();

        let logger = LineLogger::open(target.as_ref(), cfg.append, cfg.prefix.clone(), cfg.flags)
            .map_err(|e| EmitError::io(Stage::Open, target.id(), e))?
            .with_level(level);
        Ok(Some(logger))
    }

    /// Build the emitter this configuration describes.
    ///
    /// `logger` is only consulted for logger targets, where it is required.
    pub fn build_emitter<'a>(
        &self,
        logger: Option<&'a LineLogger>,
    ) -> Result<Emitter<'a>, EmitError> {
        let message = self.message.as_bytes();

        match self.resolve_kind()? {
            ResolvedKind::File => {
                let path = self.target.path.as_deref().ok_or_else(|| {
                    EmitError::config(Stage::Resolve, self.origin(), "file target requires a path")
                })?;
                Ok(Emitter::to_file(message, path))
            }
            ResolvedKind::Logger => {
                let logger = logger.ok_or(EmitError::MissingLogger)?;
                Ok(Emitter::to_logger(message, logger))
            }
            ResolvedKind::Stdout => Ok(Emitter::stdout(message)),
            ResolvedKind::Stderr => Ok(Emitter::stderr(message)),
        }
    }

    fn resolve_kind(&self) -> Result<ResolvedKind, EmitError> {
        ResolvedKind::from_str(&self.target.kind).ok_or_else(|| {
            EmitError::config(
                Stage::Resolve,
                self.origin(),
                format!("unknown target kind '{}'", self.target.kind),
            )
        })
    }
}
