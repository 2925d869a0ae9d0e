//! The emitter: one message, one output.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use log::{debug, trace};

use crate::error::{EmitError, Stage, TargetKind};
use crate::io::{FileOutput, OutputTarget, StderrOutput, StdoutOutput};
use crate::logger::LineLogger;

/// Where an [`Emitter`] sends its message.
pub enum Target<'a> {
    /// A path that is created (or truncated) on every emit.
    File(FileOutput),
    /// A logger configured and owned elsewhere.
    Logger(&'a LineLogger),
    /// Any writable sink.
    Sink {
        /// "-" for stdout, "stderr" for stderr, caller-chosen otherwise
        id: String,
        writer: Box<dyn Write + Send + 'a>,
    },
}

impl Target<'_> {
    pub fn kind(&self) -> TargetKind {
        match self {
            Target::File(_) => TargetKind::File,
            Target::Logger(_) => TargetKind::Logger,
            Target::Sink { .. } => TargetKind::Sink,
        }
    }

    /// Identifier used in errors: the file path, the logger's output id, or
    /// the sink id.
    pub fn id(&self) -> &str {
        match self {
            Target::File(file) => file.id(),
            Target::Logger(logger) => logger.id(),
            Target::Sink { id, .. } => id,
        }
    }
}

impl fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::File(file) => f.debug_tuple("File").field(&file.path()).finish(),
            Target::Logger(logger) => f.debug_tuple("Logger").field(logger).finish(),
            Target::Sink { id, .. } => f
                .debug_struct("Sink")
                .field("id", id)
                .finish_non_exhaustive(),
        }
    }
}

/// Holds a message and emits it through exactly one output.
///
/// The output is chosen at construction. Each `emit_*` operation only works
/// against its own kind of target; the others report
/// [`EmitError::TargetMismatch`].
///
/// ```
/// use thingio::{Emitter, RecordingSink};
///
/// let mut sink = RecordingSink::new();
/// Emitter::to_sink("hi writer", "recorder", &mut sink)
///     .emit_to_sink()
///     .unwrap();
///
/// sink.assert_wrote("hi writer");
/// ```
pub struct Emitter<'a> {
    message: Vec<u8>,
    target: Target<'a>,
}

impl Emitter<'static> {
    /// The usual constructor: emits to stdout.
    ///
    /// ```
    /// let mut emitter = thingio::Emitter::new("hello");
    /// emitter.emit_to_sink().unwrap();
    /// ```
    pub fn new(message: impl Into<Vec<u8>>) -> Self {
        Self::stdout(message)
    }

    pub fn stdout(message: impl Into<Vec<u8>>) -> Self {
        Self::to_sink(message, StdoutOutput::ID, io::stdout())
    }

    pub fn stderr(message: impl Into<Vec<u8>>) -> Self {
        Self::to_sink(message, StderrOutput::ID, io::stderr())
    }

    /// Emit to a file at `path`, created anew on every emit.
    pub fn to_file(message: impl Into<Vec<u8>>, path: impl Into<PathBuf>) -> Self {
        Self::with_target(message, Target::File(FileOutput::new(path)))
    }

    /// Emit to whatever an [`OutputTarget`] opens, truncating it first.
    pub fn open(message: impl Into<Vec<u8>>, target: &dyn OutputTarget) -> Result<Self, EmitError> {
        let writer = target
            .open_overwrite()
            .map_err(|e| EmitError::io(Stage::Open, target.id(), e))?;
        Ok(Self::with_target(
            message,
            Target::Sink {
                id: target.id().to_string(),
                writer,
            },
        ))
    }
}

impl<'a> Emitter<'a> {
    pub fn with_target(message: impl Into<Vec<u8>>, target: Target<'a>) -> Self {
        Self {
            message: message.into(),
            target,
        }
    }

    /// Emit through a logger owned by the caller.
    pub fn to_logger(message: impl Into<Vec<u8>>, logger: &'a LineLogger) -> Self {
        Self::with_target(message, Target::Logger(logger))
    }

    /// Emit to any writer. `&mut W` works too, so the caller can keep the
    /// writer and inspect it once the emitter is gone.
    pub fn to_sink(
        message: impl Into<Vec<u8>>,
        id: impl Into<String>,
        writer: impl Write + Send + 'a,
    ) -> Self {
        Self::with_target(
            message,
            Target::Sink {
                id: id.into(),
                writer: Box::new(writer),
            },
        )
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn target(&self) -> &Target<'a> {
        &self.target
    }

    pub fn kind(&self) -> TargetKind {
        self.target.kind()
    }

    pub fn target_id(&self) -> &str {
        self.target.id()
    }

    /// Give back the output, e.g. to recover a boxed writer.
    pub fn into_target(self) -> Target<'a> {
        self.target
    }

    /// Create (or truncate) the target file and write the message to it.
    ///
    /// Nothing is written when the file cannot be created. A file left
    /// partially written by a failed write is not cleaned up.
    pub fn emit_to_file(&self) -> Result<(), EmitError> {
        let Target::File(file) = &self.target else {
            return Err(self.mismatch(TargetKind::File));
        };

        let mut handle = file
            .create()
            .map_err(|e| EmitError::io(Stage::Open, file.id(), e))?;
        handle
            .write_all(&self.message)
            .map_err(|e| EmitError::io(Stage::Write, file.id(), e))?;
        // File has no fallible close; dropping the handle closes it.
        handle
            .flush()
            .map_err(|e| EmitError::io(Stage::Flush, file.id(), e))?;

        debug!("emitted {} byte(s) to file {}", self.message.len(), file.id());
        Ok(())
    }

    /// Hand the message to the logger. Logger failures are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the emitter is not bound to a logger. Use
    /// [`try_emit_via_logger`](Self::try_emit_via_logger) to get an error
    /// instead.
    pub fn emit_via_logger(&self) {
        let Target::Logger(logger) = &self.target else {
            panic!("{}", self.mismatch(TargetKind::Logger));
        };
        logger.println(&self.message);
        trace!("emitted {} byte(s) via logger {}", self.message.len(), logger.id());
    }

    /// Like [`emit_via_logger`](Self::emit_via_logger), but reports a wrong
    /// target or a failing logger output.
    pub fn try_emit_via_logger(&self) -> Result<(), EmitError> {
        let Target::Logger(logger) = &self.target else {
            return Err(self.mismatch(TargetKind::Logger));
        };
        logger
            .try_println(&self.message)
            .map_err(|e| EmitError::io(Stage::Write, logger.id(), e))?;
        trace!("emitted {} byte(s) via logger {}", self.message.len(), logger.id());
        Ok(())
    }

    /// Write the whole message to the sink in a single `write` call.
    ///
    /// The count returned by the sink is trusted; a short write is neither
    /// detected nor retried.
    pub fn emit_to_sink(&mut self) -> Result<(), EmitError> {
        let actual = self.kind();
        let Target::Sink { id, writer } = &mut self.target else {
            return Err(EmitError::TargetMismatch {
                expected: TargetKind::Sink,
                actual,
            });
        };

        let written = writer
            .write(&self.message)
            .map_err(|e| EmitError::io(Stage::Write, id.as_str(), e))?;
        writer
            .flush()
            .map_err(|e| EmitError::io(Stage::Flush, id.as_str(), e))?;

        trace!("emitted {written}/{} byte(s) to sink {id}", self.message.len());
        Ok(())
    }

    /// Emit through whichever target the emitter is bound to.
    ///
    /// The logger path keeps its fire-and-forget behaviour and always
    /// succeeds.
    pub fn emit(&mut self) -> Result<(), EmitError> {
        match self.kind() {
            TargetKind::File => self.emit_to_file(),
            TargetKind::Logger => {
                self.emit_via_logger();
                Ok(())
            }
            TargetKind::Sink => self.emit_to_sink(),
        }
    }

    fn mismatch(&self, expected: TargetKind) -> EmitError {
        EmitError::TargetMismatch {
            expected,
            actual: self.kind(),
        }
    }
}

impl fmt::Debug for Emitter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("message", &String::from_utf8_lossy(&self.message))
            .field("target", &self.target)
            .finish()
    }
}
