//! Output target trait definition.

use std::fmt::Debug;
use std::io::Write;

/// Trait for destinations that hand out a writable stream.
///
/// The emitter's sink capability is plain [`std::io::Write`]; an
/// `OutputTarget` is what produces such a writer from configuration.
pub trait OutputTarget: Send + Sync + Debug {
    /// Returns a unique identifier for this output target.
    ///
    /// Convention: "-" for stdout, "stderr" for stderr, file path for files.
    fn id(&self) -> &str;

    /// Open the target for writing, truncating any existing content.
    fn open_overwrite(&self) -> std::io::Result<Box<dyn Write + Send>>;

    /// Open the target for appending to existing content.
    fn open_append(&self) -> std::io::Result<Box<dyn Write + Send>>;
}
