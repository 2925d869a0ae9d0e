//! In-memory sink for testing.

use std::io::{self, Write};

/// A `Write` implementation that records every write call instead of
/// persisting it.
///
/// Each call to [`write`](Write::write) appends one entry, so the recorded
/// sequence mirrors the calls made against the sink. Use it when a test only
/// cares that something was written, not where it went.
///
/// The sink is meant for a single writer. Wrap it in a `Mutex` when several
/// threads need to write to the same instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    records: Vec<Vec<u8>>,
}

impl RecordingSink {
    /// Create a new empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded writes, in call order.
    pub fn records(&self) -> &[Vec<u8>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any single recorded write is exactly `bytes`.
    pub fn contains(&self, bytes: impl AsRef<[u8]>) -> bool {
        let bytes = bytes.as_ref();
        self.records.iter().any(|r| r.as_slice() == bytes)
    }

    /// Panic unless some recorded write is exactly `bytes`.
    ///
    /// # Panics
    ///
    /// Panics with a message naming the missing content.
    #[track_caller]
    pub fn assert_wrote(&self, bytes: impl AsRef<[u8]>) {
        let bytes = bytes.as_ref();
        if !self.contains(bytes) {
            panic!(
                "'{}' was not written (recorded {} write(s))",
                String::from_utf8_lossy(bytes),
                self.records.len()
            );
        }
    }

    /// All recorded writes joined into one buffer.
    pub fn concat(&self) -> Vec<u8> {
        self.records.concat()
    }

    /// Forget every recorded write.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Write for RecordingSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.records.push(data.to_vec());
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
