//! Prints `hello` to stdout with no trailing newline.

use thingio::{EmitError, Emitter};

fn main() -> Result<(), EmitError> {
    let mut emitter = Emitter::new("hello");
    emitter.emit_to_sink()
}
