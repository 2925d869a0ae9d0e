//! Emit the message described by a YAML configuration.
//!
//! Usage: cargo run --example from_config -- emit.yaml

use thingio::{EmitError, EmitterConfig, LineLogger, LogFlags};

const DEFAULT_CONFIG: &str = r#"
message: "hello from config\n"
target:
  kind: stdout
"#;

fn main() -> Result<(), EmitError> {
    let diagnostics = LineLogger::stderr("[from_config] ", LogFlags::STANDARD)
        .with_level(log::LevelFilter::Debug);
    // Only fails if another logger is already installed.
    let _ = diagnostics.install();

    let cfg = match std::env::args().nth(1) {
        Some(path) => EmitterConfig::from_path(path)?,
        None => EmitterConfig::from_yaml_str(DEFAULT_CONFIG)?,
    };

    let logger = cfg.build_logger()?;
    let mut emitter = cfg.build_emitter(logger.as_ref())?;
    emitter.emit()
}
