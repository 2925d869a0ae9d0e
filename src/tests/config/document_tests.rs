//! Tests for EmitterConfig parsing and resolution.

use std::fs;

use crate::config::{EmitterConfig, LoggerConfig, TargetConfig};
use crate::error::{EmitError, Stage};
use crate::{LogFlags, TargetKind};

#[test]
fn build_file_emitter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.log");
    let cfg = EmitterConfig::new("from config", TargetConfig::file(path.to_string_lossy()));

    let emitter = cfg.build_emitter(None).unwrap();
    emitter.emit_to_file().unwrap();

    assert_eq!(emitter.kind(), TargetKind::File);
    assert_eq!(fs::read_to_string(&path).unwrap(), "from config");
    assert!(cfg.build_logger().unwrap().is_none());
}

#[test]
fn build_std_stream_emitters() {
    let stdout = EmitterConfig::new("x", TargetConfig::stdout())
        .build_emitter(None)
        .unwrap();
    let stderr = EmitterConfig::new("x", TargetConfig::stderr())
        .build_emitter(None)
        .unwrap();

    assert_eq!(stdout.target_id(), "-");
    assert_eq!(stderr.target_id(), "stderr");
}

#[test]
fn build_logger_emitter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logger.log");
    let cfg = EmitterConfig::new("hi logger", TargetConfig::logger()).with_logger(LoggerConfig {
        prefix: "cfg ".into(),
        flags: LogFlags::NONE,
        output: path.to_string_lossy().into_owned(),
        append: false,
        level: Some("info".into()),
    });

    let logger = cfg.build_logger().unwrap().expect("logger target builds a logger");
    let emitter = cfg.build_emitter(Some(&logger)).unwrap();
    emitter.emit_via_logger();

    assert_eq!(logger.level(), log::LevelFilter::Info);
    assert_eq!(fs::read_to_string(&path).unwrap(), "cfg hi logger\n");
}

#[test]
fn logger_target_without_logger_is_rejected() {
    let cfg = EmitterConfig::new("x", TargetConfig::logger());

    let err = cfg.build_emitter(None).unwrap_err();

    assert!(matches!(err, EmitError::MissingLogger));
}

#[test]
fn file_target_without_path_is_rejected() {
    let cfg = EmitterConfig::new(
        "x",
        TargetConfig {
            kind: "file".into(),
            path: None,
        },
    );

    let err = cfg.build_emitter(None).unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Resolve));
    assert!(err.to_string().contains("requires a path"));
}

#[test]
fn unknown_kind_is_rejected() {
    let cfg = EmitterConfig::new(
        "x",
        TargetConfig {
            kind: "carrier-pigeon".into(),
            path: None,
        },
    );

    assert!(cfg.build_emitter(None).is_err());
    let err = cfg.build_logger().unwrap_err();
    assert!(err.to_string().contains("carrier-pigeon"));
    assert_eq!(cfg.origin(), "<inline>");
}

#[test]
fn bad_logger_level_is_rejected() {
    let cfg = EmitterConfig::new("x", TargetConfig::logger()).with_logger(LoggerConfig {
        output: "stderr".into(),
        level: Some("loud".into()),
        ..LoggerConfig::default()
    });

    let err = cfg.build_logger().unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Resolve));
}

#[test]
fn logger_config_defaults() {
    let cfg = LoggerConfig::default();

    assert_eq!(cfg.output, "stderr");
    assert!(cfg.append);
    assert_eq!(cfg.flags, LogFlags::STANDARD);
    assert_eq!(cfg.output_target().id(), "stderr");
}

#[cfg(feature = "yaml")]
#[test]
fn parse_yaml_config() {
    let yaml = r#"
message: hello
target:
  kind: logger
logger:
  prefix: "app "
  flags:
    date: false
    time: false
  output: stdout
"#;

    let cfg = EmitterConfig::from_yaml_str(yaml).unwrap();

    assert_eq!(cfg.message, "hello");
    assert_eq!(cfg.target.kind, "logger");
    let logger_cfg = cfg.logger.as_ref().unwrap();
    assert_eq!(logger_cfg.prefix, "app ");
    assert_eq!(logger_cfg.flags, LogFlags::NONE);
    assert!(logger_cfg.append);
    assert_eq!(logger_cfg.output_target().id(), "-");
}

#[cfg(feature = "toml")]
#[test]
fn parse_toml_config() {
    let doc = r#"
message = "hi logfile"

[target]
kind = "file"
path = "logs/out.log"
"#;

    let cfg = EmitterConfig::from_toml_str(doc).unwrap();

    assert_eq!(cfg.message, "hi logfile");
    assert_eq!(cfg.target.kind, "file");
    assert_eq!(cfg.target.path.as_deref(), Some("logs/out.log"));
    assert!(cfg.logger.is_none());
}

#[cfg(feature = "toml")]
#[test]
fn toml_config_from_path_builds_logger() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("app.log");
    let cfg_path = dir.path().join("emit.toml");
    let doc = format!(
        "message = \"ready\"\n\n[target]\nkind = \"logger\"\n\n[logger]\nprefix = \"[svc] \"\noutput = {:?}\nappend = false\n\n[logger.flags]\ndate = false\ntime = false\n",
        log_path.to_string_lossy()
    );
    fs::write(&cfg_path, doc).unwrap();

    let cfg = EmitterConfig::from_path(&cfg_path).unwrap();
    let logger = cfg.build_logger().unwrap().unwrap();
    cfg.build_emitter(Some(&logger))
        .unwrap()
        .try_emit_via_logger()
        .unwrap();

    assert_eq!(fs::read_to_string(&log_path).unwrap(), "[svc] ready\n");
}

#[cfg(feature = "toml")]
#[test]
fn malformed_toml_fails_at_parse() {
    let err = EmitterConfig::from_toml_str("message = \n").unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Parse));
}

#[cfg(feature = "json")]
#[test]
fn parse_json_config_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.log");
    let cfg_path = dir.path().join("emit.json");
    let doc = serde_json::json!({
        "message": "hi file",
        "target": { "kind": "FILE", "path": out.to_string_lossy() },
    });
    fs::write(&cfg_path, doc.to_string()).unwrap();

    let cfg = EmitterConfig::from_path(&cfg_path).unwrap();
    cfg.build_emitter(None).unwrap().emit_to_file().unwrap();

    assert_eq!(cfg.origin(), cfg_path.to_string_lossy());
    assert_eq!(fs::read_to_string(&out).unwrap(), "hi file");
}

#[cfg(feature = "json")]
#[test]
fn malformed_document_fails_at_parse() {
    let err = EmitterConfig::from_json_str(r#"{"message": 1}"#).unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Parse));
}

#[test]
fn unknown_extension_fails_at_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("emit.ini");
    fs::write(&path, "message = x").unwrap();

    let err = EmitterConfig::from_path(&path).unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Parse));
    assert!(err.to_string().contains("emit.ini"));
}

#[test]
fn missing_config_file_fails_at_open() {
    let dir = tempfile::tempdir().unwrap();

    let err = EmitterConfig::from_path(dir.path().join("absent.yaml")).unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Open));
}
