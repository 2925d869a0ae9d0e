//! Tests for LineLogger output and its `log` backend.

use std::fs;

use log::{Level, LevelFilter, Log, Record};

use crate::io::{FileOutput, StdoutOutput};
use crate::tests::{FailingWriter, SharedBuffer};
use crate::{LineLogger, LogFlags};

fn buffered(prefix: &str, flags: LogFlags) -> (LineLogger, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let logger = LineLogger::new(Box::new(buffer.clone()), prefix, flags);
    (logger, buffer)
}

#[test]
fn println_writes_prefixed_lines() {
    let (logger, buffer) = buffered("> ", LogFlags::NONE);

    logger.println("one");
    logger.println(b"two".as_slice());

    assert_eq!(buffer.contents_string(), "> one\n> two\n");
}

#[test]
fn try_println_surfaces_write_errors() {
    let logger = LineLogger::new(Box::new(FailingWriter), "", LogFlags::NONE);

    let err = logger.try_println("lost").unwrap_err();

    assert_eq!(err.to_string(), "disk full");
}

#[test]
fn settings_can_change_after_construction() {
    let (logger, buffer) = buffered("a ", LogFlags::STANDARD);

    logger.set_prefix("b ");
    logger.set_flags(LogFlags::NONE);
    logger.println("msg");

    assert_eq!(logger.prefix(), "b ");
    assert_eq!(logger.flags(), LogFlags::NONE);
    assert_eq!(buffer.contents_string(), "b msg\n");
}

#[test]
fn open_appends_to_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "earlier\n").unwrap();

    let logger = LineLogger::open(&FileOutput::new(&path), true, "", LogFlags::NONE).unwrap();
    logger.println("later");

    assert_eq!(logger.id(), path.to_string_lossy());
    assert_eq!(fs::read_to_string(&path).unwrap(), "earlier\nlater\n");
}

#[test]
fn open_truncates_when_not_appending() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "earlier\n").unwrap();

    let logger = LineLogger::open(&FileOutput::new(&path), false, "", LogFlags::NONE).unwrap();
    logger.println("later");

    assert_eq!(fs::read_to_string(&path).unwrap(), "later\n");
}

#[test]
fn std_stream_loggers_use_stream_ids() {
    assert_eq!(LineLogger::stdout("", LogFlags::NONE).id(), StdoutOutput::ID);
    assert_eq!(LineLogger::stderr("", LogFlags::NONE).id(), "stderr");
}

#[test]
fn log_backend_writes_level_and_target() {
    let (logger, buffer) = buffered("", LogFlags::NONE);

    logger.log(
        &Record::builder()
            .args(format_args!("started"))
            .level(Level::Info)
            .target("thingio")
            .build(),
    );
    logger.flush();

    assert_eq!(buffer.contents_string(), "INFO thingio: started\n");
}

#[test]
fn log_backend_filters_by_level() {
    let (logger, buffer) = buffered("", LogFlags::NONE);
    let logger = logger.with_level(LevelFilter::Warn);

    logger.log(
        &Record::builder()
            .args(format_args!("chatty"))
            .level(Level::Debug)
            .target("thingio")
            .build(),
    );

    assert_eq!(logger.level(), LevelFilter::Warn);
    assert!(buffer.contents_string().is_empty());
}

#[test]
fn debug_omits_the_writer() {
    let (logger, _buffer) = buffered("dbg ", LogFlags::NONE);

    let rendered = format!("{logger:?}");

    assert!(rendered.contains("dbg "));
    assert!(rendered.contains(".."));
}
