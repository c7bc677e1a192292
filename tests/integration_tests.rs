//! Integration tests for the category logger
//!
//! These tests verify:
//! - File output for every format, including framing
//! - Admission precedence through the public API
//! - Isolation of failing destinations
//! - Ordering and thread safety of async dispatch
//! - Configuration loading

use rust_category_logger::generators::{CsvGenerator, JsonGenerator};
use rust_category_logger::prelude::*;
use std::fmt;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Subsystem {
    Network,
    Storage,
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subsystem::Network => f.write_str("Network"),
            Subsystem::Storage => f.write_str("Storage"),
        }
    }
}

fn memory_logger<C: Category>(details: Vec<Detail>) -> (Logger<C>, MemoryBuffer) {
    let memory = MemoryDestination::new();
    let buffer = memory.buffer();
    let logger = Logger::builder()
        .synchronous()
        .details(details)
        .destination(memory)
        .build();
    (logger, buffer)
}

#[test]
fn test_json_file_parses_as_array() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("events.json");

    let logger: Logger<Subsystem> = Logger::builder()
        .level(Level::Debug)
        .destination(FileDestination::json(&log_file))
        .build();

    logger.info_in(Subsystem::Network, "connected to \"db-1\"");
    logger.debug("line one\nline two");
    logger.verbose("filtered out");
    assert!(logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("Invalid JSON");
    let records = parsed.as_array().expect("Expected a JSON array");
    assert_eq!(records.len(), 2);

    assert_eq!(records[0]["category"], "Network");
    assert_eq!(records[0]["message"], "connected to \"db-1\"");
    assert_eq!(records[0]["level"], "Info");
    assert_eq!(records[0]["override"], false);
    assert_eq!(records[0]["file"], "integration_tests.rs");
    assert!(records[0]["line"].as_u64().is_some());

    assert_eq!(records[1]["category"], "");
    assert_eq!(records[1]["message"], "line one\nline two");
}

#[test]
fn test_csv_file_header_and_quoting() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("events.csv");

    let logger: Logger<String> = Logger::builder()
        .synchronous()
        .destination(FileDestination::csv(&log_file).with_details(vec![Detail::Category, Detail::Message]))
        .build();

    logger.warning_in("A,B".to_string(), "hello \"world\"");
    assert!(logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "category,message\n\"A,B\",\"hello \"\"world\"\"\"\n");
}

#[test]
fn test_tsv_file_in_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let destination = FileDestination::in_directory(temp_dir.path().join("tsv"), TsvGenerator::new())
        .expect("Failed to create destination")
        .with_details(vec![Detail::Level, Detail::Message]);
    let log_file = destination.path().to_path_buf();

    let logger: Logger = Logger::builder().destination(destination).build();
    logger.error("tab\there");
    logger.info("second");
    drop(logger);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "level\tmessage\nError\ttab here\nInfo\tsecond\n");
}

#[test]
fn test_xml_file_is_well_framed() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("events.xml");

    let logger: Logger = Logger::builder()
        .destination(FileDestination::xml(&log_file).with_details(vec![Detail::Level, Detail::Message]))
        .build();
    logger.info("a < b");
    logger.severe("x]]>y");
    drop(logger);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(
        content,
        format!(
            "{}<log>\n\
             <entry><level>Info</level><message><![CDATA[a < b]]></message></entry>\n\
             <entry><level>Severe</level><message><![CDATA[x]]]]><![CDATA[>y]]></message></entry>\n\
             </log>\n",
            XmlGenerator::PROLOGUE
        )
    );
}

#[test]
fn test_text_file_uses_logger_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("plain.log");

    let logger: Logger = Logger::builder()
        .details(vec![Detail::Level, Detail::Message])
        .destination(FileDestination::new(&log_file))
        .build();
    logger.info("plain");
    logger.with_override(Level::Debug).debug("forced");
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "- Info: plain\n* Debug: forced\n");
}

#[test]
fn test_generators_per_destination() {
    let plain = MemoryDestination::new().with_name("plain");
    let json = MemoryDestination::new()
        .with_name("json")
        .with_generator(JsonGenerator::new())
        .with_details(vec![Detail::Message]);
    let csv = MemoryDestination::new()
        .with_name("csv")
        .with_generator(CsvGenerator::new())
        .with_details(vec![Detail::Level, Detail::Message]);
    let (plain_lines, json_lines, csv_lines) = (plain.buffer(), json.buffer(), csv.buffer());

    let logger: Logger = Logger::builder()
        .synchronous()
        .details(vec![Detail::Message])
        .destination(plain)
        .destination(json)
        .destination(csv)
        .build();
    logger.info("same event");

    assert_eq!(plain_lines.lines(), vec!["-: same event"]);
    assert_eq!(json_lines.lines(), vec![r#"{"message":"same event"}"#]);
    assert_eq!(csv_lines.lines(), vec![r#"Info,"same event""#]);
}

#[test]
fn test_override_precedence_scenarios() {
    let (logger, buffer) = memory_logger::<Subsystem>(vec![Detail::Category, Detail::Level, Detail::Message]);

    // Global Off: only overrides get through
    logger.set_level(Level::Off);
    logger.severe("muted");
    logger.with_override(Level::Severe).severe("forced severe");
    logger.with_override(Level::Severe).verbose("verbose above override");
    logger.with_override(Level::Verbose).verbose_in(Subsystem::Storage, "forced verbose");
    logger.with_override(Level::Off).severe("suppressed");

    // Category beats global
    logger.set_level(Level::Info);
    logger.set_category_level(Subsystem::Network, Level::Verbose);
    logger.debug_in(Subsystem::Network, "network debug");
    logger.debug("plain debug");

    // Category Off silences even severe calls in that category
    logger.set_category_level(Subsystem::Storage, Level::Off);
    logger.severe_in(Subsystem::Storage, "storage severe");

    assert_eq!(
        buffer.lines(),
        vec![
            "* [] Severe: forced severe",
            "* [Storage] Verbose: forced verbose",
            "- [Network] Debug: network debug",
        ]
    );
    assert_eq!(logger.hits(), 3);
    assert_eq!(logger.misses(), 5);
}

struct Failing {
    attempts: Arc<AtomicUsize>,
    panic: bool,
}

impl Destination for Failing {
    fn log_string(&mut self, _rendered: &str, _level: Level) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.panic {
            panic!("destination exploded");
        }
        Err(LoggerError::writer("disk on fire"))
    }

    fn name(&self) -> &str {
        if self.panic {
            "panicking"
        } else {
            "failing"
        }
    }
}

#[test]
fn test_failing_destinations_do_not_block_others() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let memory = MemoryDestination::new();
    let buffer = memory.buffer();

    let logger: Logger = Logger::builder()
        .details(vec![Detail::Message])
        .destination(Failing {
            attempts: Arc::clone(&attempts),
            panic: true,
        })
        .destination(Failing {
            attempts: Arc::clone(&attempts),
            panic: false,
        })
        .destination(memory)
        .build();

    for i in 0..5 {
        logger.info(format!("event {}", i));
    }
    logger.flush().expect("Failed to flush");

    assert_eq!(buffer.len(), 5);
    assert_eq!(attempts.load(Ordering::SeqCst), 10);
    assert_eq!(logger.metrics().failed_writes(), 10);
}

#[test]
fn test_unavailable_file_reported_once() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let memory = MemoryDestination::new();
    let buffer = memory.buffer();

    let logger: Logger = Logger::builder()
        .synchronous()
        // A directory can never be opened as a log file
        .destination(FileDestination::new(temp_dir.path()))
        .destination(memory)
        .build();

    logger.info("one");
    logger.info("two");

    assert_eq!(buffer.len(), 2);
    assert_eq!(logger.metrics().failed_writes(), 1);
}

#[test]
fn test_concurrent_producers_keep_per_thread_order() {
    let memory = MemoryDestination::new();
    let buffer = memory.buffer();
    let logger: Arc<Logger> = Arc::new(
        Logger::builder()
            .async_mode(64)
            .overflow_policy(OverflowPolicy::Block)
            .details(vec![Detail::Message])
            .destination(memory)
            .build(),
    );

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..250 {
                    logger.info(format!("{} {}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("producer panicked");
    }
    logger.flush().expect("Failed to flush");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1000);
    assert_eq!(logger.hits(), 1000);

    for t in 0..4 {
        let prefix = format!("-: {} ", t);
        let sequence: Vec<usize> = lines
            .iter()
            .filter_map(|l| l.strip_prefix(&prefix))
            .map(|n| n.parse().expect("numeric suffix"))
            .collect();
        assert_eq!(sequence, (0..250).collect::<Vec<_>>());
    }
}

#[test]
fn test_runtime_reconfiguration_from_other_thread() {
    let (logger, buffer) = memory_logger::<Subsystem>(vec![Detail::Level, Detail::Message]);
    let logger = Arc::new(logger);

    logger.debug("hidden");
    {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            logger.set_level(Level::Verbose);
            logger.set_default_generator(CsvGenerator::new());
        })
        .join()
        .expect("configuring thread panicked");
    }
    logger.debug("shown");

    assert_eq!(buffer.lines(), vec!["Debug,\"shown\""]);
}

#[test]
fn test_config_file_applied_by_builder() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("logger.json");
    fs::write(
        &config_file,
        r#"{"level": "Warning", "details": ["level", "message"], "async_buffer": null}"#,
    )
    .expect("Failed to write config");

    let config = LoggerConfig::from_file(&config_file).expect("Failed to load config");
    let memory = MemoryDestination::new();
    let buffer = memory.buffer();
    let logger: Logger = Logger::builder().config(config).destination(memory).build();

    assert!(!logger.is_async());
    logger.info("below threshold");
    logger.warning("at threshold");
    assert_eq!(buffer.lines(), vec!["- Warning: at threshold"]);
}

#[test]
fn test_missing_config_file_is_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = LoggerConfig::from_file(temp_dir.path().join("absent.json"));
    assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
}
