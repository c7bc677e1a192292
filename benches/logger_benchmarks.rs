//! Criterion benchmarks for rust_category_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_category_logger::core::{generate, CallSite};
use rust_category_logger::prelude::*;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Area {
    Hot,
    Cold,
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn memory_logger(builder: LoggerBuilder<Area>) -> Logger<Area> {
    builder.destination(MemoryDestination::new().with_capacity(1024)).build()
}

// ============================================================================
// Admission Benchmarks
// ============================================================================

fn bench_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("admission");
    group.throughput(Throughput::Elements(1));

    let logger = memory_logger(
        Logger::builder()
            .synchronous()
            .level(Level::Info)
            .category_level(Area::Hot, Level::Verbose),
    );

    group.bench_function("can_log_global", |b| {
        b.iter(|| black_box(logger.can_log(None, None, black_box(Level::Debug))));
    });

    group.bench_function("can_log_category", |b| {
        b.iter(|| black_box(logger.can_log(None, Some(&Area::Cold), black_box(Level::Debug))));
    });

    group.bench_function("can_log_override", |b| {
        b.iter(|| black_box(logger.can_log(Some(Level::Verbose), Some(&Area::Cold), black_box(Level::Debug))));
    });

    group.bench_function("disabled_site_with_closure", |b| {
        b.iter(|| logger.debug_with(|| format!("expensive {}", black_box(42))));
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_sync_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_logging");
    group.throughput(Throughput::Elements(1));

    let logger = memory_logger(Logger::builder().synchronous().level(Level::Verbose));

    group.bench_function("info", |b| {
        b.iter(|| logger.info(black_box("Info message")));
    });

    group.bench_function("info_in_category", |b| {
        b.iter(|| logger.info_in(Area::Hot, black_box("Info message")));
    });

    group.bench_function("override", |b| {
        b.iter(|| logger.with_override(Level::Verbose).verbose(black_box("Forced message")));
    });

    group.finish();
}

fn bench_async_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("async_logging");
    group.throughput(Throughput::Elements(1));

    let logger = memory_logger(
        Logger::builder()
            .async_mode(10_000)
            .overflow_policy(OverflowPolicy::DropNewest),
    );

    group.bench_function("info", |b| {
        b.iter(|| logger.info(black_box("Async info message")));
    });

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let logger = Arc::new(memory_logger(
        Logger::builder()
            .async_mode(10_000)
            .overflow_policy(OverflowPolicy::Block),
    ));

    for threads in [2usize, 4] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_function(format!("{}_threads", threads), |b| {
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let logger = Arc::clone(&logger);
                        std::thread::spawn(move || {
                            for i in 0..100 {
                                logger.info_with(|| format!("message {}", i));
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    let _ = handle.join();
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Generator Benchmarks
// ============================================================================

fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generators");
    group.throughput(Throughput::Elements(1));

    let event = LogEvent::new(
        Level::Warning,
        "connection reset by peer, retrying \"upstream\"".to_string(),
        CallSite::new("reconnect", "src/net/client.rs", 212),
    )
    .with_category("Net");
    let details = Detail::ALL;

    let generators: [(&str, Box<dyn Generator>); 5] = [
        ("text", Box::new(TextGenerator::new()) as Box<dyn Generator>),
        ("csv", Box::new(CsvGenerator::new())),
        ("tsv", Box::new(TsvGenerator::new())),
        ("json", Box::new(JsonGenerator::new())),
        ("xml", Box::new(XmlGenerator::new())),
    ];

    for (name, generator) in &generators {
        group.bench_function(*name, |b| {
            b.iter(|| black_box(generate(generator.as_ref(), black_box(&event), &details)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_admission,
    bench_sync_logging,
    bench_async_logging,
    bench_concurrent_logging,
    bench_generators,
);

criterion_main!(benches);
