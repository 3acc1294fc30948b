// ABOUTME: Criterion benchmarks for aggregation and rule evaluation
// ABOUTME: Measures throughput over generated event batches and dense feature sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BioAI Labs

//! Criterion benchmarks for the intelligence engine.
//!
//! Measures event aggregation and full engine runs across batch sizes.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::cast_precision_loss)]

use bioai_intelligence::intelligence::{aggregate, RecommendationEngine};
use bioai_intelligence::models::{ActivityEvent, DietEvent, Event, SleepEvent};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::HashMap;

/// Generate a deterministic batch of mixed events
fn generate_events(count: usize) -> Vec<Event> {
    let base = Utc
        .with_ymd_and_hms(2025, 6, 1, 7, 0, 0)
        .single()
        .unwrap_or_default();
    (0..count)
        .map(|index| {
            let timestamp = base + Duration::minutes((index * 17 % 720) as i64);
            match index % 3 {
                0 => Event::Diet(DietEvent {
                    user_id: "bench_user".into(),
                    timestamp,
                    food: format!("meal {index}"),
                    calories: 250.0 + ((index * 137) % 400) as f64,
                    protein_g: Some(10.0 + ((index * 7) % 30) as f64),
                    carbs_g: Some(20.0 + ((index * 11) % 60) as f64),
                    fat_g: Some(5.0 + ((index * 5) % 20) as f64),
                    fiber_g: Some(1.0 + ((index * 3) % 8) as f64),
                }),
                1 => Event::Activity(ActivityEvent {
                    user_id: "bench_user".into(),
                    timestamp,
                    activity_type: "walk".into(),
                    duration_minutes: 20.0 + ((index * 13) % 60) as f64,
                    calories_burned: Some(80.0 + ((index * 19) % 200) as f64),
                    steps: Some(1500 + (index * 251 % 4000) as u64),
                }),
                _ => Event::Sleep(SleepEvent {
                    user_id: "bench_user".into(),
                    timestamp,
                    duration_minutes: 360.0 + ((index * 23) % 180) as f64,
                    sleep_quality: Some(1 + (index % 5) as u8),
                }),
            }
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for size in [10_usize, 100, 500] {
        let events = generate_events(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &events, |b, events| {
            b.iter(|| aggregate(black_box(events)));
        });
    }
    group.finish();
}

fn bench_engine_run(c: &mut Criterion) {
    let engine = RecommendationEngine::new();
    let features: HashMap<String, f64> = HashMap::from([
        ("calories".to_owned(), 2600.0),
        ("sleep_hours".to_owned(), 5.0),
        ("steps".to_owned(), 3000.0),
        ("fiber_g".to_owned(), 12.0),
        ("protein_g".to_owned(), 40.0),
        ("carbs_g".to_owned(), 300.0),
        ("fat_g".to_owned(), 90.0),
        ("water_ml".to_owned(), 1200.0),
    ]);
    let targets = HashMap::from([("fiber_g".to_owned(), 30.0)]);

    c.bench_function("engine_run_dense_features", |b| {
        b.iter(|| engine.run(black_box(&features), black_box(&targets)));
    });

    let events = generate_events(500);
    c.bench_function("engine_run_events_500", |b| {
        b.iter(|| engine.run_events(black_box(&events), black_box(&targets)));
    });
}

criterion_group!(benches, bench_aggregate, bench_engine_run);
criterion_main!(benches);
