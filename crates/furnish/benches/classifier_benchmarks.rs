//! Classification and reconciliation benchmarks.
//!
//! Measures per-record classification cost and full-batch reconciliation
//! across batch sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use furnish::reconcile::{reconcile, ReconcileOptions};
use furnish::{Attributes, Classifier, Observation, Snapshot};

const NAMES: &[&str] = &[
    "Wilkes Nightstand / Side Table",
    "Harbor Sectional Sofa",
    "Archer Swivel Chair",
    "Odette Canopy Bed",
    "Aria Six Light Chandelier",
    "Marlow Bar Stool",
    "Ellis Console Table",
    "Hudson Wing Chair",
    "Bay Wall Sconce",
    "Untitled Accent",
];

const URLS: &[&str] = &[
    "https://vendor.example.com/bedroom/nightstands",
    "https://vendor.example.com/living-room/sofas",
    "https://vendor.example.com/new-arrivals",
    "https://vendor.example.com/dining/chairs",
];

/// Generate a synthetic vendor batch where every third record repeats a SKU.
fn generate_observations(count: usize) -> Vec<Observation> {
    (0..count)
        .map(|i| {
            let sku = if i % 3 == 0 && i > 0 { i - 1 } else { i };
            Observation::new(format!("SKU-{:06}", sku))
                .with_attributes(
                    Attributes::default()
                        .with_name(NAMES[i % NAMES.len()])
                        .with_price((i % 500) as f64 * 10.0),
                )
                .with_room_hint(["Bedroom", "Living Room", "Office"][i % 3])
        })
        .collect()
}

fn bench_categorize(c: &mut Criterion) {
    let classifier = Classifier::builtin().unwrap();
    let mut group = c.benchmark_group("categorize");

    group.bench_function("text_only", |b| {
        b.iter(|| {
            for name in NAMES {
                black_box(classifier.categorize(black_box(name), None, None));
            }
        })
    });

    group.bench_function("text_url_label", |b| {
        b.iter(|| {
            for (i, name) in NAMES.iter().enumerate() {
                black_box(classifier.categorize(
                    black_box(name),
                    Some(URLS[i % URLS.len()]),
                    Some("Chairs & Chaises"),
                ));
            }
        })
    });

    group.finish();
}

fn bench_classifier_build(c: &mut Criterion) {
    c.bench_function("classifier_build", |b| {
        b.iter(|| black_box(Classifier::builtin().unwrap()))
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let classifier = Classifier::builtin().unwrap();
    let mut group = c.benchmark_group("reconcile");

    for size in [100, 1_000, 10_000].iter() {
        let observations = generate_observations(*size);
        let first = reconcile(
            &classifier,
            Some("bench"),
            observations.clone(),
            &Snapshot::empty(),
            ReconcileOptions::default(),
        );
        let snapshot = Snapshot::from_entities(first.plan.to_upsert.into_iter().map(|u| u.entity));

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("records", size), &observations, |b, obs| {
            b.iter_with_setup(
                || obs.clone(),
                |obs| {
                    black_box(reconcile(
                        &classifier,
                        Some("bench"),
                        obs,
                        &snapshot,
                        ReconcileOptions::default(),
                    ))
                },
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_categorize, bench_classifier_build, bench_reconcile);
criterion_main!(benches);
