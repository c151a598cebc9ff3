//! Pricing engine benchmarks
//!
//! A quote is expected to complete in microseconds against an in-memory snapshot.

use academia_billing::PricingEngine;
use academia_common::{MembershipPlan, PaymentTiming, PricingSnapshot, ServiceSelection};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal_macros::dec;
use std::time::Duration;

fn snapshot() -> PricingSnapshot {
    PricingSnapshot::new(
        dec!(1000),
        vec![
            MembershipPlan::new("bronce", "Bronce", 4, dec!(0.5)),
            MembershipPlan::new("plata", "Plata", 6, dec!(1)),
            MembershipPlan::new("oro", "Oro", 10, dec!(2)),
            MembershipPlan::new("platino", "Platino", 12, dec!(2)),
        ],
        dec!(500),
    )
    .expect("valid snapshot")
}

/// Benchmark each selection rule
fn bench_selections(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");
    group.measurement_time(Duration::from_secs(5));

    let engine = PricingEngine::new();
    let snap = snapshot();
    let selections = [
        ("single", ServiceSelection::disciplines(1)),
        ("four_disciplines", ServiceSelection::disciplines(4)),
        ("three_siblings", ServiceSelection::siblings(3)),
        ("membership", ServiceSelection::membership("platino")),
        ("mixed", ServiceSelection::mixed_siblings(vec![1, 2, 3, 4])),
    ];

    for (name, selection) in selections.iter() {
        group.bench_with_input(BenchmarkId::new("calculate", name), selection, |b, sel| {
            b.iter(|| {
                engine
                    .calculate(
                        black_box(sel),
                        black_box(&snap),
                        PaymentTiming::LateActive,
                        true,
                    )
                    .expect("priced")
            });
        });
    }

    group.finish();
}

/// Benchmark membership catalog listing
fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");

    let engine = PricingEngine::new();
    let snap = snapshot();
    group.bench_function("list_available_memberships", |b| {
        b.iter(|| engine.list_available_memberships(black_box(&snap)));
    });

    group.finish();
}

criterion_group!(pricing, bench_selections, bench_catalog);
criterion_main!(pricing);
