// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the toast store.
//!
//! Measures the performance of:
//! - The pure transition function (add/update)
//! - A full dispatch with observer fan-out

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use toast_store::{
    transition, Action, StoreConfig, StoreState, Toast, ToastCapacity, ToastContent, ToastId,
    ToastPatch, ToastStore,
};

fn toast(id: u64) -> Toast {
    Toast::new(
        ToastId::from_raw(id),
        ToastContent::new()
            .with_title("title")
            .with_description("description"),
    )
}

/// Benchmark the pure transition function.
fn bench_transition(c: &mut Criterion) {
    let mut group = c.benchmark_group("transition");

    let capacity = ToastCapacity::new(4);
    let mut state = StoreState::default();
    for id in 1..=4 {
        state = transition(&state, Action::Add(toast(id)), capacity);
    }

    group.bench_function("add_at_capacity", |b| {
        b.iter(|| black_box(transition(&state, Action::Add(toast(5)), capacity)));
    });

    group.bench_function("update", |b| {
        b.iter(|| {
            black_box(transition(
                &state,
                Action::Update {
                    id: ToastId::from_raw(2),
                    patch: ToastPatch::new().with_description("changed"),
                },
                capacity,
            ))
        });
    });

    group.finish();
}

/// Benchmark a full dispatch, including observer fan-out.
fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    for observers in [1usize, 8] {
        let store = ToastStore::with_runtime(
            StoreConfig::new().with_capacity(ToastCapacity::new(4)),
            runtime.handle().clone(),
        );
        let mut guards = Vec::new();
        for _ in 0..observers {
            guards.push(store.subscribe(|state| {
                black_box(state.len());
            }));
        }
        let handle = store.create(ToastContent::new().with_title("bench"));

        group.bench_function(format!("update_fanout_{observers}"), |b| {
            b.iter(|| {
                store.update(
                    handle.id(),
                    ToastPatch::new().with_description("changed"),
                );
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transition, bench_dispatch);
criterion_main!(benches);
