// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Single-threaded operation costs per ordering token. Uncontended atomics
//! are cheap; the interesting signal is the relative cost of the orderings
//! (a sequentially consistent store pays for a full fence on x86).

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use ordered_atomics::{AtomicCell, LoadOrdering, StoreOrdering, UpdateOrdering};

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_u64");
    let cell = AtomicCell::prepare(0xDEAD_BEEFu64);
    for (name, order) in [
        ("relaxed", LoadOrdering::Relaxed),
        ("acquire", LoadOrdering::Acquire),
        ("seq_cst", LoadOrdering::SeqCst),
    ] {
        group.bench_function(name, |b| b.iter(|| black_box(cell.load(order))));
    }
    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_u64");
    let cell = AtomicCell::prepare(0u64);
    for (name, order) in [
        ("relaxed", StoreOrdering::Relaxed),
        ("release", StoreOrdering::Release),
        ("seq_cst", StoreOrdering::SeqCst),
    ] {
        group.bench_function(name, |b| b.iter(|| cell.store(black_box(1), order)));
    }
    group.finish();
}

fn bench_fetch_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("fetch_add_u64");
    let cell = AtomicCell::prepare(0u64);
    for (name, order) in [
        ("relaxed", UpdateOrdering::Relaxed),
        ("acq_rel", UpdateOrdering::AcqRel),
        ("seq_cst", UpdateOrdering::SeqCst),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(cell.fetch_add(black_box(1), order)))
        });
    }
    group.finish();
}

fn bench_compare_exchange(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_exchange_u64");
    let cell = AtomicCell::prepare(0u64);
    group.bench_function("success_seq_cst", |b| {
        b.iter(|| {
            let _ = black_box(cell.compare_exchange(
                0,
                0,
                UpdateOrdering::SeqCst,
                LoadOrdering::SeqCst,
            ));
        })
    });
    group.bench_function("failure_seq_cst", |b| {
        b.iter(|| {
            let _ = black_box(cell.compare_exchange(
                1,
                2,
                UpdateOrdering::SeqCst,
                LoadOrdering::SeqCst,
            ));
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_load,
    bench_store,
    bench_fetch_add,
    bench_compare_exchange
);
criterion_main!(benches);
