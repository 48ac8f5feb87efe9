// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cross-thread stress tests. These exercise actual hardware interleavings,
//! so they are probabilistic by nature: a failure here is a real bug, but a
//! pass is only evidence, not proof.

use std::thread;

use ordered_atomics::{AtomicCell, LoadOrdering, StoreOrdering, UpdateOrdering};

const THREADS: usize = 8;
const ROUNDS: usize = 10_000;

#[test]
fn fetch_add_loses_no_updates() {
    let counter = AtomicCell::prepare(0usize);
    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ROUNDS {
                    counter.fetch_add(1, UpdateOrdering::SeqCst);
                }
            });
        }
    });
    assert_eq!(counter.dispose(), THREADS * ROUNDS);
}

#[test]
fn fetch_sub_loses_no_updates() {
    let counter = AtomicCell::prepare((THREADS * ROUNDS) as u64);
    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ROUNDS {
                    counter.fetch_sub(1, UpdateOrdering::SeqCst);
                }
            });
        }
    });
    assert_eq!(counter.dispose(), 0);
}

/// Message-passing idiom: the writer fills a payload and then releases a
/// flag; the reader acquires the flag and must observe the whole payload.
/// A relaxed flag would give no such guarantee.
#[test]
fn release_store_publishes_payload() {
    for round in 1..=2_000u32 {
        let payload = AtomicCell::prepare(0u32);
        let flag = AtomicCell::prepare(0u8);
        thread::scope(|s| {
            s.spawn(|| {
                payload.store(round, StoreOrdering::Relaxed);
                flag.store(1, StoreOrdering::Release);
            });
            s.spawn(|| {
                while flag.load(LoadOrdering::Acquire) == 0 {
                    std::hint::spin_loop();
                }
                assert_eq!(payload.load(LoadOrdering::Relaxed), round);
            });
        });
        let _ = payload.dispose();
        let _ = flag.dispose();
    }
}

/// Increment via a weak compare-exchange retry loop instead of `fetch_add`.
/// Spurious failures and lost races both land on the retry path, so the
/// final count still has to be exact.
#[test]
fn weak_compare_exchange_retry_counts_exactly() {
    let counter = AtomicCell::prepare(0u32);
    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ROUNDS {
                    let mut current = counter.load(LoadOrdering::Relaxed);
                    loop {
                        match counter.compare_exchange_weak(
                            current,
                            current.wrapping_add(1),
                            UpdateOrdering::AcqRel,
                            LoadOrdering::Relaxed,
                        ) {
                            Ok(_) => break,
                            Err(actual) => current = actual,
                        }
                    }
                }
            });
        }
    });
    assert_eq!(counter.dispose(), (THREADS * ROUNDS) as u32);
}

/// Two threads take turns through an exchange-based baton; every handover
/// must observe the other side's previous write.
#[test]
fn exchange_hands_over_exactly_once() {
    let baton = AtomicCell::prepare(0u8);
    let taken = AtomicCell::prepare(0usize);
    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ROUNDS {
                    if baton.exchange(1, UpdateOrdering::AcqRel) == 0 {
                        taken.fetch_add(1, UpdateOrdering::Relaxed);
                        baton.store(0, StoreOrdering::Release);
                    }
                }
            });
        }
    });
    assert_eq!(baton.dispose(), 0);
    // Every successful take paired with a release; the exact count depends
    // on scheduling, but at least the first take always succeeds.
    assert!(taken.dispose() >= 1);
}

/// Strong compare-exchange as a one-shot claim: exactly one thread wins.
#[test]
fn strong_compare_exchange_claims_once() {
    let claim = AtomicCell::prepare(0u32);
    let winners = AtomicCell::prepare(0usize);
    thread::scope(|s| {
        let (claim, winners) = (&claim, &winners);
        for id in 1..=THREADS as u32 {
            s.spawn(move || {
                if claim
                    .compare_exchange(0, id, UpdateOrdering::AcqRel, LoadOrdering::Acquire)
                    .is_ok()
                {
                    winners.fetch_add(1, UpdateOrdering::Relaxed);
                }
            });
        }
    });
    let winner = claim.dispose();
    assert!((1..=THREADS as u32).contains(&winner));
    assert_eq!(winners.dispose(), 1);
}
