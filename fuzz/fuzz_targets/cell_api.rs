// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drives arbitrary operation sequences against a single cell and mirrors
//! every step on a plain integer model. Single-threaded, so the two must
//! agree exactly; any divergence is a forwarding bug in the operation table.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ordered_atomics::{AtomicCell, LoadOrdering, StoreOrdering, UpdateOrdering};

#[derive(Arbitrary, Clone, Copy, Debug)]
enum Load {
    Relaxed,
    Acquire,
    SeqCst,
}

impl From<Load> for LoadOrdering {
    fn from(value: Load) -> Self {
        match value {
            Load::Relaxed => Self::Relaxed,
            Load::Acquire => Self::Acquire,
            Load::SeqCst => Self::SeqCst,
        }
    }
}

#[derive(Arbitrary, Clone, Copy, Debug)]
enum Store {
    Relaxed,
    Release,
    SeqCst,
}

impl From<Store> for StoreOrdering {
    fn from(value: Store) -> Self {
        match value {
            Store::Relaxed => Self::Relaxed,
            Store::Release => Self::Release,
            Store::SeqCst => Self::SeqCst,
        }
    }
}

/// Only the nine valid compare-exchange pairs are generated; the invalid
/// combinations are rejected by a debug assertion and are not part of the
/// fuzzed surface.
#[derive(Arbitrary, Clone, Copy, Debug)]
enum CmpxchgPair {
    RelaxedRelaxed,
    AcquireRelaxed,
    ReleaseRelaxed,
    AcqRelRelaxed,
    SeqCstRelaxed,
    AcquireAcquire,
    AcqRelAcquire,
    SeqCstAcquire,
    SeqCstSeqCst,
}

impl From<CmpxchgPair> for (UpdateOrdering, LoadOrdering) {
    fn from(value: CmpxchgPair) -> Self {
        match value {
            CmpxchgPair::RelaxedRelaxed => (UpdateOrdering::Relaxed, LoadOrdering::Relaxed),
            CmpxchgPair::AcquireRelaxed => (UpdateOrdering::Acquire, LoadOrdering::Relaxed),
            CmpxchgPair::ReleaseRelaxed => (UpdateOrdering::Release, LoadOrdering::Relaxed),
            CmpxchgPair::AcqRelRelaxed => (UpdateOrdering::AcqRel, LoadOrdering::Relaxed),
            CmpxchgPair::SeqCstRelaxed => (UpdateOrdering::SeqCst, LoadOrdering::Relaxed),
            CmpxchgPair::AcquireAcquire => (UpdateOrdering::Acquire, LoadOrdering::Acquire),
            CmpxchgPair::AcqRelAcquire => (UpdateOrdering::AcqRel, LoadOrdering::Acquire),
            CmpxchgPair::SeqCstAcquire => (UpdateOrdering::SeqCst, LoadOrdering::Acquire),
            CmpxchgPair::SeqCstSeqCst => (UpdateOrdering::SeqCst, LoadOrdering::SeqCst),
        }
    }
}

#[derive(Arbitrary, Clone, Copy, Debug)]
enum Update {
    Relaxed,
    Acquire,
    Release,
    AcqRel,
    SeqCst,
}

impl From<Update> for UpdateOrdering {
    fn from(value: Update) -> Self {
        match value {
            Update::Relaxed => Self::Relaxed,
            Update::Acquire => Self::Acquire,
            Update::Release => Self::Release,
            Update::AcqRel => Self::AcqRel,
            Update::SeqCst => Self::SeqCst,
        }
    }
}

#[derive(Arbitrary, Clone, Copy, Debug)]
enum Op {
    Load(Load),
    Store(u64, Store),
    Exchange(u64, Update),
    CompareExchange(u64, u64, CmpxchgPair),
    CompareExchangeWeak(u64, u64, CmpxchgPair),
    FetchAdd(u64, Update),
    FetchSub(u64, Update),
    FetchAnd(u64, Update),
    FetchOr(u64, Update),
    FetchXor(u64, Update),
}

fuzz_target!(|data: (u64, Vec<Op>)| {
    let (initial, ops) = data;
    let cell = AtomicCell::prepare(initial);
    let mut model = initial;

    for op in ops {
        match op {
            Op::Load(order) => {
                assert_eq!(cell.load(order.into()), model);
            }
            Op::Store(value, order) => {
                cell.store(value, order.into());
                model = value;
            }
            Op::Exchange(value, order) => {
                assert_eq!(cell.exchange(value, order.into()), model);
                model = value;
            }
            Op::CompareExchange(current, new, pair) => {
                let (success, failure) = pair.into();
                let result = cell.compare_exchange(current, new, success, failure);
                if current == model {
                    assert_eq!(result, Ok(model));
                    model = new;
                } else {
                    assert_eq!(result, Err(model));
                }
            }
            Op::CompareExchangeWeak(current, new, pair) => {
                let (success, failure) = pair.into();
                // Spurious failure is permitted, so only a success is fully
                // checkable; a failure must still report the actual value.
                match cell.compare_exchange_weak(current, new, success, failure) {
                    Ok(prior) => {
                        assert_eq!(current, model);
                        assert_eq!(prior, model);
                        model = new;
                    }
                    Err(actual) => {
                        assert_eq!(actual, model);
                    }
                }
            }
            Op::FetchAdd(operand, order) => {
                assert_eq!(cell.fetch_add(operand, order.into()), model);
                model = model.wrapping_add(operand);
            }
            Op::FetchSub(operand, order) => {
                assert_eq!(cell.fetch_sub(operand, order.into()), model);
                model = model.wrapping_sub(operand);
            }
            Op::FetchAnd(operand, order) => {
                assert_eq!(cell.fetch_and(operand, order.into()), model);
                model &= operand;
            }
            Op::FetchOr(operand, order) => {
                assert_eq!(cell.fetch_or(operand, order.into()), model);
                model |= operand;
            }
            Op::FetchXor(operand, order) => {
                assert_eq!(cell.fetch_xor(operand, order.into()), model);
                model ^= operand;
            }
        }
    }

    assert_eq!(cell.dispose(), model);
});
