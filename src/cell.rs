// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{AtomicStorage, LoadOrdering, StoreOrdering, UpdateOrdering};

/// One atomically-accessed integer value.
///
/// A cell has no identity beyond its memory address and no relationship to
/// any other cell. Its address may be shared freely across threads as
/// `&AtomicCell<T>`; the atomic operation itself is the sole synchronisation
/// mechanism, and every operation completes in bounded time without blocking,
/// allocating or retrying internally.
///
/// The layout is transparent over the platform's atomic representation for
/// the width, which in turn has the size and alignment of `T` itself.
#[repr(transparent)]
pub struct AtomicCell<T: AtomicStorage> {
    shared: T::Shared,
}

/// Exactly the nine `(success, failure)` combinations the platform defines
/// for compare-exchange: the failure ordering must not be stronger than the
/// success ordering. The failure token type already rules out `Release` and
/// `AcqRel`, since no store happens on the failure path.
const fn cmpxchg_pair_is_valid(success: UpdateOrdering, failure: LoadOrdering) -> bool {
    failure.rank() <= success.rank()
}

impl<T: AtomicStorage> AtomicCell<T> {
    /// Constructs a cell holding `value`.
    ///
    /// Checked builds abort here if the platform cannot provide a lock-free
    /// atomic implementation for this width; release builds compile the
    /// check out. Atomicity is a correctness precondition of every later
    /// operation, not a recoverable condition, which is why this is an
    /// assertion and not a `Result`.
    ///
    /// This is not a synchronisation point: the caller must guarantee that
    /// construction happens-before any concurrent access to the cell.
    #[inline]
    #[must_use]
    pub fn prepare(value: T) -> Self {
        debug_assert!(
            T::IS_ALWAYS_LOCK_FREE,
            "atomic operations of this width are not lock-free on this target"
        );
        Self {
            shared: value.into_shared(),
        }
    }

    /// Extracts and returns the cell's current value, consuming the cell.
    ///
    /// Not a synchronisation point: all concurrent access must have ceased
    /// before this runs. Taking the cell by value makes that structural for
    /// borrow-based sharing.
    #[inline]
    #[must_use]
    pub fn dispose(self) -> T {
        T::from_shared(self.shared)
    }

    /// Returns a mutable reference to the wrapped value.
    ///
    /// This requires exclusive access to the cell, so no atomic instruction
    /// is needed and no race is possible.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        T::get_mut(&mut self.shared)
    }

    /// Atomically reads the current value under the given ordering.
    #[inline]
    pub fn load(&self, order: LoadOrdering) -> T {
        T::load(&self.shared, order)
    }

    /// Atomically writes `value` under the given ordering.
    #[inline]
    pub fn store(&self, value: T, order: StoreOrdering) {
        T::store(&self.shared, value, order)
    }

    /// Atomically swaps in `value`, returning the prior value.
    #[inline]
    pub fn exchange(&self, value: T, order: UpdateOrdering) -> T {
        T::exchange(&self.shared, value, order)
    }

    /// If the current value equals `current`, atomically replaces it with
    /// `new` under `success` and returns `Ok` with the prior value;
    /// otherwise leaves the cell unchanged, applies `failure`, and returns
    /// `Err` with the value actually found. Never fails spuriously.
    ///
    /// An `Err` reports a lost race, not an error: callers take it as a
    /// control-flow signal to retry or bail.
    ///
    /// Debug builds assert that `failure` is not stronger than `success`;
    /// see [`LoadOrdering`] for why the failure token cannot be releasing.
    #[inline]
    pub fn compare_exchange(
        &self,
        current: T,
        new: T,
        success: UpdateOrdering,
        failure: LoadOrdering,
    ) -> Result<T, T> {
        debug_assert!(
            cmpxchg_pair_is_valid(success, failure),
            "compare-exchange failure ordering {failure:?} is stronger than success ordering {success:?}"
        );
        T::compare_exchange(&self.shared, current, new, success, failure)
    }

    /// As [`compare_exchange`], but may spuriously return `Err` even when
    /// the current value equals `current`. The weak form can map to a more
    /// efficient instruction sequence on load-linked/store-conditional
    /// targets; callers must retry in a loop.
    ///
    /// [`compare_exchange`]: AtomicCell::compare_exchange
    #[inline]
    pub fn compare_exchange_weak(
        &self,
        current: T,
        new: T,
        success: UpdateOrdering,
        failure: LoadOrdering,
    ) -> Result<T, T> {
        debug_assert!(
            cmpxchg_pair_is_valid(success, failure),
            "compare-exchange failure ordering {failure:?} is stronger than success ordering {success:?}"
        );
        T::compare_exchange_weak(&self.shared, current, new, success, failure)
    }

    /// Atomically adds `operand`, returning the value before the addition.
    /// Wraps on overflow.
    #[inline]
    pub fn fetch_add(&self, operand: T, order: UpdateOrdering) -> T {
        T::fetch_add(&self.shared, operand, order)
    }

    /// Atomically subtracts `operand`, returning the value before the
    /// subtraction. Wraps on underflow.
    #[inline]
    pub fn fetch_sub(&self, operand: T, order: UpdateOrdering) -> T {
        T::fetch_sub(&self.shared, operand, order)
    }

    /// Atomically replaces the value with its bitwise "and" with `operand`,
    /// returning the value before the operation.
    #[inline]
    pub fn fetch_and(&self, operand: T, order: UpdateOrdering) -> T {
        T::fetch_and(&self.shared, operand, order)
    }

    /// Atomically replaces the value with its bitwise "or" with `operand`,
    /// returning the value before the operation.
    #[inline]
    pub fn fetch_or(&self, operand: T, order: UpdateOrdering) -> T {
        T::fetch_or(&self.shared, operand, order)
    }

    /// Atomically replaces the value with its bitwise "xor" with `operand`,
    /// returning the value before the operation.
    #[inline]
    pub fn fetch_xor(&self, operand: T, order: UpdateOrdering) -> T {
        T::fetch_xor(&self.shared, operand, order)
    }
}

impl<T: AtomicStorage> core::fmt::Debug for AtomicCell<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("AtomicCell")
            .field(&self.load(LoadOrdering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmpxchg_pair_table() {
        use LoadOrdering as L;
        use UpdateOrdering as U;
        let valid = [
            (U::Relaxed, L::Relaxed),
            (U::Acquire, L::Relaxed),
            (U::Release, L::Relaxed),
            (U::AcqRel, L::Relaxed),
            (U::SeqCst, L::Relaxed),
            (U::Acquire, L::Acquire),
            (U::AcqRel, L::Acquire),
            (U::SeqCst, L::Acquire),
            (U::SeqCst, L::SeqCst),
        ];
        for success in [U::Relaxed, U::Acquire, U::Release, U::AcqRel, U::SeqCst] {
            for failure in [L::Relaxed, L::Acquire, L::SeqCst] {
                assert_eq!(
                    cmpxchg_pair_is_valid(success, failure),
                    valid.contains(&(success, failure)),
                    "({success:?}, {failure:?})"
                );
            }
        }
    }
}
