// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The stamped operation table.
//!
//! One macro invocation per supported integer type ties the integer to its
//! shared atomic representation and forwards the whole operation battery to
//! it. The table is the entire contents of this module; no per-type code
//! exists outside the macro.

use core::sync::atomic::{
    AtomicI8, AtomicI16, AtomicI32, AtomicI64, AtomicIsize, AtomicU8, AtomicU16, AtomicU32,
    AtomicU64, AtomicUsize,
};

use static_assertions::{assert_eq_align, assert_eq_size};

use crate::{LoadOrdering, StoreOrdering, UpdateOrdering};

/// Implementation-side counterpart of [`AtomicStorage`]. Sealed: the set of
/// storable types is closed by design.
///
/// [`AtomicStorage`]: crate::AtomicStorage
pub trait Sealed: 'static + Copy + Eq + Send + Sync + core::fmt::Debug {
    /// The platform's shared (atomic) representation for this width.
    type Shared: 'static + Send + Sync;

    /// Whether atomic operations on this width compile to lock-free
    /// instructions on the target. The crate only stamps widths the target
    /// natively supports, so this holds on every platform the crate builds
    /// for; [`prepare`] still debug-asserts it as a startup invariant.
    ///
    /// [`prepare`]: crate::AtomicCell::prepare
    const IS_ALWAYS_LOCK_FREE: bool;

    fn into_shared(self) -> Self::Shared;
    fn from_shared(shared: Self::Shared) -> Self;
    fn get_mut(shared: &mut Self::Shared) -> &mut Self;
    fn load(shared: &Self::Shared, order: LoadOrdering) -> Self;
    fn store(shared: &Self::Shared, value: Self, order: StoreOrdering);
    fn exchange(shared: &Self::Shared, value: Self, order: UpdateOrdering) -> Self;
    fn compare_exchange(
        shared: &Self::Shared,
        current: Self,
        new: Self,
        success: UpdateOrdering,
        failure: LoadOrdering,
    ) -> Result<Self, Self>;
    fn compare_exchange_weak(
        shared: &Self::Shared,
        current: Self,
        new: Self,
        success: UpdateOrdering,
        failure: LoadOrdering,
    ) -> Result<Self, Self>;
    fn fetch_add(shared: &Self::Shared, operand: Self, order: UpdateOrdering) -> Self;
    fn fetch_sub(shared: &Self::Shared, operand: Self, order: UpdateOrdering) -> Self;
    fn fetch_and(shared: &Self::Shared, operand: Self, order: UpdateOrdering) -> Self;
    fn fetch_or(shared: &Self::Shared, operand: Self, order: UpdateOrdering) -> Self;
    fn fetch_xor(shared: &Self::Shared, operand: Self, order: UpdateOrdering) -> Self;
}

macro_rules! stamp_storage {
    ($int:ty, $shared:ty, $width:literal) => {
        // The shared representation must be a drop-in view of the integer's
        // memory, or handing out the cell's address would be unsound.
        assert_eq_size!($int, $shared);
        assert_eq_align!($int, $shared);

        impl Sealed for $int {
            type Shared = $shared;

            const IS_ALWAYS_LOCK_FREE: bool = cfg!(target_has_atomic = $width);

            #[inline(always)]
            fn into_shared(self) -> Self::Shared {
                <$shared>::new(self)
            }

            #[inline(always)]
            fn from_shared(shared: Self::Shared) -> Self {
                shared.into_inner()
            }

            #[inline(always)]
            fn get_mut(shared: &mut Self::Shared) -> &mut Self {
                shared.get_mut()
            }

            #[inline(always)]
            fn load(shared: &Self::Shared, order: LoadOrdering) -> Self {
                shared.load(order.to_core())
            }

            #[inline(always)]
            fn store(shared: &Self::Shared, value: Self, order: StoreOrdering) {
                shared.store(value, order.to_core())
            }

            #[inline(always)]
            fn exchange(shared: &Self::Shared, value: Self, order: UpdateOrdering) -> Self {
                shared.swap(value, order.to_core())
            }

            #[inline(always)]
            fn compare_exchange(
                shared: &Self::Shared,
                current: Self,
                new: Self,
                success: UpdateOrdering,
                failure: LoadOrdering,
            ) -> Result<Self, Self> {
                shared.compare_exchange(current, new, success.to_core(), failure.to_core())
            }

            #[inline(always)]
            fn compare_exchange_weak(
                shared: &Self::Shared,
                current: Self,
                new: Self,
                success: UpdateOrdering,
                failure: LoadOrdering,
            ) -> Result<Self, Self> {
                shared.compare_exchange_weak(current, new, success.to_core(), failure.to_core())
            }

            #[inline(always)]
            fn fetch_add(shared: &Self::Shared, operand: Self, order: UpdateOrdering) -> Self {
                shared.fetch_add(operand, order.to_core())
            }

            #[inline(always)]
            fn fetch_sub(shared: &Self::Shared, operand: Self, order: UpdateOrdering) -> Self {
                shared.fetch_sub(operand, order.to_core())
            }

            #[inline(always)]
            fn fetch_and(shared: &Self::Shared, operand: Self, order: UpdateOrdering) -> Self {
                shared.fetch_and(operand, order.to_core())
            }

            #[inline(always)]
            fn fetch_or(shared: &Self::Shared, operand: Self, order: UpdateOrdering) -> Self {
                shared.fetch_or(operand, order.to_core())
            }

            #[inline(always)]
            fn fetch_xor(shared: &Self::Shared, operand: Self, order: UpdateOrdering) -> Self {
                shared.fetch_xor(operand, order.to_core())
            }
        }
    };
}

stamp_storage!(i8, AtomicI8, "8");
stamp_storage!(i16, AtomicI16, "16");
stamp_storage!(i32, AtomicI32, "32");
stamp_storage!(i64, AtomicI64, "64");
stamp_storage!(isize, AtomicIsize, "ptr");

stamp_storage!(u8, AtomicU8, "8");
stamp_storage!(u16, AtomicU16, "16");
stamp_storage!(u32, AtomicU32, "32");
stamp_storage!(u64, AtomicU64, "64");
stamp_storage!(usize, AtomicUsize, "ptr");
