// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![no_std]

//! # Ordered atomic storage cells
//!
//! This library provides a single building block: an atomic storage cell for
//! each of the ten standard integer types (`i8`, `i16`, `i32`, `i64`,
//! `isize`, `u8`, `u16`, `u32`, `u64` and `usize`), together with a closed
//! set of atomic operations over that cell. Every operation takes an explicit
//! memory-ordering token and forwards directly to the platform's native
//! atomic instruction for the cell's width; there is no locking, no internal
//! retrying and no allocation anywhere in the crate.
//!
//! The fundamental constraints on the cells are:
//!
//! - Between [`prepare`] and [`dispose`], the wrapped value is accessed only
//!   through the atomic operations on the cell. The API makes non-atomic
//!   access unrepresentable in safe code, with the single exception of
//!   [`get_mut`], which requires exclusive access and therefore cannot
//!   participate in a race.
//!
//! - [`prepare`] and [`dispose`] themselves are not synchronisation points.
//!   The caller must guarantee that `prepare` happens-before any concurrent
//!   use of the cell, and that all concurrent use has ceased before
//!   `dispose` runs. Ownership of the cell makes the latter structural:
//!   `dispose` consumes the cell, so no shared borrow can outlive it.
//!
//! - Every supported width must be lock-free on the target platform. This is
//!   a correctness precondition, not a recoverable error: `prepare` checks it
//!   with a debug assertion and checked builds abort on violation, while
//!   release builds compile the check out and trust the platform.
//!
//! ## Memory orderings
//!
//! Orderings follow the standard acquire/release model. Rather than one
//! shared ordering enum, each operation family gets its own token type —
//! [`LoadOrdering`], [`StoreOrdering`] and [`UpdateOrdering`] — so that the
//! invalid combinations (a releasing load, an acquiring store) simply do not
//! exist. Compare-exchange takes a `(success, failure)` pair; the failure
//! token is a [`LoadOrdering`], which rules out `Release` and `AcqRel` on the
//! failure path where no store happens, and the remaining constraint — the
//! failure ordering must not be stronger than the success ordering — is
//! checked by a debug assertion at the call site.
//!
//! A compare-exchange returning `Err` is not an error in any meaningful
//! sense: it reports a lost race (or, for the weak form, a spurious failure)
//! and carries the value actually found in the cell. Callers treat it as a
//! control-flow signal, typically by retrying.
//!
//! ## Example
//!
//! ```
//! use ordered_atomics::{AtomicCell, LoadOrdering, UpdateOrdering};
//!
//! let cell = AtomicCell::prepare(10u32);
//! assert_eq!(cell.fetch_add(5, UpdateOrdering::SeqCst), 10);
//! assert_eq!(cell.load(LoadOrdering::SeqCst), 15);
//! assert_eq!(cell.dispose(), 15);
//! ```
//!
//! [`prepare`]: crate::AtomicCell::prepare
//! [`dispose`]: crate::AtomicCell::dispose
//! [`get_mut`]: crate::AtomicCell::get_mut

mod cell;
mod ops;

pub use cell::AtomicCell;

use crate::ops::Sealed;

/// Public trait for naming the integer types that can be stored in an
/// [`AtomicCell`]. These are exactly the fixed-width and pointer-width
/// integers for which the platform provides native atomic instructions.
pub trait AtomicStorage: Sealed {}

impl AtomicStorage for i8 {}
impl AtomicStorage for i16 {}
impl AtomicStorage for i32 {}
impl AtomicStorage for i64 {}
impl AtomicStorage for isize {}
impl AtomicStorage for u8 {}
impl AtomicStorage for u16 {}
impl AtomicStorage for u32 {}
impl AtomicStorage for u64 {}
impl AtomicStorage for usize {}

/// Memory orderings valid for an atomic load.
///
/// `Release` and `AcqRel` make no sense for a pure read and are therefore
/// not representable here.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LoadOrdering {
    /// Atomicity only: no ordering or visibility guarantee beyond the load
    /// itself.
    Relaxed,
    /// Later memory operations cannot be reordered before this load; pairs
    /// with a [`Release`] store of the same cell.
    ///
    /// [`Release`]: crate::StoreOrdering::Release
    Acquire,
    /// Acquire, plus participation in the single global total order of all
    /// sequentially consistent operations.
    SeqCst,
}

impl LoadOrdering {
    pub(crate) const fn to_core(self) -> core::sync::atomic::Ordering {
        match self {
            Self::Relaxed => core::sync::atomic::Ordering::Relaxed,
            Self::Acquire => core::sync::atomic::Ordering::Acquire,
            Self::SeqCst => core::sync::atomic::Ordering::SeqCst,
        }
    }

    /// Strength rank for the failure-not-stronger-than-success check.
    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Relaxed => 0,
            Self::Acquire => 1,
            Self::SeqCst => 2,
        }
    }
}

/// Memory orderings valid for an atomic store.
///
/// `Acquire` and `AcqRel` make no sense for a pure write and are therefore
/// not representable here.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StoreOrdering {
    /// Atomicity only: no ordering or visibility guarantee beyond the store
    /// itself.
    Relaxed,
    /// Earlier memory operations cannot be reordered after this store; pairs
    /// with an [`Acquire`] load of the same cell.
    ///
    /// [`Acquire`]: crate::LoadOrdering::Acquire
    Release,
    /// Release, plus participation in the single global total order of all
    /// sequentially consistent operations.
    SeqCst,
}

impl StoreOrdering {
    pub(crate) const fn to_core(self) -> core::sync::atomic::Ordering {
        match self {
            Self::Relaxed => core::sync::atomic::Ordering::Relaxed,
            Self::Release => core::sync::atomic::Ordering::Release,
            Self::SeqCst => core::sync::atomic::Ordering::SeqCst,
        }
    }
}

/// Memory orderings valid for a read-modify-write operation: exchange, the
/// success path of compare-exchange, and the fetch-and-modify family. All
/// five orderings apply, since these operations both read and write.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UpdateOrdering {
    /// Atomicity only.
    Relaxed,
    /// The read half is acquiring.
    Acquire,
    /// The write half is releasing.
    Release,
    /// Acquiring read, releasing write.
    AcqRel,
    /// `AcqRel`, plus participation in the single global total order of all
    /// sequentially consistent operations.
    SeqCst,
}

impl UpdateOrdering {
    pub(crate) const fn to_core(self) -> core::sync::atomic::Ordering {
        match self {
            Self::Relaxed => core::sync::atomic::Ordering::Relaxed,
            Self::Acquire => core::sync::atomic::Ordering::Acquire,
            Self::Release => core::sync::atomic::Ordering::Release,
            Self::AcqRel => core::sync::atomic::Ordering::AcqRel,
            Self::SeqCst => core::sync::atomic::Ordering::SeqCst,
        }
    }

    /// Strength rank for the failure-not-stronger-than-success check. Note
    /// that `Release` does not subsume an acquiring failure load, so it
    /// ranks below [`LoadOrdering::Acquire`].
    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Relaxed | Self::Release => 0,
            Self::Acquire | Self::AcqRel => 1,
            Self::SeqCst => 2,
        }
    }
}

/// An atomic fence, not tied to any cell.
///
/// Establishes the requested cross-thread ordering constraint at this point
/// in program order, with no associated data. A [`Relaxed`] fence is a no-op,
/// matching the platform primitive set, which only provides acquire, release,
/// acquire-release and sequentially consistent fences.
///
/// See [`core::sync::atomic::fence`] for the synchronisation details.
///
/// [`Relaxed`]: crate::UpdateOrdering::Relaxed
#[inline(always)]
pub fn fence(order: UpdateOrdering) {
    if let UpdateOrdering::Relaxed = order {
        return;
    }
    core::sync::atomic::fence(order.to_core());
}
