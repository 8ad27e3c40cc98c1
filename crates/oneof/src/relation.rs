//! Equality, ordering, hashing and debug formatting.
//!
//! Variants compare by index first; only when both hold the same alternative
//! is the alternative's own relation consulted. A valueless variant equals
//! another valueless variant and orders before every variant that holds a
//! value.

#![allow(
    unsafe_code,
    reason = "both slots are reinterpreted as the alternative their shared index names"
)]

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

use oneof_index::VALUELESS;

use crate::dispatch::{Apply, Dispatch, Operation};
use crate::storage::Alternatives;
use crate::variant::Variant;

/// Compares the active alternative with the same alternative in `other`.
pub struct EqualTo {
    other: NonNull<u8>,
}

impl Operation for EqualTo {
    type Output = bool;
}

// SAFETY: both slots are only read.
unsafe impl<T: PartialEq> Apply<T> for EqualTo {
    #[inline]
    unsafe fn apply(self, slot: NonNull<u8>) -> bool {
        // SAFETY: both slots hold a live `T`.
        unsafe { slot.cast::<T>().as_ref() == self.other.cast::<T>().as_ref() }
    }
}

/// Witness that every alternative's equality is an equivalence relation.
///
/// Appears only in the bound of `Eq for Variant`; it is never dispatched.
pub struct TotalEq;

impl Operation for TotalEq {
    type Output = ();
}

// SAFETY: does not touch the slot.
unsafe impl<T: Eq> Apply<T> for TotalEq {
    unsafe fn apply(self, _slot: NonNull<u8>) {}
}

pub struct PartialCompare {
    other: NonNull<u8>,
}

impl Operation for PartialCompare {
    type Output = Option<Ordering>;
}

// SAFETY: both slots are only read.
unsafe impl<T: PartialOrd> Apply<T> for PartialCompare {
    #[inline]
    unsafe fn apply(self, slot: NonNull<u8>) -> Option<Ordering> {
        // SAFETY: both slots hold a live `T`.
        let (lhs, rhs) = unsafe { (slot.cast::<T>().as_ref(), self.other.cast::<T>().as_ref()) };
        lhs.partial_cmp(rhs)
    }
}

pub struct Compare {
    other: NonNull<u8>,
}

impl Operation for Compare {
    type Output = Ordering;
}

// SAFETY: both slots are only read.
unsafe impl<T: Ord> Apply<T> for Compare {
    #[inline]
    unsafe fn apply(self, slot: NonNull<u8>) -> Ordering {
        // SAFETY: both slots hold a live `T`.
        let (lhs, rhs) = unsafe { (slot.cast::<T>().as_ref(), self.other.cast::<T>().as_ref()) };
        Ord::cmp(lhs, rhs)
    }
}

/// Feeds the active alternative to a hasher.
pub struct HashInto<'h> {
    state: &'h mut dyn Hasher,
}

impl Operation for HashInto<'_> {
    type Output = ();
}

// SAFETY: the slot is only read.
unsafe impl<T: Hash> Apply<T> for HashInto<'_> {
    #[inline]
    unsafe fn apply(self, slot: NonNull<u8>) {
        let mut state = self.state;
        // SAFETY: the slot holds a live `T`.
        unsafe { slot.cast::<T>().as_ref() }.hash(&mut state);
    }
}

/// Writes `Variant(<ordinal>, <alternative:?>)`.
pub struct Format<'f, 'b> {
    f: &'f mut fmt::Formatter<'b>,
    ordinal: usize,
}

impl Operation for Format<'_, '_> {
    type Output = fmt::Result;
}

// SAFETY: the slot is only read.
unsafe impl<T: fmt::Debug> Apply<T> for Format<'_, '_> {
    unsafe fn apply(self, slot: NonNull<u8>) -> fmt::Result {
        // SAFETY: the slot holds a live `T`.
        let value = unsafe { slot.cast::<T>().as_ref() };
        self.f
            .debug_tuple("Variant")
            .field(&self.ordinal)
            .field(value)
            .finish()
    }
}

/// Total order of indices with valueless first.
///
/// `VALUELESS` is `usize::MAX`, so adding one with wraparound maps it to 0
/// and every real ordinal `k` to `k + 1`.
#[inline]
fn rank(index: usize) -> usize {
    index.wrapping_add(1)
}

impl<L> PartialEq for Variant<L>
where
    L: Alternatives + Dispatch<EqualTo>,
{
    fn eq(&self, other: &Self) -> bool {
        let index = self.index();
        if index != other.index() {
            return false;
        }
        if index == VALUELESS {
            return true;
        }
        let op = EqualTo {
            other: other.storage.address(),
        };
        // SAFETY: both sides hold `index`.
        unsafe { self.storage.apply(op) }
    }
}

impl<L> Eq for Variant<L> where L: Alternatives + Dispatch<EqualTo> + Dispatch<TotalEq> {}

impl<L> PartialOrd for Variant<L>
where
    L: Alternatives + Dispatch<EqualTo> + Dispatch<PartialCompare>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let index = self.index();
        if index != other.index() || index == VALUELESS {
            return Some(rank(index).cmp(&rank(other.index())));
        }
        let op = PartialCompare {
            other: other.storage.address(),
        };
        // SAFETY: both sides hold `index`.
        unsafe { self.storage.apply(op) }
    }
}

impl<L> Ord for Variant<L>
where
    L: Alternatives
        + Dispatch<EqualTo>
        + Dispatch<TotalEq>
        + Dispatch<PartialCompare>
        + Dispatch<Compare>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        let index = self.index();
        if index != other.index() || index == VALUELESS {
            return rank(index).cmp(&rank(other.index()));
        }
        let op = Compare {
            other: other.storage.address(),
        };
        // SAFETY: both sides hold `index`.
        unsafe { self.storage.apply(op) }
    }
}

impl<L> Hash for Variant<L>
where
    L: Alternatives + for<'h> Dispatch<HashInto<'h>>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index().hash(state);
        if self.is_valueless() {
            return;
        }
        // SAFETY: the variant holds a value.
        unsafe { self.storage.apply(HashInto { state }) }
    }
}

impl<L> fmt::Debug for Variant<L>
where
    L: Alternatives + for<'f, 'b> Dispatch<Format<'f, 'b>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valueless() {
            return f.write_str("Variant(<valueless>)");
        }
        let op = Format {
            f,
            ordinal: self.index(),
        };
        // SAFETY: the variant holds a value.
        unsafe { self.storage.apply(op) }
    }
}
