//! Raw variant storage: an uninitialized slot plus the active ordinal.
//!
//! The slot is `MaybeUninit<L::Storage>`, sized and aligned for the largest
//! alternative and placed inline. The index is [`VALUELESS`] whenever the
//! slot holds nothing, and it is the single source of truth for what must be
//! dropped: destruction clears it before running the destructor, and
//! construction sets it only after the value is fully written.

#![allow(
    unsafe_code,
    reason = "the slot is reinterpreted as whichever alternative the index names"
)]

use std::mem::{self, MaybeUninit};
use std::ptr::{self, NonNull};

use oneof_index::{TypeList, VALUELESS};

use crate::dispatch::{Dispatch, DropInPlace, Operation};

/// Lists a variant can be built over: every alternative can be dropped
/// through the jump table.
///
/// Implemented for every tuple of 1 to 12 alternatives.
pub trait Alternatives: TypeList + Dispatch<DropInPlace> {}

impl<L> Alternatives for L where L: TypeList + Dispatch<DropInPlace> {}

pub(crate) struct Storage<L: Alternatives> {
    slot: MaybeUninit<L::Storage>,
    index: usize,
}

impl<L: Alternatives> Storage<L> {
    #[inline]
    pub(crate) const fn empty() -> Self {
        Storage {
            slot: MaybeUninit::uninit(),
            index: VALUELESS,
        }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub(crate) fn is_valueless(&self) -> bool {
        self.index == VALUELESS
    }

    /// Slot address for shared access.
    #[inline]
    pub(crate) fn address(&self) -> NonNull<u8> {
        NonNull::from(&self.slot).cast()
    }

    /// Slot address for exclusive access.
    #[inline]
    pub(crate) fn address_mut(&mut self) -> NonNull<u8> {
        NonNull::from(&mut self.slot).cast()
    }

    /// Write `value` into the empty slot and make it the active alternative.
    ///
    /// # Safety
    ///
    /// The storage must be valueless and `ordinal` must be the position of
    /// `T` in `L`.
    #[inline]
    pub(crate) unsafe fn construct<T>(&mut self, ordinal: usize, value: T) -> &mut T {
        debug_assert!(self.is_valueless(), "construct over a live alternative");
        let ptr = self.address_mut().cast::<T>();
        // SAFETY: the slot fits and aligns every alternative, and nothing live
        // is overwritten because the storage is valueless.
        unsafe { ptr.as_ptr().write(value) };
        self.index = ordinal;
        tracing::trace!(ordinal, "constructed alternative");
        // SAFETY: the value was just written and is owned by `self`.
        unsafe { &mut *ptr.as_ptr() }
    }

    /// Mark a value written through [`Storage::address_mut`] as live.
    ///
    /// # Safety
    ///
    /// The slot must hold a fully initialized alternative at `ordinal`, and
    /// the storage must have been valueless before it was written.
    #[inline]
    pub(crate) unsafe fn publish(&mut self, ordinal: usize) {
        debug_assert!(self.is_valueless(), "publish over a live alternative");
        self.index = ordinal;
    }

    /// Drop the active alternative, if any, leaving the storage valueless.
    ///
    /// The index is cleared before the destructor runs, so a panicking
    /// destructor still leaves the storage valueless.
    pub(crate) fn destroy(&mut self) {
        let ordinal = self.release();
        if ordinal == VALUELESS {
            return;
        }
        tracing::trace!(ordinal, "destroying alternative");
        // SAFETY: `ordinal` was the live alternative and ownership has been
        // released to this call.
        unsafe { <L as Dispatch<DropInPlace>>::dispatch(DropInPlace, ordinal, self.address_mut()) }
    }

    /// Forget the active alternative without dropping it and return its
    /// ordinal. The caller becomes responsible for the slot contents.
    #[inline]
    pub(crate) fn release(&mut self) -> usize {
        mem::replace(&mut self.index, VALUELESS)
    }

    /// Move the contents out bitwise, leaving this storage valueless.
    pub(crate) fn take(&mut self) -> Self {
        let index = self.release();
        // SAFETY: the bytes now belong to the returned storage alone; this one
        // no longer considers them live.
        let slot = unsafe { ptr::read(&self.slot) };
        Storage { slot, index }
    }

    /// # Safety
    ///
    /// The active alternative must be `T`.
    #[inline]
    pub(crate) unsafe fn get<T>(&self) -> &T {
        // SAFETY: guaranteed by the caller.
        unsafe { self.address().cast::<T>().as_ref() }
    }

    /// # Safety
    ///
    /// The active alternative must be `T`.
    #[inline]
    pub(crate) unsafe fn get_mut<T>(&mut self) -> &mut T {
        let mut ptr = self.address_mut().cast::<T>();
        // SAFETY: guaranteed by the caller; `self` is borrowed exclusively.
        unsafe { ptr.as_mut() }
    }

    /// Move the active alternative out, leaving the storage valueless.
    ///
    /// # Safety
    ///
    /// The active alternative must be `T`.
    #[inline]
    pub(crate) unsafe fn read<T>(&mut self) -> T {
        self.release();
        // SAFETY: the caller guarantees a live `T`; releasing the index first
        // makes the returned value its only owner.
        unsafe { self.address().cast::<T>().as_ptr().read() }
    }

    /// Run `op` on the active alternative through a shared borrow.
    ///
    /// # Safety
    ///
    /// The storage must not be valueless, and `op` must only read the slot.
    #[inline]
    pub(crate) unsafe fn apply<Op>(&self, op: Op) -> Op::Output
    where
        Op: Operation,
        L: Dispatch<Op>,
    {
        // SAFETY: the index names the live alternative.
        unsafe { <L as Dispatch<Op>>::dispatch(op, self.index, self.address()) }
    }

    /// Run `op` on the active alternative through an exclusive borrow.
    ///
    /// # Safety
    ///
    /// The storage must not be valueless.
    #[inline]
    pub(crate) unsafe fn apply_mut<Op>(&mut self, op: Op) -> Op::Output
    where
        Op: Operation,
        L: Dispatch<Op>,
    {
        let ordinal = self.index;
        // SAFETY: the index names the live alternative.
        unsafe { <L as Dispatch<Op>>::dispatch(op, ordinal, self.address_mut()) }
    }

    /// Hand the active alternative to `op` by value, leaving the storage
    /// valueless.
    ///
    /// # Safety
    ///
    /// The storage must not be valueless, and `op` must take ownership of
    /// the value it is given.
    #[inline]
    pub(crate) unsafe fn apply_owned<Op>(&mut self, op: Op) -> Op::Output
    where
        Op: Operation,
        L: Dispatch<Op>,
    {
        let ordinal = self.release();
        // SAFETY: `ordinal` was live and its ownership passes to `op`.
        unsafe { <L as Dispatch<Op>>::dispatch(op, ordinal, self.address_mut()) }
    }
}

impl<L: Alternatives> Drop for Storage<L> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests;
