//! Heap indirection for recursive alternatives.
//!
//! A variant stores its alternatives inline, so a type cannot contain a
//! variant that holds the type itself. `Indirect<T>` boxes the value and
//! behaves like `T` for copying, comparison, hashing and formatting: cloning
//! deep-copies, equality compares the pointees, and so on.
//!
//! Those recursive operations, plus drop, run under
//! [`ensure_sufficient_stack`] so deep trees do not overflow the stack.
//!
//! The wrapper stays visible to table dispatch: a visitor over a variant
//! holding `Indirect<Node>` implements `Visit<&Indirect<Node>>` and reaches
//! the node through `Deref`. Typed access can skip the wrapper with
//! [`Variant::get_boxed`](crate::Variant::get_boxed).

#![allow(
    unsafe_code,
    reason = "the box is taken out of ManuallyDrop exactly once, in drop or into_inner"
)]

use std::borrow::{Borrow, BorrowMut};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};

use crate::stack::ensure_sufficient_stack;

/// An owned, heap-allocated `T` with value semantics.
pub struct Indirect<T> {
    boxed: ManuallyDrop<Box<T>>,
}

impl<T> Indirect<T> {
    pub fn new(value: T) -> Self {
        Indirect {
            boxed: ManuallyDrop::new(Box::new(value)),
        }
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.boxed
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.boxed
    }

    /// Replace the pointee, keeping the allocation.
    pub fn set(&mut self, value: T) {
        *self.get_mut() = value;
    }

    pub fn into_inner(self) -> T {
        let mut this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the box is taken exactly once.
        let boxed = unsafe { ManuallyDrop::take(&mut this.boxed) };
        *boxed
    }
}

impl<T> Drop for Indirect<T> {
    fn drop(&mut self) {
        // SAFETY: called once, and `self.boxed` is not used afterwards.
        let boxed = unsafe { ManuallyDrop::take(&mut self.boxed) };
        ensure_sufficient_stack(move || drop(boxed));
    }
}

impl<T: Clone> Clone for Indirect<T> {
    fn clone(&self) -> Self {
        Indirect::new(ensure_sufficient_stack(|| self.get().clone()))
    }

    fn clone_from(&mut self, source: &Self) {
        ensure_sufficient_stack(|| self.get_mut().clone_from(source.get()));
    }
}

impl<T: Default> Default for Indirect<T> {
    fn default() -> Self {
        Indirect::new(T::default())
    }
}

impl<T> From<T> for Indirect<T> {
    fn from(value: T) -> Self {
        Indirect::new(value)
    }
}

impl<T> Deref for Indirect<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> DerefMut for Indirect<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T> AsRef<T> for Indirect<T> {
    fn as_ref(&self) -> &T {
        self.get()
    }
}

impl<T> AsMut<T> for Indirect<T> {
    fn as_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T> Borrow<T> for Indirect<T> {
    fn borrow(&self) -> &T {
        self.get()
    }
}

impl<T> BorrowMut<T> for Indirect<T> {
    fn borrow_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: PartialEq> PartialEq for Indirect<T> {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| self.get() == other.get())
    }
}

impl<T: Eq> Eq for Indirect<T> {}

impl<T: PartialOrd> PartialOrd for Indirect<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        ensure_sufficient_stack(|| self.get().partial_cmp(other.get()))
    }
}

impl<T: Ord> Ord for Indirect<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        ensure_sufficient_stack(|| self.get().cmp(other.get()))
    }
}

impl<T: Hash> Hash for Indirect<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ensure_sufficient_stack(|| self.get().hash(state));
    }
}

impl<T: fmt::Debug> fmt::Debug for Indirect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| fmt::Debug::fmt(self.get(), f))
    }
}

impl<T: fmt::Display> fmt::Display for Indirect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.get(), f)
    }
}
