//! Visitation: calling a user visitor with the active alternative.
//!
//! A visitor is any type implementing [`Visit<Arg>`] for every argument it
//! can be handed. Visiting a `Variant<(A, B)>` by shared reference needs
//! `Visit<&A>` and `Visit<&B>`; by exclusive reference `Visit<&mut A>` and
//! `Visit<&mut B>`; by value `Visit<A>` and `Visit<B>`. A missing impl is a
//! compile error at the call site, and every impl must produce the same
//! [`Visitor::Output`].
//!
//! The [`Shared`], [`Exclusive`] and [`Owned`] adapters turn a visitor into
//! a table [`Operation`](crate::raw::Operation) that hands over the active
//! alternative with the right ownership.

#![allow(
    unsafe_code,
    reason = "adapters turn a dispatched slot pointer back into a typed reference or value"
)]

use std::marker::PhantomData;
use std::ptr::NonNull;

use oneof_index::VALUELESS;

use crate::dispatch::{Apply, Dispatch, Operation};
use crate::storage::Alternatives;
use crate::variant::Variant;
use crate::zip::{visit_all, Given, Zip};

/// Common result type and valueless behavior of a visitor.
pub trait Visitor: Sized {
    type Output;

    /// Called instead of [`Visit::visit`] when a visited variant is
    /// valueless.
    ///
    /// The default treats that as a broken contract and panics. Override it
    /// to give valueless variants a meaning.
    fn valueless(self) -> Self::Output {
        panic!("visited a valueless variant");
    }
}

/// Handle one kind of argument.
pub trait Visit<Arg>: Visitor {
    fn visit(self, arg: Arg) -> Self::Output;
}

/// Hands a visitor `&'a T`.
pub struct Shared<'a, V> {
    visitor: V,
    _borrow: PhantomData<&'a ()>,
}

impl<V: Visitor> Shared<'_, V> {
    pub(crate) fn new(visitor: V) -> Self {
        Shared {
            visitor,
            _borrow: PhantomData,
        }
    }
}

impl<V: Visitor> Operation for Shared<'_, V> {
    type Output = V::Output;
}

// SAFETY: the slot is only read, through a shared borrow of the variant
// that lasts for `'a`.
unsafe impl<'a, T: 'a, V> Apply<T> for Shared<'a, V>
where
    V: Visit<&'a T>,
{
    #[inline]
    unsafe fn apply(self, slot: NonNull<u8>) -> V::Output {
        // SAFETY: `slot` holds a live `T` borrowed for `'a`.
        let value: &'a T = unsafe { slot.cast::<T>().as_ref() };
        self.visitor.visit(value)
    }
}

/// Hands a visitor `&'a mut T`.
pub struct Exclusive<'a, V> {
    visitor: V,
    _borrow: PhantomData<&'a mut ()>,
}

impl<V: Visitor> Exclusive<'_, V> {
    pub(crate) fn new(visitor: V) -> Self {
        Exclusive {
            visitor,
            _borrow: PhantomData,
        }
    }
}

impl<V: Visitor> Operation for Exclusive<'_, V> {
    type Output = V::Output;
}

// SAFETY: the slot is reached through an exclusive borrow of the variant
// that lasts for `'a`.
unsafe impl<'a, T: 'a, V> Apply<T> for Exclusive<'a, V>
where
    V: Visit<&'a mut T>,
{
    #[inline]
    unsafe fn apply(self, slot: NonNull<u8>) -> V::Output {
        let mut ptr = slot.cast::<T>();
        // SAFETY: `slot` holds a live `T` borrowed exclusively for `'a`.
        let value: &'a mut T = unsafe { ptr.as_mut() };
        self.visitor.visit(value)
    }
}

/// Hands a visitor the alternative by value.
pub struct Owned<V> {
    visitor: V,
}

impl<V: Visitor> Owned<V> {
    pub(crate) fn new(visitor: V) -> Self {
        Owned { visitor }
    }
}

impl<V: Visitor> Operation for Owned<V> {
    type Output = V::Output;
}

// SAFETY: the variant releases its index before dispatching, so the value
// read here has no other owner.
unsafe impl<T, V> Apply<T> for Owned<V>
where
    V: Visit<T>,
{
    #[inline]
    unsafe fn apply(self, slot: NonNull<u8>) -> V::Output {
        // SAFETY: `slot` holds a live `T` whose ownership was released to us.
        let value = unsafe { slot.cast::<T>().as_ptr().read() };
        self.visitor.visit(value)
    }
}

impl<L: Alternatives> Variant<L> {
    /// Call `visitor` with a shared reference to the active alternative.
    ///
    /// A valueless variant calls [`Visitor::valueless`] instead.
    pub fn visit<'a, V>(&'a self, visitor: V) -> V::Output
    where
        V: Visitor,
        L: Dispatch<Shared<'a, V>>,
    {
        if self.index() == VALUELESS {
            tracing::trace!("visiting a valueless variant");
            return visitor.valueless();
        }
        // SAFETY: the variant holds a value; `Shared` only reads it.
        unsafe { self.storage.apply(Shared::new(visitor)) }
    }

    /// Call `visitor` with an exclusive reference to the active alternative.
    pub fn visit_mut<'a, V>(&'a mut self, visitor: V) -> V::Output
    where
        V: Visitor,
        L: Dispatch<Exclusive<'a, V>>,
    {
        if self.index() == VALUELESS {
            tracing::trace!("visiting a valueless variant");
            return visitor.valueless();
        }
        // SAFETY: the variant holds a value and is borrowed exclusively.
        unsafe { self.storage.apply_mut(Exclusive::new(visitor)) }
    }

    /// Consume the variant, calling `visitor` with the active alternative by
    /// value.
    pub fn into_visit<V>(mut self, visitor: V) -> V::Output
    where
        V: Visitor,
        L: Dispatch<Owned<V>>,
    {
        if self.index() == VALUELESS {
            tracing::trace!("visiting a valueless variant");
            return visitor.valueless();
        }
        // SAFETY: the variant holds a value; `Owned` takes it over.
        unsafe { self.storage.apply_owned(Owned::new(visitor)) }
    }

    /// Call `visitor` with `(&alternative, extra)`.
    ///
    /// Shorthand for [`visit_all`] over this variant and one plain value,
    /// for visitors that need extra context alongside the alternative.
    pub fn visit_with<'a, V, E>(&'a self, visitor: V, extra: E) -> V::Output
    where
        V: Visitor,
        (&'a Self, Given<E>): Zip<V>,
    {
        visit_all((self, Given(extra)), visitor)
    }
}
