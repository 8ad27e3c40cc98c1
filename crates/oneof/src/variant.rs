//! The variant value and its construction/assignment protocol.
//!
//! Every transition goes through [`Storage`], which keeps one rule: the
//! index names a live alternative or is [`VALUELESS`], never anything in
//! between. Constructors write first and publish the index after. Anything
//! that replaces one alternative with another destroys the old value first,
//! so a panic while producing the new one leaves the variant valueless
//! rather than half-built.

#![allow(
    unsafe_code,
    reason = "ordinals are matched against the alternative list before the slot is touched"
)]

use std::convert::Infallible;
use std::ptr::NonNull;

use oneof_index::{Alternative, Member, Resolve, VALUELESS};

use crate::dispatch::{Apply, Dispatch, Operation};
use crate::storage::{Alternatives, Storage};

/// A value that is exactly one of the alternatives in `L`, or valueless.
///
/// `L` is a tuple of 1 to 12 distinct types; `Variant<(i64, String)>` holds
/// either an `i64` or a `String`. The value lives inline, with no heap
/// allocation; wrap recursive alternatives in [`Indirect`](crate::Indirect).
pub struct Variant<L: Alternatives> {
    pub(crate) storage: Storage<L>,
}

impl<L: Alternatives> Variant<L> {
    #[inline]
    pub(crate) const fn valueless() -> Self {
        Variant {
            storage: Storage::empty(),
        }
    }

    /// Hold `value`, selecting the alternative by its exact type.
    ///
    /// Use a turbofish to pick the alternative explicitly:
    /// `Variant::<(i64, String)>::new::<String, _>(name)`.
    pub fn new<T, I>(value: T) -> Self
    where
        L: Member<T, I>,
    {
        let mut variant = Self::valueless();
        // SAFETY: fresh storage is valueless; `ORDINAL` is the position of `T`.
        unsafe { variant.storage.construct(<L as Member<T, I>>::ORDINAL, value) };
        variant
    }

    /// Hold `value` converted into the single alternative it converts into.
    ///
    /// `Variant::<(i64, String)>::convert("name")` holds a `String`.
    ///
    /// An exact match gets no priority here. A value whose own type is an
    /// alternative is ambiguous as soon as another alternative also converts
    /// from it, so use [`Variant::new`] for that case:
    ///
    /// ```compile_fail
    /// let v = oneof::Variant::<(String, Box<str>)>::convert(String::new());
    /// ```
    ///
    /// ```
    /// let v = oneof::Variant::<(String, Box<str>)>::new(String::new());
    /// assert_eq!(v.index(), 0);
    /// ```
    pub fn convert<X, I>(value: X) -> Self
    where
        L: Resolve<X, I>,
    {
        let mut variant = Self::valueless();
        let value = <L as Resolve<X, I>>::convert(value);
        // SAFETY: fresh storage is valueless; `Target` sits at `ORDINAL`.
        unsafe { variant.storage.construct(<L as Resolve<X, I>>::ORDINAL, value) };
        variant
    }

    /// Hold `value` as the alternative at ordinal `N`.
    pub fn at<const N: usize>(value: <L as Alternative<N>>::Type) -> Self
    where
        L: Alternative<N>,
    {
        let mut variant = Self::valueless();
        // SAFETY: fresh storage is valueless; `Type` sits at `N`.
        unsafe { variant.storage.construct(N, value) };
        variant
    }

    /// Move the value out, leaving `self` valueless.
    ///
    /// The move is a bitwise transfer of the slot; no alternative's code runs.
    pub fn take(&mut self) -> Self {
        Variant {
            storage: self.storage.take(),
        }
    }

    /// Move assignment: replace `self` with the contents of `source`,
    /// leaving `source` valueless.
    ///
    /// The source is emptied before the old value of `self` is dropped, so a
    /// panicking destructor cannot leave the moved value with two owners.
    pub fn take_from(&mut self, source: &mut Self) {
        let incoming = source.storage.take();
        tracing::trace!(from = self.index(), to = incoming.index(), "move assignment");
        self.storage.destroy();
        self.storage = incoming;
    }

    /// Assign `value` to the alternative of type `T`.
    ///
    /// If `T` is already active the value is assigned in place, reusing the
    /// existing object's storage. Otherwise the old alternative is destroyed
    /// and `value` constructed in its place.
    pub fn assign<T, I>(&mut self, value: T) -> &mut T
    where
        L: Member<T, I>,
    {
        // SAFETY: `ORDINAL` is the position of `T`.
        unsafe { self.assign_ordinal(<L as Member<T, I>>::ORDINAL, value) }
    }

    /// Assign `value` converted into the single alternative it converts into.
    ///
    /// Resolution is the same as for [`Variant::convert`]: an exact match
    /// plus a second convertible alternative is ambiguous. Use
    /// [`Variant::assign`] to assign a value of an alternative's own type.
    pub fn assign_convert<X, I>(&mut self, value: X) -> &mut <L as Resolve<X, I>>::Target
    where
        L: Resolve<X, I>,
    {
        let value = <L as Resolve<X, I>>::convert(value);
        // SAFETY: `Target` sits at `ORDINAL`.
        unsafe { self.assign_ordinal(<L as Resolve<X, I>>::ORDINAL, value) }
    }

    /// Destroy the current value and hold `value` as alternative `T`.
    pub fn emplace<T, I>(&mut self, value: T) -> &mut T
    where
        L: Member<T, I>,
    {
        self.storage.destroy();
        // SAFETY: just destroyed; `ORDINAL` is the position of `T`.
        unsafe { self.storage.construct(<L as Member<T, I>>::ORDINAL, value) }
    }

    /// Destroy the current value and hold `value` as the alternative at `N`.
    pub fn emplace_at<const N: usize>(
        &mut self,
        value: <L as Alternative<N>>::Type,
    ) -> &mut <L as Alternative<N>>::Type
    where
        L: Alternative<N>,
    {
        self.storage.destroy();
        // SAFETY: just destroyed; `Type` sits at `N`.
        unsafe { self.storage.construct(N, value) }
    }

    /// Destroy the current value, then build alternative `T` with `make`.
    ///
    /// If `make` panics the variant is left valueless.
    pub fn emplace_with<T, I>(&mut self, make: impl FnOnce() -> T) -> &mut T
    where
        L: Member<T, I>,
    {
        let ordinal = <L as Member<T, I>>::ORDINAL;
        // SAFETY: `ORDINAL` is the position of `T`.
        match unsafe { self.try_emplace_ordinal(ordinal, || Ok::<_, Infallible>(make())) } {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Destroy the current value, then build the alternative at `N` with
    /// `make`. If `make` panics the variant is left valueless.
    pub fn emplace_at_with<const N: usize>(
        &mut self,
        make: impl FnOnce() -> <L as Alternative<N>>::Type,
    ) -> &mut <L as Alternative<N>>::Type
    where
        L: Alternative<N>,
    {
        // SAFETY: `Type` sits at `N`.
        match unsafe { self.try_emplace_ordinal(N, || Ok::<_, Infallible>(make())) } {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Destroy the current value, then try to build alternative `T`.
    ///
    /// On `Err` the variant is left valueless and the error is returned.
    pub fn try_emplace_with<T, I, E>(
        &mut self,
        make: impl FnOnce() -> Result<T, E>,
    ) -> Result<&mut T, E>
    where
        L: Member<T, I>,
    {
        // SAFETY: `ORDINAL` is the position of `T`.
        unsafe { self.try_emplace_ordinal(<L as Member<T, I>>::ORDINAL, make) }
    }

    /// Ordinal form of [`Variant::try_emplace_with`].
    pub fn try_emplace_at_with<const N: usize, E>(
        &mut self,
        make: impl FnOnce() -> Result<<L as Alternative<N>>::Type, E>,
    ) -> Result<&mut <L as Alternative<N>>::Type, E>
    where
        L: Alternative<N>,
    {
        // SAFETY: `Type` sits at `N`.
        unsafe { self.try_emplace_ordinal(N, make) }
    }

    /// Destroy the current value, leaving the variant valueless.
    pub fn reset(&mut self) {
        self.storage.destroy();
    }

    /// Ordinal of the active alternative, or [`VALUELESS`].
    #[inline]
    pub fn index(&self) -> usize {
        self.storage.index()
    }

    #[inline]
    pub fn is_valueless(&self) -> bool {
        self.storage.is_valueless()
    }

    /// Whether the active alternative is `T`.
    #[inline]
    pub fn holds<T, I>(&self) -> bool
    where
        L: Member<T, I>,
    {
        self.index() == <L as Member<T, I>>::ORDINAL
    }

    /// Whether the active alternative is the one at ordinal `N`.
    #[inline]
    pub fn holds_at<const N: usize>(&self) -> bool
    where
        L: Alternative<N>,
    {
        self.index() == N
    }

    /// Type name of the active alternative; `None` when valueless.
    pub fn type_name(&self) -> Option<&'static str> {
        L::type_name(self.index())
    }

    /// # Safety
    ///
    /// `T` must be the alternative at `ordinal`.
    unsafe fn assign_ordinal<T>(&mut self, ordinal: usize, value: T) -> &mut T {
        if self.index() == ordinal {
            // SAFETY: the active alternative is `T`.
            let slot = unsafe { self.storage.get_mut::<T>() };
            *slot = value;
            return slot;
        }
        tracing::trace!(from = self.index(), to = ordinal, "switching alternative");
        self.storage.destroy();
        // SAFETY: just destroyed; the caller vouches for `ordinal`.
        unsafe { self.storage.construct(ordinal, value) }
    }

    /// # Safety
    ///
    /// `T` must be the alternative at `ordinal`.
    unsafe fn try_emplace_ordinal<T, E>(
        &mut self,
        ordinal: usize,
        make: impl FnOnce() -> Result<T, E>,
    ) -> Result<&mut T, E> {
        self.storage.destroy();
        let value = make().inspect_err(|_| {
            tracing::debug!(ordinal, "construction failed, variant left valueless");
        })?;
        // SAFETY: still valueless; the caller vouches for `ordinal`.
        Ok(unsafe { self.storage.construct(ordinal, value) })
    }
}

impl<L> Default for Variant<L>
where
    L: Alternatives + Alternative<0>,
    <L as Alternative<0>>::Type: Default,
{
    /// Holds the first alternative's default value.
    fn default() -> Self {
        Self::at::<0>(Default::default())
    }
}

/// Clones the active alternative into another slot.
///
/// With `existing` set the target already holds the same alternative and is
/// updated through `Clone::clone_from`; otherwise the target is empty and a
/// fresh clone is written into it.
pub struct CloneTo {
    target: NonNull<u8>,
    existing: bool,
}

impl Operation for CloneTo {
    type Output = ();
}

// SAFETY: reads the source through a shared reference and writes only the
// target slot, which the caller owns.
unsafe impl<T: Clone> Apply<T> for CloneTo {
    #[inline]
    unsafe fn apply(self, slot: NonNull<u8>) {
        // SAFETY: `slot` holds a live `T`.
        let source = unsafe { slot.cast::<T>().as_ref() };
        let target = self.target.cast::<T>();
        if self.existing {
            // SAFETY: the target holds a live `T` distinct from the source.
            unsafe { &mut *target.as_ptr() }.clone_from(source);
        } else {
            let value = source.clone();
            // SAFETY: the target slot is empty and fits `T`.
            unsafe { target.as_ptr().write(value) };
        }
    }
}

impl<L> Clone for Variant<L>
where
    L: Alternatives + Dispatch<CloneTo>,
{
    fn clone(&self) -> Self {
        let mut copy = Self::valueless();
        let ordinal = self.index();
        if ordinal != VALUELESS {
            let op = CloneTo {
                target: copy.storage.address_mut(),
                existing: false,
            };
            // SAFETY: `self` holds `ordinal`; `copy` is empty until published.
            unsafe {
                self.storage.apply(op);
                copy.storage.publish(ordinal);
            }
        }
        copy
    }

    /// Copy assignment.
    ///
    /// Same alternative on both sides: assigned in place with the
    /// alternative's own `clone_from`. Different alternatives: the source is
    /// cloned into a temporary first, then the old value is destroyed and
    /// the temporary moved in. A panicking clone leaves `self` untouched.
    fn clone_from(&mut self, source: &Self) {
        let ordinal = source.index();
        if ordinal == VALUELESS {
            self.reset();
            return;
        }
        if ordinal == self.index() {
            let op = CloneTo {
                target: self.storage.address_mut(),
                existing: true,
            };
            // SAFETY: both sides hold `ordinal` in distinct slots.
            unsafe { source.storage.apply(op) };
            return;
        }
        tracing::trace!(from = self.index(), to = ordinal, "copy assignment across alternatives");
        let mut incoming = Storage::<L>::empty();
        let op = CloneTo {
            target: incoming.address_mut(),
            existing: false,
        };
        // SAFETY: `source` holds `ordinal`; `incoming` is empty until published.
        unsafe {
            source.storage.apply(op);
            incoming.publish(ordinal);
        }
        self.storage.destroy();
        self.storage = incoming;
    }
}
