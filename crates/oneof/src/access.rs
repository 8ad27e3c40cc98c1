//! Typed accessors: checked (`Result`) and conditional (`Option`) forms,
//! each by type and by ordinal. The `boxed` forms reach through an
//! [`Indirect`] alternative to the value it owns.

#![allow(
    unsafe_code,
    reason = "the slot is reinterpreted only after the index has been matched"
)]

use oneof_index::{Alternative, Member};

use crate::error::{Active, BadAccess};
use crate::indirect::Indirect;
use crate::storage::Alternatives;
use crate::variant::Variant;

impl<L: Alternatives> Variant<L> {
    /// Borrow the active `T`, or report what the variant holds instead.
    pub fn get<T, I>(&self) -> Result<&T, BadAccess>
    where
        L: Member<T, I>,
    {
        let ordinal = <L as Member<T, I>>::ORDINAL;
        self.get_if::<T, I>()
            .ok_or_else(|| self.bad_access::<T>(ordinal))
    }

    pub fn get_mut<T, I>(&mut self) -> Result<&mut T, BadAccess>
    where
        L: Member<T, I>,
    {
        let ordinal = <L as Member<T, I>>::ORDINAL;
        if self.index() != ordinal {
            return Err(self.bad_access::<T>(ordinal));
        }
        // SAFETY: the active alternative is `T`.
        Ok(unsafe { self.storage.get_mut::<T>() })
    }

    /// Move the active `T` out of the variant.
    pub fn into_inner<T, I>(mut self) -> Result<T, BadAccess>
    where
        L: Member<T, I>,
    {
        let ordinal = <L as Member<T, I>>::ORDINAL;
        if self.index() != ordinal {
            return Err(self.bad_access::<T>(ordinal));
        }
        // SAFETY: the active alternative is `T`.
        Ok(unsafe { self.storage.read::<T>() })
    }

    /// Borrow the active `T`, or `None`.
    pub fn get_if<T, I>(&self) -> Option<&T>
    where
        L: Member<T, I>,
    {
        if self.index() != <L as Member<T, I>>::ORDINAL {
            return None;
        }
        // SAFETY: the active alternative is `T`.
        Some(unsafe { self.storage.get::<T>() })
    }

    pub fn get_if_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L: Member<T, I>,
    {
        if self.index() != <L as Member<T, I>>::ORDINAL {
            return None;
        }
        // SAFETY: the active alternative is `T`.
        Some(unsafe { self.storage.get_mut::<T>() })
    }

    /// Borrow the alternative at ordinal `N`.
    pub fn get_at<const N: usize>(&self) -> Result<&<L as Alternative<N>>::Type, BadAccess>
    where
        L: Alternative<N>,
    {
        self.get_at_if::<N>()
            .ok_or_else(|| self.bad_access::<<L as Alternative<N>>::Type>(N))
    }

    pub fn get_at_mut<const N: usize>(
        &mut self,
    ) -> Result<&mut <L as Alternative<N>>::Type, BadAccess>
    where
        L: Alternative<N>,
    {
        if self.index() != N {
            return Err(self.bad_access::<<L as Alternative<N>>::Type>(N));
        }
        // SAFETY: the active alternative is the one at `N`.
        Ok(unsafe { self.storage.get_mut() })
    }

    /// Move the alternative at ordinal `N` out of the variant.
    pub fn into_at<const N: usize>(mut self) -> Result<<L as Alternative<N>>::Type, BadAccess>
    where
        L: Alternative<N>,
    {
        if self.index() != N {
            return Err(self.bad_access::<<L as Alternative<N>>::Type>(N));
        }
        // SAFETY: the active alternative is the one at `N`.
        Ok(unsafe { self.storage.read() })
    }

    pub fn get_at_if<const N: usize>(&self) -> Option<&<L as Alternative<N>>::Type>
    where
        L: Alternative<N>,
    {
        if self.index() != N {
            return None;
        }
        // SAFETY: the active alternative is the one at `N`.
        Some(unsafe { self.storage.get() })
    }

    pub fn get_at_if_mut<const N: usize>(&mut self) -> Option<&mut <L as Alternative<N>>::Type>
    where
        L: Alternative<N>,
    {
        if self.index() != N {
            return None;
        }
        // SAFETY: the active alternative is the one at `N`.
        Some(unsafe { self.storage.get_mut() })
    }

    /// Borrow the `T` inside an active `Indirect<T>` alternative.
    pub fn get_boxed<T, I>(&self) -> Result<&T, BadAccess>
    where
        L: Member<Indirect<T>, I>,
    {
        self.get::<Indirect<T>, I>().map(Indirect::get)
    }

    pub fn get_boxed_mut<T, I>(&mut self) -> Result<&mut T, BadAccess>
    where
        L: Member<Indirect<T>, I>,
    {
        self.get_mut::<Indirect<T>, I>().map(Indirect::get_mut)
    }

    pub fn get_boxed_if<T, I>(&self) -> Option<&T>
    where
        L: Member<Indirect<T>, I>,
    {
        self.get_if::<Indirect<T>, I>().map(Indirect::get)
    }

    pub fn get_boxed_if_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L: Member<Indirect<T>, I>,
    {
        self.get_if_mut::<Indirect<T>, I>().map(Indirect::get_mut)
    }

    #[cold]
    fn bad_access<T>(&self, requested: usize) -> BadAccess {
        let err = BadAccess::new::<T>(requested, Active::of::<L>(self.index()));
        tracing::debug!(%err, "refused variant access");
        err
    }
}
