//! Table dispatch over the active alternative.
//!
//! An [`Operation`] is a small value describing work to do on one
//! alternative. For every alternative list and every operation that can
//! handle all of its alternatives, [`Dispatch`] builds a jump table with one
//! entry per alternative, each a monomorphized trampoline that reinterprets
//! the slot as that alternative. Dispatching is a bounds-checked array index
//! and an indirect call.
//!
//! Everything here works on raw slot pointers, so the operations carry no
//! lifetimes of their own. The borrowing adapters in [`crate::visit`] and the
//! relational operations in [`crate::relation`] build on it.

#![allow(
    unsafe_code,
    reason = "trampolines reinterpret the variant slot as the active alternative"
)]

use std::ptr::NonNull;

use oneof_index::TypeList;

/// Work that can be dispatched to the active alternative.
pub trait Operation {
    type Output;
}

/// `Self` knows how to handle an alternative of type `T`.
///
/// # Safety
///
/// Implementations may assume `slot` points at a live, properly aligned `T`
/// and must respect whatever ownership the operation documents (shared,
/// exclusive, or taking the value).
pub unsafe trait Apply<T>: Operation {
    /// # Safety
    ///
    /// `slot` must point at a live `T` accessible under the operation's
    /// ownership rules.
    unsafe fn apply(self, slot: NonNull<u8>) -> Self::Output;
}

/// A list whose every alternative is handled by `Op`.
///
/// # Safety
///
/// `dispatch` must call `<Op as Apply<T>>::apply` for exactly the alternative
/// `T` at `ordinal`.
pub unsafe trait Dispatch<Op: Operation>: TypeList {
    /// # Safety
    ///
    /// `ordinal` must be the ordinal of the live alternative in `slot`.
    unsafe fn dispatch(op: Op, ordinal: usize, slot: NonNull<u8>) -> Op::Output;
}

/// Drops the active alternative in place.
pub struct DropInPlace;

impl Operation for DropInPlace {
    type Output = ();
}

// SAFETY: the caller hands over the value; it is dropped exactly once here.
unsafe impl<T> Apply<T> for DropInPlace {
    #[inline]
    unsafe fn apply(self, slot: NonNull<u8>) {
        // SAFETY: `slot` holds a live `T` that nobody will use again.
        unsafe { std::ptr::drop_in_place(slot.cast::<T>().as_ptr()) }
    }
}

/// Per-list jump table for one operation.
trait JumpTable<Op: Operation, const N: usize> {
    const TABLE: [Trampoline<Op>; N];
}

type Trampoline<Op> = unsafe fn(Op, NonNull<u8>) -> <Op as Operation>::Output;

macro_rules! dispatch_table {
    ($len:literal => $($T:ident),+) => {
        impl<Op, $($T),+> JumpTable<Op, $len> for ($($T,)+)
        where
            Op: Operation $(+ Apply<$T>)+,
        {
            const TABLE: [Trampoline<Op>; $len] = [$(<Op as Apply<$T>>::apply),+];
        }

        // SAFETY: entry `i` of the table is the trampoline for element `i`.
        unsafe impl<Op, $($T),+> Dispatch<Op> for ($($T,)+)
        where
            Op: Operation $(+ Apply<$T>)+,
        {
            #[inline]
            unsafe fn dispatch(op: Op, ordinal: usize, slot: NonNull<u8>) -> <Op as Operation>::Output {
                debug_assert!(ordinal < $len, "dispatch on ordinal {ordinal} of a {}-alternative list", $len);
                // SAFETY: the caller guarantees `slot` holds the alternative at `ordinal`.
                unsafe { (<Self as JumpTable<Op, $len>>::TABLE[ordinal])(op, slot) }
            }
        }
    };
}

dispatch_table!(1 => A);
dispatch_table!(2 => A, B);
dispatch_table!(3 => A, B, C);
dispatch_table!(4 => A, B, C, D);
dispatch_table!(5 => A, B, C, D, E);
dispatch_table!(6 => A, B, C, D, E, F);
dispatch_table!(7 => A, B, C, D, E, F, G);
dispatch_table!(8 => A, B, C, D, E, F, G, H);
dispatch_table!(9 => A, B, C, D, E, F, G, H, J);
dispatch_table!(10 => A, B, C, D, E, F, G, H, J, K);
dispatch_table!(11 => A, B, C, D, E, F, G, H, J, K, L);
dispatch_table!(12 => A, B, C, D, E, F, G, H, J, K, L, M);
