//! List impls for tuples of 1 to 12 alternatives.

use crate::{Alternative, Member, Ordinal, Resolve, Slot, TypeList};

/// Expands `A, B, C` into `Slot<A, Slot<B, Slot<C, ()>>>`.
macro_rules! slots {
    () => { () };
    ($head:ident $(, $rest:ident)*) => { Slot<$head, slots!($($rest),*)> };
}

/// Implements the list traits for one tuple arity.
///
/// The per-position arms receive the whole generic list as a single
/// bracketed token tree so it can be repeated inside the outer repetition.
macro_rules! type_list {
    (@position [$($All:ident),+] $idx:literal : $T:ident) => {
        // SAFETY: `$T` is the tuple element at `$idx`.
        unsafe impl<$($All),+> Member<$T, Ordinal<$idx>> for ($($All,)+) {
            const ORDINAL: usize = $idx;
        }

        // SAFETY: `$T` is the tuple element at `$idx`.
        unsafe impl<$($All),+> Alternative<$idx> for ($($All,)+) {
            type Type = $T;
        }

        // SAFETY: `Target` is the tuple element at `$idx`.
        unsafe impl<X, $($All),+> Resolve<X, Ordinal<$idx>> for ($($All,)+)
        where
            X: Into<$T>,
        {
            type Target = $T;

            const ORDINAL: usize = $idx;

            #[inline]
            fn convert(value: X) -> $T {
                value.into()
            }
        }
    };
    (@positions $all:tt $($idx:literal : $T:ident),+) => {
        $(type_list!(@position $all $idx : $T);)+
    };
    ($len:literal => $($idx:literal : $T:ident),+) => {
        // SAFETY: the slot chain is a `repr(C)` union of every element.
        unsafe impl<$($T),+> TypeList for ($($T,)+) {
            const LEN: usize = $len;

            type Storage = slots!($($T),+);

            fn type_name(ordinal: usize) -> Option<&'static str> {
                [$(std::any::type_name::<$T>()),+].get(ordinal).copied()
            }
        }

        type_list!(@positions [$($T),+] $($idx : $T),+);
    };
}

type_list!(1 => 0: A);
type_list!(2 => 0: A, 1: B);
type_list!(3 => 0: A, 1: B, 2: C);
type_list!(4 => 0: A, 1: B, 2: C, 3: D);
type_list!(5 => 0: A, 1: B, 2: C, 3: D, 4: E);
type_list!(6 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F);
type_list!(7 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G);
type_list!(8 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H);
type_list!(9 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: J);
type_list!(10 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: J, 9: K);
type_list!(11 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: J, 9: K, 10: L);
type_list!(12 => 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: J, 9: K, 10: L, 11: M);
