//! Alternative lists and compile-time index resolution.
//!
//! A variant's alternatives are written as a tuple, `(A, B, C)`, and this
//! crate answers the questions the engine asks about such a list:
//!
//! - how many alternatives there are ([`TypeList::LEN`]),
//! - which ordinal holds a given type ([`Member`]),
//! - which type sits at a given ordinal ([`Alternative`]),
//! - which alternative a foreign value converts into ([`Resolve`]),
//! - what raw storage fits every alternative ([`TypeList::Storage`]).
//!
//! Every answer is computed by trait resolution, so a lookup that has no
//! answer is a compile error rather than a runtime one:
//!
//! ```compile_fail
//! use oneof_index::{Member, Ordinal};
//! fn ordinal<L: Member<T, I>, T, I>() -> usize { L::ORDINAL }
//! // `u8` is not one of the alternatives.
//! let _ = ordinal::<(i32, String), u8, _>();
//! ```
//!
//! ```compile_fail
//! use oneof_index::Member;
//! fn ordinal<L: Member<T, I>, T, I>() -> usize { L::ORDINAL }
//! // `i32` appears twice, so the lookup is ambiguous.
//! let _ = ordinal::<(i32, i32), i32, _>();
//! ```
//!
//! ```compile_fail
//! use oneof_index::Resolve;
//! fn convert<L: Resolve<X, I>, X, I>(x: X) -> L::Target { L::convert(x) }
//! // `u8` converts into both `u16` and `u32`.
//! let _ = convert::<(u16, u32), u8, _>(7u8);
//! ```
//!
//! Lists of 1 to 12 alternatives are supported.

#![allow(
    unsafe_code,
    reason = "the list traits are unsafe to implement; the engine trusts their answers"
)]

mod slot;
mod tuples;

pub use slot::Slot;

/// Index value reported by a variant that holds nothing.
pub const VALUELESS: usize = usize::MAX;

/// Type-level ordinal used to tell apart the per-position impls of
/// [`Member`] and [`Resolve`].
///
/// Callers never name it; it is always inferred with `_`.
pub struct Ordinal<const N: usize>;

/// A finite, ordered list of alternative types.
///
/// # Safety
///
/// `Storage` must be at least as large and as aligned as every alternative,
/// with each alternative readable at offset 0. The engine writes and reads
/// alternatives through a pointer to `Storage` on the strength of this.
pub unsafe trait TypeList: Sized {
    /// Number of alternatives.
    const LEN: usize;

    /// Raw storage able to hold any single alternative.
    type Storage;

    /// `std::any::type_name` of the alternative at `ordinal`, if in range.
    fn type_name(ordinal: usize) -> Option<&'static str>;
}

/// `T` occurs exactly once in the list, at [`Member::ORDINAL`].
///
/// The `I` parameter is an [`Ordinal`] marker that keeps the per-position
/// impls coherent. When `T` is absent no impl applies, and when it occurs
/// more than once several do; both are rejected by the compiler.
///
/// # Safety
///
/// The alternative at `ORDINAL` must be exactly `T`.
pub unsafe trait Member<T, I>: TypeList {
    const ORDINAL: usize;
}

/// The alternative at ordinal `N`. Out-of-range `N` has no impl.
///
/// # Safety
///
/// `Type` must be exactly the alternative at `N`.
pub unsafe trait Alternative<const N: usize>: TypeList {
    type Type;
}

/// Conversion target for a value of type `X`.
///
/// Resolves to the single alternative `Target` with `X: Into<Target>`.
/// Zero or several candidates leave the `I` marker ambiguous, which the
/// compiler reports at the call site.
///
/// # Safety
///
/// `Target` must be exactly the alternative at `ORDINAL`.
pub unsafe trait Resolve<X, I>: TypeList {
    type Target;

    const ORDINAL: usize;

    fn convert(value: X) -> Self::Target;
}
