//! Tagged-union variant values.
//!
//! A [`Variant<L>`] holds exactly one value whose type is one of the
//! alternatives listed in the tuple `L`, or, after a failed replacement or
//! an explicit [`Variant::reset`], nothing at all. The value is stored
//! inline in a slot sized for the largest alternative, next to the ordinal
//! of the alternative it currently holds.
//!
//! ```
//! use oneof::{Variant, Visit, Visitor};
//!
//! type Token = Variant<(i64, String, char)>;
//!
//! struct Describe;
//!
//! impl Visitor for Describe {
//!     type Output = String;
//! }
//! impl Visit<&i64> for Describe {
//!     fn visit(self, n: &i64) -> String { format!("number {n}") }
//! }
//! impl Visit<&String> for Describe {
//!     fn visit(self, s: &String) -> String { format!("word {s}") }
//! }
//! impl Visit<&char> for Describe {
//!     fn visit(self, c: &char) -> String { format!("symbol {c}") }
//! }
//!
//! let mut token = Token::convert("let");
//! assert_eq!(token.index(), 1);
//! assert_eq!(token.visit(Describe), "word let");
//!
//! token.assign('=');
//! assert_eq!(token.get::<char, _>(), Ok(&'='));
//! assert!(token.get::<i64, _>().is_err());
//! ```
//!
//! # Layers
//!
//! - [`oneof_index`] resolves alternatives by type, ordinal or conversion at
//!   compile time and lays out the slot.
//! - [`raw`] is the table dispatch layer: one monomorphized trampoline per
//!   alternative, picked by ordinal.
//! - [`Variant`] implements construction, assignment, typed access,
//!   visitation and the relational traits on top of it.
//! - [`visit_all`] zips several variants into one visitor call.
//! - [`Indirect`] boxes recursive alternatives.
//!
//! Misuse is rejected at compile time. Naming a type that is not an
//! alternative fails, as does naming one listed twice:
//!
//! ```compile_fail
//! let v = oneof::Variant::<(i32, String)>::new(1u8);
//! ```
//!
//! ```compile_fail
//! let v = oneof::Variant::<(i32, i32)>::new(1i32);
//! ```
//!
//! A conversion with two possible targets is ambiguous:
//!
//! ```compile_fail
//! let v = oneof::Variant::<(u16, u32)>::convert(1u8);
//! ```
//!
//! A visitor must handle every alternative:
//!
//! ```compile_fail
//! use oneof::{Variant, Visit, Visitor};
//! struct OnlyInts;
//! impl Visitor for OnlyInts { type Output = (); }
//! impl Visit<&i32> for OnlyInts { fn visit(self, _: &i32) {} }
//! Variant::<(i32, bool)>::new(1i32).visit(OnlyInts);
//! ```
//!
//! # Tracing
//!
//! Construction, destruction and alternative switches emit `trace` events;
//! refused accesses and failed constructions emit `debug` events.

mod access;
mod dispatch;
mod error;
mod indirect;
mod relation;
mod stack;
mod storage;
mod variant;
mod visit;
mod zip;

pub use error::{Active, BadAccess};
pub use indirect::Indirect;
pub use oneof_index::{Alternative, Member, Ordinal, Resolve, TypeList, VALUELESS};
pub use stack::ensure_sufficient_stack;
pub use storage::Alternatives;
pub use variant::Variant;
pub use visit::{Visit, Visitor};
pub use zip::{visit_all, Given, Visitable, Zip};

/// Table dispatch internals.
///
/// These types appear in the trait bounds of [`Variant`]'s methods and
/// trait impls. Custom [`Operation`](raw::Operation)s can be dispatched
/// directly, but the slot-pointer contract is unsafe.
pub mod raw {
    pub use crate::dispatch::{Apply, Dispatch, DropInPlace, Operation};
    pub use crate::relation::{Compare, EqualTo, Format, HashInto, PartialCompare, TotalEq};
    pub use crate::variant::CloneTo;
    pub use crate::visit::{Exclusive, Owned, Shared};
    pub use crate::zip::{Curry, Push};
}
