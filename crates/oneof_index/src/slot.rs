//! Slot layout.
//!
//! `Slot<A, Slot<B, Slot<C, ()>>>` is a chain of `repr(C)` unions. Every
//! field of a `repr(C)` union lives at offset 0, so the chain is exactly as
//! large and as aligned as its largest and most-aligned member, and each
//! alternative can be read straight from the start of the slot.

use std::mem::ManuallyDrop;

/// One link of a slot chain: room for `H` or for anything `T` has room for.
///
/// The union is never read through its fields. The engine only takes its
/// address and casts it to the active alternative.
#[repr(C)]
#[allow(dead_code, reason = "fields exist for layout only and are never accessed")]
pub union Slot<H, T> {
    head: ManuallyDrop<H>,
    tail: ManuallyDrop<T>,
}
