#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    unsafe_code,
    reason = "tests drive the raw storage protocol directly"
)]

use std::cell::Cell;
use std::mem::{align_of, size_of};
use std::panic::{catch_unwind, AssertUnwindSafe};

use pretty_assertions::assert_eq;

use super::*;

thread_local! {
    static DROPS: Cell<usize> = const { Cell::new(0) };
}

fn drops() -> usize {
    DROPS.with(Cell::get)
}

struct Counted(u32);

impl Drop for Counted {
    fn drop(&mut self) {
        DROPS.with(|d| d.set(d.get() + 1));
    }
}

struct Bomb;

impl Drop for Bomb {
    fn drop(&mut self) {
        panic!("bomb destructor");
    }
}

type List = (u8, Counted, String);

#[test]
fn empty_storage_is_valueless() {
    let storage = Storage::<List>::empty();
    assert!(storage.is_valueless());
    assert_eq!(storage.index(), VALUELESS);
}

#[test]
fn construct_sets_index_and_value() {
    let mut storage = Storage::<List>::empty();
    // SAFETY: empty storage; `String` is ordinal 2.
    let value = unsafe { storage.construct(2, String::from("abc")) };
    value.push('d');
    assert_eq!(storage.index(), 2);
    // SAFETY: ordinal 2 is live.
    assert_eq!(unsafe { storage.get::<String>() }, "abcd");
}

#[test]
fn destroy_drops_exactly_once() {
    let before = drops();
    let mut storage = Storage::<List>::empty();
    // SAFETY: empty storage; `Counted` is ordinal 1.
    unsafe { storage.construct(1, Counted(7)) };
    storage.destroy();
    assert!(storage.is_valueless());
    assert_eq!(drops() - before, 1);

    storage.destroy();
    drop(storage);
    assert_eq!(drops() - before, 1);
}

#[test]
fn drop_destroys_the_active_alternative() {
    let before = drops();
    {
        let mut storage = Storage::<List>::empty();
        // SAFETY: empty storage; `Counted` is ordinal 1.
        unsafe { storage.construct(1, Counted(1)) };
    }
    assert_eq!(drops() - before, 1);
}

#[test]
fn take_moves_without_dropping() {
    let before = drops();
    let mut source = Storage::<List>::empty();
    // SAFETY: empty storage; `Counted` is ordinal 1.
    unsafe { source.construct(1, Counted(9)) };

    let taken = source.take();
    assert!(source.is_valueless());
    assert_eq!(taken.index(), 1);
    // SAFETY: ordinal 1 is live in `taken`.
    assert_eq!(unsafe { taken.get::<Counted>() }.0, 9);
    assert_eq!(drops(), before);

    drop(source);
    assert_eq!(drops(), before);
    drop(taken);
    assert_eq!(drops() - before, 1);
}

#[test]
fn read_hands_over_ownership() {
    let before = drops();
    let mut storage = Storage::<List>::empty();
    // SAFETY: empty storage; `Counted` is ordinal 1.
    unsafe { storage.construct(1, Counted(3)) };
    // SAFETY: ordinal 1 is live.
    let value = unsafe { storage.read::<Counted>() };
    assert!(storage.is_valueless());
    drop(storage);
    assert_eq!(drops(), before);
    assert_eq!(value.0, 3);
    drop(value);
    assert_eq!(drops() - before, 1);
}

#[test]
fn panicking_destructor_leaves_storage_valueless() {
    let mut storage = Storage::<(Bomb, u8)>::empty();
    // SAFETY: empty storage; `Bomb` is ordinal 0.
    unsafe { storage.construct(0, Bomb) };
    let result = catch_unwind(AssertUnwindSafe(|| storage.destroy()));
    assert!(result.is_err());
    assert!(storage.is_valueless());
}

#[test]
fn storage_is_inline_and_sized_for_the_largest_alternative() {
    assert_eq!(size_of::<Storage<(u8, u64)>>(), 2 * size_of::<u64>());
    assert_eq!(align_of::<Storage<(u8, u64)>>(), align_of::<u64>());
    assert_eq!(
        size_of::<Storage<(u8, [u64; 4])>>(),
        size_of::<[u64; 4]>() + size_of::<usize>()
    );
}
