#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap/expect for brevity"
)]

use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;

use super::*;

type Bit = Variant<(i32, char)>;

/// One bit per alternative type.
trait Tag {
    const BIT: u8;
}

impl Tag for i32 {
    const BIT: u8 = 0;
}

impl Tag for char {
    const BIT: u8 = 1;
}

/// Encodes which alternative each of three inputs held.
struct Code;

impl Visitor for Code {
    type Output = u8;
}

impl<A: Tag, B: Tag, C: Tag> Visit<(&A, &B, &C)> for Code {
    fn visit(self, _: (&A, &B, &C)) -> u8 {
        (A::BIT << 2) | (B::BIT << 1) | C::BIT
    }
}

fn bit(set: bool) -> Bit {
    if set {
        Bit::new('x')
    } else {
        Bit::new(0i32)
    }
}

#[test]
fn three_way_zip_selects_every_combination() {
    let mut seen = FxHashSet::default();
    for code in 0u8..8 {
        let (a, b, c) = (bit(code & 4 != 0), bit(code & 2 != 0), bit(code & 1 != 0));
        let got = visit_all((&a, &b, &c), Code);
        assert_eq!(got, code);
        seen.insert(got);
    }
    assert_eq!(seen.len(), 8);
}

/// Pairs numbers and words.
struct Pair;

impl Visitor for Pair {
    type Output = String;

    fn valueless(self) -> String {
        String::from("incomplete")
    }
}

impl Visit<(&i32, &String)> for Pair {
    fn visit(self, (n, s): (&i32, &String)) -> String {
        format!("{n}:{s}")
    }
}

impl Visit<(&i32, &i32)> for Pair {
    fn visit(self, (a, b): (&i32, &i32)) -> String {
        format!("sum {}", a + b)
    }
}

impl Visit<(&String, &String)> for Pair {
    fn visit(self, (a, b): (&String, &String)) -> String {
        format!("{a}{b}")
    }
}

impl Visit<(&String, &i32)> for Pair {
    fn visit(self, (s, n): (&String, &i32)) -> String {
        s.repeat(usize::try_from(*n).unwrap_or(0))
    }
}

type Word = Variant<(i32, String)>;

#[test]
fn two_way_zip_dispatches_on_both_inputs() {
    let n = Word::new(2);
    let s = Word::convert("ab");
    assert_eq!(visit_all((&n, &s), Pair), "2:ab");
    assert_eq!(visit_all((&s, &n), Pair), "abab");
    assert_eq!(visit_all((&n, &n), Pair), "sum 4");
    assert_eq!(visit_all((&s, &s), Pair), "abab");
}

#[test]
fn any_valueless_input_calls_valueless() {
    let n = Word::new(2);
    let mut empty = Word::new(1);
    empty.reset();
    assert_eq!(visit_all((&n, &empty), Pair), "incomplete");
    assert_eq!(visit_all((&empty, &n), Pair), "incomplete");
}

/// Combines two owned numbers into the third input.
struct Combine;

impl Visitor for Combine {
    type Output = ();
}

impl Visit<(i32, i32, &mut i32)> for Combine {
    fn visit(self, (a, b, out): (i32, i32, &mut i32)) {
        *out = a * 10 + b;
    }
}

impl Visit<(i32, i32, &mut String)> for Combine {
    fn visit(self, (a, b, out): (i32, i32, &mut String)) {
        *out = format!("{b}{a}");
    }
}

type Num = Variant<(i32,)>;

#[test]
fn zip_mixes_owned_and_exclusive_inputs() {
    let mut out = Word::convert("");
    visit_all((Num::new(1), Num::new(2), &mut out), Combine);
    assert_eq!(out.get::<String, _>().unwrap(), "21");

    let mut out = Word::new(0);
    visit_all((Num::new(3), Num::new(4), &mut out), Combine);
    assert_eq!(out.get::<i32, _>(), Ok(&34));
}

/// Scales a measurement by a plain factor.
struct Scale;

impl Visitor for Scale {
    type Output = f64;
}

impl Visit<(&f64, f64)> for Scale {
    fn visit(self, (x, factor): (&f64, f64)) -> f64 {
        x * factor
    }
}

impl Visit<(&(f64, f64), f64)> for Scale {
    fn visit(self, ((w, h), factor): (&(f64, f64), f64)) -> f64 {
        w * h * factor
    }
}

#[test]
fn given_values_pass_through_unchanged() {
    let rect = Variant::<(f64, (f64, f64))>::new((2.0, 3.0));
    assert_eq!(visit_all((&rect, Given(0.5)), Scale), 3.0);
    let line = Variant::<(f64, (f64, f64))>::new(4.0f64);
    assert_eq!(line.visit_with(Scale, 2.0), 8.0);
}

#[test]
fn single_input_zip_wraps_argument_in_a_tuple() {
    struct One;

    impl Visitor for One {
        type Output = i32;
    }

    impl Visit<(&i32,)> for One {
        fn visit(self, (n,): (&i32,)) -> i32 {
            *n
        }
    }

    impl Visit<(&String,)> for One {
        fn visit(self, (s,): (&String,)) -> i32 {
            i32::try_from(s.len()).unwrap()
        }
    }

    assert_eq!(visit_all((&Word::new(5),), One), 5);
    assert_eq!(visit_all((&Word::convert("abc"),), One), 3);
}

#[test]
fn push_appends_to_the_accumulator() {
    assert_eq!(().push(1), (1,));
    assert_eq!((1, 'a').push("z"), (1, 'a', "z"));
}
