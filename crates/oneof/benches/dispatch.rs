//! Dispatch benchmarks for `oneof`.
//!
//! Compares visiting a `Variant` through its jump table against matching a
//! plain enum with the same alternatives, and measures joint visitation of
//! two variants.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use oneof::{visit_all, Variant, Visit, Visitor};

type Value = Variant<(u8, u16, u32, u64, i64, String)>;

enum Plain {
    A(u8),
    B(u16),
    C(u32),
    D(u64),
    E(i64),
    F(String),
}

fn values(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| match i % 6 {
            0 => Value::new(i as u8),
            1 => Value::new(i as u16),
            2 => Value::new(i as u32),
            3 => Value::new(i as u64),
            4 => Value::new(-(i as i64)),
            _ => Value::new(i.to_string()),
        })
        .collect()
}

fn plains(n: usize) -> Vec<Plain> {
    (0..n)
        .map(|i| match i % 6 {
            0 => Plain::A(i as u8),
            1 => Plain::B(i as u16),
            2 => Plain::C(i as u32),
            3 => Plain::D(i as u64),
            4 => Plain::E(-(i as i64)),
            _ => Plain::F(i.to_string()),
        })
        .collect()
}

/// Folds any alternative into a `u64`.
struct Weigh;

impl Visitor for Weigh {
    type Output = u64;
}

impl Visit<&u8> for Weigh {
    fn visit(self, v: &u8) -> u64 {
        u64::from(*v)
    }
}

impl Visit<&u16> for Weigh {
    fn visit(self, v: &u16) -> u64 {
        u64::from(*v)
    }
}

impl Visit<&u32> for Weigh {
    fn visit(self, v: &u32) -> u64 {
        u64::from(*v)
    }
}

impl Visit<&u64> for Weigh {
    fn visit(self, v: &u64) -> u64 {
        *v
    }
}

impl Visit<&i64> for Weigh {
    fn visit(self, v: &i64) -> u64 {
        v.unsigned_abs()
    }
}

impl Visit<&String> for Weigh {
    fn visit(self, v: &String) -> u64 {
        v.len() as u64
    }
}

fn weigh_plain(p: &Plain) -> u64 {
    match p {
        Plain::A(v) => u64::from(*v),
        Plain::B(v) => u64::from(*v),
        Plain::C(v) => u64::from(*v),
        Plain::D(v) => *v,
        Plain::E(v) => v.unsigned_abs(),
        Plain::F(v) => v.len() as u64,
    }
}

/// Whether two alternatives are the same kind, for every pair of kinds.
struct SameKind;

impl Visitor for SameKind {
    type Output = bool;
}

impl<A: 'static, B: 'static> Visit<(&A, &B)> for SameKind {
    fn visit(self, _: (&A, &B)) -> bool {
        std::any::TypeId::of::<A>() == std::any::TypeId::of::<B>()
    }
}

fn bench_single_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/single");

    for n in [64, 1024, 16384] {
        let variants = values(n);
        let enums = plains(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("variant", n), &variants, |b, vs| {
            b.iter(|| vs.iter().map(|v| v.visit(Weigh)).sum::<u64>());
        });
        group.bench_with_input(BenchmarkId::new("enum", n), &enums, |b, ps| {
            b.iter(|| ps.iter().map(weigh_plain).sum::<u64>());
        });
    }

    group.finish();
}

fn bench_joint_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/joint");

    for n in [64, 1024] {
        let left = values(n);
        let right: Vec<Value> = values(n + 1).into_iter().skip(1).collect();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(left, right),
            |b, (left, right)| {
                b.iter(|| {
                    left.iter()
                        .zip(right)
                        .filter(|(l, r)| visit_all((black_box(*l), black_box(*r)), SameKind))
                        .count()
                });
            },
        );
    }

    group.finish();
}

fn bench_copy_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/clone_from");
    let number = Value::new(7u64);
    let text = Value::new(String::from("alternative"));

    group.bench_function("same_alternative", |b| {
        let mut target = Value::new(1u64);
        b.iter(|| target.clone_from(black_box(&number)));
    });
    group.bench_function("across_alternatives", |b| {
        let mut target = Value::new(1u64);
        b.iter(|| {
            target.clone_from(black_box(&text));
            target.clone_from(black_box(&number));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_dispatch,
    bench_joint_dispatch,
    bench_copy_assignment
);
criterion_main!(benches);
