//! Joint visitation of several variants.
//!
//! [`visit_all`] resolves the active alternative of each input in turn. Each
//! resolved argument is pushed onto an accumulator tuple and the visitor is
//! re-wrapped as a [`Curry`] that expects the remaining inputs. Once the
//! last input is resolved the original visitor is called with the full
//! tuple, so zipping `(&x, &y)` over `Variant<(A, B)>` and `Variant<(C, D)>`
//! needs `Visit<(&A, &C)>`, `Visit<(&A, &D)>`, `Visit<(&B, &C)>` and
//! `Visit<(&B, &D)>`.
//!
//! If any input is valueless, [`Visitor::valueless`] is called instead and
//! the arguments resolved so far are dropped.

use crate::dispatch::Dispatch;
use crate::storage::Alternatives;
use crate::variant::Variant;
use crate::visit::{Exclusive, Owned, Shared, Visit, Visitor};

/// Something that can hand a visitor one resolved argument.
pub trait Visitable<V: Visitor> {
    fn accept(self, visitor: V) -> V::Output;
}

impl<'a, L, V> Visitable<V> for &'a Variant<L>
where
    L: Alternatives + Dispatch<Shared<'a, V>>,
    V: Visitor,
{
    #[inline]
    fn accept(self, visitor: V) -> V::Output {
        self.visit(visitor)
    }
}

impl<'a, L, V> Visitable<V> for &'a mut Variant<L>
where
    L: Alternatives + Dispatch<Exclusive<'a, V>>,
    V: Visitor,
{
    #[inline]
    fn accept(self, visitor: V) -> V::Output {
        self.visit_mut(visitor)
    }
}

impl<L, V> Visitable<V> for Variant<L>
where
    L: Alternatives + Dispatch<Owned<V>>,
    V: Visitor,
{
    #[inline]
    fn accept(self, visitor: V) -> V::Output {
        self.into_visit(visitor)
    }
}

/// A plain value passed through joint visitation unchanged.
///
/// `visit_all((&shape, Given(scale)), v)` calls `v` with `(&alt, scale)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Given<E>(pub E);

impl<E, V> Visitable<V> for Given<E>
where
    V: Visit<E>,
{
    #[inline]
    fn accept(self, visitor: V) -> V::Output {
        visitor.visit(self.0)
    }
}

/// Appends one element to a tuple.
pub trait Push<X> {
    type Pushed;

    fn push(self, value: X) -> Self::Pushed;
}

macro_rules! push {
    ($($T:ident),*) => {
        impl<$($T,)* X> Push<X> for ($($T,)*) {
            type Pushed = ($($T,)* X,);

            #[inline]
            #[allow(non_snake_case, reason = "bindings reuse the type parameter names")]
            fn push(self, value: X) -> Self::Pushed {
                let ($($T,)*) = self;
                ($($T,)* value,)
            }
        }
    };
}

push!();
push!(A);
push!(A, B);
push!(A, B, C);
push!(A, B, C, D);
push!(A, B, C, D, E);
push!(A, B, C, D, E, F);
push!(A, B, C, D, E, F, G);

/// A visitor partially applied to the arguments resolved so far.
///
/// `bound` is the accumulator tuple; `rest` is the inputs still to resolve,
/// as a nested list `(next, (after, ()))`.
pub struct Curry<V, Bound, Rest> {
    visitor: V,
    bound: Bound,
    rest: Rest,
}

impl<V: Visitor, Bound, Rest> Visitor for Curry<V, Bound, Rest> {
    type Output = V::Output;

    fn valueless(self) -> V::Output {
        self.visitor.valueless()
    }
}

impl<V, Bound, X> Visit<X> for Curry<V, Bound, ()>
where
    Bound: Push<X>,
    V: Visit<Bound::Pushed>,
{
    #[inline]
    fn visit(self, arg: X) -> V::Output {
        self.visitor.visit(self.bound.push(arg))
    }
}

impl<V, Bound, X, Next, Tail> Visit<X> for Curry<V, Bound, (Next, Tail)>
where
    V: Visitor,
    Bound: Push<X>,
    Next: Visitable<Curry<V, Bound::Pushed, Tail>>,
{
    #[inline]
    fn visit(self, arg: X) -> V::Output {
        let (next, tail) = self.rest;
        next.accept(Curry {
            visitor: self.visitor,
            bound: self.bound.push(arg),
            rest: tail,
        })
    }
}

/// A flat tuple of [`Visitable`] inputs.
pub trait Zip<V: Visitor> {
    fn zip(self, visitor: V) -> V::Output;
}

/// Nests `a, b, c` as `(a, (b, (c, ())))`, in type or value position.
macro_rules! nest {
    () => { () };
    ($head:ident $(, $tail:ident)*) => { ($head, nest!($($tail),*)) };
}

macro_rules! zip {
    ($First:ident $(, $Rest:ident)*) => {
        impl<V: Visitor, $First $(, $Rest)*> Zip<V> for ($First, $($Rest,)*)
        where
            $First: Visitable<Curry<V, (), nest!($($Rest),*)>>,
        {
            #[inline]
            #[allow(non_snake_case, reason = "bindings reuse the type parameter names")]
            fn zip(self, visitor: V) -> V::Output {
                let ($First, $($Rest,)*) = self;
                $First.accept(Curry {
                    visitor,
                    bound: (),
                    rest: nest!($($Rest),*),
                })
            }
        }
    };
}

zip!(A);
zip!(A, B);
zip!(A, B, C);
zip!(A, B, C, D);
zip!(A, B, C, D, E);
zip!(A, B, C, D, E, F);
zip!(A, B, C, D, E, F, G);
zip!(A, B, C, D, E, F, G, H);

/// Visit every input jointly: `visitor` is called once with a tuple of the
/// active alternatives of all inputs, in order.
///
/// Inputs may be `&Variant`, `&mut Variant`, `Variant` or [`Given`], up to
/// eight of them, mixed freely.
pub fn visit_all<Z, V>(inputs: Z, visitor: V) -> V::Output
where
    Z: Zip<V>,
    V: Visitor,
{
    inputs.zip(visitor)
}

#[cfg(test)]
mod tests;
