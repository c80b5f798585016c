//! Variable and constant leaves.
//!
//! A [`Variable`] is an independent quantity identified by a const-generic
//! slot id. Several variables may share one slot id to mean "the same
//! quantity appears in several places of the tree"; they then move together
//! under [`update`](crate::Function::update) / bulk updates.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use crate::function::{Function, ZeroLike};

/// Independent variable, uniquely identified by its slot id.
#[derive(Clone, Debug)]
pub struct Variable<T, const ID: usize> {
    t: T,
}

impl<T, const ID: usize> Variable<T, ID> {
    /// Create a variable bound to slot `ID` with an initial value.
    pub fn new(t: T) -> Self {
        Variable { t }
    }
}

/// Generate a variable bound to slot `ID` from an initial value.
pub fn variable<const ID: usize, T>(t: T) -> Variable<T, ID> {
    Variable::new(t)
}

impl<T, const ID: usize> Function for Variable<T, ID>
where
    T: Clone + ZeroLike,
{
    type Arg = T;
    type Value = T;

    fn d0(&self) -> T {
        self.t.clone()
    }

    fn d1<const I: usize>(&self, dx: &T) -> T {
        if I == ID {
            dx.clone()
        } else {
            self.t.zero_like()
        }
    }

    fn d2<const IX: usize, const IY: usize>(&self, _dx: &T, _dy: &T) -> T {
        self.t.zero_like()
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, _dx: &T, _dy: &T, _dz: &T) -> T {
        self.t.zero_like()
    }

    fn rebind(&mut self, _x: &T) {}

    fn update(&mut self, id: usize, x: &T) {
        if id == ID {
            self.t = x.clone();
        }
    }

    fn bulk_update(&mut self, updates: &[(usize, T)]) {
        for (id, x) in updates {
            if *id == ID {
                self.t = x.clone();
            }
        }
    }

    fn register_slots(&self, slots: &mut BTreeSet<usize>) {
        slots.insert(ID);
    }
}

/// Immutable leaf holding a fixed value.
///
/// `X` is the argument type of the tree the constant participates in; it
/// defaults to the value type, which covers same-domain trees. Use
/// [`Constant::in_space`] when embedding e.g. a scalar constant into a tree
/// over matrix arguments.
#[derive(Clone, Debug)]
pub struct Constant<T, X = T> {
    t: T,
    _arg: PhantomData<X>,
}

impl<T, X> Constant<T, X> {
    pub fn new(t: T) -> Self {
        Constant {
            t,
            _arg: PhantomData,
        }
    }
}

impl<T> Constant<T, T> {
    /// Re-type a constant for a tree whose argument space differs from the
    /// constant's value space.
    pub fn in_space<X>(self) -> Constant<T, X> {
        Constant::new(self.t)
    }
}

/// Generate a constant from a value.
pub fn constant<T>(t: T) -> Constant<T, T> {
    Constant::new(t)
}

impl<T, X> Function for Constant<T, X>
where
    T: Clone + ZeroLike,
{
    type Arg = X;
    type Value = T;

    fn d0(&self) -> T {
        self.t.clone()
    }

    fn d1<const I: usize>(&self, _dx: &X) -> T {
        self.t.zero_like()
    }

    fn d2<const IX: usize, const IY: usize>(&self, _dx: &X, _dy: &X) -> T {
        self.t.zero_like()
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, _dx: &X, _dy: &X, _dz: &X) -> T {
        self.t.zero_like()
    }

    fn rebind(&mut self, _x: &X) {}

    fn update(&mut self, _id: usize, _x: &X) {}

    fn bulk_update(&mut self, _updates: &[(usize, X)]) {}

    fn register_slots(&self, _slots: &mut BTreeSet<usize>) {}
}
