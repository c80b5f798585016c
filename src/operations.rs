//! Combinators building larger expressions from smaller ones.
//!
//! [`Sum`], [`Product`], [`Scale`] and [`Squared`] combine sibling
//! expressions; [`Chain`] composes an outer primitive with an inner
//! expression. Each combinator implements the composition rule for the first
//! three directional derivatives: linearity for sums, the generalized Leibniz
//! rule for products (4 terms at order 2, 8 at order 3), and the
//! Faà-di-Bruno combination for chains.
//!
//! Every combinator caches its current value; the cache is refreshed exactly
//! once per `update`/`bulk_update` call.

use std::collections::BTreeSet;
use std::ops::{Add, Mul};

use crate::function::Function;

/// Sum `f + g` of two expressions over the same argument and value space.
pub struct Sum<F: Function, G> {
    f: F,
    g: G,
    value: F::Value,
}

impl<F, G> Sum<F, G>
where
    F: Function,
    G: Function<Arg = F::Arg, Value = F::Value>,
    F::Value: Add<Output = F::Value> + Clone,
{
    pub fn new(f: F, g: G) -> Self {
        let value = f.d0() + g.d0();
        Sum { f, g, value }
    }

    fn refresh(&mut self) {
        self.value = self.f.d0() + self.g.d0();
    }
}

impl<F, G> Function for Sum<F, G>
where
    F: Function,
    G: Function<Arg = F::Arg, Value = F::Value>,
    F::Value: Add<Output = F::Value> + Clone,
{
    type Arg = F::Arg;
    type Value = F::Value;

    fn d0(&self) -> F::Value {
        self.value.clone()
    }

    fn d1<const ID: usize>(&self, dx: &F::Arg) -> F::Value {
        self.f.d1::<ID>(dx) + self.g.d1::<ID>(dx)
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &F::Arg, dy: &F::Arg) -> F::Value {
        self.f.d2::<IX, IY>(dx, dy) + self.g.d2::<IX, IY>(dx, dy)
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &F::Arg,
        dy: &F::Arg,
        dz: &F::Arg,
    ) -> F::Value {
        self.f.d3::<IX, IY, IZ>(dx, dy, dz) + self.g.d3::<IX, IY, IZ>(dx, dy, dz)
    }

    fn rebind(&mut self, x: &F::Arg) {
        self.f.rebind(x);
        self.g.rebind(x);
        self.refresh();
    }

    fn update(&mut self, id: usize, x: &F::Arg) {
        self.f.update(id, x);
        self.g.update(id, x);
        self.refresh();
    }

    fn bulk_update(&mut self, updates: &[(usize, F::Arg)]) {
        self.f.bulk_update(updates);
        self.g.bulk_update(updates);
        self.refresh();
    }

    fn register_slots(&self, slots: &mut BTreeSet<usize>) {
        self.f.register_slots(slots);
        self.g.register_slots(slots);
    }
}

/// Product `f * g`, differentiated by the generalized Leibniz rule.
pub struct Product<F: Function, G> {
    f: F,
    g: G,
    value: F::Value,
}

impl<F, G> Product<F, G>
where
    F: Function,
    G: Function<Arg = F::Arg, Value = F::Value>,
    F::Value: Mul<Output = F::Value> + Clone,
{
    pub fn new(f: F, g: G) -> Self {
        let value = f.d0() * g.d0();
        Product { f, g, value }
    }

    fn refresh(&mut self) {
        self.value = self.f.d0() * self.g.d0();
    }
}

impl<F, G> Function for Product<F, G>
where
    F: Function,
    G: Function<Arg = F::Arg, Value = F::Value>,
    F::Value: Mul<Output = F::Value> + Add<Output = F::Value> + Clone,
{
    type Arg = F::Arg;
    type Value = F::Value;

    fn d0(&self) -> F::Value {
        self.value.clone()
    }

    fn d1<const ID: usize>(&self, dx: &F::Arg) -> F::Value {
        self.f.d1::<ID>(dx) * self.g.d0() + self.f.d0() * self.g.d1::<ID>(dx)
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &F::Arg, dy: &F::Arg) -> F::Value {
        self.f.d2::<IX, IY>(dx, dy) * self.g.d0()
            + self.f.d1::<IX>(dx) * self.g.d1::<IY>(dy)
            + self.f.d1::<IY>(dy) * self.g.d1::<IX>(dx)
            + self.f.d0() * self.g.d2::<IX, IY>(dx, dy)
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &F::Arg,
        dy: &F::Arg,
        dz: &F::Arg,
    ) -> F::Value {
        // All nonempty splits of {dx, dy, dz} between the two factors.
        self.f.d3::<IX, IY, IZ>(dx, dy, dz) * self.g.d0()
            + self.f.d2::<IX, IY>(dx, dy) * self.g.d1::<IZ>(dz)
            + self.f.d2::<IX, IZ>(dx, dz) * self.g.d1::<IY>(dy)
            + self.f.d1::<IX>(dx) * self.g.d2::<IY, IZ>(dy, dz)
            + self.f.d2::<IY, IZ>(dy, dz) * self.g.d1::<IX>(dx)
            + self.f.d1::<IY>(dy) * self.g.d2::<IX, IZ>(dx, dz)
            + self.f.d1::<IZ>(dz) * self.g.d2::<IX, IY>(dx, dy)
            + self.f.d0() * self.g.d3::<IX, IY, IZ>(dx, dy, dz)
    }

    fn rebind(&mut self, x: &F::Arg) {
        self.f.rebind(x);
        self.g.rebind(x);
        self.refresh();
    }

    fn update(&mut self, id: usize, x: &F::Arg) {
        self.f.update(id, x);
        self.g.update(id, x);
        self.refresh();
    }

    fn bulk_update(&mut self, updates: &[(usize, F::Arg)]) {
        self.f.bulk_update(updates);
        self.g.bulk_update(updates);
        self.refresh();
    }

    fn register_slots(&self, slots: &mut BTreeSet<usize>) {
        self.f.register_slots(slots);
        self.g.register_slots(slots);
    }
}

/// Scaling `a * f` of an expression by a fixed scalar coefficient.
pub struct Scale<S, F: Function> {
    a: S,
    f: F,
    value: F::Value,
}

impl<S, F> Scale<S, F>
where
    F: Function,
    S: Mul<F::Value, Output = F::Value> + Copy,
    F::Value: Clone,
{
    pub fn new(a: S, f: F) -> Self {
        let value = a * f.d0();
        Scale { a, f, value }
    }

    fn refresh(&mut self) {
        self.value = self.a * self.f.d0();
    }
}

/// Generate `a * f`.
pub fn scale<S, F>(a: S, f: F) -> Scale<S, F>
where
    F: Function,
    S: Mul<F::Value, Output = F::Value> + Copy,
    F::Value: Clone,
{
    Scale::new(a, f)
}

impl<S, F> Function for Scale<S, F>
where
    F: Function,
    S: Mul<F::Value, Output = F::Value> + Copy,
    F::Value: Clone,
{
    type Arg = F::Arg;
    type Value = F::Value;

    fn d0(&self) -> F::Value {
        self.value.clone()
    }

    fn d1<const ID: usize>(&self, dx: &F::Arg) -> F::Value {
        self.a * self.f.d1::<ID>(dx)
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &F::Arg, dy: &F::Arg) -> F::Value {
        self.a * self.f.d2::<IX, IY>(dx, dy)
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &F::Arg,
        dy: &F::Arg,
        dz: &F::Arg,
    ) -> F::Value {
        self.a * self.f.d3::<IX, IY, IZ>(dx, dy, dz)
    }

    fn rebind(&mut self, x: &F::Arg) {
        self.f.rebind(x);
        self.refresh();
    }

    fn update(&mut self, id: usize, x: &F::Arg) {
        self.f.update(id, x);
        self.refresh();
    }

    fn bulk_update(&mut self, updates: &[(usize, F::Arg)]) {
        self.f.bulk_update(updates);
        self.refresh();
    }

    fn register_slots(&self, slots: &mut BTreeSet<usize>) {
        self.f.register_slots(slots);
    }
}

/// Squared expression `f²`, the self-product with the shared child stored
/// once.
///
/// The derivative terms keep both factor orders, so the rule also holds for
/// non-commutative (matrix) values.
pub struct Squared<F: Function> {
    f: F,
    value: F::Value,
}

impl<F> Squared<F>
where
    F: Function,
    F::Value: Mul<Output = F::Value> + Clone,
{
    pub fn new(f: F) -> Self {
        let value = f.d0() * f.d0();
        Squared { f, value }
    }

    fn refresh(&mut self) {
        self.value = self.f.d0() * self.f.d0();
    }
}

/// Generate `f²`.
pub fn squared<F>(f: F) -> Squared<F>
where
    F: Function,
    F::Value: Mul<Output = F::Value> + Clone,
{
    Squared::new(f)
}

impl<F> Function for Squared<F>
where
    F: Function,
    F::Value: Mul<Output = F::Value> + Add<Output = F::Value> + Clone,
{
    type Arg = F::Arg;
    type Value = F::Value;

    fn d0(&self) -> F::Value {
        self.value.clone()
    }

    fn d1<const ID: usize>(&self, dx: &F::Arg) -> F::Value {
        self.f.d1::<ID>(dx) * self.f.d0() + self.f.d0() * self.f.d1::<ID>(dx)
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &F::Arg, dy: &F::Arg) -> F::Value {
        self.f.d2::<IX, IY>(dx, dy) * self.f.d0()
            + self.f.d1::<IX>(dx) * self.f.d1::<IY>(dy)
            + self.f.d1::<IY>(dy) * self.f.d1::<IX>(dx)
            + self.f.d0() * self.f.d2::<IX, IY>(dx, dy)
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &F::Arg,
        dy: &F::Arg,
        dz: &F::Arg,
    ) -> F::Value {
        self.f.d3::<IX, IY, IZ>(dx, dy, dz) * self.f.d0()
            + self.f.d2::<IX, IY>(dx, dy) * self.f.d1::<IZ>(dz)
            + self.f.d2::<IX, IZ>(dx, dz) * self.f.d1::<IY>(dy)
            + self.f.d1::<IX>(dx) * self.f.d2::<IY, IZ>(dy, dz)
            + self.f.d2::<IY, IZ>(dy, dz) * self.f.d1::<IX>(dx)
            + self.f.d1::<IY>(dy) * self.f.d2::<IX, IZ>(dx, dz)
            + self.f.d1::<IZ>(dz) * self.f.d2::<IX, IY>(dx, dy)
            + self.f.d0() * self.f.d3::<IX, IY, IZ>(dx, dy, dz)
    }

    fn rebind(&mut self, x: &F::Arg) {
        self.f.rebind(x);
        self.refresh();
    }

    fn update(&mut self, id: usize, x: &F::Arg) {
        self.f.update(id, x);
        self.refresh();
    }

    fn bulk_update(&mut self, updates: &[(usize, F::Arg)]) {
        self.f.bulk_update(updates);
        self.refresh();
    }

    fn register_slots(&self, slots: &mut BTreeSet<usize>) {
        self.f.register_slots(slots);
    }
}

/// Composition `f ∘ g` of an outer primitive `f` with an inner expression
/// `g`.
///
/// `f`'s argument space is `g`'s value space. Construction and every update
/// push the inner value into the outer primitive via
/// [`rebind`](Function::rebind), so `f`'s derivative factors are always
/// evaluated at `g.d0()`.
#[derive(Clone, Debug)]
pub struct Chain<F, G> {
    f: F,
    g: G,
}

impl<F, G> Chain<F, G>
where
    F: Function<Arg = G::Value>,
    G: Function,
{
    pub fn new(mut f: F, g: G) -> Self {
        f.rebind(&g.d0());
        Chain { f, g }
    }
}

impl<F, G> Function for Chain<F, G>
where
    F: Function<Arg = G::Value>,
    G: Function,
    F::Value: Add<Output = F::Value>,
{
    type Arg = G::Arg;
    type Value = F::Value;

    fn d0(&self) -> F::Value {
        self.f.d0()
    }

    fn d1<const ID: usize>(&self, dx: &G::Arg) -> F::Value {
        self.f.d1::<ID>(&self.g.d1::<ID>(dx))
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &G::Arg, dy: &G::Arg) -> F::Value {
        self.f
            .d2::<IX, IY>(&self.g.d1::<IX>(dx), &self.g.d1::<IY>(dy))
            + self.f.d1::<IX>(&self.g.d2::<IX, IY>(dx, dy))
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &G::Arg,
        dy: &G::Arg,
        dz: &G::Arg,
    ) -> F::Value {
        let dgx = self.g.d1::<IX>(dx);
        let dgy = self.g.d1::<IY>(dy);
        let dgz = self.g.d1::<IZ>(dz);
        self.f.d3::<IX, IY, IZ>(&dgx, &dgy, &dgz)
            + self.f.d2::<IX, IY>(&self.g.d2::<IX, IZ>(dx, dz), &dgy)
            + self.f.d2::<IX, IY>(&dgx, &self.g.d2::<IY, IZ>(dy, dz))
            + self.f.d2::<IX, IZ>(&self.g.d2::<IX, IY>(dx, dy), &dgz)
            + self.f.d1::<IX>(&self.g.d3::<IX, IY, IZ>(dx, dy, dz))
    }

    fn rebind(&mut self, x: &G::Arg) {
        self.g.rebind(x);
        self.f.rebind(&self.g.d0());
    }

    fn update(&mut self, id: usize, x: &G::Arg) {
        self.g.update(id, x);
        self.f.rebind(&self.g.d0());
    }

    fn bulk_update(&mut self, updates: &[(usize, G::Arg)]) {
        self.g.bulk_update(updates);
        self.f.rebind(&self.g.d0());
    }

    fn register_slots(&self, slots: &mut BTreeSet<usize>) {
        self.g.register_slots(slots);
    }
}

// Operator glue: `a + b` → Sum, `a * b` → Product, `k * a` with a scalar
// coefficient on the left → Scale. One instantiation per node type, since
// blanket impls of the std operator traits are not possible.
macro_rules! impl_expression_ops {
    ($ty:ty, [$($gen:tt)*]) => {
        impl<$($gen)*, R> Add<R> for $ty
        where
            $ty: Function,
            R: Function<
                Arg = <$ty as Function>::Arg,
                Value = <$ty as Function>::Value,
            >,
            <$ty as Function>::Value: Add<Output = <$ty as Function>::Value> + Clone,
        {
            type Output = Sum<$ty, R>;

            fn add(self, rhs: R) -> Self::Output {
                Sum::new(self, rhs)
            }
        }

        impl<$($gen)*, R> Mul<R> for $ty
        where
            $ty: Function,
            R: Function<
                Arg = <$ty as Function>::Arg,
                Value = <$ty as Function>::Value,
            >,
            <$ty as Function>::Value: Mul<Output = <$ty as Function>::Value> + Clone,
        {
            type Output = Product<$ty, R>;

            fn mul(self, rhs: R) -> Self::Output {
                Product::new(self, rhs)
            }
        }

        impl<$($gen)*> Mul<$ty> for f64
        where
            $ty: Function,
            <$ty as Function>::Value: Clone,
            f64: Mul<
                <$ty as Function>::Value,
                Output = <$ty as Function>::Value,
            >,
        {
            type Output = Scale<f64, $ty>;

            fn mul(self, rhs: $ty) -> Self::Output {
                Scale::new(self, rhs)
            }
        }
    };
}

impl_expression_ops!(crate::variable::Variable<T, ID>, [T, const ID: usize]);
impl_expression_ops!(crate::variable::Constant<T, X>, [T, X]);
impl_expression_ops!(Sum<F, G>, [F: Function, G]);
impl_expression_ops!(Product<F, G>, [F: Function, G]);
impl_expression_ops!(Scale<S, F>, [S, F: Function]);
impl_expression_ops!(Squared<F>, [F: Function]);
impl_expression_ops!(Chain<F, G>, [F, G]);
