//! Scalar primitives with closed-form derivatives.
//!
//! Each primitive stores the factors of its first three derivatives at the
//! current point of evaluation; [`rebind`](crate::Function::rebind)
//! recomputes them. The generator functions (`sin`, `exp`, `pow`, ...) wrap
//! a primitive around an inner expression via
//! [`Chain`](crate::operations::Chain), so `sin(g)` differentiates as
//! `sin ∘ g`.
//!
//! Derivatives are directional: `d1` multiplies the analytic factor by the
//! incoming tangent `dx`, `d2` by `dx·dy`, `d3` by `dx·dy·dz`.

use std::collections::BTreeSet;

use crate::float::Float;
use crate::function::Function;
use crate::operations::Chain;

macro_rules! scalar_primitive_plumbing {
    ($F:ident) => {
        fn update(&mut self, _id: usize, _x: &$F) {}

        fn bulk_update(&mut self, _updates: &[(usize, $F)]) {}

        fn register_slots(&self, _slots: &mut BTreeSet<usize>) {}
    };
}

/// Sine: d1 = cos(x)·dx, d2 = −sin(x)·dx·dy, d3 = −cos(x)·dx·dy·dz.
#[derive(Clone, Copy, Debug)]
pub struct Sin<F> {
    sin: F,
    cos: F,
}

impl<F: Float> Sin<F> {
    pub fn new(x: F) -> Self {
        Sin {
            sin: x.sin(),
            cos: x.cos(),
        }
    }
}

impl<F: Float> Function for Sin<F> {
    type Arg = F;
    type Value = F;

    #[inline]
    fn d0(&self) -> F {
        self.sin
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &F) -> F {
        self.cos * *dx
    }

    #[inline]
    fn d2<const IX: usize, const IY: usize>(&self, dx: &F, dy: &F) -> F {
        -self.sin * *dx * *dy
    }

    #[inline]
    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, dx: &F, dy: &F, dz: &F) -> F {
        -self.cos * *dx * *dy * *dz
    }

    fn rebind(&mut self, x: &F) {
        *self = Sin::new(*x);
    }

    scalar_primitive_plumbing!(F);
}

/// Cosine: d1 = −sin(x)·dx, d2 = −cos(x)·dx·dy, d3 = sin(x)·dx·dy·dz.
#[derive(Clone, Copy, Debug)]
pub struct Cos<F> {
    sin: F,
    cos: F,
}

impl<F: Float> Cos<F> {
    pub fn new(x: F) -> Self {
        Cos {
            sin: x.sin(),
            cos: x.cos(),
        }
    }
}

impl<F: Float> Function for Cos<F> {
    type Arg = F;
    type Value = F;

    #[inline]
    fn d0(&self) -> F {
        self.cos
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &F) -> F {
        -self.sin * *dx
    }

    #[inline]
    fn d2<const IX: usize, const IY: usize>(&self, dx: &F, dy: &F) -> F {
        -self.cos * *dx * *dy
    }

    #[inline]
    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, dx: &F, dy: &F, dz: &F) -> F {
        self.sin * *dx * *dy * *dz
    }

    fn rebind(&mut self, x: &F) {
        *self = Cos::new(*x);
    }

    scalar_primitive_plumbing!(F);
}

/// Tangent, written through t = tan(x):
/// d1 = (1+t²)·dx, d2 = 2t(1+t²)·dx·dy, d3 = 2(1+t²)(1+3t²)·dx·dy·dz.
#[derive(Clone, Copy, Debug)]
pub struct Tan<F> {
    t: F,
}

impl<F: Float> Tan<F> {
    pub fn new(x: F) -> Self {
        Tan { t: x.tan() }
    }

    #[inline]
    fn sec2(&self) -> F {
        F::one() + self.t * self.t
    }
}

impl<F: Float> Function for Tan<F> {
    type Arg = F;
    type Value = F;

    #[inline]
    fn d0(&self) -> F {
        self.t
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &F) -> F {
        self.sec2() * *dx
    }

    #[inline]
    fn d2<const IX: usize, const IY: usize>(&self, dx: &F, dy: &F) -> F {
        let two = F::from(2.0).unwrap();
        two * self.t * self.sec2() * *dx * *dy
    }

    #[inline]
    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, dx: &F, dy: &F, dz: &F) -> F {
        let two = F::from(2.0).unwrap();
        let three = F::from(3.0).unwrap();
        two * self.sec2() * (F::one() + three * self.t * self.t) * *dx * *dy * *dz
    }

    fn rebind(&mut self, x: &F) {
        *self = Tan::new(*x);
    }

    scalar_primitive_plumbing!(F);
}

/// Arcsine, through p = (1−x²)^(−1/2):
/// d1 = p·dx, d2 = x·p³·dx·dy, d3 = p³(1+3x²p²)·dx·dy·dz.
#[derive(Clone, Copy, Debug)]
pub struct ASin<F> {
    x: F,
    p: F,
}

impl<F: Float> ASin<F> {
    pub fn new(x: F) -> Self {
        ASin {
            x,
            p: (F::one() - x * x).sqrt().recip(),
        }
    }
}

impl<F: Float> Function for ASin<F> {
    type Arg = F;
    type Value = F;

    #[inline]
    fn d0(&self) -> F {
        self.x.asin()
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &F) -> F {
        self.p * *dx
    }

    #[inline]
    fn d2<const IX: usize, const IY: usize>(&self, dx: &F, dy: &F) -> F {
        self.x * self.p.powi(3) * *dx * *dy
    }

    #[inline]
    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, dx: &F, dy: &F, dz: &F) -> F {
        let three = F::from(3.0).unwrap();
        self.p.powi(3) * (F::one() + three * self.x * self.x * self.p * self.p) * *dx * *dy * *dz
    }

    fn rebind(&mut self, x: &F) {
        *self = ASin::new(*x);
    }

    scalar_primitive_plumbing!(F);
}

/// Arccosine, the negated arcsine derivative family.
#[derive(Clone, Copy, Debug)]
pub struct ACos<F> {
    x: F,
    p: F,
}

impl<F: Float> ACos<F> {
    pub fn new(x: F) -> Self {
        ACos {
            x,
            p: (F::one() - x * x).sqrt().recip(),
        }
    }
}

impl<F: Float> Function for ACos<F> {
    type Arg = F;
    type Value = F;

    #[inline]
    fn d0(&self) -> F {
        self.x.acos()
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &F) -> F {
        -self.p * *dx
    }

    #[inline]
    fn d2<const IX: usize, const IY: usize>(&self, dx: &F, dy: &F) -> F {
        -self.x * self.p.powi(3) * *dx * *dy
    }

    #[inline]
    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, dx: &F, dy: &F, dz: &F) -> F {
        let three = F::from(3.0).unwrap();
        -self.p.powi(3) * (F::one() + three * self.x * self.x * self.p * self.p) * *dx * *dy * *dz
    }

    fn rebind(&mut self, x: &F) {
        *self = ACos::new(*x);
    }

    scalar_primitive_plumbing!(F);
}

/// Exponential: every derivative is e^x times the tangent product.
#[derive(Clone, Copy, Debug)]
pub struct Exp<F> {
    e: F,
}

impl<F: Float> Exp<F> {
    pub fn new(x: F) -> Self {
        Exp { e: x.exp() }
    }
}

impl<F: Float> Function for Exp<F> {
    type Arg = F;
    type Value = F;

    #[inline]
    fn d0(&self) -> F {
        self.e
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &F) -> F {
        self.e * *dx
    }

    #[inline]
    fn d2<const IX: usize, const IY: usize>(&self, dx: &F, dy: &F) -> F {
        self.e * *dx * *dy
    }

    #[inline]
    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, dx: &F, dy: &F, dz: &F) -> F {
        self.e * *dx * *dy * *dz
    }

    fn rebind(&mut self, x: &F) {
        *self = Exp::new(*x);
    }

    scalar_primitive_plumbing!(F);
}

/// Natural logarithm: d1 = dx/x, d2 = −dx·dy/x², d3 = 2·dx·dy·dz/x³.
#[derive(Clone, Copy, Debug)]
pub struct Ln<F> {
    x: F,
    x_inv: F,
}

impl<F: Float> Ln<F> {
    pub fn new(x: F) -> Self {
        Ln { x, x_inv: x.recip() }
    }
}

impl<F: Float> Function for Ln<F> {
    type Arg = F;
    type Value = F;

    #[inline]
    fn d0(&self) -> F {
        self.x.ln()
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &F) -> F {
        self.x_inv * *dx
    }

    #[inline]
    fn d2<const IX: usize, const IY: usize>(&self, dx: &F, dy: &F) -> F {
        -self.x_inv * self.x_inv * *dx * *dy
    }

    #[inline]
    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, dx: &F, dy: &F, dz: &F) -> F {
        let two = F::from(2.0).unwrap();
        two * self.x_inv.powi(3) * *dx * *dy * *dz
    }

    fn rebind(&mut self, x: &F) {
        *self = Ln::new(*x);
    }

    scalar_primitive_plumbing!(F);
}

/// Rational power x^(N/D) with compile-time exponent.
///
/// Integer exponents (`D == 1`) go through `powi`; genuinely rational
/// exponents use `powf`. The derivative factors k·x^(k−1),
/// k(k−1)·x^(k−2), k(k−1)(k−2)·x^(k−3) with k = N/D are cached.
#[derive(Clone, Copy, Debug)]
pub struct Pow<F, const N: i64, const D: i64 = 1> {
    value: F,
    d1f: F,
    d2f: F,
    d3f: F,
}

fn rational_pow<F: Float>(x: F, num: i64, den: i64) -> F {
    if den == 1 {
        x.powi(num as i32)
    } else {
        x.powf(F::from(num).unwrap() / F::from(den).unwrap())
    }
}

/// A zero coefficient makes the whole factor zero; the power must not be
/// evaluated then, or `0 * 0^{negative}` turns a vanishing derivative of an
/// integer power into NaN at x = 0.
fn capped_factor<F: Float>(coef: F, x: F, num: i64, den: i64) -> F {
    if coef == F::zero() {
        F::zero()
    } else {
        coef * rational_pow(x, num, den)
    }
}

impl<F: Float, const N: i64, const D: i64> Pow<F, N, D> {
    pub fn new(x: F) -> Self {
        let k = F::from(N).unwrap() / F::from(D).unwrap();
        let k1 = k - F::one();
        let k2 = k1 - F::one();
        Pow {
            value: rational_pow(x, N, D),
            d1f: capped_factor(k, x, N - D, D),
            d2f: capped_factor(k * k1, x, N - 2 * D, D),
            d3f: capped_factor(k * k1 * k2, x, N - 3 * D, D),
        }
    }
}

impl<F: Float, const N: i64, const D: i64> Function for Pow<F, N, D> {
    type Arg = F;
    type Value = F;

    #[inline]
    fn d0(&self) -> F {
        self.value
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &F) -> F {
        self.d1f * *dx
    }

    #[inline]
    fn d2<const IX: usize, const IY: usize>(&self, dx: &F, dy: &F) -> F {
        self.d2f * *dx * *dy
    }

    #[inline]
    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, dx: &F, dy: &F, dz: &F) -> F {
        self.d3f * *dx * *dy * *dz
    }

    fn rebind(&mut self, x: &F) {
        *self = Pow::new(*x);
    }

    scalar_primitive_plumbing!(F);
}

/// Compose `sin` with an inner expression.
pub fn sin<G>(g: G) -> Chain<Sin<G::Value>, G>
where
    G: Function,
    G::Value: Float,
{
    Chain::new(Sin::new(g.d0()), g)
}

/// Compose `cos` with an inner expression.
pub fn cos<G>(g: G) -> Chain<Cos<G::Value>, G>
where
    G: Function,
    G::Value: Float,
{
    Chain::new(Cos::new(g.d0()), g)
}

/// Compose `tan` with an inner expression.
pub fn tan<G>(g: G) -> Chain<Tan<G::Value>, G>
where
    G: Function,
    G::Value: Float,
{
    Chain::new(Tan::new(g.d0()), g)
}

/// Compose `arcsin` with an inner expression.
pub fn asin<G>(g: G) -> Chain<ASin<G::Value>, G>
where
    G: Function,
    G::Value: Float,
{
    Chain::new(ASin::new(g.d0()), g)
}

/// Compose `arccos` with an inner expression.
pub fn acos<G>(g: G) -> Chain<ACos<G::Value>, G>
where
    G: Function,
    G::Value: Float,
{
    Chain::new(ACos::new(g.d0()), g)
}

/// Compose `exp` with an inner expression.
pub fn exp<G>(g: G) -> Chain<Exp<G::Value>, G>
where
    G: Function,
    G::Value: Float,
{
    Chain::new(Exp::new(g.d0()), g)
}

/// Compose the natural logarithm with an inner expression.
pub fn ln<G>(g: G) -> Chain<Ln<G::Value>, G>
where
    G: Function,
    G::Value: Float,
{
    Chain::new(Ln::new(g.d0()), g)
}

/// Compose the rational power x^(N/D) with an inner expression:
/// `pow::<3, 1, _>(g)` is g³, `pow::<1, 2, _>(g)` is √g.
pub fn pow<const N: i64, const D: i64, G>(g: G) -> Chain<Pow<G::Value, N, D>, G>
where
    G: Function,
    G::Value: Float,
{
    Chain::new(Pow::new(g.d0()), g)
}

/// Compose the square root with an inner expression.
pub fn sqrt<G>(g: G) -> Chain<Pow<G::Value, 1, 2>, G>
where
    G: Function,
    G::Value: Float,
{
    Chain::new(Pow::new(g.d0()), g)
}
