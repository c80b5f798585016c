//! Matrix-valued primitives: determinant, cofactor matrix, trace, transpose
//! and the Frobenius norm.
//!
//! The concrete matrix storage is external; anything implementing [`Matrix`]
//! works (impls for nalgebra types live in
//! [`nalgebra_support`](crate::nalgebra_support)). Determinant and cofactor
//! use the closed 2x2/3x3 forms; their directional derivatives come from the
//! multilinearity of the determinant in the matrix columns.
//!
//! Determinant and cofactor are only defined for square matrices of
//! dimension 2 or 3; anything else panics at construction.

use std::collections::BTreeSet;
use std::ops::Add;

use num_traits::{NumCast, Zero};

use crate::float::Float;
use crate::function::{Function, ZeroLike};
use crate::operations::Chain;

/// Read/build access to a square-matrix type with float entries.
pub trait Matrix: Clone + ZeroLike {
    type Elem: Float;

    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    /// Entry `(i, j)`.
    fn at(&self, i: usize, j: usize) -> Self::Elem;

    /// A new matrix of the given shape, entries produced by `f`. Statically
    /// sized implementations panic when the shape disagrees with the type.
    fn build<B>(&self, rows: usize, cols: usize, f: B) -> Self
    where
        B: FnMut(usize, usize) -> Self::Elem;
}

fn assert_square_23<M: Matrix>(a: &M, what: &str) -> usize {
    let (r, c) = (a.rows(), a.cols());
    assert!(
        r == c && (r == 2 || r == 3),
        "{what} is only implemented for 2x2 and 3x3 matrices, got {r}x{c}"
    );
    r
}

/// The complementary index pair of `k` in `{0, 1, 2}`, ascending.
#[inline]
fn others3(k: usize) -> (usize, usize) {
    match k {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Checkerboard sign (−1)^(i+j).
#[inline]
fn sign<F: Float>(i: usize, j: usize) -> F {
    if (i + j) % 2 == 0 {
        F::one()
    } else {
        -F::one()
    }
}

/// det as a bilinear form in the columns of a 2x2 matrix: column 0 taken
/// from `x`, column 1 from `y`.
fn det2_bilinear<M: Matrix>(x: &M, y: &M) -> M::Elem {
    x.at(0, 0) * y.at(1, 1) - x.at(1, 0) * y.at(0, 1)
}

/// det as a trilinear form in the columns of a 3x3 matrix: column `j` taken
/// from the `j`-th argument.
fn det3_trilinear<M: Matrix>(x: &M, y: &M, z: &M) -> M::Elem {
    x.at(0, 0) * (y.at(1, 1) * z.at(2, 2) - y.at(2, 1) * z.at(1, 2))
        - x.at(1, 0) * (y.at(0, 1) * z.at(2, 2) - y.at(2, 1) * z.at(0, 2))
        + x.at(2, 0) * (y.at(0, 1) * z.at(1, 2) - y.at(1, 1) * z.at(0, 2))
}

/// Determinant of a 2x2 or 3x3 matrix.
///
/// Derivatives distribute the tangent matrices over the column slots of the
/// multilinear determinant form: d3 of a 2x2 determinant is zero, d3 of a
/// 3x3 determinant sums the form over all six tangent orderings.
#[derive(Clone, Debug)]
pub struct Determinant<M: Matrix> {
    a: M,
    n: usize,
    value: M::Elem,
}

impl<M: Matrix> Determinant<M> {
    pub fn new(a: M) -> Self {
        let n = assert_square_23(&a, "determinant");
        let value = match n {
            2 => det2_bilinear(&a, &a),
            _ => det3_trilinear(&a, &a, &a),
        };
        Determinant { a, n, value }
    }
}

impl<M: Matrix> Function for Determinant<M> {
    type Arg = M;
    type Value = M::Elem;

    #[inline]
    fn d0(&self) -> M::Elem {
        self.value
    }

    fn d1<const ID: usize>(&self, dx: &M) -> M::Elem {
        let a = &self.a;
        match self.n {
            2 => det2_bilinear(dx, a) + det2_bilinear(a, dx),
            _ => {
                det3_trilinear(dx, a, a)
                    + det3_trilinear(a, dx, a)
                    + det3_trilinear(a, a, dx)
            }
        }
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &M, dy: &M) -> M::Elem {
        let a = &self.a;
        match self.n {
            2 => det2_bilinear(dx, dy) + det2_bilinear(dy, dx),
            _ => {
                det3_trilinear(dx, dy, a)
                    + det3_trilinear(dx, a, dy)
                    + det3_trilinear(dy, dx, a)
                    + det3_trilinear(a, dx, dy)
                    + det3_trilinear(dy, a, dx)
                    + det3_trilinear(a, dy, dx)
            }
        }
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &M,
        dy: &M,
        dz: &M,
    ) -> M::Elem {
        match self.n {
            2 => M::Elem::zero(),
            _ => {
                det3_trilinear(dx, dy, dz)
                    + det3_trilinear(dx, dz, dy)
                    + det3_trilinear(dy, dx, dz)
                    + det3_trilinear(dz, dx, dy)
                    + det3_trilinear(dy, dz, dx)
                    + det3_trilinear(dz, dy, dx)
            }
        }
    }

    fn rebind(&mut self, x: &M) {
        *self = Determinant::new(x.clone());
    }

    fn update(&mut self, _id: usize, _x: &M) {}

    fn bulk_update(&mut self, _updates: &[(usize, M)]) {}

    fn register_slots(&self, _slots: &mut BTreeSet<usize>) {}
}

/// Cofactor matrix of a 2x2 or 3x3 matrix.
///
/// Entries are the signed minors, bilinear (3x3) or linear (2x2) in the
/// matrix, so the second derivative of a 2x2 cofactor and every third
/// derivative vanish.
#[derive(Clone, Debug)]
pub struct Cofactor<M> {
    a: M,
    n: usize,
    value: M,
}

/// Cofactor of a 2x2 matrix, a linear form: the mirrored entry with the
/// checkerboard sign.
fn cof2<M: Matrix>(x: &M) -> M {
    x.build(2, 2, |i, j| sign::<M::Elem>(i, j) * x.at(1 - i, 1 - j))
}

/// Entry `(i, j)` of the 3x3 cofactor as a bilinear form: the signed minor
/// with its two factors taken from `x` and `y`. Summing the `(x, y)` and
/// `(y, x)` arrangements yields the derivative entries.
fn cof3_bilinear<M: Matrix>(i: usize, j: usize, x: &M, y: &M) -> M::Elem {
    let (r0, r1) = others3(i);
    let (c0, c1) = others3(j);
    sign::<M::Elem>(i, j) * (x.at(r0, c0) * y.at(r1, c1) - x.at(r1, c0) * y.at(r0, c1))
}

impl<M: Matrix> Cofactor<M> {
    pub fn new(a: M) -> Self {
        let n = assert_square_23(&a, "cofactor");
        let value = match n {
            2 => cof2(&a),
            _ => a.build(3, 3, |i, j| cof3_bilinear(i, j, &a, &a)),
        };
        Cofactor { a, n, value }
    }
}

impl<M: Matrix> Function for Cofactor<M> {
    type Arg = M;
    type Value = M;

    #[inline]
    fn d0(&self) -> M {
        self.value.clone()
    }

    fn d1<const ID: usize>(&self, dx: &M) -> M {
        let a = &self.a;
        match self.n {
            2 => cof2(dx),
            _ => a.build(3, 3, |i, j| {
                cof3_bilinear(i, j, dx, a) + cof3_bilinear(i, j, a, dx)
            }),
        }
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &M, dy: &M) -> M {
        match self.n {
            2 => self.value.zero_like(),
            _ => self.a.build(3, 3, |i, j| {
                cof3_bilinear(i, j, dx, dy) + cof3_bilinear(i, j, dy, dx)
            }),
        }
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, _dx: &M, _dy: &M, _dz: &M) -> M {
        self.value.zero_like()
    }

    fn rebind(&mut self, x: &M) {
        *self = Cofactor::new(x.clone());
    }

    fn update(&mut self, _id: usize, _x: &M) {}

    fn bulk_update(&mut self, _updates: &[(usize, M)]) {}

    fn register_slots(&self, _slots: &mut BTreeSet<usize>) {}
}

/// Trace of a square matrix. Linear, so only d0 and d1 are nonzero.
#[derive(Clone, Debug)]
pub struct Trace<M: Matrix> {
    value: M::Elem,
}

fn trace_of<M: Matrix>(a: &M) -> M::Elem {
    let mut t = M::Elem::zero();
    for i in 0..a.rows() {
        t = t + a.at(i, i);
    }
    t
}

impl<M: Matrix> Trace<M> {
    pub fn new(a: M) -> Self {
        assert!(
            a.rows() == a.cols(),
            "trace requires a square matrix, got {}x{}",
            a.rows(),
            a.cols()
        );
        Trace {
            value: trace_of(&a),
        }
    }
}

impl<M: Matrix> Function for Trace<M> {
    type Arg = M;
    type Value = M::Elem;

    #[inline]
    fn d0(&self) -> M::Elem {
        self.value
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &M) -> M::Elem {
        trace_of(dx)
    }

    fn d2<const IX: usize, const IY: usize>(&self, _dx: &M, _dy: &M) -> M::Elem {
        M::Elem::zero()
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        _dx: &M,
        _dy: &M,
        _dz: &M,
    ) -> M::Elem {
        M::Elem::zero()
    }

    fn rebind(&mut self, x: &M) {
        self.value = trace_of(x);
    }

    fn update(&mut self, _id: usize, _x: &M) {}

    fn bulk_update(&mut self, _updates: &[(usize, M)]) {}

    fn register_slots(&self, _slots: &mut BTreeSet<usize>) {}
}

/// Transpose of a square matrix. Linear.
#[derive(Clone, Debug)]
pub struct Transpose<M> {
    value: M,
}

fn transpose_of<M: Matrix>(a: &M) -> M {
    a.build(a.cols(), a.rows(), |i, j| a.at(j, i))
}

impl<M: Matrix> Transpose<M> {
    pub fn new(a: M) -> Self {
        Transpose {
            value: transpose_of(&a),
        }
    }
}

impl<M: Matrix> Function for Transpose<M> {
    type Arg = M;
    type Value = M;

    #[inline]
    fn d0(&self) -> M {
        self.value.clone()
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &M) -> M {
        transpose_of(dx)
    }

    fn d2<const IX: usize, const IY: usize>(&self, _dx: &M, _dy: &M) -> M {
        self.value.zero_like()
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, _dx: &M, _dy: &M, _dz: &M) -> M {
        self.value.zero_like()
    }

    fn rebind(&mut self, x: &M) {
        self.value = transpose_of(x);
    }

    fn update(&mut self, _id: usize, _x: &M) {}

    fn bulk_update(&mut self, _updates: &[(usize, M)]) {}

    fn register_slots(&self, _slots: &mut BTreeSet<usize>) {}
}

/// Half the symmetric bilinear form tr(X)tr(Y) − tr(XY) underlying the
/// second principal invariant.
fn invariant2_bilinear<M: Matrix>(x: &M, y: &M) -> M::Elem {
    let mut txy = M::Elem::zero();
    for i in 0..x.rows() {
        for j in 0..x.cols() {
            txy = txy + x.at(i, j) * y.at(j, i);
        }
    }
    let half = <M::Elem as NumCast>::from(0.5).unwrap();
    half * (trace_of(x) * trace_of(y) - txy)
}

/// Second principal invariant i2(A) = (tr(A)² − tr(A²))/2, the sum of the
/// principal 2x2 minors. Quadratic in the matrix, so d3 vanishes.
#[derive(Clone, Debug)]
pub struct SecondInvariant<M: Matrix> {
    a: M,
    value: M::Elem,
}

impl<M: Matrix> SecondInvariant<M> {
    pub fn new(a: M) -> Self {
        assert!(
            a.rows() == a.cols(),
            "second invariant requires a square matrix, got {}x{}",
            a.rows(),
            a.cols()
        );
        let value = invariant2_bilinear(&a, &a);
        SecondInvariant { a, value }
    }
}

impl<M: Matrix> Function for SecondInvariant<M> {
    type Arg = M;
    type Value = M::Elem;

    #[inline]
    fn d0(&self) -> M::Elem {
        self.value
    }

    fn d1<const ID: usize>(&self, dx: &M) -> M::Elem {
        invariant2_bilinear(dx, &self.a) + invariant2_bilinear(&self.a, dx)
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &M, dy: &M) -> M::Elem {
        invariant2_bilinear(dx, dy) + invariant2_bilinear(dy, dx)
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        _dx: &M,
        _dy: &M,
        _dz: &M,
    ) -> M::Elem {
        M::Elem::zero()
    }

    fn rebind(&mut self, x: &M) {
        *self = SecondInvariant::new(x.clone());
    }

    fn update(&mut self, _id: usize, _x: &M) {}

    fn bulk_update(&mut self, _updates: &[(usize, M)]) {}

    fn register_slots(&self, _slots: &mut BTreeSet<usize>) {}
}

/// Deviatoric part A − (tr(A)/n)·I of a square matrix. Linear.
#[derive(Clone, Debug)]
pub struct Deviator<M> {
    value: M,
}

fn deviator_of<M: Matrix>(a: &M) -> M {
    let n = <M::Elem as NumCast>::from(a.rows()).unwrap();
    let mean = trace_of(a) / n;
    a.build(a.rows(), a.cols(), |i, j| {
        if i == j {
            a.at(i, j) - mean
        } else {
            a.at(i, j)
        }
    })
}

impl<M: Matrix> Deviator<M> {
    pub fn new(a: M) -> Self {
        assert!(
            a.rows() == a.cols(),
            "deviator requires a square matrix, got {}x{}",
            a.rows(),
            a.cols()
        );
        Deviator {
            value: deviator_of(&a),
        }
    }
}

impl<M: Matrix> Function for Deviator<M> {
    type Arg = M;
    type Value = M;

    #[inline]
    fn d0(&self) -> M {
        self.value.clone()
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &M) -> M {
        deviator_of(dx)
    }

    fn d2<const IX: usize, const IY: usize>(&self, _dx: &M, _dy: &M) -> M {
        self.value.zero_like()
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(&self, _dx: &M, _dy: &M, _dz: &M) -> M {
        self.value.zero_like()
    }

    fn rebind(&mut self, x: &M) {
        self.value = deviator_of(x);
    }

    fn update(&mut self, _id: usize, _x: &M) {}

    fn bulk_update(&mut self, _updates: &[(usize, M)]) {}

    fn register_slots(&self, _slots: &mut BTreeSet<usize>) {}
}

/// Squared Frobenius norm Σ A_ij², the quadratic inner part of
/// the [`frobenius_norm`] composition.
#[derive(Clone, Debug)]
pub struct SquaredFrobeniusNorm<M: Matrix> {
    a: M,
    value: M::Elem,
}

fn frobenius_inner<M: Matrix>(x: &M, y: &M) -> M::Elem {
    let mut s = M::Elem::zero();
    for i in 0..x.rows() {
        for j in 0..x.cols() {
            s = s + x.at(i, j) * y.at(i, j);
        }
    }
    s
}

impl<M: Matrix> SquaredFrobeniusNorm<M> {
    pub fn new(a: M) -> Self {
        let value = frobenius_inner(&a, &a);
        SquaredFrobeniusNorm { a, value }
    }
}

impl<M: Matrix> Function for SquaredFrobeniusNorm<M> {
    type Arg = M;
    type Value = M::Elem;

    #[inline]
    fn d0(&self) -> M::Elem {
        self.value
    }

    #[inline]
    fn d1<const ID: usize>(&self, dx: &M) -> M::Elem {
        let two = <M::Elem as NumCast>::from(2.0).unwrap();
        two * frobenius_inner(&self.a, dx)
    }

    #[inline]
    fn d2<const IX: usize, const IY: usize>(&self, dx: &M, dy: &M) -> M::Elem {
        let two = <M::Elem as NumCast>::from(2.0).unwrap();
        two * frobenius_inner(dx, dy)
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        _dx: &M,
        _dy: &M,
        _dz: &M,
    ) -> M::Elem {
        M::Elem::zero()
    }

    fn rebind(&mut self, x: &M) {
        *self = SquaredFrobeniusNorm::new(x.clone());
    }

    fn update(&mut self, _id: usize, _x: &M) {}

    fn bulk_update(&mut self, _updates: &[(usize, M)]) {}

    fn register_slots(&self, _slots: &mut BTreeSet<usize>) {}
}

/// Compose the determinant with a matrix-valued expression.
pub fn det<G>(g: G) -> Chain<Determinant<G::Value>, G>
where
    G: Function,
    G::Value: Matrix,
{
    Chain::new(Determinant::new(g.d0()), g)
}

/// Compose the cofactor matrix with a matrix-valued expression.
pub fn cof<G>(g: G) -> Chain<Cofactor<G::Value>, G>
where
    G: Function,
    G::Value: Matrix + Add<Output = G::Value>,
{
    Chain::new(Cofactor::new(g.d0()), g)
}

/// Compose the trace with a matrix-valued expression.
pub fn trace<G>(g: G) -> Chain<Trace<G::Value>, G>
where
    G: Function,
    G::Value: Matrix,
{
    Chain::new(Trace::new(g.d0()), g)
}

/// First principal invariant, the trace.
pub fn i1<G>(g: G) -> Chain<Trace<G::Value>, G>
where
    G: Function,
    G::Value: Matrix,
{
    trace(g)
}

/// Compose the second principal invariant with a matrix-valued expression.
pub fn i2<G>(g: G) -> Chain<SecondInvariant<G::Value>, G>
where
    G: Function,
    G::Value: Matrix,
{
    Chain::new(SecondInvariant::new(g.d0()), g)
}

/// Third principal invariant, the determinant.
pub fn i3<G>(g: G) -> Chain<Determinant<G::Value>, G>
where
    G: Function,
    G::Value: Matrix,
{
    det(g)
}

/// Compose the deviator with a matrix-valued expression.
pub fn deviator<G>(g: G) -> Chain<Deviator<G::Value>, G>
where
    G: Function,
    G::Value: Matrix + Add<Output = G::Value>,
{
    Chain::new(Deviator::new(g.d0()), g)
}

/// Compose the transpose with a matrix-valued expression.
pub fn transpose<G>(g: G) -> Chain<Transpose<G::Value>, G>
where
    G: Function,
    G::Value: Matrix + Add<Output = G::Value>,
{
    Chain::new(Transpose::new(g.d0()), g)
}

/// Compose the Frobenius norm with a matrix-valued expression.
pub fn frobenius_norm<G>(
    g: G,
) -> Chain<crate::cmath::Pow<<G::Value as Matrix>::Elem, 1, 2>, Chain<SquaredFrobeniusNorm<G::Value>, G>>
where
    G: Function,
    G::Value: Matrix,
{
    let squared = Chain::new(SquaredFrobeniusNorm::new(g.d0()), g);
    Chain::new(crate::cmath::Pow::new(squared.d0()), squared)
}
