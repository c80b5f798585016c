//! nalgebra adapters for the matrix primitives.
//!
//! Implements [`Matrix`] and [`ZeroLike`] for the statically sized square
//! types (`SMatrix<F, 2, 2>`, `SMatrix<F, 3, 3>`) and for `DMatrix<F>`, so
//! nalgebra matrices flow directly through [`det`](crate::linalg::det),
//! [`cof`](crate::linalg::cof), [`trace`](crate::linalg::trace) and friends.

use nalgebra::{DMatrix, SMatrix};

use crate::float::Float;
use crate::function::ZeroLike;
use crate::linalg::Matrix;

impl<F: Float + nalgebra::Scalar, const N: usize> ZeroLike for SMatrix<F, N, N> {
    fn zero_like(&self) -> Self {
        SMatrix::zeros()
    }
}

impl<F: Float + nalgebra::Scalar, const N: usize> Matrix for SMatrix<F, N, N> {
    type Elem = F;

    #[inline]
    fn rows(&self) -> usize {
        N
    }

    #[inline]
    fn cols(&self) -> usize {
        N
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> F {
        self[(i, j)]
    }

    fn build<B>(&self, rows: usize, cols: usize, mut f: B) -> Self
    where
        B: FnMut(usize, usize) -> F,
    {
        assert!(
            rows == N && cols == N,
            "requested a {rows}x{cols} matrix from a {N}x{N} type"
        );
        SMatrix::from_fn(|i, j| f(i, j))
    }
}

impl<F: Float + nalgebra::Scalar> ZeroLike for DMatrix<F> {
    fn zero_like(&self) -> Self {
        DMatrix::zeros(self.nrows(), self.ncols())
    }
}

impl<F: Float + nalgebra::Scalar> Matrix for DMatrix<F> {
    type Elem = F;

    #[inline]
    fn rows(&self) -> usize {
        self.nrows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.ncols()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> F {
        self[(i, j)]
    }

    fn build<B>(&self, rows: usize, cols: usize, f: B) -> Self
    where
        B: FnMut(usize, usize) -> F,
    {
        DMatrix::from_fn(rows, cols, f)
    }
}
