//! Rendered matrix primitives.
//!
//! These nodes hold a matrix symbol (`"A"`) and print the matrix calculus
//! notation for value and derivatives: `\det(A)` differentiates to traces of
//! cofactor pairings, `\mathrm{cof}(A)` to the multilinear forms
//! `\mathrm{cof}^{(k)}(A)(...)`, and the Frobenius norm is the composition
//! of the rendered square root with the rendered squared norm.

use std::collections::BTreeSet;

use crate::function::Function;

use super::cmath::Pow;
use super::operations::Chain;

macro_rules! string_primitive_plumbing {
    () => {
        fn update(&mut self, _id: usize, _x: &String) {}

        fn bulk_update(&mut self, _updates: &[(usize, String)]) {}

        fn register_slots(&self, _slots: &mut BTreeSet<usize>) {}
    };
}

/// Rendered determinant: `\det(A)`.
#[derive(Clone, Debug)]
pub struct Determinant {
    a: String,
}

impl Determinant {
    pub fn new(a: impl Into<String>) -> Self {
        Determinant { a: a.into() }
    }
}

impl Function for Determinant {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!(r"\det({})", self.a)
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!(r"\mathrm{{tr}}((\mathrm{{cof}}({}))^T*{dx})", self.a)
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        format!(r"\mathrm{{tr}}((\mathrm{{cof}}^{{(1)}}({})({dy}))^T*{dx})", self.a)
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        format!(
            r"\mathrm{{tr}}((\mathrm{{cof}}^{{(2)}}({})({dy},{dz}))^T*{dx})",
            self.a
        )
    }

    fn rebind(&mut self, x: &String) {
        self.a = x.clone();
    }

    string_primitive_plumbing!();
}

/// Rendered cofactor matrix: `\mathrm{cof}(A)` and its multilinear
/// derivative forms.
#[derive(Clone, Debug)]
pub struct Cofactor {
    a: String,
}

impl Cofactor {
    pub fn new(a: impl Into<String>) -> Self {
        Cofactor { a: a.into() }
    }
}

impl Function for Cofactor {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!(r"\mathrm{{cof}}({})", self.a)
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!(r"\mathrm{{cof}}^{{(1)}}({})({dx})", self.a)
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        format!(r"\mathrm{{cof}}^{{(2)}}({})({dx},{dy})", self.a)
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        _dx: &String,
        _dy: &String,
        _dz: &String,
    ) -> String {
        "0".to_string()
    }

    fn rebind(&mut self, x: &String) {
        self.a = x.clone();
    }

    string_primitive_plumbing!();
}

/// Rendered trace: `\mathrm{tr}(B)`. Linear, so d1 just wraps the tangent.
#[derive(Clone, Debug)]
pub struct Trace {
    a: String,
}

impl Trace {
    pub fn new(a: impl Into<String>) -> Self {
        Trace { a: a.into() }
    }
}

impl Function for Trace {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!(r"\mathrm{{tr}}({})", self.a)
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!(r"\mathrm{{tr}}({dx})")
    }

    fn d2<const IX: usize, const IY: usize>(&self, _dx: &String, _dy: &String) -> String {
        "0".to_string()
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        _dx: &String,
        _dy: &String,
        _dz: &String,
    ) -> String {
        "0".to_string()
    }

    fn rebind(&mut self, x: &String) {
        self.a = x.clone();
    }

    string_primitive_plumbing!();
}

/// Rendered transpose: `B^T`.
#[derive(Clone, Debug)]
pub struct Transpose {
    a: String,
}

impl Transpose {
    pub fn new(a: impl Into<String>) -> Self {
        Transpose { a: a.into() }
    }
}

impl Function for Transpose {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!("{}^T", self.a)
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!("{dx}^T")
    }

    fn d2<const IX: usize, const IY: usize>(&self, _dx: &String, _dy: &String) -> String {
        "0".to_string()
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        _dx: &String,
        _dy: &String,
        _dz: &String,
    ) -> String {
        "0".to_string()
    }

    fn rebind(&mut self, x: &String) {
        self.a = x.clone();
    }

    string_primitive_plumbing!();
}

/// Rendered squared Frobenius norm: `\sum_{i,j}A_{ij}^2`.
#[derive(Clone, Debug)]
pub struct SquaredFrobeniusNorm {
    a: String,
}

impl SquaredFrobeniusNorm {
    pub fn new(a: impl Into<String>) -> Self {
        SquaredFrobeniusNorm { a: a.into() }
    }
}

impl Function for SquaredFrobeniusNorm {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!(r"\sum_{{i,j}}{}_{{ij}}^2", self.a)
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!(r"2\sum_{{i,j}}({}_{{ij}}*{dx}_{{ij}})", self.a)
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        format!(r"2\sum_{{i,j}}({dx}_{{ij}}*{dy}_{{ij}})")
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        _dx: &String,
        _dy: &String,
        _dz: &String,
    ) -> String {
        "0".to_string()
    }

    fn rebind(&mut self, x: &String) {
        self.a = x.clone();
    }

    string_primitive_plumbing!();
}

/// Rendered Frobenius norm: `(\sum_{i,j}A_{ij}^2)^{1/2}`.
pub type FrobeniusNorm = Chain<Pow<1, 2>, SquaredFrobeniusNorm>;

/// Rendered determinant of the matrix symbol `a`.
pub fn det(a: impl Into<String>) -> Determinant {
    Determinant::new(a)
}

/// Rendered cofactor matrix of the matrix symbol `a`.
pub fn cof(a: impl Into<String>) -> Cofactor {
    Cofactor::new(a)
}

/// Rendered trace of the matrix symbol `a`.
pub fn trace(a: impl Into<String>) -> Trace {
    Trace::new(a)
}

/// Rendered transpose of the matrix symbol `a`.
pub fn transpose(a: impl Into<String>) -> Transpose {
    Transpose::new(a)
}

/// Rendered Frobenius norm of the matrix symbol `a`.
pub fn frobenius_norm(a: impl Into<String>) -> FrobeniusNorm {
    let squared = SquaredFrobeniusNorm::new(a);
    Chain::new(Pow::new(squared.d0()), squared)
}
