//! The node contract every expression node satisfies.
//!
//! An expression tree is built from [`Variable`](crate::variable::Variable) /
//! [`Constant`](crate::variable::Constant) leaves, combinators
//! ([`Sum`](crate::operations::Sum), [`Product`](crate::operations::Product),
//! [`Scale`](crate::operations::Scale), [`Chain`](crate::operations::Chain))
//! and primitives (`cmath`, `linalg`). Each node exposes its value (`d0`) and
//! directional derivatives up to third order; there is no `d4`, so requesting
//! a higher order does not compile.
//!
//! Variable slots are addressed by const-generic ids (`d1::<ID>`). A
//! derivative with respect to a slot that does not occur under a node is the
//! zero element of the node's value space.

use std::collections::BTreeSet;

/// Value spaces flowing through an expression tree.
///
/// Provides the zero element shaped like `self` — needed because dynamically
/// sized matrices have no context-free zero.
pub trait ZeroLike {
    fn zero_like(&self) -> Self;
}

impl ZeroLike for f32 {
    #[inline]
    fn zero_like(&self) -> f32 {
        0.0
    }
}

impl ZeroLike for f64 {
    #[inline]
    fn zero_like(&self) -> f64 {
        0.0
    }
}

impl ZeroLike for String {
    fn zero_like(&self) -> String {
        String::from("0")
    }
}

/// Uniform interface of an expression node.
///
/// `Arg` is the tangent-direction/argument type of the variables underneath
/// the node (all variables of one tree share it); `Value` is the type the
/// node evaluates to. The two differ for matrix functionals such as the
/// determinant (`Arg` = matrix, `Value` = scalar) and for every node of the
/// texify backend (`Arg` = `Value` = `String`).
pub trait Function {
    type Arg;
    type Value;

    /// Current value at the current variable binding.
    fn d0(&self) -> Self::Value;

    /// First directional derivative with respect to variable slot `ID` in
    /// direction `dx`.
    fn d1<const ID: usize>(&self, dx: &Self::Arg) -> Self::Value;

    /// Second directional derivative with respect to slots `IX`, `IY`.
    fn d2<const IX: usize, const IY: usize>(&self, dx: &Self::Arg, dy: &Self::Arg) -> Self::Value;

    /// Third directional derivative with respect to slots `IX`, `IY`, `IZ`.
    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &Self::Arg,
        dy: &Self::Arg,
        dz: &Self::Arg,
    ) -> Self::Value;

    /// Reset the point of evaluation.
    ///
    /// Primitives recompute their cached value and derivative factors;
    /// combinators forward to their children and refresh their own cache.
    /// Variables and constants ignore this — variables move only through
    /// slot updates.
    fn rebind(&mut self, x: &Self::Arg);

    /// Rebind every variable leaf with slot `id` to `x` and refresh the
    /// caches along the affected paths. Each node refreshes exactly once.
    fn update(&mut self, id: usize, x: &Self::Arg);

    /// Apply several slot assignments in a single traversal.
    ///
    /// Every matching leaf takes its paired value, absent slots are left
    /// untouched, and each internal node refreshes its cache exactly once no
    /// matter how many descendant leaves changed. Assignments to distinct
    /// slots commute.
    fn bulk_update(&mut self, updates: &[(usize, Self::Arg)]);

    /// Record the variable slots occurring under this node.
    ///
    /// This is the structural pass performed once by
    /// [`finalize`](crate::finalize::finalize).
    fn register_slots(&self, slots: &mut BTreeSet<usize>);
}
