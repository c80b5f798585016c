//! One-time structural pass over a finished expression tree.
//!
//! [`finalize`] walks the tree once, collecting the variable slots that
//! actually occur, and wraps the tree in [`Finalized`], the evaluation
//! handle users keep around: `eval()` reads the cached value, `d1`/`d2`/`d3`
//! take directional derivatives, `update`/`bulk_update` move variables.

use std::collections::BTreeSet;

use crate::function::Function;

/// Evaluation handle around a finished expression tree.
pub struct Finalized<E: Function> {
    expr: E,
    slots: BTreeSet<usize>,
}

/// Register the tree's variable slots and wrap it for evaluation.
pub fn finalize<E: Function>(expr: E) -> Finalized<E> {
    let mut slots = BTreeSet::new();
    expr.register_slots(&mut slots);
    Finalized { expr, slots }
}

impl<E: Function> Finalized<E> {
    /// Value at the current variable binding.
    #[inline]
    pub fn eval(&self) -> E::Value {
        self.expr.d0()
    }

    /// First directional derivative with respect to slot `ID`.
    #[inline]
    pub fn d1<const ID: usize>(&self, dx: &E::Arg) -> E::Value {
        self.expr.d1::<ID>(dx)
    }

    /// Second directional derivative with respect to slots `IX`, `IY`.
    #[inline]
    pub fn d2<const IX: usize, const IY: usize>(&self, dx: &E::Arg, dy: &E::Arg) -> E::Value {
        self.expr.d2::<IX, IY>(dx, dy)
    }

    /// Third directional derivative with respect to slots `IX`, `IY`, `IZ`.
    #[inline]
    pub fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &E::Arg,
        dy: &E::Arg,
        dz: &E::Arg,
    ) -> E::Value {
        self.expr.d3::<IX, IY, IZ>(dx, dy, dz)
    }

    /// Rebind the variables of slot `id` and refresh the caches along the
    /// affected paths. Updates to a slot that never occurs in the tree are
    /// ignored (and flagged by a debug assertion).
    pub fn update(&mut self, id: usize, x: &E::Arg) {
        debug_assert!(
            self.slots.contains(&id),
            "update to unregistered variable slot {id}"
        );
        if self.slots.contains(&id) {
            self.expr.update(id, x);
        }
    }

    /// Apply several slot assignments in one traversal; each node refreshes
    /// its cache exactly once.
    pub fn bulk_update(&mut self, updates: &[(usize, E::Arg)]) {
        debug_assert!(
            updates.iter().all(|(id, _)| self.slots.contains(id)),
            "bulk_update contains an unregistered variable slot"
        );
        self.expr.bulk_update(updates);
    }

    /// The variable slots registered during finalization, in ascending
    /// order.
    pub fn slots(&self) -> &BTreeSet<usize> {
        &self.slots
    }
}
