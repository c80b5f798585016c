//! String renditions of the combinators.
//!
//! Mirrors [`operations`](crate::operations) with the same derivative
//! expansions, but joins rendered terms with `" + "` and `"*"` instead of
//! computing. Nothing is cached; every call re-renders.

use std::collections::BTreeSet;

use crate::function::Function;

use super::{add_strings, multiply_strings, scale_string};

/// Rendered sum `f + g`.
#[derive(Clone, Debug)]
pub struct Sum<F, G> {
    f: F,
    g: G,
}

impl<F, G> Sum<F, G>
where
    F: Function<Arg = String, Value = String>,
    G: Function<Arg = String, Value = String>,
{
    pub fn new(f: F, g: G) -> Self {
        Sum { f, g }
    }
}

impl<F, G> Function for Sum<F, G>
where
    F: Function<Arg = String, Value = String>,
    G: Function<Arg = String, Value = String>,
{
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        add_strings(self.f.d0(), &self.g.d0())
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        add_strings(self.f.d1::<ID>(dx), &self.g.d1::<ID>(dx))
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        add_strings(self.f.d2::<IX, IY>(dx, dy), &self.g.d2::<IX, IY>(dx, dy))
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        add_strings(
            self.f.d3::<IX, IY, IZ>(dx, dy, dz),
            &self.g.d3::<IX, IY, IZ>(dx, dy, dz),
        )
    }

    fn rebind(&mut self, x: &String) {
        self.f.rebind(x);
        self.g.rebind(x);
    }

    fn update(&mut self, id: usize, x: &String) {
        self.f.update(id, x);
        self.g.update(id, x);
    }

    fn bulk_update(&mut self, updates: &[(usize, String)]) {
        self.f.bulk_update(updates);
        self.g.bulk_update(updates);
    }

    fn register_slots(&self, slots: &mut BTreeSet<usize>) {
        self.f.register_slots(slots);
        self.g.register_slots(slots);
    }
}

/// Rendered product `f * g`, expanded by the Leibniz rule.
#[derive(Clone, Debug)]
pub struct Product<F, G> {
    f: F,
    g: G,
}

impl<F, G> Product<F, G>
where
    F: Function<Arg = String, Value = String>,
    G: Function<Arg = String, Value = String>,
{
    pub fn new(f: F, g: G) -> Self {
        Product { f, g }
    }
}

impl<F, G> Function for Product<F, G>
where
    F: Function<Arg = String, Value = String>,
    G: Function<Arg = String, Value = String>,
{
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        multiply_strings(self.f.d0(), self.g.d0())
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        add_strings(
            multiply_strings(self.f.d1::<ID>(dx), self.g.d0()),
            &multiply_strings(self.f.d0(), self.g.d1::<ID>(dx)),
        )
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        [
            multiply_strings(self.f.d2::<IX, IY>(dx, dy), self.g.d0()),
            multiply_strings(self.f.d1::<IX>(dx), self.g.d1::<IY>(dy)),
            multiply_strings(self.f.d1::<IY>(dy), self.g.d1::<IX>(dx)),
            multiply_strings(self.f.d0(), self.g.d2::<IX, IY>(dx, dy)),
        ]
        .join(" + ")
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        [
            multiply_strings(self.f.d3::<IX, IY, IZ>(dx, dy, dz), self.g.d0()),
            multiply_strings(self.f.d2::<IX, IY>(dx, dy), self.g.d1::<IZ>(dz)),
            multiply_strings(self.f.d2::<IX, IZ>(dx, dz), self.g.d1::<IY>(dy)),
            multiply_strings(self.f.d1::<IX>(dx), self.g.d2::<IY, IZ>(dy, dz)),
            multiply_strings(self.f.d2::<IY, IZ>(dy, dz), self.g.d1::<IX>(dx)),
            multiply_strings(self.f.d1::<IY>(dy), self.g.d2::<IX, IZ>(dx, dz)),
            multiply_strings(self.f.d1::<IZ>(dz), self.g.d2::<IX, IY>(dx, dy)),
            multiply_strings(self.f.d0(), self.g.d3::<IX, IY, IZ>(dx, dy, dz)),
        ]
        .join(" + ")
    }

    fn rebind(&mut self, x: &String) {
        self.f.rebind(x);
        self.g.rebind(x);
    }

    fn update(&mut self, id: usize, x: &String) {
        self.f.update(id, x);
        self.g.update(id, x);
    }

    fn bulk_update(&mut self, updates: &[(usize, String)]) {
        self.f.bulk_update(updates);
        self.g.bulk_update(updates);
    }

    fn register_slots(&self, slots: &mut BTreeSet<usize>) {
        self.f.register_slots(slots);
        self.g.register_slots(slots);
    }
}

/// Rendered scaling `a * f`.
#[derive(Clone, Debug)]
pub struct Scale<F> {
    a: f64,
    f: F,
}

impl<F> Scale<F>
where
    F: Function<Arg = String, Value = String>,
{
    pub fn new(a: f64, f: F) -> Self {
        Scale { a, f }
    }
}

impl<F> Function for Scale<F>
where
    F: Function<Arg = String, Value = String>,
{
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        scale_string(self.a, self.f.d0())
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        scale_string(self.a, self.f.d1::<ID>(dx))
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        scale_string(self.a, self.f.d2::<IX, IY>(dx, dy))
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        scale_string(self.a, self.f.d3::<IX, IY, IZ>(dx, dy, dz))
    }

    fn rebind(&mut self, x: &String) {
        self.f.rebind(x);
    }

    fn update(&mut self, id: usize, x: &String) {
        self.f.update(id, x);
    }

    fn bulk_update(&mut self, updates: &[(usize, String)]) {
        self.f.bulk_update(updates);
    }

    fn register_slots(&self, slots: &mut BTreeSet<usize>) {
        self.f.register_slots(slots);
    }
}

/// Rendered composition `f ∘ g`: the inner rendering becomes the outer
/// node's symbol.
#[derive(Clone, Debug)]
pub struct Chain<F, G> {
    f: F,
    g: G,
}

impl<F, G> Chain<F, G>
where
    F: Function<Arg = String, Value = String>,
    G: Function<Arg = String, Value = String>,
{
    pub fn new(mut f: F, g: G) -> Self {
        f.rebind(&g.d0());
        Chain { f, g }
    }
}

impl<F, G> Function for Chain<F, G>
where
    F: Function<Arg = String, Value = String>,
    G: Function<Arg = String, Value = String>,
{
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        self.f.d0()
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        self.f.d1::<ID>(&self.g.d1::<ID>(dx))
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        add_strings(
            self.f
                .d2::<IX, IY>(&self.g.d1::<IX>(dx), &self.g.d1::<IY>(dy)),
            &self.f.d1::<IX>(&self.g.d2::<IX, IY>(dx, dy)),
        )
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        let dgx = self.g.d1::<IX>(dx);
        let dgy = self.g.d1::<IY>(dy);
        let dgz = self.g.d1::<IZ>(dz);
        [
            self.f.d3::<IX, IY, IZ>(&dgx, &dgy, &dgz),
            self.f.d2::<IX, IY>(&self.g.d2::<IX, IZ>(dx, dz), &dgy),
            self.f.d2::<IX, IY>(&dgx, &self.g.d2::<IY, IZ>(dy, dz)),
            self.f.d2::<IX, IZ>(&self.g.d2::<IX, IY>(dx, dy), &dgz),
            self.f.d1::<IX>(&self.g.d3::<IX, IY, IZ>(dx, dy, dz)),
        ]
        .join(" + ")
    }

    fn rebind(&mut self, x: &String) {
        self.g.rebind(x);
        self.f.rebind(&self.g.d0());
    }

    fn update(&mut self, id: usize, x: &String) {
        self.g.update(id, x);
        self.f.rebind(&self.g.d0());
    }

    fn bulk_update(&mut self, updates: &[(usize, String)]) {
        self.g.bulk_update(updates);
        self.f.rebind(&self.g.d0());
    }

    fn register_slots(&self, slots: &mut BTreeSet<usize>) {
        self.g.register_slots(slots);
    }
}
