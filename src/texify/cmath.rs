//! Rendered scalar primitives.
//!
//! Each node holds its symbol (scoped at construction the way the rendered
//! formula needs it) and prints the closed-form derivative factors, with the
//! tangent strings multiplied on via [`multiply_if_not_empty`]. The
//! bracketing of each function follows the established rendering: `\sin{(x)}`
//! and friends carry a TeX group, `\tan(x)` only parentheses, `e^{x}` a bare
//! group.

use std::collections::BTreeSet;

use crate::function::Function;

use super::operations::Chain;
use super::{add_scope, add_strict_scope, add_tex_scope, force_add_scope, multiply_if_not_empty};

macro_rules! string_primitive_plumbing {
    () => {
        fn update(&mut self, _id: usize, _x: &String) {}

        fn bulk_update(&mut self, _updates: &[(usize, String)]) {}

        fn register_slots(&self, _slots: &mut BTreeSet<usize>) {}
    };
}

/// Rendered sine: `\sin{(x)}`.
#[derive(Clone, Debug)]
pub struct Sin {
    x: String,
}

impl Sin {
    pub fn new(x: impl Into<String>) -> Self {
        Sin {
            x: add_tex_scope(&force_add_scope(&x.into())),
        }
    }
}

impl Function for Sin {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!(r"\sin{}", self.x)
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!(r"\cos{}{}", self.x, multiply_if_not_empty(dx))
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        format!(
            r"-\sin{}{}{}",
            self.x,
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy)
        )
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        format!(
            r"-\cos{}{}{}{}",
            self.x,
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy),
            multiply_if_not_empty(dz)
        )
    }

    fn rebind(&mut self, x: &String) {
        *self = Sin::new(x.clone());
    }

    string_primitive_plumbing!();
}

/// Rendered cosine: `\cos{(x)}`.
#[derive(Clone, Debug)]
pub struct Cos {
    x: String,
}

impl Cos {
    pub fn new(x: impl Into<String>) -> Self {
        Cos {
            x: add_tex_scope(&force_add_scope(&x.into())),
        }
    }
}

impl Function for Cos {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!(r"\cos{}", self.x)
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!(r"-\sin{}{}", self.x, multiply_if_not_empty(dx))
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        format!(
            r"-\cos{}{}{}",
            self.x,
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy)
        )
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        format!(
            r"\sin{}{}{}{}",
            self.x,
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy),
            multiply_if_not_empty(dz)
        )
    }

    fn rebind(&mut self, x: &String) {
        *self = Cos::new(x.clone());
    }

    string_primitive_plumbing!();
}

/// Rendered tangent: `\tan(x)`, without the TeX group the other
/// trigonometric functions carry.
#[derive(Clone, Debug)]
pub struct Tan {
    x: String,
}

impl Tan {
    pub fn new(x: impl Into<String>) -> Self {
        Tan {
            x: force_add_scope(&x.into()),
        }
    }
}

impl Function for Tan {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!(r"\tan{}", self.x)
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!(r"(1+\tan^2{}){}", self.x, multiply_if_not_empty(dx))
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        format!(
            "2*{}*{}{}",
            self.d0(),
            self.d1::<0>(dx),
            multiply_if_not_empty(dy)
        )
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        format!(
            r"2*{}*(1 + 3*\tan^2{}){}{}{}",
            self.d1::<0>(&String::new()),
            self.x,
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy),
            multiply_if_not_empty(dz)
        )
    }

    fn rebind(&mut self, x: &String) {
        *self = Tan::new(x.clone());
    }

    string_primitive_plumbing!();
}

/// Rendered arcsine: `\arcsin{(x)}` with the `\frac{1}{\sqrt{1-x^2}}`
/// derivative family.
#[derive(Clone, Debug)]
pub struct ASin {
    x: String,
}

impl ASin {
    pub fn new(x: impl Into<String>) -> Self {
        ASin { x: x.into() }
    }

    fn scoped(&self) -> String {
        add_scope(self.x.clone())
    }
}

impl Function for ASin {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!(r"\arcsin{}", add_tex_scope(&force_add_scope(&self.x)))
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!(
            r"\frac{{1}}{{\sqrt{{1-{}^2}}}}{}",
            self.scoped(),
            multiply_if_not_empty(dx)
        )
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        let x = self.scoped();
        format!(
            "{x}*(1-{x}^2)^{{-3/2}}{}{}",
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy)
        )
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        let x = self.scoped();
        format!(
            r"\frac{{1}}{{(1-{x}^2)^{{3/2}}}}*(1 + \frac{{3*{x}^2}}{{1-{x}^2}}){}{}{}",
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy),
            multiply_if_not_empty(dz)
        )
    }

    fn rebind(&mut self, x: &String) {
        self.x = x.clone();
    }

    string_primitive_plumbing!();
}

/// Rendered arccosine: the negated arcsine family.
#[derive(Clone, Debug)]
pub struct ACos {
    x: String,
}

impl ACos {
    pub fn new(x: impl Into<String>) -> Self {
        ACos { x: x.into() }
    }

    fn scoped(&self) -> String {
        add_scope(self.x.clone())
    }
}

impl Function for ACos {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!(r"\arccos{}", add_tex_scope(&force_add_scope(&self.x)))
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!(
            r"\frac{{-1}}{{\sqrt{{1-{}^2}}}}{}",
            self.scoped(),
            multiply_if_not_empty(dx)
        )
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        let x = self.scoped();
        format!(
            "-{x}*(1-{x}^2)^{{-3/2}}{}{}",
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy)
        )
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        let x = self.scoped();
        format!(
            r"\frac{{-1}}{{(1-{x}^2)^{{3/2}}}}*(1 + \frac{{3*{x}^2}}{{1-{x}^2}}){}{}{}",
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy),
            multiply_if_not_empty(dz)
        )
    }

    fn rebind(&mut self, x: &String) {
        self.x = x.clone();
    }

    string_primitive_plumbing!();
}

/// Rendered exponential: `e^{x}` everywhere.
#[derive(Clone, Debug)]
pub struct Exp {
    x: String,
}

impl Exp {
    pub fn new(x: impl Into<String>) -> Self {
        Exp {
            x: add_tex_scope(&x.into()),
        }
    }
}

impl Function for Exp {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!("e^{}", self.x)
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!("{}{}", self.d0(), multiply_if_not_empty(dx))
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        format!(
            "{}{}{}",
            self.d0(),
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy)
        )
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        format!(
            "{}{}{}{}",
            self.d0(),
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy),
            multiply_if_not_empty(dz)
        )
    }

    fn rebind(&mut self, x: &String) {
        *self = Exp::new(x.clone());
    }

    string_primitive_plumbing!();
}

/// Rendered natural logarithm: `\ln(x)` with `x^{-k}` derivative factors.
#[derive(Clone, Debug)]
pub struct Ln {
    x: String,
}

impl Ln {
    pub fn new(x: impl Into<String>) -> Self {
        Ln { x: x.into() }
    }
}

impl Function for Ln {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        format!(r"\ln({})", self.x)
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        format!("{}^{{-1}}{}", self.x, multiply_if_not_empty(dx))
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        format!(
            "-({}^{{-2}}){}{}",
            self.x,
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy)
        )
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        format!(
            "2({}^{{-3}}){}{}{}",
            self.x,
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy),
            multiply_if_not_empty(dz)
        )
    }

    fn rebind(&mut self, x: &String) {
        self.x = x.clone();
    }

    string_primitive_plumbing!();
}

/// Rendered rational power x^(N/D).
///
/// Integer exponents print plain coefficients (`2x*dx`, `6x*dx*dy`);
/// genuinely rational ones keep unreduced fraction coefficients and
/// TeX-grouped exponents (`1/2*x^{-1/2}*dx`).
#[derive(Clone, Debug)]
pub struct Pow<const N: i64, const D: i64 = 1> {
    x: String,
}

fn int_pow_term(coef: i64, x: &str, e: i64) -> String {
    if coef == 0 {
        return "0".to_string();
    }
    match e {
        0 => format!("{coef}"),
        1 => format!("{coef}{x}"),
        _ => format!("{coef}{x}^{e}"),
    }
}

fn frac(num: i64, den: i64) -> String {
    format!("{num}/{den}")
}

impl<const N: i64, const D: i64> Pow<N, D> {
    pub fn new(x: impl Into<String>) -> Self {
        Pow {
            x: add_strict_scope(&x.into()),
        }
    }

    fn rational_term(coef_num: i64, coef_den: i64, x: &str, e_num: i64) -> String {
        format!(
            "{}*{x}^{}",
            frac(coef_num, coef_den),
            add_tex_scope(&frac(e_num, D))
        )
    }
}

impl<const N: i64, const D: i64> Function for Pow<N, D> {
    type Arg = String;
    type Value = String;

    fn d0(&self) -> String {
        if D == 1 {
            if N == 1 {
                self.x.clone()
            } else {
                format!("{}^{N}", self.x)
            }
        } else {
            format!("{}^{}", self.x, add_tex_scope(&frac(N, D)))
        }
    }

    fn d1<const ID: usize>(&self, dx: &String) -> String {
        let body = if D == 1 {
            int_pow_term(N, &self.x, N - 1)
        } else {
            Self::rational_term(N, D, &self.x, N - D)
        };
        format!("{body}{}", multiply_if_not_empty(dx))
    }

    fn d2<const IX: usize, const IY: usize>(&self, dx: &String, dy: &String) -> String {
        let body = if D == 1 {
            int_pow_term(N * (N - 1), &self.x, N - 2)
        } else {
            Self::rational_term(N * (N - D), D * D, &self.x, N - 2 * D)
        };
        format!(
            "{body}{}{}",
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy)
        )
    }

    fn d3<const IX: usize, const IY: usize, const IZ: usize>(
        &self,
        dx: &String,
        dy: &String,
        dz: &String,
    ) -> String {
        let body = if D == 1 {
            int_pow_term(N * (N - 1) * (N - 2), &self.x, N - 3)
        } else {
            Self::rational_term(N * (N - D) * (N - 2 * D), D * D * D, &self.x, N - 3 * D)
        };
        format!(
            "{body}{}{}{}",
            multiply_if_not_empty(dx),
            multiply_if_not_empty(dy),
            multiply_if_not_empty(dz)
        )
    }

    fn rebind(&mut self, x: &String) {
        *self = Pow::new(x.clone());
    }

    string_primitive_plumbing!();
}

/// Compose a rendered `sin` with an inner rendered expression.
pub fn sin<G>(g: G) -> Chain<Sin, G>
where
    G: Function<Arg = String, Value = String>,
{
    Chain::new(Sin::new(g.d0()), g)
}

/// Compose a rendered `cos` with an inner rendered expression.
pub fn cos<G>(g: G) -> Chain<Cos, G>
where
    G: Function<Arg = String, Value = String>,
{
    Chain::new(Cos::new(g.d0()), g)
}

/// Compose a rendered `tan` with an inner rendered expression.
pub fn tan<G>(g: G) -> Chain<Tan, G>
where
    G: Function<Arg = String, Value = String>,
{
    Chain::new(Tan::new(g.d0()), g)
}

/// Compose a rendered `arcsin` with an inner rendered expression.
pub fn asin<G>(g: G) -> Chain<ASin, G>
where
    G: Function<Arg = String, Value = String>,
{
    Chain::new(ASin::new(g.d0()), g)
}

/// Compose a rendered `arccos` with an inner rendered expression.
pub fn acos<G>(g: G) -> Chain<ACos, G>
where
    G: Function<Arg = String, Value = String>,
{
    Chain::new(ACos::new(g.d0()), g)
}

/// Compose a rendered `exp` with an inner rendered expression.
pub fn exp<G>(g: G) -> Chain<Exp, G>
where
    G: Function<Arg = String, Value = String>,
{
    Chain::new(Exp::new(g.d0()), g)
}

/// Compose a rendered natural logarithm with an inner rendered expression.
pub fn ln<G>(g: G) -> Chain<Ln, G>
where
    G: Function<Arg = String, Value = String>,
{
    Chain::new(Ln::new(g.d0()), g)
}

/// Compose a rendered power with an inner rendered expression.
pub fn pow<const N: i64, const D: i64, G>(g: G) -> Chain<Pow<N, D>, G>
where
    G: Function<Arg = String, Value = String>,
{
    Chain::new(Pow::new(g.d0()), g)
}

/// Compose a rendered square root with an inner rendered expression.
pub fn sqrt<G>(g: G) -> Chain<Pow<1, 2>, G>
where
    G: Function<Arg = String, Value = String>,
{
    Chain::new(Pow::new(g.d0()), g)
}
