//! Regression tests for the rendered LaTeX strings.
//!
//! The expected strings pin the rendering conventions exactly, including
//! the bracketing quirks (`\sin{(x)}` but `\tan(x)`).

use nabla3::texify::cmath::{ACos, ASin, Cos, Exp, Ln, Pow, Sin, Tan};
use nabla3::texify::linalg::{cof, det, frobenius_norm, trace, transpose};
use nabla3::variable::Variable;
use nabla3::{finalize, Function};

fn s(text: &str) -> String {
    text.to_string()
}

#[test]
fn sine_rendering() {
    let f = Sin::new("x");
    assert_eq!(f.d0(), r"\sin{(x)}");
    assert_eq!(f.d1::<0>(&s("dx")), r"\cos{(x)}*dx");
    assert_eq!(f.d2::<0, 0>(&s("dx"), &s("dy")), r"-\sin{(x)}*dx*dy");
    assert_eq!(
        f.d3::<0, 0, 0>(&s("dx"), &s("dy"), &s("dz")),
        r"-\cos{(x)}*dx*dy*dz"
    );
}

#[test]
fn cosine_rendering() {
    let f = Cos::new("x");
    assert_eq!(f.d0(), r"\cos{(x)}");
    assert_eq!(f.d1::<0>(&s("dx")), r"-\sin{(x)}*dx");
    assert_eq!(
        f.d3::<0, 0, 0>(&s("dx"), &s("dy"), &s("dz")),
        r"\sin{(x)}*dx*dy*dz"
    );
}

#[test]
fn tangent_rendering_keeps_plain_parentheses() {
    let f = Tan::new("x");
    assert_eq!(f.d0(), r"\tan(x)");
    assert_eq!(f.d1::<0>(&s("dx")), r"(1+\tan^2(x))*dx");
    assert_eq!(
        f.d2::<0, 0>(&s("dx"), &s("dy")),
        r"2*\tan(x)*(1+\tan^2(x))*dx*dy"
    );
    assert_eq!(
        f.d3::<0, 0, 0>(&s("dx"), &s("dy"), &s("dz")),
        r"2*(1+\tan^2(x))*(1 + 3*\tan^2(x))*dx*dy*dz"
    );
}

#[test]
fn arcsine_rendering() {
    let f = ASin::new("x");
    assert_eq!(f.d0(), r"\arcsin{(x)}");
    assert_eq!(f.d1::<0>(&s("dx")), r"\frac{1}{\sqrt{1-x^2}}*dx");
    assert_eq!(f.d2::<0, 0>(&s("dx"), &s("dy")), r"x*(1-x^2)^{-3/2}*dx*dy");
    assert_eq!(
        f.d3::<0, 0, 0>(&s("dx"), &s("dy"), &s("dz")),
        r"\frac{1}{(1-x^2)^{3/2}}*(1 + \frac{3*x^2}{1-x^2})*dx*dy*dz"
    );
}

#[test]
fn arccosine_rendering() {
    let f = ACos::new("x");
    assert_eq!(f.d0(), r"\arccos{(x)}");
    assert_eq!(f.d1::<0>(&s("dx")), r"\frac{-1}{\sqrt{1-x^2}}*dx");
    assert_eq!(f.d2::<0, 0>(&s("dx"), &s("dy")), r"-x*(1-x^2)^{-3/2}*dx*dy");
    assert_eq!(
        f.d3::<0, 0, 0>(&s("dx"), &s("dy"), &s("dz")),
        r"\frac{-1}{(1-x^2)^{3/2}}*(1 + \frac{3*x^2}{1-x^2})*dx*dy*dz"
    );
}

#[test]
fn exponential_rendering() {
    let f = Exp::new("x");
    assert_eq!(f.d0(), "e^{x}");
    assert_eq!(f.d1::<0>(&s("dx")), "e^{x}*dx");
    assert_eq!(f.d2::<0, 0>(&s("dx"), &s("dy")), "e^{x}*dx*dy");
}

#[test]
fn logarithm_rendering() {
    let f = Ln::new("x");
    assert_eq!(f.d0(), r"\ln(x)");
    assert_eq!(f.d1::<0>(&s("dx")), "x^{-1}*dx");
    assert_eq!(f.d2::<0, 0>(&s("dx"), &s("dy")), "-(x^{-2})*dx*dy");
    assert_eq!(
        f.d3::<0, 0, 0>(&s("dx"), &s("dy"), &s("dz")),
        "2(x^{-3})*dx*dy*dz"
    );
}

#[test]
fn squared_power_rendering() {
    let f = Pow::<2>::new("x");
    assert_eq!(f.d0(), "x^2");
    assert_eq!(f.d1::<0>(&s("dx")), "2x*dx");
    assert_eq!(f.d2::<0, 0>(&s("dx"), &s("dy")), "2*dx*dy");
}

#[test]
fn cubic_power_rendering() {
    let f = Pow::<3>::new("x");
    assert_eq!(f.d0(), "x^3");
    assert_eq!(f.d1::<0>(&s("dx")), "3x^2*dx");
    assert_eq!(f.d2::<0, 0>(&s("dx"), &s("dy")), "6x*dx*dy");
    assert_eq!(f.d3::<0, 0, 0>(&s("dx"), &s("dy"), &s("dz")), "6*dx*dy*dz");
}

#[test]
fn quartic_power_rendering() {
    let f = Pow::<4>::new("x");
    assert_eq!(f.d0(), "x^4");
    assert_eq!(f.d1::<0>(&s("dx")), "4x^3*dx");
    assert_eq!(f.d2::<0, 0>(&s("dx"), &s("dy")), "12x^2*dx*dy");
    assert_eq!(f.d3::<0, 0, 0>(&s("dx"), &s("dy"), &s("dz")), "24x*dx*dy*dz");
}

#[test]
fn square_root_rendering() {
    let f = Pow::<1, 2>::new("x");
    assert_eq!(f.d0(), "x^{1/2}");
    assert_eq!(f.d1::<0>(&s("dx")), "1/2*x^{-1/2}*dx");
    assert_eq!(f.d2::<0, 0>(&s("dx"), &s("dy")), "-1/4*x^{-3/2}*dx*dy");
    assert_eq!(
        f.d3::<0, 0, 0>(&s("dx"), &s("dy"), &s("dz")),
        "3/8*x^{-5/2}*dx*dy*dz"
    );
}

#[test]
fn determinant_rendering() {
    let f = det("A");
    assert_eq!(f.d0(), r"\det(A)");
    assert_eq!(f.d1::<0>(&s("dA")), r"\mathrm{tr}((\mathrm{cof}(A))^T*dA)");
    assert_eq!(
        f.d2::<0, 0>(&s("dA"), &s("dB")),
        r"\mathrm{tr}((\mathrm{cof}^{(1)}(A)(dB))^T*dA)"
    );
    assert_eq!(
        f.d3::<0, 0, 0>(&s("dA"), &s("dB"), &s("dC")),
        r"\mathrm{tr}((\mathrm{cof}^{(2)}(A)(dB,dC))^T*dA)"
    );
}

#[test]
fn cofactor_rendering() {
    let f = cof("A");
    assert_eq!(f.d0(), r"\mathrm{cof}(A)");
    assert_eq!(f.d1::<0>(&s("dA")), r"\mathrm{cof}^{(1)}(A)(dA)");
    assert_eq!(f.d2::<0, 0>(&s("dA"), &s("dB")), r"\mathrm{cof}^{(2)}(A)(dA,dB)");
}

#[test]
fn trace_rendering() {
    let f = trace("B");
    assert_eq!(f.d0(), r"\mathrm{tr}(B)");
    assert_eq!(f.d1::<0>(&s("dB")), r"\mathrm{tr}(dB)");
}

#[test]
fn transpose_rendering() {
    let f = transpose("B");
    assert_eq!(f.d0(), "B^T");
    assert_eq!(f.d1::<0>(&s("dC")), "dC^T");
}

#[test]
fn frobenius_norm_rendering() {
    let f = frobenius_norm("B");
    assert_eq!(f.d0(), r"(\sum_{i,j}B_{ij}^2)^{1/2}");

    let f = finalize(frobenius_norm("C"));
    assert_eq!(
        f.d1::<0>(&s("dA")),
        r"1/2*(\sum_{i,j}C_{ij}^2)^{-1/2}*2\sum_{i,j}(C_{ij}*dA_{ij})"
    );
}

#[test]
fn combinators_render_sums_products_and_scalings() {
    let x = || Variable::<String, 0>::new(s("x"));

    let f = nabla3::texify::operations::Sum::new(x(), x());
    assert_eq!(f.d0(), "x + x");
    assert_eq!(f.d1::<0>(&s("dx")), "dx + dx");

    let f = nabla3::texify::operations::Product::new(x(), x());
    assert_eq!(f.d0(), "x*x");
    assert_eq!(f.d1::<0>(&s("dx")), "dx*x + x*dx");

    let f = nabla3::texify::operations::Scale::new(2.0, Sin::new("x"));
    assert_eq!(f.d0(), r"2*\sin{(x)}");
    assert_eq!(f.d1::<0>(&s("dx")), r"2*\cos{(x)}*dx");

    // Additive factors get wrapped when they enter a product.
    let f = nabla3::texify::operations::Product::new(
        nabla3::texify::operations::Sum::new(x(), x()),
        x(),
    );
    assert_eq!(f.d0(), "(x + x)*x");
}

#[test]
fn chains_render_through_string_variables() {
    // A sine over a symbolic variable: the tangent flows in via the
    // variable's derivative.
    let x = Variable::<String, 0>::new(s("x"));
    let f = nabla3::texify::cmath::sin(x);
    assert_eq!(f.d0(), r"\sin{(x)}");
    assert_eq!(f.d1::<0>(&s("dx")), r"\cos{(x)}*dx");
}

#[test]
fn string_variables_rebind_symbols_on_update() {
    let x = Variable::<String, 0>::new(s("x"));
    let mut f = nabla3::texify::cmath::sin(x);
    f.update(0, &s("y"));
    assert_eq!(f.d0(), r"\sin{(y)}");
}
