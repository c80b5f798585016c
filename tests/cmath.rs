//! Closed-form derivative checks for the scalar primitives.
//!
//! Each primitive is wrapped around a variable, finalized, and compared
//! against the hand-written formula for the first three derivatives.

use approx::assert_relative_eq;
use nabla3::{acos, asin, cos, exp, finalize, ln, pow, sin, sqrt, tan, variable};

const ONE: f64 = 1.0;

#[test]
fn sine_derivatives() {
    let x = 0.5_f64;
    let f = finalize(sin(variable::<0, f64>(x)));
    assert_relative_eq!(f.eval(), x.sin(), max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), x.cos(), max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), -x.sin(), max_relative = 1e-12);
    assert_relative_eq!(f.d3::<0, 0, 0>(&ONE, &ONE, &ONE), -x.cos(), max_relative = 1e-12);
}

#[test]
fn cosine_derivatives() {
    let x = 0.7_f64;
    let f = finalize(cos(variable::<0, f64>(x)));
    assert_relative_eq!(f.eval(), x.cos(), max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), -x.sin(), max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), -x.cos(), max_relative = 1e-12);
    assert_relative_eq!(f.d3::<0, 0, 0>(&ONE, &ONE, &ONE), x.sin(), max_relative = 1e-12);
}

#[test]
fn tangent_derivatives() {
    let x = 0.5_f64;
    let t = x.tan();
    let sec2 = 1.0 + t * t;
    let f = finalize(tan(variable::<0, f64>(x)));
    assert_relative_eq!(f.eval(), t, max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), sec2, max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), 2.0 * t * sec2, max_relative = 1e-12);
    assert_relative_eq!(
        f.d3::<0, 0, 0>(&ONE, &ONE, &ONE),
        2.0 * sec2 * (1.0 + 3.0 * t * t),
        max_relative = 1e-12
    );
}

#[test]
fn arcsine_derivatives() {
    let x = 0.3_f64;
    let p = (1.0 - x * x).sqrt().recip();
    let f = finalize(asin(variable::<0, f64>(x)));
    assert_relative_eq!(f.eval(), x.asin(), max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), p, max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), x * p.powi(3), max_relative = 1e-12);
    assert_relative_eq!(
        f.d3::<0, 0, 0>(&ONE, &ONE, &ONE),
        p.powi(3) * (1.0 + 3.0 * x * x / (1.0 - x * x)),
        max_relative = 1e-12
    );
}

#[test]
fn arccosine_derivatives() {
    let x = 0.3_f64;
    let p = (1.0 - x * x).sqrt().recip();
    let f = finalize(acos(variable::<0, f64>(x)));
    assert_relative_eq!(f.eval(), x.acos(), max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), -p, max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), -x * p.powi(3), max_relative = 1e-12);
    assert_relative_eq!(
        f.d3::<0, 0, 0>(&ONE, &ONE, &ONE),
        -p.powi(3) * (1.0 + 3.0 * x * x / (1.0 - x * x)),
        max_relative = 1e-12
    );
}

#[test]
fn exponential_derivatives() {
    let x = 1.2_f64;
    let f = finalize(exp(variable::<0, f64>(x)));
    for value in [
        f.eval(),
        f.d1::<0>(&ONE),
        f.d2::<0, 0>(&ONE, &ONE),
        f.d3::<0, 0, 0>(&ONE, &ONE, &ONE),
    ] {
        assert_relative_eq!(value, x.exp(), max_relative = 1e-12);
    }
}

#[test]
fn logarithm_derivatives() {
    let f = finalize(ln(variable::<0, f64>(2.0)));
    assert_relative_eq!(f.eval(), 2.0_f64.ln(), max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), 0.5, max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), -0.25, max_relative = 1e-12);
    assert_relative_eq!(f.d3::<0, 0, 0>(&ONE, &ONE, &ONE), 0.25, max_relative = 1e-12);
}

#[test]
fn cubic_power_derivatives() {
    let f = finalize(pow::<3, 1, _>(variable::<0, f64>(2.0)));
    assert_relative_eq!(f.eval(), 8.0, max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), 12.0, max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), 12.0, max_relative = 1e-12);
    assert_relative_eq!(f.d3::<0, 0, 0>(&ONE, &ONE, &ONE), 6.0, max_relative = 1e-12);
}

#[test]
fn square_root_derivatives() {
    let f = finalize(sqrt(variable::<0, f64>(4.0)));
    assert_relative_eq!(f.eval(), 2.0, max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), 0.25, max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), -0.03125, max_relative = 1e-12);
    assert_relative_eq!(
        f.d3::<0, 0, 0>(&ONE, &ONE, &ONE),
        3.0 / 8.0 * 4.0_f64.powf(-2.5),
        max_relative = 1e-12
    );
}

#[test]
fn negative_integer_power() {
    // x^-1 at x = 2: value 1/2, derivatives -1/4, 2/8, -6/16.
    let f = finalize(pow::<-1, 1, _>(variable::<0, f64>(2.0)));
    assert_relative_eq!(f.eval(), 0.5, max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), -0.25, max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), 0.25, max_relative = 1e-12);
    assert_relative_eq!(f.d3::<0, 0, 0>(&ONE, &ONE, &ONE), -0.375, max_relative = 1e-12);
}

#[test]
fn integer_power_derivatives_vanish_identically_at_zero() {
    // The cubic factor of x^2 and the curvature of x are zero on the whole
    // domain, including x = 0 where the bare power x^{k-3} alone diverges.
    let f = finalize(pow::<2, 1, _>(variable::<0, f64>(0.0)));
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), 2.0, max_relative = 1e-12);
    assert_relative_eq!(f.d3::<0, 0, 0>(&ONE, &ONE, &ONE), 0.0, max_relative = 1e-12);

    let g = finalize(pow::<1, 1, _>(variable::<0, f64>(0.0)));
    assert_relative_eq!(g.d1::<0>(&ONE), 1.0, max_relative = 1e-12);
    assert_relative_eq!(g.d2::<0, 0>(&ONE, &ONE), 0.0, max_relative = 1e-12);
    assert_relative_eq!(g.d3::<0, 0, 0>(&ONE, &ONE, &ONE), 0.0, max_relative = 1e-12);
}

#[test]
fn directional_tangents_scale_derivatives() {
    // Directions multiply in: d2 with tangents (2, 3) is 6 times the
    // plain second derivative.
    let x = 0.4_f64;
    let f = finalize(sin(variable::<0, f64>(x)));
    assert_relative_eq!(f.d1::<0>(&2.0), 2.0 * x.cos(), max_relative = 1e-12);
    assert_relative_eq!(
        f.d2::<0, 0>(&2.0, &3.0),
        -6.0 * x.sin(),
        max_relative = 1e-12
    );
}

#[test]
fn update_moves_the_point_of_evaluation() {
    let mut f = finalize(exp(variable::<0, f64>(0.0)));
    assert_relative_eq!(f.eval(), 1.0, max_relative = 1e-12);
    f.update(0, &1.0);
    assert_relative_eq!(f.eval(), 1.0_f64.exp(), max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), 1.0_f64.exp(), max_relative = 1e-12);
}

#[test]
fn derivative_of_absent_slot_is_zero() {
    let f = finalize(sin(variable::<0, f64>(0.5)));
    assert_relative_eq!(f.d1::<1>(&ONE), 0.0, max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 1>(&ONE, &ONE), 0.0, max_relative = 1e-12);
}
