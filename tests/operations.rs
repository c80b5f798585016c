//! Combinator tests: sum rule, Leibniz rule up to third order, scaling,
//! squaring, and chains, plus property tests over random points.

use approx::assert_relative_eq;
use nabla3::{cos, exp, finalize, scale, sin, squared, variable};
use proptest::prelude::*;

const ONE: f64 = 1.0;

#[test]
fn sum_rule() {
    let x = 0.8_f64;
    let f = finalize(sin(variable::<0, f64>(x)) + cos(variable::<0, f64>(x)));
    assert_relative_eq!(f.eval(), x.sin() + x.cos(), max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), x.cos() - x.sin(), max_relative = 1e-12);
    assert_relative_eq!(
        f.d2::<0, 0>(&ONE, &ONE),
        -x.sin() - x.cos(),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        f.d3::<0, 0, 0>(&ONE, &ONE, &ONE),
        -x.cos() + x.sin(),
        max_relative = 1e-12
    );
}

#[test]
fn product_of_independent_variables() {
    let f = finalize(variable::<0, f64>(2.0) * variable::<1, f64>(3.0));
    assert_relative_eq!(f.eval(), 6.0, max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), 3.0, max_relative = 1e-12);
    assert_relative_eq!(f.d1::<1>(&ONE), 2.0, max_relative = 1e-12);
    // The mixed second derivative of x*y is 1, the pure ones vanish.
    assert_relative_eq!(f.d2::<0, 1>(&ONE, &ONE), 1.0, max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), 0.0, max_relative = 1e-12);
    assert_relative_eq!(f.d3::<0, 0, 1>(&ONE, &ONE, &ONE), 0.0, max_relative = 1e-12);
}

#[test]
fn leibniz_rule_third_order() {
    // h = sin(x)*exp(x): h' = e(cos+sin), h'' = 2e*cos, h''' = 2e(cos-sin).
    let x = 0.6_f64;
    let f = finalize(sin(variable::<0, f64>(x)) * exp(variable::<0, f64>(x)));
    let e = x.exp();
    assert_relative_eq!(f.eval(), x.sin() * e, max_relative = 1e-12);
    assert_relative_eq!(
        f.d1::<0>(&ONE),
        e * (x.cos() + x.sin()),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        f.d2::<0, 0>(&ONE, &ONE),
        2.0 * e * x.cos(),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        f.d3::<0, 0, 0>(&ONE, &ONE, &ONE),
        2.0 * e * (x.cos() - x.sin()),
        max_relative = 1e-12
    );
}

#[test]
fn scaling_is_linear_in_every_order() {
    let x = 0.9_f64;
    let f = finalize(scale(2.5, sin(variable::<0, f64>(x))));
    assert_relative_eq!(f.eval(), 2.5 * x.sin(), max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), 2.5 * x.cos(), max_relative = 1e-12);
    assert_relative_eq!(
        f.d3::<0, 0, 0>(&ONE, &ONE, &ONE),
        -2.5 * x.cos(),
        max_relative = 1e-12
    );
}

#[test]
fn left_scalar_multiplication_builds_a_scaling() {
    let x = 0.9_f64;
    let f = finalize(2.5 * sin(variable::<0, f64>(x)));
    assert_relative_eq!(f.eval(), 2.5 * x.sin(), max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), 2.5 * x.cos(), max_relative = 1e-12);
}

#[test]
fn squared_expression() {
    // (sin x)^2: d1 = 2 sin cos, d2 = 2(cos^2 - sin^2), d3 = -8 sin cos.
    let x = 0.4_f64;
    let (s, c) = (x.sin(), x.cos());
    let f = finalize(squared(sin(variable::<0, f64>(x))));
    assert_relative_eq!(f.eval(), s * s, max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), 2.0 * s * c, max_relative = 1e-12);
    assert_relative_eq!(
        f.d2::<0, 0>(&ONE, &ONE),
        2.0 * (c * c - s * s),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        f.d3::<0, 0, 0>(&ONE, &ONE, &ONE),
        -8.0 * s * c,
        max_relative = 1e-12
    );
}

#[test]
fn chained_primitives() {
    // sin(exp(x)): d1 = cos(e^x)e^x, d2 = -sin(e^x)e^{2x} + cos(e^x)e^x.
    let x = 0.3_f64;
    let e = x.exp();
    let f = finalize(sin(exp(variable::<0, f64>(x))));
    assert_relative_eq!(f.eval(), e.sin(), max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), e.cos() * e, max_relative = 1e-12);
    assert_relative_eq!(
        f.d2::<0, 0>(&ONE, &ONE),
        -e.sin() * e * e + e.cos() * e,
        max_relative = 1e-12
    );
    // Third order by Faà di Bruno:
    // -cos(e)e^3 - 3 sin(e)e^2 + cos(e)e.
    assert_relative_eq!(
        f.d3::<0, 0, 0>(&ONE, &ONE, &ONE),
        -e.cos() * e * e * e - 3.0 * e.sin() * e * e + e.cos() * e,
        max_relative = 1e-12
    );
}

#[test]
fn shared_slot_moves_together() {
    // x*x over a single slot behaves like x^2.
    let mut f = finalize(variable::<0, f64>(3.0) * variable::<0, f64>(3.0));
    assert_relative_eq!(f.eval(), 9.0, max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), 6.0, max_relative = 1e-12);
    assert_relative_eq!(f.d2::<0, 0>(&ONE, &ONE), 2.0, max_relative = 1e-12);
    f.update(0, &5.0);
    assert_relative_eq!(f.eval(), 25.0, max_relative = 1e-12);
    assert_relative_eq!(f.d1::<0>(&ONE), 10.0, max_relative = 1e-12);
}

proptest! {
    #[test]
    fn sum_rule_holds_at_random_points(x in -1.0_f64..1.0) {
        let f = finalize(sin(variable::<0, f64>(x)) + exp(variable::<0, f64>(x)));
        let s = finalize(sin(variable::<0, f64>(x)));
        let e = finalize(exp(variable::<0, f64>(x)));
        prop_assert!((f.eval() - (s.eval() + e.eval())).abs() < 1e-12);
        prop_assert!((f.d1::<0>(&ONE) - (s.d1::<0>(&ONE) + e.d1::<0>(&ONE))).abs() < 1e-12);
        prop_assert!(
            (f.d3::<0, 0, 0>(&ONE, &ONE, &ONE)
                - (s.d3::<0, 0, 0>(&ONE, &ONE, &ONE) + e.d3::<0, 0, 0>(&ONE, &ONE, &ONE)))
            .abs()
                < 1e-12
        );
    }

    #[test]
    fn leibniz_rule_holds_at_random_points(x in -1.0_f64..1.0) {
        let fg = finalize(sin(variable::<0, f64>(x)) * cos(variable::<0, f64>(x)));
        let f = finalize(sin(variable::<0, f64>(x)));
        let g = finalize(cos(variable::<0, f64>(x)));
        let d1 = f.d1::<0>(&ONE) * g.eval() + f.eval() * g.d1::<0>(&ONE);
        prop_assert!((fg.d1::<0>(&ONE) - d1).abs() < 1e-12);
        let d2 = f.d2::<0, 0>(&ONE, &ONE) * g.eval()
            + 2.0 * f.d1::<0>(&ONE) * g.d1::<0>(&ONE)
            + f.eval() * g.d2::<0, 0>(&ONE, &ONE);
        prop_assert!((fg.d2::<0, 0>(&ONE, &ONE) - d2).abs() < 1e-12);
    }

    #[test]
    fn update_matches_rebuild(x in -1.0_f64..1.0, y in -1.0_f64..1.0) {
        let mut f = finalize(sin(variable::<0, f64>(x)) * exp(variable::<1, f64>(0.0)));
        f.update(1, &y);
        let fresh = finalize(sin(variable::<0, f64>(x)) * exp(variable::<1, f64>(y)));
        prop_assert!((f.eval() - fresh.eval()).abs() < 1e-12);
        prop_assert!((f.d1::<0>(&ONE) - fresh.d1::<0>(&ONE)).abs() < 1e-12);
        prop_assert!((f.d1::<1>(&ONE) - fresh.d1::<1>(&ONE)).abs() < 1e-12);
    }
}
