//! LaTeX rendering backend.
//!
//! A second implementation of [`Function`](crate::function::Function) whose
//! argument and value spaces are `String`: nodes render themselves and their
//! derivatives as LaTeX source instead of numbers. Trees are built the same
//! way as numeric ones, from [`Variable`](crate::variable::Variable) /
//! [`Constant`](crate::variable::Constant) leaves over `String` (the generic
//! leaves work unchanged here), the combinators in
//! [`operations`](self::operations), and the primitives in
//! [`cmath`](self::cmath) and [`linalg`](self::linalg).
//!
//! This module holds the scoping helpers shared by all string nodes. Their
//! bracketing rules are deliberately heuristic: just enough parentheses to
//! keep rendered derivatives unambiguous, not a pretty-printer.

pub mod cmath;
pub mod linalg;
pub mod operations;

/// Always wrap in parentheses.
pub fn force_add_scope(s: &str) -> String {
    format!("({s})")
}

fn has_additive_term(s: &str) -> bool {
    // An alphanumeric character followed (up to whitespace) by a binary
    // '+' or '-'.
    let mut after_alnum = false;
    for c in s.chars() {
        if after_alnum && matches!(c, '+' | '|' | '-') {
            return true;
        }
        if c.is_ascii_alphanumeric() {
            after_alnum = true;
        } else if !c.is_whitespace() {
            after_alnum = false;
        }
    }
    false
}

/// Parenthesize when the string contains a top-level additive term.
pub fn add_scope(s: String) -> String {
    if has_additive_term(&s) {
        force_add_scope(&s)
    } else {
        s
    }
}

/// Parenthesize when any character past the first is an operator; used for
/// bases of exponents.
pub fn add_strict_scope(s: &str) -> String {
    if s.chars()
        .skip(1)
        .any(|c| matches!(c, '+' | '|' | '-' | '*' | '/' | '(' | '^'))
    {
        force_add_scope(s)
    } else {
        s.to_string()
    }
}

/// Wrap in a TeX group `{...}`.
pub fn add_tex_scope(s: &str) -> String {
    format!("{{{s}}}")
}

/// `"*dx"`, or nothing for an empty direction.
pub fn multiply_if_not_empty(dx: &str) -> String {
    if dx.is_empty() {
        String::new()
    } else {
        format!("*{dx}")
    }
}

/// Join two rendered terms additively.
pub fn add_strings(lhs: String, rhs: &str) -> String {
    lhs + " + " + rhs
}

/// Join two rendered factors, scoping each as needed.
pub fn multiply_strings(lhs: String, rhs: String) -> String {
    let mut s = add_scope(lhs);
    s.push('*');
    s.push_str(&add_scope(rhs));
    s
}

/// Prefix a rendered term with a scalar coefficient.
pub fn scale_string(a: f64, rhs: String) -> String {
    format!("{a}*{}", add_scope(rhs))
}
