//! # Curve Evaluation
//!
//! Pure functions mapping a control-point sequence and a parameter `t` in
//! `[0, 1]` to a point on the curve. Two bases are provided:
//!
//! - [`bezier_point`]: Bernstein-polynomial (Bezier) evaluation, the form
//!   used for edge splines reported by the layout engine.
//! - [`bspline_point`]: clamped-knot B-spline via the Cox-de Boor
//!   recursion, an alternative curve model.
//!
//! Both are deterministic and allocation-light; callers sample them at
//! uniform `t` steps for drawing and at arbitrary `t` for hit-testing.

use glam::Vec2;

/// Binomial coefficients C(n, k) for n, k < 16, built at compile time from
/// the Pascal's triangle relation.
const BINOMIAL_TABLE: [[u64; 16]; 16] = build_binomial_table();

const fn build_binomial_table() -> [[u64; 16]; 16] {
    let mut table = [[0u64; 16]; 16];
    let mut n = 0;
    while n < 16 {
        table[n][0] = 1;
        let mut k = 1;
        while k <= n {
            table[n][k] = table[n - 1][k - 1] + table[n - 1][k];
            k += 1;
        }
        n += 1;
    }
    table
}

/// C(n, k). Table lookup for small indices, Pascal's triangle recursion
/// beyond the table (curves of such high degree are rare in practice).
fn binomial(n: usize, k: usize) -> f32 {
    if n < 16 && k < 16 {
        return BINOMIAL_TABLE[n][k] as f32;
    }
    if k == 0 || k == n {
        1.0
    } else {
        binomial(n - 1, k - 1) + binomial(n - 1, k)
    }
}

/// Evaluates the Bezier curve defined by `points` at `t` in `[0, 1]`.
///
/// The curve degree is `points.len() - 1`; the curve passes through the
/// first point at `t = 0` and the last at `t = 1`.
///
/// # Panics
/// Panics if `points` is empty.
pub fn bezier_point(points: &[Vec2], t: f32) -> Vec2 {
    assert!(!points.is_empty(), "bezier curve needs at least one point");
    let n = points.len() - 1;
    let mut acc = Vec2::ZERO;
    for (i, p) in points.iter().enumerate() {
        let basis = binomial(n, i) * (1.0 - t).powi((n - i) as i32) * t.powi(i as i32);
        acc += *p * basis;
    }
    acc
}

/// Evaluates a clamped-knot B-spline over `points` at `t` in `[0, 1]`.
///
/// The requested `degree` is clamped to `points.len() - 2`, and `t` is
/// clamped just below 1.0 so evaluation never walks past the final knot
/// span. The knot vector (`points.len() + degree + 1` entries) is the only
/// transient allocation.
///
/// # Panics
/// Panics if `points` is empty.
pub fn bspline_point(points: &[Vec2], degree: usize, t: f32) -> Vec2 {
    assert!(!points.is_empty(), "b-spline needs at least one point");
    if points.len() == 1 {
        return points[0];
    }
    let degree = degree.min(points.len() - 2).max(1);
    let t = t.clamp(0.0, 1.0 - f32::EPSILON * 4.0);

    // Clamped knot vector: degree+1 zeros, uniform interior, degree+1 ones.
    let knot_count = points.len() + degree + 1;
    let interior = knot_count - 2 * (degree + 1);
    let mut knots = Vec::with_capacity(knot_count);
    for _ in 0..=degree {
        knots.push(0.0f32);
    }
    for i in 0..interior {
        knots.push((i + 1) as f32 / (interior + 1) as f32);
    }
    for _ in 0..=degree {
        knots.push(1.0f32);
    }

    let mut acc = Vec2::ZERO;
    for (i, p) in points.iter().enumerate() {
        acc += *p * cox_de_boor(i, degree, t, &knots);
    }
    acc
}

/// Cox-de Boor basis function N_{i,p}(t). Zero-width knot spans contribute
/// nothing (their denominator guard returns 0).
fn cox_de_boor(i: usize, p: usize, t: f32, knots: &[f32]) -> f32 {
    if p == 0 {
        return if knots[i] <= t && t < knots[i + 1] {
            1.0
        } else {
            0.0
        };
    }
    let mut value = 0.0;
    let left_den = knots[i + p] - knots[i];
    if left_den > 0.0 {
        value += (t - knots[i]) / left_den * cox_de_boor(i, p - 1, t, knots);
    }
    let right_den = knots[i + p + 1] - knots[i + 1];
    if right_den > 0.0 {
        value += (knots[i + p + 1] - t) / right_den * cox_de_boor(i + 1, p - 1, t, knots);
    }
    value
}
