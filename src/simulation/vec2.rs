//! 2D vector type and the geometric helpers the physics needs
//!
//! The vector itself is a `nalgebra` alias, so addition, scaling,
//! dot products and norms come from nalgebra. The free functions here
//! add the 2D-specific operations it lacks: scalar cross product,
//! orientation test, zero-safe normalization, reflection, projection
//! and rejection, and an epsilon comparison.

use nalgebra::Vector2;

pub type Vect = Vector2<f64>;

/// Componentwise comparison tolerance for [`approx_eq`]
pub const VEC_EPSILON: f64 = 1e-10;

/// 2D scalar cross product `a.x*b.y - a.y*b.x`
/// Signed area of the parallelogram spanned by `a` and `b`
pub fn cross(a: &Vect, b: &Vect) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Three-point orientation test for `a -> b -> c`
/// Positive for a counter-clockwise turn, negative for clockwise,
/// zero for collinear points
pub fn orientation(a: &Vect, b: &Vect, c: &Vect) -> f64 {
    cross(&(b - a), &(c - a))
}

/// Normalize `v`, returning the zero vector when the magnitude is
/// exactly zero instead of dividing by it
pub fn normalize_or_zero(v: &Vect) -> Vect {
    let mag = v.norm();
    if mag == 0.0 {
        return Vect::zeros();
    }
    v / mag
}

/// Reflect `v` across the plane with unit normal `n`
/// `v - 2 (v . n) n`
pub fn reflect(v: &Vect, n: &Vect) -> Vect {
    v - n * (2.0 * v.dot(n))
}

/// Component of `v` parallel to `onto`
/// Zero vector when `onto` is the zero vector
pub fn project(v: &Vect, onto: &Vect) -> Vect {
    let d = onto.norm_squared();
    if d == 0.0 {
        return Vect::zeros();
    }
    onto * (v.dot(onto) / d)
}

/// Component of `v` perpendicular to `onto`
pub fn reject(v: &Vect, onto: &Vect) -> Vect {
    v - project(v, onto)
}

/// Componentwise equality within [`VEC_EPSILON`]
pub fn approx_eq(a: &Vect, b: &Vect) -> bool {
    (a.x - b.x).abs() < VEC_EPSILON && (a.y - b.y).abs() < VEC_EPSILON
}

pub fn distance_squared(a: &Vect, b: &Vect) -> f64 {
    (a - b).norm_squared()
}

pub fn distance(a: &Vect, b: &Vect) -> f64 {
    (a - b).norm()
}
