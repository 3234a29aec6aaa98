//! Contact record produced by the narrow-phase overlap test
//!
//! One manifold describes a single pairwise test and is constructed
//! fresh for each pair; it is never shared or reused across pairs.

use crate::simulation::vec2::Vect;

#[derive(Debug, Clone, Copy)]
pub struct Manifold {
    /// The pair should merge instead of exchanging an impulse
    pub coalescing: bool,
    /// Unit collision normal, oriented A -> B by the resolver
    pub normal: Vect,
    /// Midpoint between the two centers
    pub contact_point: Vect,
    /// Overlap depth, `(rA + rB) - distance`
    pub depth: f64,
}

impl Manifold {
    /// Contact for a merging pair. Normal and depth are meaningless
    /// for a merge and stay zero.
    pub fn merge() -> Self {
        Self {
            coalescing: true,
            normal: Vect::zeros(),
            contact_point: Vect::zeros(),
            depth: 0.0,
        }
    }

    /// Contact for an impulse-resolved pair
    pub fn bounce(normal: Vect, contact_point: Vect, depth: f64) -> Self {
        Self {
            coalescing: false,
            normal,
            contact_point,
            depth,
        }
    }
}
