//! Physical and numerical parameters for the universe
//!
//! `Parameters` holds the runtime constants:
//! - gravitational constant `g`,
//! - restitution for impulse resolution,
//! - the three coalescence thresholds,
//! - positional correction slop

#[derive(Debug, Clone)]
pub struct Parameters {
    pub g: f64,                   // gravitational constant
    pub restitution: f64,         // rebound elasticity
    pub mass_coalesce_ratio: f64, // dominant-mass absorb threshold, handles tunneling
    pub coalesce_tolerance: f64,  // near-equal-velocity merge threshold
    pub epsilon_accuracy: f64,    // squared-distance singularity guard
    pub correction_slop: f64,     // fractional penetration relief
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: 1.0e-6,
            restitution: 0.5,
            mass_coalesce_ratio: 1000.0,
            coalesce_tolerance: 1.0e-7,
            epsilon_accuracy: 1.0e-7,
            correction_slop: 1.0001,
        }
    }
}
