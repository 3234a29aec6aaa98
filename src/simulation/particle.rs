//! Point-mass particle state and its integrator
//!
//! A particle is a circle with no rotation or friction. Forces are
//! accumulated over a frame and consumed by a single semi-implicit
//! Euler step. The id is assigned by the universe, is strictly
//! monotonic and never reused, so other components can hold it as a
//! stable reference instead of an owning pointer.

use crate::simulation::vec2::Vect;

/// Default particle mass when none is given
pub const PARTICLE_MASS: f64 = 1.0;
/// Default radius = ratio * mass
pub const RADIUS_TO_MASS_RATIO: f64 = 1.0;

/// Stable particle identity. Monotonically assigned, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub u32);

/// Display color, presentation-only. Ignored by the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    id: ParticleId,
    pub pos: Vect,
    pub vel: Vect,
    pub acc: Vect, // derived, recomputed each integration
    forces: Vect,  // cleared once per integration step
    mass: f64,
    inv_mass: f64,
    pub radius: f64,
    pub color: Rgb,
    pub active: bool, // reserved, unused by the current algorithm
}

impl Particle {
    pub fn new(id: ParticleId) -> Self {
        Self {
            id,
            pos: Vect::zeros(),
            vel: Vect::zeros(),
            acc: Vect::zeros(),
            forces: Vect::zeros(),
            mass: PARTICLE_MASS,
            inv_mass: 1.0 / PARTICLE_MASS,
            radius: RADIUS_TO_MASS_RATIO * PARTICLE_MASS,
            color: Rgb::WHITE,
            active: false,
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Inverse mass: `1/mass`, or `0` for a zero-mass particle.
    /// Zero inverse mass means forces produce no acceleration, while
    /// gravity still computes a force on and against the particle.
    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    /// Set the mass, keeping the inverse mass consistent
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.inv_mass = if mass != 0.0 { 1.0 / mass } else { 0.0 };
    }

    pub fn add_force(&mut self, f: Vect) {
        self.forces += f;
    }

    pub fn forces(&self) -> Vect {
        self.forces
    }

    pub fn clear_forces(&mut self) {
        self.forces = Vect::zeros();
    }

    /// Semi-implicit (symplectic) Euler step: the velocity is updated
    /// from this step's force before the position is updated from the
    /// new velocity. Consumes the force accumulator. Must run exactly
    /// once per frame, after all force-producing phases.
    pub fn integrate(&mut self, dt: f64) {
        self.acc = self.forces * self.inv_mass;
        self.vel += self.acc * dt;
        self.pos += self.vel * dt;
        self.clear_forces();
    }
}
