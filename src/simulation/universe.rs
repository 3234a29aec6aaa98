//! Universe: owns all particles and advances them frame by frame
//!
//! One `update(dt)` call runs three phases in order:
//! 1. collision — broad-phase grid query per particle, narrow-phase
//!    circle test, then either coalescence (mass merge) or an impulse,
//! 2. gravity — exhaustive pairwise Newtonian attraction (gravity has
//!    unbounded range, so no spatial pruning),
//! 3. integration — one semi-implicit Euler step per survivor, then a
//!    grid resync.
//!
//! Everything is single-threaded and synchronous; callers may read
//! the particle table between frames only.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::simulation::grid::SpatialHashGrid;
use crate::simulation::manifold::Manifold;
use crate::simulation::params::Parameters;
use crate::simulation::particle::{Particle, ParticleId};
use crate::simulation::vec2::{self, Vect};

pub struct Universe {
    /// Live particles, ascending by id. The ordering is load-bearing:
    /// the gravity and collision sweeps rely on a stable enumeration
    /// that visits each unordered pair exactly once.
    particles: BTreeMap<ParticleId, Particle>,
    grid: SpatialHashGrid,
    params: Parameters,
    next_id: u32,
}

impl Universe {
    pub fn new(grid: SpatialHashGrid, params: Parameters) -> Self {
        Self {
            particles: BTreeMap::new(),
            grid,
            params,
            next_id: 0,
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn grid(&self) -> &SpatialHashGrid {
        &self.grid
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(&id)
    }

    /// Live particles in ascending id order
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.values()
    }

    /// Create a particle with the default mass and radius. Ids are
    /// monotonic and never reused; the particle is inserted into both
    /// the table and the grid. Inputs are not validated.
    pub fn create_particle(&mut self, pos: Vect, vel: Vect) -> &mut Particle {
        let id = ParticleId(self.next_id);
        self.next_id += 1;

        let mut p = Particle::new(id);
        p.pos = pos;
        p.vel = vel;

        self.grid.add_client(id, &pos, p.radius);
        self.particles.entry(id).or_insert(p)
    }

    /// Create a particle with an explicit mass and radius. Zero or
    /// negative mass is legal; zero mass gives zero inverse mass, so
    /// forces never accelerate it while gravity still acts through it.
    pub fn create_particle_with(
        &mut self,
        pos: Vect,
        vel: Vect,
        mass: f64,
        radius: f64,
    ) -> &mut Particle {
        let id = ParticleId(self.next_id);
        self.next_id += 1;

        let mut p = Particle::new(id);
        p.pos = pos;
        p.vel = vel;
        p.set_mass(mass);
        p.radius = radius;

        self.grid.add_client(id, &pos, radius);
        self.particles.entry(id).or_insert(p)
    }

    /// Advance the whole universe by one frame
    pub fn update(&mut self, dt: f64) {
        self.collision_phase();
        self.gravity_phase();
        self.integrate_phase(dt);
    }

    /// Phase 1: sweep a start-of-frame snapshot of ids in ascending
    /// order. A merge may delete any particle except the one the
    /// outer sweep is currently visiting, so absorbed ids are skipped
    /// when their turn comes.
    fn collision_phase(&mut self) {
        let ids: Vec<ParticleId> = self.particles.keys().copied().collect();
        let mut near = BTreeSet::new();

        for a_id in ids {
            if !self.particles.contains_key(&a_id) {
                continue; // absorbed earlier this pass
            }

            near.clear();
            self.grid.find_near_id(a_id, &mut near);

            for &b_id in &near {
                if b_id == a_id {
                    continue;
                }
                let (a, b) = match (self.particles.get(&a_id), self.particles.get(&b_id)) {
                    (Some(a), Some(b)) => (*a, *b),
                    _ => continue,
                };
                let Some(manifold) = self.test_collision(&a, &b) else {
                    continue;
                };

                if manifold.coalescing {
                    self.coalesce(a_id, b_id);
                    // The visited particle may now carry the merged
                    // state; drop its remaining candidates this frame.
                    break;
                }
                self.apply_impulse(a_id, b_id, &manifold);
            }
        }
    }

    /// Narrow phase: circle overlap plus the coalesce-vs-bounce
    /// classification. Coalescing wins, in order, when the velocities
    /// are near-equal (no separating impulse possible), when one mass
    /// overwhelmingly dominates (absorb instead of tunneling), or when
    /// the centers are effectively coincident (normal undefined).
    pub fn test_collision(&self, a: &Particle, b: &Particle) -> Option<Manifold> {
        let radii = a.radius + b.radius;
        let offset = a.pos - b.pos;
        if offset.norm_squared() > radii * radii {
            return None;
        }

        let p = &self.params;
        if (a.vel.dot(&b.vel) - a.vel.norm_squared()).abs() < p.coalesce_tolerance
            || a.mass() > b.mass() * p.mass_coalesce_ratio
            || offset.norm_squared() < p.epsilon_accuracy
        {
            return Some(Manifold::merge());
        }

        Some(Manifold::bounce(
            vec2::normalize_or_zero(&offset),
            b.pos + offset / 2.0,
            radii - offset.norm(),
        ))
    }

    /// Merge `b` into the table entry of `a`. The larger mass is the
    /// blend base (ties keep the visited particle) and the offset is
    /// scaled by the absorbed body's inverse mass — intentionally not
    /// a center-of-mass blend, preserved for behavioral parity. The
    /// visited entry always survives; `b` leaves the table and the
    /// grid and its id is never reassigned.
    fn coalesce(&mut self, a_id: ParticleId, b_id: ParticleId) {
        let (a, b) = match (self.particles.get(&a_id), self.particles.get(&b_id)) {
            (Some(a), Some(b)) => (*a, *b),
            _ => return,
        };

        let (base, other) = if b.mass() > a.mass() { (b, a) } else { (a, b) };

        let pos = base.pos + (other.pos - base.pos) * other.inv_mass();
        let vel = base.vel + (other.vel - base.vel) * other.inv_mass();
        let radius = (a.radius * a.radius + b.radius * b.radius).sqrt();
        let mass = a.mass() + b.mass();
        let forces = a.forces() + b.forces();
        let color = base.color;

        if let Some(survivor) = self.particles.get_mut(&a_id) {
            survivor.pos = pos;
            survivor.vel = vel;
            survivor.radius = radius;
            survivor.set_mass(mass);
            survivor.clear_forces();
            survivor.add_force(forces);
            survivor.color = color;
        }

        self.grid.delete_client(b_id);
        self.particles.remove(&b_id);
    }

    /// Impulse resolution for a bouncing pair, plus a soft positional
    /// correction of half the depth to relieve penetration without
    /// injecting energy.
    fn apply_impulse(&mut self, a_id: ParticleId, b_id: ParticleId, m: &Manifold) {
        let (a, b) = match (self.particles.get(&a_id), self.particles.get(&b_id)) {
            (Some(a), Some(b)) => (*a, *b),
            _ => return,
        };

        // Normal must point from a to b
        let mut normal = m.normal;
        if normal.dot(&(b.pos - a.pos)) < 0.0 {
            normal = -normal;
        }

        let inv_sum = a.inv_mass() + b.inv_mass();
        if inv_sum == 0.0 {
            return; // two immovable bodies, no finite impulse
        }

        let relative_velocity = a.vel - b.vel;
        let separating_speed = relative_velocity.dot(&normal);

        let j = -(1.0 + self.params.restitution) * separating_speed / inv_sum;
        let jn = normal * j;
        let correction = normal * self.params.correction_slop * m.depth / 2.0;

        if let Some(pa) = self.particles.get_mut(&a_id) {
            pa.vel += jn * a.inv_mass();
            pa.pos -= correction;
        }
        if let Some(pb) = self.particles.get_mut(&b_id) {
            pb.vel -= jn * b.inv_mass();
            pb.pos += correction;
        }
    }

    /// Phase 2: direct pairwise gravity over every unordered pair,
    /// visited exactly once in ascending-id order. Forces accumulate
    /// in a scratch buffer and are applied afterward; each pair is
    /// computed once and applied with opposite signs.
    fn gravity_phase(&mut self) {
        let snapshot: Vec<(ParticleId, Vect, f64)> = self
            .particles
            .values()
            .map(|p| (p.id(), p.pos, p.mass()))
            .collect();
        let n = snapshot.len();
        let mut out = vec![Vect::zeros(); n];

        for i in 0..n {
            let (_, xi, mi) = snapshot[i];
            for j in (i + 1)..n {
                let (_, xj, mj) = snapshot[j];

                let r = xi - xj;
                let d2 = r.norm_squared();
                // Overlapping centers would blow the force up
                if d2 < self.params.epsilon_accuracy {
                    continue;
                }

                let rn = r / d2.sqrt();
                let fg = rn * (self.params.g * mi * mj / d2);

                // fg points from j toward i: attract j, negate for i
                out[j] += fg;
                out[i] -= fg;
            }
        }

        for (k, (id, _, _)) in snapshot.iter().enumerate() {
            if let Some(p) = self.particles.get_mut(id) {
                p.add_force(out[k]);
            }
        }
    }

    /// Phase 3: integrate every survivor exactly once, then push its
    /// new bounding box back into the grid.
    fn integrate_phase(&mut self, dt: f64) {
        for (id, p) in self.particles.iter_mut() {
            p.integrate(dt);
            self.grid.update(*id, &p.pos, p.radius);
        }
    }
}
