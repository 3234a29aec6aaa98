//! Build a fully-populated universe from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime
//! bundle consumed by the viewer: a `Universe` seeded with the
//! configured particle distributions plus the per-frame time delta.
//!
//! The spawn helpers only use the universe's creation API — they are
//! callers of the engine, not part of it. All randomness goes through
//! one seeded ChaCha stream so runs are reproducible.

use std::f64::consts::TAU;

use bevy::prelude::Resource;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::configuration::config::{ScenarioConfig, SpawnConfig};
use crate::simulation::grid::SpatialHashGrid;
use crate::simulation::params::Parameters;
use crate::simulation::particle::{Rgb, PARTICLE_MASS, RADIUS_TO_MASS_RATIO};
use crate::simulation::universe::Universe;
use crate::simulation::vec2::Vect;

/// Bevy resource holding the populated universe and the frame delta.
/// Inserted into the app by `run_2d` and stepped by the physics
/// system once per rendered frame.
#[derive(Resource)]
pub struct Scenario {
    pub universe: Universe,
    pub dt: f64,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        let p_cfg = &cfg.parameters;
        let params = Parameters {
            g: p_cfg.g,
            restitution: p_cfg.restitution,
            mass_coalesce_ratio: p_cfg.mass_coalesce_ratio,
            coalesce_tolerance: p_cfg.coalesce_tolerance,
            epsilon_accuracy: p_cfg.epsilon_accuracy,
            correction_slop: p_cfg.correction_slop,
        };

        let g_cfg = &cfg.grid;
        let grid = SpatialHashGrid::new(
            Vect::new(g_cfg.origin[0], g_cfg.origin[1]),
            Vect::new(g_cfg.extents[0], g_cfg.extents[1]),
            g_cfg.rows,
            g_cfg.cols,
        );

        let mut universe = Universe::new(grid, params);
        let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);

        for spawn in &cfg.spawns {
            match *spawn {
                SpawnConfig::Orbits {
                    center,
                    center_mass,
                    center_radius,
                    max_radius,
                    count,
                } => setup_circular_orbits(
                    &mut universe,
                    &mut rng,
                    Vect::new(center[0], center[1]),
                    center_mass,
                    center_radius,
                    max_radius,
                    count,
                ),
                SpawnConfig::Disk {
                    center,
                    max_radius,
                    count,
                } => setup_disk(
                    &mut universe,
                    &mut rng,
                    Vect::new(center[0], center[1]),
                    max_radius,
                    count,
                ),
                SpawnConfig::Random {
                    width,
                    height,
                    count,
                    mass,
                } => setup_random_dispersion(&mut universe, &mut rng, width, height, count, mass),
                SpawnConfig::Body {
                    pos,
                    vel,
                    mass,
                    radius,
                } => {
                    universe.create_particle_with(
                        Vect::new(pos[0], pos[1]),
                        Vect::new(vel[0], vel[1]),
                        mass,
                        radius,
                    );
                }
            }
        }

        Self {
            universe,
            dt: cfg.dt,
        }
    }
}

fn random_color(rng: &mut ChaCha8Rng) -> Rgb {
    Rgb::new(rng.gen(), rng.gen(), rng.gen())
}

/// Central mass orbited by a ring of light particles on circular
/// orbits: each orbiter gets the tangential speed `sqrt(G M / r)`
/// that balances the central pull at its distance
fn setup_circular_orbits(
    universe: &mut Universe,
    rng: &mut ChaCha8Rng,
    center: Vect,
    center_mass: f64,
    center_radius: f64,
    max_radius: f64,
    count: u32,
) {
    let g = universe.params().g;

    let sun = universe.create_particle_with(center, Vect::zeros(), center_mass, center_radius);
    sun.color = Rgb::new(253, 184, 19);
    let clearance = sun.radius * 1.2;

    for _ in 0..count {
        let distance = rng.gen_range(0.0..max_radius) + clearance;
        let angle = rng.gen::<f64>() * TAU;
        let pos = center + Vect::new(distance * angle.cos(), distance * angle.sin());

        let speed = (g * center_mass / distance).sqrt();
        let vel = Vect::new(-speed * angle.sin(), speed * angle.cos());

        let mass = rng.gen_range(0..2) as f64 + 0.5;
        let color = random_color(rng);
        let p = universe.create_particle(pos, vel);
        p.set_mass(mass);
        p.radius = mass * RADIUS_TO_MASS_RATIO;
        p.color = color;
    }
}

/// Disk of default particles orbiting their mutual center
fn setup_disk(
    universe: &mut Universe,
    rng: &mut ChaCha8Rng,
    center: Vect,
    max_radius: f64,
    count: u32,
) {
    let g = universe.params().g;

    for _ in 0..count {
        let distance = 1.0 + rng.gen_range(0.0..max_radius);
        let angle = rng.gen::<f64>() * TAU;
        let pos = center + Vect::new(distance * angle.cos(), distance * angle.sin());

        let speed = (g * PARTICLE_MASS / distance).sqrt();
        let vel = Vect::new(-speed * angle.sin(), speed * angle.cos());

        let color = random_color(rng);
        universe.create_particle(pos, vel).color = color;
    }
}

/// Stationary particles scattered uniformly over a rectangle
fn setup_random_dispersion(
    universe: &mut Universe,
    rng: &mut ChaCha8Rng,
    width: f64,
    height: f64,
    count: u32,
    mass: f64,
) {
    for _ in 0..count {
        let pos = Vect::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        let color = random_color(rng);
        let p = universe.create_particle(pos, Vect::zeros());
        p.set_mass(mass);
        p.color = color;
    }
}
