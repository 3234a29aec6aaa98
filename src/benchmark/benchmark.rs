use std::collections::BTreeSet;
use std::time::Instant;

use crate::simulation::grid::SpatialHashGrid;
use crate::simulation::params::Parameters;
use crate::simulation::universe::Universe;
use crate::simulation::vec2::{distance_squared, Vect};

/// Build a universe of `n` particles on deterministic trig positions,
/// no rand needed
fn bench_universe(n: usize) -> Universe {
    let grid = SpatialHashGrid::new(Vect::new(0.0, 0.0), Vect::new(1200.0, 680.0), 25, 15);
    let mut universe = Universe::new(grid, Parameters::default());

    for i in 0..n {
        let i_f = i as f64;
        let pos = Vect::new(
            600.0 + (i_f * 0.37).sin() * 580.0,
            340.0 + (i_f * 0.13).cos() * 320.0,
        );
        universe.create_particle_with(pos, Vect::zeros(), 1.0, 2.0);
    }

    universe
}

/// Compare the grid broad phase against a brute-force pair scan
pub fn bench_broadphase() {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let universe = bench_universe(n);

        // Warm up
        let mut near = BTreeSet::new();
        for p in universe.particles() {
            near.clear();
            universe.grid().find_near_id(p.id(), &mut near);
        }

        // Time grid candidate collection over every particle
        let t0 = Instant::now();
        let mut candidates = 0usize;
        for p in universe.particles() {
            near.clear();
            universe.grid().find_near_id(p.id(), &mut near);
            candidates += near.len();
        }
        let dt_grid = t0.elapsed().as_secs_f64();

        // Time the exhaustive n^2 overlap scan
        let bodies: Vec<(Vect, f64)> = universe.particles().map(|p| (p.pos, p.radius)).collect();
        let t1 = Instant::now();
        let mut overlaps = 0usize;
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let radii = bodies[i].1 + bodies[j].1;
                if distance_squared(&bodies[i].0, &bodies[j].0) <= radii * radii {
                    overlaps += 1;
                }
            }
        }
        let dt_brute = t1.elapsed().as_secs_f64();

        println!(
            "N = {n:5}, grid = {dt_grid:8.6} s ({candidates} candidates), brute = {dt_brute:8.6} s ({overlaps} overlaps)"
        );
    }
}

/// Time whole frames across system sizes
pub fn bench_update() {
    let ns = [200, 400, 800, 1600, 3200];
    let steps = 10;

    for n in ns {
        let mut universe = bench_universe(n);

        // Warm up
        universe.update(1.0);

        let t0 = Instant::now();
        for _ in 0..steps {
            universe.update(1.0);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!(
            "N = {n:5}, update = {per_step:8.6} s/frame, {} alive",
            universe.len()
        );
    }
}
