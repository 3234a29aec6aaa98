//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of
//! a scenario. A scenario consists of:
//!
//! - [`GridConfig`]       – broad-phase grid geometry
//! - [`ParametersConfig`] – physical constants and thresholds
//! - [`SpawnConfig`]      – initial particle distributions
//! - [`ScenarioConfig`]   – top-level wrapper used to load from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! grid:
//!   origin: [0.0, 0.0]        # world-space min corner
//!   extents: [1200.0, 680.0]  # world-space max corner
//!   rows: 25                  # cell divisions along y
//!   cols: 15                  # cell divisions along x
//!
//! parameters:
//!   g: 1.0e-6                 # gravitational constant
//!   restitution: 0.5          # rebound elasticity
//!   mass_coalesce_ratio: 1000.0
//!   coalesce_tolerance: 1.0e-7
//!   epsilon_accuracy: 1.0e-7
//!   correction_slop: 1.0001
//!
//! dt: 100.0                   # per-frame time delta
//! seed: 42                    # spawn RNG seed, reproducible runs
//!
//! spawns:
//!   - kind: disk              # or: orbits, random, body
//!     center: [600.0, 340.0]
//!     max_radius: 250.0
//!     count: 2000
//! ```

use serde::Deserialize;

/// Broad-phase grid geometry
#[derive(Deserialize, Debug, Clone)]
pub struct GridConfig {
    pub origin: [f64; 2],  // min corner of the declared extent
    pub extents: [f64; 2], // max corner of the declared extent
    pub rows: i32,         // cell divisions along y
    pub cols: i32,         // cell divisions along x
}

/// Physical constants and classification thresholds
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub g: f64,                   // gravitational constant
    pub restitution: f64,         // rebound elasticity
    pub mass_coalesce_ratio: f64, // dominant-mass absorb threshold
    pub coalesce_tolerance: f64,  // near-equal-velocity merge threshold
    pub epsilon_accuracy: f64,    // squared-distance singularity guard
    pub correction_slop: f64,     // fractional penetration relief
}

/// One initial particle distribution
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind")]
pub enum SpawnConfig {
    /// Central mass with a ring of particles on circular orbits
    #[serde(rename = "orbits")]
    Orbits {
        center: [f64; 2],
        center_mass: f64,
        center_radius: f64,
        max_radius: f64,
        count: u32,
    },

    /// Disk of particles with orbital velocity around the center
    #[serde(rename = "disk")]
    Disk {
        center: [f64; 2],
        max_radius: f64,
        count: u32,
    },

    /// Uniformly random stationary dispersion
    #[serde(rename = "random")]
    Random {
        width: f64,
        height: f64,
        count: u32,
        mass: f64,
    },

    /// One explicit particle
    #[serde(rename = "body")]
    Body {
        pos: [f64; 2],
        vel: [f64; 2],
        mass: f64,
        radius: f64,
    },
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub grid: GridConfig,             // broad-phase geometry
    pub parameters: ParametersConfig, // physical constants
    pub dt: f64,                      // per-frame time delta
    pub seed: u64,                    // spawn RNG seed
    pub spawns: Vec<SpawnConfig>,     // initial distributions
}
