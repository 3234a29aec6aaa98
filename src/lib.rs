pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::vec2::Vect;
pub use simulation::particle::{Particle, ParticleId, Rgb};
pub use simulation::manifold::Manifold;
pub use simulation::grid::SpatialHashGrid;
pub use simulation::params::Parameters;
pub use simulation::universe::Universe;
pub use simulation::scenario::Scenario;

pub use configuration::config::{GridConfig, ParametersConfig, ScenarioConfig, SpawnConfig};

pub use visualization::vis2d::run_2d;

pub use benchmark::benchmark::{bench_broadphase, bench_update};
