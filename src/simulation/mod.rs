pub mod vec2;
pub mod particle;
pub mod manifold;
pub mod grid;
pub mod params;
pub mod universe;
pub mod scenario;
