pub mod states;
pub mod params;
pub mod grid;
pub mod dynamics;
pub mod integrator;
pub mod scenario;
