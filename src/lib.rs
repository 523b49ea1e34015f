pub mod simulation;
pub mod configuration;
pub mod animation;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, NVec2, NVec4, Trajectory};
pub use simulation::params::Parameters;
pub use simulation::grid::TimeGrid;
pub use simulation::dynamics::{CentralGravity, Dynamics};
pub use simulation::integrator::{integrate, IntegrationError};
pub use simulation::scenario::Scenario;

pub use configuration::config::{
    AnimationConfig, BodyConfig, ConfigError, ParametersConfig, ScenarioConfig,
};

pub use animation::sampler::{AnimationParams, Frame, FrameSampler};

pub use visualization::essim_vis2d::run_2d;

pub use benchmark::benchmark::bench_integrate;
