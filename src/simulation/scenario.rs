//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - numerical parameters (`Parameters`)
//! - the body's initial state (`Body`)
//! - animation sampling constants (`AnimationParams`)
//!
//! Building validates every config constraint up front, so a constructed
//! `Scenario` always describes a runnable simulation. The scenario is
//! inserted into Bevy as a `Resource` and consumed by the viewer systems.

use bevy::prelude::Resource;

use crate::animation::sampler::AnimationParams;
use crate::configuration::config::{ConfigError, ScenarioConfig};
use crate::simulation::dynamics::CentralGravity;
use crate::simulation::grid::TimeGrid;
use crate::simulation::integrator::{integrate, IntegrationError};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, Trajectory};

/// Fully-initialized, immutable simulation scenario.
///
/// This is the main runtime bundle constructed from a [`ScenarioConfig`]:
/// integration and animation both read from it, nothing writes to it after
/// construction. All constants travel together in one structure, so there
/// are no load-order dependencies between them.
#[derive(Resource)]
pub struct Scenario {
    pub parameters: Parameters,
    pub body: Body,
    pub animation: AnimationParams,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let p = &cfg.parameters;
        if p.samples < 2 {
            return Err(ConfigError::TooFewSamples(p.samples));
        }
        if !(p.max_t > 0.0) {
            return Err(ConfigError::NonPositiveHorizon(p.max_t));
        }
        if !(p.h0 > 0.0) {
            return Err(ConfigError::NonPositiveStep(p.h0));
        }
        if !(p.atol > 0.0) || !(p.rtol > 0.0) {
            return Err(ConfigError::NonPositiveTolerance);
        }
        if cfg.body.x.len() != 2 || cfg.body.v.len() != 2 {
            return Err(ConfigError::BodyDimension);
        }
        if cfg.animation.trail == 0 {
            return Err(ConfigError::ZeroTrail);
        }
        if cfg.animation.speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }

        // Body: map the config vectors onto nalgebra vectors
        let body = Body {
            x: NVec2::new(cfg.body.x[0], cfg.body.x[1]),
            v: NVec2::new(cfg.body.v[0], cfg.body.v[1]),
        };

        let parameters = Parameters {
            G: p.G,
            max_t: p.max_t,
            samples: p.samples,
            h0: p.h0,
            atol: p.atol,
            rtol: p.rtol,
        };

        let animation = AnimationParams {
            trail: cfg.animation.trail,
            speed: cfg.animation.speed,
        };

        Ok(Self {
            parameters,
            body,
            animation,
        })
    }

    /// Output grid implied by the scenario's horizon and resolution.
    pub fn time_grid(&self) -> TimeGrid {
        TimeGrid::new(self.parameters.max_t, self.parameters.samples)
    }

    /// The scenario's force law.
    pub fn model(&self) -> CentralGravity {
        CentralGravity {
            G: self.parameters.G,
        }
    }

    /// Run the full batch integration for this scenario.
    pub fn integrate(&self) -> Result<Trajectory, IntegrationError> {
        integrate(
            &self.model(),
            self.body.state(),
            &self.time_grid(),
            &self.parameters,
        )
    }
}
