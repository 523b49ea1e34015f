//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of an
//! orbit scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constant, horizon, grid resolution,
//!   and solver tolerances
//! - [`BodyConfig`]       – initial state of the orbiting body
//! - [`AnimationConfig`]  – trail length and playback speed
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! parameters:
//!   G: 58.9639            # AU^3/yr^2, solar mass absorbed
//!   max_t: 10000.0        # simulation horizon [yr]
//!   samples: 1000000      # output-grid points over [0, max_t]
//!   h0: 0.001             # initial step size [yr]
//!   atol: 1.0e-9          # absolute error tolerance
//!   rtol: 1.0e-9          # relative error tolerance
//!
//! body:
//!   x: [ 1.01671123, 0.0 ]   # aphelion [AU]
//!   v: [ 0.0, 7.5545175 ]    # [AU/yr]
//!
//! animation:
//!   trail: 10             # trajectory samples shown behind the body, in frames
//!   speed: 81             # trajectory samples advanced per frame
//! ```
//!
//! The engine maps this configuration into its internal runtime scenario
//! representation; violations of the value constraints are reported as
//! [`ConfigError`]s when the scenario is built, before any integration runs.

use serde::Deserialize;
use thiserror::Error;

/// Fatal configuration error, reported at scenario-build time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("animation trail must be at least 1")]
    ZeroTrail,

    #[error("animation speed must be at least 1")]
    ZeroSpeed,

    #[error("time grid needs at least 2 samples, got {0}")]
    TooFewSamples(usize),

    #[error("simulation horizon max_t must be positive, got {0}")]
    NonPositiveHorizon(f64),

    #[error("initial step size h0 must be positive, got {0}")]
    NonPositiveStep(f64),

    #[error("solver tolerances atol and rtol must be positive")]
    NonPositiveTolerance,

    #[error("body position and velocity must each have exactly 2 components")]
    BodyDimension,
}

/// Physical constant and numerical parameters for a scenario.
#[derive(Deserialize, Debug, Clone)]
#[allow(non_snake_case)]
pub struct ParametersConfig {
    pub G: f64,         // gravitational constant [AU^3/yr^2]
    pub max_t: f64,     // simulation horizon [yr]
    pub samples: usize, // output-grid resolution
    pub h0: f64,        // initial step size [yr]
    pub atol: f64,      // absolute error tolerance
    pub rtol: f64,      // relative error tolerance
}

/// Initial state of the orbiting body.
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position [AU]
    pub v: Vec<f64>, // initial velocity [AU/yr]
}

/// Animation sampling constants, fixed at simulation setup.
#[derive(Deserialize, Debug, Clone)]
pub struct AnimationConfig {
    pub trail: usize, // trailing window length, in frames
    pub speed: usize, // trajectory samples advanced per frame
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // constants, horizon, solver settings
    pub body: BodyConfig,             // initial state of the orbiting body
    pub animation: AnimationConfig,   // trail and playback speed
}
