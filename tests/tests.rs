use essim::animation::sampler::{AnimationParams, FrameSampler};
use essim::configuration::config::{
    AnimationConfig, BodyConfig, ConfigError, ParametersConfig, ScenarioConfig,
};
use essim::simulation::dynamics::{CentralGravity, Dynamics};
use essim::simulation::grid::TimeGrid;
use essim::simulation::integrator::integrate;
use essim::simulation::params::Parameters;
use essim::simulation::scenario::Scenario;
use essim::simulation::states::{Body, NVec2, NVec4, Trajectory};

use approx::assert_relative_eq;

/// Gravitational constant of the canonical Earth-Sun scenario [AU^3/yr^2]
const G_SUN: f64 = 58.9639;

/// Canonical Earth initial condition: aphelion on the x-axis
pub fn earth_body() -> Body {
    Body {
        x: NVec2::new(1.01671123, 0.0),
        v: NVec2::new(0.0, 7.5545175),
    }
}

/// Default solver parameters over a configurable horizon/resolution
pub fn earth_params(max_t: f64, samples: usize) -> Parameters {
    Parameters {
        G: G_SUN,
        max_t,
        samples,
        h0: 0.001,
        atol: 1e-9,
        rtol: 1e-9,
    }
}

/// Integrate the canonical scenario over the given grid
pub fn earth_trajectory(max_t: f64, samples: usize) -> Trajectory {
    let p = earth_params(max_t, samples);
    let model = CentralGravity { G: p.G };
    let grid = TimeGrid::new(max_t, samples);
    integrate(&model, earth_body().state(), &grid, &p).expect("integration failed")
}

/// Synthetic trajectory for sampler tests: states[i] = (i, 0, 0, 0),
/// times[i] = i / 10
fn linear_trajectory(n: usize) -> Trajectory {
    Trajectory {
        times: (0..n).map(|i| i as f64 * 0.1).collect(),
        states: (0..n).map(|i| NVec4::new(i as f64, 0.0, 0.0, 0.0)).collect(),
    }
}

/// A scenario config that passes validation
fn base_config() -> ScenarioConfig {
    ScenarioConfig {
        parameters: ParametersConfig {
            G: G_SUN,
            max_t: 10.0,
            samples: 1000,
            h0: 0.001,
            atol: 1e-9,
            rtol: 1e-9,
        },
        body: BodyConfig {
            x: vec![1.01671123, 0.0],
            v: vec![0.0, 7.5545175],
        },
        animation: AnimationConfig { trail: 10, speed: 81 },
    }
}

// ==================================================================================
// Dynamics tests
// ==================================================================================

#[test]
fn gravity_antiparallel_to_position() {
    let model = CentralGravity { G: G_SUN };
    // |r| = 1 for this state
    let y = NVec4::new(0.8, -0.6, 1.0, 2.0);
    let d = model.derivative(0.0, &y);

    let r = NVec2::new(y[0], y[1]);
    let a = NVec2::new(d[2], d[3]);

    // Antiparallel: zero cross product, negative dot product
    let cross = a.x * r.y - a.y * r.x;
    assert_relative_eq!(cross, 0.0, epsilon = 1e-12);
    assert!(a.dot(&r) < 0.0, "Acceleration is not toward the origin");

    // Magnitude G / r^2
    assert_relative_eq!(a.norm(), G_SUN / r.norm_squared(), max_relative = 1e-12);
}

#[test]
fn gravity_passes_velocity_through() {
    let model = CentralGravity { G: G_SUN };
    let d = model.derivative(0.0, &NVec4::new(1.0, 2.0, -3.0, 4.5));

    assert_eq!(d[0], -3.0);
    assert_eq!(d[1], 4.5);
}

#[test]
fn gravity_formulation_identical_on_both_axes() {
    let model = CentralGravity { G: G_SUN };
    // Symmetric position must give bit-identical acceleration components
    let d = model.derivative(0.0, &NVec4::new(0.7, 0.7, 0.0, 0.0));

    assert_eq!(d[2], d[3]);
}

#[test]
fn gravity_inverse_square_law() {
    let model = CentralGravity { G: G_SUN };
    let a_r = model.derivative(0.0, &NVec4::new(1.0, 0.0, 0.0, 0.0));
    let a_2r = model.derivative(0.0, &NVec4::new(2.0, 0.0, 0.0, 0.0));

    let ratio = a_r[2] / a_2r[2];
    assert_relative_eq!(ratio, 4.0, max_relative = 1e-12);
}

// ==================================================================================
// Time grid tests
// ==================================================================================

#[test]
fn grid_is_uniform_and_spans_horizon() {
    let grid = TimeGrid::new(10.0, 101);

    assert_eq!(grid.len(), 101);
    assert_eq!(grid.t(0), 0.0);
    assert_eq!(grid.t(100), 10.0);

    let spacing = grid.spacing();
    for i in 1..grid.len() {
        assert!(grid.t(i) > grid.t(i - 1), "grid not strictly increasing");
        assert_relative_eq!(grid.t(i) - grid.t(i - 1), spacing, max_relative = 1e-9);
    }
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn trajectory_matches_grid_and_initial_condition() {
    let traj = earth_trajectory(1.0, 101);

    assert_eq!(traj.len(), 101);
    // First row is the initial condition, bit for bit
    assert_eq!(traj.states[0], earth_body().state());
    assert_eq!(traj.times[0], 0.0);
    assert_relative_eq!(traj.times[100], 1.0);
}

#[test]
fn integration_is_deterministic() {
    let a = earth_trajectory(1.0, 201);
    let b = earth_trajectory(1.0, 201);

    assert_eq!(a.states, b.states);
    assert_eq!(a.times, b.times);
}

#[test]
fn energy_conserved_over_long_horizon() {
    let p = Parameters {
        G: G_SUN,
        max_t: 100.0,
        samples: 10_001,
        h0: 0.001,
        atol: 1e-10,
        rtol: 1e-10,
    };
    let model = CentralGravity { G: p.G };
    let grid = TimeGrid::new(p.max_t, p.samples);
    let traj = integrate(&model, earth_body().state(), &grid, &p).expect("integration failed");

    let e0 = model.specific_energy(&traj.states[0]);
    let e1 = model.specific_energy(&traj.states[traj.len() - 1]);

    assert!(
        (e1 - e0).abs() < 1e-4,
        "energy drift too large: {:e}",
        (e1 - e0).abs()
    );
}

#[test]
fn orbit_radius_spans_perihelion_to_aphelion() {
    // Two years cover at least two full orbits in these units
    let traj = earth_trajectory(2.0, 4001);

    let mut r_min = f64::INFINITY;
    let mut r_max: f64 = 0.0;
    for i in 0..traj.len() {
        let r = traj.radius(i);
        r_min = r_min.min(r);
        r_max = r_max.max(r);
    }

    // Aphelion is the initial radius; perihelion follows from the initial
    // speed via vis-viva. Both match Earth's real orbit to a few percent.
    assert_relative_eq!(r_max, 1.0167, max_relative = 0.03);
    assert_relative_eq!(r_min, 0.983, max_relative = 0.03);
}

#[test]
fn near_singular_orbit_reports_integration_failure() {
    // Radial free fall into the origin from 1e-8 AU; the force law blows up
    // and the step controller must give up rather than emit garbage
    let p = earth_params(1.0, 11);
    let model = CentralGravity { G: p.G };
    let grid = TimeGrid::new(p.max_t, p.samples);
    let y0 = NVec4::new(1e-8, 0.0, 0.0, 0.0);

    let result = integrate(&model, y0, &grid, &p);
    assert!(result.is_err(), "singular trajectory integrated without error");
}

// ==================================================================================
// Animation sampler tests
// ==================================================================================

#[test]
fn trail_window_grows_then_saturates() {
    let traj = linear_trajectory(100);
    let sampler = FrameSampler::new(&traj, &AnimationParams { trail: 3, speed: 10 });

    // Growing phase: frame i < trail has exactly i * speed samples
    assert_eq!(sampler.frame(0).states.len(), 0);
    assert_eq!(sampler.frame(1).states.len(), 10);
    assert_eq!(sampler.frame(2).states.len(), 20);

    // Saturated: exactly trail * speed samples
    assert_eq!(sampler.frame(3).states.len(), 30);
    assert_eq!(sampler.frame(7).states.len(), 30);

    // Frame 7 window is [40, 70): oldest sample first
    let frame = sampler.frame(7);
    assert_eq!(frame.states[0][0], 40.0);
    assert_eq!(frame.states[29][0], 69.0);
}

#[test]
fn frame_never_looks_ahead() {
    let traj = linear_trajectory(100);
    let sampler = FrameSampler::new(&traj, &AnimationParams { trail: 3, speed: 10 });

    for i in 0..sampler.frame_count() {
        let frame = sampler.frame(i);
        if let Some(newest) = frame.newest() {
            assert!(newest[0] < (i * 10) as f64 + 1.0);
        }
    }
}

#[test]
fn frame_extraction_is_idempotent() {
    let traj = linear_trajectory(100);
    let sampler = FrameSampler::new(&traj, &AnimationParams { trail: 3, speed: 10 });

    let a = sampler.frame(5);
    let b = sampler.frame(5);

    assert_eq!(a.states, b.states);
    assert_eq!(a.label, b.label);
    assert_eq!(a.time, b.time);
}

#[test]
fn frame_index_clamps_beyond_grid() {
    let traj = linear_trajectory(100);
    let sampler = FrameSampler::new(&traj, &AnimationParams { trail: 3, speed: 10 });

    assert_eq!(sampler.last_frame(), 10);

    // Probing far past the end returns the final frame, non-empty
    let last = sampler.frame(10);
    let probed = sampler.frame(1000);

    assert!(!probed.states.is_empty());
    assert_eq!(probed.states, last.states);
    assert_eq!(probed.index, 10);
    assert_eq!(probed.states[0][0], 70.0);
    assert_eq!(probed.states.len(), 30);
}

#[test]
fn frame_label_reports_time_and_speed() {
    let traj = linear_trajectory(100);
    let sampler = FrameSampler::new(&traj, &AnimationParams { trail: 3, speed: 10 });

    // Frame 5 ends at sample 50, whose time is 5.0
    let frame = sampler.frame(5);
    assert_eq!(frame.time, 5.0);
    assert_eq!(frame.label, "Earth's orbit | Time: 5.00 yr | Speed: 10");
}

#[test]
fn frame_sequence_is_finite_and_restartable() {
    let traj = linear_trajectory(100);
    let sampler = FrameSampler::new(&traj, &AnimationParams { trail: 3, speed: 10 });

    let first: Vec<usize> = sampler.frames().map(|f| f.states.len()).collect();
    let second: Vec<usize> = sampler.frames().map(|f| f.states.len()).collect();

    assert_eq!(first.len(), sampler.frame_count());
    assert_eq!(first, second);
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn valid_config_builds() {
    let scenario = Scenario::build_scenario(base_config()).expect("valid config rejected");

    assert_eq!(scenario.parameters.G, G_SUN);
    assert_eq!(scenario.parameters.samples, 1000);
    assert_eq!(scenario.animation.trail, 10);
    assert_eq!(scenario.animation.speed, 81);
    assert_eq!(scenario.body.x, NVec2::new(1.01671123, 0.0));
}

#[test]
fn zero_trail_is_rejected() {
    let mut cfg = base_config();
    cfg.animation.trail = 0;

    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ConfigError::ZeroTrail)
    ));
}

#[test]
fn zero_speed_is_rejected() {
    let mut cfg = base_config();
    cfg.animation.speed = 0;

    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ConfigError::ZeroSpeed)
    ));
}

#[test]
fn single_sample_grid_is_rejected() {
    let mut cfg = base_config();
    cfg.parameters.samples = 1;

    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ConfigError::TooFewSamples(1))
    ));
}

#[test]
fn non_positive_horizon_is_rejected() {
    let mut cfg = base_config();
    cfg.parameters.max_t = 0.0;

    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ConfigError::NonPositiveHorizon(_))
    ));
}

#[test]
fn mis_sized_body_vectors_are_rejected() {
    let mut cfg = base_config();
    cfg.body.x = vec![1.0, 0.0, 0.0];

    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(ConfigError::BodyDimension)
    ));
}
