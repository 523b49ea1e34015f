//! Numerical and physical parameters for a simulation run
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `G` in AU^3/yr^2 (solar mass absorbed),
//! - simulation horizon and output-grid resolution,
//! - initial step size and error tolerances for the adaptive solver
//!
//! Built once from the scenario configuration and immutable afterward.

#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct Parameters {
    pub G: f64,         // gravitational constant [AU^3/yr^2]
    pub max_t: f64,     // simulation horizon [yr]
    pub samples: usize, // number of output-grid points over [0, max_t]
    pub h0: f64,        // initial step size [yr]
    pub atol: f64,      // absolute error tolerance
    pub rtol: f64,      // relative error tolerance
}
