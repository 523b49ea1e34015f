//! Adaptive trajectory integration over a fixed output grid
//!
//! Drives an embedded Dormand-Prince 5(4) solver across the requested
//! [`TimeGrid`], producing exactly one state per grid point with the first
//! entry equal to the initial condition. Step size is controlled by the
//! `atol`/`rtol` tolerances in [`Parameters`]; internal steps are clamped so
//! every grid time is hit exactly, while the controller's step proposal is
//! kept across grid boundaries.

use super::dynamics::Dynamics;
use super::grid::TimeGrid;
use super::params::Parameters;
use super::states::{NVec4, Trajectory};

use thiserror::Error;

/// Integration failure, reported with the time at which stepping broke down
/// and the last state that was still accepted. No partial trajectory is
/// returned: later frames would silently reference invalid data.
#[derive(Debug, Clone, Error)]
pub enum IntegrationError {
    #[error("step size underflow at t = {t} yr (last valid state: {state:?})")]
    StepUnderflow { t: f64, state: NVec4 },

    #[error("non-finite state at t = {t} yr (last valid state: {state:?})")]
    NonFinite { t: f64, state: NVec4 },
}

// Dormand-Prince 5(4) Butcher tableau. The first row of weights advances
// the solution at 5th order; the D-row is the difference between the 5th-
// and embedded 4th-order weights and yields the local error estimate.
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

const D1: f64 = 71.0 / 57600.0;
const D3: f64 = -71.0 / 16695.0;
const D4: f64 = 71.0 / 1920.0;
const D5: f64 = -17253.0 / 339200.0;
const D6: f64 = 22.0 / 525.0;
const D7: f64 = -1.0 / 40.0;

// Step controller settings (order 5 => exponent 1/5)
const SAFETY: f64 = 0.9;
const SHRINK_FLOOR: f64 = 0.1; // max shrink per rejected step
const GROW_CEIL: f64 = 5.0; // max growth per accepted step
const MIN_STEP_REL: f64 = 1e-14; // step underflow floor, relative to |t|

/// One embedded trial step from `(t, y)` with step `h`.
/// Returns the 5th-order solution and the scaled error norm; the step is
/// acceptable when the norm is <= 1.
fn dopri5_step<D: Dynamics>(
    model: &D,
    t: f64,
    y: NVec4,
    h: f64,
    params: &Parameters,
) -> (NVec4, f64) {
    let k1 = model.derivative(t, &y);
    let k2 = model.derivative(t + C2 * h, &(y + k1 * (A21 * h)));
    let k3 = model.derivative(t + C3 * h, &(y + (k1 * A31 + k2 * A32) * h));
    let k4 = model.derivative(t + C4 * h, &(y + (k1 * A41 + k2 * A42 + k3 * A43) * h));
    let k5 = model.derivative(
        t + C5 * h,
        &(y + (k1 * A51 + k2 * A52 + k3 * A53 + k4 * A54) * h),
    );
    let k6 = model.derivative(
        t + h,
        &(y + (k1 * A61 + k2 * A62 + k3 * A63 + k4 * A64 + k5 * A65) * h),
    );

    let y_new = y + (k1 * B1 + k3 * B3 + k4 * B4 + k5 * B5 + k6 * B6) * h;

    // Seventh stage at the step end, used only for the error estimate
    let k7 = model.derivative(t + h, &y_new);

    let err_vec = (k1 * D1 + k3 * D3 + k4 * D4 + k5 * D5 + k6 * D6 + k7 * D7) * h;

    // Scaled RMS norm: each component measured against atol + rtol * |y|
    let mut sum = 0.0;
    for i in 0..4 {
        let scale = params.atol + params.rtol * y[i].abs().max(y_new[i].abs());
        let e = err_vec[i] / scale;
        sum += e * e;
    }
    let err = (sum / 4.0).sqrt();

    (y_new, err)
}

/// Solve the initial-value problem `d(state)/dt = model(t, state)` from
/// `y0`, reporting the state at every grid point in order.
///
/// Guarantees: output length equals grid length, the first entry is `y0`
/// unchanged, and neither the grid nor the initial condition is mutated.
/// Deterministic for identical inputs and tolerances.
pub fn integrate<D: Dynamics>(
    model: &D,
    y0: NVec4,
    grid: &TimeGrid,
    params: &Parameters,
) -> Result<Trajectory, IntegrationError> {
    let n = grid.len();
    let mut states = Vec::with_capacity(n);
    states.push(y0);

    let mut t = grid.t(0);
    let mut y = y0;
    // Controller step proposal; never start beyond one grid interval
    let mut h = params.h0.min(grid.spacing());

    for idx in 1..n {
        let target = grid.t(idx);

        while t < target {
            // Clamp the trial step so the grid point is hit exactly, but
            // remember whether the controller wanted a longer step
            let clamped = h >= target - t;
            let trial = if clamped { target - t } else { h };

            let (y_new, err) = dopri5_step(model, t, y, trial, params);

            // NaN error fails this comparison and lands in the reject arm
            if err <= 1.0 {
                t = if clamped { target } else { t + trial };

                if !y_new.iter().all(|c| c.is_finite()) {
                    return Err(IntegrationError::NonFinite { t, state: y });
                }
                y = y_new;

                if !clamped {
                    let factor = if err == 0.0 {
                        GROW_CEIL
                    } else {
                        (SAFETY * err.powf(-0.2)).clamp(SHRINK_FLOOR, GROW_CEIL)
                    };
                    h = trial * factor;
                }
                // A clamped step says nothing new about the error scale, so
                // the controller proposal is left untouched
            } else {
                // f64::max ignores a NaN factor and falls back to the floor
                let factor = (SAFETY * err.powf(-0.2)).max(SHRINK_FLOOR).min(SAFETY);
                h = trial * factor;

                if h < MIN_STEP_REL * t.abs().max(1.0) {
                    return Err(IntegrationError::StepUnderflow { t, state: y });
                }
            }
        }

        states.push(y);
    }

    Ok(Trajectory {
        times: grid.times.clone(),
        states,
    })
}
