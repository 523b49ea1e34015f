//! Gravitational dynamics of the orbiting body
//!
//! Defines the [`Dynamics`] trait mapping a state vector (and time) to its
//! derivative, plus the inverse-square central-force implementation used by
//! every scenario.

use crate::simulation::states::NVec4;

/// Right-hand side of the ODE `d(state)/dt = f(t, state)`.
///
/// Implementations must be pure: no side effects, deterministic, and
/// independent of call order, since the adaptive solver evaluates them at
/// trial points that may be discarded.
pub trait Dynamics {
    fn derivative(&self, t: f64, y: &NVec4) -> NVec4;
}

/// Inverse-square attraction toward a fixed mass at the origin.
///
/// `G` carries the central mass (AU^3/yr^2 with solar mass absorbed), so a
/// single constant parameterizes the whole force law. Undefined at
/// `(x, y) = (0, 0)`; valid orbital initial conditions keep the trajectory
/// away from the origin and no guard is applied here.
#[allow(non_snake_case)]
pub struct CentralGravity {
    pub G: f64, // gravitational constant [AU^3/yr^2]
}

impl CentralGravity {
    /// Specific orbital energy `0.5 |v|^2 - G/r` of a state.
    /// Conserved along the exact trajectory, so its drift measures
    /// integration error.
    pub fn specific_energy(&self, y: &NVec4) -> f64 {
        let r = (y[0] * y[0] + y[1] * y[1]).sqrt();
        let v2 = y[2] * y[2] + y[3] * y[3];
        0.5 * v2 - self.G / r
    }
}

impl Dynamics for CentralGravity {
    fn derivative(&self, _t: f64, y: &NVec4) -> NVec4 {
        let (x, yy) = (y[0], y[1]);
        let (vx, vy) = (y[2], y[3]);

        // Squared distance to the central mass
        let r2 = x * x + yy * yy;

        // 1 / |r|
        let inv_r = r2.sqrt().recip();

        // 1 / |r|^3, the factor in the Newtonian acceleration
        //   a = -G r / |r|^3
        // Built from |r|^2 once and applied identically to both axes so the
        // two components stay numerically consistent
        let inv_r3 = inv_r * inv_r * inv_r;

        let coef = -self.G * inv_r3;

        // Derivative layout matches the state layout: positions advance by
        // the velocities, velocities by the acceleration
        NVec4::new(vx, vy, coef * x, coef * yy)
    }
}
