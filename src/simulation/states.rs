//! Core state types for the orbit simulation.
//!
//! The orbiting body's instantaneous condition is a 4-component state
//! vector `(x, y, vx, vy)` in astronomical units and AU/yr, held as a
//! nalgebra `Vector4`. A full integration run produces a [`Trajectory`],
//! one state per time-grid sample.

use nalgebra::{Vector2, Vector4};
pub type NVec2 = Vector2<f64>;
pub type NVec4 = Vector4<f64>;

/// Initial condition of the orbiting body.
#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position [AU]
    pub v: NVec2, // velocity [AU/yr]
}

impl Body {
    /// Pack position and velocity into the integrator's state layout
    /// `(x, y, vx, vy)`.
    pub fn state(&self) -> NVec4 {
        NVec4::new(self.x.x, self.x.y, self.v.x, self.v.y)
    }
}

/// Complete time-ordered state history of one integration run.
///
/// Written once by the integrator and read-only afterward; the animation
/// sampler only ever takes sub-slices of `states`.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub times: Vec<f64>,    // sample times [yr], same length as `states`
    pub states: Vec<NVec4>, // one state vector per sample
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Position components of sample `i`.
    pub fn position(&self, i: usize) -> NVec2 {
        let s = &self.states[i];
        NVec2::new(s[0], s[1])
    }

    /// Distance of sample `i` from the central mass at the origin.
    pub fn radius(&self, i: usize) -> f64 {
        self.position(i).norm()
    }
}
