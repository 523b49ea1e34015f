//! Frame sampling for trajectory animation
//!
//! Maps integer frame indices onto trailing sub-windows of the trajectory:
//! frame `i` shows the samples in `[(i - trail) * speed, i * speed)`,
//! clipped to the trajectory bounds. `speed` sets how many trajectory
//! samples playback advances per frame, `trail` how many frames' worth of
//! history stay visible behind the body.
//!
//! Frames are pure derivations over the immutable trajectory: no copies,
//! no hidden state, no timing. The render driver decides the wall-clock
//! pace and may probe past the final frame; indices are clamped, never an
//! error.

use crate::simulation::states::{NVec4, Trajectory};

/// Animation sampling constants, validated at scenario build.
#[derive(Debug, Clone)]
pub struct AnimationParams {
    pub trail: usize, // trailing window length, in frames (>= 1)
    pub speed: usize, // trajectory samples advanced per frame (>= 1)
}

/// One displayed frame: a borrowed window of trajectory states plus its
/// display label.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub index: usize,        // clamped frame index
    pub time: f64,           // sample time at the window end [yr]
    pub states: &'a [NVec4], // trailing window, oldest first
    pub label: String,
}

impl Frame<'_> {
    /// Most recent state in the window, if the window is non-empty.
    pub fn newest(&self) -> Option<&NVec4> {
        self.states.last()
    }
}

/// Lazy index-to-window mapping over a finished trajectory.
///
/// Assumes `trail >= 1` and `speed >= 1`, which scenario building enforces.
pub struct FrameSampler<'a> {
    trajectory: &'a Trajectory,
    trail: usize,
    speed: usize,
}

impl<'a> FrameSampler<'a> {
    pub fn new(trajectory: &'a Trajectory, animation: &AnimationParams) -> Self {
        Self {
            trajectory,
            trail: animation.trail,
            speed: animation.speed,
        }
    }

    /// Index of the final frame. Frame indices run `0..=last_frame()`.
    pub fn last_frame(&self) -> usize {
        self.trajectory.len() / self.speed
    }

    pub fn frame_count(&self) -> usize {
        self.last_frame() + 1
    }

    /// Extract frame `index`, clamping past-the-end indices to the final
    /// frame so playback drivers can probe freely.
    ///
    /// The window only reaches data at or before sample `index * speed`;
    /// frames never look ahead of their own playback position. Early
    /// frames (`index < trail`) get a shorter, growing trail.
    pub fn frame(&self, index: usize) -> Frame<'a> {
        let i = index.min(self.last_frame());

        let end = (i * self.speed).min(self.trajectory.len());
        let start = i.saturating_sub(self.trail) * self.speed;

        // Label time comes from the sample the window ends on
        let time = self.trajectory.times[end.min(self.trajectory.len() - 1)];

        Frame {
            index: i,
            time,
            states: &self.trajectory.states[start..end],
            label: format!(
                "Earth's orbit | Time: {:.2} yr | Speed: {}",
                time, self.speed
            ),
        }
    }

    /// The full finite frame sequence. Restartable: every call yields a
    /// fresh iterator over identical frames.
    pub fn frames(&self) -> impl Iterator<Item = Frame<'a>> + '_ {
        (0..self.frame_count()).map(|i| self.frame(i))
    }
}
