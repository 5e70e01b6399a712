//! Frame time model.
//!
//! # Design
//!
//! A frame is one pass of the scheduler over every phase.  The external
//! driver picks the delta for each frame; `FrameClock` counts frames and
//! accumulates simulated seconds so observers can timestamp what they see.
//!
//! Elapsed time is accumulated in `f64` even though per-frame deltas are
//! `f32`: a long run of 16 ms frames would otherwise lose sub-frame
//! precision within a few hours.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Frame ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);
}

impl std::ops::Add<u64> for Frame {
    type Output = Frame;
    #[inline]
    fn add(self, rhs: u64) -> Frame {
        Frame(self.0 + rhs)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Counts frames and simulated seconds.
///
/// `FrameClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// The frame about to run (or running).
    pub current_frame: Frame,
    /// Simulated seconds accumulated by all completed frames.
    pub elapsed_secs: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current frame, which lasted `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.current_frame = self.current_frame + 1;
        self.elapsed_secs += f64::from(dt);
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3}s)", self.current_frame, self.elapsed_secs)
    }
}

// ── FrameConfig ───────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically built by the application (or deserialized with the `serde`
/// feature) and handed to the world builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameConfig {
    /// Seconds per frame used by fixed-step runs.  Must be finite and > 0.
    pub fixed_dt: f32,

    /// Frames to run in a fixed-step `run`.  `0` runs nothing.
    pub total_frames: u64,

    /// Hand observers a capability snapshot every N frames.  `0` disables
    /// snapshots; `1` snapshots every frame.
    pub snapshot_interval_frames: u64,

    /// Seed for whatever randomness the application's capabilities use.
    /// The framework itself is deterministic and never reads it.
    pub seed: u64,
}

impl FrameConfig {
    /// The frame at which a fixed-step run ends (exclusive upper bound).
    #[inline]
    pub fn end_frame(&self) -> Frame {
        Frame(self.total_frames)
    }

    /// Reject deltas the activation counters cannot meaningfully accumulate.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.fixed_dt.is_finite() || self.fixed_dt <= 0.0 {
            return Err(CoreError::Config(format!(
                "fixed_dt must be finite and positive, got {}",
                self.fixed_dt
            )));
        }
        Ok(())
    }
}

impl Default for FrameConfig {
    /// 60 frames per second, ten seconds, snapshot every frame.
    fn default() -> Self {
        Self {
            fixed_dt:                 1.0 / 60.0,
            total_frames:             600,
            snapshot_interval_frames: 1,
            seed:                     0,
        }
    }
}
