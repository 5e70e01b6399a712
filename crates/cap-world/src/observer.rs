//! World observer trait for progress reporting and monitoring.

use cap_core::Frame;
use cap_entity::EntityStore;
use cap_schedule::{CapabilityView, FrameStats};

/// Callbacks invoked by [`World::run`][crate::World::run] at key points in
/// the frame loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — transition counter
///
/// ```rust,ignore
/// struct Transitions(usize);
///
/// impl WorldObserver for Transitions {
///     fn on_frame_end(&mut self, _frame: Frame, stats: &FrameStats) {
///         self.0 += stats.activated + stats.deactivated;
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called before the scheduler runs `frame`.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called after every phase of `frame` has run.
    fn on_frame_end(&mut self, _frame: Frame, _stats: &FrameStats) {}

    /// Called at snapshot intervals (every
    /// `config.snapshot_interval_frames` frames) after the frame ends.
    ///
    /// `elapsed_secs` is simulated time including the frame just run.
    /// `views` lists every registered capability in tick order.
    fn on_snapshot(
        &mut self,
        _frame:        Frame,
        _elapsed_secs: f64,
        _views:        &[CapabilityView],
        _entities:     &EntityStore,
    ) {}

    /// Called once after the final frame of a `run`.
    fn on_run_end(&mut self, _final_frame: Frame) {}
}

/// A [`WorldObserver`] that does nothing.  Use when you need to call `run`
/// but don't want callbacks.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
