//! `cap-world` — frame loop orchestrator for the capability framework.
//!
//! # Frame loop
//!
//! ```text
//! for frame in clock.current_frame..config.end_frame():
//!   ① on_frame_start(frame)
//!   ② Scheduler::update(fixed_dt)  — every phase, in order
//!   ③ clock.advance(fixed_dt)
//!   ④ on_frame_end(frame, stats)
//!   ⑤ on_snapshot(frame, elapsed, views, entities)  every N frames
//! on_run_end(final_frame)
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                             |
//! |----------------|------------------------------------------------------|
//! | [`world`]      | `World`: scheduler + entities + clock + catalog      |
//! | [`builder`]    | `WorldBuilder`                                       |
//! | [`observer`]   | `WorldObserver`, `NoopObserver`                      |
//! | [`timeline`]   | `ActivationTimeline`, `StateChangeEvent`             |
//! | [`grouping`]   | `group_by_owner`, `OwnerGroup`                       |
//! | [`error`]      | `WorldError`, `WorldResult<T>`                       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cap_core::FrameConfig;
//! use cap_world::{ActivationTimeline, WorldBuilder};
//!
//! let mut world = WorldBuilder::new(FrameConfig::default()).catalog(catalog).build()?;
//! let (hero, _report) = world.assemble("hero", &sheet)?;
//! let mut timeline = ActivationTimeline::new(5.0);
//! world.run(&mut timeline);
//! ```

pub mod builder;
pub mod error;
pub mod grouping;
pub mod observer;
pub mod timeline;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use error::{WorldError, WorldResult};
pub use grouping::{OwnerGroup, group_by_owner};
pub use observer::{NoopObserver, WorldObserver};
pub use timeline::{ActivationTimeline, StateChangeEvent};
pub use world::World;
