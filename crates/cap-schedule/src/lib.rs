//! `cap-schedule` — the phase-bucketed capability scheduler.
//!
//! # Frame loop
//!
//! ```text
//! update(dt, entities):
//!   for phase in Phase::ALL:               Separated, Input, … PostWork
//!     snapshot = bucket[phase].clone()     lazily created if missing
//!     for id in snapshot:
//!       skip if removed earlier this frame
//!       run_tick(capability)               decide → transition → tick
//!       apply queued commands              register / remove / destroy
//! ```
//!
//! There is no global scheduler.  The composition root constructs one and
//! passes it (with its entity table) to whatever drives frames; several
//! independent schedulers can live in one process.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash for the slot and bucket maps.                    |

pub mod scheduler;
pub mod view;


pub use scheduler::{FrameStats, Scheduler};
pub use view::CapabilityView;
