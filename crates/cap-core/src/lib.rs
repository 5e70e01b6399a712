//! `cap-core` — foundational types for the capability framework.
//!
//! This crate is a dependency of every other `cap-*` crate.  It has no
//! `cap-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde` and `rustc-hash`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`collections`] | `Map`, `Set` (std or Fx, per `fx-hash`)              |
//! | [`ids`]         | `CapabilityId`, `SchedulerId`, `EntityId`             |
//! | [`naming`]      | `short_type_name`                                     |
//! | [`phase`]       | `Phase` — the totally ordered ticking stages          |
//! | [`tag`]         | `Tag` — block/unblock granularity                     |
//! | [`instigator`]  | `Instigator` — "who is asking" lookup key             |
//! | [`time`]        | `Frame`, `FrameClock`, `FrameConfig`                  |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//! | `fx-hash` | Switches `collections::{Map, Set}` to FxHash.            |

pub mod collections;
pub mod error;
pub mod ids;
pub mod instigator;
pub mod naming;
pub mod phase;
pub mod tag;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{CapabilityId, EntityId, SchedulerId};
pub use instigator::Instigator;
pub use naming::short_type_name;
pub use phase::Phase;
pub use tag::Tag;
pub use time::{Frame, FrameClock, FrameConfig};
