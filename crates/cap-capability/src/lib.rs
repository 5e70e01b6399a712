//! `cap-capability` — the capability trait and its activation state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`model`]   | `Capability` trait                                              |
//! | [`state`]   | `ActivationState` (active flag + time-in-state counters)        |
//! | [`machine`] | `run_tick`, `Transition` — one tick of the state machine        |
//! | [`context`] | `CapabilityContext<'a>` — what a hook can see and touch          |
//! | [`command`] | `Command`, `CommandQueue` — structural requests from a tick     |
//! | [`noop`]    | `NoopCapability` — placeholder with all-default hooks           |
//!
//! # Design notes
//!
//! A tick is split the same way for every capability:
//!
//! 1. **Decide** (`should_activate` / `should_deactivate`) with a shared
//!    borrow of the context.
//! 2. **React** (`on_activated` / `on_deactivated` / `tick_active`) with a
//!    mutable borrow: entity state is written in place, scheduler changes
//!    are queued as [`Command`]s.
//!
//! The activation counters live in the context, not in the capability, so
//! `run_tick` keeps them correct regardless of which hooks are overridden.

pub mod command;
pub mod context;
pub mod machine;
pub mod model;
pub mod noop;
pub mod state;


pub use command::{Command, CommandQueue};
pub use context::CapabilityContext;
pub use machine::{Transition, run_tick};
pub use model::Capability;
pub use noop::NoopCapability;
pub use state::ActivationState;
