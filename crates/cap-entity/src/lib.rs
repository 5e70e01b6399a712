//! `cap-entity` — the entity table capabilities are attached to.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `EntityStore` (generational table), `EntityRecord`        |
//! | [`component`]   | `ComponentSlot` trait, `TypedComponent<T>`, `ComponentMap` |
//! | [`tag_block`]   | `TagBlockRegistry` (per-entity, per-instigator blocks)    |
//! | [`error`]       | `EntityError`, `EntityResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `serde`   | Propagates serde derives to `cap-core` types.            |
//! | `fx-hash` | FxHash for component and tag-block maps.                 |

pub mod component;
pub mod error;
pub mod store;
pub mod tag_block;


pub use component::{ComponentMap, ComponentSlot, TypedComponent};
pub use error::{EntityError, EntityResult};
pub use store::{EntityRecord, EntityStore};
pub use tag_block::TagBlockRegistry;
