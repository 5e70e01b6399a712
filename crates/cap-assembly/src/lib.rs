//! `cap-assembly` — build entities from data.
//!
//! A [`Sheet`] lists the components (with field values) and capabilities
//! one kind of entity is made of.  A [`Catalog`] maps the names used in
//! sheets to Rust types, and the [`Assembler`] applies a sheet to an
//! entity: components first, then capabilities.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`sheet`]        | `Sheet`, `ComponentSpec`, `PropertySpec`, CSV loader      |
//! | [`value`]        | `PropertyValue` and its text encoding                    |
//! | [`configurable`] | `Configurable`: set a component field by name            |
//! | [`catalog`]      | `Catalog`: component and capability constructors        |
//! | [`assembler`]    | `Assembler`                                              |
//! | [`report`]       | `AssemblyReport`, `Diagnostic`                           |
//! | [`error`]        | `AssemblyError`, `FieldError`, `AssemblyResult<T>`       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut catalog = Catalog::new();
//! catalog
//!     .register_component::<Health>("Health")
//!     .register_capability_default::<Regenerate>("Regenerate");
//!
//! let sheet = load_sheet_csv(Path::new("sheets/hero.csv"))?;
//! let (hero, report) = Assembler::new(&catalog)
//!     .assemble(&mut scheduler, &mut entities, "hero", &sheet)?;
//! ```

pub mod assembler;
pub mod catalog;
pub mod configurable;
pub mod error;
pub mod report;
pub mod sheet;
pub mod value;

#[cfg(test)]
mod tests;

pub use assembler::Assembler;
pub use catalog::Catalog;
pub use configurable::Configurable;
pub use error::{AssemblyError, AssemblyResult, FieldError};
pub use report::{AssemblyReport, Diagnostic};
pub use sheet::{ComponentSpec, PropertySpec, Sheet, load_sheet_csv, load_sheet_reader};
pub use value::PropertyValue;
