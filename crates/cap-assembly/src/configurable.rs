//! Name-addressed field assignment for sheet-driven components.

use crate::{FieldError, PropertyValue};

/// A component whose fields a sheet can set by name.
///
/// Implementations usually match on `field` and use the typed accessors on
/// [`PropertyValue`]:
///
/// ```rust
/// use cap_assembly::{Configurable, FieldError, PropertyValue};
///
/// #[derive(Default)]
/// struct Health { max: f32, regen: bool }
///
/// impl Configurable for Health {
///     fn set_field(&mut self, field: &str, value: &PropertyValue) -> Result<(), FieldError> {
///         match field {
///             "max" => self.max = value.as_float()?,
///             "regen" => self.regen = value.as_bool()?,
///             _ => return Err(FieldError::UnknownField),
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Configurable {
    /// Assign `value` to `field`.  On error the component must be left
    /// unchanged.
    fn set_field(&mut self, field: &str, value: &PropertyValue) -> Result<(), FieldError>;
}
