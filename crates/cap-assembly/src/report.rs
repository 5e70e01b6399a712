//! What an assembly pass did, and what it had to skip.

use std::fmt;

use cap_core::{CapabilityId, EntityId};

use crate::FieldError;

/// A problem that did not stop assembly.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// The sheet names a component the catalog does not know.
    UnknownComponent(String),

    /// The sheet names a capability the catalog does not know.
    UnknownCapability(String),

    /// The entity already had this component; its properties were applied
    /// to the existing value.
    ComponentExisted(String),

    /// One property could not be applied.
    Field {
        component: String,
        field:     String,
        error:     FieldError,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownComponent(name) => write!(f, "unknown component {name:?}"),
            Diagnostic::UnknownCapability(name) => write!(f, "unknown capability {name:?}"),
            Diagnostic::ComponentExisted(name) => {
                write!(f, "component {name:?} already present; properties re-applied")
            }
            Diagnostic::Field { component, field, error } => {
                write!(f, "{component}.{field}: {error}")
            }
        }
    }
}

/// Outcome of [`Assembler::apply`](crate::Assembler::apply).
#[derive(Clone, Debug, PartialEq)]
pub struct AssemblyReport {
    pub entity:             EntityId,
    /// Components newly attached, by catalog name.
    pub components_added:   Vec<String>,
    /// Components that were already present and got their properties
    /// re-applied.
    pub components_updated: Vec<String>,
    /// Properties successfully set.
    pub properties_applied: usize,
    /// Capabilities registered, in sheet order.
    pub capabilities:       Vec<CapabilityId>,
    pub diagnostics:        Vec<Diagnostic>,
}

impl AssemblyReport {
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            components_added:   Vec::new(),
            components_updated: Vec::new(),
            properties_applied: 0,
            capabilities:       Vec::new(),
            diagnostics:        Vec::new(),
        }
    }

    /// `true` if nothing was skipped or overridden.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Record a diagnostic and log it.
    pub(crate) fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(entity = %self.entity, "{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}
