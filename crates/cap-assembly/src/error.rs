use cap_entity::EntityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("sheet parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Entity(#[from] EntityError),
}

pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// Why a single property could not be applied.  Never fatal: the assembler
/// records it as a diagnostic and moves on to the next property.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("no such field")]
    UnknownField,

    #[error("expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got:      &'static str,
    },

    #[error("{0}")]
    Invalid(String),
}
