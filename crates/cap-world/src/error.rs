use cap_assembly::AssemblyError;
use cap_core::CoreError;
use cap_entity::EntityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("world configuration error: {0}")]
    Config(#[from] CoreError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error("assembly failed: {0}")]
    Assembly(#[from] AssemblyError),
}

pub type WorldResult<T> = Result<T, WorldError>;
