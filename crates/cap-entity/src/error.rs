use cap_core::EntityId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EntityError {
    /// The handle is stale (entity despawned) or was never issued.
    #[error("entity {0} not found")]
    NotFound(EntityId),
}

pub type EntityResult<T> = Result<T, EntityError>;
