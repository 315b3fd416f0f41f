pub mod carrier;
pub mod delivery;
pub mod email;
pub mod models;
pub mod notification;
pub mod repository;

pub use delivery::{Fragility, ParseVariantError, Priority, Provider, ShipmentStatus};
pub use email::{Email, EmailError};
pub use notification::{ChannelEndpoint, OrderEvent};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Storage failure: {0}")]
    StorageError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
