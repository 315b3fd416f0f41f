use barrio_core::carrier::CarrierError;
use barrio_core::{CoreError, EmailError};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid customer email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Customer email is required")]
    MissingCustomer,

    #[error("Delivery address is required")]
    MissingAddress,

    #[error("Delivery address must be at most {max} characters")]
    AddressTooLong { max: usize },

    #[error("Order has no valid items")]
    NoValidItems,

    #[error("Quantity {quantity} of product {product_id} is too large")]
    QuantityTooLarge { product_id: i64, quantity: i64 },
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown selection policy {name:?}. Available: {available}")]
    UnknownPolicy { name: String, available: String },

    #[error(transparent)]
    Carrier(#[from] CarrierError),

    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Order not found: {0}")]
    NotFound(i64),
}

impl From<CoreError> for OrderError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) | CoreError::StorageError(msg) => {
                OrderError::Storage(msg)
            }
        }
    }
}

impl From<EmailError> for OrderError {
    fn from(err: EmailError) -> Self {
        OrderError::Validation(ValidationError::InvalidEmail(err))
    }
}

/// Raised by a single observer; the notification subject logs it and moves on.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Could not record notification: {0}")]
    Storage(#[from] CoreError),

    #[error("Could not encode payload: {0}")]
    Payload(#[from] serde_json::Error),
}
