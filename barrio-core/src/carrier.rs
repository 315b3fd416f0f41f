use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::delivery::{Fragility, Priority, Provider};
use crate::models::Order;

/// Provider-neutral description of a package awaiting pickup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickupRequest {
    pub order_id: i64,
    pub weight_grams: i64,
    pub address: String,
    pub priority: Priority,
    pub fragility: Fragility,
}

impl PickupRequest {
    pub fn for_order(order: &Order) -> Self {
        Self {
            order_id: order.id,
            weight_grams: order.total_weight,
            address: order.address.clone(),
            priority: order.priority,
            fragility: order.fragility,
        }
    }
}

#[async_trait]
pub trait ShippingCarrier: Send + Sync {
    /// Ask the courier to collect the package; returns its tracking id
    async fn request_pickup(&self, request: &PickupRequest) -> Result<String, CarrierError>;

    fn provider(&self) -> Provider;
}

#[derive(Debug, thiserror::Error)]
pub enum CarrierError {
    #[error("Unknown provider: {name}. Available: {available}")]
    UnknownProvider {
        name: String,
        available: String,
    },

    #[error("Provider {provider} rejected the pickup: {reason}")]
    Rejected {
        provider: Provider,
        reason: String,
    },
}
