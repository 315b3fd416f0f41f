use async_trait::async_trait;
use barrio_core::carrier::{CarrierError, PickupRequest, ShippingCarrier};
use barrio_core::{Priority, Provider};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tracking_code;

/// Package description the bicycle courier schedules against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EcoBikePackage {
    pub weight_grams: i64,
    pub fragile: bool,
    pub priority: Priority,
    pub destination: String,
}

#[derive(Debug, Default)]
pub struct EcoBikeClient;

impl EcoBikeClient {
    /// Returns the tracking code directly.
    pub fn schedule_pickup(&self, package: &EcoBikePackage) -> String {
        debug!(?package, "EcoBike pickup scheduled");
        tracking_code("EBK")
    }
}

pub struct EcoBikeAdapter {
    client: EcoBikeClient,
}

impl EcoBikeAdapter {
    pub fn new() -> Self {
        Self { client: EcoBikeClient }
    }
}

impl Default for EcoBikeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShippingCarrier for EcoBikeAdapter {
    async fn request_pickup(&self, request: &PickupRequest) -> Result<String, CarrierError> {
        let package = EcoBikePackage {
            weight_grams: request.weight_grams,
            fragile: request.fragility.is_fragile(),
            priority: request.priority,
            destination: request.address.clone(),
        };
        Ok(self.client.schedule_pickup(&package))
    }

    fn provider(&self) -> Provider {
        Provider::EcoBike
    }
}
