use async_trait::async_trait;
use barrio_core::carrier::{CarrierError, PickupRequest, ShippingCarrier};
use barrio_core::Provider;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tracking_code;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MotoYaAcceptance {
    pub delivery_id: String,
    pub status: String,
    pub estimated_time: String,
}

/// Motorbike courier API: weight in kilograms, flat destination string.
#[derive(Debug, Default)]
pub struct MotoYaClient;

impl MotoYaClient {
    pub fn create_delivery_request(&self, weight_kg: f64, destination: &str) -> MotoYaAcceptance {
        debug!(weight_kg, destination, "MotoYa delivery request");
        MotoYaAcceptance {
            delivery_id: tracking_code("MYA"),
            status: "ACCEPTED".to_string(),
            estimated_time: "2-4 hours".to_string(),
        }
    }
}

pub struct MotoYaAdapter {
    client: MotoYaClient,
}

impl MotoYaAdapter {
    pub fn new() -> Self {
        Self { client: MotoYaClient }
    }
}

impl Default for MotoYaAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShippingCarrier for MotoYaAdapter {
    async fn request_pickup(&self, request: &PickupRequest) -> Result<String, CarrierError> {
        let weight_kg = request.weight_grams as f64 / 1000.0;
        let acceptance = self.client.create_delivery_request(weight_kg, &request.address);

        if acceptance.status != "ACCEPTED" {
            return Err(CarrierError::Rejected {
                provider: Provider::MotoYa,
                reason: acceptance.status,
            });
        }
        Ok(acceptance.delivery_id)
    }

    fn provider(&self) -> Provider {
        Provider::MotoYa
    }
}
