use async_trait::async_trait;
use barrio_core::carrier::{CarrierError, PickupRequest, ShippingCarrier};
use barrio_core::Provider;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tracking_code;

/// Sender name on every parcel handed to PaqZ.
pub const WAREHOUSE_SENDER: &str = "MercadoBarrio Warehouse";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaqzResponse {
    pub tracking_number: String,
    pub service_type: String,
    pub delivery_days: String,
}

/// Traditional parcel service: sender, recipient and weight in grams.
#[derive(Debug, Default)]
pub struct PaqzClient;

impl PaqzClient {
    pub fn submit_shipment(&self, sender: &str, recipient: &str, weight: i64) -> PaqzResponse {
        debug!(sender, recipient, weight, "PaqZ shipment submitted");
        PaqzResponse {
            tracking_number: tracking_code("PAQ"),
            service_type: "STANDARD".to_string(),
            delivery_days: "3-5".to_string(),
        }
    }
}

pub struct PaqzAdapter {
    client: PaqzClient,
}

impl PaqzAdapter {
    pub fn new() -> Self {
        Self { client: PaqzClient }
    }
}

impl Default for PaqzAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShippingCarrier for PaqzAdapter {
    async fn request_pickup(&self, request: &PickupRequest) -> Result<String, CarrierError> {
        let response = self
            .client
            .submit_shipment(WAREHOUSE_SENDER, &request.address, request.weight_grams);
        Ok(response.tracking_number)
    }

    fn provider(&self) -> Provider {
        Provider::PaqZ
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_shipment_shape() {
        let response = PaqzClient.submit_shipment(WAREHOUSE_SENDER, "Calle 1", 4200);
        assert_eq!(response.service_type, "STANDARD");
        assert_eq!(response.delivery_days, "3-5");
        assert!(response.tracking_number.starts_with("PAQ-"));
    }
}
