//! Courier integrations.
//!
//! Each courier ships its own client with its own request and response shapes.
//! The adapters in this module translate a [`PickupRequest`] into those shapes
//! so the order flow only ever sees [`ShippingCarrier`].

pub mod ecobike;
pub mod motoya;
pub mod paqz;

use barrio_core::carrier::{CarrierError, ShippingCarrier};
use barrio_core::Provider;
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;

pub use ecobike::{EcoBikeAdapter, EcoBikeClient, EcoBikePackage};
pub use motoya::{MotoYaAcceptance, MotoYaAdapter, MotoYaClient};
pub use paqz::{PaqzAdapter, PaqzClient, PaqzResponse};

pub type CarrierConstructor = Arc<dyn Fn() -> Box<dyn ShippingCarrier> + Send + Sync>;

/// Tracking code issued by the simulated couriers: `{prefix}-{6 uppercase hex}`.
pub(crate) fn tracking_code(prefix: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..=0xFF_FFFF);
    format!("{}-{:06X}", prefix, suffix)
}

/// Looks up courier adapters by provider name.
#[derive(Clone, Default)]
pub struct CarrierRegistry {
    constructors: BTreeMap<String, CarrierConstructor>,
}

impl CarrierRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the three built-in couriers.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Provider::MotoYa.as_str(), || Box::new(MotoYaAdapter::new()));
        registry.register(Provider::EcoBike.as_str(), || Box::new(EcoBikeAdapter::new()));
        registry.register(Provider::PaqZ.as_str(), || Box::new(PaqzAdapter::new()));
        registry
    }

    /// Add or replace the constructor for `name` (case-insensitive).
    pub fn register<F>(&mut self, name: &str, constructor: F) -> &mut Self
    where
        F: Fn() -> Box<dyn ShippingCarrier> + Send + Sync + 'static,
    {
        self.constructors
            .insert(name.trim().to_lowercase(), Arc::new(constructor));
        self
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn ShippingCarrier>, CarrierError> {
        let constructor = self
            .constructors
            .get(&name.trim().to_lowercase())
            .ok_or_else(|| CarrierError::UnknownProvider {
                name: name.to_string(),
                available: self.available().join(", "),
            })?;
        Ok(constructor())
    }

    pub fn for_provider(&self, provider: Provider) -> Result<Box<dyn ShippingCarrier>, CarrierError> {
        self.create(provider.as_str())
    }

    /// Registered names, sorted.
    pub fn available(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrio_core::carrier::PickupRequest;
    use barrio_core::{Fragility, Priority};
    use regex::Regex;

    fn request() -> PickupRequest {
        PickupRequest {
            order_id: 1,
            weight_grams: 850,
            address: "Calle 1".into(),
            priority: Priority::Express,
            fragility: Fragility::Weak,
        }
    }

    #[test]
    fn test_tracking_code_format() {
        let re = Regex::new(r"^MYA-[0-9A-F]{6}$").unwrap();
        for _ in 0..50 {
            assert!(re.is_match(&tracking_code("MYA")));
        }
    }

    #[tokio::test]
    async fn test_standard_registry_adapters() {
        let registry = CarrierRegistry::standard();
        assert_eq!(registry.available(), ["ecobike", "motoya", "paqz"]);

        let re = Regex::new(r"^(MYA|EBK|PAQ)-[A-Z0-9]+$").unwrap();
        for (name, prefix) in [("motoya", "MYA-"), ("EcoBike", "EBK-"), ("paqz", "PAQ-")] {
            let carrier = registry.create(name).unwrap();
            assert_eq!(carrier.provider().as_str(), name.to_lowercase());
            let tracking = carrier.request_pickup(&request()).await.unwrap();
            assert!(re.is_match(&tracking), "{}", tracking);
            assert!(tracking.starts_with(prefix));
        }
    }

    #[test]
    fn test_unknown_provider_lists_available() {
        let err = CarrierRegistry::standard().create("dhl").err().unwrap();
        assert_eq!(err.to_string(), "Unknown provider: dhl. Available: ecobike, motoya, paqz");
    }

    #[test]
    fn test_register_replaces_constructor() {
        let mut registry = CarrierRegistry::empty();
        registry.register("MotoYa", || Box::new(PaqzAdapter::new()));
        assert_eq!(registry.available(), ["motoya"]);
        let carrier = registry.for_provider(Provider::MotoYa).unwrap();
        assert_eq!(carrier.provider(), Provider::PaqZ);
    }
}
