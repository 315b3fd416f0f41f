use barrio_catalog::Product;
use barrio_core::models::{NewLineItem, NewOrder, Order};
use barrio_core::repository::{OrderRepository, ProductRepository};
use barrio_core::{Email, EmailError, Fragility, Priority};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use crate::error::{OrderError, ValidationError};

/// Column limits of the orders table. Longer input is rejected here as a
/// validation error instead of reaching the store and failing there.
pub const MAX_EMAIL_LENGTH: usize = 120;
pub const MAX_ADDRESS_LENGTH: usize = 200;

/// Derived package attributes for the current draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub package_code: String,
    pub handling_label: &'static str,
    pub estimated_pickup: DateTime<Utc>,
    pub total_weight: i64,
    pub item_count: usize,
}

#[derive(Debug, Clone)]
struct ResolvedItem {
    product: Product,
    quantity: i64,
}

/// Accumulates and validates an order before it is written.
///
/// Setters can be called in any order and repeated. Only a successful
/// [`commit`](OrderBuilder::commit) clears the draft.
#[derive(Debug)]
pub struct OrderBuilder {
    customer_email: Option<Email>,
    address: Option<String>,
    priority: Priority,
    fragility: Fragility,
    items: Vec<ResolvedItem>,
    total_weight: i64,
    package_code: String,
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self {
            customer_email: None,
            address: None,
            priority: Priority::default(),
            fragility: Fragility::default(),
            items: Vec::new(),
            total_weight: 0,
            package_code: new_package_code(),
        }
    }

    pub fn customer(&mut self, email: &str) -> Result<&mut Self, OrderError> {
        let email = Email::parse(email).map_err(ValidationError::InvalidEmail)?;
        if email.as_str().len() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::InvalidEmail(EmailError::TooLong { max: MAX_EMAIL_LENGTH }).into());
        }
        self.customer_email = Some(email);
        Ok(self)
    }

    pub fn address(&mut self, address: &str) -> Result<&mut Self, OrderError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ValidationError::MissingAddress.into());
        }
        if address.chars().count() > MAX_ADDRESS_LENGTH {
            return Err(ValidationError::AddressTooLong { max: MAX_ADDRESS_LENGTH }.into());
        }
        self.address = Some(address.to_string());
        Ok(self)
    }

    /// Unrecognised values fall back to normal.
    pub fn priority(&mut self, raw: &str) -> &mut Self {
        self.priority = Priority::from_input(raw);
        self
    }

    /// Unrecognised values fall back to none.
    pub fn fragility(&mut self, raw: &str) -> &mut Self {
        self.fragility = Fragility::from_input(raw);
        self
    }

    /// Resolve requested quantities against the catalog, replacing any
    /// previously resolved items. Unknown ids and non-positive quantities are
    /// skipped. A quantity whose weight overflows is rejected.
    pub async fn items(
        &mut self,
        requested: &BTreeMap<i64, i64>,
        catalog: &dyn ProductRepository,
    ) -> Result<&mut Self, OrderError> {
        let mut resolved = Vec::new();
        let mut total_weight: i64 = 0;

        for (&product_id, &quantity) in requested {
            if quantity <= 0 {
                continue;
            }
            match catalog.get_product(product_id).await? {
                Some(product) => {
                    total_weight = product
                        .line_weight(quantity)
                        .and_then(|weight| total_weight.checked_add(weight))
                        .ok_or(ValidationError::QuantityTooLarge { product_id, quantity })?;
                    resolved.push(ResolvedItem { product, quantity });
                }
                None => debug!(product_id, "skipping unknown product"),
            }
        }

        if resolved.is_empty() {
            return Err(ValidationError::NoValidItems.into());
        }

        self.items = resolved;
        self.total_weight = total_weight;
        Ok(self)
    }

    pub fn total_weight(&self) -> i64 {
        self.total_weight
    }

    pub fn package_metadata(&self, now: DateTime<Utc>) -> PackageMetadata {
        let hours = if self.priority.is_express() { 24 } else { 48 };
        PackageMetadata {
            package_code: self.package_code.clone(),
            handling_label: handling_label(self.fragility),
            estimated_pickup: now + Duration::hours(hours),
            total_weight: self.total_weight,
            item_count: self.items.len(),
        }
    }

    /// Write the order and its line items in one transaction.
    pub async fn commit(&mut self, orders: &dyn OrderRepository) -> Result<Order, OrderError> {
        let customer_email = self
            .customer_email
            .clone()
            .ok_or(ValidationError::MissingCustomer)?;
        let address = self.address.clone().ok_or(ValidationError::MissingAddress)?;
        if self.items.is_empty() {
            return Err(ValidationError::NoValidItems.into());
        }

        let new_order = NewOrder {
            customer_email,
            address,
            priority: self.priority,
            fragility: self.fragility,
            total_weight: self.total_weight,
            items: self
                .items
                .iter()
                .map(|item| NewLineItem {
                    product_id: item.product.id,
                    quantity: item.quantity,
                })
                .collect(),
        };

        let order = orders.create_order(&new_order).await?;
        *self = Self::new();
        Ok(order)
    }
}

impl Default for OrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn handling_label(fragility: Fragility) -> &'static str {
    match fragility {
        Fragility::None => "NORMAL",
        Fragility::Weak => "FRAGILE",
        Fragility::High => "FRAGILE — HANDLE WITH EXTREME CARE",
    }
}

// Format: PKG-{12 uppercase hex}
fn new_package_code() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("PKG-{}", hex[..12].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use barrio_catalog::NewProduct;
    use barrio_core::CoreResult;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct FixedCatalog(Vec<Product>);

    #[async_trait]
    impl ProductRepository for FixedCatalog {
        async fn create_product(&self, _product: &NewProduct) -> CoreResult<i64> {
            unimplemented!()
        }

        async fn get_product(&self, id: i64) -> CoreResult<Option<Product>> {
            Ok(self.0.iter().find(|p| p.id == id).cloned())
        }

        async fn find_by_sku(&self, sku: &str) -> CoreResult<Option<Product>> {
            Ok(self.0.iter().find(|p| p.sku == sku).cloned())
        }

        async fn list_products(&self) -> CoreResult<Vec<Product>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingOrders(Mutex<Vec<NewOrder>>);

    #[async_trait]
    impl OrderRepository for RecordingOrders {
        async fn create_order(&self, order: &NewOrder) -> CoreResult<Order> {
            let mut saved = self.0.lock().unwrap();
            saved.push(order.clone());
            Ok(Order {
                id: saved.len() as i64,
                customer_email: order.customer_email.clone(),
                address: order.address.clone(),
                priority: order.priority,
                fragility: order.fragility,
                total_weight: order.total_weight,
                created_at: Utc::now(),
            })
        }

        async fn get_order(&self, _id: i64) -> CoreResult<Option<Order>> {
            Ok(None)
        }

        async fn list_items(&self, _order_id: i64) -> CoreResult<Vec<barrio_core::models::LineItemView>> {
            Ok(vec![])
        }

        async fn latest_orders(&self, _limit: u32) -> CoreResult<Vec<Order>> {
            Ok(vec![])
        }
    }

    fn catalog() -> FixedCatalog {
        FixedCatalog(vec![
            Product { id: 1, sku: "VEL-AROMA".into(), name: "Candle".into(), weight_grams: 300, fragile: true },
            Product { id: 2, sku: "TE-VERDE".into(), name: "Tea".into(), weight_grams: 250, fragile: false },
        ])
    }

    fn requested(pairs: &[(i64, i64)]) -> BTreeMap<i64, i64> {
        pairs.iter().copied().collect()
    }

    #[tokio::test]
    async fn test_items_accumulate_weight_and_skip_unknown() {
        let mut builder = OrderBuilder::new();
        builder
            .items(&requested(&[(1, 2), (2, 1), (99, 5), (2, 1)]), &catalog())
            .await
            .unwrap();
        assert_eq!(builder.total_weight(), 850);
        assert_eq!(builder.package_metadata(Utc::now()).item_count, 2);

        builder.items(&requested(&[(2, 4)]), &catalog()).await.unwrap();
        assert_eq!(builder.total_weight(), 1000);
    }

    #[tokio::test]
    async fn test_no_resolvable_items() {
        let mut builder = OrderBuilder::new();
        let err = builder
            .items(&requested(&[(99, 1), (1, 0)]), &catalog())
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(ValidationError::NoValidItems)));
    }

    #[tokio::test]
    async fn test_overflowing_quantity_rejected() {
        let mut builder = OrderBuilder::new();
        builder.items(&requested(&[(2, 4)]), &catalog()).await.unwrap();

        let err = builder
            .items(&requested(&[(1, 10_000_000_000_000_000)]), &catalog())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::Validation(ValidationError::QuantityTooLarge { product_id: 1, .. })
        ));

        // Each line fits but the sum does not
        let err = builder
            .items(&requested(&[(1, i64::MAX / 300), (2, i64::MAX / 250)]), &catalog())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::Validation(ValidationError::QuantityTooLarge { product_id: 2, .. })
        ));

        // Draft keeps the last good items
        assert_eq!(builder.total_weight(), 1000);
    }

    #[test]
    fn test_customer_and_address_validation() {
        let mut builder = OrderBuilder::new();
        assert!(matches!(
            builder.customer("not-an-email"),
            Err(OrderError::Validation(ValidationError::InvalidEmail(_)))
        ));
        assert!(matches!(
            builder.address("   "),
            Err(OrderError::Validation(ValidationError::MissingAddress))
        ));
        assert!(matches!(
            builder.address(&"x".repeat(201)),
            Err(OrderError::Validation(ValidationError::AddressTooLong { max: 200 }))
        ));
        let long_email = format!("{}@example.com", "a".repeat(110));
        assert!(matches!(
            builder.customer(&long_email),
            Err(OrderError::Validation(ValidationError::InvalidEmail(EmailError::TooLong { max: 120 })))
        ));
        assert!(builder.customer(" ana@example.com ").is_ok());
        assert!(builder.address(&"x".repeat(200)).is_ok());
        let at_limit = format!("{}@example.com", "a".repeat(108));
        assert_eq!(at_limit.len(), MAX_EMAIL_LENGTH);
        assert!(builder.customer(&at_limit).is_ok());
    }

    #[test]
    fn test_metadata_is_pure() {
        let mut builder = OrderBuilder::new();
        builder.priority("express").fragility("high");
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let first = builder.package_metadata(now);
        let second = builder.package_metadata(now);
        assert_eq!(first, second);
        assert_eq!(first.handling_label, "FRAGILE — HANDLE WITH EXTREME CARE");
        assert_eq!(first.estimated_pickup, now + Duration::hours(24));
        assert!(first.package_code.starts_with("PKG-"));
        assert_eq!(first.package_code.len(), 16);
        assert!(first.package_code[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));

        builder.priority("whatever").fragility("weak");
        let normal = builder.package_metadata(now);
        assert_eq!(normal.estimated_pickup, now + Duration::hours(48));
        assert_eq!(normal.handling_label, "FRAGILE");
        assert_eq!(normal.package_code, first.package_code);
    }

    #[tokio::test]
    async fn test_commit_requires_customer() {
        let orders = RecordingOrders::default();
        let mut builder = OrderBuilder::new();
        builder.address("Calle 1").unwrap();
        builder.items(&requested(&[(1, 1)]), &catalog()).await.unwrap();

        let err = builder.commit(&orders).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(ValidationError::MissingCustomer)));
        assert!(orders.0.lock().unwrap().is_empty());
        // Draft survives a failed commit
        assert_eq!(builder.total_weight(), 300);
    }

    #[tokio::test]
    async fn test_commit_resets_draft() {
        let orders = RecordingOrders::default();
        let mut builder = OrderBuilder::new();
        builder
            .customer("ana@example.com")
            .unwrap()
            .address("Calle 1")
            .unwrap()
            .priority("express")
            .fragility("weak");
        builder.items(&requested(&[(1, 2), (2, 1)]), &catalog()).await.unwrap();
        let code_before = builder.package_metadata(Utc::now()).package_code;

        let order = builder.commit(&orders).await.unwrap();
        assert_eq!(order.total_weight, 850);
        assert_eq!(order.priority, Priority::Express);
        assert_eq!(orders.0.lock().unwrap()[0].items.len(), 2);

        assert_eq!(builder.total_weight(), 0);
        assert_ne!(builder.package_metadata(Utc::now()).package_code, code_before);
        assert!(builder.commit(&orders).await.is_err());
    }
}
