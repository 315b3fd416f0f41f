use async_trait::async_trait;
use barrio_catalog::{NewProduct, Product};
use std::sync::Arc;

use crate::models::{
    LineItemView, NewNotification, NewOrder, NewShipment, NotificationRecord, Order, Shipment,
};
use crate::CoreResult;

/// Repository trait for product catalog access
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create_product(&self, product: &NewProduct) -> CoreResult<i64>;

    async fn get_product(&self, id: i64) -> CoreResult<Option<Product>>;

    async fn find_by_sku(&self, sku: &str) -> CoreResult<Option<Product>>;

    /// All products ordered by name
    async fn list_products(&self) -> CoreResult<Vec<Product>>;
}

/// Repository trait for order data access
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert the order and all its line items atomically.
    async fn create_order(&self, order: &NewOrder) -> CoreResult<Order>;

    async fn get_order(&self, id: i64) -> CoreResult<Option<Order>>;

    async fn list_items(&self, order_id: i64) -> CoreResult<Vec<LineItemView>>;

    /// Most recent orders first
    async fn latest_orders(&self, limit: u32) -> CoreResult<Vec<Order>>;
}

#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    async fn create_shipment(&self, shipment: &NewShipment) -> CoreResult<Shipment>;

    /// The shipment with the highest id for the order, if any
    async fn latest_for_order(&self, order_id: i64) -> CoreResult<Option<Shipment>>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn record(&self, notification: &NewNotification) -> CoreResult<NotificationRecord>;

    async fn list_for_order(&self, order_id: i64) -> CoreResult<Vec<NotificationRecord>>;
}

/// Handles to every repository the order flow touches.
#[derive(Clone)]
pub struct Repositories {
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub shipments: Arc<dyn ShipmentRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}
