use barrio_catalog::Product;
use barrio_core::models::{NotificationRecord, Order, OrderView, Shipment};
use barrio_core::repository::Repositories;
use barrio_core::{ChannelEndpoint, Email, OrderEvent, Priority, Provider, ShipmentStatus};
use serde::Serialize;
use tracing::info;

use crate::carriers::CarrierRegistry;
use crate::error::OrderError;
use crate::form::OrderForm;
use crate::notifications::DispatchRecord;
use crate::orchestrator::{OrderConfirmation, OrderOrchestrator};
use crate::selection::PolicyKind;

/// Snapshot of where an order stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStatusView {
    pub order_id: i64,
    pub customer_email: Email,
    pub priority: Priority,
    /// Latest shipment status, or `pending` when none was booked
    pub status: String,
    pub provider: Option<Provider>,
    pub tracking_id: Option<String>,
    pub notifications_sent: usize,
}

/// Entry point for presentation layers.
pub struct OrderService {
    repos: Repositories,
    orchestrator: OrderOrchestrator,
    default_policy: PolicyKind,
}

impl OrderService {
    pub fn new(
        repos: Repositories,
        carriers: CarrierRegistry,
        channels: Vec<ChannelEndpoint>,
        default_policy: PolicyKind,
    ) -> Self {
        Self {
            orchestrator: OrderOrchestrator::new(repos.clone(), carriers, channels),
            repos,
            default_policy,
        }
    }

    /// Policy named on the form; blank uses the configured default and
    /// unknown names fall back to standard.
    fn policy_for(&self, form: &OrderForm) -> PolicyKind {
        if form.policy.trim().is_empty() {
            self.default_policy
        } else {
            PolicyKind::from_form(&form.policy)
        }
    }

    pub async fn place_order(&self, form: &OrderForm) -> Result<OrderConfirmation, OrderError> {
        self.orchestrator.create_order(form, self.policy_for(form)).await
    }

    pub async fn create_order(&self, form: &OrderForm) -> Result<i64, OrderError> {
        Ok(self.place_order(form).await?.order_id)
    }

    pub async fn order_with_items(&self, order_id: i64) -> Result<Option<OrderView>, OrderError> {
        let Some(order) = self.repos.orders.get_order(order_id).await? else {
            return Ok(None);
        };
        let items = self.repos.orders.list_items(order_id).await?;
        Ok(Some(OrderView { order, items }))
    }

    pub async fn latest_shipment(&self, order_id: i64) -> Result<Option<Shipment>, OrderError> {
        Ok(self.repos.shipments.latest_for_order(order_id).await?)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, OrderError> {
        Ok(self.repos.products.list_products().await?)
    }

    pub async fn recent_orders(&self, limit: u32) -> Result<Vec<Order>, OrderError> {
        Ok(self.repos.orders.latest_orders(limit).await?)
    }

    pub async fn notifications(&self, order_id: i64) -> Result<Vec<NotificationRecord>, OrderError> {
        Ok(self.repos.notifications.list_for_order(order_id).await?)
    }

    pub async fn order_status(&self, order_id: i64) -> Result<Option<OrderStatusView>, OrderError> {
        let Some(order) = self.repos.orders.get_order(order_id).await? else {
            return Ok(None);
        };
        let shipment = self.repos.shipments.latest_for_order(order_id).await?;
        let notifications_sent = self.repos.notifications.list_for_order(order_id).await?.len();

        Ok(Some(OrderStatusView {
            order_id,
            customer_email: order.customer_email,
            priority: order.priority,
            status: shipment
                .as_ref()
                .map_or_else(|| "pending".to_string(), |s| s.status.to_string()),
            provider: shipment.as_ref().map(|s| s.provider),
            tracking_id: shipment.map(|s| s.tracking_id),
            notifications_sent,
        }))
    }

    /// Tell every configured channel the order reached `status`.
    ///
    /// Only notifies: the stored shipment is not modified.
    pub async fn announce_status(
        &self,
        order_id: i64,
        status: ShipmentStatus,
    ) -> Result<DispatchRecord, OrderError> {
        let order = self
            .repos
            .orders
            .get_order(order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))?;

        let message = status_message(status);
        let mut subject = self.orchestrator.notification_subject();
        let record = subject.notify(&order, OrderEvent::from(status), &message).await;
        info!(order_id, %status, channels = ?subject.observer_names(), "Status announced");
        Ok(record)
    }
}

fn status_message(status: ShipmentStatus) -> String {
    match status {
        ShipmentStatus::Dispatched => "Order packed and ready for pickup".to_string(),
        ShipmentStatus::InTransit => "Order on its way to the destination".to_string(),
        ShipmentStatus::Delivered => "Order delivered successfully".to_string(),
        other => format!("Status changed to {}", other),
    }
}
