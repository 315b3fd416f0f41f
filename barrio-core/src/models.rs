use barrio_catalog::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::delivery::{Fragility, Priority, Provider, ShipmentStatus};
use crate::email::Email;

/// Storage limit for notification message text.
pub const MAX_MESSAGE_LENGTH: usize = 255;

/// Cut `message` to at most `max` characters, marking the cut with `...`.
pub fn truncate_for_storage(message: &str, max: usize) -> String {
    if message.chars().count() <= max {
        return message.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut truncated: String = message.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

/// A confirmed customer order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    pub customer_email: Email,
    pub address: String,
    pub priority: Priority,
    pub fragility: Fragility,
    pub total_weight: i64,
    pub created_at: DateTime<Utc>,
}

/// Validated order data ready to be written together with its line items.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_email: Email,
    pub address: String,
    pub priority: Priority,
    pub fragility: Fragility,
    pub total_weight: i64,
    pub items: Vec<NewLineItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLineItem {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLineItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

/// A line item joined with the product it references
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemView {
    pub item: OrderLineItem,
    pub product: Product,
}

impl LineItemView {
    /// Stored lines were bounded by the checked order total when committed.
    pub fn weight(&self) -> i64 {
        self.product
            .line_weight(self.item.quantity)
            .unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderView {
    pub order: Order,
    pub items: Vec<LineItemView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shipment {
    pub id: i64,
    pub order_id: i64,
    pub provider: Provider,
    pub tracking_id: String,
    pub status: ShipmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewShipment {
    pub order_id: i64,
    pub provider: Provider,
    pub tracking_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationRecord {
    pub id: i64,
    pub order_id: i64,
    pub channel: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A delivered notification awaiting persistence.
///
/// The constructor enforces the message storage limit.
#[derive(Debug, Clone)]
pub struct NewNotification {
    order_id: i64,
    channel: String,
    message: String,
}

impl NewNotification {
    pub fn new(order_id: i64, channel: impl Into<String>, message: &str) -> Self {
        Self {
            order_id,
            channel: channel.into(),
            message: truncate_for_storage(message, MAX_MESSAGE_LENGTH),
        }
    }

    pub fn order_id(&self) -> i64 {
        self.order_id
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
