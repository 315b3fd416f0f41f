use serde::{Deserialize, Serialize};
use std::fmt;

use crate::delivery::ShipmentStatus;

/// Order lifecycle events announced to notification channels.
///
/// The sequence `Created → Dispatched → InTransit → Delivered` is informational;
/// callers may announce any event at any time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    Created,
    Dispatched,
    InTransit,
    Delivered,
}

impl OrderEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderEvent::Created => "CREATED",
            OrderEvent::Dispatched => "DISPATCHED",
            OrderEvent::InTransit => "IN_TRANSIT",
            OrderEvent::Delivered => "DELIVERED",
        }
    }
}

impl From<ShipmentStatus> for OrderEvent {
    fn from(status: ShipmentStatus) -> Self {
        match status {
            ShipmentStatus::Confirmed => OrderEvent::Created,
            ShipmentStatus::Dispatched => OrderEvent::Dispatched,
            ShipmentStatus::InTransit => OrderEvent::InTransit,
            ShipmentStatus::Delivered => OrderEvent::Delivered,
        }
    }
}

impl fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_WEBHOOK_URL: &str = "https://api.external-system.com/webhook";
pub const DEFAULT_SMS_PHONE: &str = "+1234567890";

/// A configured notification destination.
///
/// In TOML configuration each entry is tagged by `kind`:
///
/// ```toml
/// channels = [
///     { kind = "email" },
///     { kind = "webhook", url = "https://hooks.example.com/orders" },
///     { kind = "sms", phone = "+5491100000000" },
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelEndpoint {
    Email,
    Webhook { url: String },
    Sms { phone: String },
}

impl ChannelEndpoint {
    /// Channel name written to notification records.
    pub fn channel(&self) -> &'static str {
        match self {
            ChannelEndpoint::Email => "email",
            ChannelEndpoint::Webhook { .. } => "webhook",
            ChannelEndpoint::Sms { .. } => "sms",
        }
    }

    pub fn defaults() -> Vec<ChannelEndpoint> {
        vec![
            ChannelEndpoint::Email,
            ChannelEndpoint::Webhook {
                url: DEFAULT_WEBHOOK_URL.to_string(),
            },
            ChannelEndpoint::Sms {
                phone: DEFAULT_SMS_PHONE.to_string(),
            },
        ]
    }
}
