use async_trait::async_trait;
use barrio_core::models::{NewNotification, Order};
use barrio_core::repository::NotificationRepository;
use barrio_core::OrderEvent;
use barrio_shared::models::events::WebhookPayload;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use super::OrderObserver;
use crate::error::NotificationError;

pub struct WebhookObserver {
    url: String,
    repo: Arc<dyn NotificationRepository>,
}

impl WebhookObserver {
    pub fn new(url: &str, repo: Arc<dyn NotificationRepository>) -> Self {
        Self { url: url.to_string(), repo }
    }

    pub fn payload(order: &Order, event: OrderEvent, message: &str) -> WebhookPayload {
        WebhookPayload {
            order_id: order.id,
            customer_email: order.customer_email.to_string(),
            event_type: event.as_str().to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
            priority: order.priority.as_str().to_string(),
            total_weight: order.total_weight,
        }
    }
}

#[async_trait]
impl OrderObserver for WebhookObserver {
    async fn notify(&self, order: &Order, event: OrderEvent, message: &str) -> Result<(), NotificationError> {
        let body = Self::payload(order, event, message).to_json()?;
        debug!(url = %self.url, %body, "webhook payload");

        let summary = format!("Webhook to {}: {} for order #{}", self.url, event, order.id);
        self.repo
            .record(&NewNotification::new(order.id, self.channel(), &summary))
            .await?;
        info!("{}", summary);
        Ok(())
    }

    fn name(&self) -> String {
        format!("Webhook notifier ({})", self.url)
    }

    fn channel(&self) -> &'static str {
        "webhook"
    }
}
