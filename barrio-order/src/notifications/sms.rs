use async_trait::async_trait;
use barrio_core::models::{NewNotification, Order};
use barrio_core::repository::NotificationRepository;
use barrio_core::OrderEvent;
use barrio_shared::Masked;
use std::sync::Arc;
use tracing::info;

use super::OrderObserver;
use crate::error::NotificationError;

pub struct SmsObserver {
    phone: String,
    repo: Arc<dyn NotificationRepository>,
}

impl SmsObserver {
    pub fn new(phone: &str, repo: Arc<dyn NotificationRepository>) -> Self {
        Self { phone: phone.to_string(), repo }
    }

    /// Short text; the event message is left out to fit a single SMS.
    pub fn render(order: &Order, event: OrderEvent) -> String {
        let status = match event {
            OrderEvent::Created => "confirmed",
            OrderEvent::Dispatched => "dispatched",
            OrderEvent::InTransit => "on its way",
            OrderEvent::Delivered => "delivered",
        };
        format!("Order #{} {}", order.id, status)
    }
}

#[async_trait]
impl OrderObserver for SmsObserver {
    async fn notify(&self, order: &Order, event: OrderEvent, _message: &str) -> Result<(), NotificationError> {
        let content = Self::render(order, event);
        self.repo
            .record(&NewNotification::new(order.id, self.channel(), &content))
            .await?;
        info!("SMS sent to {}: {}", Masked(&self.phone), content);
        Ok(())
    }

    fn name(&self) -> String {
        format!("SMS notifier ({})", self.phone)
    }

    fn channel(&self) -> &'static str {
        "sms"
    }
}
