use async_trait::async_trait;
use barrio_core::models::{NewNotification, Order};
use barrio_core::repository::NotificationRepository;
use barrio_core::OrderEvent;
use barrio_shared::Masked;
use std::sync::Arc;
use tracing::info;

use super::OrderObserver;
use crate::error::NotificationError;

pub struct EmailObserver {
    repo: Arc<dyn NotificationRepository>,
}

impl EmailObserver {
    pub fn new(repo: Arc<dyn NotificationRepository>) -> Self {
        Self { repo }
    }

    pub fn render(order: &Order, event: OrderEvent, message: &str) -> String {
        match event {
            OrderEvent::Created => format!("Order #{} confirmed! {}", order.id, message),
            OrderEvent::Dispatched => format!("Order #{} dispatched. {}", order.id, message),
            OrderEvent::InTransit => format!("Order #{} on its way. {}", order.id, message),
            OrderEvent::Delivered => format!("Order #{} delivered. {}", order.id, message),
        }
    }
}

#[async_trait]
impl OrderObserver for EmailObserver {
    async fn notify(&self, order: &Order, event: OrderEvent, message: &str) -> Result<(), NotificationError> {
        let content = Self::render(order, event, message);
        self.repo
            .record(&NewNotification::new(order.id, self.channel(), &content))
            .await?;
        info!("Email sent to {}: {}", Masked(&order.customer_email), content);
        Ok(())
    }

    fn name(&self) -> String {
        "Email notifier".to_string()
    }

    fn channel(&self) -> &'static str {
        "email"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrio_core::{Email, Fragility, Priority};
    use chrono::Utc;

    #[test]
    fn test_templates() {
        let order = Order {
            id: 7,
            customer_email: Email::parse("ana@example.com").unwrap(),
            address: "Calle 1".into(),
            priority: Priority::Normal,
            fragility: Fragility::None,
            total_weight: 100,
            created_at: Utc::now(),
        };
        assert_eq!(EmailObserver::render(&order, OrderEvent::Created, "Hi"), "Order #7 confirmed! Hi");
        assert_eq!(EmailObserver::render(&order, OrderEvent::InTransit, "Soon"), "Order #7 on its way. Soon");
        assert_eq!(EmailObserver::render(&order, OrderEvent::Delivered, ""), "Order #7 delivered. ");
    }
}
