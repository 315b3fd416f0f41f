pub mod email;
pub mod sms;
pub mod webhook;

use async_trait::async_trait;
use barrio_core::models::Order;
use barrio_core::repository::NotificationRepository;
use barrio_core::{ChannelEndpoint, OrderEvent};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::NotificationError;

pub use email::EmailObserver;
pub use sms::SmsObserver;
pub use webhook::WebhookObserver;

/// A channel interested in order lifecycle events.
#[async_trait]
pub trait OrderObserver: Send + Sync {
    async fn notify(&self, order: &Order, event: OrderEvent, message: &str) -> Result<(), NotificationError>;

    /// Human-readable description, including the destination where there is one
    fn name(&self) -> String;

    /// Value written to the `channel` column of notification records
    fn channel(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRecord {
    pub order_id: i64,
    pub event: OrderEvent,
    pub message: String,
    pub dispatched_at: DateTime<Utc>,
    /// Observers attempted, including ones that failed
    pub observers_notified: usize,
    pub delivered: usize,
}

/// Fans an order event out to every attached observer.
///
/// A failing observer is logged and skipped; it never stops the others and
/// never surfaces to the caller.
#[derive(Default)]
pub struct OrderNotificationSubject {
    observers: Vec<Arc<dyn OrderObserver>>,
    history: Vec<DispatchRecord>,
}

impl OrderNotificationSubject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observers(observers: Vec<Arc<dyn OrderObserver>>) -> Self {
        let mut subject = Self::new();
        for observer in observers {
            subject.attach(observer);
        }
        subject
    }

    /// No-op if this exact observer is already attached.
    pub fn attach(&mut self, observer: Arc<dyn OrderObserver>) {
        if self.position(&observer).is_some() {
            return;
        }
        info!("Observer attached: {}", observer.name());
        self.observers.push(observer);
    }

    pub fn detach(&mut self, observer: &Arc<dyn OrderObserver>) {
        if let Some(index) = self.position(observer) {
            let removed = self.observers.remove(index);
            info!("Observer detached: {}", removed.name());
        }
    }

    fn position(&self, observer: &Arc<dyn OrderObserver>) -> Option<usize> {
        self.observers
            .iter()
            .position(|o| std::ptr::addr_eq(Arc::as_ptr(o), Arc::as_ptr(observer)))
    }

    pub fn observer_names(&self) -> Vec<String> {
        self.observers.iter().map(|o| o.name()).collect()
    }

    pub fn history(&self) -> &[DispatchRecord] {
        &self.history
    }

    pub async fn notify(&mut self, order: &Order, event: OrderEvent, message: &str) -> DispatchRecord {
        info!(
            order_id = order.id,
            %event,
            observers = self.observers.len(),
            "Notifying observers"
        );

        let mut delivered = 0;
        for observer in &self.observers {
            match observer.notify(order, event, message).await {
                Ok(()) => delivered += 1,
                Err(e) => error!(order_id = order.id, "Observer {} failed: {}", observer.name(), e),
            }
        }

        let record = DispatchRecord {
            order_id: order.id,
            event,
            message: message.to_string(),
            dispatched_at: Utc::now(),
            observers_notified: self.observers.len(),
            delivered,
        };
        self.history.push(record.clone());
        record
    }
}

/// Build one observer per configured endpoint, all persisting through `repo`.
pub fn build_observers(
    endpoints: &[ChannelEndpoint],
    repo: Arc<dyn NotificationRepository>,
) -> Vec<Arc<dyn OrderObserver>> {
    endpoints
        .iter()
        .map(|endpoint| -> Arc<dyn OrderObserver> {
            match endpoint {
                ChannelEndpoint::Email => Arc::new(EmailObserver::new(repo.clone())),
                ChannelEndpoint::Webhook { url } => Arc::new(WebhookObserver::new(url, repo.clone())),
                ChannelEndpoint::Sms { phone } => Arc::new(SmsObserver::new(phone, repo.clone())),
            }
        })
        .collect()
}
