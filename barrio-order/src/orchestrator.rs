use barrio_core::carrier::PickupRequest;
use barrio_core::models::{NewShipment, Order};
use barrio_core::repository::Repositories;
use barrio_core::{ChannelEndpoint, OrderEvent, Provider};
use barrio_shared::Masked;
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

use crate::builder::{OrderBuilder, PackageMetadata};
use crate::carriers::CarrierRegistry;
use crate::error::OrderError;
use crate::form::OrderForm;
use crate::notifications::{build_observers, OrderNotificationSubject};
use crate::selection::{OrderFacts, PolicyKind, ProviderSelector};

#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    pub order_id: i64,
    pub provider: Provider,
    pub tracking_id: String,
    pub policy: &'static str,
    pub package: PackageMetadata,
}

/// Runs the confirmation flow: assemble, select a courier, book the pickup,
/// record the shipment, notify.
///
/// A committed order stays committed if a later step fails. The caller gets the
/// error; the order is left without a shipment and without notifications.
pub struct OrderOrchestrator {
    repos: Repositories,
    carriers: CarrierRegistry,
    channels: Vec<ChannelEndpoint>,
}

impl OrderOrchestrator {
    pub fn new(repos: Repositories, carriers: CarrierRegistry, channels: Vec<ChannelEndpoint>) -> Self {
        Self { repos, carriers, channels }
    }

    /// A subject with one observer per configured channel.
    pub fn notification_subject(&self) -> OrderNotificationSubject {
        OrderNotificationSubject::with_observers(build_observers(
            &self.channels,
            self.repos.notifications.clone(),
        ))
    }

    pub async fn create_order(
        &self,
        form: &OrderForm,
        policy: PolicyKind,
    ) -> Result<OrderConfirmation, OrderError> {
        let customer = Masked(form.customer_email.trim());

        // 1. Assemble and commit
        let (order, package) = match self.assemble(form).await {
            Ok(assembled) => assembled,
            Err(e) => {
                error!("Order assembly failed for {}: {}", customer, e);
                return Err(e);
            }
        };
        info!(
            order_id = order.id,
            package_code = %package.package_code,
            handling = package.handling_label,
            total_weight = order.total_weight,
            "Order built for {}",
            customer
        );

        // 2. Choose a courier
        let selection = ProviderSelector::new(policy).select(&OrderFacts::from(&order));
        info!(
            order_id = order.id,
            provider = %selection.provider,
            policy = selection.policy,
            "{}",
            selection.reason
        );

        // 3. Book the pickup
        let tracking_id = match self.book_pickup(selection.provider, &order).await {
            Ok(tracking_id) => tracking_id,
            Err(e) => {
                error!(order_id = order.id, provider = %selection.provider, "Pickup request failed: {}", e);
                return Err(e);
            }
        };
        info!(order_id = order.id, %tracking_id, "Pickup booked with {}", selection.provider);

        // 4. Record the shipment
        if let Err(e) = self
            .repos
            .shipments
            .create_shipment(&NewShipment {
                order_id: order.id,
                provider: selection.provider,
                tracking_id: tracking_id.clone(),
            })
            .await
        {
            error!(order_id = order.id, "Could not record shipment: {}", e);
            return Err(e.into());
        }

        // 5. Notify
        let message = format!(
            "Order confirmed and assigned to {} with tracking {}. Policy used: {}",
            selection.provider, tracking_id, selection.policy
        );
        let dispatch = self
            .notification_subject()
            .notify(&order, OrderEvent::Created, &message)
            .await;
        info!(
            order_id = order.id,
            delivered = dispatch.delivered,
            channels = dispatch.observers_notified,
            "Order confirmed for {}",
            customer
        );

        Ok(OrderConfirmation {
            order_id: order.id,
            provider: selection.provider,
            tracking_id,
            policy: selection.policy,
            package,
        })
    }

    async fn assemble(&self, form: &OrderForm) -> Result<(Order, PackageMetadata), OrderError> {
        let mut builder = OrderBuilder::new();
        builder
            .customer(&form.customer_email)?
            .address(&form.address)?
            .priority(&form.priority)
            .fragility(&form.fragility);
        builder
            .items(&form.requested_items(), self.repos.products.as_ref())
            .await?;

        let package = builder.package_metadata(Utc::now());
        let order = builder.commit(self.repos.orders.as_ref()).await?;
        Ok((order, package))
    }

    async fn book_pickup(
        &self,
        provider: Provider,
        order: &Order,
    ) -> Result<String, OrderError> {
        let carrier = self.carriers.for_provider(provider)?;
        let tracking_id = carrier.request_pickup(&PickupRequest::for_order(order)).await?;
        Ok(tracking_id)
    }
}
