use async_trait::async_trait;
use barrio_core::models::{NewShipment, Shipment};
use barrio_core::repository::ShipmentRepository;
use barrio_core::{CoreError, CoreResult, ShipmentStatus};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{corrupt_row, storage_error};

pub struct StoreShipmentRepository {
    pool: SqlitePool,
}

impl StoreShipmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShipmentRow {
    id: i64,
    order_id: i64,
    provider: String,
    tracking_id: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ShipmentRow> for Shipment {
    type Error = CoreError;

    fn try_from(row: ShipmentRow) -> Result<Self, Self::Error> {
        Ok(Shipment {
            id: row.id,
            order_id: row.order_id,
            provider: row.provider.parse().map_err(|e| corrupt_row("shipments", row.id, e))?,
            tracking_id: row.tracking_id,
            status: row.status.parse().map_err(|e| corrupt_row("shipments", row.id, e))?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ShipmentRepository for StoreShipmentRepository {
    async fn create_shipment(&self, shipment: &NewShipment) -> CoreResult<Shipment> {
        let created_at = Utc::now();
        let status = ShipmentStatus::Confirmed;

        let id = sqlx::query(
            r#"
            INSERT INTO shipments (order_id, provider, tracking_id, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(shipment.order_id)
        .bind(shipment.provider.as_str())
        .bind(&shipment.tracking_id)
        .bind(status.as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?
        .last_insert_rowid();

        Ok(Shipment {
            id,
            order_id: shipment.order_id,
            provider: shipment.provider,
            tracking_id: shipment.tracking_id.clone(),
            status,
            created_at,
        })
    }

    async fn latest_for_order(&self, order_id: i64) -> CoreResult<Option<Shipment>> {
        let row = sqlx::query_as::<_, ShipmentRow>(
            r#"
            SELECT id, order_id, provider, tracking_id, status, created_at
            FROM shipments WHERE order_id = ?
            ORDER BY id DESC LIMIT 1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(Shipment::try_from).transpose()
    }
}
