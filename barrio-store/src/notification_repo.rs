use async_trait::async_trait;
use barrio_core::models::{NewNotification, NotificationRecord};
use barrio_core::repository::NotificationRepository;
use barrio_core::CoreResult;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::storage_error;

pub struct StoreNotificationRepository {
    pool: SqlitePool,
}

impl StoreNotificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: i64,
    order_id: i64,
    channel: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for NotificationRecord {
    fn from(row: NotificationRow) -> Self {
        NotificationRecord {
            id: row.id,
            order_id: row.order_id,
            channel: row.channel,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl NotificationRepository for StoreNotificationRepository {
    async fn record(&self, notification: &NewNotification) -> CoreResult<NotificationRecord> {
        let created_at = Utc::now();

        let id = sqlx::query(
            "INSERT INTO notifications (order_id, channel, message, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(notification.order_id())
        .bind(notification.channel())
        .bind(notification.message())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?
        .last_insert_rowid();

        Ok(NotificationRecord {
            id,
            order_id: notification.order_id(),
            channel: notification.channel().to_string(),
            message: notification.message().to_string(),
            created_at,
        })
    }

    async fn list_for_order(&self, order_id: i64) -> CoreResult<Vec<NotificationRecord>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT id, order_id, channel, message, created_at FROM notifications WHERE order_id = ? ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(NotificationRecord::from).collect())
    }
}
