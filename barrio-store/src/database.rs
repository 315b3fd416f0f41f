use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use barrio_core::repository::Repositories;

use crate::app_config::DatabaseConfig;
use crate::{
    StoreNotificationRepository, StoreOrderRepository, StoreProductRepository,
    StoreShipmentRepository,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sku VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(100) NOT NULL,
    weight_grams INTEGER NOT NULL DEFAULT 0,
    fragile BOOLEAN NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_email VARCHAR(120) NOT NULL,
    address VARCHAR(200) NOT NULL,
    priority TEXT NOT NULL DEFAULT 'normal' CHECK (priority IN ('normal', 'express')),
    fragility TEXT NOT NULL DEFAULT 'none' CHECK (fragility IN ('none', 'weak', 'high')),
    total_weight INTEGER NOT NULL DEFAULT 0 CHECK (total_weight >= 0),
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS order_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE RESTRICT,
    quantity INTEGER NOT NULL CHECK (quantity > 0)
);

CREATE TABLE IF NOT EXISTS shipments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    provider VARCHAR(30) NOT NULL,
    tracking_id VARCHAR(60) NOT NULL,
    status TEXT NOT NULL DEFAULT 'confirmed'
        CHECK (status IN ('confirmed', 'dispatched', 'in_transit', 'delivered')),
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS notifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    channel VARCHAR(20) NOT NULL,
    message VARCHAR(255) NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items(order_id);
CREATE INDEX IF NOT EXISTS idx_shipments_order_id ON shipments(order_id);
CREATE INDEX IF NOT EXISTS idx_notifications_order_id ON notifications(order_id);
"#;

#[derive(Clone)]
pub struct DbClient {
    pub pool: SqlitePool,
}

impl DbClient {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database lives and dies with its connection, so the pool
        // must hold exactly one that is never recycled.
        let pool = if is_in_memory(&config.url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections.max(1))
                .acquire_timeout(Duration::from_secs(3))
                .connect_with(options)
                .await?
        };

        Ok(Self { pool })
    }

    /// Fresh, schema-initialised in-memory database
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let client = Self::new(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await?;
        client.initialize_schema().await?;
        Ok(client)
    }

    pub async fn initialize_schema(&self) -> Result<(), sqlx::Error> {
        info!("Initializing database schema...");
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        info!("Database schema ready.");
        Ok(())
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            products: Arc::new(StoreProductRepository::new(self.pool.clone())),
            orders: Arc::new(StoreOrderRepository::new(self.pool.clone())),
            shipments: Arc::new(StoreShipmentRepository::new(self.pool.clone())),
            notifications: Arc::new(StoreNotificationRepository::new(self.pool.clone())),
        }
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://shared?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://barrio.db"));
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let db = DbClient::in_memory().await.unwrap();
        db.initialize_schema().await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&db.pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, ["notifications", "order_items", "orders", "products", "shipments"]);
    }
}
