use async_trait::async_trait;
use barrio_catalog::Product;
use barrio_core::models::{LineItemView, NewOrder, Order, OrderLineItem};
use barrio_core::repository::OrderRepository;
use barrio_core::{CoreError, CoreResult, Email};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::{corrupt_row, storage_error};

pub struct StoreOrderRepository {
    pool: SqlitePool,
}

impl StoreOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_email: String,
    address: String,
    priority: String,
    fragility: String,
    total_weight: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = CoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let customer_email =
            Email::parse(&row.customer_email).map_err(|e| corrupt_row("orders", row.id, e))?;
        let priority = row.priority.parse().map_err(|e| corrupt_row("orders", row.id, e))?;
        let fragility = row.fragility.parse().map_err(|e| corrupt_row("orders", row.id, e))?;

        Ok(Order {
            id: row.id,
            customer_email,
            address: row.address,
            priority,
            fragility,
            total_weight: row.total_weight,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LineItemRow {
    id: i64,
    order_id: i64,
    product_id: i64,
    quantity: i64,
    sku: String,
    name: String,
    weight_grams: i64,
    fragile: bool,
}

impl From<LineItemRow> for LineItemView {
    fn from(row: LineItemRow) -> Self {
        LineItemView {
            item: OrderLineItem {
                id: row.id,
                order_id: row.order_id,
                product_id: row.product_id,
                quantity: row.quantity,
            },
            product: Product {
                id: row.product_id,
                sku: row.sku,
                name: row.name,
                weight_grams: row.weight_grams,
                fragile: row.fragile,
            },
        }
    }
}

#[async_trait]
impl OrderRepository for StoreOrderRepository {
    async fn create_order(&self, order: &NewOrder) -> CoreResult<Order> {
        if order.items.is_empty() {
            return Err(CoreError::ValidationError(
                "an order needs at least one line item".to_string(),
            ));
        }

        let created_at = Utc::now();
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let order_id = sqlx::query(
            r#"
            INSERT INTO orders (customer_email, address, priority, fragility, total_weight, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(order.customer_email.as_str())
        .bind(&order.address)
        .bind(order.priority.as_str())
        .bind(order.fragility.as_str())
        .bind(order.total_weight)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(storage_error)?
        .last_insert_rowid();

        for item in &order.items {
            // Any failure here drops `tx`, which rolls the order row back too.
            sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES (?, ?, ?)")
                .bind(order_id)
                .bind(item.product_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await
                .map_err(storage_error)?;
        }

        tx.commit().await.map_err(storage_error)?;
        debug!(order_id, items = order.items.len(), "order persisted");

        Ok(Order {
            id: order_id,
            customer_email: order.customer_email.clone(),
            address: order.address.clone(),
            priority: order.priority,
            fragility: order.fragility,
            total_weight: order.total_weight,
            created_at,
        })
    }

    async fn get_order(&self, id: i64) -> CoreResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_email, address, priority, fragility, total_weight, created_at FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(Order::try_from).transpose()
    }

    async fn list_items(&self, order_id: i64) -> CoreResult<Vec<LineItemView>> {
        let rows = sqlx::query_as::<_, LineItemRow>(
            r#"
            SELECT oi.id, oi.order_id, oi.product_id, oi.quantity,
                   p.sku, p.name, p.weight_grams, p.fragile
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = ?
            ORDER BY oi.id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(LineItemView::from).collect())
    }

    async fn latest_orders(&self, limit: u32) -> CoreResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_email, address, priority, fragility, total_weight, created_at FROM orders ORDER BY id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
