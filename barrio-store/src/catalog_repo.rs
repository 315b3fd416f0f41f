use async_trait::async_trait;
use barrio_catalog::{NewProduct, Product};
use barrio_core::repository::ProductRepository;
use barrio_core::{CoreError, CoreResult};
use sqlx::SqlitePool;
use tracing::info;

use crate::storage_error;

pub struct StoreProductRepository {
    pool: SqlitePool,
}

impl StoreProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert every configured product whose SKU is not in the store yet.
    /// Existing rows are left untouched; returns how many were inserted.
    pub async fn sync(&self, products: &[NewProduct]) -> CoreResult<usize> {
        let mut inserted = 0;
        for product in products {
            product
                .validate()
                .map_err(|e| CoreError::ValidationError(e.to_string()))?;

            if self.find_by_sku(product.sku.trim()).await?.is_some() {
                continue;
            }
            self.create_product(product).await?;
            inserted += 1;
        }
        if inserted > 0 {
            info!("Catalog sync inserted {} product(s)", inserted);
        }
        Ok(inserted)
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    sku: String,
    name: String,
    weight_grams: i64,
    fragile: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            sku: row.sku,
            name: row.name,
            weight_grams: row.weight_grams,
            fragile: row.fragile,
        }
    }
}

#[async_trait]
impl ProductRepository for StoreProductRepository {
    async fn create_product(&self, product: &NewProduct) -> CoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO products (sku, name, weight_grams, fragile) VALUES (?, ?, ?, ?)",
        )
        .bind(product.sku.trim())
        .bind(product.name.trim())
        .bind(product.weight_grams)
        .bind(product.fragile)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn get_product(&self, id: i64) -> CoreResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, sku, name, weight_grams, fragile FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Product::from))
    }

    async fn find_by_sku(&self, sku: &str) -> CoreResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, sku, name, weight_grams, fragile FROM products WHERE sku = ?",
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(Product::from))
    }

    async fn list_products(&self) -> CoreResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, sku, name, weight_grams, fragile FROM products ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbClient;

    fn product(sku: &str, name: &str, weight_grams: i64) -> NewProduct {
        NewProduct {
            sku: sku.to_string(),
            name: name.to_string(),
            weight_grams,
            fragile: false,
        }
    }

    #[tokio::test]
    async fn test_products_listed_by_name() {
        let db = DbClient::in_memory().await.unwrap();
        let repo = StoreProductRepository::new(db.pool.clone());

        repo.create_product(&product("TE-VERDE", "Green tea", 250)).await.unwrap();
        repo.create_product(&product("LIB-AG", "Agenda", 200)).await.unwrap();
        let cup = repo.create_product(&product("TAZA-CE", "Ceramic cup", 400)).await.unwrap();

        let names: Vec<String> = repo
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Agenda", "Ceramic cup", "Green tea"]);

        let fetched = repo.get_product(cup).await.unwrap().unwrap();
        assert_eq!(fetched.weight_grams, 400);
        assert!(repo.get_product(9_999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_sku_rejected() {
        let db = DbClient::in_memory().await.unwrap();
        let repo = StoreProductRepository::new(db.pool.clone());

        repo.create_product(&product("X-1", "First", 10)).await.unwrap();
        let err = repo.create_product(&product("X-1", "Second", 10)).await.unwrap_err();
        assert!(matches!(err, CoreError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_sync_inserts_only_missing() {
        let db = DbClient::in_memory().await.unwrap();
        let repo = StoreProductRepository::new(db.pool.clone());

        let catalog = vec![product("A", "Alpha", 100), product("B", "Beta", 200)];
        assert_eq!(repo.sync(&catalog).await.unwrap(), 2);
        assert_eq!(repo.sync(&catalog).await.unwrap(), 0);
        assert_eq!(repo.list_products().await.unwrap().len(), 2);

        let bad = vec![product("C", "Gamma", -5)];
        assert!(matches!(repo.sync(&bad).await, Err(CoreError::ValidationError(_))));
    }
}
