//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD with the category join the products screen needs
//! - `set_quantity`: the absolute stock write used by checkout step 3
//! - `delete`: hard delete, guarded by the sale_items foreign key
//!
//! ## Stock Write Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout decrements stock by writing the value computed from the       │
//! │  quantity fetched at session start:                                     │
//! │                                                                         │
//! │     UPDATE products SET quantity = <snapshot - sold> WHERE id = ?       │
//! │                                                                         │
//! │  This is last-writer-wins: no optimistic-concurrency check, no delta.   │
//! │  Concurrent sessions against the same product can oversell. Accepted    │
//! │  limitation of the single-operator design (see moonlight_core::stock).  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use moonlight_core::Product;

/// A product joined with its category name, as listed on the products
/// screen.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,

    /// Name of the owning category.
    pub category_name: String,
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

const PRODUCT_COLUMNS: &str = r#"
    id, category_id, name, description,
    cost_price_cents, selling_price_cents, quantity,
    image_url, created_at, updated_at
"#;

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Lists all products joined with category names, newest first.
    pub async fn list(&self) -> DbResult<Vec<ProductWithCategory>> {
        let rows = sqlx::query_as::<_, ProductWithCategory>(
            r#"
            SELECT
                p.id, p.category_id, p.name, p.description,
                p.cost_price_cents, p.selling_price_cents, p.quantity,
                p.image_url, p.created_at, p.updated_at,
                c.name AS category_name
            FROM products p
            INNER JOIN categories c ON c.id = p.category_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists products with stock remaining, for the sale screen's product
    /// picker. This is the snapshot a sale session validates against.
    pub async fn list_in_stock(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE quantity > 0 ORDER BY name"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, category_id, name, description,
                cost_price_cents, selling_price_cents, quantity,
                image_url, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&product.id)
        .bind(&product.category_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.cost_price_cents)
        .bind(product.selling_price_cents)
        .bind(product.quantity)
        .bind(&product.image_url)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product's editable fields.
    ///
    /// Fails with `DbError::NotFound` when the id doesn't exist.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                category_id = ?2,
                name = ?3,
                description = ?4,
                cost_price_cents = ?5,
                selling_price_cents = ?6,
                quantity = ?7,
                image_url = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.category_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.cost_price_cents)
        .bind(product.selling_price_cents)
        .bind(product.quantity)
        .bind(&product.image_url)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Writes an absolute stock quantity (last-writer-wins, see the module
    /// docs). Used by checkout step 3.
    pub async fn set_quantity(&self, id: &str, quantity: i64) -> DbResult<()> {
        debug!(id = %id, quantity = %quantity, "Writing stock quantity");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET quantity = ?2, updated_at = ?3 WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Hard-deletes a product.
    ///
    /// Fails with `DbError::ForeignKeyViolation` when any sale line item
    /// still references it, and `DbError::NotFound` when the id doesn't
    /// exist.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::category::generate_category_id;
    use moonlight_core::Category;

    async fn seed_category(db: &Database) -> String {
        let category = Category {
            id: generate_category_id(),
            name: "Perfumes".to_string(),
            description: None,
            created_at: Utc::now(),
        };
        db.categories().insert(&category).await.unwrap();
        category.id
    }

    fn product(category_id: &str, name: &str, quantity: i64) -> Product {
        let now = Utc::now();
        Product {
            id: generate_product_id(),
            category_id: category_id.to_string(),
            name: name.to_string(),
            description: None,
            cost_price_cents: 500_000,
            selling_price_cents: 800_000,
            quantity,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_get_update() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category_id = seed_category(&db).await;

        let mut p = product(&category_id, "Midnight Rose Perfume", 50);
        db.products().insert(&p).await.unwrap();

        let fetched = db.products().get_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Midnight Rose Perfume");
        assert_eq!(fetched.quantity, 50);

        p.selling_price_cents = 900_000;
        db.products().update(&p).await.unwrap();
        let fetched = db.products().get_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(fetched.selling_price_cents, 900_000);
    }

    #[tokio::test]
    async fn test_list_joins_category_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category_id = seed_category(&db).await;

        db.products()
            .insert(&product(&category_id, "Amber Oud", 5))
            .await
            .unwrap();

        let rows = db.products().list().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category_name, "Perfumes");
    }

    #[tokio::test]
    async fn test_list_in_stock_filters_sold_out() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category_id = seed_category(&db).await;

        db.products()
            .insert(&product(&category_id, "In Stock", 3))
            .await
            .unwrap();
        db.products()
            .insert(&product(&category_id, "Sold Out", 0))
            .await
            .unwrap();

        let in_stock = db.products().list_in_stock().await.unwrap();
        assert_eq!(in_stock.len(), 1);
        assert_eq!(in_stock[0].name, "In Stock");
    }

    #[tokio::test]
    async fn test_set_quantity_absolute() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category_id = seed_category(&db).await;

        let p = product(&category_id, "Velvet Musk", 10);
        db.products().insert(&p).await.unwrap();

        db.products().set_quantity(&p.id, 8).await.unwrap();
        let fetched = db.products().get_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(fetched.quantity, 8);
    }

    #[tokio::test]
    async fn test_delete_unreferenced_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category_id = seed_category(&db).await;

        let p = product(&category_id, "Short Lived", 1);
        db.products().insert(&p).await.unwrap();
        db.products().delete(&p.id).await.unwrap();

        assert!(db.products().get_by_id(&p.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category_id = seed_category(&db).await;

        let p = product(&category_id, "Ghost", 1);
        let err = db.products().update(&p).await;
        assert!(matches!(err, Err(DbError::NotFound { .. })));
    }
}
