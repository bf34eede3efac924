//! # Sale Repository
//!
//! Database operations for sales and sale line items.
//!
//! ## Role in the Checkout Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Checkout writes (moonlight-app)                        │
//! │                                                                         │
//! │  Step 1: insert_sale()   ── one header row                              │
//! │  Step 2: insert_items()  ── ONE multi-row statement for all lines       │
//! │  Step 3: products().set_quantity() per line                             │
//! │                                                                         │
//! │  There is deliberately no transaction spanning the steps and no         │
//! │  compensating delete; the failure semantics live in the app layer.      │
//! │  Step 2 being a single statement means it either writes every line      │
//! │  or none of them.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales are immutable once inserted: there is no update or delete here.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use moonlight_core::{PaymentMethod, Sale, SaleItem};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a sale header.
    pub async fn insert_sale(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, total = %sale.total_cents, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (id, customer_id, total_cents, payment_method, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.customer_id)
        .bind(sale.total_cents)
        .bind(sale.payment_method)
        .bind(sale.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts all line items for a sale as a single multi-row statement.
    ///
    /// Single statement on purpose: a failure writes no line at all, so a
    /// failed step 2 leaves an orphaned header and nothing else.
    pub async fn insert_items(&self, items: &[SaleItem]) -> DbResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        debug!(
            sale_id = %items[0].sale_id,
            count = items.len(),
            "Inserting sale items"
        );

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO sale_items (id, sale_id, product_id, name_snapshot, \
             quantity, unit_price_cents, subtotal_cents, created_at) ",
        );
        builder.push_values(items, |mut row, item| {
            row.push_bind(&item.id)
                .push_bind(&item.sale_id)
                .push_bind(&item.product_id)
                .push_bind(&item.name_snapshot)
                .push_bind(item.quantity)
                .push_bind(item.unit_price_cents)
                .push_bind(item.subtotal_cents)
                .push_bind(item.created_at);
        });

        builder.build().execute(&self.pool).await?;

        Ok(())
    }

    /// Gets a sale by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, total_cents, payment_method, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists all sales, newest first.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, total_cents, payment_method, created_at
            FROM sales
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists all sales for a customer, oldest first.
    pub async fn list_for_customer(&self, customer_id: &str) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, total_cents, payment_method, created_at
            FROM sales
            WHERE customer_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Gets all line items for a sale.
    pub async fn get_items(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, name_snapshot,
                   quantity, unit_price_cents, subtotal_cents, created_at
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists every sale line item (backup export, analytics reduction).
    pub async fn list_items(&self) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, name_snapshot,
                   quantity, unit_price_cents, subtotal_cents, created_at
            FROM sale_items
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

/// Helper to generate a new sale ID.
pub fn generate_sale_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a new sale item ID.
pub fn generate_sale_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds an immutable sale header with a fresh id and timestamp.
pub fn new_sale(
    customer_id: Option<String>,
    total_cents: i64,
    payment_method: PaymentMethod,
) -> Sale {
    Sale {
        id: generate_sale_id(),
        customer_id,
        total_cents,
        payment_method,
        created_at: chrono::Utc::now(),
    }
}
