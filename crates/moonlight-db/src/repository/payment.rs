//! # Payment Repository
//!
//! Database operations for customer payments. A payment only ever inserts a
//! row; it never mutates sale or product state.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use moonlight_core::Payment;

/// Repository for payment database operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Records a payment.
    pub async fn insert(&self, payment: &Payment) -> DbResult<()> {
        debug!(
            customer_id = %payment.customer_id,
            amount = %payment.amount_cents,
            "Recording payment"
        );

        sqlx::query(
            r#"
            INSERT INTO payments (id, customer_id, amount_cents, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&payment.id)
        .bind(&payment.customer_id)
        .bind(payment.amount_cents)
        .bind(&payment.notes)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all payments by a customer, oldest first.
    pub async fn list_for_customer(&self, customer_id: &str) -> DbResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, customer_id, amount_cents, notes, created_at
            FROM payments
            WHERE customer_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Lists every payment (backup export, customer listing reduction).
    pub async fn list(&self) -> DbResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, customer_id, amount_cents, notes, created_at
            FROM payments
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}

/// Helper to generate a new payment ID.
pub fn generate_payment_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::customer::generate_customer_id;
    use chrono::Utc;
    use moonlight_core::Customer;

    #[tokio::test]
    async fn test_insert_and_list_for_customer() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let customer = Customer {
            id: generate_customer_id(),
            name: "Ada Obi".to_string(),
            phone: "08035551234".to_string(),
            email: None,
            credit_limit_cents: 0,
            created_at: Utc::now(),
        };
        db.customers().insert(&customer).await.unwrap();

        let payment = Payment {
            id: generate_payment_id(),
            customer_id: customer.id.clone(),
            amount_cents: 250_000,
            notes: Some("Transfer ref 0012".to_string()),
            created_at: Utc::now(),
        };
        db.payments().insert(&payment).await.unwrap();

        let payments = db.payments().list_for_customer(&customer.id).await.unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount_cents, 250_000);
    }

    #[tokio::test]
    async fn test_payment_requires_existing_customer() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let payment = Payment {
            id: generate_payment_id(),
            customer_id: "no-such-customer".to_string(),
            amount_cents: 100,
            notes: None,
            created_at: Utc::now(),
        };

        let err = db.payments().insert(&payment).await;
        assert!(matches!(
            err,
            Err(crate::error::DbError::ForeignKeyViolation { .. })
        ));
    }
}
