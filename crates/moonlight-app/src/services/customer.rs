//! # Customer Service
//!
//! The operations behind the customers screen: profiles, balances, payment
//! recording and the WhatsApp balance reminder.
//!
//! Balances are recomputed from the customer's sales and payments on every
//! read (derived-on-read); nothing is stored or cached.

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use moonlight_core::balance::{outstanding_balance, validate_payment};
use moonlight_core::validation::{validate_name, validate_phone, validate_price_cents};
use moonlight_core::{reminder, Customer, Money, Payment, Sale};
use moonlight_db::Database;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Input for creating a customer. Name and phone are required; the credit
/// limit is informational only and never enforced.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub credit_limit_cents: i64,
}

/// A customer as the customers screen shows them: lifetime sales, the
/// derived outstanding balance, and the debt flag.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerAccount {
    #[serde(flatten)]
    pub customer: Customer,
    pub total_sales: Money,
    pub outstanding_balance: Money,
    pub has_debt: bool,
}

/// Customer profiles, balances and payments.
#[derive(Debug, Clone)]
pub struct CustomerService {
    db: Database,
    business_name: String,
}

impl CustomerService {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        CustomerService {
            db,
            business_name: config.business_name.clone(),
        }
    }

    /// Creates a customer profile.
    pub async fn create_customer(&self, new: NewCustomer) -> AppResult<Customer> {
        validate_name("name", &new.name)?;
        validate_phone(&new.phone)?;
        validate_price_cents("credit limit", new.credit_limit_cents)?;

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            phone: new.phone.trim().to_string(),
            email: new.email.filter(|e| !e.trim().is_empty()),
            credit_limit_cents: new.credit_limit_cents,
            created_at: Utc::now(),
        };
        self.db.customers().insert(&customer).await?;

        info!(id = %customer.id, name = %customer.name, "Customer created");
        Ok(customer)
    }

    /// Lists all customers with their derived balances, newest first.
    pub async fn list_accounts(&self) -> AppResult<Vec<CustomerAccount>> {
        let customers = self.db.customers().list().await?;
        let sales = self.db.sales().list().await?;
        let payments = self.db.payments().list().await?;

        Ok(customers
            .into_iter()
            .map(|customer| {
                let their_sales: Vec<Sale> = sales
                    .iter()
                    .filter(|s| s.customer_id.as_deref() == Some(customer.id.as_str()))
                    .cloned()
                    .collect();
                let their_payments: Vec<Payment> = payments
                    .iter()
                    .filter(|p| p.customer_id == customer.id)
                    .cloned()
                    .collect();

                let total_sales: Money = their_sales.iter().map(Sale::total).sum();
                let balance = outstanding_balance(&their_sales, &their_payments);

                CustomerAccount {
                    customer,
                    total_sales,
                    outstanding_balance: balance,
                    has_debt: balance.is_positive(),
                }
            })
            .collect())
    }

    /// The customer's outstanding balance, derived at call time.
    pub async fn outstanding_balance(&self, customer_id: &str) -> AppResult<Money> {
        let sales = self.db.sales().list_for_customer(customer_id).await?;
        let payments = self.db.payments().list_for_customer(customer_id).await?;
        Ok(outstanding_balance(&sales, &payments))
    }

    /// Records a payment against the customer's balance.
    ///
    /// Accepted iff `0 < amount ≤ balance`, with the balance computed at
    /// submission time (no storage-side re-check; a concurrent write can
    /// slip in between). Inserts a payment row only; sales and products are
    /// untouched.
    pub async fn record_payment(
        &self,
        customer_id: &str,
        amount: Money,
        notes: Option<String>,
    ) -> AppResult<Payment> {
        let customer = self
            .db
            .customers()
            .get_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer", customer_id))?;

        let balance = self.outstanding_balance(&customer.id).await?;
        validate_payment(amount, balance)?;

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            customer_id: customer.id.clone(),
            amount_cents: amount.cents(),
            notes: notes.filter(|n| !n.trim().is_empty()),
            created_at: Utc::now(),
        };
        self.db.payments().insert(&payment).await?;

        info!(
            customer_id = %customer.id,
            amount = %amount,
            "Payment recorded"
        );
        Ok(payment)
    }

    /// Builds the WhatsApp reminder deep link for a customer's outstanding
    /// balance: digits-only phone, URL-encoded templated message.
    pub async fn reminder_link(&self, customer_id: &str) -> AppResult<String> {
        let customer = self
            .db
            .customers()
            .get_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer", customer_id))?;

        let balance = self.outstanding_balance(&customer.id).await?;
        let message = reminder::reminder_message(&self.business_name, balance);

        Ok(reminder::whatsapp_link(&customer.phone, &message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use moonlight_core::PaymentMethod;
    use moonlight_db::repository::sale::new_sale;
    use moonlight_db::DbConfig;

    async fn setup() -> (Database, CustomerService) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = CustomerService::new(db.clone(), &AppConfig::default());
        (db, service)
    }

    fn ada() -> NewCustomer {
        NewCustomer {
            name: "Ada Obi".to_string(),
            phone: "+234 803 555 1234".to_string(),
            email: None,
            credit_limit_cents: 5_000_000,
        }
    }

    async fn record_sale(db: &Database, customer_id: &str, total_cents: i64) {
        let sale = new_sale(
            Some(customer_id.to_string()),
            total_cents,
            PaymentMethod::Cash,
        );
        db.sales().insert_sale(&sale).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_customer_requires_name_and_phone() {
        let (_db, svc) = setup().await;

        let mut input = ada();
        input.name = "".to_string();
        assert_eq!(
            svc.create_customer(input).await.unwrap_err().code,
            ErrorCode::Validation
        );

        let mut input = ada();
        input.phone = "".to_string();
        assert_eq!(
            svc.create_customer(input).await.unwrap_err().code,
            ErrorCode::Validation
        );
    }

    #[tokio::test]
    async fn test_payment_boundaries() {
        let (db, svc) = setup().await;
        let customer = svc.create_customer(ada()).await.unwrap();
        record_sale(&db, &customer.id, 1_600_000).await;

        // One unit above the balance: rejected.
        let err = svc
            .record_payment(&customer.id, Money::from_cents(1_600_001), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);

        // Exactly the balance: accepted and settles the account.
        svc.record_payment(&customer.id, Money::from_cents(1_600_000), None)
            .await
            .unwrap();
        let balance = svc.outstanding_balance(&customer.id).await.unwrap();
        assert!(balance.is_zero());

        // Nothing outstanding: any further payment is rejected.
        let err = svc
            .record_payment(&customer.id, Money::from_cents(1), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[tokio::test]
    async fn test_list_accounts_derives_balance_and_debt_flag() {
        let (db, svc) = setup().await;
        let customer = svc.create_customer(ada()).await.unwrap();
        record_sale(&db, &customer.id, 400_000).await;
        record_sale(&db, &customer.id, 600_000).await;
        svc.record_payment(&customer.id, Money::from_cents(250_000), Some("ref".into()))
            .await
            .unwrap();

        let accounts = svc.list_accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].total_sales.cents(), 1_000_000);
        assert_eq!(accounts[0].outstanding_balance.cents(), 750_000);
        assert!(accounts[0].has_debt);
    }

    #[tokio::test]
    async fn test_reminder_link() {
        let (db, svc) = setup().await;
        let customer = svc.create_customer(ada()).await.unwrap();
        record_sale(&db, &customer.id, 1_500_000).await;

        let link = svc.reminder_link(&customer.id).await.unwrap();
        assert!(link.starts_with("https://wa.me/2348035551234?text="));
        // The encoded message carries the business name and the balance.
        assert!(link.contains("Moonlight%20Scent"));
        assert!(link.contains("15%2C000.00"));
    }
}
