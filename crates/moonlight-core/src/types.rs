//! # Domain Types
//!
//! Core domain types used throughout Moonlight Retail Manager.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Category 1 ──► * Product          Customer 1 ──► * Sale               │
//! │                     │                        1 ──► * Payment           │
//! │                     │ referenced by                                     │
//! │                     ▼                                                   │
//! │  Sale 1 ──► * SaleItem  (unit price & name frozen at sale time)        │
//! │                                                                         │
//! │  Sale.customer_id = NULL  ⇒  walk-in sale                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity carries a UUID v4 string `id`, generated by the application
//! before insert so offline-created rows never collide.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Category
// =============================================================================

/// A product category. One-to-many owner of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique per shop.
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Invariant: `quantity` never goes below zero through any committed sale;
/// the only writer is the checkout step that decrements it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Category this product belongs to.
    pub category_id: String,

    /// Display name shown in listings and on invoices.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Purchase cost in minor units (for margin calculations).
    pub cost_price_cents: i64,

    /// Selling price in minor units.
    pub selling_price_cents: i64,

    /// Quantity on hand.
    pub quantity: i64,

    /// Public URL of the product image, when the upload succeeded.
    pub image_url: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the selling price as a Money type.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_cents(self.selling_price_cents)
    }

    /// Returns the cost price as a Money type.
    #[inline]
    pub fn cost_price(&self) -> Money {
        Money::from_cents(self.cost_price_cents)
    }

    /// Profit margin as a percentage: (selling - cost) / selling × 100.
    ///
    /// A zero selling price would divide by zero; it yields 0.0 so the
    /// figure stays displayable.
    pub fn profit_margin(&self) -> f64 {
        if self.selling_price_cents == 0 {
            return 0.0;
        }
        let profit = (self.selling_price_cents - self.cost_price_cents) as f64;
        profit / self.selling_price_cents as f64 * 100.0
    }

    /// Low-stock flag: true iff quantity is strictly below the threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    /// Whether any stock remains to sell.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer profile for tracking sales and credit.
///
/// `credit_limit_cents` is informational only: no flow enforces it against
/// new sales or payments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub credit_limit_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Returns the credit limit as Money.
    #[inline]
    pub fn credit_limit(&self) -> Money {
        Money::from_cents(self.credit_limit_cents)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid. Stored as TEXT using the variant name verbatim.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Bank transfer.
    Transfer,
    /// Card payment on an external terminal.
    Card,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Card => "Card",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale transaction. Immutable once created: there is no edit
/// or cancel path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,

    /// Absent for walk-in sales.
    pub customer_id: Option<String>,

    /// Must equal the sum of this sale's line item subtotals.
    pub total_cents: i64,

    pub payment_method: PaymentMethod,

    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
/// Uses the snapshot pattern to freeze product data at time of sale: the
/// unit price and name stay as sold even if the product changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit price in minor units at time of sale (frozen).
    pub unit_price_cents: i64,
    /// quantity × unit price.
    pub subtotal_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Payment
// =============================================================================

/// A payment a customer made against their outstanding balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: String,
    pub customer_id: String,
    pub amount_cents: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
