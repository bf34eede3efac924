//! # Cart
//!
//! The in-memory cart for one in-progress sale.
//!
//! The cart is an explicit value owned by the sale session; nothing in this
//! crate (or anywhere else) holds it as module-level state. It is discarded
//! on completion or abandonment and never persisted.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  select product + qty ──► add_item()    ──► merge or append line        │
//! │  remove line           ──► remove_item() ──► silent no-op if absent     │
//! │  display / checkout    ──► total()       ──► Σ quantity × unit price    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::stock;
use crate::types::Product;
use crate::validation::validate_quantity;

/// One line in the cart.
///
/// The unit price is frozen when the line is created: if the product's
/// selling price changes before checkout, the cart keeps the price the
/// customer was quoted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to (UUID).
    pub product_id: String,

    /// Product name at time of adding (frozen, reused on the invoice).
    pub name: String,

    /// Quantity in cart.
    pub quantity: i64,

    /// Selling price in minor units at time of adding (frozen).
    pub unit_price_cents: i64,
}

impl CartLine {
    /// quantity × unit price, recomputed from the frozen unit price.
    #[inline]
    pub fn subtotal_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents())
    }
}

/// The cart for one sale session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in insertion order, unique by product id.
    pub lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart, merging with an existing line for the
    /// same product.
    ///
    /// ## Behavior
    /// - Quantity must be positive, else `ValidationError`
    /// - The merged quantity (existing + requested) is checked against the
    ///   product's known stock; on overflow the add is rejected entirely and
    ///   the cart is left untouched
    /// - New lines freeze the product's current selling price
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let existing_qty = self
            .lines
            .iter()
            .find(|l| l.product_id == product.id)
            .map(|l| l.quantity)
            .unwrap_or(0);

        let merged = existing_qty + quantity;
        if !stock::can_fulfill(merged, product.quantity) {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.quantity,
                requested: merged,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = merged;
            return Ok(());
        }

        self.lines.push(CartLine {
            product_id: product.id.to_string(),
            name: product.name.clone(),
            quantity,
            unit_price_cents: product.selling_price_cents,
        });

        Ok(())
    }

    /// Removes the line for a product. Silent no-op when the product is not
    /// in the cart.
    pub fn remove_item(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Sum of all line subtotals in minor units; 0 for an empty cart.
    pub fn total_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.subtotal_cents()).sum()
    }

    /// Total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents())
    }

    /// Number of unique lines in the cart.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}
