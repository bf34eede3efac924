//! # Sale Session & Committer
//!
//! Owns one in-progress sale: the product snapshot fetched at session start,
//! the cart, and the three-step commit sequence.
//!
//! ## Checkout State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Idle ──checkout()──► Submitting ──┬──► Committed                      │
//! │                                     └──► Failed                         │
//! │                                                                         │
//! │   Committed: cart cleared, product snapshot refreshed, sale + items     │
//! │              returned for invoice rendering                             │
//! │   Failed:    cart preserved so the operator can retry                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Three Steps and Their Failure Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Step 1  insert sale header        fails ⇒ nothing written              │
//! │  Step 2  insert line items         fails ⇒ ORPHANED HEADER remains;     │
//! │          (one multi-row statement)          no compensating delete      │
//! │  Step 3  write stock per line      fails ⇒ prior writes remain; stock   │
//! │          (snapshot - sold,                  already decremented is NOT  │
//! │           last-writer-wins)                 restored                    │
//! │                                                                         │
//! │  No transaction spans the steps and no step is retried. These gaps are  │
//! │  the documented contract of the commit, not accidents; fixing them      │
//! │  means an atomic transaction at the storage boundary, a deliberate      │
//! │  redesign rather than a patch here.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use moonlight_core::{
    Cart, CoreError, Customer, Invoice, Money, PaymentMethod, Product, Sale, SaleItem,
};
use moonlight_db::repository::sale::{generate_sale_item_id, new_sale};
use moonlight_db::Database;

use crate::config::AppConfig;
use crate::error::AppResult;

/// Where a sale session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    /// Accepting cart mutations.
    Idle,
    /// A checkout is writing.
    Submitting,
    /// The last checkout succeeded.
    Committed,
    /// The last checkout failed; the cart is preserved for retry.
    Failed,
}

/// Everything a committed checkout yields: the persisted rows plus the
/// customer (when one was attached) for invoice rendering.
#[derive(Debug, Clone)]
pub struct CompletedSale {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
    pub customer: Option<Customer>,
}

/// One in-progress sale.
///
/// The session owns its cart and its product snapshot; neither is shared or
/// global. Stock checks at add time run against the snapshot, which can go
/// stale: see `moonlight_core::stock` for the accepted oversell race.
pub struct SaleSession {
    db: Database,
    products: Vec<Product>,
    cart: Cart,
    state: CheckoutState,
}

impl SaleSession {
    /// Starts a session by fetching the in-stock product snapshot.
    pub async fn begin(db: &Database) -> AppResult<Self> {
        let products = db.products().list_in_stock().await?;
        debug!(products = products.len(), "Sale session started");

        Ok(SaleSession {
            db: db.clone(),
            products,
            cart: Cart::new(),
            state: CheckoutState::Idle,
        })
    }

    /// The product snapshot this session sells from.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The session's cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current checkout state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Cart total.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Adds a product (by id, resolved against the snapshot) to the cart.
    ///
    /// Validation and stock checking live in the cart itself; this only
    /// resolves the id.
    pub fn add_item(&mut self, product_id: &str, quantity: i64) -> AppResult<()> {
        if product_id.trim().is_empty() {
            return Err(moonlight_core::ValidationError::Required {
                field: "product".to_string(),
            }
            .into());
        }

        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        self.cart.add_item(product, quantity)?;
        debug!(product_id = %product_id, quantity = %quantity, "Added to cart");
        Ok(())
    }

    /// Removes a line from the cart. Silent no-op when absent.
    pub fn remove_item(&mut self, product_id: &str) {
        self.cart.remove_item(product_id);
    }

    /// Empties the cart (sale abandoned).
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.state = CheckoutState::Idle;
    }

    /// Runs the three-step commit sequence (see the module docs for the
    /// failure modes of each step).
    ///
    /// On success the cart is cleared and the product snapshot refreshed so
    /// the next sale sees the decremented stock. On failure the cart is
    /// left as-is and the underlying error message is surfaced verbatim.
    pub async fn checkout(
        &mut self,
        customer_id: Option<&str>,
        payment_method: PaymentMethod,
    ) -> AppResult<CompletedSale> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        self.state = CheckoutState::Submitting;

        // Resolve the customer before writing anything, so a bad reference
        // fails the whole operation cleanly.
        let customer = match customer_id {
            Some(id) => match self.db.customers().get_by_id(id).await {
                Ok(Some(customer)) => Some(customer),
                Ok(None) => {
                    self.state = CheckoutState::Failed;
                    return Err(crate::error::AppError::not_found("Customer", id));
                }
                Err(e) => {
                    self.state = CheckoutState::Failed;
                    return Err(e.into());
                }
            },
            None => None,
        };

        // Step 1: the sale header. A failure here aborts with no rows
        // written.
        let sale = new_sale(
            customer.as_ref().map(|c| c.id.clone()),
            self.cart.total_cents(),
            payment_method,
        );
        if let Err(e) = self.db.sales().insert_sale(&sale).await {
            self.state = CheckoutState::Failed;
            return Err(e.into());
        }

        // Step 2: the line items, one statement for all of them. A failure
        // here leaves the orphaned header from step 1 in place.
        let items: Vec<SaleItem> = self
            .cart
            .lines
            .iter()
            .map(|line| SaleItem {
                id: generate_sale_item_id(),
                sale_id: sale.id.clone(),
                product_id: line.product_id.clone(),
                name_snapshot: line.name.clone(),
                quantity: line.quantity,
                unit_price_cents: line.unit_price_cents,
                subtotal_cents: line.subtotal_cents(),
                created_at: sale.created_at,
            })
            .collect();
        if let Err(e) = self.db.sales().insert_items(&items).await {
            self.state = CheckoutState::Failed;
            warn!(sale_id = %sale.id, "Line items failed; sale header left orphaned");
            return Err(e.into());
        }

        // Step 3: stock, one absolute write per line computed from the
        // session-start snapshot (not re-read). A mid-loop failure leaves
        // the earlier decrements in place.
        for line in &self.cart.lines {
            let snapshot = match self.products.iter().find(|p| p.id == line.product_id) {
                Some(product) => product,
                None => {
                    self.state = CheckoutState::Failed;
                    return Err(CoreError::ProductNotFound(line.product_id.clone()).into());
                }
            };
            let remaining = snapshot.quantity - line.quantity;
            if let Err(e) = self
                .db
                .products()
                .set_quantity(&line.product_id, remaining)
                .await
            {
                self.state = CheckoutState::Failed;
                warn!(
                    sale_id = %sale.id,
                    product_id = %line.product_id,
                    "Stock write failed mid-sequence; earlier decrements stand"
                );
                return Err(e.into());
            }
        }

        self.state = CheckoutState::Committed;
        self.cart.clear();

        info!(
            sale_id = %sale.id,
            total = %sale.total_cents,
            items = items.len(),
            "Sale committed"
        );

        // The listing counterpart of cache invalidation: the next sale must
        // see the decremented stock. The sale itself already committed, so
        // a refresh failure only warns.
        if let Err(e) = self.refresh_products().await {
            warn!(error = %e, "Product snapshot refresh failed after commit");
        }

        Ok(CompletedSale {
            sale,
            items,
            customer,
        })
    }

    /// Re-fetches the in-stock product snapshot.
    pub async fn refresh_products(&mut self) -> AppResult<()> {
        self.products = self.db.products().list_in_stock().await?;
        Ok(())
    }

    /// Renders the invoice for a committed sale. Pure given its inputs;
    /// callers may re-render at will.
    pub fn invoice(&self, completed: &CompletedSale, config: &AppConfig) -> Invoice {
        Invoice::from_sale(
            config.business_info(),
            &completed.sale,
            &completed.items,
            completed.customer.as_ref(),
        )
    }
}

/// Persists a rendered invoice as the downloadable artifact, named
/// deterministically from the sale identifier, and returns its path.
pub fn export_invoice(invoice: &Invoice, dir: &Path) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(invoice.file_name());
    fs::write(&path, invoice.render_text())?;

    info!(path = %path.display(), "Invoice exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use moonlight_core::Category;
    use moonlight_db::DbConfig;
    use uuid::Uuid;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, price_cents: i64, quantity: i64) -> Product {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: format!("Category for {name}"),
            description: None,
            created_at: Utc::now(),
        };
        db.categories().insert(&category).await.unwrap();

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            category_id: category.id,
            name: name.to_string(),
            description: None,
            cost_price_cents: price_cents / 2,
            selling_price_cents: price_cents,
            quantity,
            image_url: None,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product
    }

    #[tokio::test]
    async fn test_checkout_commits_and_decrements_stock() {
        let db = test_db().await;
        let product = seed_product(&db, "Midnight Rose Perfume", 800_000, 10).await;

        let mut session = SaleSession::begin(&db).await.unwrap();
        session.add_item(&product.id, 2).unwrap();
        assert_eq!(session.total().cents(), 1_600_000);

        let completed = session.checkout(None, PaymentMethod::Cash).await.unwrap();

        assert_eq!(session.state(), CheckoutState::Committed);
        assert_eq!(completed.sale.total_cents, 1_600_000);
        assert_eq!(completed.items.len(), 1);
        assert_eq!(completed.items[0].subtotal_cents, 1_600_000);

        // Stock decremented 10 -> 8, cart cleared, snapshot refreshed.
        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.quantity, 8);
        assert!(session.cart().is_empty());
        assert_eq!(
            session
                .products()
                .iter()
                .find(|p| p.id == product.id)
                .unwrap()
                .quantity,
            8
        );
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_rejected() {
        let db = test_db().await;

        let mut session = SaleSession::begin(&db).await.unwrap();
        let err = session.checkout(None, PaymentMethod::Cash).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Validation);
        assert_eq!(session.state(), CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_add_item_respects_snapshot_stock() {
        let db = test_db().await;
        let product = seed_product(&db, "Amber Oud Perfume", 1_050_000, 10).await;

        let mut session = SaleSession::begin(&db).await.unwrap();
        let err = session.add_item(&product.id, 11).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        // A repeated add that would exceed stock is rejected wholesale.
        session.add_item(&product.id, 6).unwrap();
        let err = session.add_item(&product.id, 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(session.cart().total_quantity(), 6);
    }

    #[tokio::test]
    async fn test_checkout_unknown_customer_preserves_cart() {
        let db = test_db().await;
        let product = seed_product(&db, "Citrus Bloom Perfume", 700_000, 5).await;

        let mut session = SaleSession::begin(&db).await.unwrap();
        session.add_item(&product.id, 1).unwrap();

        let err = session
            .checkout(Some("missing-customer"), PaymentMethod::Card)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(session.state(), CheckoutState::Failed);
        // Cart preserved for retry; nothing was written.
        assert_eq!(session.cart().total_quantity(), 1);
        assert!(db.sales().list().await.unwrap().is_empty());
        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.quantity, 5);
    }

    #[tokio::test]
    async fn test_invoice_round_trip_and_export() {
        let db = test_db().await;
        let config = AppConfig::default();
        let product = seed_product(&db, "Velvet Musk Perfume", 1_550_000, 4).await;

        let mut session = SaleSession::begin(&db).await.unwrap();
        session.add_item(&product.id, 2).unwrap();
        let completed = session
            .checkout(None, PaymentMethod::Transfer)
            .await
            .unwrap();

        let invoice = session.invoice(&completed, &config);
        assert_eq!(invoice.total, completed.sale.total());
        assert_eq!(invoice.lines.len(), 1);

        let dir = tempfile::tempdir().unwrap();
        let path = export_invoice(&invoice, dir.path()).unwrap();
        assert!(path.ends_with(invoice.file_name()));

        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("Walk-in Customer"));
        assert!(text.contains("MOONLIGHT SCENT"));
    }
}
