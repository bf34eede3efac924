//! # Backup Export
//!
//! Builds the full-database snapshot document: a point-in-time,
//! non-incremental dump with one array per entity under a top-level
//! timestamp.
//!
//! ## Document Shape
//! ```json
//! {
//!   "timestamp": "2026-08-06T14:15:00Z",
//!   "data": {
//!     "categories": [...],
//!     "products": [...],
//!     "customers": [...],
//!     "sales": [...],
//!     "sale_items": [...],
//!     "payments": [...]
//!   }
//! }
//! ```
//!
//! Writing the document to disk is the app layer's job; this module only
//! assembles it and derives the deterministic file name.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DbResult;
use crate::pool::Database;
use moonlight_core::{Category, Customer, Payment, Product, Sale, SaleItem};

/// One array per entity, keyed the way the tables are named.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupTables {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub sales: Vec<Sale>,
    pub sale_items: Vec<SaleItem>,
    pub payments: Vec<Payment>,
}

/// The full snapshot document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSnapshot {
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    pub data: BackupTables,
}

impl Database {
    /// Reads every table and assembles a snapshot.
    ///
    /// The six reads are plain sequential fetches; a table written between
    /// two of them can make the snapshot internally skewed, which is
    /// acceptable for a manual backup of a single-operator shop.
    pub async fn export_snapshot(&self) -> DbResult<BackupSnapshot> {
        let data = BackupTables {
            categories: self.categories().list().await?,
            products: self
                .products()
                .list()
                .await?
                .into_iter()
                .map(|row| row.product)
                .collect(),
            customers: self.customers().list().await?,
            sales: self.sales().list().await?,
            sale_items: self.sales().list_items().await?,
            payments: self.payments().list().await?,
        };

        Ok(BackupSnapshot {
            timestamp: Utc::now(),
            data,
        })
    }
}

/// Deterministic backup file name: `<business-slug>-backup-YYYY-MM-DD.json`.
///
/// "Moonlight Scent" on 2026-08-06 becomes
/// `moonlight-scent-backup-2026-08-06.json`.
pub fn backup_file_name(business_name: &str, date: NaiveDate) -> String {
    format!("{}-backup-{}.json", slug(business_name), date.format("%Y-%m-%d"))
}

/// Lowercases and collapses anything non-alphanumeric into single hyphens.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            out.push('-');
            last_was_hyphen = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use crate::repository::category::generate_category_id;

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(
            backup_file_name("Moonlight Scent", date),
            "moonlight-scent-backup-2026-08-06.json"
        );
        assert_eq!(
            backup_file_name("  Jo's Shop!  ", date),
            "jo-s-shop-backup-2026-08-06.json"
        );
    }

    #[tokio::test]
    async fn test_snapshot_contains_every_table() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let category = moonlight_core::Category {
            id: generate_category_id(),
            name: "Perfumes".to_string(),
            description: None,
            created_at: Utc::now(),
        };
        db.categories().insert(&category).await.unwrap();

        let snapshot = db.export_snapshot().await.unwrap();
        assert_eq!(snapshot.data.categories.len(), 1);
        assert!(snapshot.data.products.is_empty());
        assert!(snapshot.data.customers.is_empty());
        assert!(snapshot.data.sales.is_empty());
        assert!(snapshot.data.sale_items.is_empty());
        assert!(snapshot.data.payments.is_empty());

        // The document round-trips through JSON with the expected keys.
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("timestamp").is_some());
        let data = json.get("data").unwrap();
        for key in [
            "categories",
            "products",
            "customers",
            "sales",
            "sale_items",
            "payments",
        ] {
            assert!(data.get(key).is_some(), "missing table key {key}");
        }
    }
}
