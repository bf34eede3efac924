//! # Inventory Service
//!
//! Category and product management: the operations behind the categories
//! and products screens.
//!
//! Image upload is best-effort: a failed upload logs a warning and the
//! product is created without an image. This is the only place an error is
//! deliberately absorbed.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use moonlight_core::validation::{
    validate_name, validate_price_cents, validate_stock_quantity, validate_uuid,
};
use moonlight_core::{Category, Product};
use moonlight_db::{CategoryWithCount, Database};

use crate::error::AppResult;
use crate::media::LocalImageStore;

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category_id: String,
    pub description: Option<String>,
    pub cost_price_cents: i64,
    pub selling_price_cents: i64,
    pub quantity: i64,
    /// Optional image as (file name, bytes); stored best-effort.
    pub image: Option<(String, Vec<u8>)>,
}

/// A product row as the products screen shows it: joined category name plus
/// the derived margin and low-stock flag.
#[derive(Debug, Clone, Serialize)]
pub struct ProductListing {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: String,
    pub profit_margin: f64,
    pub low_stock: bool,
}

/// Category and product management.
#[derive(Debug, Clone)]
pub struct InventoryService {
    db: Database,
    images: Option<LocalImageStore>,
}

impl InventoryService {
    /// Creates the service without an image store; products are created
    /// imageless.
    pub fn new(db: Database) -> Self {
        InventoryService { db, images: None }
    }

    /// Creates the service with an image store for product pictures.
    pub fn with_image_store(db: Database, images: LocalImageStore) -> Self {
        InventoryService {
            db,
            images: Some(images),
        }
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    /// Creates a category. The name is required and unique.
    pub async fn create_category(&self, new: NewCategory) -> AppResult<Category> {
        validate_name("name", &new.name)?;

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            description: new.description.filter(|d| !d.trim().is_empty()),
            created_at: Utc::now(),
        };
        self.db.categories().insert(&category).await?;

        info!(id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Lists categories with their product counts, newest first.
    pub async fn list_categories(&self) -> AppResult<Vec<CategoryWithCount>> {
        Ok(self.db.categories().list_with_counts().await?)
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Creates a product.
    ///
    /// All fields of the form are required: name, category, both prices and
    /// the initial quantity. The image, when provided, is uploaded
    /// best-effort.
    pub async fn create_product(&self, new: NewProduct) -> AppResult<Product> {
        validate_name("name", &new.name)?;
        validate_uuid("category_id", &new.category_id)?;
        validate_price_cents("cost price", new.cost_price_cents)?;
        validate_price_cents("selling price", new.selling_price_cents)?;
        validate_stock_quantity(new.quantity)?;

        let image_url = self.try_upload_image(new.image);

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            category_id: new.category_id,
            name: new.name.trim().to_string(),
            description: new.description.filter(|d| !d.trim().is_empty()),
            cost_price_cents: new.cost_price_cents,
            selling_price_cents: new.selling_price_cents,
            quantity: new.quantity,
            image_url,
            created_at: now,
            updated_at: now,
        };
        self.db.products().insert(&product).await?;

        info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Lists all products the way the products screen shows them.
    pub async fn list_products(&self) -> AppResult<Vec<ProductListing>> {
        let rows = self.db.products().list().await?;

        Ok(rows
            .into_iter()
            .map(|row| ProductListing {
                profit_margin: row.product.profit_margin(),
                low_stock: row.product.is_low_stock(),
                category_name: row.category_name,
                product: row.product,
            })
            .collect())
    }

    /// Updates a product's editable fields (direct edit path; checkout owns
    /// the decrement path).
    pub async fn update_product(&self, product: &Product) -> AppResult<()> {
        validate_name("name", &product.name)?;
        validate_price_cents("cost price", product.cost_price_cents)?;
        validate_price_cents("selling price", product.selling_price_cents)?;
        validate_stock_quantity(product.quantity)?;

        self.db.products().update(product).await?;
        Ok(())
    }

    /// Deletes a product.
    ///
    /// Refused with a referential-constraint error while any sale line item
    /// references it; a never-sold product deletes cleanly.
    pub async fn delete_product(&self, id: &str) -> AppResult<()> {
        self.db.products().delete(id).await?;
        info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Uploads the image if a store is configured, degrading to no image on
    /// any failure.
    fn try_upload_image(&self, image: Option<(String, Vec<u8>)>) -> Option<String> {
        let (file_name, bytes) = image?;
        let store = match &self.images {
            Some(store) => store,
            None => return None,
        };

        match store.upload("product-images", &file_name, &bytes) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, file = %file_name, "Image upload failed; saving product without image");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use moonlight_db::DbConfig;

    async fn service() -> InventoryService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        InventoryService::new(db)
    }

    fn new_product(category_id: &str) -> NewProduct {
        NewProduct {
            name: "Midnight Rose Perfume".to_string(),
            category_id: category_id.to_string(),
            description: Some("Floral, warm".to_string()),
            cost_price_cents: 500_000,
            selling_price_cents: 800_000,
            quantity: 50,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_category_requires_name() {
        let svc = service().await;

        let err = svc
            .create_category(NewCategory {
                name: "   ".to_string(),
                description: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[tokio::test]
    async fn test_create_product_and_listing_derivations() {
        let svc = service().await;
        let category = svc
            .create_category(NewCategory {
                name: "Perfumes".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let mut input = new_product(&category.id);
        input.quantity = 9; // below the threshold
        svc.create_product(input).await.unwrap();

        let listings = svc.list_products().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].category_name, "Perfumes");
        assert!(listings[0].low_stock);
        assert!((listings[0].profit_margin - 37.5).abs() < 1e-9);

        let categories = svc.list_categories().await.unwrap();
        assert_eq!(categories[0].product_count, 1);
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_price() {
        let svc = service().await;
        let category = svc
            .create_category(NewCategory {
                name: "Perfumes".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let mut input = new_product(&category.id);
        input.selling_price_cents = -1;
        let err = svc.create_product(input).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[tokio::test]
    async fn test_image_upload_failure_degrades() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        // A store rooted somewhere unwritable: every upload fails.
        let svc = InventoryService::with_image_store(
            db,
            LocalImageStore::new("/dev/null/not-a-dir"),
        );

        let category = svc
            .create_category(NewCategory {
                name: "Perfumes".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let mut input = new_product(&category.id);
        input.image = Some(("rose.jpg".to_string(), b"bytes".to_vec()));

        // Upload fails, product creation still succeeds, image absent.
        let product = svc.create_product(input).await.unwrap();
        assert!(product.image_url.is_none());
    }

    #[tokio::test]
    async fn test_image_upload_success_sets_url() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let svc = InventoryService::with_image_store(db, LocalImageStore::new(dir.path()));

        let category = svc
            .create_category(NewCategory {
                name: "Perfumes".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let mut input = new_product(&category.id);
        input.image = Some(("rose.jpg".to_string(), b"bytes".to_vec()));

        let product = svc.create_product(input).await.unwrap();
        assert!(product.image_url.unwrap().starts_with("file://"));
    }
}
