//! # moonlight-app: Workflow Layer for Moonlight Retail Manager
//!
//! The dashboard's operations without its UI shell. Each service wraps the
//! data layer with the business rules of one screen-family; the sale
//! session is the only stateful object and is owned by its caller.
//!
//! ## Module Organization
//! ```text
//! moonlight_app/
//! ├── lib.rs            ◄─── You are here
//! ├── config.rs         ◄─── Business identity + export dir (env overrides)
//! ├── error.rs          ◄─── AppError { code, message } for every operation
//! ├── media.rs          ◄─── Local stand-in for the binary-upload service
//! └── services/
//!     ├── sale.rs       ◄─── SaleSession: cart + three-step commit + invoice
//!     ├── inventory.rs  ◄─── Categories & products
//!     ├── customer.rs   ◄─── Profiles, balances, payments, reminders
//!     ├── analytics.rs  ◄─── Dashboard stats & top-5 report
//!     └── backup.rs     ◄─── Full-database JSON export
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use moonlight_app::{AppConfig, SaleSession};
//! use moonlight_core::PaymentMethod;
//! use moonlight_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./moonlight.db")).await?;
//! let config = AppConfig::from_env();
//!
//! let mut session = SaleSession::begin(&db).await?;
//! session.add_item(&product_id, 2)?;
//! let completed = session.checkout(None, PaymentMethod::Cash).await?;
//! let invoice = session.invoice(&completed, &config);
//! println!("{}", invoice.render_text());
//! ```

pub mod config;
pub mod error;
pub mod media;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorCode};
pub use media::LocalImageStore;
pub use services::analytics::{AnalyticsReport, AnalyticsService, DashboardStats};
pub use services::backup::BackupService;
pub use services::customer::{CustomerAccount, CustomerService, NewCustomer};
pub use services::inventory::{InventoryService, NewCategory, NewProduct, ProductListing};
pub use services::sale::{export_invoice, CheckoutState, CompletedSale, SaleSession};
