//! # moonlight-db: Database Layer for Moonlight Retail Manager
//!
//! This crate provides database access for the retail manager.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Data Flow                                        │
//! │                                                                         │
//! │  Workflow (moonlight-app: checkout, payment, analytics, backup)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   moonlight-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │ Repositories  │    │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │◄───│ per entity    │    │  (embedded)  │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL mode, foreign keys ON)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (category, product, ...)
//! - [`export`] - Full-database backup snapshot
//!
//! ## Usage
//!
//! ```rust,ignore
//! use moonlight_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/moonlight.db")).await?;
//! let products = db.products().list_in_stock().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use export::{backup_file_name, BackupSnapshot, BackupTables};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::{CategoryRepository, CategoryWithCount};
pub use repository::customer::CustomerRepository;
pub use repository::payment::PaymentRepository;
pub use repository::product::{ProductRepository, ProductWithCategory};
pub use repository::sale::SaleRepository;
