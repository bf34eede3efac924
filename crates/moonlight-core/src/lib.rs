//! # moonlight-core: Pure Business Logic for Moonlight Retail Manager
//!
//! This crate is the **heart** of the retail manager. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Moonlight Retail Manager Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  moonlight-app (workflows)                      │   │
//! │  │   SaleSession ─ Inventory ─ Customers ─ Analytics ─ Backup      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ moonlight-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐ ┌───────────┐ ┌───────────┐ ┌───────────────┐  │   │
//! │  │   │   types   │ │   money   │ │   cart    │ │   invoice     │  │   │
//! │  │   │  Product  │ │   Money   │ │   Cart    │ │   renderer    │  │   │
//! │  │   │   Sale    │ │  (kobo)   │ │ CartLine  │ │               │  │   │
//! │  │   └───────────┘ └───────────┘ └───────────┘ └───────────────┘  │   │
//! │  │   ┌───────────┐ ┌───────────┐ ┌───────────┐                    │   │
//! │  │   │  balance  │ │   stock   │ │ reminder  │                    │   │
//! │  │   └───────────┘ └───────────┘ └───────────┘                    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 moonlight-db (Database Layer)                   │   │
//! │  │           SQLite queries, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Customer, Sale, Payment)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The in-progress sale cart (explicit session object)
//! - [`stock`] - The stock availability predicate
//! - [`balance`] - Outstanding balance math and payment acceptance
//! - [`invoice`] - Invoice assembly and plain-text rendering
//! - [`reminder`] - Balance reminder message and WhatsApp deep link
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are minor units (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod balance;
pub mod cart;
pub mod error;
pub mod invoice;
pub mod money;
pub mod reminder;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use moonlight_core::Money` instead of
// `use moonlight_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{BusinessInfo, Invoice};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// A product with fewer units than this on hand is flagged as low stock.
///
/// Exercised at the boundaries: 9 units is low stock, 10 is not.
pub const LOW_STOCK_THRESHOLD: i64 = 10;
