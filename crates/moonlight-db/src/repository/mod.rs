//! # Repositories
//!
//! One repository per entity, each a thin struct over the shared pool.
//!
//! ## Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Database ──► categories() ──► CategoryRepository                       │
//! │           ──► products()   ──► ProductRepository                        │
//! │           ──► customers()  ──► CustomerRepository                       │
//! │           ──► sales()      ──► SaleRepository                           │
//! │           ──► payments()   ──► PaymentRepository                        │
//! │                                                                         │
//! │  Repositories are created on demand (pool clones are cheap) and hold    │
//! │  no state of their own.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod category;
pub mod customer;
pub mod payment;
pub mod product;
pub mod sale;
