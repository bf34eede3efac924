//! # Services
//!
//! One service per screen-family of the dashboard:
//!
//! - [`sale`] - the sale session, the three-step commit, invoice export
//! - [`inventory`] - categories and products
//! - [`customer`] - profiles, balances, payments, reminders
//! - [`analytics`] - dashboard stats and the analytics report
//! - [`backup`] - full-database export

pub mod analytics;
pub mod backup;
pub mod customer;
pub mod inventory;
pub mod sale;
