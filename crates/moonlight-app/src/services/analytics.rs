//! # Analytics Service
//!
//! Dashboard stats and the analytics report. Every figure is derived by
//! re-fetching the relevant tables and reducing them at call time; nothing
//! is stored or incrementally maintained. Fine at this data volume.

use std::collections::HashMap;

use serde::Serialize;

use moonlight_core::{Customer, Money, Sale};
use moonlight_db::Database;

use crate::error::AppResult;

/// How many rows the top-N rankings keep.
const TOP_N: usize = 5;

/// The dashboard's stat cards.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    /// Σ sale totals, all time.
    pub total_revenue: Money,
    /// Products currently below the low-stock threshold.
    pub low_stock_products: i64,
    pub total_products: i64,
    /// Σ quantity × cost price over current stock.
    pub inventory_value: Money,
    pub total_categories: i64,
}

/// One row of the top-customers ranking.
#[derive(Debug, Clone, Serialize)]
pub struct TopCustomer {
    #[serde(flatten)]
    pub customer: Customer,
    pub total_spent: Money,
}

/// One row of the top-products ranking.
#[derive(Debug, Clone, Serialize)]
pub struct TopProduct {
    pub product_id: String,
    pub name: String,
    pub total_quantity: i64,
    pub total_revenue: Money,
}

/// The analytics screen's report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub total_revenue: Money,
    /// Σ quantity × cost price over current stock.
    pub inventory_value: Money,
    /// Revenue minus the value of stock currently held. That is how the
    /// analytics screen defines gross profit; it is not cost of goods sold.
    pub gross_profit: Money,
    pub top_customers: Vec<TopCustomer>,
    pub top_products: Vec<TopProduct>,
}

/// Derived-on-read business metrics.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    db: Database,
}

impl AnalyticsService {
    pub fn new(db: Database) -> Self {
        AnalyticsService { db }
    }

    /// The dashboard's stat cards.
    pub async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        let sales = self.db.sales().list().await?;
        let products = self.db.products().list().await?;
        let total_categories = self.db.categories().count().await?;

        let total_revenue: Money = sales.iter().map(Sale::total).sum();
        let low_stock_products = products
            .iter()
            .filter(|row| row.product.is_low_stock())
            .count() as i64;
        let inventory_value: Money = products
            .iter()
            .map(|row| row.product.cost_price().multiply_quantity(row.product.quantity))
            .sum();

        Ok(DashboardStats {
            total_revenue,
            low_stock_products,
            total_products: products.len() as i64,
            inventory_value,
            total_categories,
        })
    }

    /// The analytics report: totals plus the top-5 rankings.
    pub async fn report(&self) -> AppResult<AnalyticsReport> {
        let sales = self.db.sales().list().await?;
        let items = self.db.sales().list_items().await?;
        let products = self.db.products().list().await?;
        let customers = self.db.customers().list().await?;

        let total_revenue: Money = sales.iter().map(Sale::total).sum();
        let inventory_value: Money = products
            .iter()
            .map(|row| row.product.cost_price().multiply_quantity(row.product.quantity))
            .sum();

        // Top customers by lifetime spending.
        let mut spent_by_customer: HashMap<&str, i64> = HashMap::new();
        for sale in &sales {
            if let Some(customer_id) = sale.customer_id.as_deref() {
                *spent_by_customer.entry(customer_id).or_insert(0) += sale.total_cents;
            }
        }
        let mut top_customers: Vec<TopCustomer> = customers
            .into_iter()
            .map(|customer| {
                let spent = spent_by_customer.get(customer.id.as_str()).copied().unwrap_or(0);
                TopCustomer {
                    customer,
                    total_spent: Money::from_cents(spent),
                }
            })
            .collect();
        top_customers.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
        top_customers.truncate(TOP_N);

        // Top products by revenue, accumulated from the sold line items.
        // Names come from the items' snapshots, so products sold and later
        // renamed still report under the name they sold as.
        let mut by_product: HashMap<&str, (String, i64, i64)> = HashMap::new();
        for item in &items {
            let entry = by_product
                .entry(item.product_id.as_str())
                .or_insert_with(|| (item.name_snapshot.clone(), 0, 0));
            entry.1 += item.quantity;
            entry.2 += item.subtotal_cents;
        }
        let mut top_products: Vec<TopProduct> = by_product
            .into_iter()
            .map(|(product_id, (name, quantity, revenue))| TopProduct {
                product_id: product_id.to_string(),
                name,
                total_quantity: quantity,
                total_revenue: Money::from_cents(revenue),
            })
            .collect();
        top_products.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
        top_products.truncate(TOP_N);

        Ok(AnalyticsReport {
            total_revenue,
            inventory_value,
            gross_profit: total_revenue - inventory_value,
            top_customers,
            top_products,
        })
    }
}
