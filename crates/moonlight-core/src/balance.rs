//! # Balance Calculator
//!
//! Derives a customer's outstanding balance from their lifetime sales and
//! payments. Used by the customer listing, the payment dialog and the
//! reminder message.
//!
//! The figure is recomputed from the fetched rows on every read; nothing is
//! stored. Acceptable at this data volume; an incremental aggregate would be
//! a scale-out change, not part of this contract.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Payment, Sale};
use crate::validation::validate_payment_amount;

/// Outstanding balance: Σ sale totals − Σ payment amounts.
///
/// The calculation does not clamp. The payment rule in
/// [`validate_payment`] keeps the balance non-negative by construction,
/// but a payment inserted out of band can exceed lifetime sales; the
/// resulting negative balance must render as such, not be floored.
pub fn outstanding_balance(sales: &[Sale], payments: &[Payment]) -> Money {
    let sold: Money = sales.iter().map(Sale::total).sum();
    let paid: Money = payments.iter().map(Payment::amount).sum();
    sold - paid
}

/// Same derivation from pre-aggregated totals, for callers that already
/// summed the rows (the customer listing reduces per customer).
#[inline]
pub fn outstanding_balance_cents(sales_total_cents: i64, payments_total_cents: i64) -> Money {
    Money::from_cents(sales_total_cents - payments_total_cents)
}

/// Checks a payment against the balance computed at submission time.
///
/// Accepted iff `0 < amount ≤ balance`. An amount exactly equal to the
/// balance settles the account; one unit above is rejected.
///
/// The balance is whatever the caller just fetched; there is no storage-side
/// re-validation, so a concurrent sale or payment can slip between the check
/// and the insert. Known trust-boundary gap, kept as observed behavior.
pub fn validate_payment(amount: Money, balance: Money) -> CoreResult<()> {
    validate_payment_amount(amount.cents())?;

    if amount > balance {
        return Err(CoreError::PaymentExceedsBalance {
            balance: balance.to_string(),
            amount: amount.to_string(),
        });
    }

    Ok(())
}
