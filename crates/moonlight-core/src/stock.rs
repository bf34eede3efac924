//! # Stock Check
//!
//! The single predicate that decides whether a requested quantity can be
//! fulfilled from known stock.
//!
//! ## Known Limitation: Snapshot Staleness
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stock is checked against the quantity fetched at session start, at     │
//! │  add-to-cart time ONLY. Checkout does NOT re-read live stock before     │
//! │  decrementing, and the decrement itself is last-writer-wins.            │
//! │                                                                         │
//! │  Session A: fetch qty=10 ── add 8 ── checkout ── write qty=2            │
//! │  Session B: fetch qty=10 ── add 8 ── checkout ── write qty=2  (!)       │
//! │                                                                         │
//! │  Two concurrent sessions can therefore oversell the same product.       │
//! │  This is an accepted limitation of the single-operator design, kept     │
//! │  deliberately rather than hidden behind ad-hoc locking.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

/// Returns true when `requested` units can be taken from `on_hand` stock.
///
/// Pure function of its two arguments. Non-positive requests never pass.
#[inline]
pub const fn can_fulfill(requested: i64, on_hand: i64) -> bool {
    requested > 0 && requested <= on_hand
}
