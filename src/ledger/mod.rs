//! Crumb accounting.
//!
//! - `rules`: maps one interaction to its raw crumb delta
//! - `reconcile`: turns that delta into the delta actually persisted
//! - `stats`: the user-visible totals derived from the stored sum

pub mod commands;
pub mod reconcile;
pub mod rules;
pub mod stats;

pub use reconcile::{reconcile, Reconciliation};
pub use rules::calculate_crumbs;
pub use stats::LedgerStats;

/// Size of the bread: the clamped total never leaves `[0, GOAL]`.
pub const GOAL: i64 = 80_000;

/// Clamp a raw crumb sum into the range the user is shown.
pub fn clamp_total(raw: i64) -> i64 {
    raw.clamp(0, GOAL)
}
