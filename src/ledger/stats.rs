use serde::{Deserialize, Serialize};

use super::{clamp_total, GOAL};

/// Totals exposed to clients. `total_crumbs` is always within `[0, goal]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_crumbs: i64,
    pub goal: i64,
    pub percent: f64,
}

impl LedgerStats {
    pub fn from_raw_sum(raw_sum: i64) -> Self {
        let total_crumbs = clamp_total(raw_sum);
        Self {
            total_crumbs,
            goal: GOAL,
            percent: total_crumbs as f64 / GOAL as f64 * 100.0,
        }
    }
}
