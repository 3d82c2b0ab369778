use super::clamp_total;

/// Outcome of reconciling one new interaction against the stored sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    /// Delta produced by the crumb rules.
    pub rule_delta: i64,
    /// Total the user saw before this interaction.
    pub effective_start: i64,
    /// Total the user sees after this interaction.
    pub target_end: i64,
    /// Delta to persist so that the raw sum lands exactly on `target_end`.
    pub required_delta: i64,
}

impl Reconciliation {
    /// True when the persisted delta differs from what the rules asked for,
    /// either because the goal bounds were hit or because earlier drift was absorbed.
    pub fn adjusted(&self) -> bool {
        self.required_delta != self.rule_delta
    }
}

/// Compute the delta to persist for a new interaction.
///
/// `raw_sum` is the sum of every stored crumb value and may sit outside
/// `[0, GOAL]`. The returned `required_delta` always brings the raw sum back
/// to the clamped target, so any drift is corrected by the next write.
pub fn reconcile(raw_sum: i64, rule_delta: i64) -> Reconciliation {
    let effective_start = clamp_total(raw_sum);
    let target_end = clamp_total(effective_start.saturating_add(rule_delta));
    let required_delta = target_end.saturating_sub(raw_sum);

    Reconciliation {
        rule_delta,
        effective_start,
        target_end,
        required_delta,
    }
}
