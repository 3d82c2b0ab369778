use crate::db::models::InteractionKind;

/// A conversation only counts once it reaches this many messages.
const CONVERSATION_MIN_MESSAGES: i64 = 5;

/// Calls at least this long (minutes) earn the full reward.
const CALL_MIN_MINUTES: i64 = 5;

const CONVERSATION_CRUMBS: i64 = 1;
const LONG_CALL_CRUMBS: i64 = 5;
const SHORT_CALL_CRUMBS: i64 = 1;

/// Raw crumb delta for a single interaction, before any clamping.
///
/// `magnitude` is a message count for conversations, minutes for calls and
/// the number of crumbs to take away for removals.
pub fn calculate_crumbs(kind: InteractionKind, magnitude: i64) -> i64 {
    match kind {
        // i64::MIN has no positive counterpart; saturate instead of overflowing.
        InteractionKind::Removal => -magnitude.saturating_abs(),
        InteractionKind::Conversation => {
            if magnitude >= CONVERSATION_MIN_MESSAGES {
                CONVERSATION_CRUMBS
            } else {
                0
            }
        }
        InteractionKind::Call => {
            if magnitude >= CALL_MIN_MINUTES {
                LONG_CALL_CRUMBS
            } else {
                SHORT_CALL_CRUMBS
            }
        }
    }
}
