//! Cancellation state machine.

use chrono::Utc;

use billsim_types::{Subscription, SubscriptionStatus};

/// Apply a cancellation request to a non-terminal subscription.
///
/// End-of-period cancellation only flags the intent and stamps
/// `canceled_at`; the status is untouched and the subscription stays in the
/// customer's relationship list. Immediate cancellation is terminal: status
/// `canceled`, `ended_at` stamped, and the caller removes the entry from the
/// customer's embedded collection.
///
/// Returns true when the subscription ended immediately.
pub(crate) fn apply_cancellation(subscription: &mut Subscription, at_period_end: bool) -> bool {
    let now = Utc::now().timestamp();
    subscription.canceled_at = Some(now);

    if at_period_end {
        subscription.cancel_at_period_end = true;
        false
    } else {
        subscription.status = SubscriptionStatus::Canceled;
        subscription.cancel_at_period_end = false;
        subscription.ended_at = Some(now);
        true
    }
}
