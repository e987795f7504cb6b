//! The subscription merger: combines existing subscription state with
//! resolved inputs into the new record.

use chrono::Utc;

use billsim_types::{
    PaymentBehavior, Subscription, SubscriptionItem, SubscriptionStatus, TransferData, TrialEnd,
};

use super::params::TransferDataParams;
use super::resolver::ResolvedPrice;
use crate::error::BillingError;

/// Whether the merge creates a new record or mutates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MergeOp {
    Create,
    Update,
}

/// Request-side fields the merger consumes, normalized from the operation
/// parameter sets.
pub(crate) struct SubscriptionChanges<'a> {
    pub op: MergeOp,
    pub trial_period_days: Option<i64>,
    pub trial_end: Option<TrialEnd>,
    pub cancel_at_period_end: Option<bool>,
    pub payment_behavior: Option<PaymentBehavior>,
    pub default_payment_method: Option<&'a str>,
    pub transfer_data: Option<&'a TransferDataParams>,
    pub billing_cycle_anchor: Option<i64>,
}

/// Fallback period span when the first price carries no recurring
/// configuration.
const NOMINAL_PERIOD_SECS: i64 = 30 * 24 * 60 * 60;

fn period_end(start: i64, resolved: &[ResolvedPrice]) -> i64 {
    let span = resolved
        .first()
        .and_then(|r| r.price.recurring.as_ref())
        .map(|r| r.interval.seconds() * r.interval_count)
        .unwrap_or(NOMINAL_PERIOD_SECS);
    start + span
}

/// Produce the new subscription state from old state + resolved inputs.
pub(crate) fn apply_subscription_changes(
    subscription: &mut Subscription,
    resolved: &[ResolvedPrice],
    changes: &SubscriptionChanges<'_>,
) -> Result<(), BillingError> {
    let now = Utc::now().timestamp();

    // A nonempty resolution replaces the items collection wholesale; an
    // empty one keeps whatever the subscription already has.
    if !resolved.is_empty() {
        subscription.items.data = resolved
            .iter()
            .map(|r| SubscriptionItem::new(&subscription.id, r.price.clone(), r.quantity))
            .collect();
    }

    match changes.op {
        MergeOp::Create => {
            subscription.current_period_start = now;
            subscription.current_period_end = period_end(now, resolved);
            subscription.billing_cycle_anchor = now;
        }
        MergeOp::Update => {
            // current_period_start is pinned on update; only the anchor
            // field follows the request.
            if let Some(anchor) = changes.billing_cycle_anchor {
                subscription.billing_cycle_anchor = anchor;
            }
        }
    }

    if let Some(trial_end) = changes.trial_end {
        subscription.trial_end = Some(trial_end);
    }

    // Status: create derives once from an ordered decision table, first
    // match wins. Update never recomputes status beyond the trial override;
    // everything else is the cancellation machine's business.
    match changes.op {
        MergeOp::Create => {
            subscription.status = if changes.trial_period_days.is_some() {
                SubscriptionStatus::Trialing
            } else if changes.payment_behavior == Some(PaymentBehavior::DefaultIncomplete) {
                SubscriptionStatus::Incomplete
            } else {
                SubscriptionStatus::Active
            };
        }
        MergeOp::Update => {
            if changes.trial_period_days.is_some() {
                subscription.status = SubscriptionStatus::Trialing;
            }
        }
    }

    // Cancellation intent is tri-state: absent leaves both fields alone.
    match changes.cancel_at_period_end {
        Some(true) => {
            subscription.cancel_at_period_end = true;
            subscription.canceled_at = Some(now);
        }
        Some(false) => {
            subscription.cancel_at_period_end = false;
            subscription.canceled_at = None;
        }
        None => {}
    }

    if let Some(payment_method) = changes.default_payment_method {
        subscription.default_payment_method = Some(payment_method.to_string());
    }

    if let Some(transfer) = changes.transfer_data {
        let destination = transfer
            .destination
            .clone()
            .ok_or_else(|| BillingError::missing_param("transfer_data[destination]"))?;
        subscription.transfer_data = Some(TransferData {
            destination,
            amount_percent: transfer.amount_percent.unwrap_or(100.0),
        });
    }

    Ok(())
}
