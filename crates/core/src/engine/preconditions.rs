//! Trial and payment-method preconditions.

use billsim_types::{
    CollectionMethod, Customer, PaymentBehavior, Price, Subscription, SubscriptionStatus,
};

use crate::error::BillingError;

/// Request-side inputs the checker consults alongside stored state.
pub(crate) struct PaymentContext {
    pub trial_end_requested: bool,
    pub payment_behavior: Option<PaymentBehavior>,
    pub collection_method: Option<CollectionMethod>,
}

/// Whether a price on its own puts the subscription in trial territory:
/// a nonzero trial period, a zero amount, or an explicit trial end.
fn price_defines_trial(price: &Price) -> bool {
    price.trial_period_days.unwrap_or(0) != 0
        || price.unit_amount == 0
        || price.trial_end.is_some()
}

/// Per-item variant: a zero amount alone does not count, and a `"now"`
/// trial end marker is no trial at all.
fn item_price_defines_trial(price: &Price) -> bool {
    price.trial_period_days.unwrap_or(0) != 0
        || price.trial_end.map(|te| !te.is_now()).unwrap_or(false)
}

/// Ensure the customer can actually be charged before the subscription
/// activates. The requirement is waived when the customer already carries a
/// payment method, when any trial applies, or when billing collects by
/// invoice.
///
/// Runs on every create; on update only when a previously free plan starts
/// billing a real amount.
pub(crate) fn verify_payment_source(
    customer: &Customer,
    price: Option<&Price>,
    subscription: &Subscription,
    ctx: &PaymentContext,
) -> Result<(), BillingError> {
    if customer.default_source.is_some() {
        return Ok(());
    }
    if customer.invoice_settings.default_payment_method.is_some() {
        return Ok(());
    }
    if customer.trial_end.is_some() {
        return Ok(());
    }
    if ctx.trial_end_requested {
        return Ok(());
    }
    if ctx.payment_behavior == Some(PaymentBehavior::DefaultIncomplete) {
        return Ok(());
    }
    if subscription.default_payment_method.is_some() {
        return Ok(());
    }
    if price.map(price_defines_trial).unwrap_or(false) {
        return Ok(());
    }
    if subscription.trial_end.map(|te| !te.is_now()).unwrap_or(false) {
        return Ok(());
    }
    if !subscription.items.data.is_empty()
        && subscription
            .items
            .data
            .iter()
            .all(|item| item_price_defines_trial(&item.price))
    {
        return Ok(());
    }
    if ctx.collection_method == Some(CollectionMethod::SendInvoice) {
        return Ok(());
    }

    Err(BillingError::invalid_request(
        "This customer has no attached payment source",
    ))
}

/// Canceled subscriptions are terminal. The vendor contract reports them as
/// missing rather than immutable, so the error is phrased as a lookup miss.
pub(crate) fn ensure_mutable(subscription: &Subscription) -> Result<(), BillingError> {
    if subscription.status == SubscriptionStatus::Canceled {
        return Err(BillingError::invalid_param(
            format!("No such subscription: {}", subscription.id),
            "subscription",
        ));
    }
    Ok(())
}
