//! Coupon validation and discount attachment.

use billsim_types::{Discount, Subscription};

use crate::error::BillingError;
use crate::store::BillingStore;

/// Apply a requested coupon id to the subscription.
///
/// An empty id clears the discount — an update-only affordance; on create
/// the empty id falls through to the miss arm. A miss is deliberately a
/// direct catalog read surfaced as an invalid request, not a missing
/// resource: the vendor contract reports unknown coupons as bad input.
pub(crate) fn apply_coupon(
    store: &BillingStore,
    subscription: &mut Subscription,
    coupon_id: &str,
    allow_clear: bool,
) -> Result<(), BillingError> {
    if coupon_id.is_empty() && allow_clear {
        subscription.discount = None;
        return Ok(());
    }

    match store.coupon(coupon_id) {
        Some(coupon) => {
            subscription.discount = Some(Discount::new(coupon, &subscription.id));
            Ok(())
        }
        None => Err(BillingError::invalid_param(
            format!("No such coupon: {coupon_id}"),
            "coupon",
        )),
    }
}
