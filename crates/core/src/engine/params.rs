//! Request parameter sets for the engine operations.
//!
//! Reference fields (`customer`, `price`, coupon ids) arrive already
//! normalized to plain ids; id-or-object duck typing is a boundary concern
//! and never reaches the engine.

use serde::{Deserialize, Deserializer, de};

use billsim_types::{CollectionMethod, PaymentBehavior, TrialEnd};

/// One entry of the `items` collection on create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionItemParams {
    pub price: String,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Requested charge routing. `destination` is validated by the merger.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferDataParams {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub amount_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSubscriptionParams {
    pub customer: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub items: Vec<SubscriptionItemParams>,
    #[serde(default)]
    pub coupon: Option<String>,
    #[serde(default)]
    pub trial_period_days: Option<i64>,
    #[serde(default)]
    pub trial_end: Option<TrialEnd>,
    #[serde(default)]
    pub cancel_at_period_end: Option<bool>,
    #[serde(default)]
    pub payment_behavior: Option<PaymentBehavior>,
    #[serde(default)]
    pub collection_method: Option<CollectionMethod>,
    #[serde(default)]
    pub default_payment_method: Option<String>,
    #[serde(default)]
    pub transfer_data: Option<TransferDataParams>,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// Billing cycle anchor: the literal `"now"` wire marker or a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingCycleAnchor {
    Now,
    At(i64),
}

impl<'de> Deserialize<'de> for BillingCycleAnchor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Timestamp(i64),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Timestamp(ts) => Ok(BillingCycleAnchor::At(ts)),
            Raw::Marker(s) if s == "now" => Ok(BillingCycleAnchor::Now),
            Raw::Marker(other) => Err(de::Error::custom(format!(
                "invalid billing_cycle_anchor: {other}"
            ))),
        }
    }
}

/// Mutations applied to an existing subscription.
///
/// `cancel_at_period_end` is tri-state: absent, true, and false are three
/// distinct behaviors. `coupon` set to the empty string clears an existing
/// discount.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubscriptionParams {
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub items: Vec<SubscriptionItemParams>,
    #[serde(default)]
    pub coupon: Option<String>,
    #[serde(default)]
    pub trial_period_days: Option<i64>,
    #[serde(default)]
    pub trial_end: Option<TrialEnd>,
    #[serde(default)]
    pub cancel_at_period_end: Option<bool>,
    #[serde(default)]
    pub payment_behavior: Option<PaymentBehavior>,
    #[serde(default)]
    pub collection_method: Option<CollectionMethod>,
    #[serde(default)]
    pub default_payment_method: Option<String>,
    #[serde(default)]
    pub billing_cycle_anchor: Option<BillingCycleAnchor>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CancelSubscriptionParams {
    #[serde(default)]
    pub at_period_end: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSubscriptionsParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub starting_after: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSubscriptionItemParams {
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubscriptionItemParams {
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSubscriptionItemsParams {
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub starting_after: Option<String>,
}
