use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;

use crate::catalog::{Coupon, Price};
use crate::ids::generate_id;
use crate::payments::Invoice;

/// List wrapper shared by collection fields and list operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    pub object: String,
    pub data: Vec<T>,
    pub has_more: bool,
    pub url: String,
}

impl<T> List<T> {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            object: "list".to_string(),
            data: Vec::new(),
            has_more: false,
            url: url.into(),
        }
    }
}

/// Subscription lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Incomplete,
    Trialing,
    Active,
    Canceled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trial end: either the literal `"now"` wire marker or a unix timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialEnd {
    Now,
    At(i64),
}

impl TrialEnd {
    pub fn is_now(&self) -> bool {
        matches!(self, TrialEnd::Now)
    }
}

impl Serialize for TrialEnd {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TrialEnd::Now => serializer.serialize_str("now"),
            TrialEnd::At(ts) => serializer.serialize_i64(*ts),
        }
    }
}

impl<'de> Deserialize<'de> for TrialEnd {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Timestamp(i64),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Timestamp(ts) => Ok(TrialEnd::At(ts)),
            Raw::Marker(s) if s == "now" => Ok(TrialEnd::Now),
            Raw::Marker(other) => Err(de::Error::custom(format!("invalid trial_end: {other}"))),
        }
    }
}

/// A priced line on a subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItem {
    pub id: String,
    pub object: String,
    pub subscription: String,
    pub price: Price,
    pub quantity: i64,
    pub created: i64,
}

impl SubscriptionItem {
    pub fn new(subscription: impl Into<String>, price: Price, quantity: i64) -> Self {
        Self {
            id: generate_id("si"),
            object: "subscription_item".to_string(),
            subscription: subscription.into(),
            price,
            quantity,
            created: Utc::now().timestamp(),
        }
    }
}

/// A coupon attached to a subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub object: String,
    pub coupon: Coupon,
    pub subscription: String,
    pub start: i64,
}

impl Discount {
    pub fn new(coupon: Coupon, subscription: impl Into<String>) -> Self {
        Self {
            object: "discount".to_string(),
            coupon,
            subscription: subscription.into(),
            start: Utc::now().timestamp(),
        }
    }
}

/// Destination routing for charges created by the subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferData {
    pub destination: String,
    pub amount_percent: f64,
}

/// The billed relationship between a customer and one or more priced items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub object: String,
    pub customer: String,
    pub status: SubscriptionStatus,
    pub items: List<SubscriptionItem>,
    pub current_period_start: i64,
    pub current_period_end: i64,
    pub billing_cycle_anchor: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<TrialEnd>,
    pub cancel_at_period_end: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_data: Option<TransferData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_invoice: Option<Invoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    pub created: i64,
}

impl Subscription {
    /// Empty shell the lifecycle engine fills in during creation.
    pub fn shell(customer: impl Into<String>) -> Self {
        let id = generate_id("sub");
        let now = Utc::now().timestamp();
        Self {
            items: List::new(format!("/v1/subscription_items?subscription={id}")),
            id,
            object: "subscription".to_string(),
            customer: customer.into(),
            status: SubscriptionStatus::Active,
            current_period_start: now,
            current_period_end: now,
            billing_cycle_anchor: now,
            trial_end: None,
            cancel_at_period_end: false,
            canceled_at: None,
            ended_at: None,
            discount: None,
            default_payment_method: None,
            transfer_data: None,
            latest_invoice: None,
            idempotency_key: None,
            created: now,
        }
    }

    /// Price of the first item, if any.
    pub fn first_price(&self) -> Option<&Price> {
        self.items.data.first().map(|item| &item.price)
    }
}
