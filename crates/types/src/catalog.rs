use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::subscriptions::TrialEnd;

/// Billing interval for recurring prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    Day,
    Week,
    Month,
    Year,
}

impl BillingInterval {
    /// Nominal span of one interval in seconds. Fixed approximations; exact
    /// calendar math is out of scope for the simulation.
    pub fn seconds(&self) -> i64 {
        match self {
            BillingInterval::Day => 24 * 60 * 60,
            BillingInterval::Week => 7 * 24 * 60 * 60,
            BillingInterval::Month => 30 * 24 * 60 * 60,
            BillingInterval::Year => 365 * 24 * 60 * 60,
        }
    }
}

/// Recurring configuration on a price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurring {
    pub interval: BillingInterval,
    pub interval_count: i64,
}

/// Immutable catalog price entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: String,
    pub object: String,
    pub active: bool,
    pub currency: String,
    pub unit_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurring>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_period_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<TrialEnd>,
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
    pub created: i64,
}

impl Price {
    pub fn new(id: impl Into<String>, currency: impl Into<String>, unit_amount: i64) -> Self {
        Self {
            id: id.into(),
            object: "price".to_string(),
            active: true,
            currency: currency.into(),
            unit_amount,
            nickname: None,
            recurring: None,
            trial_period_days: None,
            trial_end: None,
            metadata: IndexMap::new(),
            created: Utc::now().timestamp(),
        }
    }
}

/// Coupon duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponDuration {
    Forever,
    Once,
    Repeating,
}

/// Catalog coupon entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_off: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_off: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub duration: CouponDuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_months: Option<i64>,
    pub valid: bool,
    pub created: i64,
}

impl Coupon {
    pub fn new(id: impl Into<String>, duration: CouponDuration) -> Self {
        Self {
            id: id.into(),
            object: "coupon".to_string(),
            percent_off: None,
            amount_off: None,
            currency: None,
            duration,
            duration_in_months: None,
            valid: true,
            created: Utc::now().timestamp(),
        }
    }
}
