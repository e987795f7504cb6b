use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::ids::generate_id;

/// Payment intent status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    Succeeded,
    Canceled,
}

/// Payment attempt created as a side product of subscription activation.
/// The engine sets these fields and hands the record off; it does not own
/// the intent afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub object: String,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentIntentStatus,
    pub created: i64,
}

impl PaymentIntent {
    pub fn new(status: PaymentIntentStatus, amount: i64, currency: impl Into<String>) -> Self {
        Self {
            id: generate_id("pi"),
            object: "payment_intent".to_string(),
            amount,
            currency: currency.into(),
            status,
            created: Utc::now().timestamp(),
        }
    }
}

/// Invoice referencing the payment intent of an activation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_intent: Option<String>,
    pub created: i64,
}

impl Invoice {
    pub fn new(payment_intent: Option<String>) -> Self {
        Self {
            id: generate_id("in"),
            object: "invoice".to_string(),
            payment_intent,
            created: Utc::now().timestamp(),
        }
    }
}

/// How a create request wants incomplete payments handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentBehavior {
    AllowIncomplete,
    DefaultIncomplete,
    ErrorIfIncomplete,
}

/// How invoices are collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionMethod {
    ChargeAutomatically,
    SendInvoice,
}
