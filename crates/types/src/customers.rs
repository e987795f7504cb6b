use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::generate_id;
use crate::subscriptions::{List, Subscription};

/// Invoice defaults carried on the customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_payment_method: Option<String>,
}

/// A billable customer with its embedded subscription collection.
///
/// The embedded `subscriptions` list mirrors the authoritative subscription
/// store for this customer: no duplicate ids, entries removed on immediate
/// cancellation, left in place on end-of-period cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_source: Option<String>,
    #[serde(default)]
    pub invoice_settings: InvoiceSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<i64>,
    pub subscriptions: List<Subscription>,
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
    pub created: i64,
}

impl Customer {
    pub fn new() -> Self {
        let id = generate_id("cus");
        Self {
            subscriptions: List::new(format!("/v1/customers/{id}/subscriptions")),
            id,
            object: "customer".to_string(),
            email: None,
            name: None,
            default_source: None,
            invoice_settings: InvoiceSettings::default(),
            trial_end: None,
            metadata: IndexMap::new(),
            created: Utc::now().timestamp(),
        }
    }
}

impl Default for Customer {
    fn default() -> Self {
        Self::new()
    }
}
