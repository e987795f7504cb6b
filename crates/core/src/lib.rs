//! billsim-core — subscription resolution and lifecycle engine.
//!
//! Given request parameters describing a desired subscription state and the
//! stored state of a customer and catalog, the engine computes the resulting
//! subscription record and linked payment artifacts, enforcing the invariants
//! a real billing service would enforce: trial eligibility, payment-method
//! requirements, coupon validity, idempotent retries, cancellation timing.
//!
//! Everything is synchronous, request-scoped logic over an in-memory
//! [`store::BillingStore`]; callers are responsible for serializing access.
//!
//! # Example
//!
//! ```
//! use billsim_core::{BillingStore, CreateSubscriptionParams, SubscriptionEngine};
//! use billsim_types::{Customer, Price};
//!
//! let store = BillingStore::new();
//! store.upsert_price(Price::new("price_free", "usd", 0));
//!
//! let customer = Customer::new();
//! let customer_id = customer.id.clone();
//! store.upsert_customer(customer);
//!
//! let engine = SubscriptionEngine::new(store);
//! let subscription = engine
//!     .create_subscription(CreateSubscriptionParams {
//!         customer: customer_id,
//!         price: Some("price_free".to_string()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! assert_eq!(subscription.status.as_str(), "active");
//! ```

pub mod engine;
pub mod error;
pub mod store;

pub use engine::{
    BillingCycleAnchor, CancelSubscriptionParams, CreateSubscriptionItemParams,
    CreateSubscriptionParams, ListSubscriptionItemsParams, ListSubscriptionsParams,
    SubscriptionEngine, SubscriptionItemParams, TransferDataParams,
    UpdateSubscriptionItemParams, UpdateSubscriptionParams,
};
pub use error::{BillingError, ResourceKind};
pub use store::BillingStore;
