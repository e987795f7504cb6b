//! Entity model for the billsim engine.
//!
//! Wire-shaped billing entities (prices, coupons, customers, subscriptions,
//! payment artifacts) shared by the store and the lifecycle engine.

pub mod catalog;
pub mod customers;
pub mod ids;
pub mod payments;
pub mod subscriptions;

pub use catalog::{BillingInterval, Coupon, CouponDuration, Price, Recurring};
pub use customers::{Customer, InvoiceSettings};
pub use ids::generate_id;
pub use payments::{
    CollectionMethod, Invoice, PaymentBehavior, PaymentIntent, PaymentIntentStatus,
};
pub use subscriptions::{
    Discount, List, Subscription, SubscriptionItem, SubscriptionStatus, TransferData, TrialEnd,
};
