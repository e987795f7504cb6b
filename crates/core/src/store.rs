//! In-memory billing registries.
//!
//! Process-wide registries for catalog entities, customers, subscriptions,
//! and payment artifacts, keyed by id with insertion order preserved. The
//! store only reads and writes records; existence checks and their error
//! phrasing belong to the engine.
//!
//! Access is request-scoped and synchronous: callers serialize operations,
//! since the engine performs read-modify-write sequences across the
//! subscription and customer registries that are not atomic.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, info};

use billsim_types::{Coupon, Customer, Invoice, PaymentIntent, Price, Subscription};

/// Shared registries for every entity class the engine touches.
#[derive(Default)]
pub struct BillingStore {
    customers: RwLock<IndexMap<String, Customer>>,
    subscriptions: RwLock<IndexMap<String, Subscription>>,
    prices: RwLock<IndexMap<String, Price>>,
    coupons: RwLock<IndexMap<String, Coupon>>,
    payment_intents: RwLock<IndexMap<String, PaymentIntent>>,
    invoices: RwLock<IndexMap<String, Invoice>>,
}

impl BillingStore {
    /// Create a new empty store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn upsert_price(&self, price: Price) {
        debug!(price = %price.id, "Upserted price");
        self.prices.write().insert(price.id.clone(), price);
    }

    pub fn delete_price(&self, id: &str) -> bool {
        self.prices.write().shift_remove(id).is_some()
    }

    pub fn price(&self, id: &str) -> Option<Price> {
        self.prices.read().get(id).cloned()
    }

    pub fn upsert_coupon(&self, coupon: Coupon) {
        debug!(coupon = %coupon.id, "Upserted coupon");
        self.coupons.write().insert(coupon.id.clone(), coupon);
    }

    pub fn delete_coupon(&self, id: &str) -> bool {
        self.coupons.write().shift_remove(id).is_some()
    }

    pub fn coupon(&self, id: &str) -> Option<Coupon> {
        self.coupons.read().get(id).cloned()
    }

    pub fn upsert_customer(&self, customer: Customer) {
        debug!(customer = %customer.id, "Upserted customer");
        self.customers.write().insert(customer.id.clone(), customer);
    }

    pub fn customer(&self, id: &str) -> Option<Customer> {
        self.customers.read().get(id).cloned()
    }

    pub fn put_subscription(&self, subscription: Subscription) {
        info!(
            subscription = %subscription.id,
            status = %subscription.status,
            "Stored subscription"
        );
        self.subscriptions
            .write()
            .insert(subscription.id.clone(), subscription);
    }

    pub fn subscription(&self, id: &str) -> Option<Subscription> {
        self.subscriptions.read().get(id).cloned()
    }

    /// Snapshot of every subscription in insertion order.
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.subscriptions.read().values().cloned().collect()
    }

    /// The subscription created under the given idempotency key, if any.
    pub fn subscription_by_idempotency_key(&self, key: &str) -> Option<Subscription> {
        self.subscriptions
            .read()
            .values()
            .find(|subscription| subscription.idempotency_key.as_deref() == Some(key))
            .cloned()
    }

    pub fn put_payment_intent(&self, intent: PaymentIntent) {
        debug!(payment_intent = %intent.id, "Stored payment intent");
        self.payment_intents.write().insert(intent.id.clone(), intent);
    }

    pub fn payment_intent(&self, id: &str) -> Option<PaymentIntent> {
        self.payment_intents.read().get(id).cloned()
    }

    pub fn put_invoice(&self, invoice: Invoice) {
        debug!(invoice = %invoice.id, "Stored invoice");
        self.invoices.write().insert(invoice.id.clone(), invoice);
    }

    pub fn invoice(&self, id: &str) -> Option<Invoice> {
        self.invoices.read().get(id).cloned()
    }

    /// Drop every record. Used between test runs.
    pub fn clear(&self) {
        self.customers.write().clear();
        self.subscriptions.write().clear();
        self.prices.write().clear();
        self.coupons.write().clear();
        self.payment_intents.write().clear();
        self.invoices.write().clear();
    }
}
