//! Subscription resolution and lifecycle engine.
//!
//! Operations enter here, resolve their price inputs, merge them with
//! existing state, run the coupon and payment-precondition checks, and only
//! then persist — a failure anywhere aborts with nothing written.

mod cancellation;
mod discount;
mod items;
mod merge;
mod params;
mod preconditions;
mod query;
mod resolver;

pub use params::{
    BillingCycleAnchor, CancelSubscriptionParams, CreateSubscriptionItemParams,
    CreateSubscriptionParams, ListSubscriptionItemsParams, ListSubscriptionsParams,
    SubscriptionItemParams, TransferDataParams, UpdateSubscriptionItemParams,
    UpdateSubscriptionParams,
};

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use billsim_types::{
    Customer, Invoice, List, PaymentIntent, PaymentIntentStatus, Subscription, SubscriptionStatus,
};

use crate::error::{BillingError, ResourceKind};
use crate::store::BillingStore;
use cancellation::apply_cancellation;
use discount::apply_coupon;
use merge::{MergeOp, SubscriptionChanges, apply_subscription_changes};
use preconditions::{PaymentContext, ensure_mutable, verify_payment_source};
use resolver::resolve_prices;

/// The lifecycle engine. Every operation is synchronous, request-scoped
/// logic over the shared registries; callers serialize access.
pub struct SubscriptionEngine {
    store: Arc<BillingStore>,
}

impl SubscriptionEngine {
    pub fn new(store: Arc<BillingStore>) -> Self {
        Self { store }
    }

    /// The underlying registries, e.g. for catalog seeding.
    pub fn store(&self) -> &BillingStore {
        &self.store
    }

    /// Create a subscription for a customer.
    pub fn create_subscription(
        &self,
        params: CreateSubscriptionParams,
    ) -> Result<Subscription, BillingError> {
        // Replays of a keyed create are answered from the store before any
        // other work happens: no new entity, no side effects, no
        // re-validation.
        if let Some(key) = params.idempotency_key.as_deref() {
            if let Some(existing) = self.store.subscription_by_idempotency_key(key) {
                debug!(subscription = %existing.id, "Idempotent create replay");
                return Ok(existing);
            }
        }

        let resolved = resolve_prices(&self.store, params.price.as_deref(), &params.items)?;
        if resolved.is_empty() {
            return Err(BillingError::missing_param("items"));
        }

        let mut customer = self
            .store
            .customer(&params.customer)
            .ok_or_else(|| BillingError::not_found(ResourceKind::Customer, &params.customer))?;

        let mut subscription = Subscription::shell(&customer.id);
        subscription.idempotency_key = params.idempotency_key.clone();

        let changes = SubscriptionChanges {
            op: MergeOp::Create,
            trial_period_days: params.trial_period_days,
            trial_end: params.trial_end,
            cancel_at_period_end: params.cancel_at_period_end,
            payment_behavior: params.payment_behavior,
            default_payment_method: params.default_payment_method.as_deref(),
            transfer_data: params.transfer_data.as_ref(),
            billing_cycle_anchor: None,
        };
        apply_subscription_changes(&mut subscription, &resolved, &changes)?;

        if let Some(coupon_id) = params.coupon.as_deref() {
            apply_coupon(&self.store, &mut subscription, coupon_id, false)?;
        }

        let ctx = PaymentContext {
            trial_end_requested: params.trial_end.is_some(),
            payment_behavior: params.payment_behavior,
            collection_method: params.collection_method,
        };
        verify_payment_source(
            &customer,
            resolved.first().map(|r| &r.price),
            &subscription,
            &ctx,
        )?;

        // Activation artifacts: trialing subscriptions get no payment
        // intent; everything else gets one reflecting the derived status.
        // The invoice is created either way.
        let payment_intent = if subscription.status != SubscriptionStatus::Trialing {
            let status = if subscription.status == SubscriptionStatus::Incomplete {
                PaymentIntentStatus::RequiresPaymentMethod
            } else {
                PaymentIntentStatus::Succeeded
            };
            let first = &resolved[0].price;
            let intent = PaymentIntent::new(status, first.unit_amount, &first.currency);
            self.store.put_payment_intent(intent.clone());
            Some(intent)
        } else {
            None
        };
        let invoice = Invoice::new(payment_intent.map(|intent| intent.id));
        self.store.put_invoice(invoice.clone());
        subscription.latest_invoice = Some(invoice);

        attach_subscription(&mut customer, &subscription);
        self.store.put_subscription(subscription.clone());
        self.store.upsert_customer(customer);

        info!(
            subscription = %subscription.id,
            customer = %subscription.customer,
            status = %subscription.status,
            "Created subscription"
        );
        Ok(subscription)
    }

    /// Retrieve a subscription by id, canceled ones included.
    pub fn retrieve_subscription(&self, id: &str) -> Result<Subscription, BillingError> {
        self.store
            .subscription(id)
            .ok_or_else(|| BillingError::not_found(ResourceKind::Subscription, id))
    }

    /// Mutate an existing, non-canceled subscription in place.
    pub fn update_subscription(
        &self,
        id: &str,
        params: UpdateSubscriptionParams,
    ) -> Result<Subscription, BillingError> {
        let mut subscription = self.retrieve_subscription(id)?;
        ensure_mutable(&subscription)?;

        let mut customer = self.store.customer(&subscription.customer).ok_or_else(|| {
            BillingError::not_found(ResourceKind::Customer, &subscription.customer)
        })?;

        let resolved = resolve_prices(&self.store, params.price.as_deref(), &params.items)?;

        let previous_amount = subscription.first_price().map(|price| price.unit_amount);

        let anchor = params.billing_cycle_anchor.map(|anchor| match anchor {
            BillingCycleAnchor::Now => Utc::now().timestamp(),
            BillingCycleAnchor::At(ts) => ts,
        });

        let changes = SubscriptionChanges {
            op: MergeOp::Update,
            trial_period_days: params.trial_period_days,
            trial_end: params.trial_end,
            cancel_at_period_end: params.cancel_at_period_end,
            payment_behavior: params.payment_behavior,
            default_payment_method: params.default_payment_method.as_deref(),
            transfer_data: None,
            billing_cycle_anchor: anchor,
        };
        apply_subscription_changes(&mut subscription, &resolved, &changes)?;

        if let Some(coupon_id) = params.coupon.as_deref() {
            apply_coupon(&self.store, &mut subscription, coupon_id, true)?;
        }

        // A plan that used to be free and now bills a real amount re-runs
        // the payment precondition.
        let new_amount = subscription.first_price().map(|price| price.unit_amount);
        if previous_amount == Some(0) && new_amount.map(|amount| amount > 0).unwrap_or(false) {
            let ctx = PaymentContext {
                trial_end_requested: params.trial_end.is_some(),
                payment_behavior: params.payment_behavior,
                collection_method: params.collection_method,
            };
            verify_payment_source(
                &customer,
                resolved.first().map(|r| &r.price),
                &subscription,
                &ctx,
            )?;
        }

        replace_subscription(&mut customer, &subscription);
        self.store.put_subscription(subscription.clone());
        self.store.upsert_customer(customer);

        Ok(subscription)
    }

    /// Cancel a subscription, immediately or at period end.
    pub fn cancel_subscription(
        &self,
        id: &str,
        params: CancelSubscriptionParams,
    ) -> Result<Subscription, BillingError> {
        let mut subscription = self.retrieve_subscription(id)?;
        ensure_mutable(&subscription)?;

        let mut customer = self.store.customer(&subscription.customer).ok_or_else(|| {
            BillingError::not_found(ResourceKind::Customer, &subscription.customer)
        })?;

        let at_period_end = params.at_period_end.unwrap_or(false);
        let ended = apply_cancellation(&mut subscription, at_period_end);

        if ended {
            // The authoritative store keeps the record; only the customer's
            // relationship list drops it.
            detach_subscription(&mut customer, &subscription.id);
        } else {
            refresh_subscription(&mut customer, &subscription);
        }

        self.store.put_subscription(subscription.clone());
        self.store.upsert_customer(customer);

        info!(
            subscription = %subscription.id,
            at_period_end,
            "Canceled subscription"
        );
        Ok(subscription)
    }

    /// List subscriptions, filtered and paginated.
    pub fn list_subscriptions(&self, params: ListSubscriptionsParams) -> List<Subscription> {
        query::filter_subscriptions(self.store.subscriptions(), &params)
    }
}

/// Append a newly created subscription to the customer's embedded list.
fn attach_subscription(customer: &mut Customer, subscription: &Subscription) {
    customer.subscriptions.data.push(subscription.clone());
}

/// Replace the customer's snapshot of an updated subscription: removal is a
/// filter, the append puts it last, and the collection never holds two
/// entries with the same id.
fn replace_subscription(customer: &mut Customer, subscription: &Subscription) {
    customer
        .subscriptions
        .data
        .retain(|entry| entry.id != subscription.id);
    customer.subscriptions.data.push(subscription.clone());
}

/// Overwrite the customer's snapshot in place, keeping its position.
fn refresh_subscription(customer: &mut Customer, subscription: &Subscription) {
    if let Some(entry) = customer
        .subscriptions
        .data
        .iter_mut()
        .find(|entry| entry.id == subscription.id)
    {
        *entry = subscription.clone();
    }
}

/// Drop the subscription from the customer's embedded list.
fn detach_subscription(customer: &mut Customer, subscription_id: &str) {
    customer
        .subscriptions
        .data
        .retain(|entry| entry.id != subscription_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use billsim_types::{Coupon, CouponDuration, Price, TrialEnd};

    fn engine() -> SubscriptionEngine {
        let store = BillingStore::new();
        store.upsert_price(Price::new("price_free", "usd", 0));
        store.upsert_price(Price::new("price_silver", "usd", 500));
        store.upsert_price(Price::new("price_gold", "usd", 900));
        store.upsert_coupon(Coupon::new("SAVE20", CouponDuration::Forever));
        SubscriptionEngine::new(store)
    }

    fn customer_without_source(engine: &SubscriptionEngine) -> String {
        let customer = Customer::new();
        let id = customer.id.clone();
        engine.store().upsert_customer(customer);
        id
    }

    fn customer_with_source(engine: &SubscriptionEngine) -> String {
        let mut customer = Customer::new();
        customer.default_source = Some("card_visa".to_string());
        let id = customer.id.clone();
        engine.store().upsert_customer(customer);
        id
    }

    fn create(engine: &SubscriptionEngine, customer: &str, price: &str) -> Subscription {
        engine
            .create_subscription(CreateSubscriptionParams {
                customer: customer.to_string(),
                price: Some(price.to_string()),
                ..Default::default()
            })
            .unwrap()
    }

    #[test]
    fn test_create_active_subscription_with_payment_intent() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);

        let subscription = create(&engine, &customer_id, "price_silver");

        assert_eq!(subscription.status, SubscriptionStatus::Active);
        assert_eq!(subscription.items.data.len(), 1);
        assert_eq!(subscription.items.data[0].price.id, "price_silver");

        let invoice = subscription.latest_invoice.as_ref().unwrap();
        let intent_id = invoice.payment_intent.as_deref().unwrap();
        let intent = engine.store().payment_intent(intent_id).unwrap();
        assert_eq!(intent.status, PaymentIntentStatus::Succeeded);
        assert_eq!(intent.amount, 500);
        assert_eq!(intent.currency, "usd");

        // Stored and reflected into the customer's embedded collection.
        assert_eq!(
            engine.store().subscription(&subscription.id).unwrap().id,
            subscription.id
        );
        let customer = engine.store().customer(&customer_id).unwrap();
        assert_eq!(customer.subscriptions.data.len(), 1);
        assert_eq!(customer.subscriptions.data[0].id, subscription.id);
    }

    #[test]
    fn test_create_without_payment_source_fails() {
        let engine = engine();
        let customer_id = customer_without_source(&engine);

        let err = engine
            .create_subscription(CreateSubscriptionParams {
                customer: customer_id.clone(),
                price: Some("price_silver".to_string()),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "This customer has no attached payment source"
        );
        // Nothing persisted.
        assert!(engine.store().subscriptions().is_empty());
        let customer = engine.store().customer(&customer_id).unwrap();
        assert!(customer.subscriptions.data.is_empty());
    }

    #[test]
    fn test_create_free_price_succeeds_without_source() {
        let engine = engine();
        let customer_id = customer_without_source(&engine);

        let subscription = create(&engine, &customer_id, "price_free");

        // The free price waives the precondition but status derivation still
        // yields active, and a succeeded zero-amount intent is created.
        assert_eq!(subscription.status, SubscriptionStatus::Active);
        let invoice = subscription.latest_invoice.as_ref().unwrap();
        let intent = engine
            .store()
            .payment_intent(invoice.payment_intent.as_deref().unwrap())
            .unwrap();
        assert_eq!(intent.status, PaymentIntentStatus::Succeeded);
        assert_eq!(intent.amount, 0);
    }

    #[test]
    fn test_create_trialing_skips_payment_intent() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);

        let subscription = engine
            .create_subscription(CreateSubscriptionParams {
                customer: customer_id,
                price: Some("price_silver".to_string()),
                trial_period_days: Some(14),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(subscription.status, SubscriptionStatus::Trialing);
        let invoice = subscription.latest_invoice.as_ref().unwrap();
        assert!(invoice.payment_intent.is_none());
        assert!(engine.store().invoice(&invoice.id).is_some());
    }

    #[test]
    fn test_create_default_incomplete() {
        let engine = engine();
        let customer_id = customer_without_source(&engine);

        let subscription = engine
            .create_subscription(CreateSubscriptionParams {
                customer: customer_id,
                price: Some("price_silver".to_string()),
                payment_behavior: Some(billsim_types::PaymentBehavior::DefaultIncomplete),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(subscription.status, SubscriptionStatus::Incomplete);
        let invoice = subscription.latest_invoice.as_ref().unwrap();
        let intent = engine
            .store()
            .payment_intent(invoice.payment_intent.as_deref().unwrap())
            .unwrap();
        assert_eq!(intent.status, PaymentIntentStatus::RequiresPaymentMethod);
    }

    #[test]
    fn test_create_requires_items() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);

        let err = engine
            .create_subscription(CreateSubscriptionParams {
                customer: customer_id,
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(err.to_string(), "Missing required param: items.");
    }

    #[test]
    fn test_create_unknown_customer() {
        let engine = engine();
        let err = engine
            .create_subscription(CreateSubscriptionParams {
                customer: "cus_ghost".to_string(),
                price: Some("price_silver".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "No such customer: cus_ghost");
    }

    #[test]
    fn test_create_unknown_coupon_persists_nothing() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);

        let err = engine
            .create_subscription(CreateSubscriptionParams {
                customer: customer_id.clone(),
                price: Some("price_silver".to_string()),
                coupon: Some("BOGUS".to_string()),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(err.to_string(), "No such coupon: BOGUS");
        assert!(engine.store().subscriptions().is_empty());
    }

    #[test]
    fn test_idempotent_create_replays() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);

        let params = CreateSubscriptionParams {
            customer: customer_id.clone(),
            price: Some("price_silver".to_string()),
            idempotency_key: Some("retry-token".to_string()),
            ..Default::default()
        };

        let first = engine.create_subscription(params.clone()).unwrap();
        let second = engine.create_subscription(params).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(engine.store().subscriptions().len(), 1);
        let customer = engine.store().customer(&customer_id).unwrap();
        assert_eq!(customer.subscriptions.data.len(), 1);
    }

    #[test]
    fn test_idempotent_replay_skips_validation() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);

        let params = CreateSubscriptionParams {
            customer: customer_id,
            price: Some("price_silver".to_string()),
            idempotency_key: Some("retry-token".to_string()),
            ..Default::default()
        };
        let first = engine.create_subscription(params.clone()).unwrap();

        // The price disappearing from the catalog does not matter on
        // replay: deduplication runs before any other create-flow work.
        engine.store().delete_price("price_silver");
        let second = engine.create_subscription(params).unwrap();
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn test_update_replaces_items_and_keeps_period_start() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);
        let subscription = create(&engine, &customer_id, "price_silver");
        let period_start = subscription.current_period_start;

        let updated = engine
            .update_subscription(
                &subscription.id,
                UpdateSubscriptionParams {
                    price: Some("price_gold".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, subscription.id);
        assert_eq!(updated.items.data.len(), 1);
        assert_eq!(updated.items.data[0].price.id, "price_gold");
        assert_eq!(updated.current_period_start, period_start);
        assert_eq!(updated.status, SubscriptionStatus::Active);
    }

    #[test]
    fn test_update_without_price_keeps_items() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);
        let subscription = create(&engine, &customer_id, "price_silver");

        let updated = engine
            .update_subscription(
                &subscription.id,
                UpdateSubscriptionParams {
                    trial_end: Some(TrialEnd::At(1900000000)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.items.data.len(), 1);
        assert_eq!(updated.items.data[0].price.id, "price_silver");
        assert_eq!(updated.trial_end, Some(TrialEnd::At(1900000000)));
    }

    #[test]
    fn test_update_free_to_paid_requires_source() {
        let engine = engine();
        let customer_id = customer_without_source(&engine);
        let subscription = create(&engine, &customer_id, "price_free");

        let err = engine
            .update_subscription(
                &subscription.id,
                UpdateSubscriptionParams {
                    price: Some("price_silver".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "This customer has no attached payment source"
        );

        // The failed update left the stored record untouched.
        let stored = engine.store().subscription(&subscription.id).unwrap();
        assert_eq!(stored.first_price().unwrap().id, "price_free");
    }

    #[test]
    fn test_update_paid_to_paid_skips_source_check() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);
        let subscription = create(&engine, &customer_id, "price_silver");

        // Drop the source afterward; a paid-to-paid change must not re-run
        // the precondition.
        let mut customer = engine.store().customer(&customer_id).unwrap();
        customer.default_source = None;
        engine.store().upsert_customer(customer);

        let updated = engine
            .update_subscription(
                &subscription.id,
                UpdateSubscriptionParams {
                    price: Some("price_gold".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.first_price().unwrap().id, "price_gold");
    }

    #[test]
    fn test_update_coupon_clearing() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);
        let subscription = engine
            .create_subscription(CreateSubscriptionParams {
                customer: customer_id,
                price: Some("price_silver".to_string()),
                coupon: Some("SAVE20".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(subscription.discount.is_some());

        let updated = engine
            .update_subscription(
                &subscription.id,
                UpdateSubscriptionParams {
                    coupon: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated.discount.is_none());
    }

    #[test]
    fn test_update_unknown_coupon_does_not_mutate() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);
        let subscription = create(&engine, &customer_id, "price_silver");

        let err = engine
            .update_subscription(
                &subscription.id,
                UpdateSubscriptionParams {
                    coupon: Some("BOGUS".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "No such coupon: BOGUS");

        let stored = engine.store().subscription(&subscription.id).unwrap();
        assert!(stored.discount.is_none());
    }

    #[test]
    fn test_update_moves_snapshot_to_back_without_duplicates() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);
        let first = create(&engine, &customer_id, "price_silver");
        let second = create(&engine, &customer_id, "price_gold");

        engine
            .update_subscription(
                &first.id,
                UpdateSubscriptionParams {
                    trial_period_days: Some(7),
                    ..Default::default()
                },
            )
            .unwrap();

        let customer = engine.store().customer(&customer_id).unwrap();
        let ids: Vec<&str> = customer
            .subscriptions
            .data
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    }

    #[test]
    fn test_cancel_at_period_end_keeps_relationship() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);
        let subscription = create(&engine, &customer_id, "price_silver");

        let canceled = engine
            .cancel_subscription(
                &subscription.id,
                CancelSubscriptionParams {
                    at_period_end: Some(true),
                },
            )
            .unwrap();

        assert_eq!(canceled.status, SubscriptionStatus::Active);
        assert!(canceled.cancel_at_period_end);
        assert!(canceled.canceled_at.is_some());
        assert!(canceled.ended_at.is_none());

        let customer = engine.store().customer(&customer_id).unwrap();
        assert_eq!(customer.subscriptions.data.len(), 1);
        assert!(customer.subscriptions.data[0].cancel_at_period_end);
    }

    #[test]
    fn test_immediate_cancel_removes_relationship_keeps_store() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);
        let subscription = create(&engine, &customer_id, "price_silver");

        let canceled = engine
            .cancel_subscription(&subscription.id, CancelSubscriptionParams::default())
            .unwrap();

        assert_eq!(canceled.status, SubscriptionStatus::Canceled);
        assert!(canceled.ended_at.is_some());

        let customer = engine.store().customer(&customer_id).unwrap();
        assert!(customer.subscriptions.data.is_empty());

        // Retained for direct retrieval.
        let stored = engine.retrieve_subscription(&subscription.id).unwrap();
        assert_eq!(stored.status, SubscriptionStatus::Canceled);
    }

    #[test]
    fn test_canceled_subscription_rejects_mutation() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);
        let subscription = create(&engine, &customer_id, "price_silver");
        engine
            .cancel_subscription(&subscription.id, CancelSubscriptionParams::default())
            .unwrap();

        let expected = format!("No such subscription: {}", subscription.id);

        let err = engine
            .update_subscription(
                &subscription.id,
                UpdateSubscriptionParams {
                    price: Some("price_gold".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.to_string(), expected);

        let err = engine
            .cancel_subscription(&subscription.id, CancelSubscriptionParams::default())
            .unwrap_err();
        assert_eq!(err.to_string(), expected);

        // Unchanged by the rejected calls.
        let stored = engine.retrieve_subscription(&subscription.id).unwrap();
        assert_eq!(stored.first_price().unwrap().id, "price_silver");
        assert_eq!(stored.status, SubscriptionStatus::Canceled);
    }

    #[test]
    fn test_list_status_filters() {
        let engine = engine();
        let customer_id = customer_with_source(&engine);

        let active = create(&engine, &customer_id, "price_silver");
        let trialing = engine
            .create_subscription(CreateSubscriptionParams {
                customer: customer_id.clone(),
                price: Some("price_gold".to_string()),
                trial_period_days: Some(7),
                ..Default::default()
            })
            .unwrap();
        let canceled = create(&engine, &customer_id, "price_free");
        engine
            .cancel_subscription(&canceled.id, CancelSubscriptionParams::default())
            .unwrap();

        let default = engine.list_subscriptions(ListSubscriptionsParams::default());
        assert_eq!(default.data.len(), 2);

        let all = engine.list_subscriptions(ListSubscriptionsParams {
            status: Some("all".to_string()),
            ..Default::default()
        });
        assert_eq!(all.data.len(), 3);

        let trialing_only = engine.list_subscriptions(ListSubscriptionsParams {
            status: Some("trialing".to_string()),
            ..Default::default()
        });
        assert_eq!(trialing_only.data.len(), 1);
        assert_eq!(trialing_only.data[0].id, trialing.id);

        let for_customer = engine.list_subscriptions(ListSubscriptionsParams {
            customer: Some(customer_id),
            ..Default::default()
        });
        assert_eq!(for_customer.data.len(), 2);
        assert_eq!(for_customer.data[0].id, active.id);
    }

    #[test]
    fn test_retrieve_unknown_subscription() {
        let engine = engine();
        let err = engine.retrieve_subscription("sub_ghost").unwrap_err();
        assert_eq!(err.to_string(), "No such subscription: sub_ghost");
        assert!(matches!(
            err,
            BillingError::ResourceNotFound {
                kind: ResourceKind::Subscription,
                ..
            }
        ));
    }
}
