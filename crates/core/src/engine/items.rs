//! Subscription item sub-operations: adding, adjusting, and listing the
//! priced lines of an existing subscription.

use billsim_types::{List, Subscription, SubscriptionItem};

use super::params::{
    CreateSubscriptionItemParams, ListSubscriptionItemsParams, UpdateSubscriptionItemParams,
};
use super::preconditions::ensure_mutable;
use super::query::paginate;
use super::{SubscriptionEngine, replace_subscription};
use crate::error::{BillingError, ResourceKind};

impl SubscriptionEngine {
    /// Add an item to an existing subscription.
    pub fn create_subscription_item(
        &self,
        params: CreateSubscriptionItemParams,
    ) -> Result<SubscriptionItem, BillingError> {
        let subscription_id = params
            .subscription
            .as_deref()
            .ok_or_else(|| BillingError::missing_param("subscription"))?;
        let price_id = params
            .price
            .as_deref()
            .ok_or_else(|| BillingError::missing_param("price"))?;

        let mut subscription = self.retrieve_subscription(subscription_id)?;
        ensure_mutable(&subscription)?;

        let price = self
            .store()
            .price(price_id)
            .ok_or_else(|| BillingError::not_found(ResourceKind::Price, price_id))?;

        let item = SubscriptionItem::new(&subscription.id, price, params.quantity.unwrap_or(1));
        subscription.items.data.push(item.clone());

        self.persist_with_customer(subscription)?;
        Ok(item)
    }

    /// Change the price or quantity of an existing item.
    pub fn update_subscription_item(
        &self,
        item_id: &str,
        params: UpdateSubscriptionItemParams,
    ) -> Result<SubscriptionItem, BillingError> {
        let mut subscription = self
            .store()
            .subscriptions()
            .into_iter()
            .find(|subscription| subscription.items.data.iter().any(|item| item.id == item_id))
            .ok_or_else(|| BillingError::not_found(ResourceKind::SubscriptionItem, item_id))?;
        ensure_mutable(&subscription)?;

        let new_price = match params.price.as_deref() {
            Some(price_id) => Some(
                self.store()
                    .price(price_id)
                    .ok_or_else(|| BillingError::not_found(ResourceKind::Price, price_id))?,
            ),
            None => None,
        };

        let updated = {
            let item = subscription
                .items
                .data
                .iter_mut()
                .find(|item| item.id == item_id)
                .ok_or_else(|| BillingError::not_found(ResourceKind::SubscriptionItem, item_id))?;
            if let Some(price) = new_price {
                item.price = price;
            }
            if let Some(quantity) = params.quantity {
                item.quantity = quantity;
            }
            item.clone()
        };

        self.persist_with_customer(subscription)?;
        Ok(updated)
    }

    /// List the items of one subscription.
    pub fn list_subscription_items(
        &self,
        params: ListSubscriptionItemsParams,
    ) -> Result<List<SubscriptionItem>, BillingError> {
        let subscription_id = params
            .subscription
            .as_deref()
            .ok_or_else(|| BillingError::missing_param("subscription"))?;
        let subscription = self.retrieve_subscription(subscription_id)?;

        Ok(paginate(
            subscription.items.data,
            params.limit,
            params.starting_after.as_deref(),
            format!("/v1/subscription_items?subscription={subscription_id}"),
            |item| &item.id,
        ))
    }

    fn persist_with_customer(&self, subscription: Subscription) -> Result<(), BillingError> {
        let mut customer = self.store().customer(&subscription.customer).ok_or_else(|| {
            BillingError::not_found(ResourceKind::Customer, &subscription.customer)
        })?;
        replace_subscription(&mut customer, &subscription);
        self.store().put_subscription(subscription);
        self.store().upsert_customer(customer);
        Ok(())
    }
}
