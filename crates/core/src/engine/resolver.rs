//! Price/item resolution.

use billsim_types::Price;

use super::params::SubscriptionItemParams;
use crate::error::{BillingError, ResourceKind};
use crate::store::BillingStore;

/// A price resolved from request parameters, with its requested quantity.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedPrice {
    pub price: Price,
    pub quantity: i64,
}

/// Resolve the `price`/`items` request parameters into an ordered price
/// list, one entry per input entry, input order preserved.
///
/// Empty input yields an empty list — "no new items", not an error. A price
/// id absent from the catalog fails the whole resolution.
pub(crate) fn resolve_prices(
    store: &BillingStore,
    price: Option<&str>,
    items: &[SubscriptionItemParams],
) -> Result<Vec<ResolvedPrice>, BillingError> {
    let requested: Vec<(&str, i64)> = if let Some(id) = price {
        vec![(id, 1)]
    } else {
        items
            .iter()
            .map(|item| (item.price.as_str(), item.quantity.unwrap_or(1)))
            .collect()
    };

    requested
        .into_iter()
        .map(|(id, quantity)| {
            let price = store
                .price(id)
                .ok_or_else(|| BillingError::not_found(ResourceKind::Price, id))?;
            Ok(ResolvedPrice { price, quantity })
        })
        .collect()
}
