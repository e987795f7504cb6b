//! Subscription collection filtering and pagination.

use billsim_types::{List, Subscription, SubscriptionStatus};

use super::params::ListSubscriptionsParams;

const DEFAULT_PAGE_LIMIT: i64 = 10;
const MAX_PAGE_LIMIT: i64 = 100;

/// Filter the full subscription snapshot.
///
/// No `status` excludes canceled records; `"all"` disables the filter; any
/// other value matches exactly. The optional `customer` filter narrows to
/// one customer's subscriptions.
pub(crate) fn filter_subscriptions(
    all: Vec<Subscription>,
    params: &ListSubscriptionsParams,
) -> List<Subscription> {
    let filtered: Vec<Subscription> = all
        .into_iter()
        .filter(|subscription| match params.status.as_deref() {
            None => subscription.status != SubscriptionStatus::Canceled,
            Some("all") => true,
            Some(status) => subscription.status.as_str() == status,
        })
        .filter(|subscription| {
            params
                .customer
                .as_deref()
                .map(|customer| subscription.customer == customer)
                .unwrap_or(true)
        })
        .collect();

    paginate(
        filtered,
        params.limit,
        params.starting_after.as_deref(),
        "/v1/subscriptions",
        |subscription| &subscription.id,
    )
}

/// Slice an ordered collection into a list page.
///
/// `starting_after` is an exclusive id cursor; an unknown cursor starts from
/// the beginning.
pub(crate) fn paginate<T>(
    items: Vec<T>,
    limit: Option<i64>,
    starting_after: Option<&str>,
    url: impl Into<String>,
    id_of: impl Fn(&T) -> &str,
) -> List<T> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT).max(1) as usize;

    let start_idx = starting_after
        .and_then(|cursor| {
            items
                .iter()
                .position(|item| id_of(item) == cursor)
                .map(|idx| idx + 1)
        })
        .unwrap_or(0);

    let end_idx = (start_idx + limit).min(items.len());
    let has_more = end_idx < items.len();

    let mut items = items;
    items.truncate(end_idx);
    let data: Vec<T> = items.drain(start_idx..).collect();

    List {
        object: "list".to_string(),
        data,
        has_more,
        url: url.into(),
    }
}
