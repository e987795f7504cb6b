use thiserror::Error;

/// Entity classes the engine can fail to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Customer,
    Subscription,
    Price,
    Coupon,
    SubscriptionItem,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Customer => "customer",
            ResourceKind::Subscription => "subscription",
            ResourceKind::Price => "price",
            ResourceKind::Coupon => "coupon",
            ResourceKind::SubscriptionItem => "subscription_item",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error taxonomy for engine operations.
///
/// Every failure aborts the whole operation with no partial persistence.
/// Some lookup misses deliberately surface as [`BillingError::InvalidRequest`]
/// rather than [`BillingError::ResourceNotFound`] — the coupon path and the
/// canceled-subscription path both follow the vendor contract there.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BillingError {
    /// A referenced entity does not exist.
    #[error("No such {kind}: {id}")]
    ResourceNotFound { kind: ResourceKind, id: String },

    /// Structurally or semantically invalid input.
    #[error("{message}")]
    InvalidRequest {
        message: String,
        param: Option<String>,
    },
}

impl BillingError {
    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        BillingError::ResourceNotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        BillingError::InvalidRequest {
            message: message.into(),
            param: None,
        }
    }

    pub fn invalid_param(message: impl Into<String>, param: impl Into<String>) -> Self {
        BillingError::InvalidRequest {
            message: message.into(),
            param: Some(param.into()),
        }
    }

    pub fn missing_param(param: &str) -> Self {
        BillingError::InvalidRequest {
            message: format!("Missing required param: {param}."),
            param: Some(param.to_string()),
        }
    }

    /// The offending parameter name, when the failure names one.
    pub fn param(&self) -> Option<&str> {
        match self {
            BillingError::InvalidRequest { param, .. } => param.as_deref(),
            BillingError::ResourceNotFound { .. } => None,
        }
    }
}
