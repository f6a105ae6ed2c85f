use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Provider, Requestor, Service};

/// Request to find the best providers for a service
///
/// `requestor` and `required_service` are optional so that incomplete
/// requests can be represented; the matcher answers those with no results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchingRequest {
    #[validate(nested)]
    #[serde(default)]
    pub requestor: Option<Requestor>,
    #[validate(nested)]
    #[serde(default)]
    pub required_service: Option<Service>,
    #[serde(default, alias = "numberOfUsers")]
    pub min_users: Option<u32>,
    #[serde(default)]
    pub require_location_proximity: bool,
}

/// Batch input: one request evaluated against a provider pool
///
/// Request body:
/// ```json
/// {
///   "request": { "requestor": { ... }, "requiredService": { ... } },
///   "providers": [ ... ],
///   "referenceTime": "2025-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[validate(nested)]
    pub request: MatchingRequest,
    #[validate(nested)]
    #[serde(default)]
    pub providers: Vec<Provider>,
    /// Fixed clock for recency scoring; the wall clock is used when absent
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
}
