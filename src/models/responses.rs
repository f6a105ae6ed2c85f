use serde::{Deserialize, Serialize};

use crate::models::domain::Provider;

/// A ranked provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingResult {
    pub provider: Provider,
    pub match_score: f64,
    /// 1-based position among the returned results
    pub rank: usize,
}

/// Which stage of the pipeline produced the ranked candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSelection {
    /// Cost profile and skill rules
    Strict,
    /// Strict rules narrowed to the requestor's location
    LocationPreferred,
    /// Name-only skill match over the whole pool
    Fallback,
    /// Incomplete request, empty pool, or no candidate at all
    Empty,
}

/// Response written by the batch runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub results: Vec<MatchingResult>,
    pub selection: CandidateSelection,
    pub total_candidates: usize,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
