// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use filters::{fallback_by_service_name, has_matching_skill, is_cost_profile_match, matches_core_criteria, prefer_same_location};
pub use matcher::{MatchOutcome, Matcher, TOP_PROVIDER_COUNT};
pub use scoring::{calculate_provider_score, BusinessFactorScorer, FactorScore, ProviderScorer, ScoreBreakdown, ScoringFactor};
