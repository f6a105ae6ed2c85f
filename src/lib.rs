//! Provider Match - service provider matching and scoring
//!
//! This library filters a pool of service providers against a requestor's
//! needs, scores the survivors on five business factors, and returns the
//! top three ranked providers.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_provider_score, BusinessFactorScorer, MatchOutcome, Matcher, ProviderScorer, TOP_PROVIDER_COUNT};
pub use crate::models::{MatchingRequest, MatchingResult, Provider, Certification, Scenario, MatchReport};
