use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use validator::Validate;

use crate::core::{BusinessFactorScorer, Matcher};
use crate::models::{MatchReport, Scenario};

/// Errors that can occur while loading a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Scenario failed validation: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Read, parse and validate a scenario file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Loaded scenario from {}", path.display());
    parse_scenario(&contents)
}

/// Parse and validate a scenario from JSON text
pub fn parse_scenario(json: &str) -> Result<Scenario, ScenarioError> {
    let scenario: Scenario = serde_json::from_str(json)?;

    if let Err(errors) = scenario.validate() {
        tracing::info!("Validation failed for scenario: field_errors={:?}", errors);
        return Err(errors.into());
    }

    Ok(scenario)
}

/// Match the scenario's request against its provider pool
pub fn run_scenario(scenario: &Scenario) -> MatchReport {
    let now = scenario.reference_time.unwrap_or_else(Utc::now);
    warn_expired_certifications(scenario, now);

    if scenario.request.requestor.is_none() || scenario.request.required_service.is_none() {
        tracing::warn!("Scenario request has no requestor or required service");
    }

    let matcher = Matcher::new(BusinessFactorScorer::at(now));
    let outcome = matcher.match_providers(&scenario.request, &scenario.providers);

    tracing::info!(
        "Ranked {} of {} providers (selection: {:?})",
        outcome.results.len(),
        outcome.total_candidates,
        outcome.selection
    );

    MatchReport {
        results: outcome.results,
        selection: outcome.selection,
        total_candidates: outcome.total_candidates,
        generated_at: now,
    }
}

/// Expiry dates do not affect scoring; surface them in the log instead
fn warn_expired_certifications(scenario: &Scenario, now: DateTime<Utc>) {
    for provider in &scenario.providers {
        let expired: Vec<&str> = provider
            .certifications
            .iter()
            .filter(|held| held.is_expired_at(now))
            .map(|held| held.certification.name.as_str())
            .collect();

        if !expired.is_empty() {
            tracing::warn!(
                "Provider {} holds expired certifications that still count towards scoring: {:?}",
                provider.company_name,
                expired
            );
        }
    }
}
