use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Certification, Provider, ProviderCertification};

const ASSESSMENT_MID_THRESHOLD: f64 = 2.26;
const ASSESSMENT_HIGH_THRESHOLD: f64 = 3.76;
const MILLIS_PER_MONTH: f64 = 30.0 * 24.0 * 60.0 * 60.0 * 1000.0;
const FREQUENCY_MID_MIN: i32 = 24;
const FREQUENCY_MID_MAX: i32 = 48;
const MONETARY_MID_MIN: f64 = 100_000.0;
const MONETARY_MID_MAX: f64 = 250_000.0;

/// Computes a single match score for one provider
///
/// The matcher calls this once per surviving candidate with the
/// certifications referenced by that candidate.
pub trait ProviderScorer {
    fn calculate_provider_score(&self, provider: &Provider, relevant_certifications: &[Certification]) -> f64;
}

impl<F> ProviderScorer for F
where
    F: Fn(&Provider, &[Certification]) -> f64,
{
    fn calculate_provider_score(&self, provider: &Provider, relevant_certifications: &[Certification]) -> f64 {
        self(provider, relevant_certifications)
    }
}

/// The five independent business factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringFactor {
    Certification,
    Assessment,
    Recency,
    Frequency,
    Monetary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScore {
    pub factor: ScoringFactor,
    pub score: f64,
}

/// Ordered list of the factors that could be evaluated for a provider
///
/// Factors with missing or out-of-domain data are absent rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorScore>,
}

impl ScoreBreakdown {
    /// Arithmetic mean of the applicable factors, or 0 when there are none
    pub fn average(&self) -> f64 {
        if self.factors.is_empty() {
            return 0.0;
        }

        let total: f64 = self.factors.iter().map(|factor| factor.score).sum();
        total / self.factors.len() as f64
    }

    pub fn get(&self, factor: ScoringFactor) -> Option<f64> {
        self.factors
            .iter()
            .find(|entry| entry.factor == factor)
            .map(|entry| entry.score)
    }
}

/// Production scorer averaging certification, assessment, recency,
/// frequency and monetary factors
///
/// Recency is measured against `reference_time`, or the wall clock at call
/// time when no reference is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessFactorScorer {
    reference_time: Option<DateTime<Utc>>,
}

impl BusinessFactorScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score recency against a fixed point in time
    pub fn at(reference_time: DateTime<Utc>) -> Self {
        Self {
            reference_time: Some(reference_time),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.reference_time.unwrap_or_else(Utc::now)
    }

    /// Evaluate every applicable factor for a provider
    pub fn breakdown(&self, provider: &Provider, relevant_certifications: &[Certification]) -> ScoreBreakdown {
        score_factors(provider, relevant_certifications, self.now())
    }
}

impl ProviderScorer for BusinessFactorScorer {
    fn calculate_provider_score(&self, provider: &Provider, relevant_certifications: &[Certification]) -> f64 {
        self.breakdown(provider, relevant_certifications).average()
    }
}

/// Calculate a provider's match score at a given point in time
///
/// An absent provider scores 0.
pub fn calculate_provider_score(
    provider: Option<&Provider>,
    relevant_certifications: &[Certification],
    now: DateTime<Utc>,
) -> f64 {
    provider
        .map(|provider| score_factors(provider, relevant_certifications, now).average())
        .unwrap_or(0.0)
}

fn score_factors(provider: &Provider, relevant_certifications: &[Certification], now: DateTime<Utc>) -> ScoreBreakdown {
    let candidates = [
        (
            ScoringFactor::Certification,
            Some(certification_score(&provider.certifications, relevant_certifications)),
        ),
        (ScoringFactor::Assessment, assessment_score(provider.assessment_score)),
        (ScoringFactor::Recency, recency_score(provider.last_activity_date, now)),
        (ScoringFactor::Frequency, frequency_score(provider.project_count)),
        (ScoringFactor::Monetary, monetary_score(provider.average_project_value)),
    ];

    let factors: Vec<FactorScore> = candidates
        .into_iter()
        .filter_map(|(factor, score)| score.map(|score| FactorScore { factor, score }))
        .collect();

    tracing::trace!(
        provider = %provider.company_name,
        factors = ?factors,
        "Scored provider factors"
    );

    ScoreBreakdown { factors }
}

/// Certification relevance (always applicable)
///
/// With no relevant set, holding any certification counts. Names compare
/// exactly, case included.
#[inline]
fn certification_score(held: &[ProviderCertification], relevant: &[Certification]) -> f64 {
    if held.is_empty() {
        return 1.0;
    }

    let has_relevant = relevant.is_empty()
        || held
            .iter()
            .any(|cert| relevant.iter().any(|wanted| wanted.name == cert.certification.name));

    if has_relevant {
        9.0
    } else {
        1.0
    }
}

/// Assessment score bracket; negative (or NaN) means no assessment
#[inline]
fn assessment_score(assessment: f64) -> Option<f64> {
    if assessment.is_nan() || assessment < 0.0 {
        return None;
    }

    let score = if assessment < ASSESSMENT_MID_THRESHOLD {
        1.0
    } else if assessment < ASSESSMENT_HIGH_THRESHOLD {
        3.0
    } else {
        9.0
    };
    Some(score)
}

/// Recency bracket in 30-day months since last activity
#[inline]
fn recency_score(last_activity: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<f64> {
    let last_activity = last_activity?;
    let months_ago = (now - last_activity).num_milliseconds() as f64 / MILLIS_PER_MONTH;

    let score = if months_ago > 12.0 {
        1.0
    } else if months_ago >= 6.0 {
        3.0
    } else {
        6.0
    };
    Some(score)
}

/// Project frequency bracket; negative counts mean unknown history
#[inline]
fn frequency_score(project_count: i32) -> Option<f64> {
    match project_count {
        count if count < 0 => None,
        count if count < FREQUENCY_MID_MIN => Some(1.0),
        count if count <= FREQUENCY_MID_MAX => Some(6.0),
        _ => Some(12.0),
    }
}

/// Average project value bracket; only positive values are scored
#[inline]
fn monetary_score(average_value: f64) -> Option<f64> {
    if average_value.is_nan() || average_value <= 0.0 {
        return None;
    }

    let score = if average_value < MONETARY_MID_MIN {
        1.0
    } else if average_value <= MONETARY_MID_MAX {
        3.0
    } else {
        6.0
    };
    Some(score)
}
