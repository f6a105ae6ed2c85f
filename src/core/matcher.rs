use std::cmp::Ordering;

use crate::core::{
    filters::{fallback_by_service_name, matches_core_criteria, prefer_same_location},
    scoring::{BusinessFactorScorer, ProviderScorer},
};
use crate::models::{CandidateSelection, MatchingRequest, MatchingResult, Provider};

/// Number of ranked providers returned per request
pub const TOP_PROVIDER_COUNT: usize = 3;

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub results: Vec<MatchingResult>,
    pub selection: CandidateSelection,
    pub total_candidates: usize,
}

impl MatchOutcome {
    fn empty(total_candidates: usize) -> Self {
        Self {
            results: Vec::new(),
            selection: CandidateSelection::Empty,
            total_candidates,
        }
    }
}

/// Main matching orchestrator - filters, scores and ranks providers
///
/// # Pipeline Stages
/// 1. Cost profile and skill filtering
/// 2. Optional same-location preference (never eliminates everyone)
/// 3. Name-only fallback over the whole pool when nothing survived
/// 4. Scoring, ranking and truncation to the top three
#[derive(Debug, Clone)]
pub struct Matcher<S = BusinessFactorScorer> {
    scorer: S,
}

impl Matcher<BusinessFactorScorer> {
    pub fn with_default_scorer() -> Self {
        Self {
            scorer: BusinessFactorScorer::new(),
        }
    }
}

impl Default for Matcher<BusinessFactorScorer> {
    fn default() -> Self {
        Self::with_default_scorer()
    }
}

impl<S: ProviderScorer> Matcher<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Find the best providers for a request
    ///
    /// Incomplete requests and empty pools yield no results.
    ///
    /// # Returns
    /// At most three results ranked 1, 2, 3
    pub fn find_top_providers(&self, request: &MatchingRequest, providers: &[Provider]) -> Vec<MatchingResult> {
        self.match_providers(request, providers).results
    }

    /// Run the full pipeline and report which stage selected the candidates
    pub fn match_providers(&self, request: &MatchingRequest, providers: &[Provider]) -> MatchOutcome {
        let total_candidates = providers.len();

        let (Some(requestor), Some(required)) = (request.requestor.as_ref(), request.required_service.as_ref())
        else {
            tracing::debug!("Incomplete matching request, returning no providers");
            return MatchOutcome::empty(total_candidates);
        };

        if providers.is_empty() {
            return MatchOutcome::empty(total_candidates);
        }

        // Stage 1: core criteria
        let mut candidates: Vec<&Provider> = providers
            .iter()
            .filter(|provider| {
                matches_core_criteria(provider, requestor.cost_profile, required, request.min_users)
            })
            .collect();
        let mut selection = CandidateSelection::Strict;

        tracing::debug!(
            "{} of {} providers passed core criteria for {}",
            candidates.len(),
            total_candidates,
            required.name
        );

        // Stage 2: location preference
        if request.require_location_proximity {
            if let Some(local) = prefer_same_location(&candidates, requestor.location.as_deref()) {
                candidates = local;
                selection = CandidateSelection::LocationPreferred;
            }
        }

        // Stage 3: fallback
        if candidates.is_empty() {
            candidates = fallback_by_service_name(providers, &required.name);
            selection = CandidateSelection::Fallback;
            tracing::debug!(
                "No strict match for {}, fallback selected {} providers",
                required.name,
                candidates.len()
            );
        }

        if candidates.is_empty() {
            return MatchOutcome::empty(total_candidates);
        }

        // Stage 4: scoring and ranking
        MatchOutcome {
            results: self.rank_and_take_top(candidates),
            selection,
            total_candidates,
        }
    }

    fn rank_and_take_top(&self, candidates: Vec<&Provider>) -> Vec<MatchingResult> {
        let mut scored: Vec<(&Provider, f64)> = candidates
            .into_iter()
            .map(|provider| {
                let certifications = provider.certification_refs();
                let score = self.scorer.calculate_provider_score(provider, &certifications);
                (provider, score)
            })
            .collect();

        // Sort by score (descending) and then by certification count (descending).
        // The sort is stable, so remaining ties keep input order.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.0.certifications.len().cmp(&a.0.certifications.len()))
        });

        scored.truncate(TOP_PROVIDER_COUNT);

        scored
            .into_iter()
            .enumerate()
            .map(|(index, (provider, score))| MatchingResult {
                provider: provider.clone(),
                match_score: score,
                rank: index + 1,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Certification, CostProfile, DigitalMaturityLevel, ProviderCertification, ProviderSize,
        ProviderSkill, Requestor, Service,
    };
    use chrono::Utc;
    use std::cell::Cell;

    fn fixed_score(score: f64) -> impl Fn(&Provider, &[Certification]) -> f64 {
        move |_, _| score
    }

    /// Returns the given scores in call order
    fn scripted_scores(scores: Vec<f64>) -> impl Fn(&Provider, &[Certification]) -> f64 {
        let next = Cell::new(0);
        move |_, _| {
            let index = next.get();
            next.set(index + 1);
            scores[index]
        }
    }

    fn create_request(require_location_proximity: bool, min_users: Option<u32>) -> MatchingRequest {
        MatchingRequest {
            requestor: Some(Requestor {
                company_name: "Requestor".to_string(),
                revenue: 1_000_000.0,
                employee_count: 40,
                cost_profile: CostProfile::Medium,
                digital_maturity_index: DigitalMaturityLevel::Level2,
                location: Some("Athens".to_string()),
            }),
            required_service: Some(Service::named("Cloud", DigitalMaturityLevel::Level3)),
            min_users,
            require_location_proximity,
        }
    }

    fn create_candidate(id: &str, size: ProviderSize, location: &str, max_users: Option<u32>) -> Provider {
        Provider {
            company_name: id.to_string(),
            employee_count: 10,
            location: Some(location.to_string()),
            size,
            skills: vec![ProviderSkill {
                service: Service::named("Cloud", DigitalMaturityLevel::Level3),
                max_users_supported: max_users,
                years_of_experience: 3,
            }],
            ..Default::default()
        }
    }

    fn with_certifications(mut provider: Provider, count: usize) -> Provider {
        provider.certifications = (0..count)
            .map(|i| ProviderCertification {
                certification: Certification::new(format!("Cert {}", i), "Org"),
                issue_date: Utc::now(),
                expiry_date: None,
            })
            .collect();
        provider
    }

    #[test]
    fn test_exact_match_returns_provider() {
        let matcher = Matcher::new(fixed_score(7.0));
        let providers = vec![create_candidate("1", ProviderSize::Sme, "Athens", Some(200))];

        let results = matcher.find_top_providers(&create_request(false, None), &providers);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[0].match_score, 7.0);
    }

    #[test]
    fn test_incomplete_request_returns_nothing() {
        let matcher = Matcher::new(fixed_score(5.0));
        let providers = vec![create_candidate("1", ProviderSize::Sme, "Athens", None)];

        assert!(matcher.find_top_providers(&MatchingRequest::default(), &providers).is_empty());

        let mut no_service = create_request(false, None);
        no_service.required_service = None;
        assert!(matcher.find_top_providers(&no_service, &providers).is_empty());

        let mut no_requestor = create_request(false, None);
        no_requestor.requestor = None;
        assert!(matcher.find_top_providers(&no_requestor, &providers).is_empty());
    }

    #[test]
    fn test_empty_pool_returns_nothing() {
        let matcher = Matcher::new(fixed_score(5.0));
        let outcome = matcher.match_providers(&create_request(false, None), &[]);

        assert!(outcome.results.is_empty());
        assert_eq!(outcome.selection, CandidateSelection::Empty);
    }

    #[test]
    fn test_orders_by_score_descending() {
        let matcher = Matcher::new(scripted_scores(vec![3.0, 9.0]));
        let providers = vec![
            create_candidate("1", ProviderSize::Sme, "Athens", None),
            create_candidate("2", ProviderSize::Sme, "Athens", None),
        ];

        let results = matcher.find_top_providers(&create_request(false, None), &providers);

        assert_eq!(results[0].match_score, 9.0);
        assert_eq!(results[0].provider.company_name, "2");
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[1].rank, 2);
    }

    #[test]
    fn test_ties_broken_by_certification_count_then_input_order() {
        let matcher = Matcher::new(fixed_score(5.0));
        let providers = vec![
            with_certifications(create_candidate("few", ProviderSize::Sme, "Athens", None), 1),
            with_certifications(create_candidate("many", ProviderSize::Sme, "Athens", None), 3),
            with_certifications(create_candidate("few-again", ProviderSize::Sme, "Athens", None), 1),
        ];

        let results = matcher.find_top_providers(&create_request(false, None), &providers);

        let order: Vec<&str> = results.iter().map(|r| r.provider.company_name.as_str()).collect();
        assert_eq!(order, vec!["many", "few", "few-again"]);
    }

    #[test]
    fn test_respects_top_three() {
        let matcher = Matcher::new(fixed_score(5.0));
        let providers: Vec<Provider> = (0..10)
            .map(|i| create_candidate(&i.to_string(), ProviderSize::Small, "Athens", None))
            .collect();

        let results = matcher.find_top_providers(&create_request(false, None), &providers);

        assert_eq!(results.len(), TOP_PROVIDER_COUNT);
        let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_filters_by_user_capacity() {
        let matcher = Matcher::new(fixed_score(5.0));
        let providers = vec![
            create_candidate("small", ProviderSize::Sme, "Athens", Some(50)),
            create_candidate("large", ProviderSize::Sme, "Athens", Some(200)),
        ];

        let results = matcher.find_top_providers(&create_request(false, Some(100)), &providers);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].provider.company_name, "large");
    }

    #[test]
    fn test_filters_by_cost_profile() {
        let matcher = Matcher::new(fixed_score(5.0));
        let providers = vec![
            create_candidate("big", ProviderSize::Big, "Athens", Some(200)),
            create_candidate("small", ProviderSize::Small, "Athens", Some(200)),
        ];

        let results = matcher.find_top_providers(&create_request(false, Some(100)), &providers);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].provider.company_name, "small");
    }

    #[test]
    fn test_location_preference() {
        let matcher = Matcher::new(fixed_score(5.0));
        let providers = vec![
            create_candidate("berlin", ProviderSize::Sme, "Berlin", None),
            create_candidate("athens", ProviderSize::Sme, "Athens", None),
        ];

        let outcome = matcher.match_providers(&create_request(true, None), &providers);

        assert_eq!(outcome.selection, CandidateSelection::LocationPreferred);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].provider.company_name, "athens");
    }

    #[test]
    fn test_location_preference_never_eliminates_everyone() {
        let matcher = Matcher::new(fixed_score(5.0));
        let providers = vec![
            create_candidate("berlin", ProviderSize::Sme, "Berlin", None),
            create_candidate("paris", ProviderSize::Sme, "Paris", None),
        ];

        let outcome = matcher.match_providers(&create_request(true, None), &providers);

        assert_eq!(outcome.selection, CandidateSelection::Strict);
        assert_eq!(outcome.results.len(), 2);
    }

    #[test]
    fn test_fallback_when_nothing_strictly_matches() {
        let matcher = Matcher::new(fixed_score(5.0));
        let mut wrong_stage = create_candidate("stage", ProviderSize::Big, "Athens", Some(1));
        wrong_stage.skills[0].service.maturity_stage = DigitalMaturityLevel::Level1;
        let mut unrelated = create_candidate("unrelated", ProviderSize::Sme, "Athens", None);
        unrelated.skills[0].service.name = "Security".to_string();

        let outcome = matcher.match_providers(&create_request(true, Some(100)), &[wrong_stage, unrelated]);

        assert_eq!(outcome.selection, CandidateSelection::Fallback);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].provider.company_name, "stage");
    }

    #[test]
    fn test_no_candidate_even_after_fallback() {
        let matcher = Matcher::new(fixed_score(5.0));
        let mut unrelated = create_candidate("unrelated", ProviderSize::Sme, "Athens", None);
        unrelated.skills[0].service.name = "Security".to_string();

        let outcome = matcher.match_providers(&create_request(false, None), &[unrelated]);

        assert!(outcome.results.is_empty());
        assert_eq!(outcome.selection, CandidateSelection::Empty);
        assert_eq!(outcome.total_candidates, 1);
    }

    #[test]
    fn test_scorer_receives_provider_certifications() {
        let matcher = Matcher::new(|provider: &Provider, certifications: &[Certification]| -> f64 {
            assert_eq!(certifications.len(), provider.certifications.len());
            certifications.len() as f64
        });
        let providers = vec![with_certifications(create_candidate("1", ProviderSize::Sme, "Athens", None), 2)];

        let results = matcher.find_top_providers(&create_request(false, None), &providers);

        assert_eq!(results[0].match_score, 2.0);
    }
}
