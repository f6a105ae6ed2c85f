use crate::models::{CostProfile, Provider, ProviderSize, Service};

/// Check whether a provider's size fits the requestor's cost profile
///
/// Low -> VerySmall/Small, Medium -> Small/SME, High -> SME/Big.
#[inline]
pub fn is_cost_profile_match(cost_profile: CostProfile, size: ProviderSize) -> bool {
    cost_profile.allows(size)
}

/// Check whether a provider offers the required service
///
/// A skill qualifies when its service name matches case-insensitively,
/// its maturity stage is identical, and its declared capacity (if any)
/// covers the requested number of users.
#[inline]
pub fn has_matching_skill(provider: &Provider, required: &Service, min_users: Option<u32>) -> bool {
    let required_name = required.name.to_lowercase();

    provider.skills.iter().any(|skill| {
        skill.service.has_name(&required_name)
            && skill.service.maturity_stage == required.maturity_stage
            && skill.supports_users(min_users)
    })
}

/// Stage 1: cost profile and skill rules
pub fn matches_core_criteria(
    provider: &Provider,
    cost_profile: CostProfile,
    required: &Service,
    min_users: Option<u32>,
) -> bool {
    is_cost_profile_match(cost_profile, provider.size)
        && has_matching_skill(provider, required, min_users)
}

/// Stage 2: narrow candidates to the requestor's location
///
/// Returns `None` when no candidate shares the location, in which case the
/// caller keeps the unnarrowed set.
pub fn prefer_same_location<'a>(
    candidates: &[&'a Provider],
    location: Option<&str>,
) -> Option<Vec<&'a Provider>> {
    let local: Vec<&Provider> = candidates
        .iter()
        .copied()
        .filter(|provider| provider.is_located_in(location))
        .collect();

    if local.is_empty() {
        None
    } else {
        Some(local)
    }
}

/// Stage 3: relaxed name-only match over the whole pool
///
/// Maturity stage, cost profile and capacity are ignored.
pub fn fallback_by_service_name<'a>(providers: &'a [Provider], service_name: &str) -> Vec<&'a Provider> {
    let wanted = service_name.to_lowercase();

    providers
        .iter()
        .filter(|provider| provider.skills.iter().any(|skill| skill.service.has_name(&wanted)))
        .collect()
}
