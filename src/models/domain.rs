use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::Validate;

/// Price sensitivity tier of a requestor
///
/// Unknown wire values deserialize to `Unrecognized`, which is compatible
/// with no provider size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CostProfile {
    Low,
    Medium,
    High,
    Unrecognized,
}

impl CostProfile {
    /// Whether a provider of the given size fits this cost profile
    #[inline]
    pub fn allows(self, size: ProviderSize) -> bool {
        match self {
            CostProfile::Low => matches!(size, ProviderSize::VerySmall | ProviderSize::Small),
            CostProfile::Medium => matches!(size, ProviderSize::Small | ProviderSize::Sme),
            CostProfile::High => matches!(size, ProviderSize::Sme | ProviderSize::Big),
            CostProfile::Unrecognized => false,
        }
    }
}

impl From<String> for CostProfile {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "low" => CostProfile::Low,
            "medium" => CostProfile::Medium,
            "high" => CostProfile::High,
            _ => CostProfile::Unrecognized,
        }
    }
}

impl From<CostProfile> for String {
    fn from(value: CostProfile) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CostProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CostProfile::Low => "Low",
            CostProfile::Medium => "Medium",
            CostProfile::High => "High",
            CostProfile::Unrecognized => "Unrecognized",
        };
        f.write_str(label)
    }
}

/// Capacity tier of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProviderSize {
    #[default]
    VerySmall,
    Small,
    #[serde(rename = "SME")]
    Sme,
    Big,
}

/// Digital maturity ordinal (1-4) shared by requestors and services
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DigitalMaturityLevel {
    Level1 = 1,
    Level2 = 2,
    Level3 = 3,
    Level4 = 4,
}

impl TryFrom<u8> for DigitalMaturityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DigitalMaturityLevel::Level1),
            2 => Ok(DigitalMaturityLevel::Level2),
            3 => Ok(DigitalMaturityLevel::Level3),
            4 => Ok(DigitalMaturityLevel::Level4),
            other => Err(format!("maturity level must be between 1 and 4, got {}", other)),
        }
    }
}

impl From<DigitalMaturityLevel> for u8 {
    fn from(value: DigitalMaturityLevel) -> Self {
        value as u8
    }
}

/// Company looking for a service provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Requestor {
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub revenue: f64,
    #[validate(range(min = 1))]
    pub employee_count: u32,
    pub cost_profile: CostProfile,
    pub digital_maturity_index: DigitalMaturityLevel,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub location: Option<String>,
}

/// A service offering, classified by domain and maturity stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub subdomain: String,
    pub maturity_stage: DigitalMaturityLevel,
}

impl Service {
    /// Create a service with no domain classification
    pub fn named(name: impl Into<String>, maturity_stage: DigitalMaturityLevel) -> Self {
        Self {
            name: name.into(),
            domain: String::new(),
            subdomain: String::new(),
            maturity_stage,
        }
    }

    /// Case-insensitive service name comparison
    #[inline]
    pub fn has_name(&self, lowercase_name: &str) -> bool {
        self.name.to_lowercase() == lowercase_name
    }

    /// Two services describe the same requirement when names match
    /// case-insensitively and maturity stages are identical
    pub fn is_same_requirement(&self, other: &Service) -> bool {
        self.maturity_stage == other.maturity_stage && self.has_name(&other.name.to_lowercase())
    }
}

/// A service offered by a provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSkill {
    #[validate(nested)]
    pub service: Service,
    #[serde(default)]
    pub max_users_supported: Option<u32>,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub years_of_experience: u32,
}

impl ProviderSkill {
    /// Whether the skill can serve the requested number of users
    ///
    /// Skills without a declared capacity never fail this check, nor does
    /// any skill when no positive user count is requested.
    #[inline]
    pub fn supports_users(&self, requested_users: Option<u32>) -> bool {
        match (requested_users, self.max_users_supported) {
            (Some(requested), Some(capacity)) if requested > 0 => capacity >= requested,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub issuing_organization: String,
}

impl Certification {
    pub fn new(name: impl Into<String>, issuing_organization: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            issuing_organization: issuing_organization.into(),
        }
    }
}

/// A certification held by a provider
///
/// Issue and expiry dates are recorded but scoring does not consult them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCertification {
    #[validate(nested)]
    pub certification: Certification,
    pub issue_date: DateTime<Utc>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl ProviderCertification {
    /// Whether the certification expired before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < now)
    }
}

/// Service provider with skills, certifications and business history
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub employee_count: u32,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub location: Option<String>,
    /// Negative values mean no assessment is available
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub assessment_score: f64,
    #[serde(default)]
    pub last_activity_date: Option<DateTime<Utc>>,
    /// Negative values mean the project history is unknown
    #[validate(range(min = 0))]
    #[serde(default)]
    pub project_count: i32,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub average_project_value: f64,
    #[serde(default)]
    pub size: ProviderSize,
    #[validate(nested)]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<ProviderSkill>,
    #[validate(nested)]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub certifications: Vec<ProviderCertification>,
}

impl Provider {
    /// Certifications referenced by this provider's certification records
    pub fn certification_refs(&self) -> Vec<Certification> {
        self.certifications
            .iter()
            .map(|held| held.certification.clone())
            .collect()
    }

    /// Location equality; a missing location on either side never matches
    #[inline]
    pub fn is_located_in(&self, location: Option<&str>) -> bool {
        matches!((self.location.as_deref(), location), (Some(own), Some(wanted)) if own == wanted)
    }
}

/// Treat an explicit `null` list the same as a missing one
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
