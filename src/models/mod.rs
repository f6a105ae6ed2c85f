// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Certification, CostProfile, DigitalMaturityLevel, Provider, ProviderCertification, ProviderSize,
    ProviderSkill, Requestor, Service,
};
pub use requests::{MatchingRequest, Scenario};
pub use responses::{CandidateSelection, MatchReport, MatchingResult};
