// Service exports
pub mod scenario;

pub use scenario::{load_scenario, parse_scenario, run_scenario, ScenarioError};
