use serde::{Deserialize, Serialize};

use crate::domain::actor::UserProfile;
use crate::domain::establishment::Establishment;
use crate::domain::pricing::PricingPolicy;
use crate::engine::coordinator::BookingPolicy;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingPolicy,
    #[serde(default)]
    pub booking: BookingPolicy,
    #[serde(default)]
    pub jobs: JobsConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Background work scheduled by the server process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JobsConfig {
    /// Interval of the completion sweep; `0` disables it.
    #[serde(default = "default_completion_sweep_secs")]
    pub completion_sweep_secs: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            completion_sweep_secs: default_completion_sweep_secs(),
        }
    }
}

fn default_completion_sweep_secs() -> u64 {
    3600
}

/// Records loaded into the in-memory stores at start-up.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SeedConfig {
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub establishments: Vec<Establishment>,
}
