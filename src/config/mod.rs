pub mod types;

use std::path::Path;

use crate::error::{BookingError, Result};
use types::Config;

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        BookingError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.booking.max_nights == 0 {
        return Err(BookingError::Config("booking.max_nights must be at least 1".into()));
    }
    if let Some(tier) = config
        .pricing
        .long_stay_tiers
        .iter()
        .find(|t| t.discount_percent > 100)
    {
        return Err(BookingError::Config(format!(
            "pricing tier for {} nights discounts more than 100%",
            tier.min_nights
        )));
    }
    let mut seen = std::collections::HashSet::new();
    for establishment in &config.seed.establishments {
        if !seen.insert(establishment.id.as_str()) {
            return Err(BookingError::Config(format!(
                "duplicate seed establishment id {}",
                establishment.id
            )));
        }
    }
    let mut seen = std::collections::HashSet::new();
    for user in &config.seed.users {
        if !seen.insert(user.id.as_str()) {
            return Err(BookingError::Config(format!("duplicate seed user id {}", user.id)));
        }
    }
    Ok(())
}
