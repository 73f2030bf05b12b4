use std::env;

use chrono_tz::TZ_VARIANTS;

/// Settings read once at startup and shared by reference with every invocation.
#[derive(Clone)]
pub struct Config {
    /// `None` when `SLACK_SIGNING_SECRET` is unset or empty; verification then always fails.
    pub signing_secret: Option<String>,
    /// Identifiers the resolver searches, in match order.
    pub known_zones: Vec<&'static str>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let signing_secret = env::var("SLACK_SIGNING_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty());

        if signing_secret.is_none() {
            tracing::warn!("SLACK_SIGNING_SECRET is not set; every request will be rejected");
        }

        Self::new(signing_secret)
    }

    pub fn new(signing_secret: Option<String>) -> Self {
        Self {
            signing_secret,
            known_zones: TZ_VARIANTS.iter().map(|tz| tz.name()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_zones_cover_the_database() {
        let config = Config::new(None);
        assert!(config.known_zones.contains(&"Asia/Seoul"));
        assert!(config.known_zones.contains(&"America/New_York"));
        assert_eq!(config.known_zones.len(), TZ_VARIANTS.len());
    }
}
