use anyhow::Context;

pub static DEFAULT_BASE_URL: &str = "https://api.clashroyale.com/v1";
// update weekly in production: 604800
pub static DEFAULT_REFRESH_INTERVAL: i64 = 60;
// deck recommendations based on top (ranking_depth) players
pub static DEFAULT_RANKING_DEPTH: usize = 15;

/// Runtime configuration, collected once at startup and handed to the
/// routes through Rocket's managed state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer credential for the Clash Royale API
    /// (create at https://developer.clashroyale.com/#/account).
    pub token: String,
    pub database_url: String,
    pub base_url: String,
    /// Snapshot staleness threshold, in seconds.
    pub refresh_interval: i64,
    /// How many top-ranked players to cache.
    pub ranking_depth: usize,
}

impl AppConfig {
    /// Read the whole configuration from the environment. A missing
    /// `TOKEN` or `DATABASE_URL` is fatal.
    pub fn from_env() -> anyhow::Result<Self> {
        let token = std::env::var("TOKEN").context("TOKEN must be set")?;
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let base_url = std::env::var("ROYALE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let refresh_interval = match std::env::var("REFRESH_INTERVAL") {
            Ok(v) => v.parse().context("REFRESH_INTERVAL must be an integer")?,
            Err(_) => DEFAULT_REFRESH_INTERVAL,
        };
        let ranking_depth = match std::env::var("RANKING_DEPTH") {
            Ok(v) => v.parse().context("RANKING_DEPTH must be an integer")?,
            Err(_) => DEFAULT_RANKING_DEPTH,
        };

        Ok(Self {
            token,
            database_url,
            base_url,
            refresh_interval,
            ranking_depth,
        })
    }
}
