use crate::{config::Config, error::AppResult, services::BggClient};

/// Shared application state
///
/// Holds no per-request data; every comparison fetches fresh from BGG.
#[derive(Clone)]
pub struct AppState {
    pub bgg: BggClient,
    pub top_games_limit: usize,
}

impl AppState {
    pub fn new(bgg: BggClient, top_games_limit: usize) -> Self {
        Self {
            bgg,
            top_games_limit,
        }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self::new(
            BggClient::from_config(config)?,
            config.top_games_limit,
        ))
    }
}
