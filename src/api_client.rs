use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::ResponseCache;
use crate::client::Client;
use crate::config::Config;
use crate::error::{DecodeError, Error, RemoteRequestError};
use crate::types::*;

const ALL_LEAGUES_KEY: &str = "all_leagues";

pub enum Endpoint {
    AllLeagues,
    SeasonBadges(String),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::AllLeagues => write!(f, "/all_leagues.php"),
            Endpoint::SeasonBadges(id) => write!(f, "/search_all_seasons.php?badge=1&id={id}"),
        }
    }
}

pub struct SportsDbClient {
    client: reqwest::Client,
    base_url: String,
    cache: ResponseCache<Value>,
}

impl SportsDbClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));

        Ok(Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                .build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: ResponseCache::with_capacity(config.cache_capacity),
        })
    }

    /// Returns the decoded body for `endpoint`, hitting the network only
    /// when nothing is cached under `cache_key`.
    pub async fn fetch_with_cache(&self, endpoint: &Endpoint, cache_key: &str) -> Result<Value, Error> {
        Ok(self
            .cache
            .get_or_try_fetch(cache_key, || self.fetch(endpoint, cache_key))
            .await?)
    }

    async fn fetch(&self, endpoint: &Endpoint, cache_key: &str) -> Result<Value, Error> {
        let url = format!("{}{endpoint}", self.base_url);
        info!(%url, cache_key, "fetching");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(%url, error = %e, "request failed");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "remote returned an error status");
            return Err(RemoteRequestError::new(&url, status).into());
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(%url, error = %e, "malformed response body");
            DecodeError::new(cache_key, e).into()
        })
    }

    async fn fetch_as<T: DeserializeOwned>(&self, endpoint: &Endpoint, cache_key: &str) -> Result<T, Error> {
        let raw = self.fetch_with_cache(endpoint, cache_key).await?;
        Ok(serde_json::from_value(raw).map_err(|e| DecodeError::new(cache_key, e))?)
    }
}

fn season_badge_key(league_id: &str) -> String {
    format!("season_badge_{league_id}")
}

#[async_trait]
impl Client for SportsDbClient {
    async fn get_all_leagues(&self) -> Result<Vec<League>, Error> {
        let payload: LeaguesPayload = self.fetch_as(&Endpoint::AllLeagues, ALL_LEAGUES_KEY).await?;
        Ok(payload.leagues.unwrap_or_default())
    }

    async fn get_season_badge(&self, league_id: &str) -> Result<Option<String>, Error> {
        let key = season_badge_key(league_id);
        let payload: SeasonsPayload = self
            .fetch_as(&Endpoint::SeasonBadges(league_id.into()), &key)
            .await?;
        let badge = payload.first_badge();
        if badge.is_none() {
            debug!(league_id, "no season badge");
        }
        Ok(badge)
    }

    fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn cache_size(&self) -> usize {
        self.cache.len().await
    }
}
