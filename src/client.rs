use async_trait::async_trait;

use crate::error::Error;
use crate::types::League;

#[async_trait]
pub trait Client: Send + Sync {
    async fn get_all_leagues(&self) -> Result<Vec<League>, Error>;
    /// `Ok(None)` when the league has no season badge.
    async fn get_season_badge(&self, league_id: &str) -> Result<Option<String>, Error>;
    fn clear_cache(&self);
    async fn cache_size(&self) -> usize;
}
