use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::card::{ClickEffect, LeagueCard};
use crate::client::Client;
use crate::filter::{self, FilterCriteria, SportFilter};
use crate::types::League;

pub const LEAGUES_FAILED: &str = "Failed to load leagues. Please try again later.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready(Vec<League>),
}

/// Owns the league list, the filter criteria and one card per league that
/// has been clicked. Everything shown is derived from those on demand.
pub struct ViewController<C> {
    client: C,
    state: LoadState,
    criteria: FilterCriteria,
    cards: HashMap<String, LeagueCard>,
}

impl<C: Client> ViewController<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: LoadState::Loading,
            criteria: FilterCriteria::default(),
            cards: HashMap::new(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        self.state = match self.client.get_all_leagues().await {
            Ok(leagues) => {
                info!(count = leagues.len(), "leagues loaded");
                LoadState::Ready(leagues)
            }
            Err(e) => {
                warn!(error = %e, status = ?e.remote_status(), "failed to load leagues");
                LoadState::Failed(LEAGUES_FAILED.into())
            }
        };
    }

    /// Full reload out of the error state: drops the request cache and all
    /// view state, then loads again. Returns `false` outside the error state.
    pub async fn reload(&mut self) -> bool {
        if !matches!(self.state, LoadState::Failed(_)) {
            debug!("reload ignored outside the error state");
            return false;
        }
        self.client.clear_cache();
        self.criteria = FilterCriteria::default();
        self.cards.clear();
        self.load().await;
        true
    }

    pub fn leagues(&self) -> &[League] {
        match &self.state {
            LoadState::Ready(leagues) => leagues.as_slice(),
            _ => &[],
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.criteria.search = text.into();
    }

    pub fn set_sport(&mut self, sport: SportFilter) {
        self.criteria.sport = sport;
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    pub fn distinct_sports(&self) -> Vec<String> {
        filter::distinct_sports(self.leagues())
    }

    pub fn visible_leagues(&self) -> Vec<&League> {
        filter::visible_leagues(self.leagues(), &self.criteria)
    }

    pub fn card(&self, league_id: &str) -> Option<&LeagueCard> {
        self.cards.get(league_id)
    }

    fn visible_league(&self, league_id: &str) -> Option<League> {
        self.visible_leagues()
            .into_iter()
            .find(|l| l.id == league_id)
            .cloned()
    }

    /// Clicks the card of a visible league, fetching its badge the first
    /// time. Returns `false` when no such card is on display.
    pub async fn click_card(&mut self, league_id: &str) -> bool {
        let Some(league) = self.visible_league(league_id) else {
            return false;
        };

        let effect = self.cards.entry(league.id.clone()).or_default().click();
        if effect == ClickEffect::FetchBadge {
            debug!(league_id, "fetching badge");
            let result = self.client.get_season_badge(&league.id).await;
            if let Err(e) = &result {
                warn!(league_id, error = %e, status = ?e.remote_status(), "failed to fetch badge");
            }
            if let Some(card) = self.cards.get_mut(&league.id) {
                card.resolve(&league, result);
            }
        }
        true
    }

    /// Reports that a shown badge image could not be displayed.
    pub fn report_image_failure(&mut self, league_id: &str) -> bool {
        let failed = self
            .cards
            .get_mut(league_id)
            .is_some_and(|card| card.image_failed());
        if failed {
            info!(league_id, "badge image failed to display");
        }
        failed
    }
}
