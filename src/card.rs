//! Badge state of a single league card.
//!
//! A card starts collapsed with nothing resolved. The first click asks the
//! caller to fetch the badge; once an outcome is held, clicks only toggle its
//! visibility and never fetch again.

use crate::error::Error;
use crate::types::League;

pub const BADGE_FETCH_FAILED: &str = "Failed to load badge. Please try again.";
pub const BADGE_IMAGE_FAILED: &str = "Failed to load badge image";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BadgeOutcome {
    Image(String),
    Error(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CardState {
    #[default]
    Collapsed,
    Loading,
    Shown(BadgeOutcome),
    Hidden(BadgeOutcome),
}

#[derive(Debug, PartialEq, Eq)]
pub enum ClickEffect {
    FetchBadge,
    None,
}

#[derive(Clone, Debug, Default)]
pub struct LeagueCard {
    state: CardState,
}

impl LeagueCard {
    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self.state, CardState::Loading | CardState::Shown(_))
    }

    pub fn click(&mut self) -> ClickEffect {
        let (next, effect) = match std::mem::take(&mut self.state) {
            CardState::Collapsed => (CardState::Loading, ClickEffect::FetchBadge),
            CardState::Loading => (CardState::Loading, ClickEffect::None),
            CardState::Shown(outcome) => (CardState::Hidden(outcome), ClickEffect::None),
            CardState::Hidden(outcome) => (CardState::Shown(outcome), ClickEffect::None),
        };
        self.state = next;
        effect
    }

    /// Records the fetch result. Ignored unless a fetch is pending.
    pub fn resolve(&mut self, league: &League, result: Result<Option<String>, Error>) {
        if self.state != CardState::Loading {
            return;
        }
        let outcome = match result {
            Ok(Some(url)) => BadgeOutcome::Image(url),
            Ok(None) => BadgeOutcome::Error(format!("No season badge available for {}", league.name)),
            Err(_) => BadgeOutcome::Error(BADGE_FETCH_FAILED.into()),
        };
        self.state = CardState::Shown(outcome);
    }

    /// The image behind a shown badge could not be displayed. Terminal: the
    /// failure replaces the held image and nothing is fetched again.
    pub fn image_failed(&mut self) -> bool {
        match &self.state {
            CardState::Shown(BadgeOutcome::Image(_)) => {
                self.state = CardState::Shown(BadgeOutcome::Error(BADGE_IMAGE_FAILED.into()));
                true
            }
            _ => false,
        }
    }
}
