use std::collections::BTreeSet;

use crate::types::League;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SportFilter {
    #[default]
    All,
    Only(String),
}

impl SportFilter {
    pub fn matches(&self, league: &League) -> bool {
        match self {
            SportFilter::All => true,
            SportFilter::Only(sport) => league.sport.as_deref() == Some(sport.as_str()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub sport: SportFilter,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.sport != SportFilter::All
    }

    /// Case-insensitive substring match on the name or alternate name.
    pub fn matches_search(&self, league: &League) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        league.name.to_lowercase().contains(&needle)
            || league
                .alternate_name()
                .is_some_and(|alt| alt.to_lowercase().contains(&needle))
    }

    pub fn matches(&self, league: &League) -> bool {
        self.matches_search(league) && self.sport.matches(league)
    }
}

/// Non-empty sport categories, deduplicated and sorted.
pub fn distinct_sports(leagues: &[League]) -> Vec<String> {
    leagues
        .iter()
        .filter_map(League::sport)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn visible_leagues<'a>(leagues: &'a [League], criteria: &FilterCriteria) -> Vec<&'a League> {
    leagues.iter().filter(|l| criteria.matches(l)).collect()
}
