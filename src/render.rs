use std::fmt;

use crate::card::{BadgeOutcome, CardState, LeagueCard};
use crate::client::Client;
use crate::filter::SportFilter;
use crate::types::League;
use crate::view::{LoadState, ViewController};

pub const ALL_SPORTS: &str = "All Sports";

/// Entries of the sport selector, "All Sports" first.
pub fn sport_options(sports: &[String]) -> Vec<String> {
    std::iter::once(ALL_SPORTS.to_string())
        .chain(sports.iter().cloned())
        .collect()
}

/// One league card: name, sport, alternate name and the badge line.
pub struct CardView<'a> {
    pub league: &'a League,
    pub card: Option<&'a LeagueCard>,
}

impl fmt::Display for CardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let league = self.league;
        writeln!(f, "[{}] {}", league.id, league.name)?;
        if let Some(sport) = league.sport() {
            writeln!(f, "    {sport}")?;
        }
        if let Some(alt) = league.alternate_name() {
            writeln!(f, "    {alt}")?;
        }

        match self.card.map(LeagueCard::state) {
            Some(CardState::Loading) => writeln!(f, "    Loading badge...")?,
            Some(CardState::Shown(BadgeOutcome::Image(url))) => writeln!(f, "    Badge: {url}")?,
            Some(CardState::Shown(BadgeOutcome::Error(message))) => writeln!(f, "    ❌ {message}")?,
            _ => {}
        }

        let hint = if self.card.is_some_and(LeagueCard::is_expanded) {
            "Click to hide"
        } else {
            "Click to view badge"
        };
        writeln!(f, "    ({hint})")
    }
}

/// The whole catalog screen for the controller's current state.
pub struct Screen<'a, C>(pub &'a ViewController<C>);

impl<C: Client> fmt::Display for Screen<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let view = self.0;
        let leagues = match view.state() {
            LoadState::Loading => return writeln!(f, "Loading sports leagues..."),
            LoadState::Failed(message) => {
                writeln!(f, "Error")?;
                writeln!(f, "{message}")?;
                return writeln!(f, "[reload] Retry");
            }
            LoadState::Ready(leagues) => leagues,
        };

        let criteria = view.criteria();
        let sport = match &criteria.sport {
            SportFilter::All => ALL_SPORTS,
            SportFilter::Only(sport) => sport.as_str(),
        };
        writeln!(f, "🏆 Sports Leagues")?;
        writeln!(f, "Search: {:?} | Sport: {sport}", criteria.search)?;
        writeln!(f)?;

        let visible = view.visible_leagues();
        if visible.is_empty() {
            writeln!(f, "No leagues found matching your criteria.")?;
            if criteria.is_active() {
                writeln!(f, "[clear] Clear Filters")?;
            }
        }
        for &league in &visible {
            let card = CardView {
                league,
                card: view.card(&league.id),
            };
            write!(f, "{card}")?;
        }

        writeln!(f)?;
        writeln!(f, "Showing {} of {} leagues", visible.len(), leagues.len())
    }
}
