use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    #[serde(rename = "idLeague")]
    pub id: String,
    #[serde(rename = "strLeague")]
    pub name: String,
    #[serde(rename = "strSport", default)]
    pub sport: Option<String>,
    #[serde(rename = "strLeagueAlternate", default)]
    pub alternate_name: Option<String>,
}

impl League {
    /// Sport category, with absent and empty treated alike.
    pub fn sport(&self) -> Option<&str> {
        self.sport.as_deref().filter(|s| !s.is_empty())
    }

    pub fn alternate_name(&self) -> Option<&str> {
        self.alternate_name.as_deref().filter(|s| !s.is_empty())
    }
}

// the remote answers `{"leagues": null}` as readily as it omits the field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaguesPayload {
    #[serde(default)]
    pub leagues: Option<Vec<League>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    #[serde(rename = "strBadge", default)]
    pub badge: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonsPayload {
    #[serde(default)]
    pub seasons: Option<Vec<Season>>,
}

impl SeasonsPayload {
    /// Badge of the first season, if there is one and it is non-empty.
    pub fn first_badge(self) -> Option<String> {
        self.seasons?
            .into_iter()
            .next()?
            .badge
            .filter(|b| !b.is_empty())
    }
}
