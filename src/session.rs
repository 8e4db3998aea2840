use std::str::FromStr;

use crate::filter::SportFilter;

pub const HELP: &str = "\
commands:
  search <text>     filter by name or alternate name (empty clears)
  sport <name>      filter by exact sport; `sport *` removes the filter
  sports            list the available sports
  clear             clear all filters
  click <id>        toggle the badge of a league card
  broken <id>       report that a shown badge image failed to display
  reload            reload after a failed league fetch
  cache             show the number of cached responses
  clear-cache       drop all cached responses
  help              show this message
  quit              leave";

// no sport category is named "*", so it can stand for "any"
const ANY_SPORT: &str = "*";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Search(String),
    Sport(SportFilter),
    Sports,
    Clear,
    Click(String),
    ImageFailed(String),
    Reload,
    CacheSize,
    ClearCache,
    Help,
    Quit,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let required = |name: &'static str| {
            if arg.is_empty() {
                Err(InputError::MissingArgument(name))
            } else {
                Ok(arg.to_string())
            }
        };

        Ok(match command {
            "search" | "s" => Input::Search(arg.to_string()),
            "sport" => match required("sport")?.as_str() {
                ANY_SPORT => Input::Sport(SportFilter::All),
                sport => Input::Sport(SportFilter::Only(sport.to_string())),
            },
            "sports" => Input::Sports,
            "clear" => Input::Clear,
            "click" | "c" => Input::Click(required("click")?),
            "broken" => Input::ImageFailed(required("broken")?),
            "reload" | "r" => Input::Reload,
            "cache" => Input::CacheSize,
            "clear-cache" => Input::ClearCache,
            "help" | "?" => Input::Help,
            "quit" | "exit" | "q" => Input::Quit,
            other => return Err(InputError::Unknown(other.to_string())),
        })
    }
}
