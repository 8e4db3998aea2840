use anyhow::bail;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api_client::SportsDbClient;
use crate::client::Client;
use crate::config::Config;
use crate::filter::SportFilter;
use crate::render;
use crate::session::{Input, HELP};
use crate::view::{LoadState, ViewController};

#[derive(Parser, Debug)]
#[command(about = "Browse sports leagues and their season badges")]
pub enum Cmd {
    /// List leagues, optionally filtered
    Leagues {
        /// Case-insensitive match on the name or alternate name
        #[arg(short, long)]
        search: Option<String>,
        /// Exact sport category
        #[arg(long)]
        sport: Option<String>,
    },
    /// List the distinct sports
    Sports,
    /// Show the season badge of a league
    Badge { id: String },
    /// Interactive session reading commands from stdin
    Browse,
}

async fn load_leagues<C: Client>(view: &mut ViewController<C>) -> anyhow::Result<()> {
    println!("fetching leagues...");
    view.load().await;
    if let LoadState::Failed(message) = view.state() {
        bail!("{message}");
    }
    Ok(())
}

async fn browse<C: Client>(mut view: ViewController<C>) -> anyhow::Result<()> {
    view.load().await;
    println!("{}", render::Screen(&view));
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let input = match line.parse::<Input>() {
            Ok(input) => input,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match input {
            Input::Search(text) => view.set_search(text),
            Input::Sport(sport) => view.set_sport(sport),
            Input::Clear => view.clear_filters(),
            Input::Sports => {
                for option in render::sport_options(&view.distinct_sports()) {
                    println!("{option}");
                }
                continue;
            }
            Input::Click(id) => {
                if !view.click_card(&id).await {
                    println!("no league card {id} on display");
                    continue;
                }
            }
            Input::ImageFailed(id) => {
                if !view.report_image_failure(&id) {
                    println!("league {id} is not showing a badge image");
                    continue;
                }
            }
            Input::Reload => {
                if !view.reload().await {
                    println!("nothing to reload");
                    continue;
                }
            }
            Input::CacheSize => {
                println!("{} cached responses", view.client().cache_size().await);
                continue;
            }
            Input::ClearCache => {
                view.client().clear_cache();
                println!("cache cleared");
                continue;
            }
            Input::Help => {
                println!("{HELP}");
                continue;
            }
            Input::Quit => break,
        }
        println!("{}", render::Screen(&view));
    }

    Ok(())
}

impl Cmd {
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        let client = SportsDbClient::new(&config)?;
        let mut view = ViewController::new(client);

        match self {
            Cmd::Leagues { search, sport } => {
                load_leagues(&mut view).await?;
                if let Some(search) = search {
                    view.set_search(search);
                }
                if let Some(sport) = sport {
                    view.set_sport(SportFilter::Only(sport));
                }
                println!("{}", render::Screen(&view));
            }
            Cmd::Sports => {
                load_leagues(&mut view).await?;
                for sport in view.distinct_sports() {
                    println!("{sport}");
                }
            }
            Cmd::Badge { id } => {
                load_leagues(&mut view).await?;
                if !view.click_card(&id).await {
                    bail!("no league with id {id}");
                }
                if let Some(league) = view.leagues().iter().find(|l| l.id == id) {
                    let card = render::CardView {
                        league,
                        card: view.card(&id),
                    };
                    print!("{card}");
                }
            }
            Cmd::Browse => browse(view).await?,
        }

        Ok(())
    }
}
