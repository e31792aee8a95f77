use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client::SessionLink;
use common::{SessionId, DEFAULT_SERVER_URL, WS_PATH};
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "snake-terminal", about = "Play multiplayer snake in the terminal")]
pub struct Args {
    /// Base URL of the game server (e.g. http://localhost:8080). A `gameId`
    /// query parameter selects the session to join.
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    pub url: String,

    /// Game session to join; overrides any `gameId` in --url
    #[arg(long)]
    pub game_id: Option<String>,

    /// File receiving log output (the terminal itself is taken by the UI)
    #[arg(long, default_value = "/tmp/snake-client.log")]
    pub log_file: PathBuf,

    /// Do not open the websocket on start-up
    #[arg(long)]
    pub no_auto_init: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the session link is built from. May carry a `gameId`.
    pub page_url: Url,
    pub endpoint: Url,
    pub game_id: Option<SessionId>,
    pub log_file: PathBuf,
    pub auto_init: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let page_url = normalize_base_url(&args.url)?;
        let endpoint = websocket_url(&page_url)?;

        Ok(Self {
            page_url,
            endpoint,
            game_id: args.game_id.and_then(SessionId::new),
            log_file: args.log_file,
            auto_init: !args.no_auto_init,
        })
    }

    /// Session link for the configured page, with `--game-id` applied.
    pub fn session_link(&self) -> SessionLink {
        let mut link = SessionLink::from_page_url(self.page_url.clone());
        if let Some(id) = &self.game_id {
            link.set(id.clone());
        }
        link
    }
}

pub fn normalize_base_url(raw: &str) -> Result<Url> {
    match Url::parse(raw) {
        Ok(url) if url.has_host() => Ok(url),
        _ => Url::parse(&format!("http://{raw}")).context("Invalid base URL"),
    }
}

pub fn websocket_url(base: &Url) -> Result<Url> {
    let mut ws_url = base.clone();
    let scheme = match base.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    ws_url
        .set_scheme(scheme)
        .map_err(|_| anyhow!("Failed to set websocket scheme"))?;
    ws_url.set_path(WS_PATH);
    ws_url.set_query(None);
    ws_url.set_fragment(None);
    Ok(ws_url)
}
