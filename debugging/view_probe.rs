//! Build a view against the live catalog and print it as JSON.
//! Usage:
//!   cargo run --bin view_probe -- detail movie <id>
//!   cargo run --bin view_probe -- watch tv <id>
//!   cargo run --bin view_probe -- search <query>
//! Reads the same environment as the server (.env supported).

use anyhow::{anyhow, bail, Context, Result};
use dotenvy::dotenv;
use serde_json::Value;
use sinema::config::Settings;
use sinema::models::MediaType;
use sinema::tmdb::TmdbClient;
use sinema::view;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    let args: Vec<String> = env::args().skip(1).collect();
    let settings = Settings::from_env()?;
    let client = TmdbClient::new(&settings.api_base_url, &settings.api_key)?;

    let output: Value = match args.first().map(String::as_str) {
        Some("detail") => {
            let (media_type, id) = media_args(&args)?;
            let view = view::build_media_view(&client, media_type, id)
                .await
                .map_err(|e| anyhow!(e))?;
            serde_json::to_value(view)?
        }
        Some("watch") => {
            let (media_type, id) = media_args(&args)?;
            let view = view::build_watch_view(&client, &settings.embed_templates, media_type, id)
                .await
                .map_err(|e| anyhow!(e))?;
            serde_json::to_value(view)?
        }
        Some("search") => {
            let query = args[1..].join(" ");
            let view = view::build_search_view(&client, &query)
                .await
                .map_err(|e| anyhow!(e))?;
            serde_json::to_value(view)?
        }
        _ => bail!("usage: view_probe <detail|watch> <movie|tv> <id> | search <query>"),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn media_args(args: &[String]) -> Result<(MediaType, &str)> {
    let media_type = args
        .get(1)
        .context("missing media type")?
        .parse::<MediaType>()?;
    let id = args.get(2).context("missing id")?;
    Ok((media_type, id.as_str()))
}
