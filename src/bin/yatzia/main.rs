mod config;
mod seed_data;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::{Cell, Table, presets::UTF8_FULL};

use config::Config;
use yatzia::Client;

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_PREFIX: &str = "dev";

#[derive(Parser)]
#[command(name = "yatzia")]
#[command(version = "0.1.0")]
#[command(about = "Administration tool for the Yatzia data layer", long_about = None)]
struct Cli {
    /// Redis connection URL
    #[arg(long, env = "REDIS_URL")]
    url: Option<String>,

    /// Key prefix (environment namespace)
    #[arg(long, env = "YATZIA_PREFIX")]
    prefix: Option<String>,

    /// Optional TOML config file (flags and env take precedence)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the team roster and the team/topic communities (idempotent;
    /// existing member counts are preserved)
    Seed,
    /// Print the team roster
    Teams,
    /// Print all communities with their member counts
    Communities,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let url = cli
        .url
        .or(config.redis.url)
        .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string());
    let prefix = cli
        .prefix
        .or(config.yatzia.prefix)
        .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

    let client = Client::connect(&url, prefix.clone())
        .await
        .with_context(|| format!("failed to connect to {url}"))?;

    match cli.command {
        Commands::Seed => seed(&client).await,
        Commands::Teams => teams(&client).await,
        Commands::Communities => communities(&client).await,
    }
}

async fn seed(client: &Client) -> Result<()> {
    let mut team_store = client.teams();
    for team in seed_data::teams() {
        team_store.put(&team).await?;
    }
    println!("{} {} קבוצות נזרעו", "✔".green(), seed_data::teams().len());

    let mut community_store = client.communities();
    let team_communities = seed_data::team_communities();
    let team_count = team_communities.len();
    for community in team_communities {
        community_store.upsert_seed(community).await?;
    }
    println!("{} {team_count} קהילות קבוצה נזרעו", "✔".green());

    let topic_communities = seed_data::topic_communities();
    let topic_count = topic_communities.len();
    for community in topic_communities {
        community_store.upsert_seed(community).await?;
    }
    println!("{} {topic_count} קהילות נושא נזרעו", "✔".green());

    Ok(())
}

async fn teams(client: &Client) -> Result<()> {
    let mut store = client.teams();
    let mut teams = store.list().await?;
    teams.sort_by(|a, b| a.league.cmp(&b.league).then_with(|| a.name.cmp(&b.name)));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["ID", "שם", "ליגה"]);
    for team in &teams {
        table.add_row([Cell::new(&team.id), Cell::new(&team.name), Cell::new(&team.league)]);
    }
    println!("{table}");
    println!("{} קבוצות", teams.len());
    Ok(())
}

async fn communities(client: &Client) -> Result<()> {
    let mut store = client.communities();
    let communities = store.list().await?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["ID", "שם", "חברים"]);
    for community in &communities {
        table.add_row([
            Cell::new(&community.id),
            Cell::new(&community.name),
            Cell::new(community.member_count),
        ]);
    }
    println!("{table}");
    println!("{} קהילות", communities.len());
    Ok(())
}
