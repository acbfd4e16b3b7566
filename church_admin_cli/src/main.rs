mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use church_admin_lib::config::{API_TOKEN_VAR, API_URL_VAR};
use church_admin_lib::types::Resource;
use church_admin_lib::AdminConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "church-admin")]
#[command(about = "Browse church administration records: finance, churches and members")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides CHURCH_ADMIN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides CHURCH_ADMIN_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List fund transfer requests
    Funds(commands::finance::FinanceArgs),
    /// List remittances
    Remittances(commands::finance::FinanceArgs),
    /// List fund top-ups
    TopUps(commands::finance::FinanceArgs),
    /// List expenses
    Expenses(commands::finance::FinanceArgs),
    /// Search the member directory
    Users(commands::directory::UsersArgs),
    /// List churches
    Churches(commands::churches::ChurchesArgs),
    /// List zones
    Zones(commands::churches::ZonesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("church_admin=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::parse(&cli.output);

    let config = AdminConfig::from_lookup(|key| match key {
        API_URL_VAR if cli.api_url.is_some() => cli.api_url.clone(),
        API_TOKEN_VAR if cli.token.is_some() => cli.token.clone(),
        _ => std::env::var(key).ok(),
    })?;
    let client = config.client()?;

    match &cli.command {
        Commands::Funds(args) => {
            commands::finance::run(Resource::FundTransfers, args, &client, &format).await?
        }
        Commands::Remittances(args) => {
            commands::finance::run(Resource::Remittances, args, &client, &format).await?
        }
        Commands::TopUps(args) => {
            commands::finance::run(Resource::TopUps, args, &client, &format).await?
        }
        Commands::Expenses(args) => {
            commands::finance::run(Resource::Expenses, args, &client, &format).await?
        }
        Commands::Users(args) => commands::directory::run(args, &client, &format).await?,
        Commands::Churches(args) => commands::churches::run_churches(args, &client, &format).await?,
        Commands::Zones(args) => commands::churches::run_zones(args, &client, &format).await?,
    }

    Ok(())
}
