mod catalog;
mod profile;
mod recommend;
mod score;
mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::catalog::CatalogCommands;

#[derive(Debug, Parser)]
#[command(name = "makerfit-cli")]
#[command(about = "Software-fit recommendation command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank catalog entries for a profile and print scores with reasons
    Score {
        /// Path to a profile JSON file
        #[arg(long)]
        profile: PathBuf,
        /// Catalog YAML file (defaults to MAKERFIT_CATALOG_PATH)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Maximum number of candidates to print
        #[arg(long, default_value = "8")]
        limit: usize,
    },
    /// Produce narrative recommendations and a fit decision for a profile
    Recommend {
        /// Path to a profile JSON file
        #[arg(long)]
        profile: PathBuf,
        /// Catalog YAML file (defaults to MAKERFIT_CATALOG_PATH; ignored with --persist)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// User the recommendation is stored for
        #[arg(long)]
        user: Option<Uuid>,
        /// Use the database catalog and cache the result per user and profile
        #[arg(long, requires = "user")]
        persist: bool,
    },
    /// Print the cache fingerprint of a profile
    Fingerprint {
        /// Path to a profile JSON file
        #[arg(long)]
        profile: PathBuf,
    },
    /// Catalog management
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Database utilities
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = makerfit_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Score {
            profile,
            catalog,
            limit,
        }) => score::run_score(&config, &profile, catalog.as_deref(), limit)?,
        Some(Commands::Recommend {
            profile,
            catalog,
            user,
            persist,
        }) => match (persist, user) {
            (true, Some(user_id)) => {
                recommend::run_recommend_persisted(&config, &profile, user_id).await?;
            }
            _ => recommend::run_recommend(&config, &profile, catalog.as_deref()).await?,
        },
        Some(Commands::Fingerprint { profile }) => score::run_fingerprint(&profile)?,
        Some(Commands::Catalog { command }) => match command {
            CatalogCommands::Import { file } => {
                catalog::run_catalog_import(&config, file.as_deref()).await?;
            }
        },
        Some(Commands::Db { command }) => {
            let pool = makerfit_db::connect_pool_from_config(&config).await?;
            match command {
                DbCommands::Ping => {
                    makerfit_db::health_check(&pool).await?;
                    println!("database reachable");
                }
                DbCommands::Migrate => {
                    let applied = makerfit_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        None => println!("makerfit-cli: no command given; see --help"),
    }

    Ok(())
}
