use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use status_kv::config::{Config, ConfigError};
use status_kv::{LocalItemStore, Scalar, ScalarKind, StatusClient, StoreError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Client(#[from] status_kv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid log filter: {0}")]
    LogFilter(String),

    #[error("Missing {0}: pass it on the command line or in the config file")]
    MissingSetting(&'static str),
}

#[derive(Parser)]
#[command(name = "status-kv")]
#[command(about = "Store, fetch and delete typed status values in an item store table")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "STATUS_KV_CONFIG")]
    config: Option<PathBuf>,

    /// Store path (overrides the config file)
    #[arg(long, global = true, env = "STATUS_KV_PATH")]
    path: Option<PathBuf>,

    /// Table name (overrides the config file)
    #[arg(long, global = true)]
    table: Option<String>,

    /// Primary-key attribute name (overrides the config file)
    #[arg(long, global = true)]
    key_attribute: Option<String>,

    /// Log filter, e.g. "info" or "status_kv=debug"
    #[arg(long, global = true, env = "STATUS_KV_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the store and create the configured table
    Init,

    /// Store a status value under a key
    Store {
        /// Key of the record
        key: String,

        /// Status value
        value: String,

        /// How to read the key
        #[arg(long, value_enum, default_value_t = ScalarKind::Str)]
        key_type: ScalarKind,

        /// How to read the value
        #[arg(long, value_enum, default_value_t = ScalarKind::Str)]
        value_type: ScalarKind,
    },

    /// Print the decoded status stored under a key
    Fetch {
        /// Key of the record
        key: String,

        /// How to read the key
        #[arg(long, value_enum, default_value_t = ScalarKind::Str)]
        key_type: ScalarKind,
    },

    /// Print the raw record stored under a key as JSON
    FetchRaw {
        /// Key of the record
        key: String,

        /// How to read the key
        #[arg(long, value_enum, default_value_t = ScalarKind::Str)]
        key_type: ScalarKind,
    },

    /// Delete the record stored under a key
    Delete {
        /// Key of the record
        key: String,

        /// How to read the key
        #[arg(long, value_enum, default_value_t = ScalarKind::Str)]
        key_type: ScalarKind,
    },
}

/// Settings after merging the config file with command-line overrides.
struct Settings {
    path: PathBuf,
    table: String,
    key_attribute: String,
    log_level: String,
}

impl Settings {
    fn resolve(cli: &Cli) -> Result<Self, AppError> {
        let config = cli.config.as_ref().map(Config::from_file).transpose()?;

        let table = cli
            .table
            .clone()
            .or_else(|| config.as_ref().map(|c| c.client.table.clone()))
            .ok_or(AppError::MissingSetting("table"))?;
        let key_attribute = cli
            .key_attribute
            .clone()
            .or_else(|| config.as_ref().map(|c| c.client.key_attribute.clone()))
            .ok_or(AppError::MissingSetting("key attribute"))?;
        let path = cli
            .path
            .clone()
            .or_else(|| config.as_ref().map(|c| c.store.path.clone()))
            .unwrap_or_else(|| PathBuf::from(status_kv::config::DEFAULT_STORE_PATH));
        let log_level = cli
            .log_level
            .clone()
            .or_else(|| config.as_ref().and_then(|c| c.logging.level.clone()))
            .unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            path,
            table,
            key_attribute,
            log_level,
        })
    }
}

fn init_logging(level: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(level).map_err(|e| AppError::LogFilter(e.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn open_client(settings: &Settings) -> Result<StatusClient<LocalItemStore>, AppError> {
    let store = LocalItemStore::open(&settings.path)?;
    Ok(StatusClient::new(
        store,
        settings.table.clone(),
        settings.key_attribute.clone(),
    ))
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;
    init_logging(&settings.log_level)?;

    match cli.command {
        Commands::Init => {
            let store = LocalItemStore::open_or_init(&settings.path)?;
            match store.create_table(&settings.table, &settings.key_attribute) {
                Ok(()) => println!(
                    "Created table '{}' keyed by '{}' in {}",
                    settings.table,
                    settings.key_attribute,
                    settings.path.display()
                ),
                Err(StoreError::TableExists(_)) => {
                    println!("Table '{}' already exists", settings.table)
                }
                Err(e) => return Err(e.into()),
            }
            Ok(())
        }
        Commands::Store {
            key,
            value,
            key_type,
            value_type,
        } => {
            let client = open_client(&settings)?;
            let key = Scalar::parse_as(key_type, &key)?;
            let value = Scalar::parse_as(value_type, &value)?;
            client.store(&key, &value)?;
            println!("Stored '{}' in table '{}'", key, settings.table);
            Ok(())
        }
        Commands::Fetch { key, key_type } => {
            let client = open_client(&settings)?;
            let key = Scalar::parse_as(key_type, &key)?;
            match client.fetch_value(&key)? {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    eprintln!("Key '{}' not found in table '{}'", key, settings.table);
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::FetchRaw { key, key_type } => {
            let client = open_client(&settings)?;
            let key = Scalar::parse_as(key_type, &key)?;
            match client.fetch_raw(&key)? {
                Some(item) => {
                    println!("{}", serde_json::to_string_pretty(&item)?);
                }
                None => {
                    eprintln!("Key '{}' not found in table '{}'", key, settings.table);
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Delete { key, key_type } => {
            let client = open_client(&settings)?;
            let key = Scalar::parse_as(key_type, &key)?;
            client.delete(&key)?;
            println!("Deleted '{}' from table '{}'", key, settings.table);
            Ok(())
        }
    }
}
