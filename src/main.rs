use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use facility_admin::config::{AdminConfig, CliOverrides};

mod cmd;

#[derive(Parser)]
#[command(name = "facility-admin")]
#[command(version, about = "Manage facilities, rooms, and residents through the admin REST API")]
pub struct Cli {
    /// Path to a facility-admin.toml. Defaults to ./facility-admin.toml when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8080
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(long, global = true)]
    pub username: Option<String>,

    #[arg(long, global = true)]
    pub password: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_url: self.api_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            verbose: self.verbose,
            json_logs: self.json_logs,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage facilities
    Facility {
        #[command(subcommand)]
        command: FacilityCommands,
    },
    /// Manage rooms
    Room {
        #[command(subcommand)]
        command: RoomCommands,
    },
    /// Manage residents
    Resident {
        #[command(subcommand)]
        command: ResidentCommands,
    },
    /// Check that the configured credentials are accepted
    Login,
    /// View configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    /// Zero-based page number
    #[arg(long, default_value = "0")]
    pub page: u32,

    /// Rows per page (defaults to list.page_size)
    #[arg(long)]
    pub size: Option<u32>,

    /// Sort as property,direction; repeatable
    #[arg(long)]
    pub sort: Vec<String>,
}

#[derive(Subcommand, Clone)]
pub enum FacilityCommands {
    /// List facilities
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Full-text search
    Search {
        query: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one facility
    Show { id: i64 },
    /// Create a facility
    Create {
        #[arg(long)]
        name: String,
    },
    /// Edit a facility
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a facility
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Clone)]
pub enum RoomCommands {
    /// List rooms, optionally of one facility
    List {
        #[arg(long)]
        facility: Option<i64>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Full-text search
    Search {
        query: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one room
    Show { id: i64 },
    /// Create a room
    Create {
        #[arg(long)]
        number: String,
        /// Facility id
        #[arg(long)]
        facility: Option<i64>,
    },
    /// Edit a room
    Edit {
        id: i64,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        facility: Option<i64>,
    },
    /// Delete a room
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Clone)]
pub enum ResidentCommands {
    /// List residents, optionally of one room
    List {
        #[arg(long)]
        room: Option<i64>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Full-text search
    Search {
        query: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one resident
    Show { id: i64 },
    /// Create a resident
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        /// Room id
        #[arg(long)]
        room: Option<i64>,
    },
    /// Edit a resident
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// New email; an empty value clears it
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        room: Option<i64>,
    },
    /// Delete a resident
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let project_dir = std::env::current_dir().context("Failed to get current directory")?;

    let config = AdminConfig::resolve(&project_dir, cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;
    facility_admin::logging::init_tracing(&config);

    match &cli.command {
        Commands::Facility { command } => cmd::cmd_facility(&config, command.clone()).await?,
        Commands::Room { command } => cmd::cmd_room(&config, command.clone()).await?,
        Commands::Resident { command } => cmd::cmd_resident(&config, command.clone()).await?,
        Commands::Login => cmd::cmd_login(&config).await?,
        Commands::Config { command } => cmd::cmd_config(&config, command.clone())?,
    }

    Ok(())
}
