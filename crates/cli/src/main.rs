//! Belle Cosmetics CLI - Store seeding and account management.
//!
//! # Usage
//!
//! ```bash
//! # Seed the snapshot store with the demo accounts
//! belle-cli seed
//!
//! # Create an admin account
//! belle-cli admin create -e chef@bellecosmetics.example -n "Chef" -p "un-mot-de-passe-long"
//! ```
//!
//! # Commands
//!
//! - `seed` - Write the demo admin and customer accounts into the store
//! - `admin create` - Create admin accounts
//!
//! The store file defaults to `data/store.json` and can be moved with
//! `--store` or the `BELLE_STORE_PATH` environment variable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "belle-cli")]
#[command(author, version, about = "Belle Cosmetics CLI tools")]
struct Cli {
    /// Path to the JSON store snapshot
    #[arg(long, env = "BELLE_STORE_PATH", default_value = "data/store.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store with the demo accounts
    Seed,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Seed => commands::seed::run(&cli.store),
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
            } => commands::admin::create(&cli.store, &email, &name, &password),
        },
    }
}
