// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One-shot administrative tool.
//!
//! Resets the built-in `admin` account and creates blood banks. Reads the
//! same database settings as the server.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use bloodlink_persistence::Persistence;
use bloodlink_server::DatabaseArgs;
use clap::{Parser, Subcommand};
use tracing::info;

/// BloodLink setup tool.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Delete any `admin` account and create a fresh one that must change
    /// its password on first login.
    ResetAdmin {
        /// Temporary password for the new account.
        #[arg(long, default_value = "password")]
        password: String,
    },
    /// Create a blood bank.
    AddBank {
        /// Bank name; must be unique.
        name: String,
        /// Optional location.
        #[arg(long)]
        location: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if args.database.is_in_memory() {
        return Err(
            "refusing to run against an in-memory database; set --db-name or DB_NAME".into(),
        );
    }

    info!("Connecting to the database");
    let mut persistence: Persistence = args.database.open()?;

    let message: String = match args.command {
        Command::ResetAdmin { password } => {
            bloodlink_api::reset_admin(&mut persistence, &password)?.message
        }
        Command::AddBank { name, location } => {
            bloodlink_api::add_bank(&mut persistence, &name, location.as_deref())?.message
        }
    };

    info!("{message}");
    Ok(())
}
