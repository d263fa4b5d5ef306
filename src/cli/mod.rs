pub mod demo;
pub mod export;
pub mod ingest;
pub mod init;
pub mod line;
pub mod lines;
pub mod report;
pub mod status;
pub mod users;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "linetally", about = "Carrier commission tracking CLI for wireless dealers.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up linetally: choose a data directory and initialize the database.
    Init {
        /// Path for linetally data (default: ~/Documents/linetally)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Manage owning users.
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },
    /// Ingest a carrier commission report (CSV).
    Ingest {
        /// Path to the CSV file
        file: String,
        /// User to ingest for (default: active user from settings)
        #[arg(long)]
        user: Option<String>,
    },
    /// List lines with totals and payment status.
    Lines {
        /// Filter by MDN fragment
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// Show one line with its transaction register.
    Line {
        /// 10-digit service number
        mdn: String,
        #[arg(long)]
        user: Option<String>,
    },
    /// Generate reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Export per-line totals to CSV.
    Export {
        /// Output file path (default: <data_dir>/exports/lines-YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// Show current database and summary statistics.
    Status,
    /// Load sample data (user, lines, transactions) to explore linetally.
    Demo,
    /// Generate a shell completion script.
    Completions {
        /// Shell: bash, zsh, fish, elvish, powershell
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum UsersCommands {
    /// Add a user and make it the active one.
    Add {
        /// User name, e.g. 'store-12'
        name: String,
    },
    /// List all users.
    List,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// KPI totals: upfront, monthly, chargebacks, active lines.
    Summary {
        #[arg(long)]
        user: Option<String>,
    },
    /// Latest transactions.
    Recent {
        #[arg(long)]
        user: Option<String>,
        /// How many transactions to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}
