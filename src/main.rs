mod aggregate;
mod classify;
mod cli;
mod db;
mod error;
mod fmt;
mod ingest;
mod models;
mod normalize;
mod reports;
mod settings;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, ReportCommands, UsersCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Users { command } => match command {
            UsersCommands::Add { name } => cli::users::add(&name),
            UsersCommands::List => cli::users::list(),
        },
        Commands::Ingest { file, user } => cli::ingest::run(&file, user.as_deref()),
        Commands::Lines { search, user } => cli::lines::run(search.as_deref(), user.as_deref()),
        Commands::Line { mdn, user } => cli::line::run(&mdn, user.as_deref()),
        Commands::Report { command } => match command {
            ReportCommands::Summary { user } => cli::report::summary(user.as_deref()),
            ReportCommands::Recent { user, limit } => cli::report::recent(user.as_deref(), limit),
        },
        Commands::Export { output, user } => cli::export::run(output, user.as_deref()),
        Commands::Status => cli::status::run(),
        Commands::Demo => cli::demo::run(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "linetally", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
