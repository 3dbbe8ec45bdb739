//! `ajt-files`: drive the add-on's file helpers from a shell.

use std::path::PathBuf;
use std::process::ExitCode;

use ajt_files::config::ENV_LOG;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ajt-files", version, about = "AJT add-on file helpers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the per-user data directory (created if missing)
    Dir,

    /// Print the ancestor directories of a path, closest first
    Parents { path: PathBuf },

    /// Create a file or refresh its timestamps
    Touch { path: PathBuf },

    /// Delete a file; a missing file is not an error
    Rm { path: PathBuf },

    /// Exit 0 if the file exists and is non-empty, 1 otherwise
    Exists { path: PathBuf },

    /// Show a file in the preferred external viewer
    Open { path: PathBuf },

    /// Locate config.json above a directory (default: current directory)
    FindConfig { start: Option<PathBuf> },
}

/// Exits the process with code 1 after logging. Use for unrecoverable failures.
fn exit_fatal(msg: &str) -> ! {
    log::error!("{}", msg);
    std::process::exit(1);
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(ENV_LOG, "warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Dir => ajt_files::user_files_dir().map(|dir| println!("{}", dir.display())),
        Commands::Parents { path } => {
            for dir in ajt_files::walk_parents(&path) {
                println!("{}", dir.display());
            }
            Ok(())
        }
        Commands::Touch { path } => ajt_files::touch(&path),
        Commands::Rm { path } => ajt_files::remove(&path),
        Commands::Exists { path } => {
            return if ajt_files::file_exists(&path) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
        Commands::Open { path } => ajt_files::open_file(&path),
        Commands::FindConfig { start } => {
            let start = start.unwrap_or_else(|| PathBuf::from("."));
            ajt_files::find_config_json(&start).map(|p| println!("{}", p.display()))
        }
    };
    if let Err(e) = result {
        exit_fatal(&e.to_string());
    }
    ExitCode::SUCCESS
}
