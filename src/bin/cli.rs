//! filekv CLI
//!
//! Command-line interface for inspecting and editing a file backend root.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use filekv::{Backend, Config, Entry, FileBackend};
use tracing_subscriber::{fmt, EnvFilter};

/// filekv CLI
#[derive(Parser, Debug)]
#[command(name = "filekv")]
#[command(about = "CLI for the filekv file storage backend")]
#[command(version)]
struct Args {
    /// Root directory of the store
    #[arg(short, long)]
    path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Put {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Delete {
        /// The key to delete
        key: String,
    },

    /// List the direct children of a prefix
    List {
        /// The prefix to list (root if omitted)
        #[arg(default_value = "")]
        prefix: String,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,filekv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match Config::builder().path(&args.path).build() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let backend = FileBackend::new(config);

    tracing::debug!("filekv v{} at {}", filekv::VERSION, backend.root().display());

    match run(&backend, args.command) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(backend: &dyn Backend, command: Commands) -> filekv::Result<ExitCode> {
    match command {
        Commands::Get { key } => match backend.get(&key)? {
            Some(entry) => {
                println!("{}", String::from_utf8_lossy(&entry.value));
            }
            None => {
                eprintln!("not found");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Put { key, value } => {
            backend.put(&Entry::new(key, value))?;
        }
        Commands::Delete { key } => {
            backend.delete(&key)?;
        }
        Commands::List { prefix } => {
            for name in backend.list(&prefix)? {
                println!("{}", name);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
