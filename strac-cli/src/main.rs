// SPDX-FileCopyrightText: 2026 Strac contributors
// SPDX-License-Identifier: MIT

//! `strac`: browse a Store database the way a repository browser would.
//!
//! Configuration comes from `$STRAC_CONFIG`, else `./strac.toml` when it
//! exists, else defaults. `$STRAC_DATABASE` overrides the connection.

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::exit;

use clap::{Parser, Subcommand};
use strac::{Config, ConfigError, Node, NodeKind, Repository, RepositoryConnector, StoreConnector};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "strac", about = "Browse a Smalltalk Store database", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// List the children of a directory node
    #[command(name = "ls")]
    List {
        /// Virtual path, the root when omitted
        path: Option<String>,
        /// Revision, the latest when omitted
        rev: Option<String>,
    },
    /// Print the rendered content of a leaf
    Cat {
        path: String,
        rev: Option<String>,
    },
    /// Print the canonical form of a path
    Normalize { path: String },
    /// Print the repository types on offer
    Types,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("{0} is a directory")]
    IsDirectory(String),

    #[error("{0} is not a directory")]
    NotDirectory(String),

    #[error("No repository types available")]
    NoTypes,

    #[error(transparent)]
    Strac(#[from] strac::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

fn load_config() -> Result<Config, ConfigError> {
    let mut config = match env::var("STRAC_CONFIG") {
        Ok(path) => Config::from_file(Path::new(&path))?,
        Err(_) => {
            if Path::new("strac.toml").exists() {
                Config::from_file(Path::new("strac.toml"))?
            } else {
                Config::default()
            }
        }
    };
    if let Ok(database) = env::var("STRAC_DATABASE") {
        config.store_database_connection = database;
    }
    Ok(config)
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("strac={0},strac_store_db={0}", config.log_level))
    });
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn list_line(node: &Node<'_>) -> String {
    let marker = match node.kind() {
        NodeKind::Directory => "/",
        NodeKind::File => "",
    };
    format!("{}{}\t{}\t{}", node.name(), marker, node.revision(), node.path())
}

fn execute(
    command: &Command,
    connector: &StoreConnector,
    config: &Config,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if *command == Command::Types {
        let types = connector.supported_types();
        if types.is_empty() {
            return Err(CliError::NoTypes);
        }
        for (name, priority) in types {
            writeln!(out, "{name}\t{priority}")?;
        }
        return Ok(());
    }

    let repos = connector.get_repository("store", config)?;
    match command {
        Command::List { path, rev } => {
            let node = repos.get_node(path.as_deref().unwrap_or("/"), rev.as_deref())?;
            if node.kind() != NodeKind::Directory {
                return Err(CliError::NotDirectory(node.path().to_owned()));
            }
            for entry in node.entries() {
                writeln!(out, "{}", list_line(&entry?))?;
            }
        }
        Command::Cat { path, rev } => {
            let node = repos.get_node(path, rev.as_deref())?;
            let content = node
                .content()?
                .ok_or_else(|| CliError::IsDirectory(node.path().to_owned()))?;
            out.write_all(content.as_bytes())?;
        }
        Command::Normalize { path } => {
            writeln!(out, "{}", repos.normalize_path(Some(path.as_str()))?)?;
        }
        Command::Types => {}
    }
    Ok(())
}

fn run(command: Command) -> i32 {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };
    init_logging(&config);
    debug!(?command, "Running");

    let connector = StoreConnector::probe();
    let mut stdout = io::stdout().lock();
    match execute(&command, &connector, &config, &mut stdout) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("strac: {e}");
            1
        }
    }
}

fn main() {
    exit(run(Cli::parse().command));
}
