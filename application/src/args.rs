//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use service::read::user::list::RoleFilter;

/// Manager of the user directory.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to run.
    ///
    /// [`Command::Serve`] is run if omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to run.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Serves the HTTP API forwarding requests to the remote collection.
    Serve,

    /// Prints a single page of the users listing.
    List(List),
}

/// Options of the [`Command::List`].
#[derive(Clone, Debug, clap::Args)]
pub struct List {
    /// Case-insensitive substring of a name or an email to search for.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Exact role to filter by, or `all`.
    #[arg(short, long, default_value = "all")]
    pub role: RoleFilter,

    /// Number of the page to print, starting from 1.
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}
