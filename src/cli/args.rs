use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gita")]
#[command(version)]
#[command(about = "Serves Gita chapter metadata and audio, fetched lazily from the origin", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Cache directory (overrides configuration)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Port to listen on (overrides configuration)
    #[arg(short, long)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Download chapter assets into the cache ahead of time
    Fetch {
        /// Chapter ids to fetch
        #[arg(allow_negative_numbers = true, required_unless_present = "all")]
        ids: Vec<i64>,

        /// Fetch every chapter in the catalog
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },
    /// List chapters and what is cached locally
    List,
    /// Initialize configuration
    Init,
    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_no_subcommand() {
        let cli = Cli::try_parse_from(["gita", "--port", "8080"]).unwrap();
        assert_eq!(cli.port, Some(8080));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_fetch_ids() {
        let cli = Cli::try_parse_from(["gita", "fetch", "2", "-1"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Fetch {
                ids: vec![2, -1],
                all: false
            })
        );
    }

    #[test]
    fn test_fetch_requires_ids_or_all() {
        assert!(Cli::try_parse_from(["gita", "fetch"]).is_err());
        assert!(Cli::try_parse_from(["gita", "fetch", "--all", "3"]).is_err());
        assert!(Cli::try_parse_from(["gita", "fetch", "--all"]).is_ok());
    }
}
