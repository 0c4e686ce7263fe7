use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gantt", about = concat!("ganttboard v", env!("CARGO_PKG_VERSION"), " - project schedules in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Schedule endpoint (overrides [source] url)
    #[arg(long, global = true, conflicts_with = "file")]
    pub url: Option<String>,

    /// Read the schedule from a JSON file instead of the endpoint
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Do not read or write saved view preferences
    #[arg(long, global = true)]
    pub no_persist: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List chart rows after filtering
    List(ListArgs),
    /// Show project or subproject details
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive substring of the row or project ID
    #[arg(long, short)]
    pub search: Option<String>,
    /// Keep rows ending on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Keep rows starting on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Project or subproject ID
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn url_and_file_conflict() {
        let res = Cli::try_parse_from(["gantt", "--url", "http://x", "--file", "a.json"]);
        assert!(res.is_err());
    }

    #[test]
    fn list_flags_parse() {
        let cli = Cli::try_parse_from([
            "gantt", "list", "--search", "p1", "--from", "2024-01-06", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.search.as_deref(), Some("p1"));
                assert_eq!(args.from.as_deref(), Some("2024-01-06"));
                assert_eq!(args.to, None);
            }
            _ => panic!("expected list"),
        }
    }
}
