use std::time::Duration;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::fetch::{DataSource, fetch_records};
use crate::io::log;
use crate::io::prefs::{PrefStore, prefs_path};
use crate::model::{Config, FilterCriteria, ProjectRecord};
use crate::ops::detail::resolve_detail;
use crate::ops::filter::{apply_filter, parse_date_bound};
use crate::ops::mapper::map_records;
use crate::tui::{self, RunOptions};

/// Level for CLI subcommands; stderr is shared with command output
const CLI_LOG_LEVEL: &str = "warn";

fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    config_io::load_config(cli.config.as_deref())
}

/// Pick the data source: `--file`, then `--url`, then `[source] url`
pub fn data_source(cli: &Cli, config: &Config) -> DataSource {
    if let Some(path) = &cli.file {
        return DataSource::File(path.clone());
    }
    DataSource::Http {
        url: cli
            .url
            .clone()
            .unwrap_or_else(|| config.source.url.clone()),
        timeout: Duration::from_secs(config.source.timeout_secs),
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Launch the interactive dashboard
pub fn run_tui(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;
    let state_dir = config_io::state_dir();
    log::init_file_logging(&state_dir, &config.log.level);

    let prefs = if cli.no_persist {
        PrefStore::in_memory()
    } else {
        PrefStore::open(prefs_path(&state_dir))
    };
    let source = data_source(&cli, &config);
    tracing::info!(source = %source.describe(), "starting dashboard");

    tui::run(RunOptions {
        source,
        config,
        prefs,
    })
}

pub fn dispatch(mut cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // No subcommand → launch TUI
    let Some(command) = cli.command.take() else {
        return run_tui(cli);
    };

    let json = cli.json;
    let config = load_config(&cli)?;
    log::init_stderr_logging(CLI_LOG_LEVEL);

    let source = data_source(&cli, &config);
    let records = fetch_records(&source)?;

    match command {
        Commands::List(args) => cmd_list(&records, args, json),
        Commands::Show(args) => cmd_show(&records, args, &config, json),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    records: &[ProjectRecord],
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let criteria = FilterCriteria {
        search: args.search.unwrap_or_default(),
        from: parse_date_bound(args.from.as_deref().unwrap_or_default())?,
        to: parse_date_bound(args.to.as_deref().unwrap_or_default())?,
        ..Default::default()
    };
    let items = apply_filter(&map_records(records), &criteria);

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("No valid tasks to display...");
    } else {
        for item in &items {
            println!("{}", format_item_line(item));
        }
    }
    Ok(())
}

fn cmd_show(
    records: &[ProjectRecord],
    args: ShowArgs,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(detail) = resolve_detail(records, &args.id) else {
        return Err(format!("record not found: {}", args.id).into());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        for line in format_detail(&detail, config.features.finance) {
            println!("{}", line);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn file_flag_wins() {
        let cli = Cli::try_parse_from(["gantt", "--file", "data.json"]).unwrap();
        let source = data_source(&cli, &Config::default());
        assert_eq!(source, DataSource::File(PathBuf::from("data.json")));
    }

    #[test]
    fn url_flag_overrides_config() {
        let cli = Cli::try_parse_from(["gantt", "--url", "http://example.test/data"]).unwrap();
        let mut config = Config::default();
        config.source.timeout_secs = 5;
        assert_eq!(
            data_source(&cli, &config),
            DataSource::Http {
                url: "http://example.test/data".into(),
                timeout: Duration::from_secs(5),
            }
        );
    }

    #[test]
    fn config_url_is_default() {
        let cli = Cli::try_parse_from(["gantt"]).unwrap();
        let source = data_source(&cli, &Config::default());
        assert_eq!(source.describe(), crate::model::config::DEFAULT_URL);
    }
}
