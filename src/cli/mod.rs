use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::services::config::{CURRENCY_ENV, DATA_DIR_ENV, LOG_ENV};
use crate::services::{Config, Journal};

mod add;
mod categories;
mod entries;
mod report;

pub use add::AddArgs;
pub use categories::{CategoriesArgs, CategoryAction};
pub use report::ReportArgs;

/// Personal spending journal with time-series and category breakdowns
#[derive(Parser)]
#[command(name = "spendlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding entries.json and categories.json (default: ~/.spendlog)
    #[arg(long, global = true, env = DATA_DIR_ENV, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Currency label shown next to amounts (default: THB)
    #[arg(long, global = true, env = CURRENCY_ENV)]
    currency: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive dashboard (default)
    Tui,

    /// Record a new expense
    Add(AddArgs),

    /// List recorded expenses
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an expense by id
    Delete {
        /// Entry id as shown by `list`
        id: u64,
    },

    /// Show totals, spending over time and spending by category
    Report(ReportArgs),

    /// List categories or add a custom one
    Categories(CategoriesArgs),
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = Config::resolve(self.data_dir, self.currency)?;
        let is_tui = matches!(self.command, None | Some(Commands::Tui));
        init_logging(&config, self.verbose, is_tui)?;

        let journal = Journal::open(&config.data_dir);
        tracing::debug!(data_dir = %config.data_dir.display(), "opened journal");

        match self.command {
            None | Some(Commands::Tui) => crate::tui::run(journal, config),
            Some(Commands::Add(args)) => args.run(&journal, &config),
            Some(Commands::List { json }) => entries::list(&journal, &config, json),
            Some(Commands::Delete { id }) => entries::delete(&journal, &config, id),
            Some(Commands::Report(args)) => args.run(&journal, &config),
            Some(Commands::Categories(args)) => args.run(&journal),
        }
    }
}

/// Route tracing output to stderr, or to the log file while the TUI owns
/// the terminal.
fn init_logging(config: &Config, verbose: bool, to_file: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if to_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["spendlog"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_list_json() {
        let cli = Cli::try_parse_from(["spendlog", "list", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { json: true })));
    }

    #[test]
    fn test_cli_parse_delete() {
        let cli = Cli::try_parse_from(["spendlog", "delete", "1704412800000"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Delete { id: 1704412800000 })
        ));
    }

    #[test]
    fn test_cli_parse_delete_requires_numeric_id() {
        assert!(Cli::try_parse_from(["spendlog", "delete", "abc"]).is_err());
    }

    #[test]
    fn test_cli_parse_global_data_dir_after_subcommand() {
        let cli =
            Cli::try_parse_from(["spendlog", "list", "--data-dir", "/tmp/spend"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/spend")));
    }

    #[test]
    fn test_cli_parse_currency_and_verbose() {
        let cli = Cli::try_parse_from(["spendlog", "-v", "--currency", "EUR", "tui"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.currency.as_deref(), Some("EUR"));
        assert!(matches!(cli.command, Some(Commands::Tui)));
    }
}
