use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod import_cmd;
mod logging;
mod state;

use import_cmd::{ColumnArgs, SourceArgs};

#[derive(Parser, Debug)]
#[command(
    name = "homeledger",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("HOMELEDGER_BUILD_SHA"), ")"),
    about = "Household bank-statement import"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ~/.homeledger/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a statement and emit the transactions as JSON
    Import {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Write JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show the first rows as they would be imported
    Preview {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Number of rows (default: import.preview_rows from config)
        #[arg(long)]
        rows: Option<usize>,
    },

    /// List decoded columns and the detected column mapping
    Columns {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Manage ~/.homeledger/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;
    logging::init_logging(&cfg.log.level, cli.verbose)?;

    match cli.command {
        Command::Import { source, columns, out } => {
            import_cmd::run_import(&cfg, &source, &columns, out).await?;
        }

        Command::Preview { source, columns, rows } => {
            import_cmd::run_preview(&cfg, &source, &columns, rows).await?;
        }

        Command::Columns { source } => {
            import_cmd::run_columns(&source).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path(cli.config.as_deref())?.display());
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_import_flags() {
        let cli = Cli::try_parse_from([
            "homeledger", "-v", "import", "march.csv", "--kind", "csv", "--date", "Posted",
            "--today", "2026-10-19", "--out", "out.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Import { source, columns, out } => {
                assert_eq!(source.file, PathBuf::from("march.csv"));
                assert_eq!(source.kind, Some(import_cmd::KindArg::Csv));
                assert_eq!(columns.date.as_deref(), Some("Posted"));
                assert_eq!(columns.today, chrono::NaiveDate::from_ymd_opt(2026, 10, 19));
                assert_eq!(out, Some(PathBuf::from("out.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_raw_column_conflicts_with_structured_flags() {
        let res = Cli::try_parse_from(["homeledger", "import", "a.txt", "--raw-column", "x", "--date", "d"]);
        assert!(res.is_err());
    }
}
