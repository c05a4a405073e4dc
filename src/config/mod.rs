pub mod cli;
pub mod toml_config;

use crate::config::cli::LocalTransactionFile;
use crate::core::PeriodProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};

#[cfg(feature = "cli")]
use crate::{
    config::{cli::SourceFormat, toml_config::HistoryConfig},
    core::history::current_period,
    utils::validation::validate_path,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::path::Path;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "month-match")]
#[command(about = "Check dd/MM/yyyy dates against a month and summarize transaction exports")]
pub struct CliConfig {
    /// Check a single dd/MM/yyyy date instead of summarizing a file
    #[arg(long)]
    pub date: Option<String>,

    /// Transaction export to summarize (CSV or JSON)
    #[arg(long)]
    pub input: Option<String>,

    /// Input format; inferred from the file extension when omitted
    #[arg(long)]
    pub format: Option<String>,

    /// Zero-based month (January = 0); defaults to the current month
    #[arg(long, allow_hyphen_values = true)]
    pub month: Option<i32>,

    /// Defaults to the current year
    #[arg(long, allow_hyphen_values = true)]
    pub year: Option<i32>,

    /// Passed through to the matcher; not compared
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    pub day: i32,

    /// Summarize only transactions dated today
    #[arg(long)]
    pub today: bool,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

/// Command-line flags merged over the optional TOML file.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: Option<LocalTransactionFile>,
    pub date: Option<String>,
    pub today: bool,
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub verbose: bool,
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn resolve(&self) -> Result<RunConfig> {
        let file = match &self.config {
            Some(path) => {
                let config = HistoryConfig::from_file(path)?;
                config.validate()?;
                config
            }
            None => HistoryConfig::default(),
        };

        let source = match &self.input {
            Some(input) => {
                validate_path("input", input)?;
                let format = match &self.format {
                    Some(name) => SourceFormat::parse(name)?,
                    None => SourceFormat::from_path(Path::new(input))?,
                };
                Some(LocalTransactionFile::new(input, format))
            }
            None => file.source.as_ref().map(|s| s.to_source()).transpose()?,
        };

        let (current_month, current_year) = current_period();

        Ok(RunConfig {
            source,
            date: self.date.clone(),
            today: self.today,
            day: self.day,
            month: self.month.or(file.month()).unwrap_or(current_month),
            year: self.year.or(file.year()).unwrap_or(current_year),
            verbose: self.verbose || file.verbose(),
            json_logs: self.json_logs || file.json_logs(),
        })
    }
}

impl PeriodProvider for RunConfig {
    fn month(&self) -> i32 {
        self.month
    }

    fn year(&self) -> i32 {
        self.year
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        // single-date checks take any month, like the matcher itself
        if self.date.is_none() {
            validate_range("month", self.month, 0, 11)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::error::MatchError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_parsing() {
        let cli = CliConfig::parse_from([
            "month-match",
            "--input",
            "tx.csv",
            "--month",
            "5",
            "--year",
            "2023",
            "--verbose",
        ]);
        assert_eq!(cli.input.as_deref(), Some("tx.csv"));
        assert_eq!(cli.month, Some(5));
        assert_eq!(cli.day, 1);

        let run = cli.resolve().unwrap();
        assert_eq!(run.month, 5);
        assert_eq!(run.year, 2023);
        assert!(run.verbose);
        assert_eq!(run.source.unwrap().format(), SourceFormat::Csv);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[source]\npath = \"from-file.json\"\n\n[period]\nmonth = 2\nyear = 2020\n\n[logging]\njson = true"
        )
        .unwrap();

        let cli = CliConfig {
            config: Some(file.path().to_str().unwrap().to_string()),
            month: Some(7),
            ..CliConfig::default()
        };
        let run = cli.resolve().unwrap();
        assert_eq!(run.month, 7);
        assert_eq!(run.year, 2020);
        assert!(run.json_logs);
        let source = run.source.unwrap();
        assert_eq!(source.path(), Path::new("from-file.json"));
        assert_eq!(source.format(), SourceFormat::Json);
    }

    #[test]
    fn test_defaults_to_current_period() {
        let run = CliConfig::default().resolve().unwrap();
        assert_eq!((run.month, run.year), current_period());
        assert!(run.source.is_none());
    }

    #[test]
    fn test_month_validated_only_for_summaries() {
        let summary = CliConfig {
            month: Some(12),
            ..CliConfig::default()
        }
        .resolve()
        .unwrap();
        assert!(matches!(
            summary.validate(),
            Err(MatchError::InvalidConfigValueError { .. })
        ));

        let check = CliConfig {
            date: Some("15/13/2023".to_string()),
            month: Some(12),
            ..CliConfig::default()
        }
        .resolve()
        .unwrap();
        assert!(check.validate().is_ok());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let cli = CliConfig {
            input: Some("tx.txt".to_string()),
            ..CliConfig::default()
        };
        assert!(cli.resolve().is_err());
    }
}
