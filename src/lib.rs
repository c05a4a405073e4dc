pub mod config;
pub mod core;
pub mod domain;
pub mod ffi;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalTransactionFile, toml_config::HistoryConfig, RunConfig};

pub use crate::core::history::{month_range, summarize, summarize_day, MonthlyHistory};
pub use crate::core::matcher::{matches, parse_date, try_matches, DateMonthMatcher, DateParts};
pub use domain::model::{MonthlySummary, Transaction, TransactionKind};
pub use utils::error::{DateParseError, MatchError, Result};
