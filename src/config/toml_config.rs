use crate::config::cli::{LocalTransactionFile, SourceFormat};
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::{validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub source: Option<SourceConfig>,
    pub period: Option<PeriodConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    pub format: Option<String>,
}

/// Month is zero-based, matching the matcher's query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodConfig {
    pub month: Option<i32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl HistoryConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder regex is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn month(&self) -> Option<i32> {
        self.period.as_ref().and_then(|p| p.month)
    }

    pub fn year(&self) -> Option<i32> {
        self.period.as_ref().and_then(|p| p.year)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }
}

impl SourceConfig {
    pub fn resolved_format(&self) -> Result<SourceFormat> {
        match &self.format {
            Some(name) => SourceFormat::parse(name),
            None => SourceFormat::from_path(Path::new(&self.path)),
        }
    }

    pub fn to_source(&self) -> Result<LocalTransactionFile> {
        Ok(LocalTransactionFile::new(&self.path, self.resolved_format()?))
    }
}

impl Validate for HistoryConfig {
    fn validate(&self) -> Result<()> {
        if let Some(source) = &self.source {
            validate_path("source.path", &source.path)?;
            source.resolved_format()?;
        }
        if let Some(month) = self.month() {
            validate_range("period.month", month, 0, 11)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
path = "exports/transactions.json"

[period]
month = 5
year = 2023

[logging]
json = true
"#;
        let config = HistoryConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.month(), Some(5));
        assert_eq!(config.year(), Some(2023));
        assert!(config.json_logs());
        assert!(!config.verbose());

        let source = config.source.unwrap().to_source().unwrap();
        assert_eq!(source.format(), SourceFormat::Json);
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = HistoryConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.month(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MONTH_MATCH_TEST_EXPORT_DIR", "/tmp/exports");
        let toml_content = r#"
[source]
path = "${MONTH_MATCH_TEST_EXPORT_DIR}/tx.csv"
"#;
        let config = HistoryConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.unwrap().path, "/tmp/exports/tx.csv");

        let untouched = HistoryConfig::substitute_env_vars("${MONTH_MATCH_TEST_UNSET_VAR}");
        assert_eq!(untouched, "${MONTH_MATCH_TEST_UNSET_VAR}");
    }

    #[test]
    fn test_invalid_month_and_format_rejected() {
        let bad_month = HistoryConfig::from_toml_str("[period]\nmonth = 12\n").unwrap();
        assert!(matches!(
            bad_month.validate(),
            Err(MatchError::InvalidConfigValueError { .. })
        ));

        let bad_format =
            HistoryConfig::from_toml_str("[source]\npath = \"a.csv\"\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_from_file_and_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[period]\nyear = 2024").unwrap();
        let config = HistoryConfig::from_file(file.path()).unwrap();
        assert_eq!(config.year(), Some(2024));

        let err = HistoryConfig::from_toml_str("[period\n").unwrap_err();
        assert!(matches!(err, MatchError::ConfigValidationError { .. }));
    }
}
