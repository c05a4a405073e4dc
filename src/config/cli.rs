use crate::core::{Transaction, TransactionSource};
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::validate_one_of;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    pub const NAMES: [&'static str; 2] = ["csv", "json"];

    pub fn parse(name: &str) -> Result<Self> {
        let name = name.to_ascii_lowercase();
        validate_one_of("source.format", &name, &Self::NAMES)?;
        if name == "json" {
            Ok(SourceFormat::Json)
        } else {
            Ok(SourceFormat::Csv)
        }
    }

    /// Infers the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| MatchError::InvalidConfigValueError {
                field: "source.path".to_string(),
                value: path.display().to_string(),
                reason: "File has no extension; pass --format explicitly".to_string(),
            })?;
        Self::parse(extension)
    }
}

/// A transaction export on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalTransactionFile {
    path: PathBuf,
    format: SourceFormat,
}

impl LocalTransactionFile {
    pub fn new(path: impl Into<PathBuf>, format: SourceFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    fn load_csv(&self, file: File) -> Result<Vec<Transaction>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(file);

        let mut transactions = Vec::new();
        for row in reader.deserialize() {
            let transaction: Transaction = row?;
            transactions.push(transaction);
        }
        Ok(transactions)
    }

    fn load_json(&self, file: File) -> Result<Vec<Transaction>> {
        let transactions = serde_json::from_reader(BufReader::new(file))?;
        Ok(transactions)
    }
}

impl TransactionSource for LocalTransactionFile {
    fn load(&self) -> Result<Vec<Transaction>> {
        tracing::debug!("Reading {:?} transactions from {}", self.format, self.path.display());
        let file = File::open(&self.path)?;
        match self.format {
            SourceFormat::Csv => self.load_csv(file),
            SourceFormat::Json => self.load_json(file),
        }
    }
}
