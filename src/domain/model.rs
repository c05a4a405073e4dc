use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Transaction kind as stored by the finance app. Only `Income` is special;
/// every other value counts as an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
    Other(String),
}

impl TransactionKind {
    pub fn is_income(&self) -> bool {
        matches!(self, TransactionKind::Income)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::Other(other) => other,
        }
    }
}

impl Serialize for TransactionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<&str> for TransactionKind {
    fn from(value: &str) -> Self {
        match value {
            "Income" => TransactionKind::Income,
            "Expense" => TransactionKind::Expense,
            other => TransactionKind::Other(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(non_empty(deserializer)?
            .map(|raw| TransactionKind::from(raw.as_str()))
            .unwrap_or_else(unknown_kind))
    }
}

fn unknown_kind() -> TransactionKind {
    TransactionKind::Other("Unknown".to_string())
}

fn unnamed() -> String {
    "Unnamed".to_string()
}

fn no_category() -> String {
    "No category".to_string()
}

// Empty CSV cells and JSON nulls count as absent, per record.
fn non_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|value| !value.is_empty()))
}

fn title_or_unnamed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(non_empty(deserializer)?.unwrap_or_else(unnamed))
}

fn category_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(non_empty(deserializer)?.unwrap_or_else(no_category))
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(non_empty(deserializer)?.unwrap_or_default())
}

fn amount_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// A single income or expense entry. Missing fields fall back to the same
/// placeholders the app shows in its history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "non_empty")]
    pub id: Option<String>,
    #[serde(rename = "type", default = "unknown_kind")]
    pub kind: TransactionKind,
    #[serde(default = "unnamed", deserialize_with = "title_or_unnamed")]
    pub title: String,
    #[serde(default = "no_category", deserialize_with = "category_or_default")]
    pub category: String,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub amount: f64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub transactions: Vec<Transaction>,
    pub total_income: f64,
    pub total_expense: f64,
}

impl MonthlySummary {
    pub fn balance(&self) -> f64 {
        round_cents(self.total_income - self.total_expense)
    }
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
