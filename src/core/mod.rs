pub mod history;
pub mod matcher;

pub use crate::domain::model::{MonthlySummary, Transaction, TransactionKind};
pub use crate::domain::ports::{PeriodProvider, TransactionSource};
pub use crate::utils::error::Result;
