use crate::domain::model::Transaction;
use crate::utils::error::Result;

/// Anything that can hand over the stored transactions for summarizing.
pub trait TransactionSource {
    fn load(&self) -> Result<Vec<Transaction>>;
}

impl TransactionSource for Vec<Transaction> {
    fn load(&self) -> Result<Vec<Transaction>> {
        Ok(self.clone())
    }
}

/// Supplies the month being viewed. `month` is zero-based.
pub trait PeriodProvider {
    fn month(&self) -> i32;
    fn year(&self) -> i32;
}
