use crate::error::AppResult;

/// Source of the values the workflow asks the operator for.
pub trait InputProvider: Send + Sync {
    fn prompt(&self, message: &str) -> AppResult<String>;
}
