use crate::errors::Result;
use crate::models::summary::Summary;
use async_trait::async_trait;

/// Base trait for market summary sources
#[async_trait]
pub trait SummarySource {
    /// Get the contract code this source is for, e.g. `s50z25`
    fn symbol_code(&self) -> &str;

    /// Fetch the latest summary snapshot
    async fn fetch_summary(&self) -> Result<Summary>;
}
