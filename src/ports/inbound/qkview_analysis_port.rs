use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// QkviewAnalysisPort - Inbound port for the archive analysis use case
///
/// This port defines the interface that driving adapters (the CLI today)
/// use to analyze qkview archives. Futures are not required to be `Send`
/// because the progress reporter lives on the calling thread.
#[async_trait(?Send)]
pub trait QkviewAnalysisPort {
    /// Drains the event source, ingests every announced archive and
    /// analyzes the collected records
    ///
    /// # Arguments
    /// * `request` - Extraction settings for this run
    ///
    /// # Returns
    /// The analysis result plus ingestion counters
    ///
    /// # Errors
    /// Returns an error if:
    /// - An archive cannot be fetched or extracted
    /// - An extracted archive has no `var/log` directory
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse>;
}
