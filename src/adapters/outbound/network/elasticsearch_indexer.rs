use crate::ports::outbound::LogIndexer;
use crate::qkview_analysis::domain::LogRecord;
use crate::shared::error::QkviewError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Default number of records sent per bulk request
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Connection settings for an Elasticsearch cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElasticsearchConfig {
    pub url: String,
    pub index: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub batch_size: usize,
}

impl ElasticsearchConfig {
    pub fn new(url: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            index: index.into(),
            username: None,
            password: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_credentials(mut self, username: String, password: Option<String>) -> Self {
        self.username = Some(username);
        self.password = password;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(default)]
    errors: bool,
}

/// ElasticsearchIndexer adapter shipping log records through the `_bulk` API
///
/// Records are buffered and sent as NDJSON once `batch_size` is reached.
/// `close` flushes whatever is left.
pub struct ElasticsearchIndexer {
    client: reqwest::Client,
    bulk_url: String,
    config: ElasticsearchConfig,
    buffer: Mutex<Vec<LogRecord>>,
    max_retries: u32,
}

impl ElasticsearchIndexer {
    /// Creates a new indexer for the given cluster
    ///
    /// # Errors
    /// Returns an error if the URL or index name is empty, or if the
    /// HTTP client cannot be built
    pub fn new(config: ElasticsearchConfig) -> Result<Self> {
        let base = config.url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(QkviewError::Validation {
                message: "Elasticsearch URL must not be empty".to_string(),
            }
            .into());
        }
        if config.index.trim().is_empty() {
            return Err(QkviewError::Validation {
                message: "Elasticsearch index name must not be empty".to_string(),
            }
            .into());
        }

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("qkview-analyzer/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        let bulk_url = format!("{}/{}/_bulk", base, urlencoding::encode(config.index.trim()));

        Ok(Self {
            client,
            bulk_url,
            config,
            buffer: Mutex::new(Vec::new()),
            max_retries: 3,
        })
    }

    pub fn bulk_url(&self) -> &str {
        &self.bulk_url
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes one full batch out of the buffer, or everything when `drain_all`
    fn take_batch(&self, drain_all: bool) -> Option<Vec<LogRecord>> {
        let mut buffer = self.lock();
        if buffer.is_empty() || (!drain_all && buffer.len() < self.config.batch_size) {
            return None;
        }
        let count = buffer.len().min(self.config.batch_size);
        Some(buffer.drain(..count).collect())
    }

    fn build_body(&self, records: &[LogRecord]) -> Result<String> {
        let mut body = String::new();
        for record in records {
            let action = json!({
                "index": {
                    "_index": self.config.index.trim(),
                    "_id": uuid::Uuid::new_v4().to_string(),
                }
            });
            body.push_str(&serde_json::to_string(&action)?);
            body.push('\n');
            body.push_str(&serde_json::to_string(record)?);
            body.push('\n');
        }
        Ok(body)
    }

    async fn send_with_retry(&self, body: String) -> Result<()> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.send_bulk(body.clone()).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "bulk request failed");
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            QkviewError::IndexerError {
                details: "bulk request was never attempted".to_string(),
            }
            .into()
        }))
    }

    async fn send_bulk(&self, body: String) -> Result<()> {
        let mut request = self
            .client
            .post(&self.bulk_url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(body);
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_deref());
        }

        let response = request.send().await.map_err(|e| QkviewError::IndexerError {
            details: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(QkviewError::IndexerError {
                details: format!("bulk request returned status code {}", status),
            }
            .into());
        }

        let parsed: BulkResponse = response.json().await.map_err(|e| QkviewError::IndexerError {
            details: format!("unreadable bulk response: {}", e),
        })?;
        if parsed.errors {
            return Err(QkviewError::IndexerError {
                details: "bulk response reported item failures".to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn flush(&self, drain_all: bool) -> Result<()> {
        while let Some(batch) = self.take_batch(drain_all) {
            let body = self.build_body(&batch)?;
            tracing::debug!(records = batch.len(), url = %self.bulk_url, "sending bulk request");
            self.send_with_retry(body).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl LogIndexer for ElasticsearchIndexer {
    async fn index(&self, record: &LogRecord) -> Result<()> {
        self.lock().push(record.clone());
        self.flush(false).await
    }

    async fn index_batch(&self, records: &[LogRecord]) -> Result<()> {
        self.lock().extend_from_slice(records);
        self.flush(false).await
    }

    async fn close(&self) -> Result<()> {
        self.flush(true).await
    }
}
