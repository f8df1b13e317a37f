//! qkview-analyzer - diagnostic analyzer for F5 BIG-IP qkview archives
//!
//! This library unpacks a qkview support archive, classifies the device logs,
//! parses `bigip.conf` and derives a health report: SSL/TLS findings,
//! recurring errors, a daily error timeline, per-virtual-server health and
//! prioritized recommendations. It follows hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`qkview_analysis`): Pure analysis model and services, no I/O
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use qkview_analyzer::prelude::*;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! let archive = PathBuf::from("case.qkview");
//! let memory = Arc::new(MemoryIndexer::new());
//!
//! // Create use case with injected adapters
//! let use_case = AnalyzeQkviewUseCase::new(
//!     LocalEventSource::new(archive.clone()),
//!     LocalStorage::new(archive),
//!     TarGzExtractor::new(),
//!     LogFileScanner::default(),
//!     StderrProgressReporter::new(),
//!     memory.clone(),
//!     memory,
//! );
//!
//! // Execute
//! let response = use_case.execute(AnalysisRequest::default()).await?;
//!
//! // Format output
//! let output = JsonFormatter::new().format(&response.result)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod qkview_analysis;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::archive::TarGzExtractor;
    pub use crate::adapters::outbound::console::{SilentProgressReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, LogFileScanner, ScanOptions, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::indexers::{MemoryIndexer, TeeIndexer};
    pub use crate::adapters::outbound::local::{LocalEventSource, LocalStorage};
    pub use crate::adapters::outbound::network::{ElasticsearchConfig, ElasticsearchIndexer};
    pub use crate::application::dto::{AnalysisRequest, AnalysisResponse, OutputFormat};
    pub use crate::application::use_cases::AnalyzeQkviewUseCase;
    pub use crate::ports::inbound::QkviewAnalysisPort;
    pub use crate::ports::outbound::{
        ArchiveEvent, ArchiveExtractor, CollectedLogs, EventSource, LogCollector,
        LogFileDiscovery, LogIndexer, OutputPresenter, ProgressReporter, ReportFormatter,
        StorageBackend,
    };
    pub use crate::qkview_analysis::domain::{
        AnalysisResult, DeviceConfig, LogRecord, LogSeverity, Pool, PoolMember, VirtualServer,
    };
    pub use crate::qkview_analysis::services::{
        ConfigParser, DateParseOptions, DiagnosticAnalyzer, LogClassifier,
    };
    pub use crate::shared::Result;
}
