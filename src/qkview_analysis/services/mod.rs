mod config_parser;
mod diagnostic_analyzer;
mod error_analyzer;
mod log_classifier;
mod recommendation_engine;
mod ssl_analyzer;
mod summary_aggregator;
mod timeline_builder;
mod virtual_server_analyzer;

pub use config_parser::{clean_name, ConfigParseIssue, ConfigParseOutcome, ConfigParser};
pub use diagnostic_analyzer::DiagnosticAnalyzer;
pub use error_analyzer::{extract_error_message, ErrorAnalyzer};
pub use log_classifier::{Classification, DateParseOptions, LogClassifier};
pub use recommendation_engine::RecommendationEngine;
pub use ssl_analyzer::SslAnalyzer;
pub use summary_aggregator::SummaryAggregator;
pub use timeline_builder::TimelineBuilder;
pub use virtual_server_analyzer::VirtualServerAnalyzer;
