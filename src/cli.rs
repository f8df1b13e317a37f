use chrono::NaiveDateTime;
use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::shared::text::parse_reference_time;

/// Analyze F5 BIG-IP qkview archives and produce a diagnostic report
#[derive(Parser, Debug)]
#[command(name = "qkview-analyzer")]
#[command(version)]
#[command(
    about = "Analyze F5 BIG-IP qkview archives and produce a diagnostic report",
    long_about = None
)]
pub struct Args {
    /// Path to the qkview archive (.qkview, .tar.gz or .tgz)
    #[arg(long, value_name = "ARCHIVE")]
    pub file: PathBuf,

    /// Report format: json or markdown [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Report file path (defaults to metadata.json next to the archive)
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Configuration file (defaults to qkview-analyzer.config.yml next to the archive)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Year assumed for log timestamps that carry none
    #[arg(long, value_name = "YEAR", value_parser = clap::value_parser!(i32).range(1970..=9999))]
    pub default_year: Option<i32>,

    /// Treat this instant as "now" when inferring years ('YYYY-MM-DD HH:MM:SS' or RFC 3339)
    #[arg(long, value_name = "TIMESTAMP", value_parser = parse_reference_time)]
    pub reference_time: Option<NaiveDateTime>,

    /// Also ship log records to this Elasticsearch URL
    #[arg(long, value_name = "URL")]
    pub elasticsearch_url: Option<String>,

    /// Elasticsearch index receiving the log records [default: qkview-logs]
    #[arg(long, value_name = "NAME")]
    pub elasticsearch_index: Option<String>,

    /// Exit with code 1 when a critical virtual server or SSL finding is reported
    #[arg(long)]
    pub fail_on_critical: bool,

    /// Keep the extracted archive instead of deleting it after the run
    #[arg(long)]
    pub keep_extracted: bool,

    /// Verbose diagnostic logging on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
