use owo_colors::OwoColorize;
use qkview_analyzer::adapters::outbound::archive::TarGzExtractor;
use qkview_analyzer::adapters::outbound::console::{
    SilentProgressReporter, StderrProgressReporter,
};
use qkview_analyzer::adapters::outbound::filesystem::{LogFileScanner, ScanOptions};
use qkview_analyzer::adapters::outbound::indexers::{MemoryIndexer, TeeIndexer};
use qkview_analyzer::adapters::outbound::local::{LocalEventSource, LocalStorage};
use qkview_analyzer::adapters::outbound::network::{ElasticsearchConfig, ElasticsearchIndexer};
use qkview_analyzer::application::dto::{AnalysisRequest, AnalysisResponse, OutputFormat};
use qkview_analyzer::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use qkview_analyzer::application::use_cases::AnalyzeQkviewUseCase;
use qkview_analyzer::cli::Args;
use qkview_analyzer::config::{self, ConfigFile};
use qkview_analyzer::ports::inbound::QkviewAnalysisPort;
use qkview_analyzer::ports::outbound::{LogIndexer, ProgressReporter};
use qkview_analyzer::qkview_analysis::services::DateParseOptions;
use qkview_analyzer::shared::error::{ExitCode, QkviewError};
use qkview_analyzer::shared::security::MAX_FILE_SIZE;
use qkview_analyzer::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Index used when only an Elasticsearch URL is given
const DEFAULT_ELASTICSEARCH_INDEX: &str = "qkview-logs";

/// Command line, config file and defaults merged into one set of values
#[derive(Debug)]
struct RunSettings {
    archive: PathBuf,
    format: OutputFormat,
    presenter: PresenterType,
    scan: ScanOptions,
    elasticsearch: Option<ElasticsearchConfig>,
    fail_on_critical: bool,
    keep_extracted: bool,
    quiet: bool,
}

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    validate_archive_path(&args.file)?;

    let config_file = load_config(&args)?;
    let settings = build_settings(args, config_file.unwrap_or_default());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let response = if settings.quiet {
        runtime.block_on(analyze(&settings, SilentProgressReporter::new()))?
    } else {
        runtime.block_on(analyze(&settings, StderrProgressReporter::new()))?
    };

    if !settings.quiet {
        eprintln!("{}", FormatterFactory::progress_message(settings.format));
    }
    let formatter = FormatterFactory::create(settings.format);
    let report = formatter.format(&response.result)?;

    let presenter = PresenterFactory::create(settings.presenter.clone());
    presenter.present(&report)?;

    if !settings.quiet {
        print_summary(&settings, &response);
    }

    if settings.fail_on_critical && response.result.has_critical_findings() {
        return Ok(ExitCode::CriticalFindings);
    }
    Ok(ExitCode::Success)
}

async fn analyze<PR: ProgressReporter>(
    settings: &RunSettings,
    progress_reporter: PR,
) -> Result<AnalysisResponse> {
    let memory = Arc::new(MemoryIndexer::new());
    let indexer: Arc<dyn LogIndexer> = match &settings.elasticsearch {
        Some(es_config) => {
            let remote = ElasticsearchIndexer::new(es_config.clone())?;
            tracing::info!(url = %remote.bulk_url(), "shipping records to Elasticsearch");
            Arc::new(TeeIndexer::new(memory.clone(), Arc::new(remote)))
        }
        None => memory.clone(),
    };

    let use_case = AnalyzeQkviewUseCase::new(
        LocalEventSource::new(settings.archive.clone()),
        LocalStorage::new(settings.archive.clone()),
        TarGzExtractor::new(),
        LogFileScanner::new(settings.scan.clone()),
        progress_reporter,
        memory,
        indexer,
    );

    let request = AnalysisRequest::new(settings.keep_extracted);
    use_case.analyze(request).await
}

fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    if let Some(path) = &args.config {
        return config::load_config_from_path(path).map(Some);
    }
    let dir = archive_dir(&args.file);
    config::discover_config(dir)
}

/// CLI flag > config file > built-in default
fn build_settings(args: Args, config_file: ConfigFile) -> RunSettings {
    let format = args
        .format
        .or_else(|| config_file.output_format())
        .unwrap_or_default();
    let output = args
        .output
        .or_else(|| config_file.output.as_ref().map(PathBuf::from));
    let presenter = PresenterType::resolve(args.stdout, output, &args.file, format);

    let date_options = DateParseOptions {
        reference_time: args.reference_time.or_else(|| config_file.reference_time()),
        default_year: args.default_year.or(config_file.default_year),
    };
    let scan = ScanOptions {
        date_options,
        skip_patterns: config_file.skip_patterns.clone().unwrap_or_default(),
        max_file_size: config_file.max_log_file_size().unwrap_or(MAX_FILE_SIZE),
    };

    let es_section = config_file.elasticsearch.clone().unwrap_or_default();
    let elasticsearch = args.elasticsearch_url.or(es_section.url).map(|url| {
        let index = args
            .elasticsearch_index
            .or(es_section.index)
            .unwrap_or_else(|| DEFAULT_ELASTICSEARCH_INDEX.to_string());
        let es_config = ElasticsearchConfig::new(url, index);
        match es_section.username {
            Some(username) => es_config.with_credentials(username, es_section.password),
            None => es_config,
        }
    });

    RunSettings {
        archive: args.file,
        format,
        presenter,
        scan,
        elasticsearch,
        fail_on_critical: args.fail_on_critical,
        keep_extracted: args.keep_extracted,
        quiet: args.quiet,
    }
}

fn archive_dir(archive: &Path) -> &Path {
    archive
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn validate_archive_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(QkviewError::ArchiveNotFound {
            path: path.to_path_buf(),
            suggestion: "Check the path passed with --file".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for archive paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| QkviewError::InvalidArchivePath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(QkviewError::InvalidArchivePath {
            path: path.to_path_buf(),
            reason: "Security: Archive path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(QkviewError::InvalidArchivePath {
            path: path.to_path_buf(),
            reason: "Not a regular file".to_string(),
        }
        .into());
    }

    Ok(())
}

fn print_summary(settings: &RunSettings, response: &AnalysisResponse) {
    let summary = &response.result.summary;

    eprintln!();
    eprintln!("{}", "📊 Analysis summary".bold());
    eprintln!(
        "   Log records: {} found, {} indexed",
        response.records_found, response.records_indexed
    );
    eprintln!(
        "   Virtual servers: {} critical, {} warning, {} healthy",
        summary.critical.red().bold(),
        summary.warning.yellow(),
        summary.healthy.green()
    );
    eprintln!("   Certificate findings: {}", summary.certs_expiring_soon);
    eprintln!("   Recommendations: {}", response.result.recommendations.len());

    if !response.non_fatal_errors.is_empty() {
        eprintln!(
            "   {} {} non-fatal problem(s) during ingestion",
            "⚠️".yellow(),
            response.non_fatal_errors.len()
        );
        for problem in &response.non_fatal_errors {
            eprintln!("      - {}", problem);
        }
    }

    if let Some(dir) = &response.extraction_dir {
        eprintln!("   Extracted files: {}", dir.display());
    }

    if let PresenterType::File(path) = &settings.presenter {
        eprintln!("{} Report written to {}", "✅".green(), path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(
            ["qkview-analyzer", "--file", "/cases/case.qkview"]
                .into_iter()
                .chain(extra.iter().copied()),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_archive_path_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("case.qkview");
        fs::write(&file_path, "data").unwrap();
        assert!(validate_archive_path(&file_path).is_ok());
    }

    #[test]
    fn test_validate_archive_path_nonexistent() {
        let err = validate_archive_path(Path::new("/nonexistent/case.qkview")).unwrap_err();
        assert!(err.to_string().contains("qkview archive not found"));
    }

    #[test]
    fn test_validate_archive_path_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = validate_archive_path(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("Not a regular file"));
    }

    #[test]
    fn test_build_settings_defaults() {
        let settings = build_settings(args(&[]), ConfigFile::default());
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(
            settings.presenter,
            PresenterType::File(PathBuf::from("/cases/metadata.json"))
        );
        assert_eq!(settings.scan.max_file_size, MAX_FILE_SIZE);
        assert!(settings.elasticsearch.is_none());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let config_file = ConfigFile {
            format: Some("markdown".to_string()),
            default_year: Some(2020),
            skip_patterns: Some(vec!["restjavad".to_string()]),
            ..Default::default()
        };
        let settings = build_settings(args(&["-f", "json", "--default-year", "2023"]), config_file);

        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.scan.date_options.default_year, Some(2023));
        assert_eq!(settings.scan.skip_patterns, vec!["restjavad".to_string()]);
    }

    #[test]
    fn test_config_file_fills_gaps() {
        let config_file = ConfigFile {
            format: Some("markdown".to_string()),
            output: Some("out/report.md".to_string()),
            max_log_file_size_mb: Some(5),
            elasticsearch: Some(config::ElasticsearchSection {
                url: Some("http://es:9200".to_string()),
                index: None,
                username: Some("elastic".to_string()),
                password: Some("secret".to_string()),
            }),
            ..Default::default()
        };
        let settings = build_settings(args(&[]), config_file);

        assert_eq!(settings.format, OutputFormat::Markdown);
        assert_eq!(
            settings.presenter,
            PresenterType::File(PathBuf::from("out/report.md"))
        );
        assert_eq!(settings.scan.max_file_size, 5 * 1024 * 1024);
        let es = settings.elasticsearch.unwrap();
        assert_eq!(es.index, DEFAULT_ELASTICSEARCH_INDEX);
        assert_eq!(es.username.as_deref(), Some("elastic"));
    }

    #[test]
    fn test_load_config_discovers_next_to_archive() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("case.qkview");
        fs::write(&archive, "data").unwrap();
        fs::write(temp_dir.path().join(config::CONFIG_FILENAME), "format: markdown\n").unwrap();

        let parsed = Args::try_parse_from([
            "qkview-analyzer",
            "--file",
            archive.to_str().unwrap(),
        ])
        .unwrap();
        let config_file = load_config(&parsed).unwrap().unwrap();
        assert_eq!(config_file.output_format(), Some(OutputFormat::Markdown));
    }
}
