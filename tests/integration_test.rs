/// Integration tests for the application layer
mod test_utilities;

use qkview_analyzer::prelude::*;
use qkview_analyzer::qkview_analysis::domain::{HealthStatus, Priority};
use std::sync::Arc;
use tempfile::TempDir;
use test_utilities::fixtures::{build_archive, build_archive_without_logs, build_qkview};
use test_utilities::mocks::*;

fn scanner() -> LogFileScanner {
    LogFileScanner::new(ScanOptions::default())
}

#[tokio::test]
async fn test_analyze_local_archive_happy_path() {
    let dir = TempDir::new().unwrap();
    let archive = build_qkview(dir.path(), "case-1234.qkview");
    let memory = Arc::new(MemoryIndexer::new());
    let progress_reporter = MockProgressReporter::new();

    let use_case = AnalyzeQkviewUseCase::new(
        LocalEventSource::new(archive.clone()),
        LocalStorage::new(archive),
        TarGzExtractor::new(),
        scanner(),
        progress_reporter.clone(),
        memory.clone(),
        memory.clone(),
    );

    let response = use_case.execute(AnalysisRequest::default()).await.unwrap();

    // audit, journal and binary files never reach the classifier
    assert_eq!(response.records_found, 4);
    assert_eq!(response.records_indexed, 4);
    assert!(memory
        .records()
        .iter()
        .all(|r| r.source() == "case-1234.qkview" && r.path().ends_with("var/log/ltm")));

    let result = &response.result;
    assert_eq!(result.virtual_servers.len(), 2);
    assert_eq!(result.virtual_servers[0].name, "vs_app");
    assert_eq!(result.virtual_servers[0].status, HealthStatus::Critical);
    assert_eq!(result.virtual_servers[0].active_members, "0/1");
    assert_eq!(result.virtual_servers[1].name, "vs_web");
    assert_eq!(result.virtual_servers[1].status, HealthStatus::Healthy);
    assert_eq!(result.summary.critical, 1);
    assert_eq!(result.summary.healthy, 1);

    assert!(result
        .ssl_findings
        .iter()
        .any(|f| f.message == "Certificate expiration detected"));
    assert!(result
        .ssl_findings
        .iter()
        .any(|f| f.message == "Obsolete TLS/SSL protocol detected"));

    assert_eq!(result.error_timeline.len(), 2);
    assert_eq!(result.error_timeline[0].date, "2024-03-05");
    assert_eq!(result.error_timeline[0].errors, 2);
    assert_eq!(result.error_timeline[1].errors, 1);

    assert_eq!(result.entry_logs.len(), 4);
    assert_eq!(result.recommendations[0].priority, Priority::Critical);
    assert!(result.has_critical_findings());

    assert!(progress_reporter.contains("📦 Processing archive: case-1234.qkview"));
    assert!(progress_reporter.contains("Progress: 1/1 - ltm"));
    assert!(progress_reporter.contains("Completed:"));
}

#[tokio::test]
async fn test_analyze_several_archives_from_storage() {
    let bucket_dir = TempDir::new().unwrap();
    build_qkview(bucket_dir.path(), "first.qkview");
    build_archive(
        bucket_dir.path(),
        "second.qkview",
        &[(
            "var/log/ltm",
            b"2024-03-07 08:00:00 bigip2 error: pool member 10.0.0.9:80 down\n",
        )],
    );
    let memory = Arc::new(MemoryIndexer::new());

    let use_case = AnalyzeQkviewUseCase::new(
        MockEventSource::new("uploads", &["first.qkview", "second.qkview"]),
        DirectoryStorage::new(bucket_dir.path()),
        TarGzExtractor::new(),
        scanner(),
        MockProgressReporter::new(),
        memory.clone(),
        memory.clone(),
    );

    let response = use_case.execute(AnalysisRequest::default()).await.unwrap();

    assert_eq!(response.records_found, 5);
    let sources: Vec<String> = memory
        .records()
        .iter()
        .map(|r| r.source().to_string())
        .collect();
    assert!(sources.contains(&"first.qkview".to_string()));
    assert!(sources.contains(&"second.qkview".to_string()));
    // the second archive has no bigip.conf, so the first one's config is kept
    assert_eq!(response.result.virtual_servers.len(), 2);
    assert_eq!(response.result.error_timeline.len(), 3);
}

#[tokio::test]
async fn test_tee_indexer_feeds_memory_and_remote() {
    let dir = TempDir::new().unwrap();
    let archive = build_qkview(dir.path(), "case.qkview");
    let memory = Arc::new(MemoryIndexer::new());
    let remote = Arc::new(RecordingIndexer::new());
    let indexer = Arc::new(TeeIndexer::new(memory.clone(), remote.clone()));

    let use_case = AnalyzeQkviewUseCase::new(
        LocalEventSource::new(archive.clone()),
        LocalStorage::new(archive),
        TarGzExtractor::new(),
        scanner(),
        MockProgressReporter::new(),
        memory.clone(),
        indexer,
    );

    let response = use_case.execute(AnalysisRequest::default()).await.unwrap();

    assert_eq!(memory.len(), 4);
    assert_eq!(remote.total(), 4);
    assert!(remote.is_closed());
    assert_eq!(response.records_indexed, 4);
}

#[tokio::test]
async fn test_remote_index_failure_keeps_local_analysis() {
    let dir = TempDir::new().unwrap();
    let archive = build_qkview(dir.path(), "case.qkview");
    let memory = Arc::new(MemoryIndexer::new());
    let indexer = Arc::new(TeeIndexer::new(
        memory.clone(),
        Arc::new(RecordingIndexer::failing()),
    ));

    let use_case = AnalyzeQkviewUseCase::new(
        LocalEventSource::new(archive.clone()),
        LocalStorage::new(archive),
        TarGzExtractor::new(),
        scanner(),
        MockProgressReporter::new(),
        memory.clone(),
        indexer,
    );

    let response = use_case.execute(AnalysisRequest::default()).await.unwrap();

    assert_eq!(response.records_indexed, 0);
    assert!(response
        .non_fatal_errors
        .iter()
        .any(|e| e.contains("remote index rejected 4 record(s)")));
    assert_eq!(response.result.entry_logs.len(), 4);
    assert_eq!(response.result.summary.critical, 1);
}

#[tokio::test]
async fn test_archive_without_log_directory_fails() {
    let dir = TempDir::new().unwrap();
    let archive = build_archive_without_logs(dir.path(), "config-only.qkview");
    let memory = Arc::new(MemoryIndexer::new());

    let use_case = AnalyzeQkviewUseCase::new(
        LocalEventSource::new(archive.clone()),
        LocalStorage::new(archive),
        TarGzExtractor::new(),
        scanner(),
        MockProgressReporter::new(),
        memory.clone(),
        memory,
    );

    let err = use_case
        .execute(AnalysisRequest::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Log directory not found"));
}

#[tokio::test]
async fn test_non_gzip_archive_fails() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("broken.qkview");
    std::fs::write(&archive, "this is not a tarball").unwrap();
    let memory = Arc::new(MemoryIndexer::new());

    let use_case = AnalyzeQkviewUseCase::new(
        LocalEventSource::new(archive.clone()),
        LocalStorage::new(archive),
        TarGzExtractor::new(),
        scanner(),
        MockProgressReporter::new(),
        memory.clone(),
        memory,
    );

    let err = use_case
        .execute(AnalysisRequest::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to extract qkview archive"));
}

#[test]
fn test_extract_and_collect_without_use_case() {
    let dir = TempDir::new().unwrap();
    let archive = build_qkview(dir.path(), "case.qkview");
    let root = dir.path().join("unpacked");
    std::fs::create_dir_all(&root).unwrap();

    let extracted = TarGzExtractor::new().extract(&archive, &root).unwrap();
    assert_eq!(extracted, 5);

    let collected = scanner().collect(&root, "case.qkview").unwrap();
    assert_eq!(collected.records.len(), 4);
    assert!(collected.non_fatal_errors.is_empty());
    let config = collected.config.unwrap();
    assert_eq!(config.virtual_servers.len(), 2);
    assert_eq!(config.pools.len(), 2);

    let result = DiagnosticAnalyzer::new().analyze(&collected.records, Some(&config));
    assert_eq!(result.summary.critical, 1);
}

#[tokio::test]
async fn test_port_and_formatters_round_out_the_run() {
    let dir = TempDir::new().unwrap();
    let archive = build_qkview(dir.path(), "case.qkview");
    let memory = Arc::new(MemoryIndexer::new());

    let use_case = AnalyzeQkviewUseCase::new(
        LocalEventSource::new(archive.clone()),
        LocalStorage::new(archive),
        TarGzExtractor::new(),
        scanner(),
        MockProgressReporter::new(),
        memory.clone(),
        memory,
    );
    let port: &dyn QkviewAnalysisPort = &use_case;
    let response = port.analyze(AnalysisRequest::default()).await.unwrap();

    let json = JsonFormatter::new().format(&response.result).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["critical"], 1);
    assert_eq!(value["virtualServers"][0]["activeMembers"], "0/1");
    assert_eq!(value["entryLogs"][0]["level"], "ERROR");
    assert_eq!(value["entryLogs"][0]["date"], "2024-03-05T10:00:00Z");

    let markdown = MarkdownFormatter::new().format(&response.result).unwrap();
    assert!(markdown.contains("| vs_app | pool_app | critical | 0/1 |"));
}
