use crate::qkview_analysis::domain::{
    DeviceConfig, HealthStatus, LogRecord, VirtualServer, VirtualServerInfo,
};
use crate::shared::text::{format_display, truncate_with_ellipsis};

const LAST_ERROR_MAX_LEN: usize = 100;

/// Derives per-virtual-server health from pool membership and recent errors
pub struct VirtualServerAnalyzer;

impl VirtualServerAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// One entry per configured virtual server, ordered by name.
    ///
    /// Without a parsed configuration there is nothing to report and the
    /// result is empty.
    pub fn analyze(
        &self,
        config: Option<&DeviceConfig>,
        records: &[LogRecord],
    ) -> Vec<VirtualServerInfo> {
        let Some(config) = config else {
            return Vec::new();
        };

        // Newest first; records with equal timestamps keep their input order
        let mut errors: Vec<&LogRecord> = records
            .iter()
            .filter(|r| r.severity().is_error_class())
            .collect();
        errors.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

        config
            .virtual_servers
            .values()
            .map(|vs| {
                let (status, active_members) = health(config, vs);
                VirtualServerInfo {
                    name: vs.name.clone(),
                    pool: vs.pool.clone().unwrap_or_default(),
                    status,
                    active_members,
                    last_error: last_error(vs, &errors),
                }
            })
            .collect()
    }
}

impl Default for VirtualServerAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn health(config: &DeviceConfig, vs: &VirtualServer) -> (HealthStatus, String) {
    if vs.disabled {
        return (HealthStatus::Critical, "0/0".to_string());
    }

    let Some(pool) = config.pool_for(vs) else {
        return (HealthStatus::Warning, "0/0".to_string());
    };

    let active = pool.active_members();
    let total = pool.total_members();
    let status = if total == 0 || active == 0 {
        HealthStatus::Critical
    } else if active < total {
        HealthStatus::Warning
    } else {
        HealthStatus::Healthy
    };

    (status, format!("{}/{}", active, total))
}

/// Newest error mentioning the server or its pool, as `<message> - <timestamp>`
///
/// A server without a pool has an empty pool name, which every line contains,
/// so it picks up the newest error of the whole run.
fn last_error(vs: &VirtualServer, newest_first: &[&LogRecord]) -> Option<String> {
    let needles = [
        vs.name.to_lowercase(),
        vs.pool.as_deref().unwrap_or_default().to_lowercase(),
    ];

    newest_first
        .iter()
        .find(|record| {
            let line = record.line().to_lowercase();
            needles.iter().any(|needle| line.contains(needle.as_str()))
        })
        .map(|record| {
            format!(
                "{} - {}",
                summarize_error_line(record.line()),
                format_display(&record.timestamp())
            )
        })
}

fn summarize_error_line(line: &str) -> String {
    let truncated = truncate_with_ellipsis(line, LAST_ERROR_MAX_LEN);
    match truncated.split_once(": ") {
        Some((_, rest)) => rest.trim().to_string(),
        None => truncated.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qkview_analysis::domain::{LogSeverity, Pool, PoolMember};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn record(severity: LogSeverity, line: &str, hour: u32) -> LogRecord {
        LogRecord::new("/var/log/ltm", line, severity, at(hour), "qkview.tgz")
    }

    fn pool(name: &str, members: Vec<PoolMember>) -> Pool {
        Pool {
            name: name.to_string(),
            monitor: None,
            members,
        }
    }

    fn member(name: &str, user_disabled: bool) -> PoolMember {
        PoolMember {
            user_disabled,
            ..PoolMember::new(name)
        }
    }

    fn server(name: &str, pool: Option<&str>, disabled: bool) -> VirtualServer {
        VirtualServer {
            pool: pool.map(str::to_string),
            disabled,
            ..VirtualServer::new(name)
        }
    }

    fn config(servers: Vec<VirtualServer>, pools: Vec<Pool>) -> DeviceConfig {
        let mut config = DeviceConfig::new();
        for vs in servers {
            config.virtual_servers.insert(vs.name.clone(), vs);
        }
        for p in pools {
            config.pools.insert(p.name.clone(), p);
        }
        config
    }

    #[test]
    fn test_missing_config_yields_empty_list() {
        assert!(VirtualServerAnalyzer::new().analyze(None, &[]).is_empty());
    }

    #[test]
    fn test_partial_and_empty_pools() {
        let cfg = config(
            vec![
                server("vs_partial", Some("pool_partial"), false),
                server("vs_empty", Some("pool_empty"), false),
            ],
            vec![
                pool(
                    "pool_partial",
                    vec![
                        member("10.0.0.1:80", false),
                        member("10.0.0.2:80", true),
                        member("10.0.0.3:80", false),
                    ],
                ),
                pool("pool_empty", vec![]),
            ],
        );

        let infos = VirtualServerAnalyzer::new().analyze(Some(&cfg), &[]);
        assert_eq!(infos.len(), 2);

        // sorted by name
        assert_eq!(infos[0].name, "vs_empty");
        assert_eq!(infos[0].active_members, "0/0");
        assert_eq!(infos[0].status, HealthStatus::Critical);

        assert_eq!(infos[1].name, "vs_partial");
        assert_eq!(infos[1].active_members, "2/3");
        assert_eq!(infos[1].status, HealthStatus::Warning);
    }

    #[test]
    fn test_disabled_unresolved_and_healthy() {
        let cfg = config(
            vec![
                server("a_disabled", Some("p"), true),
                server("b_unknown", Some("missing"), false),
                server("c_healthy", Some("p"), false),
                server("d_no_pool", None, false),
            ],
            vec![pool("p", vec![member("n1:80", false)])],
        );

        let infos = VirtualServerAnalyzer::new().analyze(Some(&cfg), &[]);
        let statuses: Vec<(HealthStatus, &str)> = infos
            .iter()
            .map(|i| (i.status, i.active_members.as_str()))
            .collect();
        assert_eq!(
            statuses,
            vec![
                (HealthStatus::Critical, "0/0"),
                (HealthStatus::Warning, "0/0"),
                (HealthStatus::Healthy, "1/1"),
                (HealthStatus::Warning, "0/0"),
            ]
        );
        assert_eq!(infos[3].pool, "");
    }

    #[test]
    fn test_all_members_down_is_critical() {
        let cfg = config(
            vec![server("vs", Some("p"), false)],
            vec![pool("p", vec![member("n1:80", true), member("n2:80", true)])],
        );
        let infos = VirtualServerAnalyzer::new().analyze(Some(&cfg), &[]);
        assert_eq!(infos[0].status, HealthStatus::Critical);
        assert_eq!(infos[0].active_members, "0/2");
    }

    #[test]
    fn test_last_error_is_newest_matching_error() {
        let cfg = config(
            vec![server("vs_web", Some("pool_web"), false)],
            vec![pool("pool_web", vec![member("n1:80", false)])],
        );
        let records = vec![
            record(LogSeverity::Error, "tmm: VS_WEB old failure", 1),
            record(LogSeverity::Error, "tmm: pool_web member down", 5),
            record(LogSeverity::Warning, "tmm: vs_web newer warning", 9),
            record(LogSeverity::Error, "tmm: unrelated failure", 10),
        ];

        let infos = VirtualServerAnalyzer::new().analyze(Some(&cfg), &records);
        assert_eq!(
            infos[0].last_error.as_deref(),
            Some("pool_web member down - 2024-10-01 05:00:00")
        );
    }

    #[test]
    fn test_last_error_without_separator_uses_whole_line() {
        let cfg = config(vec![server("vs_api", None, false)], vec![]);
        let records = vec![record(LogSeverity::Critical, "  vs_api crashed  ", 3)];
        let infos = VirtualServerAnalyzer::new().analyze(Some(&cfg), &records);
        assert_eq!(
            infos[0].last_error.as_deref(),
            Some("vs_api crashed - 2024-10-01 03:00:00")
        );
    }

    #[test]
    fn test_missing_pool_name_matches_newest_error() {
        let cfg = config(vec![server("vs_api", None, false)], vec![]);
        let records = vec![
            record(LogSeverity::Error, "tmm: older failure", 1),
            record(LogSeverity::Error, "tmm: something else", 3),
        ];
        let infos = VirtualServerAnalyzer::new().analyze(Some(&cfg), &records);
        assert_eq!(infos[0].pool, "");
        assert_eq!(
            infos[0].last_error.as_deref(),
            Some("something else - 2024-10-01 03:00:00")
        );
    }

    #[test]
    fn test_summarize_truncates_before_splitting() {
        let line = format!("{}: tail", "x".repeat(120));
        assert_eq!(summarize_error_line(&line), format!("{}...", "x".repeat(100)));
    }
}
