use crate::qkview_analysis::domain::{
    FindingSeverity, FindingType, LogRecord, LogSeverity, SslFinding,
};
use crate::shared::text::truncate_with_ellipsis;
use regex::Regex;
use std::collections::HashSet;

const DETAIL_MAX_LEN: usize = 200;

/// Checked in order; the first one present in the line names the finding
const WEAK_CIPHERS: [&str; 5] = ["rc4", "des", "null", "export", "md5"];

/// Derives SSL/TLS posture findings from log records
///
/// Four independent rules run against every record (certificate expiry,
/// obsolete protocol, weak cipher, handshake failure). A finding is
/// suppressed when an earlier one had the same type and message.
pub struct SslAnalyzer {
    cert_expiry_pattern: Regex,
    tls_version_pattern: Regex,
    cipher_pattern: Regex,
    handshake_pattern: Regex,
    virtual_server_pattern: Regex,
}

impl SslAnalyzer {
    pub fn new() -> Self {
        Self {
            cert_expiry_pattern: Regex::new(
                r"(?i)certificate.*expir|cert.*expir|ssl.*expir|expir.*certificate",
            )
            .expect("certificate expiry pattern is valid"),
            tls_version_pattern: Regex::new(r"(?i)TLS\s*(1\.0|1\.1|1\.2|1\.3)|SSLv[23]")
                .expect("tls version pattern is valid"),
            cipher_pattern: Regex::new(r"(?i)cipher|RC4|DES|MD5|NULL|EXPORT|WEAK")
                .expect("cipher pattern is valid"),
            handshake_pattern: Regex::new(
                r"(?i)ssl\s*handshake|handshake\s*fail|certificate\s*verify",
            )
            .expect("handshake pattern is valid"),
            virtual_server_pattern: Regex::new(r"(?i)vs_[\w-]+|virtual[-_]?server[\s:]+(\S+)")
                .expect("virtual server pattern is valid"),
        }
    }

    pub fn analyze(&self, records: &[LogRecord]) -> Vec<SslFinding> {
        let mut findings = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            let candidates = [
                self.certificate_finding(record),
                self.protocol_finding(record),
                self.cipher_finding(record),
                self.handshake_finding(record),
            ];

            for finding in candidates.into_iter().flatten() {
                if seen.insert(finding.dedup_key()) {
                    findings.push(finding);
                }
            }
        }

        findings
    }

    fn certificate_finding(&self, record: &LogRecord) -> Option<SslFinding> {
        let line = record.line();
        if !self.cert_expiry_pattern.is_match(line) {
            return None;
        }

        let severity = match record.severity() {
            LogSeverity::Critical | LogSeverity::Severe | LogSeverity::Error => {
                FindingSeverity::Critical
            }
            _ => FindingSeverity::Warning,
        };

        Some(SslFinding {
            severity,
            finding_type: FindingType::Certificate,
            message: "Certificate expiration detected".to_string(),
            detail: truncate_with_ellipsis(line, DETAIL_MAX_LEN),
            affected_virtual_servers: self.extract_virtual_servers(line),
        })
    }

    fn protocol_finding(&self, record: &LogRecord) -> Option<SslFinding> {
        let line = record.line();
        if !self.tls_version_pattern.is_match(line) {
            return None;
        }

        let lower = line.to_lowercase();
        let (severity, message, detail) = if ["tls 1.0", "tls1.0", "sslv2", "sslv3"]
            .iter()
            .any(|token| lower.contains(token))
        {
            (
                FindingSeverity::Critical,
                "Obsolete TLS/SSL protocol detected",
                "TLS 1.0, SSLv2, and SSLv3 are deprecated and vulnerable",
            )
        } else if lower.contains("tls 1.1") || lower.contains("tls1.1") {
            (
                FindingSeverity::Warning,
                "TLS 1.1 protocol in use",
                "TLS 1.1 is deprecated, upgrade to TLS 1.2 or 1.3",
            )
        } else {
            return None;
        };

        Some(SslFinding {
            severity,
            finding_type: FindingType::Cipher,
            message: message.to_string(),
            detail: detail.to_string(),
            affected_virtual_servers: self.extract_virtual_servers(line),
        })
    }

    fn cipher_finding(&self, record: &LogRecord) -> Option<SslFinding> {
        if !matches!(
            record.severity(),
            LogSeverity::Error | LogSeverity::Warning | LogSeverity::Critical
        ) {
            return None;
        }
        let line = record.line();
        if !self.cipher_pattern.is_match(line) {
            return None;
        }

        let lower = line.to_lowercase();
        let cipher = WEAK_CIPHERS.iter().find(|c| lower.contains(*c))?;

        Some(SslFinding {
            severity: FindingSeverity::Critical,
            finding_type: FindingType::Cipher,
            message: "Weak cipher suite detected".to_string(),
            detail: format!("Cipher contains: {}", cipher.to_uppercase()),
            affected_virtual_servers: self.extract_virtual_servers(line),
        })
    }

    fn handshake_finding(&self, record: &LogRecord) -> Option<SslFinding> {
        if !matches!(
            record.severity(),
            LogSeverity::Error | LogSeverity::Critical
        ) {
            return None;
        }
        let line = record.line();
        if !self.handshake_pattern.is_match(line) {
            return None;
        }

        Some(SslFinding {
            severity: FindingSeverity::Warning,
            finding_type: FindingType::Configuration,
            message: "SSL handshake failure detected".to_string(),
            detail: truncate_with_ellipsis(line, DETAIL_MAX_LEN),
            affected_virtual_servers: self.extract_virtual_servers(line),
        })
    }

    /// Unique `vs_*` / `virtual server <name>` tokens in first-seen order
    pub fn extract_virtual_servers(&self, line: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.virtual_server_pattern
            .find_iter(line)
            .map(|m| m.as_str().to_string())
            .filter(|token| seen.insert(token.clone()))
            .collect()
    }
}

impl Default for SslAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
