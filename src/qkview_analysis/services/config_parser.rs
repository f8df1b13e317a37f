use crate::qkview_analysis::domain::{DeviceConfig, Pool, PoolMember, VirtualServer};
use regex::Regex;
use std::fmt;

/// Non-fatal problem found while scanning bigip.conf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigParseIssue {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ConfigParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Whatever could be recovered from the configuration text, plus the issues
/// met along the way. An empty or partial config is a valid outcome.
#[derive(Debug, Clone, Default)]
pub struct ConfigParseOutcome {
    pub config: DeviceConfig,
    pub issues: Vec<ConfigParseIssue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    None,
    VirtualServer,
    Pool,
    PoolMembers,
    PoolMember,
}

impl BlockState {
    fn describe(&self) -> &'static str {
        match self {
            Self::None => "top-level",
            Self::VirtualServer => "virtual server",
            Self::Pool => "pool",
            Self::PoolMembers => "pool members",
            Self::PoolMember => "pool member",
        }
    }
}

/// Mutable scanner state for one `parse` call
struct Scan {
    state: BlockState,
    depth: i64,
    block_start: i64,
    members_start: i64,
    member_start: i64,
    virtual_server: Option<VirtualServer>,
    pool: Option<Pool>,
    member: Option<PoolMember>,
    outcome: ConfigParseOutcome,
}

impl Scan {
    fn new() -> Self {
        Self {
            state: BlockState::None,
            depth: 0,
            block_start: 0,
            members_start: 0,
            member_start: 0,
            virtual_server: None,
            pool: None,
            member: None,
            outcome: ConfigParseOutcome::default(),
        }
    }

    fn issue(&mut self, line: usize, message: String) {
        self.outcome.issues.push(ConfigParseIssue { line, message });
    }

    fn open_block_name(&self) -> String {
        match self.state {
            BlockState::VirtualServer => self
                .virtual_server
                .as_ref()
                .map(|vs| vs.name.clone())
                .unwrap_or_default(),
            BlockState::Pool | BlockState::PoolMembers | BlockState::PoolMember => self
                .pool
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            BlockState::None => String::new(),
        }
    }

    /// Drops any partially built object when a new top-level block starts
    /// before the previous one was closed.
    fn discard_open_block(&mut self, line: usize) {
        if self.state != BlockState::None {
            let message = format!(
                "discarded incomplete {} block '{}'",
                self.state.describe(),
                self.open_block_name()
            );
            self.issue(line, message);
        }
        self.virtual_server = None;
        self.pool = None;
        self.member = None;
    }

    fn apply_braces(&mut self, line: usize, open: usize, close: usize) {
        self.depth += open as i64 - close as i64;
        if self.depth < 0 {
            self.issue(line, "unbalanced closing brace".to_string());
            self.depth = 0;
        }
    }

    /// Pops every block whose entry depth has been reached, innermost first
    fn close_finished_blocks(&mut self) {
        if self.state == BlockState::PoolMember && self.depth <= self.member_start {
            if let (Some(pool), Some(member)) = (self.pool.as_mut(), self.member.take()) {
                pool.members.push(member);
            }
            self.state = BlockState::PoolMembers;
        }

        if self.state == BlockState::PoolMembers && self.depth <= self.members_start {
            self.state = BlockState::Pool;
        }

        if self.state == BlockState::Pool && self.depth <= self.block_start {
            if let Some(pool) = self.pool.take() {
                self.outcome.config.pools.insert(pool.name.clone(), pool);
            }
            self.state = BlockState::None;
        }

        if self.state == BlockState::VirtualServer && self.depth <= self.block_start {
            if let Some(vs) = self.virtual_server.take() {
                self.outcome
                    .config
                    .virtual_servers
                    .insert(vs.name.clone(), vs);
            }
            self.state = BlockState::None;
        }
    }
}

/// Line-oriented scanner for the brace-delimited `bigip.conf` format
///
/// Tracks a global brace depth and a small block state machine
/// (virtual server, pool, pool members, pool member). Only the fields the
/// analysis needs are extracted; everything else only moves the depth.
pub struct ConfigParser {
    virtual_pattern: Regex,
    pool_pattern: Regex,
    member_pattern: Regex,
    pool_ref_pattern: Regex,
    destination_pattern: Regex,
    address_pattern: Regex,
    monitor_pattern: Regex,
}

impl ConfigParser {
    pub fn new() -> Self {
        Self {
            virtual_pattern: Regex::new(r"^ltm virtual\s+(/\S+)\s*\{")
                .expect("virtual server pattern is valid"),
            pool_pattern: Regex::new(r"^ltm pool\s+(/\S+)\s*\{").expect("pool pattern is valid"),
            member_pattern: Regex::new(r"^\s*(/\S+:\d+)\s*\{").expect("member pattern is valid"),
            pool_ref_pattern: Regex::new(r"^\s*pool\s+(/\S+)").expect("pool ref pattern is valid"),
            destination_pattern: Regex::new(r"^\s*destination\s+(/\S+)")
                .expect("destination pattern is valid"),
            address_pattern: Regex::new(r"^\s*address\s+(\S+)").expect("address pattern is valid"),
            monitor_pattern: Regex::new(r"^\s*monitor\s+(/\S+)").expect("monitor pattern is valid"),
        }
    }

    /// Parses configuration text; never fails
    pub fn parse(&self, text: &str) -> ConfigParseOutcome {
        let mut scan = Scan::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let open = trimmed.matches('{').count();
            let close = trimmed.matches('}').count();

            if let Some(caps) = self.virtual_pattern.captures(line) {
                scan.discard_open_block(line_no);
                scan.state = BlockState::VirtualServer;
                scan.block_start = scan.depth;
                scan.virtual_server = Some(VirtualServer::new(clean_name(&caps[1])));
                scan.apply_braces(line_no, open, close);
                scan.close_finished_blocks();
                continue;
            }

            if let Some(caps) = self.pool_pattern.captures(line) {
                scan.discard_open_block(line_no);
                scan.state = BlockState::Pool;
                scan.block_start = scan.depth;
                scan.pool = Some(Pool::new(clean_name(&caps[1])));
                scan.apply_braces(line_no, open, close);
                scan.close_finished_blocks();
                continue;
            }

            if scan.state == BlockState::Pool && trimmed.contains("members {") {
                scan.state = BlockState::PoolMembers;
                scan.members_start = scan.depth;
                scan.apply_braces(line_no, open, close);
                scan.close_finished_blocks();
                continue;
            }

            if scan.state == BlockState::PoolMembers {
                if let Some(caps) = self.member_pattern.captures(line) {
                    scan.state = BlockState::PoolMember;
                    scan.member_start = scan.depth;
                    scan.member = Some(PoolMember::new(clean_name(&caps[1])));
                    scan.apply_braces(line_no, open, close);
                    scan.close_finished_blocks();
                    continue;
                }
            }

            scan.apply_braces(line_no, open, close);
            if close > 0 {
                scan.close_finished_blocks();
            }

            if close == 0 || open > 0 {
                self.apply_field(&mut scan, line, trimmed);
            }
        }

        if scan.state != BlockState::None {
            let message = format!(
                "truncated {} block '{}' discarded at end of input",
                scan.state.describe(),
                scan.open_block_name()
            );
            let last_line = text.lines().count();
            scan.issue(last_line, message);
        }

        scan.outcome
    }

    fn apply_field(&self, scan: &mut Scan, line: &str, trimmed: &str) {
        match scan.state {
            BlockState::VirtualServer => {
                let Some(vs) = scan.virtual_server.as_mut() else {
                    return;
                };
                if let Some(caps) = self.pool_ref_pattern.captures(line) {
                    vs.pool = Some(clean_name(&caps[1]));
                } else if let Some(caps) = self.destination_pattern.captures(line) {
                    vs.destination = Some(clean_name(&caps[1]));
                } else if trimmed == "disabled" {
                    vs.disabled = true;
                }
            }
            BlockState::Pool | BlockState::PoolMembers => {
                let Some(pool) = scan.pool.as_mut() else {
                    return;
                };
                if let Some(caps) = self.monitor_pattern.captures(line) {
                    pool.monitor = Some(clean_name(&caps[1]));
                }
            }
            BlockState::PoolMember => {
                let Some(member) = scan.member.as_mut() else {
                    return;
                };
                if let Some(caps) = self.address_pattern.captures(line) {
                    member.address = Some(caps[1].to_string());
                } else if trimmed.contains("session user-disabled") {
                    member.user_disabled = true;
                } else if trimmed.contains("state user-down") {
                    member.down = true;
                }
            }
            BlockState::None => {}
        }
    }
}

impl Default for ConfigParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduces `/Partition/folder/name` to `name`; shorter paths only lose the
/// leading slash.
pub fn clean_name(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split('/').collect();
    if parts.len() >= 3 {
        return parts[parts.len() - 1].to_string();
    }
    full_name
        .strip_prefix('/')
        .unwrap_or(full_name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CONFIG: &str = r#"
#TMSH-VERSION: 15.1.0
ltm node /Common/10.0.0.1 {
    address 10.0.0.1
}
ltm pool /Common/web_pool {
    members {
        /Common/10.0.0.1:80 {
            address 10.0.0.1
        }
        /Common/10.0.0.2:80 {
            address 10.0.0.2
            session user-disabled
        }
        /Common/10.0.0.3:80 {
            address 10.0.0.3
        }
    }
    monitor /Common/http
}
ltm pool /Common/empty_pool {
    monitor /Common/tcp
}
ltm virtual /Common/vs_web {
    destination /Common/192.168.1.10:443
    ip-protocol tcp
    pool /Common/web_pool
    profiles {
        /Common/http { }
        /Common/clientssl {
            context clientside
        }
    }
}
ltm virtual /Common/vs_off {
    destination /Common/192.168.1.11:80
    disabled
    pool /Common/empty_pool
}
"#;

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("/Common/web_pool"), "web_pool");
        assert_eq!(clean_name("/Common/app/web_pool"), "web_pool");
        assert_eq!(clean_name("/web_pool"), "web_pool");
        assert_eq!(clean_name("web_pool"), "web_pool");
    }

    #[test]
    fn test_parse_virtual_servers_and_pools() {
        let outcome = ConfigParser::new().parse(SAMPLE_CONFIG);
        let config = outcome.config;

        assert!(outcome.issues.is_empty(), "issues: {:?}", outcome.issues);
        assert_eq!(config.virtual_servers.len(), 2);
        assert_eq!(config.pools.len(), 2);

        let vs = &config.virtual_servers["vs_web"];
        assert_eq!(vs.pool.as_deref(), Some("web_pool"));
        assert_eq!(vs.destination.as_deref(), Some("192.168.1.10:443"));
        assert!(!vs.disabled);

        assert!(config.virtual_servers["vs_off"].disabled);
    }

    #[test]
    fn test_parse_pool_members_and_flags() {
        let config = ConfigParser::new().parse(SAMPLE_CONFIG).config;
        let pool = &config.pools["web_pool"];

        assert_eq!(pool.monitor.as_deref(), Some("http"));
        assert_eq!(pool.members.len(), 3);
        assert_eq!(pool.members[0].name, "10.0.0.1:80");
        assert_eq!(pool.members[0].address.as_deref(), Some("10.0.0.1"));
        assert!(pool.members[1].user_disabled);
        assert_eq!(pool.active_members(), 2);

        let empty = &config.pools["empty_pool"];
        assert_eq!(empty.total_members(), 0);
        assert_eq!(empty.monitor.as_deref(), Some("tcp"));
    }

    #[test]
    fn test_member_state_user_down() {
        let text = "ltm pool /Common/p {\n    members {\n        /Common/n1:443 {\n            address 10.1.1.1\n            state user-down\n        }\n    }\n}\n";
        let config = ConfigParser::new().parse(text).config;
        let member = &config.pools["p"].members[0];
        assert!(member.down);
        assert!(!member.user_disabled);
        assert!(!member.is_active());
    }

    #[test]
    fn test_truncated_block_is_discarded() {
        let text = "ltm pool /Common/ok {\n    monitor /Common/http\n}\nltm virtual /Common/vs_cut {\n    pool /Common/ok\n";
        let outcome = ConfigParser::new().parse(text);

        assert!(outcome.config.pools.contains_key("ok"));
        assert!(outcome.config.virtual_servers.is_empty());
        assert_eq!(outcome.issues.len(), 1);
        assert!(outcome.issues[0].message.contains("vs_cut"));
    }

    #[test]
    fn test_truncated_member_contributes_nothing() {
        let text = "ltm pool /Common/p {\n    members {\n        /Common/n1:80 {\n            address 10.0.0.1\n        }\n        /Common/n2:80 {\n            address 10.0.0.2\n";
        let outcome = ConfigParser::new().parse(text);
        assert!(outcome.config.pools.is_empty());
        assert!(!outcome.issues.is_empty());
    }

    #[test]
    fn test_new_block_before_close_discards_partial() {
        let text = "ltm virtual /Common/vs_a {\n    pool /Common/p\nltm virtual /Common/vs_b {\n    pool /Common/q\n}\n";
        let outcome = ConfigParser::new().parse(text);

        assert!(!outcome.config.virtual_servers.contains_key("vs_a"));
        assert!(outcome
            .issues
            .iter()
            .any(|i| i.line == 3 && i.message.contains("vs_a")));
    }

    #[test]
    fn test_single_line_block_is_committed() {
        let text = "ltm pool /Common/inline { }\nltm virtual /Common/vs_x {\n    pool /Common/inline\n}\n";
        let outcome = ConfigParser::new().parse(text);
        assert!(outcome.config.pools.contains_key("inline"));
        assert!(outcome.config.virtual_servers.contains_key("vs_x"));
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_last_definition_wins() {
        let text = "ltm virtual /Common/vs {\n    pool /Common/a\n}\nltm virtual /Common/vs {\n    pool /Common/b\n}\n";
        let config = ConfigParser::new().parse(text).config;
        assert_eq!(config.virtual_servers["vs"].pool.as_deref(), Some("b"));
    }

    #[test]
    fn test_unbalanced_closing_brace_is_reported() {
        let text = "}\nltm pool /Common/p {\n}\n";
        let outcome = ConfigParser::new().parse(text);
        assert!(outcome.config.pools.contains_key("p"));
        assert_eq!(outcome.issues[0].line, 1);
    }

    #[test]
    fn test_empty_input() {
        let outcome = ConfigParser::new().parse("");
        assert!(outcome.config.is_empty());
        assert!(outcome.issues.is_empty());
    }
}
