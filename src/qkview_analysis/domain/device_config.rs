use std::collections::BTreeMap;

/// Typed view of the virtual servers and pools declared in bigip.conf
///
/// Both maps are keyed by cleaned object name. A virtual server refers to
/// its pool by name only; the pool may be missing from `pools`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceConfig {
    pub virtual_servers: BTreeMap<String, VirtualServer>,
    pub pools: BTreeMap<String, Pool>,
}

impl DeviceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a virtual server's pool reference, `None` when unknown
    pub fn pool_for(&self, virtual_server: &VirtualServer) -> Option<&Pool> {
        virtual_server
            .pool
            .as_deref()
            .and_then(|name| self.pools.get(name))
    }

    pub fn is_empty(&self) -> bool {
        self.virtual_servers.is_empty() && self.pools.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualServer {
    pub name: String,
    pub pool: Option<String>,
    pub disabled: bool,
    pub destination: Option<String>,
}

impl VirtualServer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pool {
    pub name: String,
    pub monitor: Option<String>,
    pub members: Vec<PoolMember>,
}

impl Pool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Members that are neither user-disabled nor user-down
    pub fn active_members(&self) -> usize {
        self.members.iter().filter(|m| m.is_active()).count()
    }

    pub fn total_members(&self) -> usize {
        self.members.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolMember {
    /// `node:port`
    pub name: String,
    pub address: Option<String>,
    /// `session user-disabled`
    pub user_disabled: bool,
    /// `state user-down`
    pub down: bool,
}

impl PoolMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        !self.user_disabled && !self.down
    }
}
