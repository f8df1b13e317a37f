pub mod analysis_result;
pub mod device_config;
pub mod findings;
pub mod log_record;

pub use analysis_result::{AnalysisResult, EntryLog, Summary};
pub use device_config::{DeviceConfig, Pool, PoolMember, VirtualServer};
pub use findings::{
    FindingSeverity, FindingType, HealthStatus, Priority, Recommendation, SslFinding,
    TimelineEntry, TopError, VirtualServerInfo,
};
pub use log_record::{LogRecord, LogSeverity};
