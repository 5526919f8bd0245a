//! 结构化快照（JSON）
//!
//! 每个 epoch（初始拓扑以及每条变更之后）记录一次完整的路由表与追踪结果，
//! 便于离线比对，而不必解析文本输出。

mod types;

pub use types::{
    EpochSnapshot, RouteRecord, SnapshotLogger, TableSnapshot, TraceOutcome, TraceRecord,
};
