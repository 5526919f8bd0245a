//! 网络拓扑模块
//!
//! 此模块包含节点、无向带权链路、路由表以及作为拓扑存储的 `Network`。

// 子模块声明
mod id;
mod link;
mod network;
mod node;
mod routing;
mod stats;

// 重新导出公共接口
pub use id::NodeId;
pub use link::{Cost, Link};
pub use network::Network;
pub use routing::{RouteEntry, RoutingTable};
pub use stats::Stats;
