//! 距离向量路由模块
//!
//! 此模块包含收敛引擎（`engine`）与路径追踪（`trace`）。

// 子模块声明
mod engine;
mod trace;

// 重新导出公共接口
pub use engine::{Convergence, DistanceVector, RoutingOpts};
pub use trace::{Route, Trace, Unreachable, trace};
