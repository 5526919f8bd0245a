//! 链路类型
//!
//! 定义无向带权链路。

use super::id::NodeId;

/// 链路代价（非负整数）
pub type Cost = u64;

/// 无向链路：cost(a, b) == cost(b, a)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
    pub cost: Cost,
}

impl Link {
    /// 创建新链路
    pub fn new(a: NodeId, b: NodeId, cost: Cost) -> Self {
        Self { a, b, cost }
    }
}
