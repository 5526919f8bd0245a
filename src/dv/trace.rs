//! 路径追踪
//!
//! 沿各节点路由表的下一跳逐跳行走，得到完整路径与累计代价。

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace as trace_log};

use crate::net::{Cost, Network, NodeId};

/// 一条可达路由
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// 从源到目的（含两端）的节点序列
    pub path: Vec<NodeId>,
    /// 沿途链路代价之和
    pub cost: Cost,
}

impl Route {
    /// 输出中列出的跳：源节点起，不含最终到达的目的节点
    pub fn hops(&self) -> &[NodeId] {
        let end = self.path.len().saturating_sub(1);
        &self.path[..end]
    }
}

/// 不可达的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unreachable {
    /// 源或目的节点不在网络中
    UnknownNode { node: NodeId },
    /// 源节点路由表中没有目的节点
    NoRoute,
    /// 路由表给出的下一跳不是当前节点的直连邻居
    NotNeighbor { at: NodeId, next: NodeId },
    /// 行走过程中重复访问节点
    Loop { at: NodeId },
}

impl fmt::Display for Unreachable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unreachable::UnknownNode { node } => write!(f, "unknown node {node}"),
            Unreachable::NoRoute => write!(f, "no route"),
            Unreachable::NotNeighbor { at, next } => {
                write!(f, "next hop {next} is not a neighbor of {at}")
            }
            Unreachable::Loop { at } => write!(f, "routing loop at {at}"),
        }
    }
}

/// 追踪结果
pub type Trace = Result<Route, Unreachable>;

/// 追踪 `src` 到 `dst` 的路径。
///
/// 表与拓扑不一致、或出现环路时返回不可达，保证一定终止。
#[tracing::instrument(skip(net), fields(src = %src, dst = %dst))]
pub fn trace(net: &Network, src: NodeId, dst: NodeId) -> Trace {
    for node in [src, dst] {
        if !net.contains(node) {
            debug!(node = %node, "节点不存在");
            return Err(Unreachable::UnknownNode { node });
        }
    }
    if !net.table(src).is_some_and(|t| t.contains(dst)) {
        debug!("源节点无到目的节点的路由");
        return Err(Unreachable::NoRoute);
    }

    let mut path = vec![src];
    let mut visited = HashSet::from([src]);
    let mut cost: Cost = 0;
    let mut curr = src;

    while curr != dst {
        let next = net
            .table(curr)
            .and_then(|t| t.get(dst))
            .map(|e| e.next_hop)
            .ok_or(Unreachable::NoRoute)?;
        let link = net
            .link_cost(curr, next)
            .ok_or(Unreachable::NotNeighbor { at: curr, next })?;

        cost = cost.saturating_add(link);
        trace_log!(at = %curr, next = %next, link, cost, "前进一跳");
        if !visited.insert(next) {
            debug!(at = %next, "检测到路由环路");
            return Err(Unreachable::Loop { at: next });
        }
        path.push(next);
        curr = next;
    }

    Ok(Route { path, cost })
}
