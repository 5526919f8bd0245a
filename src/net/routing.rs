//! 路由表
//!
//! 每个节点持有一张 `目的节点 -> (下一跳, 代价)` 的路由表。
//! 表中不存在的目的节点即为不可达，不使用“无穷大”哨兵值。

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use super::id::NodeId;
use super::link::Cost;

/// 到达某个目的节点的最优已知路由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub next_hop: NodeId,
    pub cost: Cost,
}

impl RouteEntry {
    pub fn new(next_hop: NodeId, cost: Cost) -> Self {
        Self { next_hop, cost }
    }

    /// 候选路由是否应替换 `current`。
    ///
    /// 代价严格更小者胜出；代价相等时下一跳标识符较小者胜出，
    /// 保证相同输入的多次运行结果一致。
    pub fn preferred_over(&self, current: &RouteEntry) -> bool {
        self.cost < current.cost || (self.cost == current.cost && self.next_hop < current.next_hop)
    }
}

/// 单个节点的路由表，按目的节点升序存储
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    routes: BTreeMap<NodeId, RouteEntry>,
}

impl RoutingTable {
    /// 只含自身路由（下一跳为自己，代价 0）的路由表
    pub fn with_self_route(id: NodeId) -> Self {
        let mut routes = BTreeMap::new();
        routes.insert(id, RouteEntry::new(id, 0));
        Self { routes }
    }

    pub fn get(&self, dst: NodeId) -> Option<&RouteEntry> {
        self.routes.get(&dst)
    }

    pub fn contains(&self, dst: NodeId) -> bool {
        self.routes.contains_key(&dst)
    }

    /// 无条件写入（覆盖旧值）
    #[cfg(test)]
    pub(crate) fn insert(&mut self, dst: NodeId, entry: RouteEntry) -> Option<RouteEntry> {
        self.routes.insert(dst, entry)
    }

    /// 按松弛规则提交候选路由，返回表是否发生变化。
    pub fn offer(&mut self, dst: NodeId, candidate: RouteEntry) -> bool {
        match self.routes.entry(dst) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(candidate);
                true
            }
            btree_map::Entry::Occupied(mut slot) => {
                if candidate.preferred_over(slot.get()) {
                    slot.insert(candidate);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// 删除目的节点为 `peer` 或下一跳为 `peer` 的所有表项，返回删除条数。
    pub fn purge_via(&mut self, peer: NodeId) -> usize {
        let before = self.routes.len();
        self.routes
            .retain(|dst, entry| *dst != peer && entry.next_hop != peer);
        before - self.routes.len()
    }

    /// 按目的节点升序遍历
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &RouteEntry)> {
        self.routes.iter().map(|(dst, entry)| (*dst, entry))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }
}
