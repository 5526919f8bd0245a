//! 节点类型
//!
//! 节点持有直连邻居代价表与当前路由表。

use std::collections::BTreeMap;

use super::id::NodeId;
use super::link::Cost;
use super::routing::RoutingTable;

/// 网络节点（路由器）
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    neighbors: BTreeMap<NodeId, Cost>,
    table: RoutingTable,
}

impl Node {
    /// 创建新节点，路由表只含自身路由
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            neighbors: BTreeMap::new(),
            table: RoutingTable::with_self_route(id),
        }
    }

    /// 获取节点标识符
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// 直连邻居及链路代价（按邻居标识符升序）
    pub fn neighbors(&self) -> impl Iterator<Item = (NodeId, Cost)> + '_ {
        self.neighbors.iter().map(|(n, c)| (*n, *c))
    }

    /// 到直连邻居的链路代价，非邻居返回 `None`
    pub fn link_cost(&self, neighbor: NodeId) -> Option<Cost> {
        self.neighbors.get(&neighbor).copied()
    }

    /// 当前路由表
    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    pub(crate) fn set_neighbor(&mut self, neighbor: NodeId, cost: Cost) -> Option<Cost> {
        self.neighbors.insert(neighbor, cost)
    }

    /// 断开与 `peer` 的链路并清除经由 `peer` 的路由，返回清除的表项数
    pub(crate) fn drop_peer(&mut self, peer: NodeId) -> usize {
        self.neighbors.remove(&peer);
        self.table.purge_via(peer)
    }

    pub(crate) fn replace_table(&mut self, table: RoutingTable) {
        self.table = table;
    }
}
