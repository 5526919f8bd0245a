//! 网络拓扑管理
//!
//! 持有全部节点（邻居代价表 + 路由表），提供链路增改、删除等拓扑原语。
//! 每个测试/驱动各自构造 `Network`，不存在进程级全局状态。

use std::collections::BTreeMap;

use super::id::NodeId;
use super::link::{Cost, Link};
use super::node::Node;
use super::routing::RoutingTable;
use super::stats::Stats;
use tracing::{debug, trace, warn};

/// 网络拓扑
#[derive(Debug, Default, Clone)]
pub struct Network {
    nodes: BTreeMap<NodeId, Node>,
    /// 拓扑变化后路由表尚未重算
    dirty: bool,
    pub stats: Stats,
}

impl Network {
    /// 由链路列表构建网络（同一对节点多次出现时后者覆盖前者）
    pub fn from_links<I>(links: I) -> Self
    where
        I: IntoIterator<Item = Link>,
    {
        let mut net = Self::default();
        for link in links {
            net.upsert_link(link.a, link.b, link.cost);
        }
        net
    }

    /// 节点不存在时创建（带自身路由）
    fn ensure_node(&mut self, id: NodeId) -> &mut Node {
        self.nodes.entry(id).or_insert_with(|| {
            trace!(node = %id, "创建节点");
            Node::new(id)
        })
    }

    /// 添加链路或覆盖已有链路的代价（双向写入）
    pub fn upsert_link(&mut self, a: NodeId, b: NodeId, cost: Cost) {
        self.ensure_node(a);
        self.ensure_node(b);
        self.dirty = true;

        if a == b {
            warn!(node = %a, cost, "忽略自环链路");
            return;
        }

        let old = self.ensure_node(a).set_neighbor(b, cost);
        self.ensure_node(b).set_neighbor(a, cost);
        debug!(a = %a, b = %b, cost, old = ?old, "更新链路");
    }

    /// 删除链路（双向），并立即清除两端路由表中经由对端的表项。
    ///
    /// 任一节点不存在或链路不存在时不做任何修改，返回 `false`。
    pub fn remove_link(&mut self, a: NodeId, b: NodeId) -> bool {
        if self.link_cost(a, b).is_none() {
            debug!(a = %a, b = %b, "链路不存在，忽略删除");
            return false;
        }

        let mut purged = 0;
        for (me, peer) in [(a, b), (b, a)] {
            if let Some(node) = self.nodes.get_mut(&me) {
                purged += node.drop_peer(peer);
            }
        }
        self.dirty = true;
        debug!(a = %a, b = %b, purged_routes = purged, "删除链路");
        true
    }

    /// 所有已知节点（升序）
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// `a` 与 `b` 之间的链路代价
    pub fn link_cost(&self, a: NodeId, b: NodeId) -> Option<Cost> {
        self.nodes.get(&a).and_then(|n| n.link_cost(b))
    }

    /// 节点的直连邻居；未知节点返回空
    pub fn neighbors(&self, id: NodeId) -> Vec<(NodeId, Cost)> {
        self.nodes
            .get(&id)
            .map(|n| n.neighbors().collect())
            .unwrap_or_default()
    }

    /// 节点当前持有的路由表
    pub fn table(&self, id: NodeId) -> Option<&RoutingTable> {
        self.nodes.get(&id).map(Node::table)
    }

    /// 每条无向链路恰好出现一次（`a < b`），按端点升序
    pub fn links(&self) -> Vec<Link> {
        let mut out = Vec::new();
        for node in self.nodes.values() {
            for (peer, cost) in node.neighbors() {
                if node.id() < peer {
                    out.push(Link::new(node.id(), peer, cost));
                }
            }
        }
        out
    }

    /// 拓扑自上次收敛以来是否发生过变化
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub(crate) fn install_tables(&mut self, mut tables: BTreeMap<NodeId, RoutingTable>) {
        for (id, node) in self.nodes.iter_mut() {
            let table = tables
                .remove(id)
                .unwrap_or_else(|| RoutingTable::with_self_route(*id));
            node.replace_table(table);
        }
    }
}
