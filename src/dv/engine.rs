//! 距离向量收敛引擎
//!
//! 集中式地模拟各节点独立运行的 Bellman-Ford 松弛：
//! 每一轮都只读取上一轮的快照、写入新快照，轮末整体替换，
//! 与同步分布式语义一致。每次收敛都从零重算，不读取节点已持有的路由表。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::net::{Network, NodeId, RouteEntry, RoutingTable};

/// 收敛参数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingOpts {
    /// 最大松弛轮数；`None` 表示使用 `节点数 - 1`。
    /// 指定值不会超过 `节点数 - 1`。
    pub round_limit: Option<usize>,
}

/// 一次收敛的结果摘要
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convergence {
    /// 实际执行的松弛轮数
    pub rounds: usize,
    /// 是否观察到不再变化的一轮（或根本无需松弛）
    pub fixed_point: bool,
    /// 所有路由表中的表项总数
    pub routes: usize,
}

/// 距离向量路由引擎
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceVector {
    opts: RoutingOpts,
}

impl DistanceVector {
    pub fn new(opts: RoutingOpts) -> Self {
        Self { opts }
    }

    /// 基于当前拓扑计算每个节点的收敛路由表（纯函数，不修改网络）。
    #[tracing::instrument(skip(self, net), fields(nodes = net.node_count()))]
    pub fn compute(&self, net: &Network) -> (BTreeMap<NodeId, RoutingTable>, Convergence) {
        let mut dist: BTreeMap<NodeId, RoutingTable> = net
            .node_ids()
            .map(|id| (id, RoutingTable::with_self_route(id)))
            .collect();

        // 直连邻居作为一跳路由
        for node in net.nodes() {
            let me = node.id();
            let Some(table) = dist.get_mut(&me) else {
                continue;
            };
            for (n, cost) in node.neighbors() {
                if n != me {
                    table.offer(n, RouteEntry::new(n, cost));
                }
            }
        }

        let bound = net.node_count().saturating_sub(1);
        let limit = self.opts.round_limit.map_or(bound, |k| k.min(bound));
        trace!(bound, limit, "松弛轮数上限");

        let mut rounds = 0;
        let mut fixed_point = bound == 0;
        while rounds < limit {
            let mut next = dist.clone();
            let mut changed = 0usize;

            for node in net.nodes() {
                let me = node.id();
                let Some(table) = next.get_mut(&me) else {
                    continue;
                };
                for (n, link_cost) in node.neighbors() {
                    let Some(advertised) = dist.get(&n) else {
                        continue;
                    };
                    for (dst, via) in advertised.iter() {
                        // 自身路由恒为 (self, 0)
                        if dst == me {
                            continue;
                        }
                        let candidate = RouteEntry::new(n, link_cost.saturating_add(via.cost));
                        if table.offer(dst, candidate) {
                            changed += 1;
                        }
                    }
                }
            }

            dist = next;
            rounds += 1;
            debug!(round = rounds, changed, "完成一轮松弛");
            if changed == 0 {
                fixed_point = true;
                break;
            }
        }

        let routes = dist.values().map(RoutingTable::len).sum();
        (
            dist,
            Convergence {
                rounds,
                fixed_point,
                routes,
            },
        )
    }
}

impl Network {
    /// 从零重算所有节点的路由表，并整体替换节点已持有的表。
    #[tracing::instrument(skip(self))]
    pub fn converge(&mut self, opts: &RoutingOpts) -> Convergence {
        let (tables, conv) = DistanceVector::new(*opts).compute(self);
        self.install_tables(tables);
        self.mark_clean();

        self.stats.convergences += 1;
        self.stats.relaxation_rounds += conv.rounds as u64;
        info!(
            rounds = conv.rounds,
            fixed_point = conv.fixed_point,
            routes = conv.routes,
            "✅ 路由收敛完成"
        );
        conv
    }

    /// 仅在拓扑发生变化后重算；返回 `None` 表示路由表已是最新。
    pub fn ensure_converged(&mut self, opts: &RoutingOpts) -> Option<Convergence> {
        if !self.is_dirty() {
            trace!("拓扑未变化，跳过收敛");
            return None;
        }
        Some(self.converge(opts))
    }
}
