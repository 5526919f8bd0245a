use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dv::{Convergence, Trace, Unreachable};
use crate::net::{Cost, Network, NodeId};
use crate::sim::{LinkChange, Message, SimError};

/// 一条路由表项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub dst: NodeId,
    pub next_hop: NodeId,
    pub cost: Cost,
}

/// 单个节点的路由表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub node: NodeId,
    pub routes: Vec<RouteRecord>,
}

/// 追踪结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TraceOutcome {
    Delivered { hops: Vec<NodeId>, cost: Cost },
    Unreachable { cause: Unreachable },
}

impl From<&Trace> for TraceOutcome {
    fn from(trace: &Trace) -> Self {
        match trace {
            Ok(route) => TraceOutcome::Delivered {
                hops: route.hops().to_vec(),
                cost: route.cost,
            },
            Err(cause) => TraceOutcome::Unreachable { cause: *cause },
        }
    }
}

/// 一条消息的追踪记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub src: NodeId,
    pub dst: NodeId,
    pub message: String,
    #[serde(flatten)]
    pub outcome: TraceOutcome,
}

impl TraceRecord {
    pub fn new(msg: &Message, trace: &Trace) -> Self {
        Self {
            src: msg.src,
            dst: msg.dst,
            message: msg.text.trim().to_string(),
            outcome: TraceOutcome::from(trace),
        }
    }
}

/// 一个 epoch 的完整快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochSnapshot {
    /// 0 为初始拓扑，之后每条变更加一
    pub epoch: usize,
    /// 触发该 epoch 的变更（初始拓扑为 None）
    pub change: Option<LinkChange>,
    pub convergence: Convergence,
    pub tables: Vec<TableSnapshot>,
    pub traces: Vec<TraceRecord>,
}

impl EpochSnapshot {
    /// 采集网络当前持有的路由表；追踪记录由调用方追加
    pub fn capture(
        epoch: usize,
        change: Option<LinkChange>,
        convergence: Convergence,
        net: &Network,
    ) -> Self {
        let tables = net
            .node_ids()
            .filter_map(|id| {
                let table = net.table(id)?;
                Some(TableSnapshot {
                    node: id,
                    routes: table
                        .iter()
                        .map(|(dst, e)| RouteRecord {
                            dst,
                            next_hop: e.next_hop,
                            cost: e.cost,
                        })
                        .collect(),
                })
            })
            .collect();
        Self {
            epoch,
            change,
            convergence,
            tables,
            traces: Vec::new(),
        }
    }
}

/// 快照记录器
#[derive(Debug, Default, Clone)]
pub struct SnapshotLogger {
    pub epochs: Vec<EpochSnapshot>,
}

impl SnapshotLogger {
    pub fn push(&mut self, snapshot: EpochSnapshot) {
        self.epochs.push(snapshot);
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.epochs)
    }

    /// 以 JSON 数组写入文件
    pub fn write_to(&self, path: &Path) -> Result<(), SimError> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|source| SimError::Create {
            path: path.to_path_buf(),
            source,
        })
    }
}
