//! 仿真驱动
//!
//! 依次处理初始拓扑与每条变更：施加变更、从零收敛、输出全部路由表、
//! 再按消息文件顺序追踪每条消息。

use std::io::Write;

use tracing::{debug, info};

use super::error::SimError;
use super::event::LinkChange;
use super::input::Message;
use super::output::{format_trace, write_tables};
use crate::dv::{RoutingOpts, trace};
use crate::net::{Link, Network};
use crate::report::{EpochSnapshot, SnapshotLogger, TraceRecord};

/// 仿真配置
#[derive(Debug, Clone, Copy, Default)]
pub struct SimOpts {
    pub routing: RoutingOpts,
}

/// 一次完整运行的摘要
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 输出的 epoch 数（初始拓扑 + 变更条数）
    pub epochs: usize,
    pub messages_traced: usize,
    pub unreachable: usize,
}

/// 距离向量仿真器：持有网络与待追踪的消息
pub struct Simulator {
    net: Network,
    messages: Vec<Message>,
    opts: SimOpts,
    epoch: usize,
    /// 若开启则记录每个 epoch 的 JSON 快照
    pub snapshots: Option<SnapshotLogger>,
}

impl Simulator {
    pub fn new(links: Vec<Link>, messages: Vec<Message>, opts: SimOpts) -> Self {
        Self {
            net: Network::from_links(links),
            messages,
            opts,
            epoch: 0,
            snapshots: None,
        }
    }

    pub fn net(&self) -> &Network {
        &self.net
    }

    /// 处理一个 epoch：可选地施加变更，然后收敛并输出
    #[tracing::instrument(skip(self, out), fields(epoch = self.epoch))]
    pub fn step<W: Write>(
        &mut self,
        change: Option<LinkChange>,
        out: &mut W,
        summary: &mut RunSummary,
    ) -> Result<(), SimError> {
        if let Some(change) = &change {
            let modified = change.apply(&mut self.net);
            debug!(modified, "变更已施加");
        }

        let conv = self.net.converge(&self.opts.routing);
        write_tables(&self.net, out)?;

        let mut snapshot = self
            .snapshots
            .is_some()
            .then(|| EpochSnapshot::capture(self.epoch, change, conv, &self.net));

        for msg in &self.messages {
            let result = trace(&self.net, msg.src, msg.dst);
            writeln!(out, "{}", format_trace(msg, &result))?;

            summary.messages_traced += 1;
            if result.is_err() {
                summary.unreachable += 1;
            }
            if let Some(s) = snapshot.as_mut() {
                s.traces.push(TraceRecord::new(msg, &result));
            }
        }

        if let (Some(logger), Some(s)) = (self.snapshots.as_mut(), snapshot) {
            logger.push(s);
        }
        self.epoch += 1;
        summary.epochs += 1;
        Ok(())
    }

    /// 运行初始拓扑以及全部变更
    #[tracing::instrument(
        skip(self, changes, out),
        fields(changes = changes.len(), messages = self.messages.len())
    )]
    pub fn run<W: Write>(
        &mut self,
        changes: &[LinkChange],
        out: &mut W,
    ) -> Result<RunSummary, SimError> {
        info!(nodes = self.net.node_count(), "▶️  开始运行仿真");

        let mut summary = RunSummary::default();
        self.step(None, out, &mut summary)?;
        for change in changes {
            self.step(Some(*change), out, &mut summary)?;
        }
        out.flush()?;

        info!(
            epochs = summary.epochs,
            messages_traced = summary.messages_traced,
            unreachable = summary.unreachable,
            "✅ 仿真完成"
        );
        Ok(summary)
    }
}
