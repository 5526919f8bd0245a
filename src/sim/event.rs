//! 拓扑变更事件
//!
//! 变更文件中的每一行对应一个 `LinkChange`，按文件顺序依次施加。

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::input::REMOVE_LINK_SENTINEL;
use crate::net::{Cost, Network, NodeId};

/// 变更动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ChangeAction {
    /// 新增链路或覆盖代价
    SetCost { cost: Cost },
    /// 删除链路
    Remove,
}

/// 一条链路变更
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkChange {
    pub a: NodeId,
    pub b: NodeId,
    #[serde(flatten)]
    pub action: ChangeAction,
}

impl LinkChange {
    pub fn set_cost(a: NodeId, b: NodeId, cost: Cost) -> Self {
        Self {
            a,
            b,
            action: ChangeAction::SetCost { cost },
        }
    }

    pub fn remove(a: NodeId, b: NodeId) -> Self {
        Self {
            a,
            b,
            action: ChangeAction::Remove,
        }
    }

    /// 将变更施加到拓扑上（不触发收敛）。返回拓扑是否被修改。
    #[tracing::instrument(skip(net), fields(change = %self))]
    pub fn apply(&self, net: &mut Network) -> bool {
        info!("🔧 施加链路变更");
        match self.action {
            ChangeAction::SetCost { cost } => {
                net.upsert_link(self.a, self.b, cost);
                true
            }
            ChangeAction::Remove => net.remove_link(self.a, self.b),
        }
    }
}

/// 以变更文件的行格式输出
impl fmt::Display for LinkChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            ChangeAction::SetCost { cost } => write!(f, "{} {} {}", self.a, self.b, cost),
            ChangeAction::Remove => write!(f, "{} {} {}", self.a, self.b, REMOVE_LINK_SENTINEL),
        }
    }
}
