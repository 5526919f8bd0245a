//! 标识符类型
//!
//! 定义节点的唯一标识符。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 节点标识符
///
/// 全序：路由表按标识符升序输出，等价路径按下一跳标识符较小者优先。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
