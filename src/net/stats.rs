//! 统计信息
//!
//! 定义收敛过程的统计数据结构。

/// 网络统计信息
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    /// 完整收敛（从零重算）的次数
    pub convergences: u64,
    /// 累计执行的松弛轮数
    pub relaxation_rounds: u64,
}
