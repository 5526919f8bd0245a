//! 仿真驱动模块
//!
//! 此模块负责读取拓扑/消息/变更输入、驱动收敛与追踪，并按固定文本格式输出。

// 子模块声明
mod error;
mod event;
mod input;
mod output;
mod simulator;

// 重新导出公共接口
pub use error::SimError;
pub use event::{ChangeAction, LinkChange};
pub use input::{
    InputError, InputKind, Message, REMOVE_LINK_SENTINEL, load_changes, load_messages,
    load_topology, parse_changes, parse_messages, parse_topology,
};
pub use output::{format_trace, write_tables};
pub use simulator::{RunSummary, SimOpts, Simulator};
