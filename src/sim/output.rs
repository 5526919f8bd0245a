//! 文本输出格式
//!
//! - 路由表：按节点升序、每个节点内按目的升序，每行 `destination nextHop cost`
//! - 消息追踪：`from SRC to DST cost TOTAL hops H1 H2 ... message<text>`，
//!   不可达时为 `from SRC to DST cost infinite hops unreachable message<text>`

use std::fmt::Write as _;
use std::io::{self, Write};

use super::input::Message;
use crate::dv::Trace;
use crate::net::Network;

/// 输出所有节点的路由表
pub fn write_tables<W: Write>(net: &Network, out: &mut W) -> io::Result<()> {
    for id in net.node_ids() {
        let Some(table) = net.table(id) else {
            continue;
        };
        for (dst, entry) in table.iter() {
            writeln!(out, "{} {} {}", dst, entry.next_hop, entry.cost)?;
        }
    }
    Ok(())
}

/// 格式化一条消息的追踪结果（不含换行）
pub fn format_trace(msg: &Message, trace: &Trace) -> String {
    let mut line = format!("from {} to {} ", msg.src, msg.dst);
    match trace {
        Ok(route) => {
            let _ = write!(line, "cost {} hops", route.cost);
            for hop in route.hops() {
                let _ = write!(line, " {hop}");
            }
        }
        Err(_) => line.push_str("cost infinite hops unreachable"),
    }
    line.push_str(" message");
    line.push_str(&msg.text);
    line
}
