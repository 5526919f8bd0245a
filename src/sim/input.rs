//! 输入文件解析
//!
//! 三类纯文本输入，每行一条记录，空白行跳过：
//! - 拓扑：`nodeA nodeB cost`
//! - 消息：`source destination <任意文本>`
//! - 变更：`nodeA nodeB cost`，`cost == -999` 表示删除链路

use std::fmt;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::error::SimError;
use super::event::LinkChange;
use crate::net::{Cost, Link, NodeId};

/// 变更文件中表示“删除链路”的代价值
pub const REMOVE_LINK_SENTINEL: i64 = -999;

/// 输入文件种类（用于错误信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Topology,
    Messages,
    Changes,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputKind::Topology => "topology",
            InputKind::Messages => "messages",
            InputKind::Changes => "changes",
        };
        f.write_str(name)
    }
}

/// 单行解析错误，`line` 从 1 开始计数
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{kind} line {line}: missing field `{field}`")]
    MissingField {
        kind: InputKind,
        line: usize,
        field: &'static str,
    },
    #[error("{kind} line {line}: invalid integer {token:?} for `{field}`")]
    InvalidInteger {
        kind: InputKind,
        line: usize,
        field: &'static str,
        token: String,
    },
    #[error("{kind} line {line}: unexpected trailing field {token:?}")]
    TrailingField {
        kind: InputKind,
        line: usize,
        token: String,
    },
    #[error("{kind} line {line}: negative link cost {cost}")]
    NegativeCost {
        kind: InputKind,
        line: usize,
        cost: i64,
    },
}

/// 一条待追踪的消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub src: NodeId,
    pub dst: NodeId,
    /// 目的节点之后的原文（含前导空白），输出时原样拼接
    pub text: String,
}

/// 按行游标，负责取出空白分隔的字段
struct Fields<'a> {
    kind: InputKind,
    line: usize,
    rest: &'a str,
}

impl<'a> Fields<'a> {
    fn new(kind: InputKind, line: usize, raw: &'a str) -> Self {
        Self {
            kind,
            line,
            rest: raw,
        }
    }

    fn token(&mut self, field: &'static str) -> Result<&'a str, InputError> {
        let s = self.rest.trim_start();
        if s.is_empty() {
            return Err(InputError::MissingField {
                kind: self.kind,
                line: self.line,
                field,
            });
        }
        let end = s.find(char::is_whitespace).unwrap_or(s.len());
        let (tok, rest) = s.split_at(end);
        self.rest = rest;
        Ok(tok)
    }

    fn int(&mut self, field: &'static str) -> Result<i64, InputError> {
        let tok = self.token(field)?;
        tok.parse().map_err(|_| InputError::InvalidInteger {
            kind: self.kind,
            line: self.line,
            field,
            token: tok.to_string(),
        })
    }

    fn node(&mut self, field: &'static str) -> Result<NodeId, InputError> {
        self.int(field).map(NodeId)
    }

    fn cost(&self, raw: i64) -> Result<Cost, InputError> {
        Cost::try_from(raw).map_err(|_| InputError::NegativeCost {
            kind: self.kind,
            line: self.line,
            cost: raw,
        })
    }

    fn remainder(self) -> &'a str {
        self.rest
    }

    /// 行内不允许再有字段
    fn finish(self) -> Result<(), InputError> {
        match self.rest.split_whitespace().next() {
            None => Ok(()),
            Some(tok) => Err(InputError::TrailingField {
                kind: self.kind,
                line: self.line,
                token: tok.to_string(),
            }),
        }
    }
}

/// 非空白行及其行号（从 1 开始）
fn records(raw: &str) -> impl Iterator<Item = (usize, &str)> {
    raw.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// 解析拓扑文件内容
///
/// 按行解析：每行恰好一条链路，多余字段视为错误。
pub fn parse_topology(raw: &str) -> Result<Vec<Link>, InputError> {
    let mut links = Vec::new();
    for (line, text) in records(raw) {
        let mut f = Fields::new(InputKind::Topology, line, text);
        let a = f.node("nodeA")?;
        let b = f.node("nodeB")?;
        let cost = f.int("cost")?;
        let cost = f.cost(cost)?;
        f.finish()?;
        links.push(Link::new(a, b, cost));
    }
    debug!(links = links.len(), "解析拓扑");
    Ok(links)
}

/// 解析消息文件内容
pub fn parse_messages(raw: &str) -> Result<Vec<Message>, InputError> {
    let mut messages = Vec::new();
    for (line, text) in records(raw) {
        let mut f = Fields::new(InputKind::Messages, line, text);
        let src = f.node("source")?;
        let dst = f.node("destination")?;
        messages.push(Message {
            src,
            dst,
            text: f.remainder().to_string(),
        });
    }
    debug!(messages = messages.len(), "解析消息");
    Ok(messages)
}

/// 解析变更文件内容（与拓扑相同，每行恰好三个字段）
pub fn parse_changes(raw: &str) -> Result<Vec<LinkChange>, InputError> {
    let mut changes = Vec::new();
    for (line, text) in records(raw) {
        let mut f = Fields::new(InputKind::Changes, line, text);
        let a = f.node("nodeA")?;
        let b = f.node("nodeB")?;
        let cost = f.int("cost")?;
        let change = if cost == REMOVE_LINK_SENTINEL {
            LinkChange::remove(a, b)
        } else {
            LinkChange::set_cost(a, b, f.cost(cost)?)
        };
        f.finish()?;
        changes.push(change);
    }
    debug!(changes = changes.len(), "解析变更");
    Ok(changes)
}

fn read(path: &Path) -> Result<String, SimError> {
    fs::read_to_string(path).map_err(|source| SimError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_topology(path: &Path) -> Result<Vec<Link>, SimError> {
    Ok(parse_topology(&read(path)?)?)
}

pub fn load_messages(path: &Path) -> Result<Vec<Message>, SimError> {
    Ok(parse_messages(&read(path)?)?)
}

pub fn load_changes(path: &Path) -> Result<Vec<LinkChange>, SimError> {
    Ok(parse_changes(&read(path)?)?)
}
