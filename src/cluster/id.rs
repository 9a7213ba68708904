//! 标识符类型
//!
//! 定义节点和作业的唯一标识符。

use serde::{Deserialize, Serialize};

/// 节点标识符（即其在集群中的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// 作业标识符（即其在集群中的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub usize);
