//! 统计信息
//!
//! 定义集群仿真的计数器。

use serde::{Deserialize, Serialize};

/// 集群统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStats {
    /// 成功的放置次数
    pub placements: u64,
    /// 被拒绝的放置请求次数（容量不足、作业不可见或非 PENDING）
    pub rejections: u64,
    pub completions: u64,
    pub ticks: u64,
}
