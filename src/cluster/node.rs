//! 计算节点
//!
//! 节点持有固定容量网格与同形状的占用网格，时间窗口随 tick 滚动。

use super::id::NodeId;
use crate::resource::{GridShape, ResourceGrid};
use tracing::trace;

/// 计算节点
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    capacity: ResourceGrid,
    usage: ResourceGrid,
}

impl Node {
    /// 创建空载节点
    pub fn new(id: NodeId, capacity: ResourceGrid) -> Self {
        let usage = ResourceGrid::zeros(capacity.shape());
        Self {
            id,
            capacity,
            usage,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn shape(&self) -> GridShape {
        self.capacity.shape()
    }

    pub fn capacity(&self) -> &ResourceGrid {
        &self.capacity
    }

    pub fn usage(&self) -> &ResourceGrid {
        &self.usage
    }

    /// 剩余容量 `capacity - usage`（整个窗口）
    pub fn free_space(&self) -> ResourceGrid {
        self.capacity.difference(&self.usage)
    }

    /// `demand` 能否放入当前窗口
    pub fn fits(&self, demand: &ResourceGrid) -> bool {
        self.usage.fits_with(demand, &self.capacity)
    }

    /// 提交占用。可行性由调用方（Cluster）事先保证，这里不再检查。
    pub fn commit(&mut self, demand: &ResourceGrid) {
        self.usage.add_prefix(demand);
    }

    /// 时间窗口前移一步：丢弃第 0 步的占用，末尾补一个空闲时间步。
    ///
    /// 容量窗口同样前移，末尾沿用最后一步的容量；对恒定容量而言即保持不变。
    pub fn tick(&mut self) {
        self.usage.shift();
        self.capacity.shift_repeat_last();
        trace!(node = self.id.0, "节点时间窗口前移");
    }

    /// 当前时间步（t = 0）的平均资源利用率，容量为零的资源不计入。
    pub fn utilization(&self) -> f64 {
        if self.shape().horizon == 0 {
            return 0.0;
        }
        let (sum, n) = (0..self.shape().resources)
            .filter_map(|r| {
                let cap = self.capacity.get(r, 0);
                (cap > 0.0).then(|| self.usage.get(r, 0) / cap)
            })
            .fold((0.0, 0usize), |(s, n), u| (s + u, n + 1));
        if n == 0 { 0.0 } else { sum / n as f64 }
    }
}
