//! 仿真时间类型
//!
//! 定义离散仿真时钟（以 tick 为单位）。

use serde::{Deserialize, Serialize};

/// 仿真时间（tick 数）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// 下一个 tick
    pub fn next(self) -> SimTime {
        SimTime(self.0.saturating_add(1))
    }

    /// 自 `earlier` 以来经过的 tick 数；`earlier` 在未来时返回 0。
    pub fn ticks_since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}
