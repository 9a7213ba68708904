//! 仿真核心模块
//!
//! 此模块包含离散时间仿真的时钟与控制循环驱动器。

// 子模块声明
mod simulator;
mod time;

// 重新导出公共接口
pub use simulator::{RunSummary, Simulator};
pub use time::SimTime;
