//! 资源网格模块
//!
//! 节点容量/占用与作业需求共用的二维（资源类型 × 剩余时间步）张量。

mod grid;

pub use grid::{GridShape, ResourceGrid};
