//! 集群仿真模块
//!
//! 此模块包含集群仿真的核心组件：节点、作业、集群状态与观测快照。

// 子模块声明
mod cluster;
mod id;
mod job;
mod node;
mod observation;
mod stats;

// 重新导出公共接口
pub use cluster::Cluster;
pub use id::{JobId, NodeId};
pub use job::{Job, JobStatus};
pub use node::Node;
pub use observation::{JobView, NodeView, Observation};
pub use stats::ClusterStats;
