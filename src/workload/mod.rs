//! 负载生成模块
//!
//! 离散分布、节点容量/作业负载生成器，以及 JSON 配置。

mod config;
mod distribution;
mod generator;

pub use config::SimConfig;
pub use distribution::{Choice, DiscreteDistribution};
pub use generator::{CapacityGenerator, Generator, WorkloadGenerator};
