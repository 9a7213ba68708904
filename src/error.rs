//! 错误类型
//!
//! 配置与集群构造阶段的错误。调度失败不是错误，而是 `schedule` 返回的 `false`。

use std::path::PathBuf;

use thiserror::Error;

/// 配置（分布、生成器参数、JSON 文件）错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("distribution `{name}` has no outcomes")]
    EmptyDistribution { name: String },

    #[error("distribution `{name}` has {outcomes} outcomes but {weights} weights")]
    LengthMismatch {
        name: String,
        outcomes: usize,
        weights: usize,
    },

    #[error("distribution `{name}` has invalid weight {weight} at index {index}")]
    InvalidWeight {
        name: String,
        index: usize,
        weight: f64,
    },

    #[error("distribution `{name}` weights sum to {sum}, expected 1")]
    WeightSum { name: String, sum: f64 },

    #[error("duration fraction {0} is outside [0, 1]")]
    InvalidFraction(f64),

    #[error("intensity {0} must be finite and non-negative")]
    InvalidIntensity(f64),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

/// 集群构造错误（节点/作业网格形状不一致等）
#[derive(Debug, Error, PartialEq)]
pub enum ClusterError {
    #[error("{what} of entry {index} is {found}, cluster expects {expected}")]
    ShapeMismatch {
        what: &'static str,
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("job {job} spans {job_horizon} timesteps, node horizon is {node_horizon}")]
    HorizonTooLong {
        job: usize,
        job_horizon: usize,
        node_horizon: usize,
    },

    #[error("node {node} has invalid capacity {value} at resource {resource}, timestep {timestep}")]
    InvalidCapacity {
        node: usize,
        resource: usize,
        timestep: usize,
        value: f64,
    },

    #[error("job {job} has invalid demand {value} at resource {resource}, timestep {timestep}")]
    InvalidDemand {
        job: usize,
        resource: usize,
        timestep: usize,
        value: f64,
    },

    #[error("cluster has {jobs} jobs but no nodes")]
    NoNodes { jobs: usize },
}
