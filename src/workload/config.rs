//! 仿真配置
//!
//! 从 JSON 读取节点/作业规模与各分布表，构造生成器与集群。

use super::distribution::{Choice, DiscreteDistribution};
use super::generator::{CapacityGenerator, Generator, WorkloadGenerator};
use crate::cluster::Cluster;
use crate::error::ConfigError;
use crate::resource::GridShape;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 仿真构造参数（JSON）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    pub nodes: usize,
    pub resources: usize,
    pub horizon: usize,
    /// 每个节点每种资源每个时间步的容量
    pub node_intensity: f64,
    pub jobs: usize,
    /// 未给出 `intensity` 分布时，作业的固定需求强度
    pub job_intensity: f64,
    /// 提交时间分布表；缺省时全部在 t=0 批量到达
    pub arrival: Option<Vec<Choice<u64>>>,
    /// 时长比例分布表（占窗口长度的比例）；缺省时使用内置表
    pub duration: Option<Vec<Choice<f64>>>,
    /// 作业需求强度分布表
    pub intensity: Option<Vec<Choice<f64>>>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            nodes: 4,
            resources: 2,
            horizon: 20,
            node_intensity: 1.0,
            jobs: 16,
            job_intensity: 0.5,
            arrival: None,
            duration: None,
            intensity: None,
        }
    }
}

impl SimConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn shape(&self) -> GridShape {
        GridShape::new(self.resources, self.horizon)
    }

    pub fn capacity_generator(&self) -> Result<CapacityGenerator, ConfigError> {
        CapacityGenerator::new(self.node_intensity)
    }

    pub fn workload_generator(&self) -> Result<WorkloadGenerator, ConfigError> {
        let mut generator = WorkloadGenerator::batch(self.job_intensity)?;
        if let Some(arrival) = &self.arrival {
            generator = generator.with_arrival(DiscreteDistribution::from_choices("arrival", arrival)?);
        }
        if let Some(duration) = &self.duration {
            generator = generator.with_duration(DiscreteDistribution::from_choices("duration", duration)?)?;
        }
        if let Some(intensity) = &self.intensity {
            generator = generator.with_intensity(DiscreteDistribution::from_choices("intensity", intensity)?)?;
        }
        Ok(generator)
    }

    /// 用调用方提供的随机源生成节点与作业并构造集群
    pub fn build_cluster<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Cluster, ConfigError> {
        let shape = self.shape();
        let nodes = self.capacity_generator()?.generate(self.nodes, shape, rng);
        let jobs = self.workload_generator()?.generate(self.jobs, shape, rng);
        Ok(Cluster::new(nodes, jobs)?)
    }
}
