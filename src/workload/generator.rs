//! 节点容量与作业负载生成器
//!
//! 两种生成器共享 `Generator` 接口；随机源由调用方持有并传入。

use super::distribution::DiscreteDistribution;
use crate::cluster::{Job, JobId, Node, NodeId};
use crate::error::ConfigError;
use crate::resource::{GridShape, ResourceGrid};
use crate::sim::SimTime;
use rand::Rng;
use tracing::debug;

/// 生成器接口
pub trait Generator {
    type Item;

    /// 生成 `count` 个对象，网格形状为 `shape`
    fn generate<R: Rng + ?Sized>(&self, count: usize, shape: GridShape, rng: &mut R) -> Vec<Self::Item>;
}

fn check_intensity(intensity: f64) -> Result<f64, ConfigError> {
    if intensity.is_finite() && intensity >= 0.0 {
        Ok(intensity)
    } else {
        Err(ConfigError::InvalidIntensity(intensity))
    }
}

/// 节点容量生成器：所有节点、所有资源、所有时间步的容量都等于 `intensity`。
#[derive(Debug, Clone)]
pub struct CapacityGenerator {
    intensity: f64,
}

impl CapacityGenerator {
    pub fn new(intensity: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            intensity: check_intensity(intensity)?,
        })
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }
}

impl Generator for CapacityGenerator {
    type Item = Node;

    fn generate<R: Rng + ?Sized>(&self, count: usize, shape: GridShape, _rng: &mut R) -> Vec<Node> {
        debug!(count, ?shape, intensity = self.intensity, "生成节点");
        (0..count)
            .map(|i| Node::new(NodeId(i), ResourceGrid::filled(shape, self.intensity)))
            .collect()
    }
}

/// 作业负载生成器
///
/// 每个作业抽取一次提交时间与强度；每个资源各自抽取一个时长比例
/// （占窗口长度的比例），需求网格在该资源的前 `round(比例 × horizon)` 步取该强度，其余为零。
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    arrival: DiscreteDistribution<u64>,
    duration: DiscreteDistribution<f64>,
    intensity: DiscreteDistribution<f64>,
}

impl WorkloadGenerator {
    /// 默认时长比例及其概率
    pub const DEFAULT_DURATIONS: [(f64, f64); 3] = [(0.0, 0.1), (0.2, 0.6), (0.3, 0.3)];

    /// 批量到达（提交时间恒为 0），强度恒为 `intensity`，时长按默认表抽取。
    pub fn batch(intensity: f64) -> Result<Self, ConfigError> {
        let (outcomes, weights): (Vec<f64>, Vec<f64>) = Self::DEFAULT_DURATIONS.iter().copied().unzip();
        Ok(Self {
            arrival: DiscreteDistribution::constant(0),
            duration: DiscreteDistribution::new("duration", outcomes, weights)?,
            intensity: DiscreteDistribution::constant(check_intensity(intensity)?),
        })
    }

    /// 提交时间分布（绝对时钟，tick）
    pub fn with_arrival(mut self, arrival: DiscreteDistribution<u64>) -> Self {
        self.arrival = arrival;
        self
    }

    /// 时长比例分布，每个取值必须落在 `[0, 1]`
    pub fn with_duration(mut self, duration: DiscreteDistribution<f64>) -> Result<Self, ConfigError> {
        if let Some(&bad) = duration
            .outcomes()
            .iter()
            .find(|f| !(0.0..=1.0).contains(*f))
        {
            return Err(ConfigError::InvalidFraction(bad));
        }
        self.duration = duration;
        Ok(self)
    }

    /// 强度分布，每个取值必须有限且非负
    pub fn with_intensity(mut self, intensity: DiscreteDistribution<f64>) -> Result<Self, ConfigError> {
        for &v in intensity.outcomes() {
            check_intensity(v)?;
        }
        self.intensity = intensity;
        Ok(self)
    }

    fn length_for(fraction: f64, horizon: usize) -> usize {
        ((fraction * horizon as f64).round() as usize).min(horizon)
    }
}

impl Generator for WorkloadGenerator {
    type Item = Job;

    fn generate<R: Rng + ?Sized>(&self, count: usize, shape: GridShape, rng: &mut R) -> Vec<Job> {
        let jobs: Vec<Job> = (0..count)
            .map(|i| {
                let submission = SimTime(self.arrival.sample(rng));
                let intensity = self.intensity.sample(rng);
                let mut demand = ResourceGrid::zeros(shape);
                for r in 0..shape.resources {
                    let len = Self::length_for(self.duration.sample(rng), shape.horizon);
                    demand.fill_prefix(r, len, intensity);
                }
                Job::new(JobId(i), demand, submission)
            })
            .collect();

        debug!(
            count,
            ?shape,
            total_length = jobs.iter().map(Job::length).sum::<usize>(),
            "生成作业"
        );
        jobs
    }
}
