//! 离散分布
//!
//! 带权重的有限离散分布，构造时校验一次，抽样时不再校验。

use crate::error::ConfigError;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// 配置文件中的一个选项及其概率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice<T> {
    pub option: T,
    pub prob: f64,
}

impl<T> Choice<T> {
    pub fn new(option: T, prob: f64) -> Self {
        Self { option, prob }
    }
}

/// 已校验的离散分布：权重非负、有限，且和为 1。
#[derive(Debug, Clone)]
pub struct DiscreteDistribution<T> {
    outcomes: Vec<T>,
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl<T: Clone> DiscreteDistribution<T> {
    /// `name` 仅用于错误信息
    pub fn new(name: &str, outcomes: Vec<T>, weights: Vec<f64>) -> Result<Self, ConfigError> {
        if outcomes.is_empty() {
            return Err(ConfigError::EmptyDistribution { name: name.into() });
        }
        if outcomes.len() != weights.len() {
            return Err(ConfigError::LengthMismatch {
                name: name.into(),
                outcomes: outcomes.len(),
                weights: weights.len(),
            });
        }
        if let Some((index, &weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(ConfigError::InvalidWeight {
                name: name.into(),
                index,
                weight,
            });
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum {
                name: name.into(),
                sum,
            });
        }
        let index = WeightedIndex::new(&weights).map_err(|_| ConfigError::WeightSum {
            name: name.into(),
            sum,
        })?;
        Ok(Self {
            outcomes,
            weights,
            index,
        })
    }

    /// 由 option/prob 列表构造
    pub fn from_choices(name: &str, choices: &[Choice<T>]) -> Result<Self, ConfigError> {
        let (outcomes, weights) = choices
            .iter()
            .map(|c| (c.option.clone(), c.prob))
            .unzip();
        Self::new(name, outcomes, weights)
    }

    /// 退化分布：总是取 `value`
    pub fn constant(value: T) -> Self {
        Self {
            outcomes: vec![value],
            weights: vec![1.0],
            index: WeightedIndex::new([1.0]).expect("single positive weight"),
        }
    }

    pub fn outcomes(&self) -> &[T] {
        &self.outcomes
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.outcomes[self.index.sample(rng)].clone()
    }
}
