//! 调度控制器（Controllers）
//!
//! 外部决策者通过观测快照选择动作；这里提供几个基础策略，后续可以在此扩展 Tetris/DRF 等策略。

use crate::cluster::Observation;

mod first_fit;
mod idle;
mod random_fit;

pub use first_fit::FirstFit;
pub use idle::Idle;
pub use random_fit::RandomFit;

/// 控制器每一步给出的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 请求把作业 `job` 放到节点 `node` 上（均为下标）
    Place { node: usize, job: usize },
    /// 本 tick 不再放置
    Noop,
}

/// 控制器抽象
pub trait Controller {
    fn name(&self) -> &str;

    /// 根据快照选择动作
    fn decide(&mut self, obs: &Observation) -> Action;
}
