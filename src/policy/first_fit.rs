//! First-Fit 控制器
//!
//! 按作业下标顺序取第一个能放下的可见作业，放到下标最小的可行节点上。

use super::{Action, Controller};
use crate::cluster::Observation;
use tracing::trace;

#[derive(Debug, Default)]
pub struct FirstFit;

impl Controller for FirstFit {
    fn name(&self) -> &str {
        "first-fit"
    }

    fn decide(&mut self, obs: &Observation) -> Action {
        for job in obs.pending_jobs() {
            if let Some(node) = obs.fitting_nodes(job).next() {
                trace!(job = job.id.0, node, "first-fit 选中");
                return Action::Place { node, job: job.id.0 };
            }
        }
        Action::Noop
    }
}
