//! 观测快照
//!
//! 控制器每一步看到的集群状态。快照是独立拥有的副本，修改它不会影响集群。

use super::id::{JobId, NodeId};
use super::job::JobStatus;
use crate::resource::ResourceGrid;
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};

/// 单个节点的容量与占用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    /// 集群中的节点下标，可直接用于 `Cluster::schedule`
    pub id: NodeId,
    pub capacity: ResourceGrid,
    pub usage: ResourceGrid,
}

impl NodeView {
    pub fn free_space(&self) -> ResourceGrid {
        self.capacity.difference(&self.usage)
    }
}

/// 可见的 PENDING 作业或 RUNNING 作业
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobView {
    /// 集群中的作业下标，可直接用于 `Cluster::schedule`
    pub id: JobId,
    pub status: JobStatus,
    pub submission_time: SimTime,
    pub length: usize,
    pub elapsed_running_time: u64,
    pub demand: ResourceGrid,
}

/// 集群快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub clock: SimTime,
    /// 按节点下标排列
    pub nodes: Vec<NodeView>,
    pub jobs: Vec<JobView>,
    /// 全部作业的状态，按作业下标排列（包括未到达与已完成的作业）
    pub statuses: Vec<JobStatus>,
}

impl Observation {
    /// 可调度的作业（可见且 PENDING）
    pub fn pending_jobs(&self) -> impl Iterator<Item = &JobView> {
        self.jobs
            .iter()
            .filter(|job| job.status == JobStatus::Pending)
    }

    pub fn running_jobs(&self) -> impl Iterator<Item = &JobView> {
        self.jobs
            .iter()
            .filter(|job| job.status == JobStatus::Running)
    }

    /// 与 `Cluster::schedule` 相同的可行性判断
    ///
    /// # Panics
    ///
    /// 节点下标越界时 panic。
    pub fn fits(&self, node_index: usize, job: &JobView) -> bool {
        let node = &self.nodes[node_index];
        node.usage.fits_with(&job.demand, &node.capacity)
    }

    /// 能容纳 `job` 的节点下标
    pub fn fitting_nodes<'a>(&'a self, job: &'a JobView) -> impl Iterator<Item = usize> + 'a {
        (0..self.nodes.len()).filter(move |&n| self.fits(n, job))
    }
}
