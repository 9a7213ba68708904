//! 集群
//!
//! 节点与作业集合、全局时钟的唯一持有者，负责调度可行性检查与逐 tick 推进生命周期。

use super::id::{JobId, NodeId};
use super::job::{Job, JobStatus};
use super::node::Node;
use super::observation::{JobView, NodeView, Observation};
use super::stats::ClusterStats;
use crate::error::ClusterError;
use crate::sim::SimTime;
use tracing::{debug, info, trace};

/// 离散时间集群仿真状态
#[derive(Debug, Clone)]
pub struct Cluster {
    nodes: Vec<Node>,
    jobs: Vec<Job>,
    clock: SimTime,
    stats: ClusterStats,
}

impl Cluster {
    /// 由节点与作业集合构造集群，时钟从 0 开始。
    ///
    /// 所有节点必须形状一致；作业的资源种类数与节点一致，需求窗口不长于节点窗口。
    pub fn new(nodes: Vec<Node>, jobs: Vec<Job>) -> Result<Self, ClusterError> {
        let Some(first) = nodes.first() else {
            if jobs.is_empty() {
                return Ok(Self::from_parts(nodes, jobs));
            }
            return Err(ClusterError::NoNodes { jobs: jobs.len() });
        };
        let shape = first.shape();

        for (index, node) in nodes.iter().enumerate() {
            let found = node.shape();
            if found.resources != shape.resources {
                return Err(ClusterError::ShapeMismatch {
                    what: "node resource count",
                    index,
                    expected: shape.resources,
                    found: found.resources,
                });
            }
            if found.horizon != shape.horizon {
                return Err(ClusterError::ShapeMismatch {
                    what: "node horizon",
                    index,
                    expected: shape.horizon,
                    found: found.horizon,
                });
            }
            if let Some((resource, timestep, value)) = node.capacity().first_invalid_cell() {
                return Err(ClusterError::InvalidCapacity {
                    node: index,
                    resource,
                    timestep,
                    value,
                });
            }
        }

        for (index, job) in jobs.iter().enumerate() {
            let found = job.shape();
            if found.resources != shape.resources {
                return Err(ClusterError::ShapeMismatch {
                    what: "job resource count",
                    index,
                    expected: shape.resources,
                    found: found.resources,
                });
            }
            if found.horizon > shape.horizon {
                return Err(ClusterError::HorizonTooLong {
                    job: index,
                    job_horizon: found.horizon,
                    node_horizon: shape.horizon,
                });
            }
            if let Some((resource, timestep, value)) = job.demand().first_invalid_cell() {
                return Err(ClusterError::InvalidDemand {
                    job: index,
                    resource,
                    timestep,
                    value,
                });
            }
        }

        info!(
            nodes = nodes.len(),
            jobs = jobs.len(),
            resources = shape.resources,
            horizon = shape.horizon,
            "🏗️  集群已创建"
        );
        Ok(Self::from_parts(nodes, jobs))
    }

    fn from_parts(nodes: Vec<Node>, jobs: Vec<Job>) -> Self {
        Self {
            nodes,
            jobs,
            clock: SimTime::ZERO,
            stats: ClusterStats::default(),
        }
    }

    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn stats(&self) -> ClusterStats {
        self.stats
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// # Panics
    ///
    /// 下标越界时 panic。
    pub fn node(&self, index: usize) -> &Node {
        self.node_checked(index)
    }

    /// # Panics
    ///
    /// 下标越界时 panic。
    pub fn job(&self, index: usize) -> &Job {
        self.job_checked(index)
    }

    fn node_checked(&self, index: usize) -> &Node {
        assert!(
            index < self.nodes.len(),
            "node index {index} out of range ({} nodes)",
            self.nodes.len()
        );
        &self.nodes[index]
    }

    fn job_checked(&self, index: usize) -> &Job {
        assert!(
            index < self.jobs.len(),
            "job index {index} out of range ({} jobs)",
            self.jobs.len()
        );
        &self.jobs[index]
    }

    /// 作业是否已到达（提交时间不晚于当前时钟），即对控制器可见。
    pub fn is_visible(&self, job_index: usize) -> bool {
        self.job_checked(job_index).submission_time() <= self.clock
    }

    /// 当前可被调度的作业下标（可见且 PENDING）
    pub fn pending_jobs(&self) -> impl Iterator<Item = usize> + '_ {
        self.jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| job.status() == JobStatus::Pending && job.submission_time() <= self.clock)
            .map(|(i, _)| i)
    }

    /// 尝试把作业放到节点上：全部单元都放得下才提交，否则不做任何修改并返回 `false`。
    ///
    /// 作业不可见或不是 PENDING 同样返回 `false`。
    ///
    /// # Panics
    ///
    /// 节点或作业下标越界时 panic。
    #[tracing::instrument(skip(self), fields(clock = self.clock.0))]
    pub fn schedule(&mut self, node_index: usize, job_index: usize) -> bool {
        let node = self.node_checked(node_index);
        let job = self.job_checked(job_index);

        if job.status() != JobStatus::Pending {
            debug!(status = ?job.status(), "作业不是 PENDING，拒绝调度");
            self.stats.rejections += 1;
            return false;
        }
        if job.submission_time() > self.clock {
            debug!(submission = job.submission_time().0, "作业尚未到达，拒绝调度");
            self.stats.rejections += 1;
            return false;
        }
        if !node.fits(job.demand()) {
            debug!("节点容量不足，拒绝调度");
            self.stats.rejections += 1;
            return false;
        }

        let now = self.clock;
        let job = &mut self.jobs[job_index];
        self.nodes[node_index].commit(job.demand());
        job.start(now);
        self.stats.placements += 1;

        debug!(
            length = job.length(),
            wait = job.wait_time().unwrap_or(0),
            "✅ 作业已放置"
        );
        true
    }

    /// 推进一个 tick：推进运行中的作业、揭示新到达的作业、滚动所有节点的时间窗口。
    #[tracing::instrument(skip(self), fields(clock = self.clock.0))]
    pub fn tick(&mut self) {
        self.clock = self.clock.next();
        self.stats.ticks += 1;
        let now = self.clock;

        for job in self
            .jobs
            .iter_mut()
            .filter(|job| job.status() == JobStatus::Running)
        {
            job.advance();
            if job.is_complete() {
                job.finish(now);
                self.stats.completions += 1;
                debug!(job = job.id().0, elapsed = job.elapsed_running_time(), "作业完成");
            }
        }

        let arrivals = self
            .jobs
            .iter()
            .filter(|job| job.submission_time() == now)
            .count();
        if arrivals > 0 {
            debug!(arrivals, "新作业到达");
        }

        for node in &mut self.nodes {
            node.tick();
        }

        trace!(now = now.0, "tick 完成");
    }

    /// 所有作业均已完成
    pub fn has_terminated(&self) -> bool {
        self.jobs
            .iter()
            .all(|job| job.status() == JobStatus::Complete)
    }

    /// 仍有作业尚未到达（提交时间在当前时钟之后）
    pub fn has_pending_arrivals(&self) -> bool {
        self.jobs
            .iter()
            .any(|job| job.submission_time() > self.clock)
    }

    /// 所有已开始作业的等待时间之和（tick）；未开始的作业不计入。
    pub fn total_wait_time(&self) -> u64 {
        self.jobs.iter().filter_map(Job::wait_time).sum()
    }

    /// 全部完成时最后一个作业的完成时刻；没有作业时为 0，尚未全部完成时为 `None`。
    pub fn makespan(&self) -> Option<SimTime> {
        if !self.has_terminated() {
            return None;
        }
        Some(
            self.jobs
                .iter()
                .filter_map(Job::finish_time)
                .max()
                .unwrap_or(SimTime::ZERO),
        )
    }

    /// 当前状态的只读快照，控制器只能通过它观察集群。
    pub fn observe(&self) -> Observation {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| NodeView {
                id: NodeId(index),
                capacity: node.capacity().clone(),
                usage: node.usage().clone(),
            })
            .collect();

        let jobs = self
            .jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| match job.status() {
                JobStatus::Pending => job.submission_time() <= self.clock,
                JobStatus::Running => true,
                JobStatus::Complete => false,
            })
            .map(|(index, job)| JobView {
                id: JobId(index),
                status: job.status(),
                submission_time: job.submission_time(),
                length: job.length(),
                elapsed_running_time: job.elapsed_running_time(),
                demand: job.demand().clone(),
            })
            .collect();

        Observation {
            clock: self.clock,
            nodes,
            jobs,
            statuses: self.jobs.iter().map(Job::status).collect(),
        }
    }
}
