//! 作业
//!
//! 作业持有需求网格、提交时间与生命周期状态。

use super::id::JobId;
use crate::resource::{GridShape, ResourceGrid};
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};

/// 作业状态。声明顺序即合法的迁移顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Complete,
}

impl JobStatus {
    /// 状态机中的下一个状态
    pub fn successor(self) -> Option<JobStatus> {
        match self {
            JobStatus::Pending => Some(JobStatus::Running),
            JobStatus::Running => Some(JobStatus::Complete),
            JobStatus::Complete => None,
        }
    }
}

/// 作业
///
/// 需求网格在每个资源上只在前 `active_len(r)` 个时间步非零，之后全为零。
/// 节点依靠时间窗口滚动来"释放"已提交的占用，因此这一点必须成立：
/// 构造时 `length` 由网格本身推出，不存在与网格不一致的长度。
#[derive(Debug, Clone)]
pub struct Job {
    id: JobId,
    demand: ResourceGrid,
    submission_time: SimTime,
    length: usize,
    status: JobStatus,
    elapsed_running_time: u64,
    start_time: Option<SimTime>,
    finish_time: Option<SimTime>,
}

impl Job {
    pub fn new(id: JobId, demand: ResourceGrid, submission_time: SimTime) -> Self {
        let length = demand.max_active_len();
        Self {
            id,
            demand,
            submission_time,
            length,
            status: JobStatus::Pending,
            elapsed_running_time: 0,
            start_time: None,
            finish_time: None,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn demand(&self) -> &ResourceGrid {
        &self.demand
    }

    pub fn shape(&self) -> GridShape {
        self.demand.shape()
    }

    pub fn submission_time(&self) -> SimTime {
        self.submission_time
    }

    /// 运行时长（tick），即所有资源中最长的非零需求前缀
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn elapsed_running_time(&self) -> u64 {
        self.elapsed_running_time
    }

    /// 首次调度成功的时刻
    pub fn start_time(&self) -> Option<SimTime> {
        self.start_time
    }

    pub fn finish_time(&self) -> Option<SimTime> {
        self.finish_time
    }

    /// 等待时间：开始时刻 - 提交时刻；尚未开始时为 `None`
    pub fn wait_time(&self) -> Option<u64> {
        self.start_time.map(|s| s.ticks_since(self.submission_time))
    }

    /// 迁移到 `new_status`。
    ///
    /// # Panics
    ///
    /// 只允许 PENDING→RUNNING→COMPLETE 的单步前进，其它迁移属于调用方 bug。
    pub fn change_status(&mut self, new_status: JobStatus) {
        assert_eq!(
            self.status.successor(),
            Some(new_status),
            "job {}: illegal status transition {:?} -> {:?}",
            self.id.0,
            self.status,
            new_status
        );
        self.status = new_status;
    }

    /// 标记为运行并记录开始时刻
    pub(crate) fn start(&mut self, now: SimTime) {
        self.change_status(JobStatus::Running);
        self.start_time = Some(now);
    }

    /// 标记为完成并记录完成时刻
    pub(crate) fn finish(&mut self, now: SimTime) {
        self.change_status(JobStatus::Complete);
        self.finish_time = Some(now);
    }

    /// 运行中时累加一个 tick；其它状态下不变。
    pub fn advance(&mut self) {
        if self.status == JobStatus::Running {
            self.elapsed_running_time += 1;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_running_time >= self.length as u64
    }
}
