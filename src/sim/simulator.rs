//! 仿真器
//!
//! 驱动"控制器决策 → 调度 → tick"的控制循环。

use crate::cluster::{Cluster, ClusterStats};
use crate::policy::{Action, Controller};
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// 一次运行的汇总指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub controller: String,
    pub clock: SimTime,
    pub terminated: bool,
    pub total_wait_time: u64,
    pub makespan: Option<SimTime>,
    /// 各 tick 开始前所有节点当前时间步利用率的均值
    pub mean_utilization: f64,
    pub stats: ClusterStats,
}

/// 控制循环驱动器。
///
/// 每个 tick 内反复询问控制器，直到它返回 `Noop` 或一次放置被拒绝，然后推进一个 tick。
#[derive(Debug, Default)]
pub struct Simulator {
    ticks: u64,
    utilization_sum: f64,
}

impl Simulator {
    /// 已推进的 tick 数
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// 执行一步：若干次放置（可以为零次）加一次 tick
    pub fn step(&mut self, cluster: &mut Cluster, controller: &mut dyn Controller) {
        loop {
            match controller.decide(&cluster.observe()) {
                Action::Noop => break,
                Action::Place { node, job } => {
                    if !cluster.schedule(node, job) {
                        debug!(node, job, "放置被拒绝，进入下一个 tick");
                        break;
                    }
                }
            }
        }

        if !cluster.nodes().is_empty() {
            let util: f64 = cluster.nodes().iter().map(|n| n.utilization()).sum();
            self.utilization_sum += util / cluster.nodes().len() as f64;
        }
        cluster.tick();
        self.ticks += 1;
    }

    /// 运行直到集群终止或时钟到达 `until`。
    #[tracing::instrument(skip(self, cluster, controller), fields(controller = controller.name()))]
    pub fn run_until(
        &mut self,
        cluster: &mut Cluster,
        controller: &mut dyn Controller,
        until: SimTime,
    ) -> RunSummary {
        info!("▶️  开始运行仿真");
        debug!(now = ?cluster.clock(), jobs = cluster.jobs().len(), "初始状态");

        while !cluster.has_terminated() && cluster.clock() < until {
            self.step(cluster, controller);
        }

        if !cluster.has_terminated() {
            warn!(until = until.0, "到达时钟上限，仍有作业未完成");
        }
        let summary = self.summary(cluster, controller);
        info!(
            clock = summary.clock.0,
            wait = summary.total_wait_time,
            terminated = summary.terminated,
            "✅ 仿真完成"
        );
        summary
    }

    /// 运行直到所有作业完成。控制器始终不放置某个作业时不会返回。
    pub fn run(&mut self, cluster: &mut Cluster, controller: &mut dyn Controller) -> RunSummary {
        self.run_until(cluster, controller, SimTime(u64::MAX))
    }

    pub fn summary(&self, cluster: &Cluster, controller: &dyn Controller) -> RunSummary {
        RunSummary {
            controller: controller.name().to_string(),
            clock: cluster.clock(),
            terminated: cluster.has_terminated(),
            total_wait_time: cluster.total_wait_time(),
            makespan: cluster.makespan(),
            mean_utilization: if self.ticks == 0 {
                0.0
            } else {
                self.utilization_sum / self.ticks as f64
            },
            stats: cluster.stats(),
        }
    }
}
