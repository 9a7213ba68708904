mod cluster;

use crate::cluster::{Cluster, Job, JobId, Node, NodeId};
use crate::resource::ResourceGrid;
use crate::sim::SimTime;

/// 单资源节点：容量在整个窗口上恒为 `cap`
fn node_1r(id: usize, cap: f64, horizon: usize) -> Node {
    Node::new(NodeId(id), ResourceGrid::from_rows(vec![vec![cap; horizon]]))
}

/// 单资源作业：前 `len` 步需求为 `demand`
fn job_1r(id: usize, demand: f64, len: usize, horizon: usize, submitted: u64) -> Job {
    let mut row = vec![0.0; horizon];
    row[..len].fill(demand);
    Job::new(JobId(id), ResourceGrid::from_rows(vec![row]), SimTime(submitted))
}

fn cluster_of(nodes: Vec<Node>, jobs: Vec<Job>) -> Cluster {
    Cluster::new(nodes, jobs).expect("valid cluster")
}
