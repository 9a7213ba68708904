//! 随机控制器
//!
//! 在所有可行的（节点, 作业）组合中随机选一个；随机源由构造时的种子决定。

use super::{Action, Controller};
use crate::cluster::Observation;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug)]
pub struct RandomFit {
    rng: ChaCha8Rng,
}

impl RandomFit {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Controller for RandomFit {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(&mut self, obs: &Observation) -> Action {
        let candidates: Vec<(usize, Vec<usize>)> = obs
            .pending_jobs()
            .map(|job| (job.id.0, obs.fitting_nodes(job).collect::<Vec<_>>()))
            .filter(|(_, nodes)| !nodes.is_empty())
            .collect();
        if candidates.is_empty() {
            return Action::Noop;
        }

        let (job, nodes) = &candidates[self.rng.random_range(0..candidates.len())];
        let node = nodes[self.rng.random_range(0..nodes.len())];
        Action::Place { node, job: *job }
    }
}
