//! 空闲控制器：从不放置作业。

use super::{Action, Controller};
use crate::cluster::Observation;

#[derive(Debug, Default)]
pub struct Idle;

impl Controller for Idle {
    fn name(&self) -> &str {
        "idle"
    }

    fn decide(&mut self, _obs: &Observation) -> Action {
        Action::Noop
    }
}
