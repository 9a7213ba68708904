use super::{cluster_of, job_1r, node_1r};
use crate::cluster::{Cluster, Job, JobId, JobStatus, Node, NodeId};
use crate::error::ClusterError;
use crate::resource::ResourceGrid;
use crate::sim::SimTime;

#[test]
fn feasible_job_runs_for_its_length_then_completes() {
    let mut cluster = cluster_of(vec![node_1r(0, 10.0, 5)], vec![job_1r(0, 5.0, 3, 5, 0)]);

    assert!(cluster.schedule(0, 0));
    assert_eq!(cluster.job(0).status(), JobStatus::Running);
    assert_eq!(cluster.node(0).usage().row(0), [5.0, 5.0, 5.0, 0.0, 0.0]);

    cluster.tick();
    cluster.tick();
    assert_eq!(cluster.job(0).status(), JobStatus::Running);
    assert!(!cluster.has_terminated());

    cluster.tick();
    assert_eq!(cluster.job(0).status(), JobStatus::Complete);
    assert!(cluster.has_terminated());
    assert!(cluster.node(0).usage().is_zero());
    assert_eq!(cluster.makespan(), Some(SimTime(3)));
}

#[test]
fn infeasible_job_is_rejected_without_mutation() {
    let mut cluster = cluster_of(vec![node_1r(0, 5.0, 1)], vec![job_1r(0, 10.0, 1, 1, 0)]);

    assert!(!cluster.schedule(0, 0));
    assert!(cluster.node(0).usage().is_zero());
    assert_eq!(cluster.job(0).status(), JobStatus::Pending);
    assert_eq!(cluster.stats().rejections, 1);
    assert_eq!(cluster.stats().placements, 0);
}

#[test]
fn late_submission_is_invisible_until_its_tick() {
    let mut cluster = cluster_of(vec![node_1r(0, 10.0, 5)], vec![job_1r(0, 1.0, 1, 5, 3)]);

    for _ in 0..2 {
        assert!(!cluster.is_visible(0));
        assert!(cluster.has_pending_arrivals());
        assert_eq!(cluster.pending_jobs().count(), 0);
        assert!(cluster.observe().jobs.is_empty());
        assert!(!cluster.schedule(0, 0));
        cluster.tick();
    }
    assert!(!cluster.schedule(0, 0));
    cluster.tick();

    assert_eq!(cluster.clock(), SimTime(3));
    assert!(cluster.is_visible(0));
    assert!(!cluster.has_pending_arrivals());
    assert_eq!(cluster.pending_jobs().collect::<Vec<_>>(), vec![0]);
    assert!(cluster.schedule(0, 0));
    assert_eq!(cluster.total_wait_time(), 0);
}

#[test]
fn scheduling_a_running_job_again_returns_false() {
    let mut cluster = cluster_of(vec![node_1r(0, 10.0, 4)], vec![job_1r(0, 2.0, 2, 4, 0)]);
    assert!(cluster.schedule(0, 0));
    assert!(!cluster.schedule(0, 0));
    assert_eq!(cluster.node(0).usage().row(0), [2.0, 2.0, 0.0, 0.0]);
}

#[test]
#[should_panic(expected = "node index 3 out of range")]
fn out_of_range_node_index_panics() {
    let mut cluster = cluster_of(vec![node_1r(0, 10.0, 4)], vec![job_1r(0, 2.0, 2, 4, 0)]);
    cluster.schedule(3, 0);
}

#[test]
#[should_panic(expected = "job index 9 out of range")]
fn out_of_range_job_index_panics() {
    let mut cluster = cluster_of(vec![node_1r(0, 10.0, 4)], vec![job_1r(0, 2.0, 2, 4, 0)]);
    cluster.schedule(0, 9);
}

#[test]
fn wait_time_counts_ticks_between_submission_and_start() {
    let mut cluster = cluster_of(
        vec![node_1r(0, 4.0, 6)],
        vec![job_1r(0, 4.0, 2, 6, 0), job_1r(1, 4.0, 2, 6, 1)],
    );
    assert!(cluster.schedule(0, 0));
    cluster.tick();
    // 节点被作业 0 占满，作业 1 要等一个 tick
    assert!(!cluster.schedule(0, 1));
    cluster.tick();
    assert!(cluster.schedule(0, 1));
    assert_eq!(cluster.job(1).wait_time(), Some(1));
    assert_eq!(cluster.total_wait_time(), 1);

    cluster.tick();
    cluster.tick();
    assert!(cluster.has_terminated());
    assert_eq!(cluster.makespan(), Some(SimTime(4)));
    assert_eq!(cluster.stats().completions, 2);
}

#[test]
fn two_jobs_share_a_node_while_capacity_allows() {
    let mut cluster = cluster_of(
        vec![node_1r(0, 10.0, 4)],
        vec![
            job_1r(0, 6.0, 2, 4, 0),
            job_1r(1, 4.0, 4, 4, 0),
            job_1r(2, 1.0, 1, 4, 0),
        ],
    );
    assert!(cluster.schedule(0, 0));
    assert!(cluster.schedule(0, 1));
    assert!(!cluster.schedule(0, 2));
    assert_eq!(cluster.node(0).usage().row(0), [10.0, 10.0, 4.0, 4.0]);
}

#[test]
fn completed_job_keeps_its_elapsed_time() {
    let mut cluster = cluster_of(vec![node_1r(0, 10.0, 4)], vec![job_1r(0, 1.0, 2, 4, 0)]);
    assert!(cluster.schedule(0, 0));
    for _ in 0..6 {
        cluster.tick();
    }
    assert_eq!(cluster.job(0).elapsed_running_time(), 2);
    assert_eq!(cluster.job(0).finish_time(), Some(SimTime(2)));
}

#[test]
fn zero_length_job_completes_on_next_tick() {
    let mut cluster = cluster_of(vec![node_1r(0, 1.0, 3)], vec![job_1r(0, 1.0, 0, 3, 0)]);
    assert!(cluster.schedule(0, 0));
    cluster.tick();
    assert_eq!(cluster.job(0).status(), JobStatus::Complete);
}

#[test]
fn observation_is_a_detached_snapshot() {
    let mut cluster = cluster_of(
        vec![node_1r(0, 10.0, 3), node_1r(1, 10.0, 3)],
        vec![job_1r(0, 3.0, 1, 3, 0), job_1r(1, 3.0, 1, 3, 2)],
    );
    assert!(cluster.schedule(1, 0));

    let mut obs = cluster.observe();
    assert_eq!(obs.clock, SimTime::ZERO);
    assert_eq!(obs.nodes.len(), 2);
    assert_eq!(obs.statuses, vec![JobStatus::Running, JobStatus::Pending]);
    assert_eq!(obs.jobs.len(), 1);
    assert_eq!(obs.running_jobs().count(), 1);
    assert_eq!(obs.pending_jobs().count(), 0);
    assert_eq!(obs.nodes[1].free_space().row(0), [7.0, 10.0, 10.0]);

    obs.nodes[1].usage = ResourceGrid::from_rows(vec![vec![10.0; 3]]);
    assert_eq!(cluster.node(1).usage().row(0), [3.0, 0.0, 0.0]);
}

#[test]
fn observation_fits_matches_schedule() {
    let mut cluster = cluster_of(
        vec![node_1r(0, 2.0, 3), node_1r(1, 5.0, 3)],
        vec![job_1r(0, 4.0, 2, 3, 0)],
    );
    let obs = cluster.observe();
    let job = obs.pending_jobs().next().expect("visible job");
    assert!(!obs.fits(0, job));
    assert!(obs.fits(1, job));
    assert_eq!(obs.fitting_nodes(job).collect::<Vec<_>>(), vec![1]);

    assert!(!cluster.schedule(0, 0));
    assert!(cluster.schedule(1, 0));
}

#[test]
fn empty_cluster_is_terminated() {
    let cluster = Cluster::new(Vec::new(), Vec::new()).expect("empty cluster");
    assert!(cluster.has_terminated());
    assert!(!cluster.has_pending_arrivals());
    assert_eq!(cluster.makespan(), Some(SimTime::ZERO));
}

#[test]
fn construction_rejects_mismatched_shapes() {
    let two_resources = Node::new(NodeId(1), ResourceGrid::from_rows(vec![vec![1.0; 3]; 2]));
    assert!(matches!(
        Cluster::new(vec![node_1r(0, 1.0, 3), two_resources], Vec::new()),
        Err(ClusterError::ShapeMismatch { index: 1, .. })
    ));

    assert_eq!(
        Cluster::new(vec![node_1r(0, 1.0, 3)], vec![job_1r(0, 1.0, 1, 5, 0)]).err(),
        Some(ClusterError::HorizonTooLong {
            job: 0,
            job_horizon: 5,
            node_horizon: 3,
        })
    );

    let two_resource_job = Job::new(
        JobId(0),
        ResourceGrid::from_rows(vec![vec![1.0; 3]; 2]),
        SimTime::ZERO,
    );
    assert!(matches!(
        Cluster::new(vec![node_1r(0, 1.0, 3)], vec![two_resource_job]),
        Err(ClusterError::ShapeMismatch { what: "job resource count", .. })
    ));

    assert_eq!(
        Cluster::new(Vec::new(), vec![job_1r(0, 1.0, 1, 3, 0)]).err(),
        Some(ClusterError::NoNodes { jobs: 1 })
    );
}

#[test]
fn construction_rejects_negative_capacity() {
    let node = Node::new(NodeId(0), ResourceGrid::from_rows(vec![vec![1.0, -2.0]]));
    assert_eq!(
        Cluster::new(vec![node], Vec::new()).err(),
        Some(ClusterError::InvalidCapacity {
            node: 0,
            resource: 0,
            timestep: 1,
            value: -2.0,
        })
    );
}

#[test]
fn construction_rejects_negative_or_nan_demand() {
    let negative = Job::new(
        JobId(1),
        ResourceGrid::from_rows(vec![vec![-5.0, 0.0]]),
        SimTime::ZERO,
    );
    assert_eq!(
        Cluster::new(
            vec![node_1r(0, 10.0, 2)],
            vec![job_1r(0, 1.0, 1, 2, 0), negative]
        )
        .err(),
        Some(ClusterError::InvalidDemand {
            job: 1,
            resource: 0,
            timestep: 0,
            value: -5.0,
        })
    );

    let nan = Job::new(JobId(0), ResourceGrid::from_rows(vec![vec![f64::NAN]]), SimTime::ZERO);
    assert!(matches!(
        Cluster::new(vec![node_1r(0, 10.0, 1)], vec![nan]),
        Err(ClusterError::InvalidDemand { job: 0, timestep: 0, .. })
    ));
}

#[test]
fn observation_node_ids_are_cluster_indices() {
    let node = Node::new(NodeId(7), ResourceGrid::from_rows(vec![vec![4.0; 2]]));
    let cluster = cluster_of(vec![node], vec![job_1r(0, 1.0, 1, 2, 0)]);
    let obs = cluster.observe();
    assert_eq!(obs.nodes[0].id, NodeId(0));
    assert_eq!(obs.jobs[0].id, JobId(0));
}
