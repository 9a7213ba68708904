//! 集群调度仿真
//!
//! 从配置与种子生成节点和作业，用指定控制器运行到所有作业完成（或到达 tick 上限）。

use clap::{Parser, ValueEnum};
use gridsim_rs::policy::{Controller, FirstFit, Idle, RandomFit};
use gridsim_rs::sim::{SimTime, Simulator};
use gridsim_rs::workload::SimConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    FirstFit,
    Random,
    Idle,
}

#[derive(Debug, Parser)]
#[command(name = "cluster-sim", about = "离散时间集群调度仿真")]
struct Args {
    /// JSON 配置文件路径；下面的参数会覆盖其中对应字段
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    nodes: Option<usize>,

    #[arg(long)]
    jobs: Option<usize>,

    #[arg(long)]
    resources: Option<usize>,

    /// 时间窗口长度（tick）
    #[arg(long)]
    horizon: Option<usize>,

    /// 节点每种资源的容量
    #[arg(long)]
    intensity: Option<f64>,

    #[arg(long, value_enum, default_value_t = Policy::FirstFit)]
    policy: Policy,

    /// 最多运行多少个 tick
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// 将运行汇总写为 JSON 文件
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let mut cfg = match &args.config {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(nodes) = args.nodes {
        cfg.nodes = nodes;
    }
    if let Some(jobs) = args.jobs {
        cfg.jobs = jobs;
    }
    if let Some(resources) = args.resources {
        cfg.resources = resources;
    }
    if let Some(horizon) = args.horizon {
        cfg.horizon = horizon;
    }
    if let Some(intensity) = args.intensity {
        cfg.node_intensity = intensity;
    }
    Ok(cfg)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = load_config(args)?;
    let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
    let mut cluster = cfg.build_cluster(&mut rng)?;

    let mut controller: Box<dyn Controller> = match args.policy {
        Policy::FirstFit => Box::new(FirstFit),
        Policy::Random => Box::new(RandomFit::new(cfg.seed)),
        Policy::Idle => Box::new(Idle),
    };

    let mut sim = Simulator::default();
    let summary = sim.run_until(&mut cluster, controller.as_mut(), SimTime(args.max_ticks));

    println!(
        "summary controller={} clock={} terminated={} total_wait_time={} placements={} rejections={} completions={}",
        summary.controller,
        summary.clock.0,
        summary.terminated,
        summary.total_wait_time,
        summary.stats.placements,
        summary.stats.rejections,
        summary.stats.completions
    );

    if let Some(path) = &args.summary_json {
        fs::write(path, serde_json::to_string_pretty(&summary)?)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
