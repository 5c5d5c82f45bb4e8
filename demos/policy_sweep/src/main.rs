//! policy_sweep — compare routing policies on a queueing network.
//!
//! N identical FIFO servers receive Poisson arrivals at a load of
//! 0.1, 0.5, and 0.8 × N, with exponential service times.  Every policy runs
//! the same replicates (same seeds), and the mean / std of response time is
//! averaged over them.
//!
//! Writes `summaries.csv` (one row per replicate) and, with `--task-log`,
//! `tasks.csv` (one row per completed task) into the output directory.

mod policy;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qn_core::{Exponential, RandomVariable, SimConfig, SimResult};
use qn_output::{CsvWriter, OutputWriter, RunInfo, SimOutputObserver, SummaryRow};
use qn_sim::{SimBuilder, run_replicates};

use policy::{Policy, TsParams};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_LOADS: [f64; 3] = [0.1, 0.5, 0.8];

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of servers.
    #[arg(short = 'S', long, default_value_t = 2)]
    servers: usize,

    /// Tasks the sink must receive per run.
    #[arg(short = 'n', long, default_value_t = 1_000)]
    tasks: u64,

    /// Replicate runs per (policy, arrival rate).
    #[arg(short, long, default_value_t = 3)]
    runs: u64,

    /// Service rate of each server (mean service time is its inverse).
    #[arg(long, default_value_t = 1.0)]
    service_rate: f64,

    /// Per-server loads; the arrival rate is load × servers × service rate.
    #[arg(short, long, value_delimiter = ',')]
    loads: Vec<f64>,

    /// Policies to compare (default: all).
    #[arg(short, long, value_enum, value_delimiter = ',')]
    policies: Vec<Policy>,

    /// Window length of the Thompson-sampling policies.
    #[arg(long, default_value_t = 100)]
    win_len: usize,

    /// Quantile above which the reset-on-rare-event policy clears a window.
    #[arg(long, default_value_t = 0.9)]
    threshold_prob_rare: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output directory.
    #[arg(short, long, default_value = "output/policy_sweep")]
    output: PathBuf,

    /// Also write one row per completed task (runs sequentially).
    #[arg(long)]
    task_log: bool,

    #[arg(short, long)]
    verbose: bool,
}

// ── Sweep ─────────────────────────────────────────────────────────────────────

struct Sweep {
    cli:      Cli,
    ts:       TsParams,
    service:  Arc<dyn RandomVariable>,
    writer:   CsvWriter,
    next_run: u32,
}

impl Sweep {
    /// Mean result of `cli.runs` replicates of `policy` at `arrival_rate`.
    fn evaluate(&mut self, policy: Policy, arrival_rate: f64) -> Result<SimResult> {
        let config = SimConfig::new(self.cli.servers, self.cli.tasks, self.cli.seed);
        let inter_arrival: Arc<dyn RandomVariable> = Arc::new(Exponential::new(arrival_rate)?);
        let ts = self.ts;

        let runs = if self.cli.task_log {
            let mut runs = Vec::new();
            for run_index in 0..self.cli.runs {
                let mut sim = SimBuilder::new(
                    config.clone(),
                    Arc::clone(&inter_arrival),
                    Arc::clone(&self.service),
                    |ids| policy.build(ids, ts),
                )
                .run_index(run_index)
                .build()?;

                let info = self.run_info(policy, arrival_rate);
                let mut obs = SimOutputObserver::new(&mut self.writer, info);
                runs.push(sim.run(&mut obs)?);
                if let Some(e) = obs.take_error() {
                    return Err(e).context("writing task log");
                }
            }
            runs
        } else {
            let rep = run_replicates(
                &config,
                inter_arrival,
                Arc::clone(&self.service),
                self.cli.runs,
                |ids| policy.build(ids, ts),
            )?;
            for r in &rep.runs {
                let info = self.run_info(policy, arrival_rate);
                self.writer.write_summary(&SummaryRow {
                    run:          info.run,
                    policy:       info.policy,
                    arrival_rate: info.arrival_rate,
                    et:           r.et,
                    std_t:        r.std_t,
                    num_tasks:    r.num_tasks,
                })?;
            }
            rep.runs
        };

        SimResult::average(&runs).context("no replicate results")
    }

    fn run_info(&mut self, policy: Policy, arrival_rate: f64) -> RunInfo {
        let run = self.next_run;
        self.next_run += 1;
        RunInfo { run, policy: policy.label().to_owned(), arrival_rate }
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // RUST_LOG overrides --verbose.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    if cli.servers == 0 {
        bail!("--servers must be at least 1");
    }
    if cli.loads.is_empty() {
        cli.loads = DEFAULT_LOADS.to_vec();
    }
    if cli.policies.is_empty() {
        cli.policies = Policy::ALL.to_vec();
    }
    if let Some(bad) = cli.loads.iter().find(|&&l| !(l > 0.0 && l.is_finite())) {
        bail!("loads must be positive, got {bad}");
    }

    println!("=== policy_sweep — rust_qn ===");
    println!(
        "Servers: {}  |  Tasks/run: {}  |  Runs: {}  |  Seed: {}",
        cli.servers, cli.tasks, cli.runs, cli.seed
    );
    println!();

    let writer = CsvWriter::new(&cli.output)
        .with_context(|| format!("opening output directory {}", cli.output.display()))?;
    let service: Arc<dyn RandomVariable> = Arc::new(Exponential::new(cli.service_rate)?);
    let ts = TsParams { win_len: cli.win_len, threshold_prob_rare: cli.threshold_prob_rare };
    let loads = cli.loads.clone();
    let policies = cli.policies.clone();
    let capacity = cli.servers as f64 * cli.service_rate;
    let mut sweep = Sweep { cli, ts, service, writer, next_run: 0 };

    let t0 = Instant::now();
    let mut table: Vec<(Policy, Vec<SimResult>)> =
        policies.iter().map(|&p| (p, Vec::with_capacity(loads.len()))).collect();
    for &load in &loads {
        let arrival_rate = load * capacity;
        info!(load, arrival_rate, "sweeping arrival rate");
        for (policy, results) in &mut table {
            let mean = sweep.evaluate(*policy, arrival_rate)?;
            info!(policy = policy.label(), arrival_rate, %mean, "policy done");
            results.push(mean);
        }
    }
    sweep.writer.finish()?;

    // ── Results table ─────────────────────────────────────────────────────
    println!("Sweep complete in {:.3} s", t0.elapsed().as_secs_f64());
    println!();
    print!("{:<30}", "Policy");
    for load in &loads {
        print!(" {:>20}", format!("ρ={load}"));
    }
    println!();
    println!("{}", "-".repeat(30 + 21 * loads.len()));
    for (policy, results) in &table {
        print!("{:<30}", policy.label());
        for r in results {
            print!(" {:>20}", format!("{:.3} ± {:.3}", r.et, r.std_t));
        }
        println!();
    }
    println!();
    println!("Results written to {}", sweep.cli.output.display());

    Ok(())
}
