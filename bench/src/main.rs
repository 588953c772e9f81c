use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::Parser;
use serde::Serialize;

#[derive(Parser, Clone, Debug)]
#[command(name = "texgen-bench", version, about = "Time the showcase composition")]
struct BenchArgs {
    /// Measured runs.
    #[arg(long, default_value_t = 20)]
    iterations: u32,

    /// Unmeasured runs before timing starts.
    #[arg(long, default_value_t = 1)]
    warmup: u32,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
struct Report {
    iterations: u32,
    threads: usize,
    ms_per_showcase_min: f64,
    ms_per_showcase_mean: f64,
    ms_per_showcase_max: f64,
    ms_per_showcase_p50: f64,
    ms_per_showcase_p90: f64,
    final_fingerprint: String,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = BenchArgs::parse();
    if args.iterations == 0 {
        anyhow::bail!("--iterations must be >= 1");
    }
    if let Some(n) = args.threads {
        if n == 0 {
            anyhow::bail!("--threads must be >= 1 when set");
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("configure rayon thread pool")?;
    }

    let perlin = texgen::PerlinTable::shared();

    if args.warmup > 0 {
        eprintln!("warmup: {} run(s)", args.warmup);
        for _ in 0..args.warmup {
            texgen::render_showcase(perlin)?;
        }
    }

    eprintln!(
        "bench: {n} run(s) ({profile} build), threads={threads}",
        n = args.iterations,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        threads = rayon::current_num_threads(),
    );

    let mut runs = Vec::<Duration>::with_capacity(args.iterations as usize);
    let mut fingerprint = None;
    for i in 0..args.iterations {
        let t0 = Instant::now();
        let show = texgen::render_showcase(perlin)?;
        let wall = t0.elapsed();

        let fp = show.output.fingerprint();
        if let Some(prev) = fingerprint
            && prev != fp
        {
            anyhow::bail!("run {i:03}: fingerprint {fp:016x} differs from {prev:016x}");
        }
        fingerprint = Some(fp);

        eprintln!("run {i:03}: wall={:.3}ms", ms(wall));
        runs.push(wall);
    }

    let report = summarize(&args, &mut runs, fingerprint.unwrap_or_default());
    let json = serde_json::to_string_pretty(&report).context("serialize report")?;
    match &args.out {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("write report '{}'", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let n = sorted.len();
    let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
    sorted[rank - 1]
}

fn summarize(args: &BenchArgs, runs: &mut [Duration], fingerprint: u64) -> Report {
    runs.sort();
    let total: Duration = runs.iter().sum();
    Report {
        iterations: args.iterations,
        threads: rayon::current_num_threads(),
        ms_per_showcase_min: runs.first().copied().map_or(0.0, ms),
        ms_per_showcase_mean: ms(total) / runs.len().max(1) as f64,
        ms_per_showcase_max: runs.last().copied().map_or(0.0, ms),
        ms_per_showcase_p50: ms(percentile(runs, 0.50)),
        ms_per_showcase_p90: ms(percentile(runs, 0.90)),
        final_fingerprint: format!("{fingerprint:016x}"),
    }
}
