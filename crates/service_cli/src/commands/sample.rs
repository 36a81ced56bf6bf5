//! Sample command implementation
//!
//! Runs a built-in scenario through the rejection sampler and reports the
//! accepted samples and run statistics.

use clap::ValueEnum;
use sampler_engine::rejection::{CancellationToken, RejectionSampler, SamplingOutcome};
use sampler_engine::stats::{ks_statistic, Histogram};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::scenario::Scenario;
use crate::{CliError, Result};

const HISTOGRAM_WIDTH: usize = 50;

/// Output formats for sampled data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary statistics and a text histogram
    Table,
    /// Samples and statistics as JSON
    Json,
    /// One sample per line
    Csv,
}

/// Arguments of the sample command after parsing.
#[derive(Clone, Debug)]
pub struct SampleArgs {
    pub scenario: Scenario,
    pub count: usize,
    pub k: Option<f64>,
    pub seed: Option<u64>,
    pub batch_size: Option<usize>,
    pub max_attempts: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// JSON document written by `--format json`.
#[derive(Debug, Serialize)]
struct SampleReport<'a> {
    scenario: Scenario,
    k: f64,
    seed: u64,
    elapsed_ms: u128,
    #[serde(flatten)]
    outcome: &'a SamplingOutcome,
}

/// Run the sample command
pub fn run(args: &SampleArgs, config: &CliConfig) -> Result<()> {
    let mut settings = config.clone();
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(batch_size) = args.batch_size {
        settings.batch_size = batch_size;
    }
    if let Some(max_attempts) = args.max_attempts {
        settings.max_attempts = Some(max_attempts);
    }

    let k = args.k.unwrap_or_else(|| args.scenario.default_k());
    let mut sampler = RejectionSampler::new(settings.sampler_config()?)?;

    info!("Starting sampling...");
    info!("  Scenario: {}", args.scenario);
    info!("  Samples: {}", args.count);
    info!("  Envelope constant: {}", k);
    info!("  Seed: {}", sampler.seed());
    info!("  Batch size: {}", sampler.config().batch_size());

    let token = CancellationToken::new();
    if let Some(secs) = args.timeout_secs {
        let timer = token.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            timer.cancel();
        });
    }

    let start = Instant::now();
    let outcome = args.scenario.sample(&mut sampler, k, args.count, &token)?;
    let elapsed = start.elapsed();

    info!(
        attempts = outcome.stats.attempts,
        acceptance_rate = outcome.stats.acceptance_rate(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Sampling complete"
    );
    if outcome.stats.envelope_violated() {
        warn!(
            max_ratio = outcome.stats.max_ratio,
            "Envelope constant {} does not bound the target; output is biased", k
        );
    }

    let rendered = match args.format {
        OutputFormat::Table => render_table(args.scenario, k, &outcome, settings.histogram_bins)?,
        OutputFormat::Json => {
            let report = SampleReport {
                scenario: args.scenario,
                k,
                seed: sampler.seed(),
                elapsed_ms: elapsed.as_millis(),
                outcome: &outcome,
            };
            serde_json::to_string_pretty(&report)? + "\n"
        }
        OutputFormat::Csv => render_csv(&outcome.samples)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("Output written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Renders one sample per line under an `x` header.
pub fn render_csv(samples: &[f64]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::with_capacity(samples.len() * 20 + 2));
    writer.write_record(["x"])?;
    for x in samples {
        writer.write_record([x.to_string()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| CliError::Serialisation(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| CliError::Serialisation(err.to_string()))
}

/// Renders summary statistics and a text histogram.
pub fn render_table(
    scenario: Scenario,
    k: f64,
    outcome: &SamplingOutcome,
    bins: usize,
) -> Result<String> {
    let samples = &outcome.samples;
    let stats = &outcome.stats;
    if samples.is_empty() {
        return Err(CliError::InvalidArgument("no samples to summarise".to_string()));
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    let mut out = String::new();
    let _ = writeln!(out, "Scenario:            {}", scenario);
    let _ = writeln!(out, "Envelope constant:   {}", k);
    let _ = writeln!(out, "Samples:             {}", stats.accepted);
    let _ = writeln!(out, "Acceptance tests:    {}", stats.attempts);
    let _ = writeln!(out, "Acceptance rate:     {:.4}", stats.acceptance_rate());
    let _ = writeln!(out, "Batches:             {}", stats.batches);
    let _ = writeln!(out, "Zero-density draws:  {}", stats.zero_density_proposals);
    let _ = writeln!(out, "Max ratio:           {:.4}", stats.max_ratio);
    let _ = writeln!(
        out,
        "Mean:                {:.4} (exact {:.4})",
        mean,
        scenario.reference_mean()
    );
    let _ = writeln!(out, "Std dev:             {:.4}", variance.sqrt());
    if let Some(d) = scenario
        .reference_cdf()
        .and_then(|cdf| ks_statistic(samples, cdf))
    {
        let _ = writeln!(out, "KS distance:         {:.5}", d);
    }

    let (lower, upper) = scenario.histogram_range();
    let histogram = Histogram::new(samples, lower, upper, bins)?;
    let peak = histogram.counts().iter().copied().max().unwrap_or(0).max(1);

    out.push('\n');
    for (i, &count) in histogram.counts().iter().enumerate() {
        let bar = (count as usize * HISTOGRAM_WIDTH) / peak as usize;
        let _ = writeln!(
            out,
            "{:>8.3} | {:<width$} {}",
            histogram.bin_centre(i),
            "#".repeat(bar),
            count,
            width = HISTOGRAM_WIDTH
        );
    }
    if histogram.above() > 0 {
        let _ = writeln!(out, "{:>8} | {}", format!("> {}", upper), histogram.above());
    }

    Ok(out)
}
