//! Network Prisoner's Dilemma Simulation
//!
//! Writes the per-step cooperation fraction and the final strategy mix to
//! an output file.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pd_core::output::{build_summary, write_summary, MemoryReporter, OutputFormat, TeeReporter};
use pd_core::{run_to_file, ConfigOverrides, RngKind, SimConfig, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "pd_simulation")]
#[command(about = "Evolutionary Prisoner's Dilemma on a random fixed-degree network")]
struct Args {
    /// Probability of flipping each chosen action
    #[arg(value_name = "P_NOISE", allow_negative_numbers = true)]
    noise: f64,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// TOML file with run parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of time steps
    #[arg(long)]
    steps: Option<u64>,

    /// Population size
    #[arg(long)]
    agents: Option<usize>,

    /// Neighbor slots per agent
    #[arg(long)]
    degree: Option<usize>,

    /// Fermi intensity of selection
    #[arg(long)]
    beta: Option<f64>,

    /// Random generator (small, libc)
    #[arg(long)]
    rng: Option<RngKind>,

    /// Output encoding (csv, jsonl)
    #[arg(long, default_value = "csv")]
    format: OutputFormat,

    /// Also write a JSON run summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    /// Command-line values to layer over the config file.
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            noise: Some(self.noise),
            seed: self.seed,
            steps: self.steps,
            agents: self.agents,
            degree: self.degree,
            beta: self.beta,
            rng: self.rng,
        }
    }

    fn resolve_config(&self) -> anyhow::Result<SimConfig> {
        let config = SimConfig::layered(self.config.as_deref(), &self.overrides());
        match &self.config {
            Some(path) => config.with_context(|| format!("loading config {}", path.display())),
            None => Ok(config?),
        }
    }
}

/// Runs the simulation described by `args`, writing output and optional summary.
fn execute(args: &Args) -> anyhow::Result<()> {
    let config = args.resolve_config()?;

    let Some(summary_path) = &args.summary else {
        run_to_file(config, args.format, &args.output)
            .with_context(|| format!("running into {}", args.output.display()))?;
        return Ok(());
    };

    // Open the sink before doing any simulation work
    let mut sink = args
        .format
        .open(&args.output)
        .with_context(|| format!("opening output {}", args.output.display()))?;
    let mut sim = Simulation::from_config(config.clone())?;

    let mut tee = TeeReporter::new(sink.as_mut(), MemoryReporter::new());
    let final_strategies = sim.run(&mut tee)?;
    let summary = build_summary(&config, &tee.second.cooperation_series(), final_strategies);
    write_summary(summary_path, &summary)
        .with_context(|| format!("writing summary {}", summary_path.display()))?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    execute(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pd_core::RunSummary;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_output_is_usage_error() {
        let err = Args::try_parse_from(["pd_simulation", "0.1"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_positional_noise_overrides_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("run.toml");
        fs::write(&config_path, "noise = 0.4\nsteps = 12\nseed = 3\n").unwrap();

        let args = Args::try_parse_from([
            "pd_simulation",
            "0.05",
            "out.csv",
            "--config",
            config_path.to_str().unwrap(),
            "--seed",
            "9",
        ])
        .unwrap();
        let config = args.resolve_config().unwrap();

        assert_eq!(config.noise, 0.05);
        assert_eq!(config.seed, 9);
        assert_eq!(config.steps, 12);
    }

    #[test]
    fn test_rng_and_format_flags_parse() {
        let args = Args::try_parse_from([
            "pd_simulation",
            "0",
            "out.jsonl",
            "--rng",
            "libc",
            "--format",
            "jsonl",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Jsonl);
        assert_eq!(args.resolve_config().unwrap().rng, RngKind::Libc);
    }

    #[test]
    fn test_execute_writes_output_and_summary() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let summary = dir.path().join("summary.json");

        let args = Args::try_parse_from([
            "pd_simulation",
            "0.02",
            output.to_str().unwrap(),
            "--steps",
            "15",
            "--summary",
            summary.to_str().unwrap(),
        ])
        .unwrap();
        execute(&args).unwrap();

        let csv = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 15 + 3);

        let parsed: RunSummary =
            serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
        assert_eq!(parsed.steps, 15);
        assert_eq!(parsed.noise, 0.02);
        assert_eq!(parsed.cooperation.len(), 15);
        for (t, value) in parsed.cooperation.iter().enumerate() {
            assert_eq!(lines[t + 1], format!("{},{:.6}", t, value));
        }
    }

    #[test]
    fn test_execute_fails_on_unwritable_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("missing").join("out.csv");
        let args =
            Args::try_parse_from(["pd_simulation", "0", output.to_str().unwrap()]).unwrap();
        assert!(execute(&args).is_err());
        assert!(!output.exists());
    }
}
