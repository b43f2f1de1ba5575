//! Reporters
//!
//! A [`Reporter`] receives the per-step cooperation records and the final
//! strategy fractions of a run.

use pd_events::{FinalStrategies, StepRecord, CSV_HEADER, FINAL_MARKER};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::config::SimConfig;

/// Errors raised while writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("could not open output {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sink for simulation records.
pub trait Reporter {
    /// Called once before the first step.
    fn begin(&mut self, _config: &SimConfig) -> Result<(), OutputError> {
        Ok(())
    }

    fn record_step(&mut self, record: &StepRecord) -> Result<(), OutputError>;

    /// Called once after the last step.
    fn finish(&mut self, final_strategies: &FinalStrategies) -> Result<(), OutputError>;
}

impl<T: Reporter + ?Sized> Reporter for &mut T {
    fn begin(&mut self, config: &SimConfig) -> Result<(), OutputError> {
        (**self).begin(config)
    }

    fn record_step(&mut self, record: &StepRecord) -> Result<(), OutputError> {
        (**self).record_step(record)
    }

    fn finish(&mut self, final_strategies: &FinalStrategies) -> Result<(), OutputError> {
        (**self).finish(final_strategies)
    }
}

impl<T: Reporter + ?Sized> Reporter for Box<T> {
    fn begin(&mut self, config: &SimConfig) -> Result<(), OutputError> {
        (**self).begin(config)
    }

    fn record_step(&mut self, record: &StepRecord) -> Result<(), OutputError> {
        (**self).record_step(record)
    }

    fn finish(&mut self, final_strategies: &FinalStrategies) -> Result<(), OutputError> {
        (**self).finish(final_strategies)
    }
}

/// Supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

impl OutputFormat {
    /// Opens `path` for writing (truncating) and wraps it in the matching reporter.
    pub fn open(self, path: impl AsRef<Path>) -> Result<Box<dyn Reporter>, OutputError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| OutputError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(match self {
            OutputFormat::Csv => Box::new(CsvReporter::new(file)),
            OutputFormat::Jsonl => Box::new(JsonlReporter::new(file)),
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "jsonl" | "json" => Ok(OutputFormat::Jsonl),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Line-oriented CSV stream:
///
/// ```text
/// time,cooperation
/// 0,0.512500
/// ...
/// #FINAL_STRATEGIES
/// 0.250000,0.250000,0.250000,0.250000
/// ```
pub struct CsvReporter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> CsvReporter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
        }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, OutputError> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: Write> Reporter for CsvReporter<W> {
    fn begin(&mut self, _config: &SimConfig) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", CSV_HEADER)?;
        Ok(())
    }

    fn record_step(&mut self, record: &StepRecord) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", record)?;
        Ok(())
    }

    fn finish(&mut self, final_strategies: &FinalStrategies) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", FINAL_MARKER)?;
        writeln!(self.writer, "{}", final_strategies)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct FinalLine<'a> {
    #[serde(rename = "final")]
    final_strategies: &'a FinalStrategies,
}

/// One JSON object per line: each step record, then `{"final": {...}}`.
pub struct JsonlReporter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> JsonlReporter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
        }
    }

    pub fn into_inner(self) -> Result<W, OutputError> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: Write> Reporter for JsonlReporter<W> {
    fn record_step(&mut self, record: &StepRecord) -> Result<(), OutputError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self, final_strategies: &FinalStrategies) -> Result<(), OutputError> {
        serde_json::to_writer(&mut self.writer, &FinalLine { final_strategies })?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Forwards every record to two reporters, `first` before `second`.
pub struct TeeReporter<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: Reporter, B: Reporter> TeeReporter<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Reporter, B: Reporter> Reporter for TeeReporter<A, B> {
    fn begin(&mut self, config: &SimConfig) -> Result<(), OutputError> {
        self.first.begin(config)?;
        self.second.begin(config)
    }

    fn record_step(&mut self, record: &StepRecord) -> Result<(), OutputError> {
        self.first.record_step(record)?;
        self.second.record_step(record)
    }

    fn finish(&mut self, final_strategies: &FinalStrategies) -> Result<(), OutputError> {
        self.first.finish(final_strategies)?;
        self.second.finish(final_strategies)
    }
}

/// Keeps every record in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    pub steps: Vec<StepRecord>,
    pub final_strategies: Option<FinalStrategies>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cooperation fractions in step order.
    pub fn cooperation_series(&self) -> Vec<f64> {
        self.steps.iter().map(|r| r.cooperation).collect()
    }
}

impl Reporter for MemoryReporter {
    fn record_step(&mut self, record: &StepRecord) -> Result<(), OutputError> {
        self.steps.push(*record);
        Ok(())
    }

    fn finish(&mut self, final_strategies: &FinalStrategies) -> Result<(), OutputError> {
        self.final_strategies = Some(*final_strategies);
        Ok(())
    }
}
