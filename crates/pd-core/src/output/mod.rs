//! Output Generation
//!
//! Reporters that serialize step and final records, and the JSON run summary.

pub mod reporter;
pub mod summary;

pub use reporter::{
    CsvReporter, JsonlReporter, MemoryReporter, OutputError, OutputFormat, Reporter,
    TeeReporter,
};
pub use summary::{build_summary, write_summary};
