use thiserror::Error;

/// Failure kinds of the load synthesis pipeline.
///
/// Every variant aborts the run, there is no partial output.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed or missing columns, unparsable cells.
    #[error("malformed input: {0}")]
    InputFormat(String),

    /// Missing scenario or charge type, degenerate scaling denominator.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Tables that are expected to align do not.
    #[error("tables do not align: {0}")]
    DataMismatch(String),

    #[error("series length mismatch: expected {expected} hourly values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
