use thiserror::Error;

// ---------------------------------------------------------------------------
// Data-layer error taxonomy
// ---------------------------------------------------------------------------

/// Errors surfaced by the data layer.  The UI shows these verbatim in the
/// status line, so every message names the file/column/row it refers to.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("cannot parse '{value}' as a timestamp (column '{column}', row {row})")]
    Timestamp {
        column: String,
        row: usize,
        value: String,
    },

    /// Projection or edit requested before a date column was chosen.
    /// The shell only plots after a successful `set_index_column`, so this
    /// is unreachable through the UI; kept explicit rather than panicking.
    #[error("no date column has been selected")]
    NoIndex,
}
