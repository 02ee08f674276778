use crate::models::transaction::Category;

/// Failures that abort a single menu action. Malformed field input never
/// ends up here; the prompter reprompts instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error processing the transaction store: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid date '{input}': {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },
    #[error("{0} total is too large to compute")]
    TotalOverflow(Category),
    #[error("Failed to render chart: {0}")]
    Chart(String),
    #[error("Input stream closed")]
    InputClosed,
}
