use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaceReportError {
    #[error("Dataset contains no rows; nothing to aggregate")]
    EmptyDataset,

    #[error("Unparsable date '{value}' in column '{column}'")]
    MalformedDate { column: String, value: String },

    #[error("Required column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PaceReportError>;
