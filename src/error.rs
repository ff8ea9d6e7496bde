use thiserror::Error;

#[derive(Error, Debug)]
pub enum DormctlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column missing from input file: {0}")]
    MissingColumn(String),

    #[error("Non-numeric account balance {value:?} at data row {row}")]
    InvalidBalance { row: usize, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DormctlError>;
