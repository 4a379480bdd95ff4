use thiserror::Error;

use erpdesk_core::CoreError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// A date filter bound could not be parsed; state is left untouched.
    #[error("invalid {bound} date: {reason}")]
    InvalidDate { bound: &'static str, reason: String },

    #[error("invalid value for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("export produced invalid text: {0}")]
    Encoding(String),
}
