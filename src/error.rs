use thiserror::Error;

#[derive(Error, Debug)]
pub enum VergerError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown sub-parish: {0}")]
    UnknownSubParish(String),

    #[error("Unknown BEC: {0}")]
    UnknownBec(String),

    #[error("Unknown faithful: {0}")]
    UnknownFaithful(String),

    #[error("Unknown contribution: {0}")]
    UnknownContribution(i64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, VergerError>;
