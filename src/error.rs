use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("No user selected. Pass --user or set one with `linetally users add`.")]
    NoUser,

    #[error("Empty report: {0}")]
    EmptyFile(String),

    #[error("Unrecognized report header: {0}")]
    MissingColumns(String),

    #[error("Unknown line: {0}")]
    UnknownLine(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;
