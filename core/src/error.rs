use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid row height: {height}")]
    InvalidRowHeight { height: f64 },

    #[error("Invalid viewport height: {height}")]
    InvalidViewport { height: f64 },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Action sink rejected report {report_id}: {reason}")]
    SinkRejected { report_id: String, reason: String },
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
