use crate::lifecycle::Lifecycle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NebulaError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid lifecycle transition {from:?} -> {to:?}")]
    InvalidTransition { from: Lifecycle, to: Lifecycle },
    #[error("scheduler error: {0}")]
    Scheduler(String),
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NebulaError>;
