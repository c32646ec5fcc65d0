use fp_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type PlanResult<T> = Result<T, PlanError>;
