use des_resource::PoolError;
use des_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("invalid stage: {0}")]
    InvalidStage(String),
}

pub type ProcessResult<T> = Result<T, ProcessError>;
