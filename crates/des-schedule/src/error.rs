use des_core::{CoreError, SimTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("cannot schedule an event at t={due}: clock is already at t={now}")]
    InvalidTime { due: SimTime, now: SimTime },

    #[error("invalid wait duration {duration} at t={now}: must be finite and non-negative")]
    InvalidDuration { duration: f64, now: SimTime },

    #[error("event queue is empty")]
    EmptyQueue,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
