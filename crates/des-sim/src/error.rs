use des_core::{ProcessId, SimTime};
use des_process::ProcessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    /// A fatal kernel or process-logic error, stamped with the clock time.
    #[error("run aborted at t={at}: {source}")]
    Process {
        at:     SimTime,
        source: ProcessError,
    },

    #[error("{process} was woken at t={at} but is not suspended")]
    StaleWakeup { process: ProcessId, at: SimTime },

    #[error("process table is full ({0} processes)")]
    TooManyProcesses(usize),
}

pub type SimResult<T> = Result<T, SimError>;
