//! Error types for des-resource.

use des_core::{PoolId, ProcessId};
use thiserror::Error;

/// Misuse of a resource pool.  All variants are programming errors except
/// `ZeroCapacity` and `DuplicateName`, which surface at configuration time.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("pool `{pool}` must have at least one unit")]
    ZeroCapacity { pool: String },

    #[error("a pool named `{0}` is already registered")]
    DuplicateName(String),

    #[error("pool limit of {} reached", u16::MAX)]
    TooManyPools,

    #[error("{0} is not a registered pool")]
    UnknownPool(PoolId),

    #[error("{process} released a unit of `{pool}` it does not hold")]
    ReleaseWithoutAcquire { pool: String, process: ProcessId },

    #[error("{process} already holds or is waiting for a unit of `{pool}`")]
    AlreadyHeld { pool: String, process: ProcessId },
}

/// Alias for `Result<T, PoolError>`.
pub type PoolResult<T> = Result<T, PoolError>;
