//! `des-resource` — fixed-capacity resource pools with FIFO waiter queues.
//!
//! # Crate layout
//!
//! | Module     | Contents                                            |
//! |------------|-----------------------------------------------------|
//! | [`pool`]   | `ResourcePool`, `Acquire`                           |
//! | [`pools`]  | `ResourcePools` — named registry addressed by `PoolId` |
//! | [`error`]  | `PoolError`, `PoolResult<T>`                        |
//!
//! Pools know nothing about time or the event queue.  `release` hands the
//! freed unit straight to the longest waiter and returns that waiter's id;
//! the caller is responsible for scheduling its resumption.

pub mod error;
pub mod pool;
pub mod pools;


pub use error::{PoolError, PoolResult};
pub use pool::{Acquire, ResourcePool};
pub use pools::ResourcePools;
