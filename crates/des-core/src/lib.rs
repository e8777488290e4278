//! `des-core` — foundational types for the `rust_des` simulation kernel.
//!
//! This crate is a dependency of every other `des-*` crate.  It has no
//! `des-*` dependencies and few external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`ids`]    | `ProcessId`, `PoolId`                                    |
//! | [`time`]   | `SimTime`, `Clock`, `SimConfig`                          |
//! | [`rng`]    | `SimRng`, the single seeded random stream of a run       |
//! | [`dist`]   | `Dist` named distributions, `DurationSampler` trait      |
//! | [`error`]  | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `SimTime`, `SimConfig`   |
//!           | and `Dist` so scenarios can be loaded from files.          |

pub mod dist;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use dist::{Dist, DurationSampler};
pub use error::{CoreError, CoreResult};
pub use ids::{PoolId, ProcessId};
pub use rng::SimRng;
pub use time::{Clock, SimConfig, SimTime};
