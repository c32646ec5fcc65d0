//! `fp-core`: foundational types for the field fleet planner.
//!
//! This crate is a dependency of every other `fp-*` crate.  It has no `fp-*`
//! dependencies and minimal external ones (`rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `MachineId`, `NodeId`, `EdgeId`, `FieldId`               |
//! | [`geo`]     | `Point`, `Field`, `Bounds`, obstacle sampling            |
//! | [`time`]    | `Tick`, `SimClock`                                       |
//! | [`config`]  | `PlannerConfig`, `AssignmentKind`                        |
//! | [`layout`]  | grid and random field layouts                            |
//! | [`rng`]     | `LayoutRng`                                              |
//! | [`error`]   | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod layout;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AssignmentKind, PlannerConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{Bounds, Field, Point, inside_any, segment_clear};
pub use ids::{EdgeId, FieldId, MachineId, NodeId};
pub use layout::{RandomLayout, grid_layout, random_layout};
pub use rng::LayoutRng;
pub use time::{SECS_PER_HOUR, SimClock, Tick};
