//! `fp-sim`: the field fleet scheduler.
//!
//! # Tick loop
//!
//! ```text
//! build road network around fields and the snapped base station
//! for tick while elapsed < horizon and some field is incomplete:
//!   for machine in id order, free at or before the tick start:
//!     ① Assign   AssignmentPolicy::select picks an incomplete field
//!     ② Resupply below the threshold: drive to base, wait, refill
//!     ③ Travel   road route to the field entry point
//!     ④ Work     coverage points for min(remaining, capacity);
//!                an exhausted machine drives straight back to base
//! send every machine home; score the schedule
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fp_core::PlannerConfig;
//! use fp_sim::{Planner, ScheduleRequest};
//!
//! let request: ScheduleRequest = serde_json::from_str(&json)?;
//! request.validate()?;
//! let result = Planner::new(PlannerConfig::default())?.plan(&request);
//! ```

pub mod action;
pub mod builder;
pub mod efficiency;
pub mod error;
pub mod observer;
pub mod planner;
pub mod policy;
pub mod request;
pub mod result;
pub mod state;

#[cfg(test)]
mod tests;

pub use action::{Action, PathPoint, SupplyEvent};
pub use builder::PlannerBuilder;
pub use efficiency::efficiency;
pub use error::{PlanError, PlanResult};
pub use observer::{NoopObserver, PlanObserver};
pub use planner::Planner;
pub use policy::{
    AssignmentPolicy, FirstIncompleteFieldPolicy, LargestFieldFirstPolicy, NearestFieldPolicy, policy_for,
};
pub use request::{Parameters, ScheduleRequest};
pub use result::{MACHINE_COLORS, MachineRoute, ScheduleResult, machine_color};
pub use state::{FieldWorkState, MachineState};
