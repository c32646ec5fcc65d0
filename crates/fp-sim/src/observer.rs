//! Planner observer trait for progress reporting and data collection.

use fp_core::{FieldId, MachineId, Tick};

/// Callbacks invoked by [`Planner::plan_with`][crate::Planner::plan_with]
/// at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: assignment counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Assignments(usize);
///
/// impl PlanObserver for Assignments {
///     fn on_assignment(&mut self, _tick: Tick, _machine: MachineId, _field: FieldId) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait PlanObserver {
    /// Called at the start of each tick, before any machine is offered work.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when a machine is assigned a field.
    fn on_assignment(&mut self, _tick: Tick, _machine: MachineId, _field: FieldId) {}

    /// Called when a machine begins a resupply stop at simulated second `time`.
    fn on_supply(&mut self, _machine: MachineId, _time: f64) {}

    /// Called once after the final tick and the return trips.
    ///
    /// `final_tick` is the first tick that was not processed.
    fn on_plan_end(&mut self, _final_tick: Tick, _fields_completed: usize) {}
}

/// A [`PlanObserver`] that does nothing.
pub struct NoopObserver;

impl PlanObserver for NoopObserver {}
