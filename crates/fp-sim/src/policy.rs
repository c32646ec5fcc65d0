//! Field assignment policies.
//!
//! When a machine becomes free the planner asks an [`AssignmentPolicy`]
//! which incomplete field to work next.  Policies only choose; travel,
//! resupply and work accounting stay in the tick loop.

use fp_core::{AssignmentKind, Point};

use crate::state::{FieldWorkState, MachineState};

/// Chooses the next field for a free machine.
///
/// Implementations must be `Send + Sync` so one planner can serve several
/// worker threads.  Returning `None` leaves the machine idle for this tick.
pub trait AssignmentPolicy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Index into `fields` of the field to work, or `None`.
    ///
    /// Must never return a completed field.
    fn select(&self, machine: &MachineState, fields: &[FieldWorkState], base: Point) -> Option<usize>;
}

/// First incomplete field in request order.
#[derive(Copy, Clone, Debug, Default)]
pub struct FirstIncompleteFieldPolicy;

impl AssignmentPolicy for FirstIncompleteFieldPolicy {
    fn name(&self) -> &'static str {
        "first_incomplete"
    }

    fn select(&self, _machine: &MachineState, fields: &[FieldWorkState], _base: Point) -> Option<usize> {
        fields.iter().position(|f| !f.done)
    }
}

/// Incomplete field whose entry point is closest to the machine.  Ties go
/// to the earlier field.
#[derive(Copy, Clone, Debug, Default)]
pub struct NearestFieldPolicy;

impl AssignmentPolicy for NearestFieldPolicy {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn select(&self, machine: &MachineState, fields: &[FieldWorkState], base: Point) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, f) in fields.iter().enumerate().filter(|(_, f)| !f.done) {
            let d = machine.position.distance_sq(f.entry_point(base));
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Incomplete field with the largest remaining area.  Ties go to the
/// earlier field.
#[derive(Copy, Clone, Debug, Default)]
pub struct LargestFieldFirstPolicy;

impl AssignmentPolicy for LargestFieldFirstPolicy {
    fn name(&self) -> &'static str {
        "largest_first"
    }

    fn select(&self, _machine: &MachineState, fields: &[FieldWorkState], _base: Point) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, f) in fields.iter().enumerate().filter(|(_, f)| !f.done) {
            let area = f.remaining_area();
            if best.is_none_or(|(_, ba)| area > ba) {
                best = Some((i, area));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// The built-in policy for a configured [`AssignmentKind`].
pub fn policy_for(kind: AssignmentKind) -> Box<dyn AssignmentPolicy> {
    match kind {
        AssignmentKind::FirstIncomplete => Box::new(FirstIncompleteFieldPolicy),
        AssignmentKind::Nearest         => Box::new(NearestFieldPolicy),
        AssignmentKind::LargestFirst    => Box::new(LargestFieldFirstPolicy),
    }
}
