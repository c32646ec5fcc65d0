//! Mutable per-request planner state.
//!
//! Both structs are created fresh for every [`plan`](crate::Planner::plan)
//! call and mutated only by the tick loop.

use fp_core::{Field, MachineId, Point};

use crate::action::{Action, PathPoint, SupplyEvent};

// ── MachineState ──────────────────────────────────────────────────────────────

/// One machine's running state and its append-only trace.
#[derive(Clone, Debug)]
pub struct MachineState {
    pub id: MachineId,
    /// Remaining capacity as a field-equivalent fraction.
    pub capacity: f64,
    pub position: Point,
    /// Simulated seconds at which the machine is next free.
    pub time: f64,
    pub path: Vec<PathPoint>,
    pub supply_events: Vec<SupplyEvent>,
    /// Metres moved so far, on roads and inside fields.
    pub distance: f64,
}

impl MachineState {
    /// A machine parked at `base` at time 0 with a `Start` point.
    pub fn new(id: MachineId, capacity: f64, base: Point) -> Self {
        Self {
            id,
            capacity,
            position: base,
            time: 0.0,
            path: vec![PathPoint::new(base, 0.0, Action::Start)],
            supply_events: Vec::new(),
            distance: 0.0,
        }
    }

    /// Move to `at` and append a trace point stamped `timestamp`.
    ///
    /// The clock is not touched; callers advance `time` themselves.
    pub fn record(&mut self, at: Point, timestamp: f64, action: Action) {
        self.distance += self.position.distance(at);
        self.position = at;
        self.path.push(PathPoint::new(at, timestamp, action));
    }

    /// Wait until `t` if the machine is free earlier.
    #[inline]
    pub fn idle_until(&mut self, t: f64) {
        self.time = self.time.max(t);
    }

    #[inline]
    pub fn is_at(&self, p: Point) -> bool {
        self.position == p
    }

    /// Action of the last trace point.
    pub fn last_action(&self) -> Option<Action> {
        self.path.last().map(|p| p.action)
    }
}

// ── FieldWorkState ────────────────────────────────────────────────────────────

/// Coverage progress of one field.
#[derive(Clone, Debug)]
pub struct FieldWorkState {
    pub field: Field,
    /// Completed fraction in `[0, 1]`.
    pub completed: f64,
    pub done: bool,
    /// Where the last interrupted visit stopped.  Resumed visits enter here.
    pub last_work_position: Option<Point>,
    /// Every coverage point worked so far, across all visits.
    pub work_path: Vec<Point>,
}

impl FieldWorkState {
    pub fn new(field: Field) -> Self {
        Self { field, completed: 0.0, done: false, last_work_position: None, work_path: Vec::new() }
    }

    /// Fraction of the field still to be covered.
    #[inline]
    pub fn remaining(&self) -> f64 {
        (1.0 - self.completed).max(0.0)
    }

    /// Remaining area in square metres.
    pub fn remaining_area(&self) -> f64 {
        self.field.area() * self.remaining()
    }

    /// Where the next visit starts: the interrupted position when resuming,
    /// otherwise the corner nearest `base`.
    pub fn entry_point(&self, base: Point) -> Point {
        self.last_work_position.unwrap_or_else(|| self.field.nearest_corner(base))
    }

    /// Add `amount` of progress; returns `true` if the field just completed.
    pub fn advance(&mut self, amount: f64, completion_threshold: f64) -> bool {
        self.completed += amount;
        if !self.done && self.completed >= completion_threshold {
            self.completed = 1.0;
            self.done = true;
            self.last_work_position = None;
            return true;
        }
        false
    }
}
