//! Planner configuration.
//!
//! Every tunable constant of the road-network builder, coverage generator
//! and tick loop lives here.  `PlannerConfig::default()` reproduces the
//! standard planner; applications may load partial overrides from JSON (all
//! fields are `#[serde(default)]` with the `serde` feature).

use crate::{CoreError, CoreResult};

/// Which field a free machine is offered next.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AssignmentKind {
    /// First incomplete field in request order.
    #[default]
    FirstIncomplete,
    /// Incomplete field whose entry point is nearest the machine.
    Nearest,
    /// Incomplete field with the largest remaining area.
    LargestFirst,
}

impl AssignmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentKind::FirstIncomplete => "first_incomplete",
            AssignmentKind::Nearest         => "nearest",
            AssignmentKind::LargestFirst    => "largest_first",
        }
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level planner configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    // ── Road network ──────────────────────────────────────────────────────
    /// Spacing of the candidate waypoint grid, metres.
    pub grid_spacing: f64,
    /// Margin added around the fields' bounding box, metres.
    pub grid_padding: f64,
    /// Nodes closer than `grid_spacing * connect_factor` are connection
    /// candidates.
    pub connect_factor: f64,
    /// Interpolation steps used to test a connection against field interiors.
    pub crossing_samples: u32,

    // ── Coverage ──────────────────────────────────────────────────────────
    /// Distance between boustrophedon rows, metres.
    pub row_spacing: f64,

    // ── Kinematics and durations ──────────────────────────────────────────
    /// Road travel speed, metres per second.
    pub travel_speed_mps: f64,
    /// Seconds to work one full field-equivalent.
    pub field_work_secs: f64,

    // ── Tick loop ─────────────────────────────────────────────────────────
    /// Seconds per planner tick.
    pub tick_secs: u32,
    /// Simulated-time ceiling, seconds.
    pub horizon_secs: u64,

    // ── Capacity policy ───────────────────────────────────────────────────
    /// A machine below this capacity resupplies before its next assignment.
    pub resupply_threshold: f64,
    /// Working a point that leaves capacity below this floor ends the visit.
    pub capacity_floor: f64,
    /// Completion fraction at which a field counts as done.
    pub completion_threshold: f64,

    /// Field assignment policy.
    pub assignment: AssignmentKind,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid_spacing:         10.0,
            grid_padding:         20.0,
            connect_factor:       1.5,
            crossing_samples:     10,
            row_spacing:          5.0,
            travel_speed_mps:     5.0,
            field_work_secs:      180.0,
            tick_secs:            60,
            horizon_secs:         8 * 3_600,
            resupply_threshold:   0.1,
            capacity_floor:       0.05,
            completion_threshold: 0.99,
            assignment:           AssignmentKind::FirstIncomplete,
        }
    }
}

impl PlannerConfig {
    /// Maximum length of a road-network connection.
    #[inline]
    pub fn connect_radius(&self) -> f64 {
        self.grid_spacing * self.connect_factor
    }

    /// Reject values that would make the builder or tick loop degenerate.
    pub fn validate(&self) -> CoreResult<()> {
        let positive = [
            ("grid_spacing", self.grid_spacing),
            ("connect_factor", self.connect_factor),
            ("row_spacing", self.row_spacing),
            ("travel_speed_mps", self.travel_speed_mps),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.grid_padding.is_finite() && self.grid_padding >= 0.0) {
            return Err(CoreError::Config(format!(
                "grid_padding must be non-negative, got {}",
                self.grid_padding
            )));
        }
        if !(self.field_work_secs.is_finite() && self.field_work_secs >= 0.0) {
            return Err(CoreError::Config(format!(
                "field_work_secs must be non-negative, got {}",
                self.field_work_secs
            )));
        }
        if self.tick_secs == 0 {
            return Err(CoreError::Config("tick_secs must be at least 1".into()));
        }
        if self.crossing_samples == 0 {
            return Err(CoreError::Config("crossing_samples must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.completion_threshold) || self.completion_threshold == 0.0 {
            return Err(CoreError::Config(format!(
                "completion_threshold must be in (0, 1], got {}",
                self.completion_threshold
            )));
        }
        if self.capacity_floor < 0.0 || self.resupply_threshold < 0.0 {
            return Err(CoreError::Config("capacity thresholds must be non-negative".into()));
        }
        Ok(())
    }
}
