//! Machine actions and trace records.

use serde::{Deserialize, Serialize};

use fp_core::Point;

/// What a machine is doing at a path point.
///
/// Serialized in `snake_case` (`"road_travel"`, `"capacity_full"`, …) for
/// renderers that replay the trace.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Initial position at the base station.
    Start,
    /// Road travel towards a field or to the base for resupply.
    RoadTravel,
    /// Arrival at a field's entry point.
    FieldStart,
    /// A coverage point inside a field.
    Working,
    /// The coverage point at which the machine ran out of capacity.
    CapacityFull,
    /// Road travel back to the base straight after running out of capacity.
    EmergencyRoadTravel,
    /// Resupply begins at the base station.
    Supply,
    /// Resupply finished; capacity restored.
    SupplyComplete,
    /// Final trip back to the base station.
    Return,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Start               => "start",
            Action::RoadTravel          => "road_travel",
            Action::FieldStart          => "field_start",
            Action::Working             => "working",
            Action::CapacityFull        => "capacity_full",
            Action::EmergencyRoadTravel => "emergency_road_travel",
            Action::Supply              => "supply",
            Action::SupplyComplete      => "supply_complete",
            Action::Return              => "return",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One time-stamped point of a machine trace.  `timestamp` is in seconds
/// from plan start.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x:         f64,
    pub y:         f64,
    pub timestamp: f64,
    pub action:    Action,
}

impl PathPoint {
    pub fn new(at: Point, timestamp: f64, action: Action) -> Self {
        Self { x: at.x, y: at.y, timestamp, action }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A resupply stop: start time and duration, both in seconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplyEvent {
    pub time:     f64,
    pub duration: f64,
}
