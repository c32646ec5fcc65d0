//! Planning result: per-machine routes plus fleet-wide summary.

use serde::{Deserialize, Serialize};

use fp_core::Point;

use crate::action::{Action, PathPoint, SupplyEvent};

/// Display colours assigned to machines in id order, cycling.
pub const MACHINE_COLORS: [&str; 8] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b",
    "#8b5cf6", "#ec4899", "#06b6d4", "#84cc16",
];

/// Colour for the machine at zero-based `index`.
pub fn machine_color(index: usize) -> &'static str {
    MACHINE_COLORS[index % MACHINE_COLORS.len()]
}

/// One machine's full trace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineRoute {
    /// One-based machine number.
    pub machine_id: u32,
    pub path: Vec<PathPoint>,
    pub color: String,
    pub supply_events: Vec<SupplyEvent>,
    /// Metres moved.
    pub distance: f64,
}

impl MachineRoute {
    /// Timestamp of the last path point, seconds.
    pub fn finish_time(&self) -> f64 {
        self.path.last().map_or(0.0, |p| p.timestamp)
    }

    pub fn count(&self, action: Action) -> usize {
        self.path.iter().filter(|p| p.action == action).count()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    pub machines: Vec<MachineRoute>,
    /// Latest machine finish time, hours.
    pub total_time: f64,
    pub efficiency: f64,
    pub total_supply_events: usize,
    /// The snapped base station.
    pub base_station: Point,
    /// Every road-network node, in node-id order.
    pub road_network: Vec<Point>,
}

impl ScheduleResult {
    /// The result for a request with no fields.
    pub fn empty(base_station: Point) -> Self {
        Self {
            machines: Vec::new(),
            total_time: 0.0,
            efficiency: 0.0,
            total_supply_events: 0,
            base_station,
            road_network: Vec::new(),
        }
    }
}
