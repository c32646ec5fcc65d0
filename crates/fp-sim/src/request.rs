//! Planning request: the JSON document a caller submits.

use serde::{Deserialize, Serialize};

use fp_core::{Field, Point};

use crate::{PlanError, PlanResult};

/// Machine fleet parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    /// Field-equivalents a machine can work before resupplying.
    pub machine_capacity: f64,
    /// Seconds spent at the base per resupply.
    pub supply_duration: f64,
}

/// A planning request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub machine_count: u32,
    pub fields: Vec<Field>,
    pub base_station: Point,
    pub parameters: Parameters,
}

impl ScheduleRequest {
    /// Boundary check for caller-supplied input.
    ///
    /// [`Planner::plan`](crate::Planner::plan) never fails, but fed garbage it
    /// produces a garbage schedule; callers validate first.
    pub fn validate(&self) -> PlanResult<()> {
        if !self.base_station.is_finite() {
            return Err(PlanError::InvalidRequest(format!(
                "base station {} is not finite",
                self.base_station
            )));
        }
        for field in &self.fields {
            field.validate()?;
        }
        let p = &self.parameters;
        if !(p.machine_capacity.is_finite() && p.machine_capacity > 0.0) {
            return Err(PlanError::InvalidRequest(format!(
                "machineCapacity must be positive, got {}",
                p.machine_capacity
            )));
        }
        if !(p.supply_duration.is_finite() && p.supply_duration >= 0.0) {
            return Err(PlanError::InvalidRequest(format!(
                "supplyDuration must be non-negative, got {}",
                p.supply_duration
            )));
        }
        Ok(())
    }
}
