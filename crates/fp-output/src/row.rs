//! Plain data row types written by output backends, flattened from a
//! [`ScheduleResult`].

use fp_sim::ScheduleResult;

/// One point of one machine's trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPointRow {
    pub machine_id: u32,
    /// Position of the point within the machine's path.
    pub seq:        u32,
    pub x:          f64,
    pub y:          f64,
    pub timestamp:  f64,
    pub action:     &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyEventRow {
    pub machine_id: u32,
    pub seq:        u32,
    pub time:       f64,
    pub duration:   f64,
}

/// Fleet-wide totals, one row per plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub machines:            u32,
    pub total_time_hours:    f64,
    pub efficiency:          f64,
    pub total_supply_events: u64,
    pub total_distance:      f64,
    pub road_nodes:          u64,
    pub base_x:              f64,
    pub base_y:              f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadNodeRow {
    pub node: u32,
    pub x:    f64,
    pub y:    f64,
}

/// Every row of one result, grouped by table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRows {
    pub paths:         Vec<PathPointRow>,
    pub supply_events: Vec<SupplyEventRow>,
    pub summary:       SummaryRow,
    pub road_network:  Vec<RoadNodeRow>,
}

impl ResultRows {
    pub fn from_result(result: &ScheduleResult) -> Self {
        let mut paths = Vec::new();
        let mut supply_events = Vec::new();
        for m in &result.machines {
            paths.extend(m.path.iter().enumerate().map(|(i, p)| PathPointRow {
                machine_id: m.machine_id,
                seq:        i as u32,
                x:          p.x,
                y:          p.y,
                timestamp:  p.timestamp,
                action:     p.action.as_str(),
            }));
            supply_events.extend(m.supply_events.iter().enumerate().map(|(i, e)| SupplyEventRow {
                machine_id: m.machine_id,
                seq:        i as u32,
                time:       e.time,
                duration:   e.duration,
            }));
        }

        let road_network = result
            .road_network
            .iter()
            .enumerate()
            .map(|(i, p)| RoadNodeRow { node: i as u32, x: p.x, y: p.y })
            .collect();

        let summary = SummaryRow {
            machines:            result.machines.len() as u32,
            total_time_hours:    result.total_time,
            efficiency:          result.efficiency,
            total_supply_events: result.total_supply_events as u64,
            total_distance:      result.machines.iter().map(|m| m.distance).sum(),
            road_nodes:          result.road_network.len() as u64,
            base_x:              result.base_station.x,
            base_y:              result.base_station.y,
        };

        Self { paths, supply_events, summary, road_network }
    }
}
