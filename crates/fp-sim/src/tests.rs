//! Unit and scenario tests for fp-sim.

use fp_core::{AssignmentKind, Field, FieldId, MachineId, PlannerConfig, Point, Tick};

use crate::{
    Action, AssignmentPolicy, FieldWorkState, FirstIncompleteFieldPolicy, LargestFieldFirstPolicy,
    MachineState, NearestFieldPolicy, Parameters, PlanError, PlanObserver, Planner, PlannerBuilder,
    ScheduleRequest, ScheduleResult, efficiency,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn field(id: u32, x: f64, y: f64, w: f64, h: f64) -> Field {
    Field::new(FieldId(id), x, y, w, h)
}

fn request(machines: u32, fields: Vec<Field>, base: Point, capacity: f64) -> ScheduleRequest {
    ScheduleRequest {
        machine_count: machines,
        fields,
        base_station: base,
        parameters: Parameters { machine_capacity: capacity, supply_duration: 30.0 },
    }
}

/// The reference scenario: one 100 × 80 field with the base at its centre.
fn single_field_request(capacity: f64) -> ScheduleRequest {
    request(1, vec![field(1, 0.0, 0.0, 100.0, 80.0)], Point::new(50.0, 40.0), capacity)
}

fn planner() -> Planner {
    Planner::default()
}

fn actions(result: &ScheduleResult, machine: usize) -> Vec<Action> {
    result.machines[machine].path.iter().map(|p| p.action).collect()
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn full_capacity_covers_the_field_in_one_visit() {
        let result = planner().plan(&single_field_request(1.0));

        assert_eq!(result.machines.len(), 1);
        let route = &result.machines[0];
        assert_eq!(route.machine_id, 1);
        assert_eq!(route.path[0].action, Action::Start);
        assert_eq!(route.path.last().map(|p| p.action), Some(Action::Return));
        assert!(route.supply_events.is_empty());
        assert_eq!(result.total_supply_events, 0);
        assert_eq!(route.count(Action::CapacityFull), 0);
        assert_eq!(route.count(Action::FieldStart), 1);
        // Complete single-machine schedule: perfect balance.
        assert!((result.efficiency - 1.0).abs() < 1e-12);
    }

    #[test]
    fn half_capacity_resupplies_once() {
        let result = planner().plan(&single_field_request(0.5));
        let route = &result.machines[0];

        assert_eq!(route.count(Action::CapacityFull), 1);
        assert_eq!(route.supply_events.len(), 1);
        assert_eq!(result.total_supply_events, 1);
        assert_eq!(route.count(Action::FieldStart), 2);
        assert!((result.efficiency - 1.0).abs() < 1e-12, "field must be complete");

        let seq = actions(&result, 0);
        let full = seq.iter().position(|&a| a == Action::CapacityFull).unwrap();
        let supply = seq.iter().position(|&a| a == Action::Supply).unwrap();
        let done = seq.iter().rposition(|&a| a == Action::Working).unwrap();
        assert!(full < supply && supply < done);
        assert_eq!(seq[full + 1], Action::EmergencyRoadTravel);
        assert_eq!(seq[supply + 1], Action::SupplyComplete);
        assert_eq!(seq.last(), Some(&Action::Return));
    }

    #[test]
    fn supply_event_matches_trace() {
        let result = planner().plan(&single_field_request(0.5));
        let route = &result.machines[0];
        let event = route.supply_events[0];
        let supply = route.path.iter().find(|p| p.action == Action::Supply).unwrap();
        let done = route.path.iter().find(|p| p.action == Action::SupplyComplete).unwrap();

        assert_eq!(event.duration, 30.0);
        assert_eq!(supply.timestamp, event.time);
        assert!((done.timestamp - event.time - 30.0).abs() < 1e-9);
        // Resupply happens at the snapped base station.
        assert_eq!(supply.point(), result.base_station);
    }

    #[test]
    fn resumed_visit_enters_where_the_last_one_stopped() {
        let result = planner().plan(&single_field_request(0.5));
        let path = &result.machines[0].path;
        let stop = path.iter().find(|p| p.action == Action::CapacityFull).unwrap();
        let second_start = path.iter().filter(|p| p.action == Action::FieldStart).nth(1).unwrap();
        assert_eq!(second_start.point(), stop.point());
    }

    #[test]
    fn timestamps_never_decrease() {
        for capacity in [1.0, 0.5, 0.3] {
            let result = planner().plan(&single_field_request(capacity));
            for w in result.machines[0].path.windows(2) {
                assert!(w[1].timestamp >= w[0].timestamp, "{:?} then {:?}", w[0], w[1]);
            }
        }
    }

    #[test]
    fn road_legs_are_stamped_by_distance_over_speed() {
        let speed = PlannerConfig::default().travel_speed_mps;
        let result = planner().plan(&single_field_request(1.0));
        let path = &result.machines[0].path;
        let entry = path.iter().position(|p| p.action == Action::FieldStart).unwrap();
        assert!(entry >= 1);

        for w in path[..=entry].windows(2) {
            let metres = w[0].point().distance(w[1].point());
            assert!(metres > 0.0, "repeated point {:?}", w[1]);
            assert!((w[1].timestamp - w[0].timestamp - metres / speed).abs() < 1e-9);
        }
        assert!(path[1..entry].iter().all(|p| p.action == Action::RoadTravel));
    }

    #[test]
    fn total_time_is_latest_finish_in_hours() {
        let result = planner().plan(&single_field_request(0.5));
        let finish = result.machines[0].finish_time();
        assert!(finish > 0.0);
        assert!((result.total_time - finish / 3_600.0).abs() < 1e-12);
    }

    #[test]
    fn distance_includes_field_rows() {
        let result = planner().plan(&single_field_request(1.0));
        // 16 rows of 100 m each, plus row changes and road legs.
        assert!(result.machines[0].distance > 1_600.0);
    }

    #[test]
    fn empty_fields_yield_zero_result() {
        let req = request(3, vec![], Point::new(49.6, 40.4), 1.0);
        let result = planner().plan(&req);

        assert!(result.machines.is_empty());
        assert_eq!(result.total_time, 0.0);
        assert_eq!(result.efficiency, 0.0);
        assert_eq!(result.total_supply_events, 0);
        assert!(result.road_network.is_empty());
        assert_eq!(result.base_station, Point::new(50.0, 40.0));
    }

    #[test]
    fn zero_machines_leave_fields_untouched() {
        let req = request(0, vec![field(1, 0.0, 0.0, 40.0, 40.0)], Point::new(-30.0, -30.0), 1.0);
        let result = planner().plan(&req);

        assert!(result.machines.is_empty());
        assert_eq!(result.efficiency, 0.0);
        assert_eq!(result.total_time, 0.0);
        assert!(!result.road_network.is_empty());
    }

    #[test]
    fn two_machines_split_two_fields() {
        let req = request(
            2,
            vec![field(1, 0.0, 0.0, 60.0, 40.0), field(2, 100.0, 0.0, 60.0, 40.0)],
            Point::new(80.0, -20.0),
            1.0,
        );
        let result = planner().plan(&req);

        assert_eq!(result.machines.len(), 2);
        assert_eq!(result.machines[0].machine_id, 1);
        assert_eq!(result.machines[1].machine_id, 2);
        assert_eq!(result.machines[0].color, "#3b82f6");
        assert_eq!(result.machines[1].color, "#ef4444");
        for m in 0..2 {
            assert_eq!(result.machines[m].count(Action::FieldStart), 1);
            assert_eq!(actions(&result, m).last(), Some(&Action::Return));
        }
        assert!((0.5..=1.0).contains(&result.efficiency));
    }

    #[test]
    fn idle_machine_stays_at_base() {
        let req = request(3, vec![field(1, 0.0, 0.0, 40.0, 40.0)], Point::new(-30.0, -30.0), 1.0);
        let result = planner().plan(&req);

        assert_eq!(result.machines.len(), 3);
        for m in 1..3 {
            assert_eq!(actions(&result, m), vec![Action::Start]);
            assert_eq!(result.machines[m].distance, 0.0);
        }
        // One machine did all the work: unbalanced, but complete.
        assert!((result.efficiency - 0.5).abs() < 1e-12);
    }

    #[test]
    fn horizon_stops_the_loop_with_partial_result() {
        let config = PlannerConfig { horizon_secs: 60, ..PlannerConfig::default() };
        let planner = Planner::new(config).unwrap();
        let result = planner.plan(&single_field_request(0.5));
        let route = &result.machines[0];

        assert_eq!(route.count(Action::CapacityFull), 1);
        assert!(route.supply_events.is_empty());
        // The emergency trip already ended at the base; no return leg.
        assert_eq!(route.path.last().map(|p| p.action), Some(Action::EmergencyRoadTravel));
        assert_eq!(route.path.last().map(|p| p.point()), Some(result.base_station));
        assert_eq!(result.efficiency, 0.0);
    }

    #[test]
    fn identical_requests_plan_identically() {
        let req = request(
            2,
            vec![field(1, 0.0, 0.0, 60.0, 40.0), field(2, 85.0, 5.0, 33.0, 47.0)],
            Point::new(-7.0, 60.0),
            0.4,
        );
        let planner = planner();
        assert_eq!(planner.plan(&req), planner.plan(&req));
    }
}

// ── Policies ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod policies {
    use super::*;

    fn states() -> Vec<FieldWorkState> {
        vec![
            FieldWorkState::new(field(1, 0.0, 0.0, 20.0, 20.0)),
            FieldWorkState::new(field(2, 200.0, 0.0, 50.0, 50.0)),
            FieldWorkState::new(field(3, 100.0, 0.0, 30.0, 30.0)),
        ]
    }

    fn machine_at(p: Point) -> MachineState {
        MachineState::new(MachineId(0), 1.0, p)
    }

    #[test]
    fn first_incomplete_skips_done_fields() {
        let mut fields = states();
        let m = machine_at(Point::new(0.0, 0.0));
        assert_eq!(FirstIncompleteFieldPolicy.select(&m, &fields, m.position), Some(0));
        fields[0].done = true;
        assert_eq!(FirstIncompleteFieldPolicy.select(&m, &fields, m.position), Some(1));
    }

    #[test]
    fn nearest_uses_entry_points() {
        let fields = states();
        let m = machine_at(Point::new(135.0, 0.0));
        let base = Point::new(0.0, -10.0);
        // Field 3's nearest-to-base corner (100, 0) is 35 m away.
        assert_eq!(NearestFieldPolicy.select(&m, &fields, base), Some(2));
    }

    #[test]
    fn nearest_prefers_resume_position() {
        let mut fields = states();
        fields[1].last_work_position = Some(Point::new(210.0, 5.0));
        let m = machine_at(Point::new(205.0, 5.0));
        assert_eq!(NearestFieldPolicy.select(&m, &fields, Point::new(0.0, 0.0)), Some(1));
    }

    #[test]
    fn largest_first_uses_remaining_area() {
        let mut fields = states();
        let m = machine_at(Point::new(0.0, 0.0));
        assert_eq!(LargestFieldFirstPolicy.select(&m, &fields, m.position), Some(1));
        // 2500 m² × 0.2 = 500 m² left, below field 3's 900 m².
        fields[1].completed = 0.8;
        assert_eq!(LargestFieldFirstPolicy.select(&m, &fields, m.position), Some(2));
    }

    #[test]
    fn all_done_selects_nothing() {
        let mut fields = states();
        for f in &mut fields {
            f.done = true;
        }
        let m = machine_at(Point::new(0.0, 0.0));
        let policies: [&dyn AssignmentPolicy; 3] =
            [&FirstIncompleteFieldPolicy, &NearestFieldPolicy, &LargestFieldFirstPolicy];
        for p in policies {
            assert_eq!(p.select(&m, &fields, m.position), None, "{}", p.name());
        }
    }

    #[test]
    fn config_selects_policy() {
        let config = PlannerConfig { assignment: AssignmentKind::LargestFirst, ..PlannerConfig::default() };
        assert_eq!(Planner::new(config).unwrap().policy_name(), "largest_first");
        assert_eq!(planner().policy_name(), "first_incomplete");
    }

    #[test]
    fn builder_policy_overrides_config() {
        let planner = PlannerBuilder::new(PlannerConfig::default())
            .policy(NearestFieldPolicy)
            .build()
            .unwrap();
        assert_eq!(planner.policy_name(), "nearest");
    }

    #[test]
    fn every_policy_completes_the_fields() {
        for kind in [AssignmentKind::FirstIncomplete, AssignmentKind::Nearest, AssignmentKind::LargestFirst] {
            let config = PlannerConfig { assignment: kind, ..PlannerConfig::default() };
            let req = request(
                2,
                vec![
                    field(1, 0.0, 0.0, 40.0, 30.0),
                    field(2, 60.0, 0.0, 70.0, 50.0),
                    field(3, 0.0, 50.0, 30.0, 30.0),
                ],
                Point::new(45.0, 90.0),
                0.6,
            );
            let result = Planner::new(config).unwrap().plan(&req);
            assert!((0.5..=1.0).contains(&result.efficiency), "{kind}: {}", result.efficiency);
        }
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod state {
    use super::*;

    #[test]
    fn completion_clamps_and_clears_resume_point() {
        let mut f = FieldWorkState::new(field(1, 0.0, 0.0, 10.0, 10.0));
        f.last_work_position = Some(Point::new(5.0, 5.0));
        assert!(!f.advance(0.5, 0.99));
        assert!(f.advance(0.495, 0.99));
        assert!(f.done);
        assert_eq!(f.completed, 1.0);
        assert_eq!(f.remaining(), 0.0);
        assert_eq!(f.last_work_position, None);
    }

    #[test]
    fn entry_point_defaults_to_corner_nearest_base() {
        let f = FieldWorkState::new(field(1, 10.0, 10.0, 20.0, 20.0));
        assert_eq!(f.entry_point(Point::new(100.0, 0.0)), Point::new(30.0, 10.0));
    }

    #[test]
    fn record_accumulates_distance() {
        let mut m = MachineState::new(MachineId(0), 1.0, Point::new(0.0, 0.0));
        m.record(Point::new(3.0, 4.0), 1.0, Action::RoadTravel);
        m.record(Point::new(3.0, 10.0), 2.0, Action::RoadTravel);
        assert_eq!(m.distance, 11.0);
        assert_eq!(m.path.len(), 3);
        assert_eq!(m.last_action(), Some(Action::RoadTravel));
    }

    #[test]
    fn idle_never_rewinds() {
        let mut m = MachineState::new(MachineId(0), 1.0, Point::new(0.0, 0.0));
        m.time = 90.0;
        m.idle_until(60.0);
        assert_eq!(m.time, 90.0);
        m.idle_until(120.0);
        assert_eq!(m.time, 120.0);
    }
}

// ── Efficiency ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scoring {
    use super::*;

    #[test]
    fn equal_times_score_completion_rate() {
        assert_eq!(efficiency(&[100.0, 100.0], 2, 2), 1.0);
        assert_eq!(efficiency(&[100.0, 100.0], 1, 2), 0.5);
    }

    #[test]
    fn balance_floors_at_half() {
        assert!((efficiency(&[0.0, 100.0], 1, 1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn mild_imbalance_scores_between() {
        // mean 100, variance 100: 1 − 100 / 10001.
        let e = efficiency(&[90.0, 110.0], 3, 3);
        assert!((e - (1.0 - 100.0 / 10_001.0)).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs_score_zero() {
        assert_eq!(efficiency(&[], 0, 3), 0.0);
        assert_eq!(efficiency(&[10.0], 0, 0), 0.0);
        assert_eq!(efficiency(&[10.0], 0, 4), 0.0);
    }
}

// ── Request / result wire format ──────────────────────────────────────────────

#[cfg(test)]
mod wire {
    use super::*;

    const REQUEST: &str = r#"{
        "machineCount": 2,
        "fields": [{ "id": 7, "x": 0, "y": 0, "width": 100, "height": 80 }],
        "baseStation": { "x": 50.4, "y": -20 },
        "parameters": { "machineCapacity": 0.5, "supplyDuration": 30 }
    }"#;

    #[test]
    fn request_parses_camel_case() {
        let req: ScheduleRequest = serde_json::from_str(REQUEST).unwrap();
        assert_eq!(req.machine_count, 2);
        assert_eq!(req.fields[0].id, FieldId(7));
        assert_eq!(req.parameters.machine_capacity, 0.5);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_parameters() {
        let mut req: ScheduleRequest = serde_json::from_str(REQUEST).unwrap();
        req.parameters.machine_capacity = 0.0;
        assert!(matches!(req.validate(), Err(PlanError::InvalidRequest(_))));

        let mut req: ScheduleRequest = serde_json::from_str(REQUEST).unwrap();
        req.parameters.supply_duration = -1.0;
        assert!(matches!(req.validate(), Err(PlanError::InvalidRequest(_))));

        let mut req: ScheduleRequest = serde_json::from_str(REQUEST).unwrap();
        req.base_station = Point::new(f64::NAN, 0.0);
        assert!(matches!(req.validate(), Err(PlanError::InvalidRequest(_))));
    }

    #[test]
    fn validation_rejects_degenerate_field() {
        let mut req: ScheduleRequest = serde_json::from_str(REQUEST).unwrap();
        req.fields[0].width = 0.0;
        assert!(matches!(req.validate(), Err(PlanError::Core(_))));
    }

    #[test]
    fn result_serializes_camel_case_and_snake_case_actions() {
        let req: ScheduleRequest = serde_json::from_str(REQUEST).unwrap();
        let result = planner().plan(&req);
        let json = serde_json::to_value(&result).unwrap();

        for key in ["machines", "totalTime", "efficiency", "totalSupplyEvents", "baseStation", "roadNetwork"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        let machine = &json["machines"][0];
        assert_eq!(machine["machineId"], 1);
        assert!(machine["supplyEvents"].is_array());
        assert_eq!(machine["path"][0]["action"], "start");
        assert_eq!(json["baseStation"]["x"], 50.0);
    }

    #[test]
    fn result_text_round_trip_is_exact() {
        let result = planner().plan(&single_field_request(0.5));
        let text = serde_json::to_string_pretty(&result).unwrap();
        let parsed: ScheduleResult = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.total_time.to_bits(), result.total_time.to_bits());
        assert_eq!(parsed, result);
    }

    #[test]
    fn action_names_are_snake_case() {
        assert_eq!(serde_json::to_string(&Action::CapacityFull).unwrap(), "\"capacity_full\"");
        assert_eq!(serde_json::to_string(&Action::EmergencyRoadTravel).unwrap(), "\"emergency_road_travel\"");
        let a: Action = serde_json::from_str("\"supply_complete\"").unwrap();
        assert_eq!(a, Action::SupplyComplete);
        assert_eq!(Action::RoadTravel.to_string(), "road_travel");
    }
}

// ── Builder and observer ──────────────────────────────────────────────────────

#[cfg(test)]
mod hooks {
    use super::*;

    #[derive(Default)]
    struct Counter {
        ticks:       usize,
        assignments: Vec<(MachineId, FieldId)>,
        supplies:    usize,
        ended:       Option<(Tick, usize)>,
    }

    impl PlanObserver for Counter {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.ticks += 1;
        }
        fn on_assignment(&mut self, _tick: Tick, machine: MachineId, field: FieldId) {
            self.assignments.push((machine, field));
        }
        fn on_supply(&mut self, _machine: MachineId, _time: f64) {
            self.supplies += 1;
        }
        fn on_plan_end(&mut self, final_tick: Tick, completed: usize) {
            self.ended = Some((final_tick, completed));
        }
    }

    #[test]
    fn observer_sees_assignments_and_supply() {
        let mut counter = Counter::default();
        planner().plan_with(&single_field_request(0.5), &mut counter);

        assert_eq!(counter.assignments, vec![(MachineId(0), FieldId(1)); 2]);
        assert_eq!(counter.supplies, 1);
        let (final_tick, completed) = counter.ended.unwrap();
        assert_eq!(completed, 1);
        assert_eq!(final_tick.0 as usize, counter.ticks);
    }

    #[test]
    fn observer_notified_for_empty_request() {
        let mut counter = Counter::default();
        planner().plan_with(&request(1, vec![], Point::new(0.0, 0.0), 1.0), &mut counter);
        assert_eq!(counter.ticks, 0);
        assert_eq!(counter.ended, Some((Tick::ZERO, 0)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PlannerConfig { tick_secs: 0, ..PlannerConfig::default() };
        assert!(matches!(PlannerBuilder::new(config).build(), Err(PlanError::Core(_))));
    }
}
