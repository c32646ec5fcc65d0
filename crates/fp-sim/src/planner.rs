//! The `Planner` and its tick loop.

use tracing::{debug, info};

use fp_core::{MachineId, PlannerConfig, Point, SECS_PER_HOUR, SimClock, Tick};
use fp_spatial::{DijkstraRouter, RoadNetwork, Router, build_road_network, coverage_path, shortest_path};

use crate::action::{Action, SupplyEvent};
use crate::efficiency::efficiency;
use crate::policy::{AssignmentPolicy, policy_for};
use crate::request::{Parameters, ScheduleRequest};
use crate::result::{MachineRoute, ScheduleResult, machine_color};
use crate::state::{FieldWorkState, MachineState};
use crate::{NoopObserver, PlanObserver};

// ── Planner ───────────────────────────────────────────────────────────────────

/// Plans one request at a time.  Holds no per-request state, so a single
/// planner may serve many requests, concurrently if `R` allows.
///
/// Each call to [`plan`](Self::plan):
///
/// 1. Snaps the base station and builds the road network.
/// 2. Runs the tick loop.  On every tick, machines free at or before the
///    tick start are offered a field by the assignment policy, resupply if
///    low, travel to the field entry and work a budget of coverage.
/// 3. Sends every machine not at the base home.
/// 4. Scores the schedule.
///
/// Create via [`PlannerBuilder`][crate::PlannerBuilder] or [`Planner::new`].
pub struct Planner<R: Router = DijkstraRouter> {
    pub(crate) config: PlannerConfig,
    pub(crate) router: R,
    pub(crate) policy: Box<dyn AssignmentPolicy>,
}

impl Planner<DijkstraRouter> {
    /// Planner with the default router and the configured assignment policy.
    pub fn new(config: PlannerConfig) -> crate::PlanResult<Self> {
        crate::PlannerBuilder::new(config).build()
    }
}

impl Default for Planner<DijkstraRouter> {
    fn default() -> Self {
        let config = PlannerConfig::default();
        let policy = policy_for(config.assignment);
        Self { config, router: DijkstraRouter, policy }
    }
}

impl<R: Router> Planner<R> {
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Plan `request`.  Never fails; see [`ScheduleRequest::validate`].
    pub fn plan(&self, request: &ScheduleRequest) -> ScheduleResult {
        self.plan_with(request, &mut NoopObserver)
    }

    /// Plan `request`, reporting progress to `observer`.
    pub fn plan_with<O: PlanObserver>(&self, request: &ScheduleRequest, observer: &mut O) -> ScheduleResult {
        let base = request.base_station.snapped();
        if request.fields.is_empty() {
            info!(%base, "no fields; nothing to plan");
            observer.on_plan_end(Tick::ZERO, 0);
            return ScheduleResult::empty(base);
        }

        let network = build_road_network(&request.fields, base, &self.config);
        let mut run = Run {
            config: &self.config,
            policy: self.policy.as_ref(),
            legs:   Legs { network: &network, router: &self.router, speed: self.config.travel_speed_mps },
            base,
            params: request.parameters,
            machines: (0..request.machine_count)
                .map(|i| MachineState::new(MachineId(i), request.parameters.machine_capacity, base))
                .collect(),
            fields: request.fields.iter().copied().map(FieldWorkState::new).collect(),
        };

        let final_tick = run.tick_loop(observer);
        run.return_home();

        let completed = run.fields.iter().filter(|f| f.done).count();
        observer.on_plan_end(final_tick, completed);
        run.into_result(completed)
    }
}

// ── Travel legs ───────────────────────────────────────────────────────────────

struct Legs<'a, R: Router> {
    network: &'a RoadNetwork,
    router:  &'a R,
    speed:   f64,
}

impl<R: Router> Legs<'_, R> {
    /// Move `machine` to `target` over the road network.
    ///
    /// Every point after the current position is stamped by its cumulative
    /// distance from the start; the last point is tagged `last_action`, all
    /// others `action`.  Returns
    /// `false` without recording anything if the machine is already there.
    fn travel(&self, machine: &mut MachineState, target: Point, action: Action, last_action: Action) -> bool {
        if machine.is_at(target) {
            return false;
        }
        let leg = shortest_path(self.network, self.router, machine.position, target)
            .anchored(machine.position, target);

        let t0 = machine.time;
        let last = leg.points.len() - 1;
        for (i, (&p, d)) in leg.points.iter().zip(leg.cumulative_lengths()).enumerate().skip(1) {
            let tag = if i == last { last_action } else { action };
            machine.record(p, t0 + d / self.speed, tag);
        }
        machine.time = t0 + leg.duration_secs(self.speed);

        debug!(machine = %machine.id, %target, metres = leg.length, fallback = leg.fallback, %action, "travel leg");
        true
    }
}

// ── One planning run ──────────────────────────────────────────────────────────

struct Run<'a, R: Router> {
    config:   &'a PlannerConfig,
    policy:   &'a dyn AssignmentPolicy,
    legs:     Legs<'a, R>,
    base:     Point,
    params:   Parameters,
    machines: Vec<MachineState>,
    fields:   Vec<FieldWorkState>,
}

impl<R: Router> Run<'_, R> {
    fn tick_loop<O: PlanObserver>(&mut self, observer: &mut O) -> Tick {
        let mut clock = SimClock::new(self.config.tick_secs, self.config.horizon_secs);

        while !clock.expired() && self.fields.iter().any(|f| !f.done) {
            let tick = clock.current_tick;
            let now = clock.elapsed_secs() as f64;
            observer.on_tick_start(tick);

            for m in 0..self.machines.len() {
                if self.machines[m].time > now {
                    continue;
                }
                self.machines[m].idle_until(now);

                let Some(f) = self.policy.select(&self.machines[m], &self.fields, self.base) else {
                    continue;
                };
                let (machine_id, field_id) = (self.machines[m].id, self.fields[f].field.id);
                debug!(
                    %clock,
                    machine = %machine_id,
                    field = %field_id,
                    policy = self.policy.name(),
                    "assignment"
                );
                observer.on_assignment(tick, machine_id, field_id);
                self.visit(m, f, observer);
            }
            clock.advance();
        }
        clock.current_tick
    }

    /// Resupply if needed, then work one budget of field `f` with machine `m`.
    fn visit<O: PlanObserver>(&mut self, m: usize, f: usize, observer: &mut O) {
        let config = self.config;
        let base = self.base;
        let machine = &mut self.machines[m];
        let field = &mut self.fields[f];

        // ── resupply ──────────────────────────────────────────────────────
        if machine.capacity < config.resupply_threshold {
            self.legs.travel(machine, base, Action::RoadTravel, Action::RoadTravel);
            let start = machine.time;
            observer.on_supply(machine.id, start);
            machine.record(base, start, Action::Supply);
            machine.supply_events.push(SupplyEvent { time: start, duration: self.params.supply_duration });
            machine.time += self.params.supply_duration;
            machine.capacity = self.params.machine_capacity;
            machine.record(base, machine.time, Action::SupplyComplete);
            debug!(machine = %machine.id, time = start, "resupplied");
        }

        // ── travel to the entry point ─────────────────────────────────────
        let entry = field.entry_point(base);
        if !self.legs.travel(machine, entry, Action::RoadTravel, Action::FieldStart) {
            machine.record(entry, machine.time, Action::FieldStart);
        }

        // ── work ──────────────────────────────────────────────────────────
        let budget = field.remaining().min(machine.capacity);
        if budget <= f64::EPSILON {
            debug!(machine = %machine.id, field = %field.field.id, "no capacity to work");
            return;
        }
        let points = coverage_path(&field.field, field.completed, budget, config.row_spacing);
        let n = points.len() as f64;
        let cost = budget / n;
        let secs_per_point = budget * config.field_work_secs / n;
        let last = points.len() - 1;

        for (k, p) in points.into_iter().enumerate() {
            machine.capacity -= cost;
            machine.time += secs_per_point;
            field.work_path.push(p);

            if field.advance(cost, config.completion_threshold) {
                machine.record(p, machine.time, Action::Working);
                info!(field = %field.field.id, machine = %machine.id, time = machine.time, "field complete");
                return;
            }
            if k == last && machine.capacity < config.capacity_floor {
                machine.record(p, machine.time, Action::CapacityFull);
                field.last_work_position = Some(p);
                debug!(
                    machine = %machine.id,
                    field = %field.field.id,
                    completed = field.completed,
                    "capacity exhausted; returning to base"
                );
                self.legs.travel(machine, base, Action::EmergencyRoadTravel, Action::EmergencyRoadTravel);
                return;
            }
            machine.record(p, machine.time, Action::Working);
        }
        field.last_work_position = field.work_path.last().copied();
    }

    /// Send every machine that is away from the base home.
    fn return_home(&mut self) {
        for machine in &mut self.machines {
            self.legs.travel(machine, self.base, Action::RoadTravel, Action::Return);
        }
    }

    fn into_result(self, completed: usize) -> ScheduleResult {
        let machines: Vec<MachineRoute> = self
            .machines
            .into_iter()
            .enumerate()
            .map(|(i, m)| MachineRoute {
                machine_id:    m.id.0 + 1,
                path:          m.path,
                color:         machine_color(i).to_owned(),
                supply_events: m.supply_events,
                distance:      m.distance,
            })
            .collect();

        let finish_times: Vec<f64> = machines.iter().map(MachineRoute::finish_time).collect();
        let latest = finish_times.iter().copied().fold(0.0, f64::max);
        let total_supply_events = machines.iter().map(|m| m.supply_events.len()).sum();
        let score = efficiency(&finish_times, completed, self.fields.len());

        info!(
            machines = machines.len(),
            fields = self.fields.len(),
            completed,
            hours = latest / SECS_PER_HOUR,
            efficiency = score,
            supply_events = total_supply_events,
            "plan complete"
        );

        ScheduleResult {
            machines,
            total_time: latest / SECS_PER_HOUR,
            efficiency: score,
            total_supply_events,
            base_station: self.base,
            road_network: self.legs.network.node_pos.clone(),
        }
    }
}
