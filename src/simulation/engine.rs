//! Run context and entry points
//!
//! A [`SimulationEngine`] owns everything one run touches: the clock, the
//! attendant pool, the event scheduler, the random number generator and the
//! outcome log. Nothing is shared between runs.
//!
//! The arrival process is driven lazily. Each generator resumption hands the
//! passenger to the counter at the current clock and then plans the next
//! resumption, so arrivals are interleaved with service completions in time
//! order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::arrivals::{ArrivalEvent, ArrivalProcess, FlightArrivals, PerDayArrivals, PlannedArrival};
use crate::schedule::{parse_schedule, ScheduleEntry, ScheduleGenerator};
use crate::service::{ActiveService, Admission, AdmissionProtocol, OutcomeLog, ServerPool, ServiceOutcome};
use crate::sim_event;
use crate::simulation::{EventScheduler, SimResult, SimulationClock, SimulationResult};
use crate::types::{
    ArrivalModel, ArrivalTimestamping, ConfigValidationError, FlightOrdering, HorizonPolicy,
    PassengerIdSequence, SimulationConfig,
};

/// Knobs shared by both arrival models
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunOptions {
    /// Seed for reproducible runs; `None` draws from entropy
    pub seed: Option<u64>,
    /// Timestamp interpretation for the per-day model
    pub timestamping: ArrivalTimestamping,
    /// Emission order for the flight model
    pub flight_ordering: FlightOrdering,
    /// Handling of services still running at the horizon
    pub horizon_policy: HorizonPolicy,
}

impl RunOptions {
    /// Default options with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Default::default() }
    }
}

impl From<&SimulationConfig> for RunOptions {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            seed: config.seed,
            timestamping: config.timestamping,
            flight_ordering: config.flight_ordering,
            horizon_policy: config.horizon_policy,
        }
    }
}

/// Parameters of the per-day arrival model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerDayParams {
    /// Number of simulated days
    pub num_days: i64,
    /// Number of attendants
    pub num_attendants: i64,
    /// Mean passengers per day
    pub avg_passengers_per_day: f64,
    /// Mean service time in hours
    pub avg_service_time: f64,
}

impl From<&SimulationConfig> for PerDayParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            num_days: config.num_days,
            num_attendants: config.num_attendants,
            avg_passengers_per_day: config.avg_passengers_per_day,
            avg_service_time: config.avg_service_time,
        }
    }
}

/// Resumptions waiting on the scheduler
#[derive(Debug, Clone, Copy)]
enum EngineEvent {
    /// The arrival process wakes up to spawn its planned passenger
    Resume(PlannedArrival),
    /// A spawned passenger asks for an attendant
    Arrive(ArrivalEvent),
    /// A service finishes and frees its attendant
    Complete(ActiveService),
}

impl EngineEvent {
    /// Tie-break at equal times: passengers reach the counter before
    /// attendants that finish at the same instant are released
    fn rank(&self) -> u8 {
        match self {
            EngineEvent::Resume(_) | EngineEvent::Arrive(_) => 0,
            EngineEvent::Complete(_) => 1,
        }
    }
}

/// Single-threaded discrete-event run over one arrival process
#[derive(Debug)]
pub struct SimulationEngine<P, R> {
    process: P,
    protocol: AdmissionProtocol,
    horizon_policy: HorizonPolicy,
    clock: SimulationClock,
    pool: ServerPool,
    scheduler: EventScheduler<EngineEvent>,
    rng: R,
    log: OutcomeLog,
    passengers: PassengerIdSequence,
}

impl<P: ArrivalProcess, R: Rng> SimulationEngine<P, R> {
    /// Create a run context with `attendants` idle attendants at hour zero
    pub fn new(
        process: P,
        protocol: AdmissionProtocol,
        attendants: usize,
        rng: R,
        horizon_policy: HorizonPolicy,
    ) -> Self {
        Self {
            process,
            protocol,
            horizon_policy,
            clock: SimulationClock::new(),
            pool: ServerPool::new(attendants),
            scheduler: EventScheduler::new(),
            rng,
            log: OutcomeLog::new(),
            passengers: PassengerIdSequence::new(),
        }
    }

    /// The run's clock
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// The run's attendant pool
    pub fn pool(&self) -> &ServerPool {
        &self.pool
    }

    /// Simulate up to the process horizon and aggregate the outcomes
    pub fn run(mut self) -> SimulationResult {
        let horizon = self.process.horizon_hours();
        sim_event!(
            info,
            "simulation run started",
            model = self.process.name(),
            horizon_hours = horizon,
            attendants = self.pool.capacity(),
        );

        self.plan_next_arrival();

        while let Some((time, event)) = self.scheduler.pop_before(horizon) {
            self.clock.advance_to(time);
            match event {
                EngineEvent::Resume(planned) => {
                    let arrival = ArrivalEvent {
                        passenger: self.passengers.issue(),
                        arrival_time: planned.arrival_time,
                    };
                    // Queued behind the generator so the next arrival is planned first
                    let now = self.clock.now();
                    self.push(now, EngineEvent::Arrive(arrival));
                    self.plan_next_arrival();
                }
                EngineEvent::Arrive(arrival) => self.admit(arrival),
                EngineEvent::Complete(service) => self.complete(service),
            }
        }

        let unresolved = self.settle_horizon();
        let arrivals = self.passengers.issued();
        let result = SimulationResult::from_log(
            self.log,
            horizon,
            self.pool.capacity(),
            self.protocol.mean_service_time(),
            arrivals,
            unresolved,
        );

        sim_event!(
            info,
            "simulation run finished",
            arrivals = result.arrivals,
            attended = result.attended.len(),
            denied = result.denied.len(),
            unresolved = result.unresolved,
            utilization = result.utilization,
        );
        result
    }

    fn plan_next_arrival(&mut self) {
        let now = self.clock.now();
        if let Some(planned) = self.process.next_arrival(now, &mut self.rng) {
            self.push(planned.spawn_at, EngineEvent::Resume(planned));
        }
    }

    fn push(&mut self, time: f64, event: EngineEvent) {
        self.scheduler.schedule_ranked(time, event.rank(), event);
    }

    fn admit(&mut self, arrival: ArrivalEvent) {
        let now = self.clock.now();
        match self.protocol.request(arrival, now, &mut self.pool, &mut self.rng) {
            Admission::Admitted(service) => {
                self.push(service.end_time, EngineEvent::Complete(service));
            }
            Admission::Rejected(denied) => self.log.push(ServiceOutcome::Denied(denied)),
        }
    }

    fn complete(&mut self, service: ActiveService) {
        let record = self.protocol.complete(service, &mut self.pool);
        self.log.push(ServiceOutcome::Attended(record));
    }

    /// Resolve whatever is still pending at the horizon; returns the dropped service count
    fn settle_horizon(&mut self) -> u64 {
        let pending = self.scheduler.drain_ordered();
        let mut unresolved = 0;

        for (time, event) in pending {
            // Resumptions at or past the horizon never spawn their passenger
            let EngineEvent::Complete(service) = event else {
                continue;
            };
            match self.horizon_policy {
                HorizonPolicy::Drain => {
                    self.clock.advance_to(time);
                    self.complete(service);
                }
                HorizonPolicy::Truncate => unresolved += 1,
            }
        }

        if unresolved > 0 {
            debug!(unresolved, "services cut off at the horizon");
        }
        unresolved
    }
}

/// Build the run's generator from an optional seed
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!("Using deterministic seed: {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => {
            debug!("Using entropy-based random seed");
            StdRng::from_entropy()
        }
    }
}

fn attendant_count(num_attendants: i64) -> Result<usize, ConfigValidationError> {
    usize::try_from(num_attendants)
        .map_err(|_| ConfigValidationError::NegativeAttendants(num_attendants))
}

/// Simulate the per-day arrival model
#[instrument(skip_all, fields(days = params.num_days, attendants = params.num_attendants))]
pub fn run_per_day(params: &PerDayParams, options: &RunOptions) -> SimResult<SimulationResult> {
    let attendants = attendant_count(params.num_attendants)?;
    let days = u64::try_from(params.num_days)
        .map_err(|_| ConfigValidationError::NegativeDays(params.num_days))?;
    let process =
        PerDayArrivals::new(days, params.avg_passengers_per_day, options.timestamping)?;
    let protocol = AdmissionProtocol::new(params.avg_service_time)?;

    let engine = SimulationEngine::new(
        process,
        protocol,
        attendants,
        seeded_rng(options.seed),
        options.horizon_policy,
    );
    Ok(engine.run())
}

/// Simulate the flight-schedule arrival model
#[instrument(skip_all, fields(flights = schedule.len(), attendants = num_attendants))]
pub fn run_flight_schedule(
    schedule: &[ScheduleEntry],
    num_attendants: i64,
    avg_service_time: f64,
    options: &RunOptions,
) -> SimResult<SimulationResult> {
    let attendants = attendant_count(num_attendants)?;
    let flights = parse_schedule(schedule)?;
    let protocol = AdmissionProtocol::new(avg_service_time)?;
    let process = FlightArrivals::new(flights, options.flight_ordering);

    let engine = SimulationEngine::new(
        process,
        protocol,
        attendants,
        seeded_rng(options.seed),
        options.horizon_policy,
    );
    Ok(engine.run())
}

/// Run whichever model a configuration selects
///
/// A flight-model configuration without a schedule runs on the randomized
/// reference departure board.
pub fn run_config(config: &SimulationConfig) -> SimResult<SimulationResult> {
    config.validate()?;
    let options = RunOptions::from(config);

    match config.model {
        ArrivalModel::PerDay => run_per_day(&PerDayParams::from(config), &options),
        ArrivalModel::FlightSchedule => {
            let generated;
            let schedule = match &config.schedule {
                Some(schedule) => schedule.as_slice(),
                None => {
                    generated = ScheduleGenerator::from_optional_seed(config.seed).generate();
                    info!(flights = generated.len(), "generated reference departure board");
                    generated.as_slice()
                }
            };
            run_flight_schedule(schedule, config.num_attendants, config.avg_service_time, &options)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Arrival process replaying fixed times
    struct Fixed(Vec<f64>);

    impl Fixed {
        fn new(times: &[f64]) -> Self {
            Self(times.iter().rev().copied().collect())
        }
    }

    impl ArrivalProcess for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn horizon_hours(&self) -> f64 {
            10.0
        }

        fn next_arrival<R: Rng + ?Sized>(&mut self, now: f64, _rng: &mut R) -> Option<PlannedArrival> {
            let time = self.0.pop()?;
            Some(PlannedArrival::at(time, now))
        }
    }

    fn per_day(days: i64, attendants: i64, avg: f64, service: f64) -> PerDayParams {
        PerDayParams {
            num_days: days,
            num_attendants: attendants,
            avg_passengers_per_day: avg,
            avg_service_time: service,
        }
    }

    #[test]
    fn test_per_day_conservation() {
        let result = run_per_day(&per_day(30, 3, 10.0, 3.0), &RunOptions::seeded(1)).unwrap();
        assert!(result.arrivals > 0);
        assert_eq!(result.unresolved, 0);
        assert_eq!(result.attended.len() + result.denied.len(), result.arrivals as usize);
    }

    #[test]
    fn test_truncate_counts_unresolved() {
        let options =
            RunOptions { horizon_policy: HorizonPolicy::Truncate, ..RunOptions::seeded(2) };
        let result = run_per_day(&per_day(20, 10, 10.0, 3.0), &options).unwrap();
        assert!(result.is_conserved());
        assert!(result.attended.iter().all(|record| record.end_time < result.horizon_hours));
    }

    #[test]
    fn test_negative_inputs_are_rejected() {
        let error = run_per_day(&per_day(-1, 3, 10.0, 3.0), &RunOptions::seeded(3)).unwrap_err();
        assert_eq!(error.category(), "Configuration");

        let error = run_flight_schedule(&[], -2, 3.0, &RunOptions::seeded(3)).unwrap_err();
        assert!(error.to_string().contains("attendants"));
    }

    #[test]
    fn test_completions_are_in_time_order() {
        let result = run_per_day(&per_day(15, 4, 12.0, 2.0), &RunOptions::seeded(4)).unwrap();
        let ends: Vec<f64> = result.attended.iter().map(|record| record.end_time).collect();
        assert!(ends.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_engine_with_custom_process() {
        let process = Fixed::new(&[1.0, 1.0, 2.0]);
        let protocol = AdmissionProtocol::new(0.0).unwrap();
        let engine = SimulationEngine::new(
            process,
            protocol,
            1,
            StdRng::seed_from_u64(5),
            HorizonPolicy::Drain,
        );
        assert_eq!(engine.pool().capacity(), 1);
        assert_eq!(engine.clock().now(), 0.0);

        let result = engine.run();
        assert_eq!(result.arrivals, 3);
        assert!(result.is_conserved());
        assert!(result.attended.iter().all(|record| record.service_duration() >= 0.0));
    }

    #[test]
    fn test_coincident_arrivals_with_instant_service() {
        // Two passengers at the same instant, one attendant, zero mean service:
        // the first holds the attendant while the second asks, so one is denied
        for seed in 0..200 {
            let engine = SimulationEngine::new(
                Fixed::new(&[1.0, 1.0]),
                AdmissionProtocol::new(0.0).unwrap(),
                1,
                StdRng::seed_from_u64(seed),
                HorizonPolicy::Drain,
            );
            let result = engine.run();
            assert_eq!(result.arrivals, 2);
            assert_eq!(result.attended.len(), 1);
            assert_eq!(result.denied.len(), 1);
            assert_eq!(result.denied[0].arrival_time, 1.0);
        }
    }
}
