//! Tests for runs driven by a flight schedule

use lounge_attendant_simulator::*;

/// One 10:00 flight, five premium seats, five attendants: everybody is served
#[test]
fn test_single_flight_fully_served() {
    for seed in 0..10 {
        let schedule = vec![ScheduleEntry::new("CIA AEREA NOS ARES", "10:00", 5)];
        let result = run_flight_schedule(&schedule, 5, 3.0, &RunOptions::seeded(seed)).unwrap();

        assert_eq!(result.arrivals, 5);
        assert_eq!(result.attended.len(), 5);
        assert!(result.denied.is_empty());
        assert_eq!(result.horizon_hours, 11.0);
        for record in &result.attended {
            assert!(record.arrival_time >= 8.0 && record.arrival_time <= 9.5);
        }
    }
}

/// An empty schedule has no horizon and no passengers
#[test]
fn test_empty_schedule_is_empty() {
    let result = run_flight_schedule(&[], 3, 3.0, &RunOptions::seeded(1)).unwrap();
    assert_eq!(result.arrivals, 0);
    assert_eq!(result.horizon_hours, 0.0);
    assert_eq!(result.utilization, 0.0);
    assert!(result.attended.is_empty() && result.denied.is_empty());
}

/// Without attendants every premium passenger is denied
#[test]
fn test_zero_attendants_with_flights() {
    let schedule =
        vec![ScheduleEntry::new("ACME", "12:00", 4), ScheduleEntry::new("ACME", "16:00", 6)];
    let result = run_flight_schedule(&schedule, 0, 3.0, &RunOptions::seeded(2)).unwrap();

    assert_eq!(result.arrivals, 10);
    assert_eq!(result.denied.len(), 10);
    assert!(result.attended.is_empty());
    assert_eq!(result.utilization, 0.0);
}

/// A single attendant with a long service turns the rest of a flight away
#[test]
fn test_single_attendant_is_saturated() {
    let schedule = vec![ScheduleEntry::new("ACME", "14:00", 30)];
    let result = run_flight_schedule(&schedule, 1, 5.0, &RunOptions::seeded(3)).unwrap();

    assert_eq!(result.arrivals, 30);
    assert!(!result.attended.is_empty());
    assert!(result.denied.len() >= 25);
    assert!(result.is_conserved());
}

/// Arrivals wrapped past the horizon are never generated
#[test]
fn test_wrapped_arrivals_beyond_horizon() {
    let schedule = vec![ScheduleEntry::new("ACME", "0:40", 20)];
    let result = run_flight_schedule(&schedule, 20, 1.0, &RunOptions::seeded(4)).unwrap();

    assert!(result.horizon_hours > 1.66 && result.horizon_hours < 1.67);
    assert!(result.arrivals < 20);
    assert!(result.denied.is_empty());
    for record in &result.attended {
        assert!(record.arrival_time < result.horizon_hours);
    }
}

/// The flight model's utilization uses its own horizon
#[test]
fn test_flight_utilization_formula() {
    let schedule =
        vec![ScheduleEntry::new("ACME", "9:15", 20), ScheduleEntry::new("ACME", "18:00", 20)];
    let result = run_flight_schedule(&schedule, 3, 2.0, &RunOptions::seeded(5)).unwrap();

    assert_eq!(result.horizon_hours, 19.0);
    let expected = (result.attended.len() as f64 * 2.0) / (19.0 * 3.0);
    assert!((result.utilization - expected).abs() < 1e-12);
}

/// Truncation leaves late services unresolved
#[test]
fn test_flight_truncate_policy() {
    let schedule = vec![ScheduleEntry::new("ACME", "10:00", 5)];
    let options =
        RunOptions { horizon_policy: HorizonPolicy::Truncate, ..RunOptions::seeded(6) };
    let result = run_flight_schedule(&schedule, 5, 5.0, &options).unwrap();

    assert!(result.denied.is_empty());
    assert_eq!(result.attended.len() as u64 + result.unresolved, 5);
    assert!(result.unresolved > 0);
}

/// Both orderings account for every seat
#[test]
fn test_orderings_conserve_passengers() {
    let board = ScheduleGenerator::with_seed(7).generate();
    let seats: i64 = board.iter().map(|entry| entry.seats).sum();

    for ordering in [FlightOrdering::AsDrawn, FlightOrdering::Sorted] {
        let options = RunOptions { flight_ordering: ordering, ..RunOptions::seeded(8) };
        let result = run_flight_schedule(&board, 4, 3.0, &options).unwrap();
        assert!(result.is_conserved());
        assert!(result.arrivals <= seats as u64);
    }

    // Sorted emission reaches every arrival before the first one past the horizon
    let options = RunOptions { flight_ordering: FlightOrdering::Sorted, ..RunOptions::seeded(8) };
    let result = run_flight_schedule(&board, 4, 3.0, &options).unwrap();
    assert!(result.arrivals > 0);
    assert!(result.denied.iter().all(|record| record.arrival_time < 19.0));
}

/// Malformed schedules are rejected before the run
#[test]
fn test_invalid_schedules() {
    let options = RunOptions::seeded(9);

    let error = run_flight_schedule(&[ScheduleEntry::new("ACME", "25:00", 5)], 3, 3.0, &options)
        .unwrap_err();
    assert!(matches!(
        error,
        SimulationError::InvalidConfiguration(ConfigValidationError::InvalidDepartureTime { .. })
    ));

    let error = run_flight_schedule(&[ScheduleEntry::new("ACME", "10:00", -1)], 3, 3.0, &options)
        .unwrap_err();
    assert!(matches!(
        error,
        SimulationError::InvalidConfiguration(ConfigValidationError::NegativeSeatCount { .. })
    ));
}

/// A flight configuration without a schedule runs on the reference board
#[test]
fn test_config_without_schedule_uses_reference_board() {
    let config = SimulationConfig {
        model: ArrivalModel::FlightSchedule,
        num_attendants: 4,
        seed: Some(10),
        flight_ordering: FlightOrdering::Sorted,
        ..Default::default()
    };
    let result = run_config(&config).unwrap();

    // Latest departure on the board is 18:00
    assert_eq!(result.horizon_hours, 19.0);
    assert!(result.arrivals > 0);
    assert!(result.is_conserved());
    assert_eq!(run_config(&config).unwrap(), result);
}
