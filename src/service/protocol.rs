//! Zero-wait admission and service protocol
//!
//! A passenger asks for an attendant exactly once, at the instant of arrival.
//! If one is idle the passenger is admitted and holds it for a service time
//! drawn from `Normal(mean, 1)` floored at zero; otherwise the passenger is
//! denied on the spot. Nobody queues and nobody retries.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::trace;

use crate::arrivals::ArrivalEvent;
use crate::service::{AttendedRecord, DeniedRecord, ServerPool, ServerSlot};
use crate::types::{ConfigValidationError, PassengerId, ServiceState};

/// Standard deviation of the service time in hours
pub const SERVICE_TIME_STD_DEV: f64 = 1.0;

/// A passenger holding an attendant until `end_time`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveService {
    /// Passenger identity
    pub passenger: PassengerId,
    /// Recorded arrival time
    pub arrival_time: f64,
    /// Clock value at admission
    pub start_time: f64,
    /// Scheduled completion time
    pub end_time: f64,
    /// Attendant held for the duration
    pub slot: ServerSlot,
}

/// Result of the instantaneous attendant request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    /// An attendant was free; service is now running
    Admitted(ActiveService),
    /// Every attendant was busy, or there are none
    Rejected(DeniedRecord),
}

/// Admission controller and service-time model
#[derive(Debug, Clone)]
pub struct AdmissionProtocol {
    mean_service_time: f64,
    service_time: Normal<f64>,
}

impl AdmissionProtocol {
    /// Create a protocol whose service times average `mean_service_time` hours
    pub fn new(mean_service_time: f64) -> Result<Self, ConfigValidationError> {
        crate::types::config::validate_mean_service_time(mean_service_time)?;
        let service_time = Normal::new(mean_service_time, SERVICE_TIME_STD_DEV).map_err(|e| {
            ConfigValidationError::InvalidDistribution {
                name: "service time",
                reason: e.to_string(),
            }
        })?;
        Ok(Self { mean_service_time, service_time })
    }

    /// Configured mean service time in hours
    pub fn mean_service_time(&self) -> f64 {
        self.mean_service_time
    }

    /// Draw one service duration, never negative
    pub fn draw_service_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.service_time.sample(rng).max(0.0)
    }

    /// Handle an arrival at clock value `now`
    ///
    /// The pool is queried once. On admission the attendant is marked busy and
    /// the service duration is drawn immediately.
    pub fn request<R: Rng + ?Sized>(
        &self,
        arrival: ArrivalEvent,
        now: f64,
        pool: &mut ServerPool,
        rng: &mut R,
    ) -> Admission {
        trace!(passenger = %arrival.passenger, now, state = %ServiceState::Requesting);

        let Some(slot) = pool.try_acquire() else {
            trace!(passenger = %arrival.passenger, busy = pool.busy(), capacity = pool.capacity());
            transition(arrival.passenger, ServiceState::Requesting, ServiceState::Rejected);
            return Admission::Rejected(DeniedRecord {
                passenger: arrival.passenger,
                arrival_time: arrival.arrival_time,
            });
        };

        transition(arrival.passenger, ServiceState::Requesting, ServiceState::Admitted);
        let duration = self.draw_service_duration(rng);
        trace!(passenger = %arrival.passenger, %slot, duration);
        transition(arrival.passenger, ServiceState::Admitted, ServiceState::InService);

        Admission::Admitted(ActiveService {
            passenger: arrival.passenger,
            arrival_time: arrival.arrival_time,
            start_time: now,
            end_time: now + duration,
            slot,
        })
    }

    /// Finish a service: release its attendant and produce the record
    pub fn complete(&self, service: ActiveService, pool: &mut ServerPool) -> AttendedRecord {
        pool.release(service.slot);
        transition(service.passenger, ServiceState::InService, ServiceState::Completed);

        AttendedRecord {
            passenger: service.passenger,
            arrival_time: service.arrival_time,
            start_time: service.start_time,
            end_time: service.end_time,
        }
    }
}

/// Log a state change; illegal changes are caught in debug builds
fn transition(passenger: PassengerId, from: ServiceState, to: ServiceState) {
    debug_assert!(from.can_transition_to(to), "{passenger}: illegal transition {from} -> {to}");
    trace!(%passenger, %from, state = %to);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arrival(index: u64, at: f64) -> ArrivalEvent {
        ArrivalEvent { passenger: PassengerId::new(index), arrival_time: at }
    }

    #[test]
    fn test_zero_capacity_rejects() {
        let protocol = AdmissionProtocol::new(3.0).unwrap();
        let mut pool = ServerPool::new(0);
        let mut rng = StdRng::seed_from_u64(1);

        let admission = protocol.request(arrival(0, 1.0), 1.0, &mut pool, &mut rng);
        assert_eq!(
            admission,
            Admission::Rejected(DeniedRecord { passenger: PassengerId::new(0), arrival_time: 1.0 })
        );
    }

    #[test]
    fn test_busy_pool_rejects_without_waiting() {
        let protocol = AdmissionProtocol::new(3.0).unwrap();
        let mut pool = ServerPool::new(1);
        let mut rng = StdRng::seed_from_u64(2);

        let first = protocol.request(arrival(0, 1.0), 1.0, &mut pool, &mut rng);
        assert!(matches!(first, Admission::Admitted(_)));

        let second = protocol.request(arrival(1, 1.0), 1.0, &mut pool, &mut rng);
        assert!(matches!(second, Admission::Rejected(_)));
        assert_eq!(pool.busy(), 1);
    }

    #[test]
    fn test_admitted_service_timing() {
        let protocol = AdmissionProtocol::new(2.0).unwrap();
        let mut pool = ServerPool::new(1);
        let mut rng = StdRng::seed_from_u64(3);

        let Admission::Admitted(service) = protocol.request(arrival(7, 4.0), 4.5, &mut pool, &mut rng)
        else {
            panic!("expected admission");
        };
        assert_eq!(service.arrival_time, 4.0);
        assert_eq!(service.start_time, 4.5);
        assert!(service.end_time >= service.start_time);

        let record = protocol.complete(service, &mut pool);
        assert_eq!(pool.busy(), 0);
        assert!((record.end_time - record.start_time - record.service_duration()).abs() < 1e-12);
        assert_eq!(record.passenger, PassengerId::new(7));
    }

    #[test]
    fn test_service_durations_are_clamped() {
        let protocol = AdmissionProtocol::new(0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let draws: Vec<f64> = (0..1000).map(|_| protocol.draw_service_duration(&mut rng)).collect();
        assert!(draws.iter().all(|d| *d >= 0.0));
        // Roughly half of N(0, 1) is clamped to zero
        assert!(draws.iter().any(|d| *d == 0.0));
    }

    #[test]
    fn test_invalid_mean_service_time() {
        assert!(AdmissionProtocol::new(-1.0).is_err());
        assert!(AdmissionProtocol::new(f64::NAN).is_err());
    }

    #[test]
    fn test_request_cycles_follow_legal_transitions() {
        let protocol = AdmissionProtocol::new(1.0).unwrap();
        let mut pool = ServerPool::new(2);
        let mut rng = StdRng::seed_from_u64(5);

        // Debug builds assert every transition the protocol takes
        for index in 0..50 {
            let mut admitted = Vec::new();
            for offset in 0..3 {
                let now = index as f64;
                match protocol.request(arrival(index * 3 + offset, now), now, &mut pool, &mut rng) {
                    Admission::Admitted(service) => admitted.push(service),
                    Admission::Rejected(record) => assert_eq!(record.arrival_time, now),
                }
            }
            assert_eq!(admitted.len(), 2);
            for service in admitted {
                protocol.complete(service, &mut pool);
            }
            assert_eq!(pool.busy(), 0);
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "illegal transition")]
    fn test_illegal_transition_is_caught() {
        transition(PassengerId::new(1), ServiceState::Rejected, ServiceState::InService);
    }
}
