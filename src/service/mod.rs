//! Attendant pool and the zero-wait admission protocol
//!
//! - **ServerPool**: fixed set of attendants, each idle or busy
//! - **AdmissionProtocol**: admit-or-deny at the instant of arrival, then serve
//! - **ServiceOutcome** / **OutcomeLog**: attended and denied records of a run

pub mod outcome;
pub mod pool;
pub mod protocol;

pub use outcome::*;
pub use pool::*;
pub use protocol::*;
