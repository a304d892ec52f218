//! Normalization core for room session history.
//!
//! This crate turns the heterogeneous session records returned by the LiveKit
//! Cloud analytics API into a single canonical, UI-ready shape:
//! - the recording status is resolved from the egress attempt history
//! - start and end instants are always resolved
//! - durations are rendered as human-readable strings, or `Ongoing`
//!
//! Nothing in this crate performs I/O. The only ambient dependency, wall-clock
//! time, is injected through the [`traits::clock::Clock`] capability.

pub mod duration;
pub mod error;
pub mod normalizer;
pub mod recording_status;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::Error;
pub use normalizer::Normalizer;
pub use traits::clock::{Clock, FixedClock, SystemClock};
pub use types::canonical::{CanonicalSession, RecordingStatus};
pub use types::upstream::{EgressStatus, RawEgressAttempt, RawSession, SessionsPage};
