//! Domain layer for room session history.
//!
//! Consumers of this crate get everything needed to answer "which rooms ran,
//! for how long, and were they recorded" without depending on the analytics
//! core or the HTTP client directly: the canonical types are re-exported here.
pub use room_analytics::{
    CanonicalSession, Clock, FixedClock, RecordingStatus, SessionsPage, SystemClock,
};

pub mod access_token;
pub mod error;
pub mod room_session;

pub mod gateway;
