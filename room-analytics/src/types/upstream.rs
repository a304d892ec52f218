//! Session and egress records as returned by the LiveKit Cloud analytics API.
//!
//! Upstream payloads are only partially populated, so nearly every field is
//! optional here. Defaults are applied by the normalizer, never by decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One page of the upstream sessions listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionsPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sessions: Vec<RawSession>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A room session as reported upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSession {
    #[serde(default, alias = "sid", alias = "session_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub room_name: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::optional")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::optional")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub num_participants: Option<u32>,
    #[serde(default)]
    pub num_active_participants: Option<u32>,
    /// Recording attempts in the order upstream appended them.
    #[serde(default)]
    pub egress_info: Option<Vec<RawEgressAttempt>>,
}

/// A single recording (egress) attempt attached to a session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEgressAttempt {
    #[serde(default, alias = "id")]
    pub egress_id: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: EgressStatus,
    #[serde(default, with = "timestamp::optional")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::optional")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Lifecycle state of an egress attempt.
///
/// Upstream treats this as an open set of strings; codes this crate does not
/// know about are kept verbatim in `Unknown` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EgressStatus {
    Starting,
    Active,
    Ending,
    Complete,
    Failed,
    Aborted,
    LimitReached,
    Unknown(String),
}

impl Default for EgressStatus {
    fn default() -> Self {
        EgressStatus::Unknown(String::new())
    }
}

impl EgressStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EgressStatus::Starting => "starting",
            EgressStatus::Active => "active",
            EgressStatus::Ending => "ending",
            EgressStatus::Complete => "complete",
            EgressStatus::Failed => "failed",
            EgressStatus::Aborted => "aborted",
            EgressStatus::LimitReached => "limit-reached",
            EgressStatus::Unknown(raw) => raw,
        }
    }
}

// Accepts `limit-reached`, `limit_reached` and the protobuf style `EGRESS_LIMIT_REACHED`.
impl From<String> for EgressStatus {
    fn from(raw: String) -> Self {
        let code = raw.trim().to_lowercase();
        let code = code.strip_prefix("egress_").unwrap_or(&code).replace('_', "-");

        match code.as_str() {
            "starting" => EgressStatus::Starting,
            "active" => EgressStatus::Active,
            "ending" => EgressStatus::Ending,
            "complete" => EgressStatus::Complete,
            "failed" => EgressStatus::Failed,
            "aborted" => EgressStatus::Aborted,
            "limit-reached" => EgressStatus::LimitReached,
            _ => EgressStatus::Unknown(raw),
        }
    }
}

impl From<&str> for EgressStatus {
    fn from(raw: &str) -> Self {
        EgressStatus::from(raw.to_string())
    }
}

impl From<EgressStatus> for String {
    fn from(status: EgressStatus) -> Self {
        match status {
            EgressStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EgressStatus {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", self.as_str())
    }
}

// Upstream sends explicit nulls for unset fields as often as it omits them.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Upstream instants arrive as Unix seconds, either as JSON numbers or as
/// decimal strings (int64 in protobuf JSON), or as RFC3339 strings.
/// Fractional seconds are truncated.
mod timestamp {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::de::{Error as _, IgnoredAny};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Instant {
        Seconds(i64),
        Fractional(f64),
        Text(String),
        Other(IgnoredAny),
    }

    fn parse(instant: Instant) -> Result<DateTime<Utc>, String> {
        let seconds = match instant {
            Instant::Seconds(seconds) => seconds,
            Instant::Fractional(seconds) if seconds.is_finite() => seconds.trunc() as i64,
            Instant::Fractional(seconds) => return Err(format!("invalid instant {seconds}")),
            Instant::Other(_) => return Err("instant is neither a number nor a string".to_string()),
            Instant::Text(text) => match text.trim().parse::<i64>() {
                Ok(seconds) => seconds,
                Err(_) => {
                    return DateTime::parse_from_rfc3339(text.trim())
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(|e| format!("invalid instant '{text}': {e}"))
                }
            },
        };

        Utc.timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| format!("instant out of range: {seconds}"))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse(Instant::deserialize(deserializer)?).map_err(D::Error::custom)
    }

    pub(super) mod optional {
        use super::{parse, Instant};
        use chrono::{DateTime, Utc};
        use log::debug;
        use serde::{Deserialize, Deserializer};

        /// Missing, zero and unparseable values all decode to `None`: upstream
        /// reports unset instants as `0`, and optional fields must never fail a record.
        pub(in super::super) fn deserialize<'de, D>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let instant = match Option::<Instant>::deserialize(deserializer)? {
                Some(Instant::Seconds(seconds)) if seconds <= 0 => return Ok(None),
                Some(Instant::Fractional(seconds)) if seconds <= 0.0 => return Ok(None),
                Some(Instant::Text(text)) if text.trim().is_empty() || text.trim() == "0" => {
                    return Ok(None)
                }
                Some(instant) => instant,
                None => return Ok(None),
            };

            match parse(instant) {
                Ok(dt) => Ok(Some(dt)),
                Err(reason) => {
                    debug!("Ignoring optional upstream instant: {reason}");
                    Ok(None)
                }
            }
        }
    }
}
