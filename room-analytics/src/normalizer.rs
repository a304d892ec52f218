//! Maps upstream session records onto [`CanonicalSession`]s.

use crate::duration;
use crate::error::Error;
use crate::recording_status;
use crate::traits::clock::Clock;
use crate::types::canonical::CanonicalSession;
use crate::types::upstream::RawSession;
use chrono::{DateTime, Utc};

/// Stateless session normalizer holding only the clock it reads "now" from.
#[derive(Debug, Clone)]
pub struct Normalizer<C> {
    clock: C,
}

impl<C: Clock> Normalizer<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Normalizes a single record, reading the clock once.
    pub fn normalize(&self, raw: RawSession) -> Result<CanonicalSession, Error> {
        normalize_at(raw, self.clock.now())
    }

    /// Normalizes a page of records in input order.
    ///
    /// The clock is read once for the whole page so every ongoing session
    /// shares the same substituted end instant. The output has exactly one
    /// entry per input record; a record without identifier rejects the page.
    pub fn normalize_all(&self, raws: Vec<RawSession>) -> Result<Vec<CanonicalSession>, Error> {
        let now = self.clock.now();

        raws.into_iter()
            .enumerate()
            .map(|(index, raw)| normalize_at(raw, now).map_err(|e| e.at_position(index)))
            .collect()
    }
}

/// Normalizes `raw` treating `now` as the current instant.
pub fn normalize_at(raw: RawSession, now: DateTime<Utc>) -> Result<CanonicalSession, Error> {
    let id = match raw.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => {
            return Err(Error::MissingIdentifier {
                position: None,
                room_name: raw.room_name,
            })
        }
    };

    let start_time = raw.start_time.unwrap_or(raw.created_at);
    // The formatter must see the raw end so unfinished sessions read as ongoing.
    let duration = duration::format(start_time, raw.end_time);
    let participant_count = raw.num_participants.unwrap_or(0);
    let recording_status = recording_status::resolve(raw.egress_info.as_deref());
    let end_time = raw.end_time.unwrap_or(now);

    Ok(CanonicalSession {
        id,
        room_name: raw.room_name,
        start_time,
        end_time,
        duration,
        participant_count,
        recording_status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::clock::FixedClock;
    use crate::types::canonical::RecordingStatus;
    use crate::types::upstream::{EgressStatus, RawEgressAttempt};
    use chrono::TimeZone;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn raw_session(id: &str, room_name: &str) -> RawSession {
        RawSession {
            id: Some(id.to_string()),
            room_name: room_name.to_string(),
            created_at: at(1000),
            ..Default::default()
        }
    }

    fn normalizer() -> Normalizer<FixedClock> {
        Normalizer::new(FixedClock(at(5000)))
    }

    #[test]
    fn test_missing_start_falls_back_to_created_at() {
        let session = normalizer()
            .normalize(raw_session("RM_1", "standup"))
            .unwrap();

        assert_eq!(session.start_time, at(1000));
        assert_eq!(session.duration, "Ongoing");
    }

    #[test]
    fn test_ongoing_session_end_is_now_but_duration_stays_ongoing() {
        let session = normalizer()
            .normalize(raw_session("RM_1", "standup"))
            .unwrap();

        assert_eq!(session.end_time, at(5000));
        assert_eq!(session.duration, "Ongoing");
    }

    #[test]
    fn test_completed_session_uses_explicit_instants() {
        let raw = RawSession {
            start_time: Some(at(1200)),
            end_time: Some(at(1200 + 65 * 60)),
            num_participants: Some(3),
            ..raw_session("RM_2", "retro")
        };

        let session = normalizer().normalize(raw).unwrap();

        assert_eq!(
            session,
            CanonicalSession {
                id: "RM_2".to_string(),
                room_name: "retro".to_string(),
                start_time: at(1200),
                end_time: at(1200 + 65 * 60),
                duration: "1h 5m".to_string(),
                participant_count: 3,
                recording_status: RecordingStatus::None,
            }
        );
    }

    #[test]
    fn test_absent_participant_count_defaults_to_zero() {
        let session = normalizer()
            .normalize(raw_session("RM_3", "lobby"))
            .unwrap();

        assert_eq!(session.participant_count, 0);
    }

    #[test]
    fn test_end_before_start_is_kept_and_formatted_as_zero() {
        let raw = RawSession {
            start_time: Some(at(2000)),
            end_time: Some(at(1700)),
            ..raw_session("RM_4", "skewed")
        };

        let session = normalizer().normalize(raw).unwrap();

        assert_eq!(session.end_time, at(1700));
        assert_eq!(session.duration, "0m");
    }

    #[test]
    fn test_recording_status_follows_latest_egress_attempt() {
        let raw = RawSession {
            egress_info: Some(vec![
                RawEgressAttempt {
                    status: EgressStatus::Failed,
                    ..Default::default()
                },
                RawEgressAttempt {
                    status: EgressStatus::Complete,
                    ..Default::default()
                },
            ]),
            ..raw_session("RM_5", "recorded")
        };

        let session = normalizer().normalize(raw).unwrap();

        assert_eq!(session.recording_status, RecordingStatus::Available);
    }

    #[test]
    fn test_missing_identifier_is_rejected() {
        let raw = RawSession {
            id: None,
            ..raw_session("", "orphan")
        };

        let result = normalizer().normalize(raw);

        assert_eq!(
            result,
            Err(Error::MissingIdentifier {
                position: None,
                room_name: "orphan".to_string(),
            })
        );
    }

    #[test]
    fn test_blank_identifier_is_rejected() {
        let result = normalizer().normalize(raw_session("  ", "blank"));

        assert!(matches!(result, Err(Error::MissingIdentifier { .. })));
    }

    #[test]
    fn test_normalize_all_preserves_order_and_length() {
        let raws = vec![
            raw_session("RM_c", "third"),
            raw_session("RM_a", "first"),
            raw_session("RM_a", "first"),
            raw_session("RM_b", "second"),
        ];

        let sessions = normalizer().normalize_all(raws).unwrap();

        let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["RM_c", "RM_a", "RM_a", "RM_b"]);
    }

    #[test]
    fn test_normalize_all_of_empty_page_is_empty() {
        let sessions = normalizer().normalize_all(Vec::new()).unwrap();

        assert!(sessions.is_empty());
    }

    #[test]
    fn test_normalize_all_reports_position_of_unidentified_record() {
        let raws = vec![
            raw_session("RM_ok", "fine"),
            RawSession {
                id: None,
                ..raw_session("", "broken")
            },
        ];

        let result = normalizer().normalize_all(raws);

        assert_eq!(
            result,
            Err(Error::MissingIdentifier {
                position: Some(1),
                room_name: "broken".to_string(),
            })
        );
    }
}
