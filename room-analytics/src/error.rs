//! Error types for session normalization.

use std::fmt;

/// Failures that can occur while normalizing upstream session records.
///
/// Absent optional fields never produce an error; they resolve to defaults.
/// The only unrecoverable condition is a record that cannot be identified.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The upstream record carried no (or an empty) session identifier.
    /// `position` is the record's index within the fetched page when known.
    MissingIdentifier {
        position: Option<usize>,
        room_name: String,
    },
}

impl Error {
    pub(crate) fn at_position(self, index: usize) -> Self {
        match self {
            Error::MissingIdentifier { room_name, .. } => Error::MissingIdentifier {
                position: Some(index),
                room_name,
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingIdentifier {
                position: Some(position),
                room_name,
            } => write!(
                f,
                "Session record at position {} (room '{}') has no identifier",
                position, room_name
            ),
            Error::MissingIdentifier {
                position: None,
                room_name,
            } => write!(f, "Session record (room '{}') has no identifier", room_name),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position_when_known() {
        let err = Error::MissingIdentifier {
            position: None,
            room_name: "standup".to_string(),
        }
        .at_position(3);

        assert_eq!(
            err.to_string(),
            "Session record at position 3 (room 'standup') has no identifier"
        );
    }
}
