//! Core types for charging sessions.
//!
//! Everything here is plain data: the session record, its identifier, its
//! status, and the payloads the transport layer exchanges with the session
//! manager. The JSON shapes are fixed by the public API (camelCase fields,
//! `IN_PROGRESS` / `FINISHED` statuses), so every type carries explicit
//! serde attributes.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// SessionId
// ---------------------------------------------------------------------------

/// A unique identifier for a charging session.
///
/// Newtype around a UUID so a session id can't be confused with any other
/// string or UUID in a function signature. Ids are only ever minted by
/// [`SessionId::generate`]; callers never choose them.
///
/// `#[serde(transparent)]` serializes this as the bare UUID string:
/// `"0b6f6f31-13bf-471a-9627-35c62f0ceda9"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Mints a fresh random (version 4) identifier.
    ///
    /// 122 random bits make collisions between ids issued by one process
    /// practically impossible.
    pub fn generate() -> Self {
        let bytes: [u8; 16] = rand::rng().random();
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for SessionId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|source| ProtocolError::InvalidSessionId {
                input: s.to_string(),
                source,
            })
    }
}

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Where a session is in its lifecycle.
///
/// ```text
///   InProgress ──(stop)──→ Finished
/// ```
///
/// The transition happens exactly once and is never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// The vehicle is charging.
    InProgress,
    /// The session was stopped.
    Finished,
}

impl SessionStatus {
    /// Returns `true` once the session has been stopped.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Finished => write!(f, "FINISHED"),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One charging event at a station.
///
/// Timestamps are wall-clock values in the server's local time zone, without
/// an offset, e.g. `"2021-03-15T14:44:30.438609"`.
///
/// Invariant: `status == Finished` if and only if `stopped_at` is `Some`.
/// The session manager is the only code that builds or mutates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,

    /// The physical station this session runs on. Never empty.
    pub station_id: String,

    pub started_at: NaiveDateTime,

    /// Set once, when the session is stopped. Omitted from JSON while absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<NaiveDateTime>,

    pub status: SessionStatus,
}

impl Session {
    /// Builds a freshly started session with a new id.
    pub fn start(station_id: impl Into<String>, started_at: NaiveDateTime) -> Self {
        Self {
            id: SessionId::generate(),
            station_id: station_id.into(),
            started_at,
            stopped_at: None,
            status: SessionStatus::InProgress,
        }
    }

    /// Marks the session finished at `at`.
    ///
    /// Returns `false` and leaves the record untouched if it was already
    /// finished: `stopped_at` is write-once. A stop time earlier than the
    /// start (wall clock stepped backwards) is clamped to `started_at`.
    pub fn finish(&mut self, at: NaiveDateTime) -> bool {
        if self.status.is_finished() {
            return false;
        }
        self.stopped_at = Some(at.max(self.started_at));
        self.status = SessionStatus::Finished;
        true
    }

    /// Returns `true` once the session has been stopped.
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Activity counts over the trailing summary window.
///
/// `total_count` is the number of start and stop *events*, not the number of
/// distinct sessions: a session started and stopped inside the window counts
/// twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_count: u64,
    pub started_count: u64,
    pub stopped_count: u64,
}

impl SessionSummary {
    /// Builds a summary from the two event counts.
    pub fn new(started_count: u64, stopped_count: u64) -> Self {
        Self {
            total_count: started_count + stopped_count,
            started_count,
            stopped_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

/// Body of a "start session" request.
///
/// A missing `stationId` deserializes to an empty string so that it is
/// rejected by the same non-empty check as an explicit `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    #[serde(default)]
    pub station_id: String,
}

/// Identifies the session a "stop session" request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopSessionRequest {
    pub id: SessionId,
}

/// Response body listing every known session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionList {
    pub charging_sessions: Vec<Session>,
}

impl From<Vec<Session>> for SessionList {
    fn from(charging_sessions: Vec<Session>) -> Self {
        Self { charging_sessions }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The JSON shapes here are what external clients parse, so the tests
    //! pin field names and enum spellings rather than just round-tripping.

    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    // =====================================================================
    // SessionId
    // =====================================================================

    #[test]
    fn test_session_id_generate_is_v4_and_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();

        assert_ne!(a, b);
        assert_eq!(a.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_session_id_serializes_as_plain_string() {
        let id: SessionId = "0b6f6f31-13bf-471a-9627-35c62f0ceda9".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0b6f6f31-13bf-471a-9627-35c62f0ceda9\"");
    }

    #[test]
    fn test_session_id_display_matches_parse_input() {
        let raw = "f1ac3841-3441-46a7-bb69-017a93a30224";
        let id: SessionId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_session_id_parse_garbage_returns_error() {
        let result = "not-a-uuid".parse::<SessionId>();
        assert!(
            matches!(result, Err(ProtocolError::InvalidSessionId { ref input, .. }) if input == "not-a-uuid")
        );
    }

    // =====================================================================
    // SessionStatus
    // =====================================================================

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Finished).unwrap(),
            "\"FINISHED\""
        );
    }

    #[test]
    fn test_status_display_matches_wire_spelling() {
        assert_eq!(SessionStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(SessionStatus::Finished.to_string(), "FINISHED");
    }

    // =====================================================================
    // Session
    // =====================================================================

    #[test]
    fn test_session_start_is_in_progress_without_stop_time() {
        let session = Session::start("ABC-12345", at(14, 44, 30));

        assert_eq!(session.station_id, "ABC-12345");
        assert_eq!(session.started_at, at(14, 44, 30));
        assert_eq!(session.status, SessionStatus::InProgress);
        assert!(session.stopped_at.is_none());
    }

    #[test]
    fn test_session_finish_sets_stop_time_once() {
        let mut session = Session::start("ABC-12345", at(14, 44, 30));

        assert!(session.finish(at(14, 44, 43)));
        assert!(!session.finish(at(14, 50, 0)), "second finish must be a no-op");

        assert_eq!(session.status, SessionStatus::Finished);
        assert_eq!(session.stopped_at, Some(at(14, 44, 43)));
    }

    #[test]
    fn test_session_finish_before_start_clamps_to_start() {
        let mut session = Session::start("ABC-12345", at(14, 44, 30));

        session.finish(at(14, 40, 0));

        assert_eq!(session.stopped_at, Some(at(14, 44, 30)));
    }

    #[test]
    fn test_session_json_omits_stopped_at_while_in_progress() {
        let session = Session::start("MNO-12345", at(14, 44, 24));
        let json: serde_json::Value = serde_json::to_value(&session).unwrap();

        assert_eq!(json["stationId"], "MNO-12345");
        assert_eq!(json["startedAt"], "2021-03-15T14:44:24");
        assert_eq!(json["status"], "IN_PROGRESS");
        assert!(json.get("stoppedAt").is_none());
        assert_eq!(json["id"], session.id.to_string());
    }

    #[test]
    fn test_session_json_includes_stopped_at_when_finished() {
        let mut session = Session::start("ABC-12345", at(14, 44, 30));
        session.finish(at(14, 44, 43));
        let json: serde_json::Value = serde_json::to_value(&session).unwrap();

        assert_eq!(json["stoppedAt"], "2021-03-15T14:44:43");
        assert_eq!(json["status"], "FINISHED");
    }

    #[test]
    fn test_session_deserializes_fractional_timestamps() {
        let json = r#"{
            "id": "0b6f6f31-13bf-471a-9627-35c62f0ceda9",
            "stationId": "ABC-12345",
            "startedAt": "2021-03-15T14:44:30.438609",
            "stoppedAt": "2021-03-15T14:44:43.1721144",
            "status": "FINISHED"
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();

        assert!(session.is_finished());
        assert!(session.stopped_at.unwrap() > session.started_at);
    }

    // =====================================================================
    // Summary and payloads
    // =====================================================================

    #[test]
    fn test_summary_new_sums_event_counts() {
        let summary = SessionSummary::new(2, 1);
        assert_eq!(summary.total_count, 3);
    }

    #[test]
    fn test_summary_json_field_names() {
        let json: serde_json::Value =
            serde_json::to_value(SessionSummary::new(2, 1)).unwrap();

        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["startedCount"], 2);
        assert_eq!(json["stoppedCount"], 1);
    }

    #[test]
    fn test_start_request_missing_station_defaults_to_empty() {
        let req: StartSessionRequest = serde_json::from_str("{}").unwrap();
        assert!(req.station_id.is_empty());
    }

    #[test]
    fn test_start_request_reads_camel_case_field() {
        let req: StartSessionRequest =
            serde_json::from_str(r#"{"stationId":"ABC-12345"}"#).unwrap();
        assert_eq!(req.station_id, "ABC-12345");
    }

    #[test]
    fn test_stop_request_json_shape() {
        let raw = "0b6f6f31-13bf-471a-9627-35c62f0ceda9";
        let req: StopSessionRequest =
            serde_json::from_str(&format!(r#"{{"id":"{raw}"}}"#)).unwrap();

        assert_eq!(req.id.to_string(), raw);
        assert_eq!(serde_json::to_value(req).unwrap(), serde_json::json!({ "id": raw }));
    }

    #[test]
    fn test_stop_request_malformed_id_is_rejected() {
        let result = serde_json::from_str::<StopSessionRequest>(r#"{"id":"12345"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_stop_request_missing_id_is_rejected() {
        assert!(serde_json::from_str::<StopSessionRequest>("{}").is_err());
    }

    #[test]
    fn test_session_list_wraps_sessions() {
        let list = SessionList::from(vec![Session::start("A", at(9, 0, 0))]);
        let json: serde_json::Value = serde_json::to_value(&list).unwrap();

        assert_eq!(json["chargingSessions"].as_array().unwrap().len(), 1);
    }
}
