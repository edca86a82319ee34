//! Shift Model (班次管理)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label shown instead of a duration while a shift is still open
pub const OPEN_SHIFT_LABEL: &str = "Открыта";

/// Shift status, derived from `closed_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftStatus {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "CLOSED")]
    Closed,
}

/// Shift record - represents an operator's on-duty interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: i64,
    /// Operator user ID
    pub operator_id: i64,
    pub opened_at: DateTime<Utc>,
    /// None while the shift is open
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
    /// Payments taken during the shift
    #[serde(default)]
    pub revenue: f64,
}

impl Shift {
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    pub fn status(&self) -> ShiftStatus {
        if self.is_open() {
            ShiftStatus::Open
        } else {
            ShiftStatus::Closed
        }
    }

    /// Whole minutes between open and close, rounded half up
    pub fn duration_minutes(&self) -> Option<i64> {
        let closed_at = self.closed_at?;
        let millis = (closed_at - self.opened_at).num_milliseconds();
        Some((millis as f64 / 60_000.0 + 0.5).floor() as i64)
    }

    /// `"{h}ч {m}м"`, or [`OPEN_SHIFT_LABEL`] for an open shift
    pub fn duration_label(&self) -> String {
        match self.duration_minutes() {
            Some(minutes) => format!("{}ч {}м", minutes.div_euclid(60), minutes.rem_euclid(60)),
            None => OPEN_SHIFT_LABEL.to_string(),
        }
    }
}

/// Edit payload for a closed shift
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftEdit {
    pub opened_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn shift(opened: DateTime<Utc>, closed: Option<DateTime<Utc>>) -> Shift {
        Shift {
            id: 1,
            operator_id: 10,
            opened_at: opened,
            closed_at: closed,
            notes: String::new(),
            revenue: 0.0,
        }
    }

    #[test]
    fn test_duration_label() {
        let opened = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let s = shift(opened, Some(opened + Duration::minutes(8 * 60 + 15)));
        assert_eq!(s.duration_minutes(), Some(495));
        assert_eq!(s.duration_label(), "8ч 15м");
        assert_eq!(s.status(), ShiftStatus::Closed);
    }

    #[test]
    fn test_duration_rounds_half_up() {
        let opened = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let s = shift(opened, Some(opened + Duration::seconds(90)));
        assert_eq!(s.duration_minutes(), Some(2));
        let s = shift(opened, Some(opened + Duration::seconds(89)));
        assert_eq!(s.duration_minutes(), Some(1));
    }

    #[test]
    fn test_open_shift_label() {
        let s = shift(Utc::now(), None);
        assert!(s.is_open());
        assert_eq!(s.duration_minutes(), None);
        assert_eq!(s.duration_label(), OPEN_SHIFT_LABEL);
    }

    #[test]
    fn test_stored_layout() {
        let opened = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let value = serde_json::to_value(shift(opened, None)).unwrap();
        assert_eq!(value["operatorId"], 10);
        assert_eq!(value["openedAt"], "2024-05-01T09:00:00Z");
        assert!(value["closedAt"].is_null());

        let parsed: Shift = serde_json::from_str(
            r#"{"id":5,"operatorId":10,"openedAt":"2024-05-01T09:00:00.000Z","closedAt":null}"#,
        )
        .unwrap();
        assert!(parsed.is_open());
        assert_eq!(parsed.revenue, 0.0);
    }
}
