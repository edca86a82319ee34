//! Record payment status (记录状态)
//!
//! Stored records carry free text in `payment_status` ("Pending", "Оплачено",
//! "paid", ...). Every value is folded into one of three canonical states on
//! the way in, so the rest of the system only ever sees [`RecordStatus`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

const COMPLETED_KEYWORDS: &[&str] = &[
    "paid",
    "completed",
    "done",
    "проведена",
    "проведен",
    "оплачено",
];

const CANCELLED_KEYWORDS: &[&str] = &[
    "cancelled",
    "canceled",
    "cancel",
    "отмена",
    "отменена",
    "отменено",
];

const IN_PROGRESS_KEYWORDS: &[&str] = &[
    "unpaid",
    "pending",
    "in progress",
    "in-progress",
    "progress",
    "в работе",
    "ожидание",
    "не оплачено",
];

/// Canonical record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum RecordStatus {
    #[default]
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl RecordStatus {
    /// Fold arbitrary text into a canonical status.
    ///
    /// Completed keywords are matched before cancelled ones, and matching is
    /// by substring, so `"unpaid"` lands on [`RecordStatus::Completed`].
    /// Empty or unrecognised input is [`RecordStatus::InProgress`].
    pub fn normalize(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return Self::InProgress;
        }
        if COMPLETED_KEYWORDS.iter().any(|k| text.contains(k)) {
            return Self::Completed;
        }
        if CANCELLED_KEYWORDS.iter().any(|k| text.contains(k)) {
            return Self::Cancelled;
        }
        if IN_PROGRESS_KEYWORDS.iter().any(|k| text.contains(k)) {
            return Self::InProgress;
        }
        Self::InProgress
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Completed or cancelled
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let status = match Value::deserialize(deserializer)? {
            Value::Null => Self::InProgress,
            Value::String(s) => Self::normalize(&s),
            other => Self::normalize(&other.to_string()),
        };
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_keywords() {
        for raw in ["paid", "Completed", "DONE", "Проведена", "оплачено", "  paid in cash "] {
            assert_eq!(RecordStatus::normalize(raw), RecordStatus::Completed, "{raw}");
        }
    }

    #[test]
    fn test_cancelled_keywords() {
        for raw in ["cancel", "Canceled", "cancelled by client", "Отмена", "отменено"] {
            assert_eq!(RecordStatus::normalize(raw), RecordStatus::Cancelled, "{raw}");
        }
    }

    #[test]
    fn test_in_progress_and_fallback() {
        for raw in ["", "   ", "Pending", "в работе", "ожидание", "something else", "🚗"] {
            assert_eq!(RecordStatus::normalize(raw), RecordStatus::InProgress, "{raw}");
        }
    }

    #[test]
    fn test_completed_wins_over_negation() {
        // substring matching, completed list first
        assert_eq!(RecordStatus::normalize("unpaid"), RecordStatus::Completed);
        assert_eq!(RecordStatus::normalize("не оплачено"), RecordStatus::Completed);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "", "paid", "cancel", "Pending", "unpaid", "отменена", "xyz", "in-progress",
            "completed", "cancelled", "Done!", "проведен",
        ];
        for raw in inputs {
            let once = RecordStatus::normalize(raw);
            assert_eq!(RecordStatus::normalize(once.as_str()), once, "{raw}");
        }
    }

    #[test]
    fn test_deserialize_normalizes_free_text() {
        let status: RecordStatus = serde_json::from_str("\"Оплачено\"").unwrap();
        assert_eq!(status, RecordStatus::Completed);

        let status: RecordStatus = serde_json::from_str("null").unwrap();
        assert_eq!(status, RecordStatus::InProgress);

        let status: RecordStatus = serde_json::from_str("42").unwrap();
        assert_eq!(status, RecordStatus::InProgress);
    }

    #[test]
    fn test_serialize_canonical() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::to_string(&RecordStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_is_terminal() {
        assert!(!RecordStatus::InProgress.is_terminal());
        assert!(RecordStatus::Completed.is_terminal());
        assert!(RecordStatus::Cancelled.is_terminal());
    }
}
