//! Service Record Model (服务记录)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::lenient;
use super::record_status::RecordStatus;

/// Record identifier
///
/// Older data stores numeric ids, imported data stores strings such as
/// `"r-1718000000000"`. Both deserialize into the same string form so that
/// lookups compare like with like. An empty id means "not assigned yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id for a newly created record
    pub fn generate() -> Self {
        Self(crate::util::snowflake_id().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unassigned(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::default()),
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "record id must be a string or number, got {other}"
            ))),
        }
    }
}

/// Service record - one job for one car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub client: String,
    /// Display name when `client` holds a user id
    #[serde(rename = "clientName", default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default)]
    pub car: String,
    #[serde(default)]
    pub service: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: f64,
    /// Free-form date as entered (usually `YYYY-MM-DD`)
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<String>,
    #[serde(default)]
    pub payment_status: RecordStatus,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    #[serde(rename = "cancelledAt", default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Fields this model does not know about, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Identity used when merging imported records into local ones:
    /// `client|car|service|date|price`, text fields trimmed and lower-cased.
    ///
    /// The price segment is the coerced number, so `"1500.00"` and `1500`
    /// produce the same key. A zero price renders as empty.
    pub fn dedup_key(&self) -> String {
        let price = if self.price == 0.0 {
            String::new()
        } else {
            self.price.to_string()
        };
        format!(
            "{}|{}|{}|{}|{}",
            self.client.trim().to_lowercase(),
            self.car.trim().to_lowercase(),
            self.service.trim().to_lowercase(),
            self.date.trim(),
            price
        )
    }
}

/// Create record payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordCreate {
    pub client: String,
    pub client_name: Option<String>,
    pub car: String,
    pub service: String,
    pub price: f64,
    pub date: String,
    pub master: Option<String>,
}

/// Manual edit payload; the status is free text and gets normalized
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordEdit {
    pub client: String,
    pub car: String,
    pub service: String,
    pub price: f64,
    pub date: String,
    pub payment_status: String,
}

/// Payment confirmation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub amount: f64,
    #[serde(default)]
    pub comment: String,
}
