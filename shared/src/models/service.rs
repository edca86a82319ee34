//! Service Model (服务项目)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

/// Catalogue entry: a kind of work the workshop sells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// Create service payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

/// Update service payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// Catalogue written on first start, when no services are stored yet
pub fn default_catalog(now: DateTime<Utc>) -> Vec<Service> {
    [
        (1001, "Замена масла", 1500.0),
        (1002, "Замена тормозных колодок", 3000.0),
        (1003, "Диагностика двигателя", 1200.0),
        (1004, "Заправка кондиционера", 2500.0),
        (1005, "Полировка кузова", 4000.0),
    ]
    .into_iter()
    .map(|(id, name, price)| Service {
        id,
        name: name.to_string(),
        price,
        created_at: now,
    })
    .collect()
}
