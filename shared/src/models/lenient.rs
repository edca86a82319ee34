//! Tolerant deserializers for hand-edited or imported JSON

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Number, numeric string, or anything else as `0`
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_number(&Value::deserialize(deserializer)?))
}

/// Like [`number`], but `null`/missing stays `None`
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(coerce_number(&other)),
    })
}

pub(crate) fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(1500)), 1500.0);
        assert_eq!(coerce_number(&json!("2500.5")), 2500.5);
        assert_eq!(coerce_number(&json!(" 300 ")), 300.0);
        assert_eq!(coerce_number(&json!("abc")), 0.0);
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!("NaN")), 0.0);
    }
}
