//! Lenient field deserializers for backend rows.
//!
//! Rows come from several historical table shapes, so a field with an
//! unexpected JSON type is treated as absent instead of failing the row.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::listing::LocationEntry;

/// Interpret a JSON value as a finite number. Numeric strings are accepted
/// since Postgres `numeric` columns may be serialized as text.
pub fn number_from_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

pub(crate) fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.as_ref().and_then(number_from_value))
}

/// Integer or string primary keys, normalized to a string.
pub(crate) fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Text fields; blank strings count as absent.
pub(crate) fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Nested join collections. A single embedded object is treated as a
/// one-element list; elements that fail to decode are skipped.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(rows_from_value(Option::<Value>::deserialize(deserializer)?))
}

/// Location rows, or a bare count standing in for them.
pub(crate) fn locations<'de, D>(deserializer: D) -> Result<Vec<LocationEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    if let Some(count) = v.as_ref().and_then(number_from_value) {
        return Ok(vec![LocationEntry {
            count: Some(count),
            region: None,
        }]);
    }
    Ok(rows_from_value(v))
}

fn rows_from_value<T: DeserializeOwned>(v: Option<Value>) -> Vec<T> {
    match v {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Some(obj @ Value::Object(_)) => serde_json::from_value(obj).map(|e| vec![e]).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// A many-to-one embed that may arrive as an object or a list.
pub(crate) fn lenient_one<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::Array(items)) => items
            .into_iter()
            .next()
            .and_then(|item| serde_json::from_value(item).ok()),
        Some(obj @ Value::Object(_)) => serde_json::from_value(obj).ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings_are_numbers() {
        assert_eq!(number_from_value(&json!("1500.5")), Some(1500.5));
        assert_eq!(number_from_value(&json!(" 42 ")), Some(42.0));
        assert_eq!(number_from_value(&json!(7)), Some(7.0));
    }

    #[test]
    fn non_numeric_values_are_absent() {
        assert_eq!(number_from_value(&json!("varies")), None);
        assert_eq!(number_from_value(&json!("")), None);
        assert_eq!(number_from_value(&json!(true)), None);
        assert_eq!(number_from_value(&json!(null)), None);
        assert_eq!(number_from_value(&json!("NaN")), None);
    }
}
