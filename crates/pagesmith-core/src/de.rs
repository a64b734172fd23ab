//! Lenient field deserializers.
//!
//! Design exports come from a third-party tool and are routinely missing
//! fields or carry them with the wrong JSON type. Every layer field goes
//! through one of these helpers so a bad value degrades to its default
//! instead of failing the whole export.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Deserialize `T`, falling back to `T::default()` on any type mismatch.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Deserialize a number, accepting numeric strings (`"24"`, `"24px"`).
pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_number(&value).unwrap_or_default())
}

/// Like [`number`] but keeps absence distinguishable.
pub(crate) fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_number(&value))
}

/// Deserialize a list element-by-element, replacing bad items with their default.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| T::deserialize(item).unwrap_or_default())
        .collect())
}

pub(crate) fn value_to_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches("px").trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_number() {
        assert_eq!(value_to_number(&json!(12)), Some(12.0));
        assert_eq!(value_to_number(&json!("24px")), Some(24.0));
        assert_eq!(value_to_number(&json!(" 7.5 ")), Some(7.5));
        assert_eq!(value_to_number(&json!("wide")), None);
        assert_eq!(value_to_number(&json!(null)), None);
        assert_eq!(value_to_number(&json!([1])), None);
    }
}
