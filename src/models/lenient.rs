use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a JSON number or a numeric string; anything else reads as zero.
/// Older stores kept numeric fields as raw form text.
pub fn int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + Default,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    Ok(parsed
        .and_then(|n| T::try_from(n).ok())
        .unwrap_or_default())
}
