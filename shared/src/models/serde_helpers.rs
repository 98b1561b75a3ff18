//! Common serde helpers for lenient client payloads

use serde::{Deserialize, Deserializer};

/// Deserialize an `f64` given either as a JSON number or a numeric string
///
/// The till posts money as `total.toFixed(2)`, i.e. `"35.60"`.
pub fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {}", s))),
    }
}

/// Deserialize bool that treats null as true
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Amount {
        #[serde(deserialize_with = "number_or_string")]
        value: f64,
    }

    #[test]
    fn parses_both_forms() {
        let a: Amount = serde_json::from_str(r#"{"value": 12.5}"#).unwrap();
        let b: Amount = serde_json::from_str(r#"{"value": " 12.50 "}"#).unwrap();
        assert_eq!(a.value, b.value);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Amount>(r#"{"value": "abc"}"#).is_err());
    }
}
