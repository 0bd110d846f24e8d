//! Loose input coercion for form-style JSON bodies.
//!
//! Set editors send whatever the input box holds: numbers, numeric strings,
//! or `""` for a cleared field. Cleared and unparseable values become `None`
//! so they persist as NULL rather than 0 or NaN.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
  Bool(bool),
  Number(f64),
  Text(String),
}

impl Loose {
  fn as_f64(&self) -> Option<f64> {
    let value = match self {
      Loose::Number(n) => Some(*n),
      Loose::Text(s) => s.trim().parse::<f64>().ok(),
      Loose::Bool(_) => None,
    };
    value.filter(|n| n.is_finite())
  }

  fn as_flag(&self) -> bool {
    match self {
      Loose::Bool(b) => *b,
      Loose::Number(n) => *n != 0.0,
      Loose::Text(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
    }
  }
}

pub fn optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Loose>::deserialize(deserializer)?.and_then(|v| v.as_f64()))
}

/// Integers are truncated toward zero, so `"8.5"` reads as 8 reps.
pub fn optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(optional_f64(deserializer)?.map(|n| n.trunc() as i64))
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Loose>::deserialize(deserializer)?.is_some_and(|v| v.as_flag()))
}
