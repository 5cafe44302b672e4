//! Serialization helpers for feature vectors.
//!
//! JSON has no NaN or infinity, so non-finite components are written as the
//! strings `"NaN"`, `"inf"` and `"-inf"` and parsed back from them.

use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Component {
    Number(f32),
    Text(String),
}

pub fn serialize<S>(values: &[f32], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for value in values {
        if value.is_nan() {
            seq.serialize_element("NaN")?;
        } else if *value == f32::INFINITY {
            seq.serialize_element("inf")?;
        } else if *value == f32::NEG_INFINITY {
            seq.serialize_element("-inf")?;
        } else {
            seq.serialize_element(value)?;
        }
    }
    seq.end()
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Component>::deserialize(deserializer)?
        .into_iter()
        .map(|component| match component {
            Component::Number(value) => Ok(value),
            Component::Text(text) => match text.as_str() {
                "NaN" => Ok(f32::NAN),
                "inf" => Ok(f32::INFINITY),
                "-inf" => Ok(f32::NEG_INFINITY),
                other => Err(D::Error::custom(format!(
                    "expected a number, \"NaN\", \"inf\" or \"-inf\", got \"{}\"",
                    other
                ))),
            },
        })
        .collect()
}
