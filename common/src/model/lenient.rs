//! Field codecs for the loosely typed values written by older clients:
//! numbers stored as strings, empty strings standing in for "no answer", and
//! `null` where a list was expected.
//!
//! Only the year is strict. Any other value that cannot be read is logged and
//! treated as unanswered, so one damaged answer never discards a whole
//! document.

use log::warn;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Deserialize)]
#[serde(untagged)]
enum IntegerOrText {
    Integer(i64),
    Text(String),
}

/// Reads a year from either `2020` or `"2020"`.
pub fn year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match IntegerOrText::deserialize(deserializer)? {
        IntegerOrText::Integer(value) => i32::try_from(value)
            .map_err(|_| de::Error::invalid_value(Unexpected::Signed(value), &"a calendar year")),
        IntegerOrText::Text(text) => text
            .trim()
            .parse::<i32>()
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&text), &"a calendar year")),
    }
}

fn number_from(value: Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(number) => number.as_f64(),
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => match text.trim().parse::<f64>() {
            Ok(number) => Some(number),
            Err(_) => {
                warn!("dropping unreadable amount {text:?}");
                None
            }
        },
        other => {
            warn!("dropping unreadable amount {other}");
            None
        }
    }
}

fn flag_from(value: Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(flag),
        Value::String(text) => match text.trim() {
            "" => None,
            "true" => Some(true),
            "false" => Some(false),
            _ => {
                warn!("dropping unreadable answer {text:?}");
                None
            }
        },
        other => {
            warn!("dropping unreadable answer {other}");
            None
        }
    }
}

fn text_from(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => (!text.trim().is_empty()).then_some(text),
        Value::Number(number) => Some(number.to_string()),
        other => {
            warn!("dropping unreadable text {other}");
            None
        }
    }
}

fn set_from(value: Value) -> BTreeSet<String> {
    let entries = match value {
        Value::Null => Vec::new(),
        Value::Array(entries) => entries,
        single @ Value::String(_) => vec![single],
        other => {
            warn!("dropping unreadable list {other}");
            Vec::new()
        }
    };
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(text) => (!text.trim().is_empty()).then_some(text),
            other => {
                warn!("dropping unreadable list entry {other}");
                None
            }
        })
        .collect()
}

pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from(Value::deserialize(deserializer)?))
}

pub fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flag_from(Value::deserialize(deserializer)?))
}

/// Like `optional_flag`, but tells a key written as `null` (`Some(None)`)
/// apart from a missing key (`None`, through `#[serde(default)]`).
pub fn present_flag<'de, D>(deserializer: D) -> Result<Option<Option<bool>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(flag_from(Value::deserialize(deserializer)?)))
}

pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_from(Value::deserialize(deserializer)?))
}

/// `null` reads as the empty set, a lone string as a single entry; empty
/// entries are dropped.
pub fn string_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(set_from(Value::deserialize(deserializer)?))
}

/// `string_set` for a key whose presence matters even when it is empty.
pub fn present_string_set<'de, D>(deserializer: D) -> Result<Option<BTreeSet<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(set_from(Value::deserialize(deserializer)?)))
}

/// Writes whole amounts as integers, so `10` reads back as `10` and not
/// `10.0`.
pub fn whole_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match *value {
        Some(number) if number.fract() == 0.0 && number.abs() < MAX_EXACT_INTEGER => {
            serializer.serialize_i64(number as i64)
        }
        Some(number) => serializer.serialize_f64(number),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Answers {
        #[serde(
            default,
            deserialize_with = "optional_number",
            serialize_with = "whole_number"
        )]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "optional_flag")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "optional_text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "string_set")]
        list: BTreeSet<String>,
        #[serde(default, deserialize_with = "present_flag")]
        retired: Option<Option<bool>>,
    }

    fn answers(value: Value) -> Answers {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn unreadable_values_become_absent() {
        let read = answers(json!({
            "amount": "100 €",
            "flag": "oui",
            "text": { "nested": true },
            "list": ["affichage", 3, ""]
        }));

        assert_eq!(read.amount, None);
        assert_eq!(read.flag, None);
        assert_eq!(read.text, None);
        assert_eq!(read.list, BTreeSet::from(["affichage".to_string()]));
    }

    #[test]
    fn text_encodings_are_accepted() {
        let read = answers(json!({
            "amount": " 12.5 ",
            "flag": "true",
            "text": 4,
            "list": "site"
        }));

        assert_eq!(read.amount, Some(12.5));
        assert_eq!(read.flag, Some(true));
        assert_eq!(read.text.as_deref(), Some("4"));
        assert_eq!(read.list, BTreeSet::from(["site".to_string()]));
    }

    #[test]
    fn null_key_is_told_apart_from_missing_key() {
        assert_eq!(answers(json!({ "retired": null })).retired, Some(None));
        assert_eq!(answers(json!({})).retired, None);
    }

    #[test]
    fn whole_amounts_are_written_as_integers() {
        let whole = Answers {
            amount: Some(10.0),
            ..Answers::default()
        };
        let fractional = Answers {
            amount: Some(10.5),
            ..Answers::default()
        };

        assert_eq!(serde_json::to_value(&whole).unwrap()["amount"], json!(10));
        assert_eq!(serde_json::to_value(&fractional).unwrap()["amount"], json!(10.5));
    }
}
