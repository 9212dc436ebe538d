//! Response contracts: turning free-form model text into validated records.
//!
//! The model is asked for a bare JSON object but routinely wraps it in a
//! markdown fence or surrounds it with prose. [`parse_contract`] tolerates
//! both, then checks the object against a required-field list. It never
//! guesses at missing data.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::ContractError;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// A record the model must return as a JSON object.
pub trait Contract: DeserializeOwned {
    /// Schema name used in error messages.
    const SCHEMA: &'static str;
    /// Wire names that must be present and non-null.
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Value-level checks that run after decoding.
    fn validate(&self) -> Result<(), ContractError> {
        Ok(())
    }
}

/// Extract, parse and presence-check a JSON object from raw model text.
///
/// Returns the object narrowed to `required`.
pub fn parse_contract(raw: &str, required: &[&str]) -> Result<Map<String, Value>, ContractError> {
    let cleaned = strip_fence(raw.trim());

    let candidate = extract_object_span(cleaned).ok_or_else(|| ContractError::NoJsonFound {
        text: cleaned.to_string(),
    })?;

    let value: Value =
        serde_json::from_str(candidate).map_err(|e| ContractError::MalformedJson {
            message: e.to_string(),
            fragment: candidate.to_string(),
        })?;

    let Value::Object(mut object) = value else {
        return Err(ContractError::MalformedJson {
            message: "expected a JSON object".to_string(),
            fragment: candidate.to_string(),
        });
    };

    let mut narrowed = Map::with_capacity(required.len());
    for field in required {
        match object.remove(*field) {
            Some(Value::Null) | None => return Err(ContractError::MissingField(field.to_string())),
            Some(v) => {
                narrowed.insert(field.to_string(), v);
            }
        }
    }

    Ok(narrowed)
}

/// Parse model text into a typed contract, rejecting type mismatches and
/// out-of-range values as well as missing fields.
pub fn decode<C: Contract>(raw: &str) -> Result<C, ContractError> {
    let object = parse_contract(raw, C::REQUIRED_FIELDS)?;
    let record: C =
        serde_json::from_value(Value::Object(object)).map_err(|e| ContractError::SchemaMismatch {
            schema: C::SCHEMA,
            message: e.to_string(),
        })?;
    record.validate()?;
    Ok(record)
}

/// Strip at most one fence pair. A ```json opener wins over a bare one.
fn strip_fence(text: &str) -> &str {
    let inner = if let Some(rest) = text.strip_prefix(JSON_FENCE) {
        rest
    } else if let Some(rest) = text.strip_prefix(FENCE) {
        rest
    } else {
        return text;
    };

    let inner = inner.trim_end();
    inner.strip_suffix(FENCE).unwrap_or(inner).trim()
}

/// First `{` through last `}`, inclusive.
fn extract_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
