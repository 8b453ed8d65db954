use crate::claims::mapping::{ClaimGroup, ClaimMapping, ClaimMappingTable, ClaimType, STANDARD_CLAIM_MAPPING};
use crate::claims::vocab::{
    message_type_from_claim, message_type_to_claim, qualify_context_type, unqualify_context_type,
    version_to_claim,
};
use crate::constants::{claims, prefixes};
use crate::model::{ParamValue, ParameterMap};
use serde_json::{Map, Value};

const CONTEXT_TYPE: &str = "context_type";
const MESSAGE_TYPE: &str = "lti_message_type";
const VERSION: &str = "lti_version";

/// Converts a flat launch parameter map into an LTI 1.3 claim set and back.
#[derive(Debug, Clone, Copy)]
pub struct PayloadFormatter<'a> {
    table: &'a ClaimMappingTable,
}

impl Default for PayloadFormatter<'static> {
    fn default() -> Self {
        Self {
            table: &*STANDARD_CLAIM_MAPPING,
        }
    }
}

impl<'a> PayloadFormatter<'a> {
    pub fn with_table(table: &'a ClaimMappingTable) -> Self {
        Self { table }
    }

    /// Unmapped keys are dropped unless they carry the `custom_` or `ext_`
    /// prefix, in which case they land in the custom or ext claim.
    pub fn format(&self, params: &ParameterMap) -> Map<String, Value> {
        let mut payload = Map::new();
        for (key, value) in params.iter() {
            if let Some(mapping) = self.table.get(key) {
                let converted = convert(key, mapping, value);
                place(&mut payload, mapping, converted);
            } else if let Some(name) = key.strip_prefix(prefixes::CUSTOM) {
                insert_nested(&mut payload, claims::CUSTOM, name, Value::String(value.to_text()));
            } else if let Some(name) = key.strip_prefix(prefixes::EXT) {
                insert_nested(&mut payload, claims::EXT, name, Value::String(value.to_text()));
            }
        }
        payload
    }

    /// Inverse of [`format`](Self::format): claims the table knows about go
    /// back to their flat keys, custom and ext claims regain their prefixes.
    pub fn unformat(&self, payload: &Map<String, Value>) -> ParameterMap {
        let mut params = ParameterMap::new();
        for (key, value) in payload {
            let prefix = match key.as_str() {
                claims::CUSTOM => Some(prefixes::CUSTOM),
                claims::EXT => Some(prefixes::EXT),
                _ => None,
            };
            match (prefix, value) {
                (Some(prefix), Value::Object(fields)) => {
                    for (field, inner) in fields {
                        params.insert(format!("{}{}", prefix, field), claim_text(inner));
                    }
                }
                (None, Value::Object(fields)) => {
                    for (field, inner) in fields {
                        if let Some(flat) = self.table.flat_key_for(key, Some(field)) {
                            params.insert(flat, flat_value(flat, inner));
                        }
                    }
                }
                _ => {
                    if let Some(flat) = self.table.flat_key_for(key, None) {
                        params.insert(flat, flat_value(flat, value));
                    }
                }
            }
        }
        params
    }
}

fn convert(key: &str, mapping: &ClaimMapping, value: &ParamValue) -> Value {
    if mapping.is_array {
        let mut items: Vec<String> = match value {
            ParamValue::List(items) => items.clone(),
            ParamValue::Text(text) => text.split(',').map(str::to_string).collect(),
        };
        if key == CONTEXT_TYPE {
            items = items.iter().map(|item| qualify_context_type(item)).collect();
        }
        items.sort();
        return Value::Array(items.into_iter().map(Value::String).collect());
    }
    let text = value.to_text();
    match mapping.kind {
        ClaimType::Boolean => Value::Bool(text == "true"),
        ClaimType::String => match key {
            MESSAGE_TYPE => Value::String(message_type_to_claim(&text).to_string()),
            VERSION => Value::String(version_to_claim(&text).to_string()),
            _ => Value::String(text),
        },
    }
}

fn place(payload: &mut Map<String, Value>, mapping: &ClaimMapping, value: Value) {
    match mapping.group {
        ClaimGroup::TopLevel | ClaimGroup::Ungrouped => {
            payload.insert(mapping.claim_key(), value);
        }
        ClaimGroup::Nested(_) => insert_nested(payload, &mapping.claim_key(), mapping.claim, value),
    }
}

fn insert_nested(payload: &mut Map<String, Value>, claim: &str, field: &str, value: Value) {
    let slot = payload
        .entry(claim.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(fields) = slot {
        fields.insert(field.to_string(), value);
    }
}

fn claim_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(claim_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn flat_value(flat: &str, value: &Value) -> String {
    match flat {
        CONTEXT_TYPE => match value {
            Value::Array(items) => items
                .iter()
                .map(|item| unqualify_context_type(&claim_text(item)).to_string())
                .collect::<Vec<_>>()
                .join(","),
            other => unqualify_context_type(&claim_text(other)).to_string(),
        },
        MESSAGE_TYPE => message_type_from_claim(&claim_text(value)).to_string(),
        _ => claim_text(value),
    }
}
