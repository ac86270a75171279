//! Structural check of a provider entry before it is deserialized.
//!
//! Reports every problem with a JSON Pointer into the provider entry.
//! Attribute `type` values are left unconstrained; the type mapper reports
//! those with entity and attribute context.

use serde_json::{json, Value};

use crate::error::{SchemaError, TranslateError};

/// JSON Schema describing the parts of a provider entry the translator reads.
pub fn provider_shape() -> Value {
    json!({
        "type": "object",
        "properties": {
            "data_source_schemas": {
                "type": "object",
                "additionalProperties": { "$ref": "#/$defs/entity" }
            },
            "resource_schemas": {
                "type": "object",
                "additionalProperties": { "$ref": "#/$defs/entity" }
            }
        },
        "$defs": {
            "entity": {
                "type": "object",
                "properties": {
                    "version": { "type": "integer", "minimum": 0 },
                    "block": { "$ref": "#/$defs/block" }
                }
            },
            "block": {
                "type": "object",
                "properties": {
                    "attributes": { "$ref": "#/$defs/attributes" },
                    "block_types": {
                        "type": "object",
                        "additionalProperties": { "$ref": "#/$defs/block_type" }
                    },
                    "description": { "type": "string" }
                }
            },
            "attributes": {
                "type": "object",
                "additionalProperties": { "$ref": "#/$defs/attribute" }
            },
            "attribute": {
                "type": "object",
                "properties": {
                    "required": { "type": "boolean" },
                    "optional": { "type": "boolean" },
                    "computed": { "type": "boolean" },
                    "sensitive": { "type": "boolean" },
                    "deprecated": { "type": "boolean" },
                    "description": { "type": "string" },
                    "nested_type": {
                        "type": "object",
                        "properties": {
                            "attributes": { "$ref": "#/$defs/attributes" },
                            "nesting_mode": { "$ref": "#/$defs/nesting_mode" }
                        }
                    }
                }
            },
            "block_type": {
                "type": "object",
                "properties": {
                    "nesting_mode": { "$ref": "#/$defs/nesting_mode" },
                    "block": { "$ref": "#/$defs/block" },
                    "min_items": { "type": "integer", "minimum": 0 },
                    "max_items": { "type": "integer", "minimum": 0 }
                }
            },
            "nesting_mode": { "enum": ["single", "group", "list", "set", "map"] }
        }
    })
}

/// Collect every shape problem in a provider entry.
///
/// # Errors
///
/// Returns `TranslateError::MalformedInput` only if the built-in shape
/// schema itself fails to compile.
pub fn shape_errors(provider: &Value) -> Result<Vec<SchemaError>, TranslateError> {
    let validator = jsonschema::validator_for(&provider_shape()).map_err(|e| {
        TranslateError::MalformedInput {
            message: format!("provider shape schema: {}", e),
        }
    })?;

    Ok(validator
        .iter_errors(provider)
        .map(|e| SchemaError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect())
}

/// Check a provider entry, failing with every problem found.
///
/// # Errors
///
/// Returns `TranslateError::MalformedInput` listing each problem as
/// `pointer: message`.
pub fn validate_provider_shape(address: &str, provider: &Value) -> Result<(), TranslateError> {
    let errors = shape_errors(provider)?;
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    Err(TranslateError::MalformedInput {
        message: format!(
            "provider \"{}\" has {} problem(s): {}",
            address,
            errors.len(),
            details.join("; ")
        ),
    })
}
