//! Provider lookup within a schema dump.

use serde::Deserialize;
use serde_json::Value;

use crate::error::TranslateError;
use crate::model::{ProviderSchema, ProviderSchemaDocument};
use crate::types::json_type_name;
use crate::validator::validate_provider_shape;

/// Parse a raw schema dump.
///
/// One trailing newline (`\n` or `\r\n`) is stripped before parsing.
///
/// # Errors
///
/// Returns `TranslateError::InvalidJson` if the bytes are not JSON, or
/// `TranslateError::MalformedInput` if `provider_schemas` is missing or not
/// an object.
pub fn parse_document(bytes: &[u8]) -> Result<ProviderSchemaDocument, TranslateError> {
    let value: Value = serde_json::from_slice(strip_trailing_newline(bytes))
        .map_err(|source| TranslateError::InvalidJson { source })?;

    let Value::Object(root) = &value else {
        return Err(TranslateError::MalformedInput {
            message: format!("expected an object at the top level, got {}", json_type_name(&value)),
        });
    };
    match root.get("provider_schemas") {
        Some(Value::Object(_)) => {}
        Some(other) => {
            return Err(TranslateError::MalformedInput {
                message: format!(
                    "provider_schemas must be an object, got {}",
                    json_type_name(other)
                ),
            })
        }
        None => {
            return Err(TranslateError::MalformedInput {
                message: "missing provider_schemas".to_string(),
            })
        }
    }

    ProviderSchemaDocument::deserialize(&value).map_err(|e| TranslateError::MalformedInput {
        message: e.to_string(),
    })
}

/// Find the schema of one provider by its exact address.
///
/// The address is an opaque key (`registry.terraform.io/hashicorp/aws`);
/// no normalization is applied.
///
/// # Errors
///
/// Returns `TranslateError::NotFound` if no provider has that address, or
/// `TranslateError::MalformedInput` if its entry has the wrong shape.
pub fn locate(
    document: &ProviderSchemaDocument,
    address: &str,
) -> Result<ProviderSchema, TranslateError> {
    let raw = document
        .provider_schemas
        .get(address)
        .ok_or_else(|| TranslateError::NotFound {
            address: address.to_string(),
            available: document.addresses(),
        })?;

    validate_provider_shape(address, raw)?;

    ProviderSchema::deserialize(raw).map_err(|e| TranslateError::MalformedInput {
        message: format!("provider \"{}\": {}", address, e),
    })
}

fn strip_trailing_newline(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}
