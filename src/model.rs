//! Serde model of `terraform providers schema -json` output.
//!
//! Only the keys the translator reads are modelled; everything else in the
//! document is ignored. Maps are `BTreeMap` so iteration is ordered by name.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::types::NestingMode;

/// The whole schema dump, keyed by provider address.
///
/// Provider entries stay untyped until one is located, so a malformed
/// sibling provider never blocks translation of another.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSchemaDocument {
    pub provider_schemas: BTreeMap<String, Value>,
}

impl ProviderSchemaDocument {
    /// Provider addresses present in the document, in lexicographic order.
    pub fn addresses(&self) -> Vec<String> {
        self.provider_schemas.keys().cloned().collect()
    }
}

/// Data sources and resources of a single provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSchema {
    #[serde(default)]
    pub data_source_schemas: BTreeMap<String, EntitySchema>,
    #[serde(default)]
    pub resource_schemas: BTreeMap<String, EntitySchema>,
}

/// Schema of one resource or data source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntitySchema {
    #[serde(default)]
    pub block: Block,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
    #[serde(default)]
    pub block_types: BTreeMap<String, BlockType>,
}

/// A single attribute of a block or nested attribute group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attribute {
    /// Raw type descriptor, kept as JSON so bad shapes can be reported verbatim.
    #[serde(rename = "type", default)]
    pub ty: Option<Value>,
    #[serde(default)]
    pub nested_type: Option<NestedType>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub computed: bool,
}

/// Nested attribute group (protocol 6 `nested_type`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NestedType {
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
    #[serde(default)]
    pub nesting_mode: NestingMode,
}

/// A nested, repeatable block attached to a resource.
///
/// Emitted as a plain optional struct, so `nesting_mode`, `min_items` and
/// `max_items` are only shape-checked and never read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockType {
    #[serde(default)]
    pub block: Block,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attribute_flags_default_to_false() {
        let attr: Attribute = serde_json::from_value(json!({ "type": "string" })).unwrap();
        assert!(!attr.required && !attr.optional && !attr.computed);
        assert_eq!(attr.ty, Some(json!("string")));
        assert!(attr.nested_type.is_none());
    }

    #[test]
    fn entity_without_block_is_empty() {
        let entity: EntitySchema = serde_json::from_value(json!({ "version": 1 })).unwrap();
        assert!(entity.block.attributes.is_empty());
        assert!(entity.block.block_types.is_empty());
    }

    #[test]
    fn provider_ignores_unknown_keys() {
        let provider: ProviderSchema = serde_json::from_value(json!({
            "provider": { "version": 0, "block": {} },
            "resource_schemas": { "widget": { "block": {} } },
            "functions": {}
        }))
        .unwrap();
        assert!(provider.data_source_schemas.is_empty());
        assert!(provider.resource_schemas.contains_key("widget"));
    }

    #[test]
    fn block_type_keeps_only_its_block() {
        let block_type: BlockType = serde_json::from_value(json!({
            "nesting_mode": "list",
            "max_items": 1,
            "block": {
                "attributes": { "size": { "type": "number", "optional": true } }
            }
        }))
        .unwrap();
        assert!(block_type.block.attributes.contains_key("size"));
    }

    #[test]
    fn document_addresses_sorted() {
        let doc: ProviderSchemaDocument = serde_json::from_value(json!({
            "format_version": "1.0",
            "provider_schemas": {
                "registry.terraform.io/hashicorp/null": {},
                "registry.terraform.io/hashicorp/aws": {}
            }
        }))
        .unwrap();
        assert_eq!(
            doc.addresses(),
            vec![
                "registry.terraform.io/hashicorp/aws".to_string(),
                "registry.terraform.io/hashicorp/null".to_string()
            ]
        );
    }
}
