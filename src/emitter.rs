//! Entity emission - one data source or resource into a CUE struct.

use std::collections::BTreeMap;

use tracing::debug;

use crate::classifier::classify;
use crate::cue::{Entity, Expr, Field, Marker, Struct};
use crate::error::TranslateError;
use crate::mapper::map_attribute_type;
use crate::model::{Attribute, Block, NestedType};
use crate::types::{EntityKind, NestingMode};

/// Emit one entity as rendered CUE lines.
///
/// # Errors
///
/// Returns `TranslateError` if any attribute, at any depth, is ambiguous or
/// has an invalid type.
pub fn emit_entity(
    name: &str,
    kind: EntityKind,
    block: &Block,
) -> Result<Vec<String>, TranslateError> {
    Ok(build_entity(name, kind, block)?.render())
}

/// Build the CUE tree for one entity without rendering it.
///
/// Errors name the entity path (`entity.block.nested`) and the attribute.
pub fn build_entity(name: &str, kind: EntityKind, block: &Block) -> Result<Entity, TranslateError> {
    debug!(entity = name, kind = kind.tag(), "emitting entity");
    let body = block_body(block, kind, name)?;
    Ok(Entity {
        name: name.to_string(),
        kind,
        body,
    })
}

fn block_body(block: &Block, kind: EntityKind, path: &str) -> Result<Struct, TranslateError> {
    let mut body = attribute_body(&block.attributes, path)?;

    if kind.emits_blocks() {
        for (name, block_type) in &block.block_types {
            let nested_path = format!("{}.{}", path, name);
            let nested = block_body(&block_type.block, kind, &nested_path)?;
            body.fields.push(Field {
                label: name.clone(),
                marker: Marker::Optional,
                value: Expr::Struct(nested),
            });
        }
    } else if !block.block_types.is_empty() {
        debug!(
            entity = path,
            count = block.block_types.len(),
            "ignoring block types outside resources"
        );
    }

    Ok(body)
}

fn attribute_body(
    attributes: &BTreeMap<String, Attribute>,
    path: &str,
) -> Result<Struct, TranslateError> {
    let classified = classify(path, attributes)?;
    let mut body = Struct::default();

    let required = classified.required.iter().map(|&(n, a)| (n, a, Marker::Required));
    let optional = classified.optional.iter().map(|&(n, a)| (n, a, Marker::Optional));

    for (name, attribute, marker) in required.chain(optional) {
        let value = match &attribute.nested_type {
            Some(nested) => nested_value(nested, &format!("{}.{}", path, name))?,
            None => map_attribute_type(attribute.ty.as_ref(), path, name)?.place_in(&mut body),
        };
        body.fields.push(Field {
            label: name.to_string(),
            marker,
            value,
        });
    }

    Ok(body)
}

fn nested_value(nested: &NestedType, path: &str) -> Result<Expr, TranslateError> {
    let inner = Expr::Struct(attribute_body(&nested.attributes, path)?);
    Ok(match nested.nesting_mode {
        NestingMode::Single | NestingMode::Group => inner,
        NestingMode::List => Expr::List(Box::new(inner)),
        NestingMode::Set => Expr::Set(Box::new(inner)),
        NestingMode::Map => Expr::Map(Box::new(inner)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn block(value: Value) -> Block {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn single_required_attribute() {
        let lines = emit_entity(
            "widget",
            EntityKind::DataSource,
            &block(json!({
                "attributes": { "id": { "type": "string", "required": true } }
            })),
        )
        .unwrap();
        assert_eq!(lines, vec!["widget?: #DataSource?: {", "\tid!: string", "}"]);
    }

    #[test]
    fn empty_entity_is_balanced() {
        let lines = emit_entity("empty", EntityKind::Resource, &Block::default()).unwrap();
        assert_eq!(lines, vec!["empty?: #Resource?: {}"]);
    }

    #[test]
    fn computed_only_attributes_are_dropped() {
        let lines = emit_entity(
            "widget",
            EntityKind::Resource,
            &block(json!({
                "attributes": {
                    "arn": { "type": "string", "computed": true },
                    "name": { "type": "string", "optional": true, "computed": true }
                }
            })),
        )
        .unwrap();
        assert_eq!(lines, vec!["widget?: #Resource?: {", "\tname?: string", "}"]);
    }

    #[test]
    fn required_before_optional() {
        let lines = emit_entity(
            "widget",
            EntityKind::Resource,
            &block(json!({
                "attributes": {
                    "a_opt": { "type": "string", "optional": true },
                    "z_req": { "type": "string", "required": true },
                    "b_req": { "type": "bool", "required": true }
                }
            })),
        )
        .unwrap();
        assert_eq!(
            lines,
            vec![
                "widget?: #Resource?: {",
                "\tb_req!: bool",
                "\tz_req!: string",
                "\ta_opt?: string",
                "}",
            ]
        );
    }

    #[test]
    fn block_types_recurse_for_resources() {
        let lines = emit_entity(
            "server",
            EntityKind::Resource,
            &block(json!({
                "attributes": { "name": { "type": "string", "required": true } },
                "block_types": {
                    "disk": {
                        "nesting_mode": "list",
                        "block": {
                            "attributes": { "size": { "type": "number", "required": true } },
                            "block_types": {
                                "encryption": {
                                    "nesting_mode": "single",
                                    "block": {
                                        "attributes": {
                                            "key": { "type": "string", "optional": true }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            })),
        )
        .unwrap();
        assert_eq!(
            lines,
            vec![
                "server?: #Resource?: {",
                "\tname!: string",
                "\tdisk?: {",
                "\t\tsize!: number",
                "\t\tencryption?: {",
                "\t\t\tkey?: string",
                "\t\t}",
                "\t}",
                "}",
            ]
        );
    }

    #[test]
    fn data_sources_ignore_block_types() {
        let lines = emit_entity(
            "lookup",
            EntityKind::DataSource,
            &block(json!({
                "attributes": { "id": { "type": "string", "required": true } },
                "block_types": {
                    "filter": { "block": { "attributes": {} } }
                }
            })),
        )
        .unwrap();
        assert!(!lines.iter().any(|l| l.contains("filter")));
    }

    #[test]
    fn nested_type_follows_nesting_mode() {
        let lines = emit_entity(
            "widget",
            EntityKind::DataSource,
            &block(json!({
                "attributes": {
                    "rules": {
                        "optional": true,
                        "nested_type": {
                            "nesting_mode": "set",
                            "attributes": {
                                "port": { "type": "number", "required": true },
                                "id": { "type": "string", "computed": true }
                            }
                        }
                    }
                }
            })),
        )
        .unwrap();
        assert_eq!(
            lines,
            vec![
                "widget?: #DataSource?: {",
                "\trules?: [...{",
                "\t\tport!: number",
                "\t}] & list.UniqueItems()",
                "}",
            ]
        );
    }

    #[test]
    fn object_definitions_follow_fields() {
        let lines = emit_entity(
            "widget",
            EntityKind::Resource,
            &block(json!({
                "attributes": {
                    "x": {
                        "type": ["set", ["object", { "b": "string", "a": "string" }]],
                        "required": true
                    },
                    "y": {
                        "type": ["list", ["object", { "c": "bool" }]],
                        "optional": true
                    }
                }
            })),
        )
        .unwrap();
        assert_eq!(
            lines,
            vec![
                "widget?: #Resource?: {",
                "\tx!: [..._#x] & list.UniqueItems()",
                "\ty?: [..._#y]",
                "\t_#x: {",
                "\t\ta!: string",
                "\t\tb!: string",
                "\t}",
                "\t_#y: {",
                "\t\tc!: bool",
                "\t}",
                "}",
            ]
        );
    }

    #[test]
    fn errors_name_nested_path() {
        let result = build_entity(
            "server",
            EntityKind::Resource,
            &block(json!({
                "block_types": {
                    "disk": {
                        "block": {
                            "attributes": { "size": { "type": ["tuple", []], "required": true } }
                        }
                    }
                }
            })),
        );
        assert!(matches!(
            result,
            Err(TranslateError::InvalidType { entity, attribute, .. })
                if entity == "server.disk" && attribute == "size"
        ));
    }

    #[test]
    fn ambiguous_nested_attribute_aborts() {
        let result = build_entity(
            "widget",
            EntityKind::Resource,
            &block(json!({
                "attributes": {
                    "config": {
                        "optional": true,
                        "nested_type": {
                            "attributes": { "mode": { "type": "string" } }
                        }
                    }
                }
            })),
        );
        assert!(matches!(
            result,
            Err(TranslateError::AmbiguousAttribute { entity, attribute, .. })
                if entity == "widget.config" && attribute == "mode"
        ));
    }
}
