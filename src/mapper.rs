//! Type mapping - Terraform type descriptors into CUE type expressions.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::cue::{definition_name, Definition, Expr, Field, Marker, Struct};
use crate::error::TranslateError;

/// Terraform primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Bool,
    Dynamic,
}

impl Primitive {
    /// Parse a primitive type name. Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Primitive::String),
            "number" => Some(Primitive::Number),
            "bool" => Some(Primitive::Bool),
            "dynamic" => Some(Primitive::Dynamic),
            _ => None,
        }
    }

    /// CUE spelling of the type; `dynamic` becomes top (`_`).
    pub fn cue_name(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Bool => "bool",
            Primitive::Dynamic => "_",
        }
    }
}

/// A parsed Terraform type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    List(Box<TypeDescriptor>),
    Set(Box<TypeDescriptor>),
    Map(Box<TypeDescriptor>),
    /// Anonymous record; every field is mandatory.
    Object(BTreeMap<String, TypeDescriptor>),
}

impl TypeDescriptor {
    /// Parse a raw JSON type descriptor.
    ///
    /// Accepts a primitive name (`"string"`) or a two-element tagged array
    /// (`["list", T]`, `["set", T]`, `["map", T]`, `["object", {..}]`).
    /// Returns `None` for any other shape.
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Primitive::parse(name).map(TypeDescriptor::Primitive),
            Value::Array(items) => {
                let [tag, element] = items.as_slice() else {
                    return None;
                };
                match tag.as_str()? {
                    "list" => Some(TypeDescriptor::List(Box::new(Self::parse(element)?))),
                    "set" => Some(TypeDescriptor::Set(Box::new(Self::parse(element)?))),
                    "map" => Some(TypeDescriptor::Map(Box::new(Self::parse(element)?))),
                    "object" => {
                        let mut fields = BTreeMap::new();
                        for (name, field_type) in element.as_object()? {
                            fields.insert(name.clone(), Self::parse(field_type)?);
                        }
                        Some(TypeDescriptor::Object(fields))
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Result of mapping one attribute type.
///
/// When the type contains an object, the object is hoisted into
/// `definition` and `expr` refers to it by name. The caller places the
/// definition in the struct that declares the attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedType {
    pub expr: Expr,
    pub definition: Option<Definition>,
}

impl MappedType {
    /// Declare the hoisted definition in `body` and return the value that
    /// refers to it under its final name.
    pub fn place_in(self, body: &mut Struct) -> Expr {
        let MappedType {
            mut expr,
            definition,
        } = self;
        if let Some(definition) = definition {
            let wanted = definition.name.clone();
            let declared = body.declare(definition);
            if declared != wanted {
                expr.rename(&wanted, &declared);
            }
        }
        expr
    }
}

/// Map a type descriptor into CUE, naming any hoisted object after `owner`.
pub fn map_type(descriptor: &TypeDescriptor, owner: &str) -> MappedType {
    let mut definition = None;
    let expr = map_expr(descriptor, owner, &mut definition);
    MappedType { expr, definition }
}

/// Parse and map the raw `type` of an attribute.
///
/// # Errors
///
/// Returns `TranslateError::InvalidType` if the type is missing or has an
/// unrecognized shape.
pub fn map_attribute_type(
    raw: Option<&Value>,
    entity: &str,
    attribute: &str,
) -> Result<MappedType, TranslateError> {
    let descriptor = raw
        .and_then(TypeDescriptor::parse)
        .ok_or_else(|| TranslateError::InvalidType {
            entity: entity.to_string(),
            attribute: attribute.to_string(),
            value: raw.map_or_else(|| "null".to_string(), Value::to_string),
        })?;
    Ok(map_type(&descriptor, attribute))
}

// An attribute type holds at most one object on its outer path: collections
// have a single element type, and deeper objects live inside its fields.
fn map_expr(
    descriptor: &TypeDescriptor,
    owner: &str,
    definition: &mut Option<Definition>,
) -> Expr {
    match descriptor {
        TypeDescriptor::Primitive(primitive) => Expr::ident(primitive.cue_name()),
        TypeDescriptor::List(element) => Expr::List(Box::new(map_expr(element, owner, definition))),
        TypeDescriptor::Set(element) => Expr::Set(Box::new(map_expr(element, owner, definition))),
        TypeDescriptor::Map(element) => Expr::Map(Box::new(map_expr(element, owner, definition))),
        TypeDescriptor::Object(fields) => {
            let name = definition_name(owner);
            *definition = Some(Definition {
                name: name.clone(),
                body: object_body(fields),
            });
            Expr::Ident(name)
        }
    }
}

fn object_body(fields: &BTreeMap<String, TypeDescriptor>) -> Struct {
    let mut body = Struct::default();
    for (name, field_type) in fields {
        let value = map_type(field_type, name).place_in(&mut body);
        body.fields.push(Field {
            label: name.clone(),
            marker: Marker::Required,
            value,
        });
    }
    body
}
