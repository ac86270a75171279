//! Terraform provider schema to CUE
//!
//! Translates the output of `terraform providers schema -json` for a single
//! provider into a CUE schema that states, for every data source and
//! resource, which fields must be set, which may be set, and the shape of
//! each value.
//!
//! # Example
//!
//! ```
//! use ratchet::translate;
//!
//! let schema = br#"{
//!     "format_version": "1.0",
//!     "provider_schemas": {
//!         "registry.terraform.io/acme/widgets": {
//!             "data_source_schemas": {
//!                 "widget": {
//!                     "block": {
//!                         "attributes": {
//!                             "id": { "type": "string", "required": true },
//!                             "arn": { "type": "string", "computed": true }
//!                         }
//!                     }
//!                 }
//!             }
//!         }
//!     }
//! }"#;
//!
//! let cue = translate(schema, "registry.terraform.io/acme/widgets").unwrap();
//! assert_eq!(cue, "widget?: #DataSource?: {\n\tid!: string\n}\n");
//! ```
//!
//! # Attribute Rules
//!
//! | Flags | Emitted as |
//! |-------|------------|
//! | `required` | `name!: T` |
//! | `optional` (with or without `computed`) | `name?: T` |
//! | `computed` only | omitted |
//! | none, or `required` and `optional` | error |
//!
//! # Type Rules
//!
//! | Terraform | CUE |
//! |-----------|-----|
//! | `"string"`, `"number"`, `"bool"` | same |
//! | `"dynamic"` | `_` |
//! | `["list", T]` | `[...T]` |
//! | `["set", T]` | `[...T] & list.UniqueItems()` |
//! | `["map", T]` | `{[string]: T}` |
//! | `["object", {..}]` | hidden definition `_#attr` with every field required |

mod checker;
mod classifier;
mod cue;
mod emitter;
mod error;
mod loader;
mod locator;
mod mapper;
mod model;
mod translator;
mod types;
mod validator;

pub use checker::{check, CheckResult, Diagnostic, Severity};
pub use classifier::{classify, Classified, Presence};
pub use cue::{Definition, Entity, Expr, Field, Marker, Struct};
pub use emitter::{build_entity, emit_entity};
pub use error::{LoadError, SchemaError, TranslateError};
pub use loader::load_document;
pub use locator::{locate, parse_document};
pub use mapper::{map_attribute_type, map_type, MappedType, Primitive, TypeDescriptor};
pub use model::{
    Attribute, Block, BlockType, EntitySchema, NestedType, ProviderSchema, ProviderSchemaDocument,
};
pub use translator::{translate, translate_provider, translate_with};
pub use types::{EntityKind, NestingMode, TranslateOptions};
pub use validator::{shape_errors, validate_provider_shape};
