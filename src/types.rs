//! Core types shared across the translation pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Kind of a top-level provider entity.
///
/// Determines the CUE definition tag the entity is wrapped in, and whether
/// nested `block_types` are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    DataSource,
    Resource,
}

impl EntityKind {
    /// Returns the CUE definition tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            EntityKind::DataSource => "#DataSource",
            EntityKind::Resource => "#Resource",
        }
    }

    /// Whether nested block types are part of this kind's schema.
    pub fn emits_blocks(&self) -> bool {
        matches!(self, EntityKind::Resource)
    }
}

/// How a nested attribute group or block repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestingMode {
    #[default]
    Single,
    Group,
    List,
    Set,
    Map,
}

/// Options for a translation run.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Emit data source entities.
    pub data_sources: bool,
    /// Emit resource entities.
    pub resources: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslateOptions {
    /// Create options that emit every data source and resource.
    pub fn new() -> Self {
        Self {
            data_sources: true,
            resources: true,
        }
    }

    /// Include or exclude data sources.
    pub fn data_sources(mut self, enabled: bool) -> Self {
        self.data_sources = enabled;
        self
    }

    /// Include or exclude resources.
    pub fn resources(mut self, enabled: bool) -> Self {
        self.resources = enabled;
        self
    }
}
