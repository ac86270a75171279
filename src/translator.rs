//! Translation driver - a whole provider into one CUE document.

use tracing::{debug, info};

use crate::cue::{Entity, LIST_IMPORT};
use crate::emitter::build_entity;
use crate::error::TranslateError;
use crate::locator::{locate, parse_document};
use crate::model::ProviderSchema;
use crate::types::{EntityKind, TranslateOptions};

/// Translate one provider of a raw schema dump into CUE source.
///
/// Equivalent to [`translate_with`] with default options.
///
/// # Errors
///
/// Returns `TranslateError` if the document is malformed, the provider is
/// missing, or any attribute fails to classify or map.
pub fn translate(document: &[u8], address: &str) -> Result<String, TranslateError> {
    translate_with(document, address, &TranslateOptions::default())
}

/// Translate one provider of a raw schema dump into CUE source.
///
/// The result is deterministic: the same input always yields the same bytes.
///
/// # Errors
///
/// See [`translate`].
pub fn translate_with(
    document: &[u8],
    address: &str,
    options: &TranslateOptions,
) -> Result<String, TranslateError> {
    let document = parse_document(document)?;
    let provider = locate(&document, address)?;
    info!(
        provider = address,
        data_sources = provider.data_source_schemas.len(),
        resources = provider.resource_schemas.len(),
        "translating provider"
    );

    let mut output = translate_provider(&provider, options)?.join("\n");
    output.push('\n');
    Ok(output)
}

/// Emit every selected entity of a provider as CUE source lines.
///
/// Data sources come first, then resources, each ordered by name. The
/// `list` import is prepended only when some field needs it.
///
/// # Errors
///
/// Returns the first `TranslateError` raised by any entity; nothing is
/// emitted in that case.
pub fn translate_provider(
    provider: &ProviderSchema,
    options: &TranslateOptions,
) -> Result<Vec<String>, TranslateError> {
    let mut entities: Vec<Entity> = Vec::new();

    if options.data_sources {
        for (name, schema) in &provider.data_source_schemas {
            entities.push(build_entity(name, EntityKind::DataSource, &schema.block)?);
        }
    }
    if options.resources {
        for (name, schema) in &provider.resource_schemas {
            entities.push(build_entity(name, EntityKind::Resource, &schema.block)?);
        }
    }
    debug!(count = entities.len(), "built entities");

    let mut lines = Vec::new();
    if entities.iter().any(|e| e.body.uses_list()) {
        lines.push(LIST_IMPORT.to_string());
    }
    for entity in &entities {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(entity.render());
    }
    Ok(lines)
}
