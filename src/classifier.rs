//! Attribute classification into required, optional and skipped groups.

use tracing::trace;

use crate::error::TranslateError;
use crate::model::Attribute;

/// How an attribute appears in the emitted schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// Computed-only: derived by the provider, never written by users.
    Skip,
}

impl Presence {
    /// Classify a single attribute from its flags.
    ///
    /// # Errors
    ///
    /// Returns `TranslateError::AmbiguousAttribute` if the attribute is both
    /// required and optional, or none of required, optional and computed.
    pub fn of(attribute: &Attribute, entity: &str, name: &str) -> Result<Self, TranslateError> {
        let ambiguous = |reason| TranslateError::AmbiguousAttribute {
            entity: entity.to_string(),
            attribute: name.to_string(),
            reason,
        };
        match (attribute.required, attribute.optional, attribute.computed) {
            (true, true, _) => Err(ambiguous("both required and optional")),
            (true, false, _) => Ok(Presence::Required),
            (false, true, _) => Ok(Presence::Optional),
            (false, false, true) => Ok(Presence::Skip),
            (false, false, false) => Err(ambiguous("neither required, optional, nor computed")),
        }
    }
}

/// Attributes of one struct, split and ordered for emission.
#[derive(Debug, Default)]
pub struct Classified<'a> {
    pub required: Vec<(&'a str, &'a Attribute)>,
    pub optional: Vec<(&'a str, &'a Attribute)>,
    pub skipped: usize,
}

impl<'a> Classified<'a> {
    /// Required attributes followed by optional ones.
    pub fn in_emission_order(&self) -> impl Iterator<Item = (&'a str, &'a Attribute)> + '_ {
        self.required.iter().chain(self.optional.iter()).copied()
    }
}

/// Partition attributes into required and optional, dropping computed-only ones.
///
/// Each group is sorted by attribute name, whatever order the input yields.
///
/// # Errors
///
/// Returns `TranslateError::AmbiguousAttribute` on the first attribute whose
/// flags do not classify.
pub fn classify<'a, I>(entity: &str, attributes: I) -> Result<Classified<'a>, TranslateError>
where
    I: IntoIterator<Item = (&'a String, &'a Attribute)>,
{
    let mut classified = Classified::default();
    for (name, attribute) in attributes {
        match Presence::of(attribute, entity, name)? {
            Presence::Required => classified.required.push((name.as_str(), attribute)),
            Presence::Optional => classified.optional.push((name.as_str(), attribute)),
            Presence::Skip => {
                trace!(entity, attribute = %name, "skipping computed-only attribute");
                classified.skipped += 1;
            }
        }
    }
    classified.required.sort_unstable_by(|a, b| a.0.cmp(b.0));
    classified.optional.sort_unstable_by(|a, b| a.0.cmp(b.0));
    Ok(classified)
}
