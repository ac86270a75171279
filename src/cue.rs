//! Minimal CUE syntax tree and its line renderer.
//!
//! The emitter builds these nodes; rendering is the only place that knows
//! about CUE punctuation, indentation and label quoting.

use crate::types::EntityKind;

/// Constraint conjoined to a list to forbid duplicate elements.
pub const UNIQUE_ITEMS: &str = "list.UniqueItems()";

/// Import line required whenever [`UNIQUE_ITEMS`] is used.
pub const LIST_IMPORT: &str = "import \"list\"";

// Keywords, plus the identifiers emitted values refer to: an unquoted label
// of the same name would shadow them inside its struct.
const RESERVED: &[&str] = &[
    "package", "import", "for", "in", "if", "let", "true", "false", "null", "string", "number",
    "bool", "list", "_",
];

/// Whether a field is mandatory (`!`) or may be omitted (`?`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Required,
    Optional,
}

impl Marker {
    pub fn token(&self) -> &'static str {
        match self {
            Marker::Required => "!",
            Marker::Optional => "?",
        }
    }
}

/// A CUE value expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A bare identifier or builtin type: `string`, `_`, `_#tags`.
    Ident(String),
    /// `[...T]`
    List(Box<Expr>),
    /// `[...T] & list.UniqueItems()`
    Set(Box<Expr>),
    /// `{[string]: T}`
    Map(Box<Expr>),
    /// An inline struct literal.
    Struct(Struct),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    /// Render the expression as single-depth CUE source.
    pub fn to_source(&self) -> String {
        self.render(0)
    }

    /// Replace references to the identifier `from` with `to`.
    pub fn rename(&mut self, from: &str, to: &str) {
        match self {
            Expr::Ident(name) => {
                if name == from {
                    *name = to.to_string();
                }
            }
            Expr::List(inner) | Expr::Set(inner) | Expr::Map(inner) => inner.rename(from, to),
            Expr::Struct(_) => {}
        }
    }

    fn uses_list(&self) -> bool {
        match self {
            Expr::Ident(_) => false,
            Expr::Set(_) => true,
            Expr::List(inner) | Expr::Map(inner) => inner.uses_list(),
            Expr::Struct(body) => body.uses_list(),
        }
    }

    fn render(&self, depth: usize) -> String {
        match self {
            Expr::Ident(name) => name.clone(),
            Expr::List(inner) => format!("[...{}]", inner.render(depth)),
            Expr::Set(inner) => format!("[...{}] & {}", inner.render(depth), UNIQUE_ITEMS),
            Expr::Map(inner) => format!("{{[string]: {}}}", inner.render(depth)),
            Expr::Struct(body) => body.render(depth),
        }
    }
}

/// `label!: value` or `label?: value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: String,
    pub marker: Marker,
    pub value: Expr,
}

/// A hidden definition local to the struct that declares it: `_#name: {...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub body: Struct,
}

/// Body of a struct: fields in emission order, then local definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Struct {
    pub fields: Vec<Field>,
    pub definitions: Vec<Definition>,
}

impl Struct {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.definitions.is_empty()
    }

    /// Add a local definition and return the name it was declared under.
    ///
    /// Distinct labels can sanitize to the same name (`a-b`, `a_b`), and CUE
    /// would merge both declarations, so a taken name gets a numeric suffix.
    pub fn declare(&mut self, mut definition: Definition) -> String {
        if self.has_definition(&definition.name) {
            let base = definition.name.clone();
            let mut n = 1;
            while self.has_definition(&format!("{}_{}", base, n)) {
                n += 1;
            }
            definition.name = format!("{}_{}", base, n);
        }
        let name = definition.name.clone();
        self.definitions.push(definition);
        name
    }

    fn has_definition(&self, name: &str) -> bool {
        self.definitions.iter().any(|d| d.name == name)
    }

    /// Whether anything in this struct needs the `list` package.
    pub fn uses_list(&self) -> bool {
        self.fields.iter().any(|f| f.value.uses_list())
            || self.definitions.iter().any(|d| d.body.uses_list())
    }

    fn render(&self, depth: usize) -> String {
        if self.is_empty() {
            return "{}".to_string();
        }
        let indent = "\t".repeat(depth + 1);
        let mut out = String::from("{\n");
        for field in &self.fields {
            out.push_str(&format!(
                "{}{}{}: {}\n",
                indent,
                label(&field.label),
                field.marker.token(),
                field.value.render(depth + 1)
            ));
        }
        for def in &self.definitions {
            out.push_str(&format!(
                "{}{}: {}\n",
                indent,
                def.name,
                def.body.render(depth + 1)
            ));
        }
        out.push_str(&"\t".repeat(depth));
        out.push('}');
        out
    }
}

/// A top-level data source or resource: `name?: #Kind?: {...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,
    pub body: Struct,
}

impl Entity {
    /// Render the entity as CUE source lines.
    pub fn render(&self) -> Vec<String> {
        format!(
            "{}?: {}?: {}",
            label(&self.name),
            self.kind.tag(),
            self.body.render(0)
        )
        .lines()
        .map(String::from)
        .collect()
    }
}

/// Format a field label, quoting it when it is not a plain identifier.
pub fn label(name: &str) -> String {
    if is_plain_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Name of the hidden definition that holds an object type owned by `owner`.
pub fn definition_name(owner: &str) -> String {
    let mut name: String = owner
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$') {
        name.insert(0, '_');
    }
    format!("_#{}", name)
}

// A leading underscore would make the field hidden, and `#` a definition.
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED.contains(&name)
}

fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
