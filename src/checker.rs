//! Output checking - static sanity checks on emitted CUE source.
//!
//! This is not a CUE compiler. It catches the structural mistakes that would
//! make the compiler reject a generated schema outright:
//! - Unbalanced `{}`, `[]` and `()` delimiters
//! - `list.UniqueItems()` used without `import "list"`, or the import left unused
//! - The same definition declared twice in one struct
//! - The same entity wrapper emitted twice (warning)

use std::collections::HashSet;

use serde::Serialize;

use crate::cue::{LIST_IMPORT, UNIQUE_ITEMS};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic from checking.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    /// 1-based line number in the checked source.
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "line {}: {}[{}]: {}", self.line, severity, self.code, self.message)
    }
}

/// Result of checking one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckResult {
    pub errors: usize,
    pub warnings: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    /// Returns true if no errors were found.
    pub fn is_ok(&self) -> bool {
        self.errors == 0
    }

    fn push(&mut self, severity: Severity, code: &str, line: usize, message: String) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.diagnostics.push(Diagnostic {
            severity,
            code: code.to_string(),
            line,
            message,
        });
    }
}

/// Check emitted CUE source.
pub fn check(source: &str) -> CheckResult {
    let mut result = CheckResult::default();
    check_delimiters(source, &mut result);
    check_list_import(source, &mut result);
    check_duplicate_definitions(source, &mut result);
    check_duplicate_entities(source, &mut result);
    result
}

fn check_delimiters(source: &str, result: &mut CheckResult) {
    let mut stack: Vec<(char, usize)> = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        let mut in_string = false;
        let mut escaped = false;

        for c in line.chars() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '{' | '[' | '(' => stack.push((c, line_no)),
                '}' | ']' | ')' => {
                    let expected = match c {
                        '}' => '{',
                        ']' => '[',
                        _ => '(',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        Some((open, opened_at)) => result.push(
                            Severity::Error,
                            "E001",
                            line_no,
                            format!("'{}' closes '{}' opened on line {}", c, open, opened_at),
                        ),
                        None => result.push(
                            Severity::Error,
                            "E001",
                            line_no,
                            format!("unexpected '{}'", c),
                        ),
                    }
                }
                _ => {}
            }
        }

        if in_string {
            result.push(
                Severity::Error,
                "E002",
                line_no,
                "unterminated string".to_string(),
            );
        }
    }

    for (open, opened_at) in stack {
        result.push(
            Severity::Error,
            "E003",
            opened_at,
            format!("'{}' is never closed", open),
        );
    }
}

fn check_list_import(source: &str, result: &mut CheckResult) {
    let import_line = source
        .lines()
        .position(|l| l.trim() == LIST_IMPORT)
        .map(|i| i + 1);
    let first_use = source
        .lines()
        .position(|l| outside_strings(l).contains(UNIQUE_ITEMS))
        .map(|i| i + 1);

    match (import_line, first_use) {
        (None, Some(line)) => result.push(
            Severity::Error,
            "E004",
            line,
            "list package used but not imported".to_string(),
        ),
        (Some(line), None) => result.push(
            Severity::Error,
            "E005",
            line,
            "list package imported but not used".to_string(),
        ),
        _ => {}
    }
}

fn check_duplicate_definitions(source: &str, result: &mut CheckResult) {
    // One set of declared names per open struct.
    let mut scopes: Vec<HashSet<String>> = vec![HashSet::new()];

    for (index, line) in source.lines().enumerate() {
        let code = outside_strings(line);
        let trimmed = code.trim_start();
        if trimmed.starts_with("_#") {
            if let Some((name, _)) = trimmed.split_once(':') {
                if let Some(scope) = scopes.last_mut() {
                    if !scope.insert(name.to_string()) {
                        result.push(
                            Severity::Error,
                            "E006",
                            index + 1,
                            format!("definition {} declared twice in the same struct", name),
                        );
                    }
                }
            }
        }
        for c in code.chars() {
            match c {
                '{' => scopes.push(HashSet::new()),
                '}' if scopes.len() > 1 => {
                    scopes.pop();
                }
                _ => {}
            }
        }
    }
}

fn check_duplicate_entities(source: &str, result: &mut CheckResult) {
    let mut seen = HashSet::new();
    for (index, line) in source.lines().enumerate() {
        // Entity wrappers are the only unindented field lines.
        if line.starts_with(char::is_whitespace) || !line.contains("?: #") {
            continue;
        }
        let header = line.trim_end_matches(|c: char| c == '{' || c == '}').trim_end();
        if !seen.insert(header.to_string()) {
            result.push(
                Severity::Warning,
                "W001",
                index + 1,
                format!("entity emitted more than once: {}", header),
            );
        }
    }
}

// The line with every string literal reduced to `""`.
fn outside_strings(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in line.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    in_string = false;
                    out.push('"');
                }
                _ => {}
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_balanced_schema() {
        let source = "import \"list\"\n\nwidget?: #Resource?: {\n\ttags?: [...string] & list.UniqueItems()\n\tmeta?: {[string]: string}\n}\n";
        let result = check(source);
        assert!(result.is_ok(), "{:?}", result.diagnostics);
        assert_eq!(result.warnings, 0);
    }

    #[test]
    fn flags_unclosed_brace() {
        let result = check("widget?: #Resource?: {\n\tid!: string\n");
        assert!(!result.is_ok());
        assert_eq!(result.diagnostics[0].code, "E003");
        assert_eq!(result.diagnostics[0].line, 1);
    }

    #[test]
    fn flags_mismatched_closer() {
        let result = check("a?: [...{\n}}\n");
        assert!(result.diagnostics.iter().any(|d| d.code == "E001"));
    }

    #[test]
    fn ignores_delimiters_in_quoted_labels() {
        let result = check("\"odd{label\"?: #Resource?: {}\n");
        assert!(result.is_ok(), "{:?}", result.diagnostics);
    }

    #[test]
    fn flags_missing_and_unused_import() {
        let result = check("a?: #Resource?: {\n\tb?: [...string] & list.UniqueItems()\n}\n");
        assert!(result.diagnostics.iter().any(|d| d.code == "E004"));

        let result = check("import \"list\"\n\na?: #Resource?: {}\n");
        assert!(result.diagnostics.iter().any(|d| d.code == "E005"));
    }

    #[test]
    fn list_inside_quoted_label_is_not_a_use() {
        let result = check("a?: #Resource?: {\n\t\"allowlist.ips\"?: string\n}\n");
        assert!(result.is_ok(), "{:?}", result.diagnostics);
    }

    #[test]
    fn flags_duplicate_definition_in_one_struct() {
        let source = "a?: #Resource?: {\n\tx?: [..._#x]\n\t_#x: {\n\t\tp!: string\n\t}\n\t_#x: {\n\t\tq!: number\n\t}\n}\n";
        let result = check(source);
        assert!(!result.is_ok());
        assert_eq!(result.diagnostics[0].code, "E006");
        assert_eq!(result.diagnostics[0].line, 6);
    }

    #[test]
    fn same_definition_in_sibling_structs_is_fine() {
        let source = "a?: #Resource?: {\n\tx?: [..._#x]\n\t_#x: {\n\t\tp!: string\n\t}\n}\n\nb?: #Resource?: {\n\tx?: [..._#x]\n\t_#x: {\n\t\tq!: number\n\t}\n}\n";
        assert!(check(source).is_ok());
    }

    #[test]
    fn strips_string_literals() {
        assert_eq!(outside_strings("\"a{b\"?: x"), "\"\"?: x");
        assert_eq!(outside_strings("\"a\\\"b\"?: x"), "\"\"?: x");
    }

    #[test]
    fn warns_on_duplicate_entity() {
        let result = check("a?: #Resource?: {}\na?: #Resource?: {}\na?: #DataSource?: {}\n");
        assert!(result.is_ok());
        assert_eq!(result.warnings, 1);
        assert_eq!(result.diagnostics[0].line, 2);
    }

    #[test]
    fn diagnostic_display() {
        let diagnostic = Diagnostic {
            severity: Severity::Error,
            code: "E003".into(),
            line: 4,
            message: "'{' is never closed".into(),
        };
        assert_eq!(diagnostic.to_string(), "line 4: error[E003]: '{' is never closed");
    }
}
