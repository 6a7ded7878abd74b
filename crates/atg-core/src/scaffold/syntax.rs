//! Per-framework statement, placeholder and identifier rules.
//!
//! Everything here produces single lines without indentation; the templates
//! own layout. Free text is flattened and escaped so it can never close a
//! comment, docstring or string literal early.

use std::collections::{BTreeMap, BTreeSet};

use crate::framework::{Framework, pascal_case};
use crate::keyword::{KeywordEntry, StepKind};
use crate::matcher::MappingDecision;
use crate::normalize::tokens_in_order;

/// Marker that starts every placeholder stub.
pub const PLACEHOLDER_MARKER: &str = "ATG-PLACEHOLDER";

const PYTHON_RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

const JAVA_RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while", "var", "record", "yield",
];

const GHERKIN_LEADERS: &[&str] = &[
    "feature", "rule", "background", "scenario", "example", "examples", "given", "when",
    "then", "and", "but", "*", "@", "#", "|", "\"\"\"", "```",
];

/// Collapses all whitespace (including newlines) into single spaces.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn reserved(framework: Framework) -> &'static [&'static str] {
    match framework {
        Framework::Junit => JAVA_RESERVED,
        _ => PYTHON_RESERVED,
    }
}

fn is_identifier(name: &str, framework: Framework) -> bool {
    let mut chars = name.chars();
    let starts_ok = matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !reserved(framework).contains(&name)
}

/// Makes `raw` a valid identifier while keeping its case (module and class
/// names taken from file paths).
fn sanitize_identifier(raw: &str, framework: Framework) -> Option<String> {
    let mut ident: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.trim_matches('_').is_empty() {
        return None;
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if reserved(framework).contains(&ident.as_str()) {
        ident.push('_');
    }
    Some(ident)
}

fn finish_identifier(mut ident: String, fallback: &str, framework: Framework) -> String {
    if ident.is_empty() {
        ident = fallback.to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if reserved(framework).contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

pub fn snake_identifier(text: &str, fallback: &str) -> String {
    finish_identifier(tokens_in_order(text).join("_"), fallback, Framework::Pytest)
}

pub fn camel_identifier(text: &str, fallback: &str) -> String {
    let words = tokens_in_order(text);
    let ident = match words.split_first() {
        Some((first, rest)) => format!("{}{}", first, pascal_case(rest)),
        None => String::new(),
    };
    finish_identifier(ident, fallback, Framework::Junit)
}

/// Function/method name used to call a keyword. Names that already are
/// valid identifiers are kept verbatim.
fn callable_name(keyword: &KeywordEntry, framework: Framework) -> String {
    if is_identifier(&keyword.name, framework) {
        return keyword.name.clone();
    }
    match framework {
        Framework::Junit => camel_identifier(&keyword.name, "keyword"),
        _ => snake_identifier(&keyword.name, "keyword"),
    }
}

/// Escapes text for a double-quoted Python or Java string literal (also
/// safe inside a Python triple-quoted docstring).
pub fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in single_line(text).chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Text safe inside a Python docstring: the contents of `quoted` without
/// the surrounding quotes.
pub fn docstring_text(text: &str) -> String {
    let q = quoted(text);
    q[1..q.len() - 1].to_string()
}

/// Text safe inside a comment of the given framework.
pub fn comment_text(text: &str, framework: Framework) -> String {
    let line = single_line(text);
    match framework {
        // `\u` escapes are decoded before comments are stripped in Java
        Framework::Junit => line.replace("\\u", "\\ u").replace("*/", "* /"),
        _ => line,
    }
}

/// A Robot cell: single spaced and not mistaken for a comment or continuation.
pub fn robot_cell(text: &str) -> String {
    let line = single_line(text);
    if line.starts_with('#') || line.starts_with("...") || line.starts_with('[') {
        format!("\\{}", line)
    } else {
        line
    }
}

/// A Gherkin free-text line that cannot be parsed as a keyword line.
pub fn gherkin_text(text: &str) -> String {
    let line = single_line(text);
    let lower = line.to_lowercase();
    if GHERKIN_LEADERS.iter().any(|leader| lower.starts_with(leader)) {
        format!("- {}", line)
    } else {
        line
    }
}

fn comment_prefix(framework: Framework) -> &'static str {
    match framework {
        Framework::Junit => "//",
        _ => "#",
    }
}

fn argument_placeholders(arity: usize) -> Vec<String> {
    (1..=arity).map(|i| format!("<arg{}>", i)).collect()
}

/// Step type a Gherkin statement runs as: the keyword's own type, else the
/// type of the previous statement, else `Given`.
pub fn gherkin_step_kind(keyword: &KeywordEntry, previous: Option<StepKind>) -> StepKind {
    keyword
        .step_kind
        .or(previous)
        .unwrap_or(StepKind::Given)
}

/// The statement invoking a mapped keyword. For Gherkin, `previous` is the
/// step type of the preceding mapped statement; repeating it yields `And`.
pub fn statement(framework: Framework, keyword: &KeywordEntry, previous: Option<StepKind>) -> String {
    let args = argument_placeholders(keyword.arity);
    match framework {
        Framework::Robot => {
            let mut cells = vec![robot_cell(&keyword.name)];
            cells.extend(args);
            cells.join("    ")
        }
        Framework::Pytest => {
            let args: Vec<String> = args.iter().map(|a| quoted(a)).collect();
            format!("{}({})", callable_name(keyword, framework), args.join(", "))
        }
        Framework::Gherkin => {
            let kind = gherkin_step_kind(keyword, previous);
            let leader = if previous == Some(kind) { "And" } else { kind.keyword() };
            format!("{} {}", leader, single_line(&keyword.name))
        }
        Framework::Junit => {
            let args: Vec<String> = args.iter().map(|a| quoted(a)).collect();
            format!("{}({});", callable_name(keyword, framework), args.join(", "))
        }
    }
}

/// Comment lines standing in for an unmapped step.
pub fn placeholder(framework: Framework, decision: &MappingDecision) -> Vec<String> {
    let c = comment_prefix(framework);
    let step = &decision.step;
    let mut lines = vec![format!(
        "{} {} step {}: {}",
        c,
        PLACEHOLDER_MARKER,
        step.order,
        comment_text(&step.action, framework)
    )];
    if !step.expected_result.trim().is_empty() {
        lines.push(format!(
            "{}   expected: {}",
            c,
            comment_text(&step.expected_result, framework)
        ));
    }
    if let Some(error) = &decision.error {
        lines.push(format!("{}   error: {}", c, comment_text(error, framework)));
    } else if let Some(nearest) = &decision.nearest_keyword {
        lines.push(format!(
            "{}   nearest keyword: {} (confidence {:.2})",
            c,
            comment_text(nearest, framework),
            decision.confidence
        ));
    }
    lines
}

/// Splits a source reference into path segments without extension.
fn path_segments(source_ref: &str) -> Vec<String> {
    let trimmed = source_ref.trim();
    let without_ext = match trimmed.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains(['/', '\\']) && !stem.is_empty() => stem,
        _ => trimmed,
    };
    without_ext
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .map(str::to_string)
        .collect()
}

fn python_module(source_ref: &str) -> Option<String> {
    let segments: Option<Vec<String>> = path_segments(source_ref)
        .iter()
        .map(|s| sanitize_identifier(s, Framework::Pytest))
        .collect();
    segments.filter(|s| !s.is_empty()).map(|s| s.join("."))
}

fn java_class_path(source_ref: &str) -> Option<String> {
    let mut segments = path_segments(source_ref);
    if let Some(pos) = segments.iter().rposition(|s| s == "java") {
        segments.drain(..=pos);
    }
    let segments: Option<Vec<String>> = segments
        .iter()
        .map(|s| sanitize_identifier(s, Framework::Junit))
        .collect();
    segments.filter(|s| !s.is_empty()).map(|s| s.join("."))
}

/// Import lines for the mapped keywords of a document.
pub fn imports<'a, I>(framework: Framework, keywords: I, skip_source: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a KeywordEntry>,
{
    let mut by_source: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
    for keyword in keywords {
        if keyword.source_ref == skip_source || keyword.source_ref.trim().is_empty() {
            continue;
        }
        by_source
            .entry(keyword.source_ref.as_str())
            .or_default()
            .insert(callable_name(keyword, framework));
    }

    match framework {
        Framework::Robot => by_source
            .keys()
            .map(|source| {
                let kind = if source.ends_with(".py") { "Library" } else { "Resource" };
                format!("{}    {}", kind, robot_cell(source))
            })
            .collect(),
        Framework::Pytest => {
            let mut lines = vec!["import pytest".to_string()];
            lines.extend(by_source.iter().filter_map(|(source, names)| {
                python_module(source).map(|module| {
                    let names: Vec<&str> = names.iter().map(String::as_str).collect();
                    format!("from {} import {}", module, names.join(", "))
                })
            }));
            lines
        }
        Framework::Gherkin => Vec::new(),
        Framework::Junit => {
            let mut lines = vec![
                "import org.junit.jupiter.api.DisplayName;".to_string(),
                "import org.junit.jupiter.api.Tag;".to_string(),
                "import org.junit.jupiter.api.Test;".to_string(),
            ];
            let statics: BTreeSet<String> = by_source
                .keys()
                .filter_map(|source| java_class_path(source))
                .map(|class| format!("import static {}.*;", class))
                .collect();
            lines.extend(statics);
            lines
        }
    }
}

/// Tag annotations/cells, already in framework syntax.
pub fn tags(framework: Framework, tags: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tags.iter()
        .filter_map(|tag| {
            let rendered = match framework {
                Framework::Robot => robot_cell(tag),
                Framework::Pytest => {
                    let words = tokens_in_order(tag);
                    if words.is_empty() {
                        String::new()
                    } else {
                        snake_identifier(tag, "tag")
                    }
                }
                Framework::Gherkin => {
                    let words = tokens_in_order(tag);
                    if words.is_empty() {
                        String::new()
                    } else {
                        format!("@{}", words.join("_"))
                    }
                }
                Framework::Junit => {
                    if tag.trim().is_empty() {
                        String::new()
                    } else {
                        quoted(tag)
                    }
                }
            };
            (!rendered.is_empty() && seen.insert(rendered.clone())).then_some(rendered)
        })
        .collect()
}
