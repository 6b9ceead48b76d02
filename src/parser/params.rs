//! Parameter line shapes accepted inside a `Parameters:` section.

use crate::model::Parameter;
use regex::Regex;
use std::sync::LazyLock;

const UNKNOWN_TYPE: &str = "unknown";

// - name (Type): description
static RE_BULLET_TYPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\s*([A-Za-z_]\w*|\.\.\.)\s*\(([^)]+)\)\s*:\s*(.+)$").unwrap()
});

// - name: description
static RE_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s*([A-Za-z_]\w*|\.\.\.)\s*:\s*(.+)$").unwrap());

// name (Type): description
static RE_TYPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]\w*|\.\.\.)\s*\(([^)]+)\)\s*:\s*(.+)$").unwrap()
});

// name - Type: description
static RE_DASH_TYPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\-\s]+)\s*-\s*([^:]+):\s*(.+)$").unwrap());

// name - description
static RE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\-\s]+)\s*-\s*(.+)$").unwrap());

// name (Type) - description (hook style, single line)
static RE_TYPED_DASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]\w*|\.\.\.)\s*\(([^)]+)\)\s*-\s*(.+)$").unwrap()
});

// Indented `name (Type)` alone on its line; the description follows.
static RE_PENDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+([A-Za-z_]\w*|\.\.\.)\s*\(([^)]+)\)\s*$").unwrap()
});

/// Match one trimmed line against the one-line shapes, first match wins.
pub fn parse_line(line: &str) -> Option<Parameter> {
    if let Some(c) = RE_BULLET_TYPED.captures(line) {
        return Some(Parameter::new(&c[1], &c[2], &c[3]));
    }
    if let Some(c) = RE_BULLET.captures(line) {
        return Some(Parameter::new(&c[1], UNKNOWN_TYPE, &c[2]));
    }
    if let Some(c) = RE_TYPED.captures(line) {
        return Some(Parameter::new(&c[1], &c[2], &c[3]));
    }
    if let Some(c) = RE_DASH_TYPED.captures(line) {
        return Some(Parameter::new(&c[1], &c[2], &c[3]));
    }
    if let Some(c) = RE_DASH.captures(line) {
        return Some(Parameter::new(&c[1], UNKNOWN_TYPE, &c[2]));
    }
    if let Some(c) = RE_TYPED_DASH.captures(line) {
        return Some(Parameter::new(&c[1], &c[2], &c[3]));
    }
    None
}

/// `(name, type)` when the untrimmed line is the first half of a two-line
/// parameter. Only indented lines qualify.
pub fn pending_shape(raw: &str) -> Option<(String, String)> {
    RE_PENDING
        .captures(raw.trim_end())
        .map(|c| (c[1].trim().to_string(), c[2].trim().to_string()))
}
