//! Field parser, a single-pass, keyword-triggered state machine over the
//! lines of one FunctionDoc block.
//!
//! A line starting with a section keyword always finalizes the current
//! section and switches to the new one; text after the keyword seeds the new
//! section. Everything else is interpreted by the current section.

use super::{block_body, params, CLOSE_MARKER, OPEN_MARKER};
use crate::model::{Example, Parameter, ParsedDoc};
use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    None,
    Purpose,
    WhenCalled,
    WhenUsed,
    Parameters,
    Returns,
    Realm,
    Explanation,
    Examples,
}

const KEYWORDS: &[(&str, Section)] = &[
    ("Purpose:", Section::Purpose),
    ("When Called:", Section::WhenCalled),
    ("When Used:", Section::WhenUsed),
    ("Parameters:", Section::Parameters),
    ("Returns:", Section::Returns),
    ("Realm:", Section::Realm),
    ("Explanation of Panel:", Section::Explanation),
    ("Example Usage:", Section::Examples),
    ("Example Item:", Section::Examples),
    ("Example Class:", Section::Examples),
    ("Example Faction:", Section::Examples),
];

const DEFAULT_COMPLEXITY: &str = "example";

// Low Complexity: / High Complexity Example:
static RE_COMPLEXITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s+Complexity(?:\s+Example)?:").unwrap());

// Low: / Medium: / High:
static RE_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(low|medium|high):").unwrap());

// Basic Example: / Advanced Usage Example:
static RE_NAMED_EXAMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+Example:").unwrap());

// -- Low: inside a code fence
static RE_INLINE_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--\s*(\w+):").unwrap());

/// Parse one comment block (with or without its `--[[ ]]` markers).
pub fn parse(block: &str) -> ParsedDoc {
    let mut parser = FieldParser::default();
    for raw in block_body(block).lines() {
        parser.feed(raw);
    }
    parser.finish()
}

/// Match a section keyword at the start of a trimmed line.
pub fn keyword(line: &str) -> Option<(Section, &str)> {
    KEYWORDS
        .iter()
        .find_map(|(kw, section)| line.strip_prefix(kw).map(|rest| (*section, rest.trim())))
}

#[derive(Debug)]
struct PendingParam {
    name: String,
    ty: String,
}

#[derive(Debug)]
struct OpenExample {
    example: Example,
    in_code: bool,
}

impl OpenExample {
    fn new(complexity: String, in_code: bool) -> Self {
        OpenExample {
            example: Example {
                complexity,
                code: Vec::new(),
            },
            in_code,
        }
    }
}

#[derive(Debug, Default)]
struct FieldParser {
    doc: ParsedDoc,
    section: Section,
    /// Free-text lines of the current section
    buffer: Vec<String>,
    pending: Option<PendingParam>,
    example: Option<OpenExample>,
}

impl FieldParser {
    fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            // blank lines only matter inside example code
            if let Some(open) = self.example.as_mut().filter(|open| open.in_code) {
                open.example.code.push(String::new());
            }
            return;
        }
        if is_delimiter(line) {
            return;
        }

        if let Some((section, inline)) = keyword(line) {
            self.switch(section, inline);
            return;
        }

        match self.section {
            Section::None => {}
            Section::Parameters => self.parameter_line(raw, line),
            Section::Examples => self.example_line(raw, line),
            _ => self.buffer.push(line.to_string()),
        }
    }

    /// Finalize the current section, then enter `section` seeded with `inline`.
    fn switch(&mut self, section: Section, inline: &str) {
        self.finalize();
        self.section = section;
        if inline.is_empty() {
            return;
        }
        match section {
            Section::Parameters => self.parameter_line(inline, inline),
            // Text after `Example Usage:` is a caption, not code.
            Section::Examples | Section::None => {}
            _ => self.buffer.push(inline.to_string()),
        }
    }

    fn finalize(&mut self) {
        let text = self.buffer.join("\n").trim().to_string();
        self.buffer.clear();

        let slot = match self.section {
            Section::Purpose => &mut self.doc.purpose,
            Section::WhenCalled => &mut self.doc.when_called,
            Section::WhenUsed => &mut self.doc.when_used,
            Section::Returns => &mut self.doc.returns,
            Section::Realm => &mut self.doc.realm,
            Section::Explanation => &mut self.doc.explanation,
            Section::Parameters => {
                self.flush_pending();
                return;
            }
            Section::Examples => {
                self.close_example();
                return;
            }
            Section::None => return,
        };
        if !text.is_empty() {
            *slot = text;
        }
    }

    fn parameter_line(&mut self, raw: &str, line: &str) {
        if line.starts_with("--") {
            return;
        }
        if let Some((name, ty)) = params::pending_shape(raw) {
            self.flush_pending();
            self.pending = Some(PendingParam { name, ty });
            return;
        }
        if let Some(pending) = self.pending.take() {
            self.doc
                .parameters
                .push(Parameter::new(&pending.name, &pending.ty, line));
            return;
        }
        if let Some(param) = params::parse_line(line) {
            self.doc.parameters.push(param);
        }
    }

    fn flush_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.doc
                .parameters
                .push(Parameter::new(&pending.name, &pending.ty, ""));
        }
    }

    fn example_line(&mut self, raw: &str, line: &str) {
        if line.starts_with("```") {
            match self.example.as_mut() {
                Some(open) => open.in_code = !open.in_code,
                None => {
                    self.example = Some(OpenExample::new(DEFAULT_COMPLEXITY.to_string(), true))
                }
            }
            return;
        }

        if let Some(open) = self.example.as_mut().filter(|open| open.in_code) {
            if let Some(level) = inline_level(line) {
                open.example.complexity = level;
            } else {
                open.example.code.push(raw.trim_end().to_string());
            }
            return;
        }

        if let Some(label) = complexity_label(line) {
            self.close_example();
            self.example = Some(OpenExample::new(label, false));
        }
    }

    fn close_example(&mut self) {
        if let Some(open) = self.example.take() {
            self.doc.examples.push(open.example);
        }
    }

    fn finish(mut self) -> ParsedDoc {
        self.finalize();
        self.flush_pending();
        self.close_example();
        self.doc
    }
}

fn is_delimiter(line: &str) -> bool {
    line.starts_with(OPEN_MARKER)
        || line.starts_with("--]]")
        || line == "[["
        || line == CLOSE_MARKER
}

/// Complexity label opening a new example, lower-cased.
fn complexity_label(line: &str) -> Option<String> {
    [&RE_COMPLEXITY, &RE_LEVEL, &RE_NAMED_EXAMPLE]
        .iter()
        .find_map(|re| re.captures(line))
        .map(|c| c[1].trim().to_lowercase())
}

/// `-- Low:` style relabel inside a code fence.
fn inline_level(line: &str) -> Option<String> {
    let level = RE_INLINE_LEVEL.captures(line)?[1].to_lowercase();
    matches!(level.as_str(), "low" | "medium" | "high").then_some(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADD_ITEM: &str = r#"--[[
Purpose: Adds an item.
Parameters:
    - name (string): Item name
Returns: boolean - Whether it succeeded
Realm: Shared
Example Usage:
Low Complexity:
```lua
lia.item.add("foo")
```
]]"#;

    #[test]
    fn parses_reference_block() {
        let doc = parse(ADD_ITEM);
        assert_eq!(doc.purpose, "Adds an item.");
        assert_eq!(doc.parameters, vec![Parameter::new("name", "string", "Item name")]);
        assert_eq!(doc.returns, "boolean - Whether it succeeded");
        assert_eq!(doc.realm, "Shared");
        assert_eq!(
            doc.examples,
            vec![Example {
                complexity: "low".to_string(),
                code: vec![r#"lia.item.add("foo")"#.to_string()],
            }]
        );
    }

    #[test]
    fn multi_line_free_text() {
        let doc = parse(
            "--[[\n    Purpose:\n        Spawns the entity\n        at the given position.\n    When Called: On spawn\n]]",
        );
        assert_eq!(doc.purpose, "Spawns the entity\nat the given position.");
        assert_eq!(doc.when_called, "On spawn");
    }

    #[test]
    fn out_of_order_and_missing_sections() {
        let doc = parse("Realm: Client\nExplanation of Panel: Shows the HUD.\nPurpose: Draws things.");
        assert_eq!(doc.realm, "Client");
        assert_eq!(doc.explanation, "Shows the HUD.");
        assert_eq!(doc.purpose, "Draws things.");
        assert!(doc.parameters.is_empty());
        assert!(doc.returns.is_empty());
    }

    #[test]
    fn empty_repeat_does_not_clear() {
        let doc = parse("Purpose: First\nRealm: Server\nPurpose:\n");
        assert_eq!(doc.purpose, "First");
    }

    #[test]
    fn inline_parameter_seed() {
        let doc = parse("Parameters: - id (number): The id\n    - flag (boolean): Toggle");
        assert_eq!(
            doc.parameters,
            vec![
                Parameter::new("id", "number", "The id"),
                Parameter::new("flag", "boolean", "Toggle"),
            ]
        );
    }

    #[test]
    fn pending_parameters() {
        let doc = parse(
            "Parameters:\n    client (Player)\n        The joining player.\n    silent (boolean)\n    reason (string)\n        Why.\nRealm: Server",
        );
        assert_eq!(
            doc.parameters,
            vec![
                Parameter::new("client", "Player", "The joining player."),
                Parameter::new("silent", "boolean", ""),
                Parameter::new("reason", "string", "Why."),
            ]
        );
    }

    #[test]
    fn pending_parameter_flushed_at_end() {
        let doc = parse("Parameters:\n    client (Player)\n");
        assert_eq!(doc.parameters, vec![Parameter::new("client", "Player", "")]);
    }

    #[test]
    fn unmatched_parameter_lines_are_dropped() {
        let doc = parse("Parameters:\n    none of these make sense\n    -- commented\n    - ok (string): fine");
        assert_eq!(doc.parameters, vec![Parameter::new("ok", "string", "fine")]);
    }

    #[test]
    fn fence_without_label_defaults() {
        let doc = parse("Example Usage:\n```lua\nprint(1)\n```");
        assert_eq!(doc.examples.len(), 1);
        assert_eq!(doc.examples[0].complexity, "example");
        assert_eq!(doc.examples[0].code, vec!["print(1)"]);
    }

    #[test]
    fn inline_level_relabels_and_is_dropped() {
        let doc = parse("Example Usage:\n```lua\n-- High:\nlocal x = 1\n    if x then print(x) end   \n```");
        assert_eq!(doc.examples[0].complexity, "high");
        assert_eq!(doc.examples[0].code, vec!["local x = 1", "    if x then print(x) end"]);
    }

    #[test]
    fn blank_lines_inside_code_are_kept() {
        let doc = parse("Example Usage:\n\n```lua\na()\n\nb()\n```\n\nRealm: Server");
        assert_eq!(doc.examples[0].code, vec!["a()", "", "b()"]);
    }

    #[test]
    fn plain_code_comments_are_kept() {
        let doc = parse("Example Usage:\n```lua\n-- Note: spawns at origin\nspawn()\n```");
        assert_eq!(doc.examples[0].code, vec!["-- Note: spawns at origin", "spawn()"]);
        assert_eq!(doc.examples[0].complexity, "example");
    }

    #[test]
    fn several_labelled_examples() {
        let doc = parse(
            "Example Usage:\nLow Complexity:\n```lua\na()\n```\nMedium Complexity:\n```lua\nb()\n```\nAdvanced Usage Example:\n```lua\nc()\n```",
        );
        let labels: Vec<&str> = doc.examples.iter().map(|e| e.complexity.as_str()).collect();
        assert_eq!(labels, vec!["low", "medium", "advanced usage"]);
        assert_eq!(doc.examples[2].code, vec!["c()"]);
    }

    #[test]
    fn definition_example_aliases() {
        let doc = parse("Purpose: Sample\nExample Item:\n```lua\nITEM.name = \"Cola\"\n```");
        assert_eq!(doc.examples[0].code, vec!["ITEM.name = \"Cola\""]);
    }

    #[test]
    fn keyword_leaves_examples() {
        let doc = parse("Example Usage:\nLow:\n```lua\na()\n```\nRealm: Client");
        assert_eq!(doc.examples.len(), 1);
        assert_eq!(doc.realm, "Client");
    }

    #[test]
    fn keyword_lookup() {
        assert_eq!(keyword("Returns: x"), Some((Section::Returns, "x")));
        assert_eq!(keyword("When Used:"), Some((Section::WhenUsed, "")));
        assert_eq!(keyword("returns: x"), None);
        assert_eq!(keyword("Notes: x"), None);
    }
}
