//! Declaration-site location and doc-block association.
//!
//! This is a shallow textual scan, not a Lua parser: `function <name>(` is
//! found anywhere outside comment blocks, `local function` is skipped, and
//! scoping is not evaluated.

use super::blocks::{self, SourceBlocks};
use super::LineIndex;
use crate::model::{BlockKind, CommentBlock, FunctionSite};
use regex::Regex;
use std::sync::LazyLock;

static RE_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(local\s+)?function\s+([\w.:]+)\s*\(").unwrap());

/// A function declaration found in code, documented or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub line: usize,
}

/// Every non-local `function name(` declaration outside comment blocks.
pub fn declarations(source: &str, blocks: &SourceBlocks) -> Vec<Declaration> {
    let index = LineIndex::new(source);
    RE_FUNCTION
        .captures_iter(source)
        .filter(|c| c.get(1).is_none())
        .filter_map(|c| {
            let whole = c.get(0)?;
            if blocks.covers(whole.start()) {
                return None;
            }
            Some(Declaration {
                name: c[2].to_string(),
                line: index.line_of(whole.start()),
            })
        })
        .collect()
}

/// Documented function sites, in declaration order.
///
/// With `namespace` set (library mode, e.g. `"lia."`), sites outside it are
/// discarded. Sites without a preceding FunctionDoc block are dropped.
pub fn locate(source: &str, blocks: &SourceBlocks, namespace: Option<&str>) -> Vec<FunctionSite> {
    declarations(source, blocks)
        .into_iter()
        .filter(|d| namespace.map_or(true, |ns| d.name.starts_with(ns)))
        .filter_map(|d| {
            let doc = nearest_doc(blocks, d.line)?;
            Some(FunctionSite {
                qualified_name: d.name,
                declaration_line: d.line,
                doc: Some(doc.clone()),
            })
        })
        .collect()
}

/// The closest FunctionDoc block starting before `line`.
pub fn nearest_doc(blocks: &SourceBlocks, line: usize) -> Option<&CommentBlock> {
    blocks
        .function_docs()
        .filter(|b| b.line < line)
        .max_by_key(|b| b.line)
}

/// Definition properties: each FunctionDoc block (other than sample
/// definitions) named by the first code line after it, when that line is
/// `<PREFIX>.<name>` or `function <PREFIX>:<name>`.
pub fn locate_properties(source: &str, blocks: &SourceBlocks, prefixes: &[&str]) -> Vec<FunctionSite> {
    let patterns: Vec<(Regex, Regex)> = prefixes
        .iter()
        .filter_map(|prefix| {
            let prefix = regex::escape(prefix);
            let field = Regex::new(&format!(r"^{prefix}\.([A-Za-z_]\w*)")).ok()?;
            let method = Regex::new(&format!(r"^function\s+{prefix}:([A-Za-z_]\w*)")).ok()?;
            Some((field, method))
        })
        .collect();
    let index = LineIndex::new(source);

    blocks
        .function_docs()
        .filter(|b| {
            !blocks::DEFINITION_EXAMPLE_KEYWORDS
                .iter()
                .any(|k| b.text.contains(k))
        })
        .filter_map(|block| {
            let (offset, line) = following_code_line(source, block.end)?;
            let name = patterns.iter().find_map(|(field, method)| {
                field
                    .captures(line)
                    .or_else(|| method.captures(line))
                    .map(|c| c[1].to_string())
            })?;
            Some(FunctionSite {
                qualified_name: name,
                declaration_line: index.line_of(offset),
                doc: Some(block.clone()),
            })
        })
        .collect()
}

/// Panel documentation: blocks describing a panel are named by the raw
/// first code line after them.
pub fn locate_panels(source: &str, blocks: &SourceBlocks) -> Vec<FunctionSite> {
    let index = LineIndex::new(source);
    blocks
        .blocks
        .iter()
        .filter(|b| b.kind == BlockKind::FunctionDoc)
        .filter(|b| {
            ["Purpose:", "Explanation of Panel:", "When Used:"]
                .iter()
                .any(|k| b.text.contains(k))
        })
        .filter_map(|block| {
            let (offset, line) = following_code_line(source, block.end)?;
            Some(FunctionSite {
                qualified_name: line.to_string(),
                declaration_line: index.line_of(offset),
                doc: Some(block.clone()),
            })
        })
        .collect()
}

/// First non-blank line after `from` that is not a `--` comment, trimmed,
/// with the byte offset of its start.
fn following_code_line(source: &str, from: usize) -> Option<(usize, &str)> {
    let tail = source.get(from..)?;
    let mut offset = from;
    for raw in tail.split_inclusive('\n') {
        let line = raw.trim();
        if !line.is_empty() && !line.starts_with("--") {
            return Some((offset, line));
        }
        offset += raw.len();
    }
    None
}
