//! Comment-block extraction and structural classification.
//!
//! Blocks are `--[[ ... ]]` spans matched non-greedily: the first `]]` after
//! an open marker always terminates the block, so nesting is not supported.

use super::LineIndex;
use crate::model::{BlockKind, CommentBlock};
use regex::Regex;
use std::sync::LazyLock;

static RE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)--\[\[.*?\]\]").unwrap());

/// Section keywords that mark a block as function documentation.
pub const SECTION_KEYWORDS: &[&str] = &[
    "Purpose:",
    "When Called:",
    "When Used:",
    "Parameters:",
    "Returns:",
    "Realm:",
    "Explanation of Panel:",
    "Example Usage:",
    "Example Item:",
    "Example Class:",
    "Example Faction:",
];

/// Keywords that introduce a sample definition rather than a documented entry.
pub const DEFINITION_EXAMPLE_KEYWORDS: &[&str] =
    &["Example Item:", "Example Class:", "Example Faction:"];

const OVERVIEW_MARKERS: &[&str] = &["Overview:", "Improvements Done:"];

const DIRECTIVE_MARKERS: &[&str] = &["Folder:", "File:", "Append:"];

pub fn has_section_keyword(text: &str) -> bool {
    SECTION_KEYWORDS.iter().any(|k| text.contains(k))
}

pub fn is_overview(text: &str) -> bool {
    OVERVIEW_MARKERS.iter().any(|k| text.contains(k))
}

/// Blocks carrying output directives are metadata, never page titles.
pub fn is_directive_block(text: &str) -> bool {
    DIRECTIVE_MARKERS.iter().any(|k| text.contains(k))
}

/// All comment blocks of one source file, in source order.
#[derive(Debug, Default, Clone)]
pub struct SourceBlocks {
    pub blocks: Vec<CommentBlock>,
}

impl SourceBlocks {
    pub fn header(&self) -> Option<&CommentBlock> {
        self.first_of(BlockKind::FileHeader)
    }

    pub fn overview(&self) -> Option<&CommentBlock> {
        self.first_of(BlockKind::Overview)
    }

    pub fn function_docs(&self) -> impl Iterator<Item = &CommentBlock> {
        self.blocks
            .iter()
            .filter(|b| b.kind == BlockKind::FunctionDoc)
    }

    /// Whether `offset` falls inside any comment block.
    pub fn covers(&self, offset: usize) -> bool {
        self.blocks.iter().any(|b| b.contains_offset(offset))
    }

    fn first_of(&self, kind: BlockKind) -> Option<&CommentBlock> {
        self.blocks.iter().find(|b| b.kind == kind)
    }
}

/// Find and classify every comment block in `source`.
///
/// Only the first header-shaped and the first overview block get their kind;
/// later blocks of the same shape are `Unclassified`.
pub fn extract(source: &str) -> SourceBlocks {
    let index = LineIndex::new(source);
    let mut seen_header = false;
    let mut seen_overview = false;

    let blocks = RE_BLOCK
        .find_iter(source)
        .map(|m| {
            let text = m.as_str();
            let kind = if has_section_keyword(text) {
                BlockKind::FunctionDoc
            } else if is_overview(text) {
                if seen_overview {
                    BlockKind::Unclassified
                } else {
                    seen_overview = true;
                    BlockKind::Overview
                }
            } else if is_directive_block(text) || seen_header {
                BlockKind::Unclassified
            } else {
                seen_header = true;
                BlockKind::FileHeader
            };
            CommentBlock {
                start: m.start(),
                end: m.end(),
                line: index.line_of(m.start()),
                text: text.to_string(),
                kind,
            }
        })
        .collect();

    SourceBlocks { blocks }
}
