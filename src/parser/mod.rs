//! Parser module: turns Lua source text into comment blocks, declaration
//! sites and parsed documentation records.

pub mod blocks;
pub mod directives;
pub mod fields;
pub mod header;
pub mod params;
pub mod sites;

/// Opens a Lua long comment.
pub const OPEN_MARKER: &str = "--[[";
/// Closes a Lua long comment.
pub const CLOSE_MARKER: &str = "]]";

/// Strip the open and close markers from a block's raw text.
pub fn block_body(text: &str) -> &str {
    let text = text.strip_prefix(OPEN_MARKER).unwrap_or(text);
    text.strip_suffix(CLOSE_MARKER).unwrap_or(text)
}

/// Byte offset → 1-based line number lookup over one source text.
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex { starts }
    }

    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }
}
