//! `Folder:` / `File:` / `Append:` output directives.

use super::blocks::SourceBlocks;
use super::block_body;
use crate::model::Directives;

/// Read directives from the first comment block that carries any.
pub fn parse(blocks: &SourceBlocks) -> Directives {
    blocks
        .blocks
        .iter()
        .map(|b| parse_block(&b.text))
        .find(|d| d.folder.is_some() || d.file.is_some() || d.append)
        .unwrap_or_default()
}

fn parse_block(text: &str) -> Directives {
    let mut directives = Directives::default();
    for line in block_body(text).lines() {
        let line = line.trim();
        let line = line.strip_prefix("--").unwrap_or(line).trim();
        if let Some(rest) = line.strip_prefix("Folder:") {
            directives.folder = non_empty(rest);
        } else if let Some(rest) = line.strip_prefix("File:") {
            directives.file = non_empty(rest);
        } else if let Some(rest) = line.strip_prefix("Append:") {
            directives.append = matches!(
                rest.trim().to_lowercase().as_str(),
                "true" | "yes" | "1"
            );
        }
    }
    directives
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::blocks::extract;

    #[test]
    fn reads_first_directive_block() {
        let src = "--[[\n    Player Meta\n]]\n--[[\n    -- Folder: meta\n    File: player.md\n    Append: Yes\n]]\n--[[\n    Folder: other\n]]";
        let d = parse(&extract(src));
        assert_eq!(d.folder.as_deref(), Some("meta"));
        assert_eq!(d.file.as_deref(), Some("player.md"));
        assert!(d.append);
    }

    #[test]
    fn append_values() {
        for (value, expected) in [("true", true), ("1", true), ("YES", true), ("no", false), ("", false)] {
            let d = parse_block(&format!("--[[\nFolder: x\nAppend: {value}\n]]"));
            assert_eq!(d.append, expected, "Append: {value}");
        }
    }

    #[test]
    fn none_without_directives() {
        let d = parse(&extract("--[[\n    Purpose: x\n]]"));
        assert_eq!(d, Directives::default());
    }
}
