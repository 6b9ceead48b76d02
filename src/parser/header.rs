//! File header and overview text.

use super::block_body;

/// Non-empty content lines of a block, with any leading `--` removed.
fn content_lines(text: &str) -> Vec<String> {
    block_body(text)
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix("--").unwrap_or(line).trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Title and subtitle from a FileHeader block.
///
/// The first content line is the title, the second the subtitle. A header
/// with fewer than two lines does not override the page defaults.
pub fn title_and_subtitle(text: &str) -> Option<(String, String)> {
    let lines = content_lines(text);
    match lines.as_slice() {
        [title, subtitle, ..] => Some((title.replace('*', "").trim().to_string(), subtitle.clone())),
        _ => None,
    }
}

/// Overview body: labels and comment markers removed, spaces collapsed,
/// runs of blank lines folded into one.
pub fn overview_text(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for raw in block_body(text).lines() {
        let line = raw.trim();
        let line = line.strip_prefix("--").unwrap_or(line).trim();
        let line = ["Overview:", "Improvements Done:"]
            .iter()
            .find_map(|label| line.strip_prefix(label))
            .unwrap_or(line)
            .trim();
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() && out.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// Title-case each word the way page titles are derived from file names:
/// `player_meta` → `Player_Meta`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
