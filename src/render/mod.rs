//! Renderer module: trait-based style dispatch.

pub mod html;
pub mod markdown;

use crate::model::{Naming, ParsedDoc, Style};
use crate::types::TypeResolver;

/// Turns one parsed doc block into a self-contained page fragment.
///
/// Fields are always emitted in the same order: purpose, when, parameters,
/// returns, explanation, examples. Empty fields are left out.
pub trait Renderer {
    fn render_doc(&self, name: &str, doc: &ParsedDoc) -> String;

    /// Render `doc` under `name`, or nothing when the doc has no purpose.
    fn render(&self, name: &str, doc: &ParsedDoc) -> Option<String> {
        doc.is_complete().then(|| self.render_doc(name, doc))
    }
}

/// Create a renderer for the given style.
pub fn create_renderer(style: Style, types: TypeResolver) -> Box<dyn Renderer> {
    match style {
        Style::Html => Box::new(html::HtmlRenderer::new(types)),
        Style::Markdown => Box::new(markdown::MarkdownRenderer::new(types)),
    }
}

/// Name shown to readers for a located site.
///
/// Library names get the namespace prepended when missing; method names
/// lose everything up to and including the first `:`.
pub fn display_name(qualified: &str, naming: Naming, namespace: &str) -> String {
    match naming {
        Naming::Library => {
            let prefix = format!("{namespace}.");
            if qualified.starts_with(&prefix) {
                qualified.to_string()
            } else {
                format!("{prefix}{qualified}")
            }
        }
        Naming::Method => match qualified.split_once(':') {
            Some((_, method)) => method.to_string(),
            None => qualified.to_string(),
        },
        Naming::Plain => qualified.to_string(),
    }
}

/// Strip the indentation shared by every non-blank line. Blank lines come
/// back empty.
pub fn unindent(lines: &[String]) -> Vec<String> {
    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                l.get(min_indent..).unwrap_or(l.as_str()).to_string()
            }
        })
        .collect()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Reader-facing label for an example's complexity, `None` for the
/// unlabelled default.
pub fn example_label(complexity: &str) -> Option<String> {
    match complexity.trim().to_lowercase().as_str() {
        "" | "example" => None,
        level @ ("low" | "medium" | "high") => {
            Some(format!("{} Complexity", crate::parser::header::title_case(level)))
        }
        other => Some(crate::parser::header::title_case(other)),
    }
}
