//! Plain markdown renderer: heading, realm badge, bold field labels, a
//! parameter table and fenced lua examples.

use crate::anchor;
use crate::model::ParsedDoc;
use crate::render::{example_label, unindent, Renderer};
use crate::types::{self, TypeResolver};

pub struct MarkdownRenderer {
    types: TypeResolver,
}

impl MarkdownRenderer {
    pub fn new(types: TypeResolver) -> Self {
        MarkdownRenderer { types }
    }

    fn type_link(&self, display: &str, link_type: &str) -> String {
        format!("[{}]({})", display, self.types.link(link_type))
    }
}

impl Renderer for MarkdownRenderer {
    fn render_doc(&self, name: &str, doc: &ParsedDoc) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("<a id=\"{}\"></a>", anchor::slug(name)));
        lines.push(format!("### {name}\n"));
        lines.push(format!("> `{}`\n", doc.realm().as_str()));

        if !doc.purpose.is_empty() {
            lines.push("**Purpose**\n".to_string());
            lines.push(format!("{}\n", doc.purpose));
        }
        if let Some(when) = doc.when() {
            lines.push("**When Called**\n".to_string());
            lines.push(format!("{when}\n"));
        }

        if !doc.parameters.is_empty() {
            lines.push("**Parameters**\n".to_string());
            lines.push("| Name | Type | Description |".to_string());
            lines.push("|------|------|-------------|".to_string());
            for param in &doc.parameters {
                let spec = types::split_optional(&param.ty);
                let mut ty = self.type_link(&table_cell(&spec.display), &spec.link_type);
                if spec.optional {
                    ty.push_str(" *(optional)*");
                }
                lines.push(format!(
                    "| `{}` | {} | {} |",
                    param.name,
                    ty,
                    table_cell(&param.description)
                ));
            }
            lines.push(String::new());
        }

        if !doc.returns.is_empty() {
            let ret = types::split_returns(&doc.returns);
            lines.push("**Returns**\n".to_string());
            let text = match ret.ty {
                Some(ty) => {
                    let (display, link_type) = types::split_union(&ty);
                    let link = self.type_link(&display, &link_type);
                    if ret.description.is_empty() {
                        link
                    } else {
                        format!("{link} {}", ret.description)
                    }
                }
                None => ret.description,
            };
            lines.push(format!("{text}\n"));
        }

        if !doc.explanation.is_empty() {
            lines.push("**Explanation**\n".to_string());
            lines.push(format!("{}\n", doc.explanation));
        }

        if !doc.examples.is_empty() {
            lines.push("**Example Usage**\n".to_string());
            for example in &doc.examples {
                if let Some(label) = example_label(&example.complexity) {
                    lines.push(format!("*{label}*\n"));
                }
                lines.push("```lua".to_string());
                lines.extend(unindent(&example.code));
                lines.push("```\n".to_string());
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Table cells cannot carry raw pipes or line breaks.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
