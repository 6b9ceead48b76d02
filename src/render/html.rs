//! Styled renderer: one collapsible `<details>` block per entry, tinted by
//! realm, with linked types and escaped code examples.

use crate::anchor;
use crate::model::ParsedDoc;
use crate::render::{example_label, html_escape, unindent, Renderer};
use crate::types::{self, TypeResolver};

pub struct HtmlRenderer {
    types: TypeResolver,
}

impl HtmlRenderer {
    pub fn new(types: TypeResolver) -> Self {
        HtmlRenderer { types }
    }

    fn type_link(&self, display: &str, link_type: &str) -> String {
        format!(
            "<span class=\"types\"><a class=\"type\" href=\"{}\">{}</a></span>",
            self.types.link(link_type),
            display
        )
    }
}

impl Renderer for HtmlRenderer {
    fn render_doc(&self, name: &str, doc: &ParsedDoc) -> String {
        let mut out = String::new();

        let signature = doc
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("<details class=\"realm-{}\">\n", doc.realm().as_str()));
        out.push_str(&format!("<summary>{}({signature})</summary>\n", html_escape(name)));
        out.push_str(&format!("<a id=\"{}\"></a>\n", anchor::slug(name)));

        if !doc.purpose.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", doc.purpose));
        }
        if let Some(when) = doc.when() {
            out.push_str(&format!("<p>{when}</p>\n"));
        }

        if !doc.parameters.is_empty() {
            for (i, param) in doc.parameters.iter().enumerate() {
                let spec = types::split_optional(&param.ty);
                out.push_str(if i == 0 { "<p><h3>Parameters:</h3>\n" } else { "<p>" });
                out.push_str(&self.type_link(&spec.display, &spec.link_type));
                out.push_str(&format!(" <span class=\"parameter\">{}</span>", param.name));
                if spec.optional {
                    out.push_str(" <span class=\"optional\">optional</span>");
                }
                if !param.description.is_empty() {
                    out.push(' ');
                    out.push_str(&param.description);
                }
                out.push_str("</p>\n");
            }
            out.push('\n');
        }

        if !doc.returns.is_empty() {
            let ret = types::split_returns(&doc.returns);
            out.push_str("<p><h3>Returns:</h3>\n");
            match ret.ty {
                Some(ty) => {
                    let (display, link_type) = types::split_union(&ty);
                    out.push_str(&self.type_link(&display, &link_type));
                    if !ret.description.is_empty() {
                        out.push(' ');
                        out.push_str(&ret.description);
                    }
                }
                None => out.push_str(&ret.description),
            }
            out.push_str("</p>\n\n");
        }

        if !doc.explanation.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", doc.explanation));
        }

        if !doc.examples.is_empty() {
            out.push_str("<h3>Example Usage:</h3>\n");
            for example in &doc.examples {
                if let Some(label) = example_label(&example.complexity) {
                    out.push_str(&format!("<p><strong>{label}</strong></p>\n"));
                }
                let code = unindent(&example.code)
                    .into_iter()
                    .map(|l| if l.is_empty() { l } else { format!("    {l}") })
                    .collect::<Vec<_>>()
                    .join("\n");
                out.push_str("<pre><code class=\"language-lua\">");
                out.push_str(&html_escape(&code));
                out.push_str("</code></pre>\n");
            }
        }

        out.push_str("</details>\n\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fields;

    const BLOCK: &str = "--[[
Purpose: Adds an item.
Parameters:
    - name (string): Item name
    - owner (Player|nil): Who gets it
Returns: boolean - Whether it succeeded
Realm: Shared
Example Usage:
Low Complexity:
```lua
lia.item.add(\"foo\")
```
]]";

    fn render(block: &str, name: &str) -> String {
        HtmlRenderer::new(TypeResolver::default())
            .render(name, &fields::parse(block))
            .unwrap()
    }

    #[test]
    fn details_block() {
        let out = render(BLOCK, "lia.item.add");
        assert!(out.starts_with("<details class=\"realm-shared\">\n"));
        assert!(out.contains("<summary>lia.item.add(name, owner)</summary>\n"));
        assert!(out.contains("<a id=\"liaitemadd\"></a>\n"));
        assert!(out.contains("<p>Adds an item.</p>\n"));
        assert!(out.ends_with("</details>\n\n"));
    }

    #[test]
    fn parameters_are_linked() {
        let out = render(BLOCK, "lia.item.add");
        assert!(out.contains(
            "<p><h3>Parameters:</h3>\n<span class=\"types\"><a class=\"type\" href=\"https://www.lua.org/manual/5.1/manual.html#5.4\">string</a></span> <span class=\"parameter\">name</span> Item name</p>\n"
        ));
        assert!(out.contains(
            "<p><span class=\"types\"><a class=\"type\" href=\"https://wiki.facepunch.com/gmod/Player\">Player</a></span> <span class=\"parameter\">owner</span> <span class=\"optional\">optional</span> Who gets it</p>\n"
        ));
    }

    #[test]
    fn returns_split() {
        let out = render(BLOCK, "lia.item.add");
        assert!(out.contains(
            "<p><h3>Returns:</h3>\n<span class=\"types\"><a class=\"type\" href=\"https://www.lua.org/manual/5.1/manual.html#5.2\">boolean</a></span> Whether it succeeded</p>\n\n"
        ));

        let out = render("--[[\nPurpose: x\nReturns: Nothing at all.\n]]", "lia.x");
        assert!(out.contains("<p><h3>Returns:</h3>\nNothing at all.</p>\n\n"));
    }

    #[test]
    fn examples_are_escaped_and_indented() {
        let block = "--[[\nPurpose: x\nExample Usage:\n```lua\n    if a < b and c > d then\n        print(\"&\")\n    end\n```\n]]";
        let out = render(block, "lia.x");
        assert!(out.contains(
            "<pre><code class=\"language-lua\">    if a &lt; b and c &gt; d then\n        print(\"&amp;\")\n    end</code></pre>\n"
        ));
        assert!(!out.contains("Complexity"));
    }

    #[test]
    fn complexity_label() {
        let out = render(BLOCK, "lia.item.add");
        assert!(out.contains("<h3>Example Usage:</h3>\n<p><strong>Low Complexity</strong></p>\n<pre><code class=\"language-lua\">    lia.item.add(\"foo\")</code></pre>\n"));
    }

    #[test]
    fn field_order() {
        let block = "--[[\nExplanation of Panel: Explains.\nRealm: Client\nWhen Called: Later.\nPurpose: First.\n]]";
        let out = render(block, "x");
        let purpose = out.find("First.").unwrap();
        let when = out.find("Later.").unwrap();
        let explanation = out.find("Explains.").unwrap();
        assert!(purpose < when && when < explanation);
        assert!(out.starts_with("<details class=\"realm-client\">"));
        assert!(!out.contains("Parameters"));
        assert!(!out.contains("Returns"));
        assert!(!out.contains("Example Usage"));
    }

    #[test]
    fn panel_names_get_a_quoted_slug_anchor() {
        let block = "--[[\nPurpose: A scroll panel.\n]]";
        let out = render(block, "vgui.Register(\"liaScroll\", PANEL, \"DPanel\")");
        assert!(out.contains("<summary>vgui.Register(\"liaScroll\", PANEL, \"DPanel\")()</summary>\n"));
        assert!(out.contains("<a id=\"vguiregisterliascroll-panel-dpanel\"></a>\n"));
        assert!(!out.contains("<a id=vgui"));
    }
}
