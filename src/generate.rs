//! Per-file pipeline: read, extract, locate, parse, render, assemble, write.

use crate::coverage;
use crate::error::SourceError;
use crate::model::{BlockKind, CommentBlock, DocumentPage, FunctionSite, Mode, Style};
use crate::page::{self, Layout, WriteOutcome};
use crate::parser::blocks::{self, SourceBlocks};
use crate::parser::{directives, fields, header, sites};
use crate::render::{self, Renderer};
use crate::types::TypeResolver;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const UTF8_BOM: char = '\u{feff}';

/// Read a source file as UTF-8, dropping a leading byte-order mark.
pub fn read_source(path: &Path) -> Result<String, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| SourceError::Encoding {
        path: path.to_path_buf(),
    })?;
    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// What processing one file produced, for logging and coverage.
#[derive(Debug)]
pub struct FileReport {
    /// Mode after `Folder:` resolution.
    pub mode: Mode,
    pub declared: Vec<String>,
    pub documented: Vec<String>,
    pub hooks_used: BTreeSet<String>,
    /// `None` when the file had nothing to write.
    pub outcome: Option<WriteOutcome>,
}

pub struct Generator {
    mode: Mode,
    renderer: Box<dyn Renderer>,
    layout: Layout,
    force: bool,
}

impl Generator {
    /// `style` overrides the mode's default style.
    pub fn new(mode: Mode, style: Option<Style>, types: TypeResolver, layout: Layout, force: bool) -> Self {
        let style = style.unwrap_or_else(|| mode.default_style());
        Generator {
            mode,
            renderer: render::create_renderer(style, types),
            layout,
            force,
        }
    }

    pub fn process_file(&self, path: &Path) -> Result<FileReport, SourceError> {
        let source = read_source(path)?;
        self.process(path, &source)
    }

    /// Run the pipeline over already-read source text.
    pub fn process(&self, path: &Path, source: &str) -> Result<FileReport, SourceError> {
        let blocks = blocks::extract(source);
        let directives = directives::parse(&blocks);
        let mode = self.mode.resolve(&directives);
        let namespace = self.layout.namespace.as_str();
        debug!(path = %path.display(), blocks = blocks.blocks.len(), ?mode, "scanned");

        let mut report = FileReport {
            mode,
            declared: Vec::new(),
            documented: Vec::new(),
            hooks_used: coverage::hook_usages(source, &blocks),
            outcome: None,
        };

        let located = match mode {
            Mode::Library | Mode::Compatibility => {
                let prefix = format!("{namespace}.");
                report.declared = sites::declarations(source, &blocks)
                    .into_iter()
                    .filter(|d| d.name.starts_with(&prefix))
                    .map(|d| render::display_name(&d.name, mode.naming(), namespace))
                    .collect();
                sites::locate(source, &blocks, Some(prefix.as_str()))
            }
            Mode::Meta => {
                report.declared = sites::declarations(source, &blocks)
                    .into_iter()
                    .map(|d| render::display_name(&d.name, mode.naming(), namespace))
                    .collect();
                sites::locate(source, &blocks, None)
            }
            Mode::Hooks => sites::locate(source, &blocks, None),
            Mode::Definitions if page::is_panels_source(path) => sites::locate_panels(source, &blocks),
            Mode::Definitions => sites::locate_properties(source, &blocks, definition_prefixes(path)),
        };

        let sections = self.render_sites(&located, mode, &mut report.documented);

        let (header_block, overview_block) = if mode == Mode::Definitions && page::is_item_source(path) {
            item_preamble(&blocks)
        } else {
            (blocks.header(), blocks.overview())
        };

        if sections.is_empty() && header_block.is_none() && overview_block.is_none() {
            info!("No documentation found in {}", path.display());
            return Ok(report);
        }

        let mut title = page::default_title(path, &directives);
        let mut subtitle = page::default_subtitle(mode, path, &title);
        if let Some((t, s)) = header_block.and_then(|b| header::title_and_subtitle(&b.text)) {
            title = t;
            subtitle = s;
        }
        let overview = overview_block
            .map(|b| header::overview_text(&b.text))
            .filter(|text| !text.is_empty());

        let doc_page = DocumentPage {
            title,
            subtitle,
            overview,
            sections,
            output_path: page::output_path(mode, path, &directives, &self.layout),
            append: directives.append,
        };

        let outcome = page::write(&doc_page, self.force)?;
        let name = doc_page.output_path.display();
        match outcome {
            WriteOutcome::Written => info!("Generated {}", name),
            WriteOutcome::Appended => info!("Appended to {}", name),
            WriteOutcome::Skipped => info!("{} already exists, skipping", name),
        }
        report.outcome = Some(outcome);
        Ok(report)
    }

    /// Render every located site with a complete doc, collecting the
    /// display names that made it into the page.
    fn render_sites(&self, located: &[FunctionSite], mode: Mode, documented: &mut Vec<String>) -> Vec<String> {
        let mut sections = Vec::new();
        for site in located {
            let Some(ref block) = site.doc else {
                continue;
            };
            let doc = fields::parse(&block.text);
            let name = render::display_name(&site.qualified_name, mode.naming(), &self.layout.namespace);
            match self.renderer.render(&name, &doc) {
                Some(section) => {
                    documented.push(name);
                    sections.push(section);
                }
                None => debug!(name = %name, line = site.declaration_line, "no purpose, dropped"),
            }
        }
        sections
    }
}

fn definition_prefixes(path: &Path) -> &'static [&'static str] {
    if page::is_item_source(path) {
        &["ITEM"]
    } else if page::file_stem(path).eq_ignore_ascii_case("attributes") {
        &["ATTRIBUTE"]
    } else {
        &["CLASS", "FACTION", "MODULE"]
    }
}

/// Item definition files open with a header block and an overview block,
/// in that order, whatever their content.
fn item_preamble(source_blocks: &SourceBlocks) -> (Option<&CommentBlock>, Option<&CommentBlock>) {
    let mut content = source_blocks
        .blocks
        .iter()
        .filter(|b| b.kind != BlockKind::FunctionDoc && !blocks::is_directive_block(&b.text));
    (content.next(), content.next())
}
