//! Page assembly: where a page goes, what it is called, and how it is
//! written without clobbering existing output.

use crate::error::SourceError;
use crate::model::{Directives, DocumentPage, Mode};
use crate::parser::header;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output locations shared by every page of a run.
#[derive(Debug, Clone)]
pub struct Layout {
    pub output_dir: PathBuf,
    /// Base for `Folder:`/`File:` custom paths.
    pub docs_root: PathBuf,
    pub namespace: String,
}

/// Resolve the page path for `source` under an already-resolved `mode`.
pub fn output_path(mode: Mode, source: &Path, directives: &Directives, layout: &Layout) -> PathBuf {
    if let Some((folder, file)) = directives.custom_target() {
        return layout.docs_root.join(folder).join(file);
    }

    let stem = file_stem(source);
    match mode {
        Mode::Library | Mode::Compatibility => {
            let name = module_name(source).unwrap_or(stem);
            layout
                .output_dir
                .join(format!("{}.{}.md", layout.namespace, name))
        }
        Mode::Meta | Mode::Hooks => layout.output_dir.join(format!("{stem}.md")),
        Mode::Definitions => {
            let file = format!("{}.md", stem.to_lowercase());
            if is_item_source(source) {
                layout.output_dir.join("items").join(file)
            } else {
                layout.output_dir.join(file)
            }
        }
    }
}

pub fn file_stem(source: &Path) -> String {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The directory directly under a `modules` component, when the file sits
/// below it: `gamemode/modules/inventory/libraries/server.lua` → `inventory`.
fn module_name(source: &Path) -> Option<String> {
    let parts: Vec<String> = source
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let index = parts.iter().position(|p| p == "modules")?;
    // the last component is the file itself, not a module directory
    if index + 2 >= parts.len() {
        return None;
    }
    Some(parts[index + 1].clone())
}

pub fn is_item_source(source: &Path) -> bool {
    source.components().any(|c| c.as_os_str() == "items")
}

pub fn is_panels_source(source: &Path) -> bool {
    file_stem(source).eq_ignore_ascii_case("panels")
}

/// Title used when the file header does not provide one.
pub fn default_title(source: &Path, directives: &Directives) -> String {
    let base = match directives.file.as_deref() {
        Some(file) => file.replace(".md", ""),
        None => file_stem(source),
    };
    header::title_case(&base)
}

/// Subtitle used when the file header does not provide one.
pub fn default_subtitle(mode: Mode, source: &Path, title: &str) -> String {
    match mode {
        Mode::Library | Mode::Compatibility => {
            "This page documents the functions and methods in the Lilia library.".to_string()
        }
        Mode::Meta => "This page documents the functions and methods in the meta table.".to_string(),
        Mode::Hooks => format!("This page documents the {} hooks.", title.to_lowercase()),
        Mode::Definitions if is_panels_source(source) => {
            "This page documents available VGUI panels.".to_string()
        }
        Mode::Definitions => format!("This page documents the {} definitions.", title.to_lowercase()),
    }
}

/// Page text. The preamble (title, subtitle, overview) is only included
/// when `preamble` is set; every section is followed by a rule.
pub fn render(page: &DocumentPage, preamble: bool) -> String {
    let mut out = String::new();
    if preamble {
        out.push_str(&format!("# {}\n\n", page.title));
        out.push_str(&format!("{}\n\n", page.subtitle));
        out.push_str("---\n\n");
        if let Some(ref overview) = page.overview {
            out.push_str("Overview\n\n");
            out.push_str(overview);
            out.push_str("\n\n---\n\n");
        }
    }
    for section in &page.sections {
        out.push_str(section);
        out.push_str("---\n\n");
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Appended,
    /// Destination already had content and neither force nor append applied.
    Skipped,
}

/// Write `page` to its output path.
///
/// Append pages add their sections after existing content and only carry
/// the preamble when the destination is new or empty.
pub fn write(page: &DocumentPage, force: bool) -> Result<WriteOutcome, SourceError> {
    let path = &page.output_path;
    let existing_len = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if existing_len > 0 && !force && !page.append {
        return Ok(WriteOutcome::Skipped);
    }

    let write_err = |source| SourceError::Write {
        path: path.clone(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    if page.append {
        let fresh = existing_len == 0;
        debug!(path = %path.display(), fresh, "appending page");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(write_err)?;
        file.write_all(render(page, fresh).as_bytes())
            .map_err(write_err)?;
        Ok(if fresh {
            WriteOutcome::Written
        } else {
            WriteOutcome::Appended
        })
    } else {
        fs::write(path, render(page, true)).map_err(write_err)?;
        Ok(WriteOutcome::Written)
    }
}
