//! Data model for scanned Lua sources and parsed documentation, format-agnostic.

use std::path::PathBuf;

/// Structural classification of a `--[[ ... ]]` region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    FileHeader,
    Overview,
    FunctionDoc,
    Unclassified,
}

/// A raw comment block, `[start, end)` in byte offsets of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub start: usize,
    pub end: usize,
    /// 1-based line of the open marker
    pub line: usize,
    pub text: String,
    pub kind: BlockKind,
}

impl CommentBlock {
    pub fn contains_offset(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Structured record produced from one FunctionDoc block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    pub purpose: String,
    pub when_called: String,
    pub when_used: String,
    pub parameters: Vec<Parameter>,
    /// Raw text; split into type and description by the type resolver
    pub returns: String,
    pub realm: String,
    pub explanation: String,
    pub examples: Vec<Example>,
}

impl ParsedDoc {
    /// Blocks without a purpose are incomplete and never rendered.
    pub fn is_complete(&self) -> bool {
        !self.purpose.is_empty()
    }

    /// `when_called`, falling back to `when_used`.
    pub fn when(&self) -> Option<&str> {
        [&self.when_called, &self.when_used]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
    }

    pub fn realm(&self) -> Realm {
        Realm::from_text(&self.realm)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// Declared type text, possibly a `|` union; `"unknown"` when omitted
    pub ty: String,
    pub description: String,
}

impl Parameter {
    pub fn new(name: &str, ty: &str, description: &str) -> Self {
        Parameter {
            name: name.trim().to_string(),
            ty: ty.trim().to_string(),
            description: description.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Lower-cased label: "low", "medium", "high", a named label, or "example"
    pub complexity: String,
    pub code: Vec<String>,
}

/// Execution context a function runs in. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Realm {
    Server,
    Client,
    Shared,
}

impl Realm {
    pub fn from_text(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "server" => Realm::Server,
            "client" => Realm::Client,
            _ => Realm::Shared,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Realm::Server => "server",
            Realm::Client => "client",
            Realm::Shared => "shared",
        }
    }
}

/// A declaration found in code, with the doc block attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSite {
    pub qualified_name: String,
    pub declaration_line: usize,
    pub doc: Option<CommentBlock>,
}

/// Custom output metadata carried by `Folder:` / `File:` / `Append:` lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Directives {
    pub folder: Option<String>,
    pub file: Option<String>,
    pub append: bool,
}

impl Directives {
    /// `(folder, file)` when both are present; one without the other is ignored.
    pub fn custom_target(&self) -> Option<(&str, &str)> {
        match (&self.folder, &self.file) {
            (Some(folder), Some(file)) => Some((folder.as_str(), file.as_str())),
            _ => None,
        }
    }
}

/// One output page, assembled from a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPage {
    pub title: String,
    pub subtitle: String,
    pub overview: Option<String>,
    pub sections: Vec<String>,
    pub output_path: PathBuf,
    pub append: bool,
}

/// Which part of the framework a batch of sources documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Free functions under the reserved library namespace
    Library,
    /// Receiver-type methods (`Player:Foo`)
    Meta,
    /// Library files that may declare themselves meta via `Folder: meta`
    Compatibility,
    /// Item/class/faction/attribute/panel property documentation
    Definitions,
    /// Hook documentation files
    Hooks,
}

impl Mode {
    /// Settle `Compatibility` into library or meta semantics for one file.
    pub fn resolve(self, directives: &Directives) -> Mode {
        match self {
            Mode::Compatibility => {
                let is_meta = directives
                    .folder
                    .as_deref()
                    .is_some_and(|f| f.eq_ignore_ascii_case("meta"));
                if is_meta {
                    Mode::Meta
                } else {
                    Mode::Library
                }
            }
            other => other,
        }
    }

    pub fn naming(self) -> Naming {
        match self {
            Mode::Library | Mode::Compatibility => Naming::Library,
            Mode::Meta | Mode::Hooks => Naming::Method,
            Mode::Definitions => Naming::Plain,
        }
    }

    pub fn default_style(self) -> Style {
        match self {
            Mode::Definitions => Style::Markdown,
            _ => Style::Html,
        }
    }

    /// Modes whose sources are framework code rather than doc-only files.
    pub fn is_code(self) -> bool {
        matches!(self, Mode::Library | Mode::Meta | Mode::Compatibility)
    }
}

/// How a qualified name is shown to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming {
    /// Prefix the reserved namespace when missing
    Library,
    /// Drop the receiver up to and including the first `:`
    Method,
    /// As written
    Plain,
}

/// Output styling of a rendered fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Style {
    /// Collapsible `<details>` blocks with linked types
    Html,
    /// Headings, a parameter table and fenced examples
    Markdown,
}
