//! liadoc: generate Markdown reference pages from Lua doc comments.
//!
//! Each input file is scanned for `--[[ ... ]]` blocks, documented functions
//! are matched to the block right above them, and one page per file (or per
//! `Folder:`/`File:` target) is written:
//!
//! - `liadoc library -o docs/libraries gamemode/core/libraries/`
//! - `liadoc meta -o docs/meta 'gamemode/core/meta/*.lua'`
//! - `liadoc hooks -o docs/hooks --coverage docs/hooks/*.lua gamemode/`

mod anchor;
mod config;
mod coverage;
mod error;
mod generate;
mod model;
mod page;
mod parser;
mod render;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use coverage::Coverage;
use generate::Generator;
use model::{Mode, Style};
use page::Layout;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use types::TypeResolver;

#[derive(Parser)]
#[command(
    name = "liadoc",
    about = "Generate documentation pages from annotated Lua source files"
)]
struct Cli {
    /// Documentation mode
    #[arg(value_enum)]
    mode: Mode,

    /// Input files, directories (non-recursive) or glob patterns
    files: Vec<String>,

    /// Output directory for generated pages
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Base directory for Folder:/File: custom output paths
    /// (default: parent of the output directory)
    #[arg(short = 'r', long)]
    docs_root: Option<PathBuf>,

    /// Output style (default: html, markdown for definitions)
    #[arg(short = 's', long, value_enum)]
    style: Option<Style>,

    /// Config file (default: ./liadoc.toml when present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Overwrite pages that already have content
    #[arg(long)]
    force: bool,

    /// Print a documentation coverage report to stdout
    #[arg(long)]
    coverage: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;
    let output_dir = cli
        .output
        .clone()
        .or_else(|| config.output.clone())
        .context("--output is required (or set `output` in liadoc.toml)")?;
    let docs_root = cli
        .docs_root
        .clone()
        .or_else(|| config.docs_root.clone())
        .unwrap_or_else(|| default_docs_root(&output_dir));

    let input_files = expand_globs(&cli.files)?;
    if input_files.is_empty() {
        info!("no input files, nothing to do");
        return Ok(());
    }

    let layout = Layout {
        output_dir,
        docs_root,
        namespace: config.namespace().to_string(),
    };
    let types = TypeResolver::default().with_types(&config.types);
    let generator = Generator::new(cli.mode, cli.style, types, layout, cli.force);

    let mut coverage = Coverage::default();
    for path in &input_files {
        debug!("Processing {}", path.display());
        match generator.process_file(path) {
            Ok(report) => coverage.record(&report),
            Err(e) => warn!("skipping {}: {}", path.display(), e),
        }
    }

    if cli.coverage {
        print!("{}", coverage.render());
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LIADOC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// `docs/libraries` → `docs`; a bare directory name falls back to `.`.
fn default_docs_root(output_dir: &Path) -> PathBuf {
    output_dir
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// File extensions recognized as source files.
const SUPPORTED_EXTENSIONS: &[&str] = &["lua"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && is_supported(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file() && is_supported(p))
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn docs_root_defaults_to_parent() {
        assert_eq!(
            default_docs_root(Path::new("documentation/docs/libraries")),
            PathBuf::from("documentation/docs")
        );
        assert_eq!(default_docs_root(Path::new("out")), PathBuf::from("."));
    }

    #[test]
    fn expands_directories_and_globs() {
        let dir = TempDir::new().unwrap();
        for name in ["b.lua", "a.lua", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.lua"), "").unwrap();

        let dir_arg = dir.path().display().to_string();
        let glob_arg = format!("{}/*.lua", dir.path().display());
        let files = expand_globs(&[dir_arg, glob_arg]).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.lua"), dir.path().join("b.lua")]
        );
    }

    #[test]
    fn unmatched_glob_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.lua", dir.path().display());
        assert!(expand_globs(&[pattern]).unwrap().is_empty());
    }

    #[test]
    fn cli_parses_modes() {
        let cli = Cli::try_parse_from(["liadoc", "definitions", "-o", "out", "--style", "html", "x.lua"]).unwrap();
        assert_eq!(cli.mode, Mode::Definitions);
        assert_eq!(cli.style, Some(Style::Html));
        assert_eq!(cli.files, vec!["x.lua"]);
        assert!(Cli::try_parse_from(["liadoc", "bogus"]).is_err());
        assert!(Cli::try_parse_from(["liadoc", "meta", "-v", "-q"]).is_err());
    }
}
