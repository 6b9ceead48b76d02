//! Coverage report: plain set differences between what the code declares
//! or uses and what the docs describe.

use crate::generate::FileReport;
use crate::model::Mode;
use crate::parser::blocks::SourceBlocks;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static RE_HOOK_USE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"hook\.(?:Add|Run)\s*\(\s*["'`]([^"'`]+)["'`]"#).unwrap()
});

/// Hook names passed to `hook.Add` or `hook.Run` in the code of `source`.
/// Calls inside comment blocks, such as doc examples, are not usages.
pub fn hook_usages(source: &str, blocks: &SourceBlocks) -> BTreeSet<String> {
    RE_HOOK_USE
        .captures_iter(source)
        .filter(|c| c.get(0).is_some_and(|m| !blocks.covers(m.start())))
        .map(|c| c[1].to_string())
        .collect()
}

#[derive(Debug, Default)]
pub struct Coverage {
    /// Display names of functions declared in code files.
    pub declared: BTreeSet<String>,
    /// Display names of every rendered entry.
    pub documented: BTreeSet<String>,
    /// Display names of entries rendered from hook doc files.
    pub hook_docs: BTreeSet<String>,
    pub hooks_used: BTreeSet<String>,
}

impl Coverage {
    pub fn record(&mut self, report: &FileReport) {
        if report.mode.is_code() {
            self.declared.extend(report.declared.iter().cloned());
        }
        if report.mode == Mode::Hooks {
            self.hook_docs.extend(report.documented.iter().cloned());
        }
        self.documented.extend(report.documented.iter().cloned());
        self.hooks_used.extend(report.hooks_used.iter().cloned());
    }

    /// Hooks used in code without documentation.
    pub fn missing_hooks(&self) -> Vec<&str> {
        self.hooks_used
            .difference(&self.hook_docs)
            .map(String::as_str)
            .collect()
    }

    /// Functions declared in code without a rendered entry.
    pub fn undocumented(&self) -> Vec<&str> {
        self.declared
            .difference(&self.documented)
            .map(String::as_str)
            .collect()
    }

    /// Documented hooks that nothing adds or runs.
    pub fn extra_documented(&self) -> Vec<&str> {
        self.hook_docs
            .difference(&self.hooks_used)
            .map(String::as_str)
            .collect()
    }

    /// Markdown report, one bullet list per set.
    pub fn render(&self) -> String {
        let mut out = String::from("# Documentation Coverage\n");
        for (title, names) in [
            ("Missing hooks", self.missing_hooks()),
            ("Undocumented functions", self.undocumented()),
            ("Extra documented", self.extra_documented()),
        ] {
            out.push_str(&format!("\n## {} ({})\n\n", title, names.len()));
            if names.is_empty() {
                out.push_str("None.\n");
            }
            for name in names {
                out.push_str(&format!("- `{name}`\n"));
            }
        }
        out
    }
}
