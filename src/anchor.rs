//! Heading anchor slugs for rendered entries.

use regex::Regex;
use std::sync::LazyLock;

static RE_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static RE_COLLAPSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

/// Anchor slug for a display name:
/// - lowercase
/// - drop everything except word characters, whitespace and hyphens
/// - collapse runs of hyphens and whitespace into a single hyphen
///
/// Underscores survive, dots and colons do not: `lia.item.add` → `liaitemadd`.
pub fn slug(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = RE_STRIP.replace_all(&lower, "");
    RE_COLLAPSE.replace_all(&stripped, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_dotted() {
        assert_eq!(slug("lia.item.add"), "liaitemadd");
    }

    #[test]
    fn slug_keeps_underscores() {
        assert_eq!(slug("getChar_Name"), "getchar_name");
    }

    #[test]
    fn slug_spaces_and_hyphens() {
        assert_eq!(slug("Hello  World"), "hello-world");
        assert_eq!(slug("drop - index"), "drop-index");
    }

    #[test]
    fn slug_varargs() {
        assert_eq!(slug("ITEM:onUse(...)"), "itemonuse");
    }
}
