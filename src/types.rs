//! Type names to documentation links, and type/description splitting for
//! parameter and return fields.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const LUA_MANUAL: &str = "https://www.lua.org/manual/5.1/manual.html";
const GMOD_WIKI: &str = "https://wiki.facepunch.com/gmod";

/// Anchor used for anything not otherwise known.
const FALLBACK_ANCHOR: &str = "2.2";

const BASE_TYPES: &[(&str, &str)] = &[
    ("string", "5.4"),
    ("number", "5.3"),
    ("boolean", "5.2"),
    ("table", "5.5"),
    ("function", "5.6"),
    ("nil", "5.1"),
    ("thread", "5.7"),
    ("userdata", "5.8"),
    ("any", "2.2"),
    ("vararg", "5.2.4"),
];

const ENGINE_TYPES: &[&str] = &[
    "Player",
    "Entity",
    "Vector",
    "Angle",
    "Color",
    "Panel",
    "IMaterial",
    "ITexture",
    "ISound",
    "ConVar",
    "CUserCmd",
    "CMoveData",
    "CTakeDamageInfo",
    "CEffectData",
    "CLuaEmitter",
    "CLuaEffect",
    "CLuaParticle",
    "PhysObj",
    "VMatrix",
    "IGModAudioChannel",
    "File",
    "HTTPRequest",
    "Material",
    "Texture",
    "Sound",
    "Weapon",
    "Vehicle",
    "NPC",
    "NextBot",
    "PathFollower",
    "CLuaLocomotion",
    "CSEnt",
    "CSoundPatch",
    "SurfaceInfo",
    "TraceResult",
    "Trace",
];

// `<type> - <description>` on one line
static RE_TYPE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s*-\s*(.+)$").unwrap());

// a bare type token, unions and dotted names included
static RE_TYPE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w|.]+$").unwrap());

/// Resolves type names to documentation URLs.
///
/// Lookup is case-insensitive: domain types first (engine classes plus any
/// configured extras), then Lua base types, then the generic fallback.
#[derive(Debug, Clone)]
pub struct TypeResolver {
    domain: BTreeMap<String, String>,
    base: BTreeMap<String, String>,
}

impl Default for TypeResolver {
    fn default() -> Self {
        let domain = ENGINE_TYPES
            .iter()
            .map(|name| (name.to_lowercase(), format!("{GMOD_WIKI}/{name}")))
            .collect();
        let base = BASE_TYPES
            .iter()
            .map(|(name, anchor)| (name.to_string(), format!("{LUA_MANUAL}#{anchor}")))
            .collect();
        TypeResolver { domain, base }
    }
}

impl TypeResolver {
    /// Add or override domain types, e.g. from the `[types]` config table.
    pub fn with_types(mut self, extra: &BTreeMap<String, String>) -> Self {
        for (name, link) in extra {
            self.domain.insert(name.trim().to_lowercase(), link.clone());
        }
        self
    }

    pub fn link(&self, name: &str) -> String {
        let key = name.trim().to_lowercase();
        self.domain
            .get(&key)
            .or_else(|| self.base.get(&key))
            .cloned()
            .unwrap_or_else(|| format!("{LUA_MANUAL}#{FALLBACK_ANCHOR}"))
    }
}

/// A parameter type after `nil` has been pulled out of its union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub display: String,
    pub link_type: String,
    pub optional: bool,
}

fn union_members(text: &str) -> Vec<&str> {
    text.split('|')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Split a parameter type: `nil` marks the parameter optional and is not
/// displayed, unless it is the only member.
pub fn split_optional(text: &str) -> TypeSpec {
    let members = union_members(text);
    let optional = members.iter().any(|p| p.eq_ignore_ascii_case("nil"));
    let rest: Vec<&str> = members
        .into_iter()
        .filter(|p| !p.eq_ignore_ascii_case("nil"))
        .collect();

    match rest.first() {
        Some(first) => TypeSpec {
            display: rest.join("|"),
            link_type: first.to_string(),
            optional,
        },
        None if optional => TypeSpec {
            display: "nil".to_string(),
            link_type: "nil".to_string(),
            optional: false,
        },
        None => TypeSpec {
            display: String::new(),
            link_type: String::new(),
            optional: false,
        },
    }
}

/// Split a return type: the union is displayed as written, the link goes to
/// the first non-nil member.
pub fn split_union(text: &str) -> (String, String) {
    let members = union_members(text);
    let link = members
        .iter()
        .find(|p| !p.eq_ignore_ascii_case("nil"))
        .or(members.first())
        .map(|p| p.to_string())
        .unwrap_or_default();
    (members.join("|"), link)
}

/// A `Returns:` blob split into an optional type and a description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnSpec {
    pub ty: Option<String>,
    pub description: String,
}

pub fn split_returns(text: &str) -> ReturnSpec {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    match lines.as_slice() {
        [] => ReturnSpec::default(),
        [only] => {
            if let Some(c) = RE_TYPE_DASH.captures(only) {
                ReturnSpec {
                    ty: Some(c[1].trim().to_string()),
                    description: c[2].trim().to_string(),
                }
            } else if RE_TYPE_TOKEN.is_match(only) {
                ReturnSpec {
                    ty: Some(only.to_string()),
                    description: String::new(),
                }
            } else {
                ReturnSpec {
                    ty: None,
                    description: only.to_string(),
                }
            }
        }
        [first, rest @ ..] if RE_TYPE_TOKEN.is_match(first) => ReturnSpec {
            ty: Some(first.to_string()),
            description: rest.join(" "),
        },
        all => ReturnSpec {
            ty: None,
            description: all.join(" "),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_are_case_insensitive() {
        let r = TypeResolver::default();
        assert_eq!(r.link("string"), "https://www.lua.org/manual/5.1/manual.html#5.4");
        assert_eq!(r.link("String"), "https://www.lua.org/manual/5.1/manual.html#5.4");
        assert_eq!(r.link("player"), "https://wiki.facepunch.com/gmod/Player");
        assert_eq!(r.link(" Vector "), "https://wiki.facepunch.com/gmod/Vector");
        assert_eq!(r.link("vararg"), "https://www.lua.org/manual/5.1/manual.html#5.2.4");
    }

    #[test]
    fn unknown_falls_back() {
        let r = TypeResolver::default();
        assert_eq!(r.link("Inventory"), "https://www.lua.org/manual/5.1/manual.html#2.2");
        assert_eq!(r.link(""), "https://www.lua.org/manual/5.1/manual.html#2.2");
    }

    #[test]
    fn configured_types_take_priority() {
        let mut extra = BTreeMap::new();
        extra.insert("Character".to_string(), "https://example.org/character".to_string());
        extra.insert("string".to_string(), "https://example.org/str".to_string());
        let r = TypeResolver::default().with_types(&extra);
        assert_eq!(r.link("character"), "https://example.org/character");
        assert_eq!(r.link("string"), "https://example.org/str");
    }

    #[test]
    fn optional_union() {
        assert_eq!(
            split_optional("string|nil"),
            TypeSpec {
                display: "string".to_string(),
                link_type: "string".to_string(),
                optional: true,
            }
        );
        assert_eq!(
            split_optional("nil"),
            TypeSpec {
                display: "nil".to_string(),
                link_type: "nil".to_string(),
                optional: false,
            }
        );
        let spec = split_optional(" Player | Entity | NIL ");
        assert_eq!(spec.display, "Player|Entity");
        assert_eq!(spec.link_type, "Player");
        assert!(spec.optional);
        assert!(!split_optional("table").optional);
    }

    #[test]
    fn return_union_keeps_nil() {
        assert_eq!(
            split_union("nil|Player"),
            ("nil|Player".to_string(), "Player".to_string())
        );
        assert_eq!(split_union("nil"), ("nil".to_string(), "nil".to_string()));
    }

    #[test]
    fn returns_single_line() {
        assert_eq!(
            split_returns("boolean - Whether it succeeded"),
            ReturnSpec {
                ty: Some("boolean".to_string()),
                description: "Whether it succeeded".to_string(),
            }
        );
        assert_eq!(split_returns("table|nil").ty.as_deref(), Some("table|nil"));
        assert_eq!(
            split_returns("Nothing useful."),
            ReturnSpec {
                ty: None,
                description: "Nothing useful.".to_string(),
            }
        );
    }

    #[test]
    fn returns_multi_line() {
        assert_eq!(
            split_returns("number\n  The new total\n  after tax."),
            ReturnSpec {
                ty: Some("number".to_string()),
                description: "The new total after tax.".to_string(),
            }
        );
        assert_eq!(
            split_returns("The new total\nafter tax."),
            ReturnSpec {
                ty: None,
                description: "The new total after tax.".to_string(),
            }
        );
        assert_eq!(split_returns("  \n "), ReturnSpec::default());
    }
}
