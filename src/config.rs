//! Optional `liadoc.toml` project configuration.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "liadoc.toml";
const DEFAULT_NAMESPACE: &str = "lia";

#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Reserved library prefix, without the trailing dot.
    pub namespace: Option<String>,
    pub output: Option<PathBuf>,
    pub docs_root: Option<PathBuf>,
    /// Extra type links, name to URL.
    pub types: BTreeMap<String, String>,
}

impl Config {
    /// Load `explicit`, or `./liadoc.toml` when it exists, or defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        match explicit {
            Some(path) if !path.is_file() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path),
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Self::from_file(implicit)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn namespace(&self) -> &str {
        self.namespace
            .as_deref()
            .map(|ns| ns.trim_end_matches('.'))
            .filter(|ns| !ns.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("liadoc.toml");
        fs::write(
            &path,
            r#"
namespace = "ix."
output = "docs/libraries"

[types]
Character = "https://example.org/character"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.namespace(), "ix");
        assert_eq!(config.output, Some(PathBuf::from("docs/libraries")));
        assert_eq!(config.docs_root, None);
        assert_eq!(
            config.types.get("Character").map(String::as_str),
            Some("https://example.org/character")
        );
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.namespace(), "lia");
        assert!(config.types.is_empty());
    }

    #[test]
    fn explicit_missing_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn bad_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("liadoc.toml");
        fs::write(&path, "namespace = [").unwrap();
        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse { .. })));

        fs::write(&path, "unknown_key = 1").unwrap();
        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse { .. })));
    }
}
