//! Read-only key/value configuration, one section per actor or subsystem.
//!
//! A section is a flat JSON object whose values are strings or lists of
//! strings (numbers and booleans are accepted and read back as text):
//!
//! ```json
//! { "width": "32", "height": 48, "animations": ["stand", "walk"] }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum ConfigValue {
    List(Vec<String>),
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl ConfigValue {
    fn as_text(&self) -> Option<String> {
        match self {
            ConfigValue::Text(s) => Some(s.clone()),
            ConfigValue::Number(n) => Some(n.to_string()),
            ConfigValue::Flag(b) => Some(b.to_string()),
            ConfigValue::List(_) => None,
        }
    }
}

/// One named configuration section.
#[derive(Clone, Debug)]
pub struct Config {
    section: String,
    values: HashMap<String, ConfigValue>,
}

impl Config {
    /// Create an empty section.
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            values: HashMap::new(),
        }
    }

    /// Parse a section from JSON text.
    pub fn from_json(section: impl Into<String>, text: &str) -> Result<Self> {
        let section = section.into();
        let values = serde_json::from_str(text).map_err(|source| Error::ConfigParse {
            section: section.clone(),
            source,
        })?;
        Ok(Self { section, values })
    }

    /// Builder-style scalar entry.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.values
            .insert(key.to_string(), ConfigValue::Text(value.to_string()));
        self
    }

    /// Builder-style list entry.
    #[must_use]
    pub fn with_list<I, S>(mut self, key: &str, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = items.into_iter().map(Into::into).collect();
        self.values.insert(key.to_string(), ConfigValue::List(list));
        self
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Scalar lookup. Lists and missing keys are errors.
    pub fn get(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .and_then(ConfigValue::as_text)
            .ok_or_else(|| self.missing(key))
    }

    /// Scalar lookup that tolerates absence.
    pub fn get_opt(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(ConfigValue::as_text)
    }

    /// Ordered list lookup. A scalar value reads as a one-element list.
    pub fn get_many(&self, key: &str) -> Result<Vec<String>> {
        match self.values.get(key) {
            Some(ConfigValue::List(items)) => Ok(items.clone()),
            Some(other) => other
                .as_text()
                .map(|s| vec![s])
                .ok_or_else(|| self.missing(key)),
            None => Err(self.missing(key)),
        }
    }

    /// List lookup that reads a missing key as empty.
    pub fn get_many_or_empty(&self, key: &str) -> Vec<String> {
        self.get_many(key).unwrap_or_default()
    }

    /// Parse a scalar into any `FromStr` type.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<T> {
        let raw = self.get(key)?;
        raw.trim().parse().map_err(|_| Error::InvalidValue {
            section: self.section.clone(),
            key: key.to_string(),
            value: raw.clone(),
        })
    }

    /// Parse a scalar, falling back to `default` when the key is absent.
    /// A present but malformed value is still an error.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T> {
        if self.contains(key) {
            self.parse(key)
        } else {
            Ok(default)
        }
    }

    fn missing(&self, key: &str) -> Error {
        Error::MissingKey {
            section: self.section.clone(),
            key: key.to_string(),
        }
    }
}

/// Where configuration sections come from.
pub trait ConfigSource {
    fn section(&self, name: &str) -> Result<Config>;

    /// Like `section`, but `None` when the section does not exist at all.
    fn optional_section(&self, name: &str) -> Result<Option<Config>>;
}

/// Reads `<root>/<name>.json`.
#[derive(Clone, Debug)]
pub struct DirConfigSource {
    root: PathBuf,
}

impl DirConfigSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

impl ConfigSource for DirConfigSource {
    fn section(&self, name: &str) -> Result<Config> {
        let path = self.path_for(name);
        let text = std::fs::read_to_string(&path)
            .map_err(|source| Error::ConfigIo { path, source })?;
        log::debug!("Loaded config section `{}`", name);
        Config::from_json(name, &text)
    }

    fn optional_section(&self, name: &str) -> Result<Option<Config>> {
        if self.path_for(name).exists() {
            self.section(name).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// In-memory sections, handy for tests and embedded setups.
#[derive(Clone, Debug, Default)]
pub struct MemoryConfigSource {
    sections: HashMap<String, Config>,
}

impl MemoryConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_section(mut self, config: Config) -> Self {
        self.insert(config);
        self
    }

    pub fn insert(&mut self, config: Config) {
        self.sections.insert(config.section().to_string(), config);
    }
}

impl ConfigSource for MemoryConfigSource {
    fn section(&self, name: &str) -> Result<Config> {
        self.sections
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ConfigIo {
                path: PathBuf::from(name),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such section"),
            })
    }

    fn optional_section(&self, name: &str) -> Result<Option<Config>> {
        Ok(self.sections.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_scalars_lists_and_numbers() {
        let cfg = Config::from_json(
            "player",
            r#"{ "width": "32", "height": 48, "animations": ["stand", "walk"], "solid": true }"#,
        )
        .unwrap();

        assert_eq!(cfg.get("width").unwrap(), "32");
        assert_eq!(cfg.parse::<i32>("height").unwrap(), 48);
        assert_eq!(cfg.get_many("animations").unwrap(), vec!["stand", "walk"]);
        assert_eq!(cfg.get("solid").unwrap(), "true");
    }

    #[test]
    fn missing_key_names_section_and_key() {
        let cfg = Config::new("tile");
        let err = cfg.get("width").unwrap_err();
        assert!(matches!(err, Error::MissingKey { ref section, ref key } if section == "tile" && key == "width"));
    }

    #[test]
    fn invalid_number_is_reported() {
        let cfg = Config::new("tile").with("width", "wide");
        assert!(matches!(
            cfg.parse::<i32>("width"),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn parse_or_only_defaults_when_absent() {
        let cfg = Config::new("wave").with("maxRadius", "90");
        assert_eq!(cfg.parse_or("maxRadius", 10.0f32).unwrap(), 90.0);
        assert_eq!(cfg.parse_or("growthRate", 60.0f32).unwrap(), 60.0);
    }

    #[test]
    fn scalar_reads_as_single_item_list() {
        let cfg = Config::new("entity").with("sounds", "squish");
        assert_eq!(cfg.get_many("sounds").unwrap(), vec!["squish"]);
        assert!(cfg.get_many_or_empty("animations").is_empty());
    }

    #[test]
    fn memory_source_reports_missing_sections() {
        let source = MemoryConfigSource::new().with_section(Config::new("tile"));
        assert!(source.section("tile").is_ok());
        assert!(source.section("player").is_err());
        assert!(source.optional_section("wave").unwrap().is_none());
    }
}
