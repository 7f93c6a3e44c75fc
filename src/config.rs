use crate::error::GlossError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::{
    fs::{read_to_string, write},
    path::PathBuf,
};

/// Typed configuration for the linking engine.
///
/// Blacklists are stored lowercase; document names are compared through
/// [normalize_doc_name] so `Notes/Glossary.md`, `glossary.md` and `glossary`
/// all refer to the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Rewrite terms whenever the host re-renders a document.
    pub auto_insert: bool,
    /// Rewrite terms when the host explicitly requests it.
    pub auto_link: bool,
    /// Terms that must never be rewritten, lowercase.
    pub word_blacklist: BTreeSet<String>,
    /// Documents the engine skips entirely, lowercase, extension stripped.
    pub file_blacklist: BTreeSet<String>,
    /// Front-matter tags that mark a document as a glossary source.
    pub glossary_tags: BTreeSet<String>,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        LinkerConfig {
            auto_insert: false,
            auto_link: true,
            word_blacklist: BTreeSet::new(),
            file_blacklist: BTreeSet::new(),
            glossary_tags: BTreeSet::from(["glossary".to_string()]),
        }
    }
}

impl LinkerConfig {
    /// Lowercase the blacklists and glossary tags and strip extensions from
    /// file entries, so lookups can assume canonical form regardless of how
    /// the config was written.
    pub fn normalized(mut self) -> Self {
        self.word_blacklist = self
            .word_blacklist
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        self.file_blacklist = self
            .file_blacklist
            .iter()
            .map(|f| normalize_doc_name(f))
            .collect();
        self.glossary_tags = self
            .glossary_tags
            .iter()
            .map(|t| t.to_lowercase())
            .collect();
        self
    }
}

/// Canonical form of a document name: basename, lowercase, `.md` stripped.
pub fn normalize_doc_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let lower = base.to_lowercase();
    match lower.strip_suffix(".md") {
        Some(stem) => stem.to_string(),
        None => lower,
    }
}

pub trait ConfigProvider: Send + Sync {
    fn get_config(&self) -> Result<LinkerConfig, GlossError>;
    fn set_config(&self, config: &LinkerConfig) -> Result<(), GlossError>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TomlConfigProvider {
    path: PathBuf,
}

impl TomlConfigProvider {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigProvider { path }
    }
}

impl ConfigProvider for TomlConfigProvider {
    fn get_config(&self) -> Result<LinkerConfig, GlossError> {
        tracing::debug!("Attempting to read linker config from: {:?}", &self.path);
        if !self.path.exists() {
            tracing::debug!("Config file not found, returning defaults.");
            return Ok(LinkerConfig::default());
        }
        let content = read_to_string(&self.path)?;
        let config: BTreeMap<String, LinkerConfig> = toml::from_str(&content)?;
        config
            .get("linker")
            .cloned()
            .map(LinkerConfig::normalized)
            .ok_or_else(|| GlossError::NotFound("linker not found in config".to_string()))
    }

    fn set_config(&self, config: &LinkerConfig) -> Result<(), GlossError> {
        tracing::debug!("Attempting to write linker config to: {:?}", &self.path);
        let mut table = BTreeMap::new();
        table.insert("linker".to_string(), config.clone());
        let toml_string = toml::to_string(&table)?;
        write(&self.path, toml_string)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_normalize_doc_name() {
        assert_eq!(normalize_doc_name("Glossary.md"), "glossary");
        assert_eq!(normalize_doc_name("notes/Glossary.md"), "glossary");
        assert_eq!(normalize_doc_name("GLOSSARY"), "glossary");
        assert_eq!(normalize_doc_name("archive\\Old Terms.md"), "old terms");
    }

    #[test]
    fn test_normalized_blacklists() {
        let config = LinkerConfig {
            word_blacklist: BTreeSet::from(["Class".to_string()]),
            file_blacklist: BTreeSet::from(["Daily/Journal.md".to_string()]),
            ..Default::default()
        }
        .normalized();
        assert!(config.word_blacklist.contains("class"));
        assert!(config.file_blacklist.contains("journal"));
    }
}
