//! Rule Catalog
//!
//! Ordered, run-immutable collection of compiled rules. The built-in Derge
//! Tengyur set ships inside the binary; extra rule files can be layered on
//! from user directories before validation starts. Catalog order is load
//! order and rules never reorder afterwards.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::schema::{Rule, RuleFile};

/// Compiled rules in scan order
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Catalog preloaded with the built-in Derge Tengyur rules
    pub fn with_embedded_rules() -> Result<Self> {
        let mut catalog = Self::new();
        catalog
            .add_toml(include_str!("../../resources/rules/derge.rules.toml"))
            .context("failed to load embedded rule set")?;
        Ok(catalog)
    }

    /// Parse a rule file and append its rules in declaration order
    pub fn add_toml(&mut self, content: &str) -> Result<usize> {
        let file: RuleFile = toml::from_str(content)?;
        for def in &file.rules {
            self.rules.push(Rule::compile(def)?);
        }
        Ok(file.rules.len())
    }

    /// Load every `*.toml` under `dir`, sorted by file name
    ///
    /// A missing directory is fine; a file that fails to parse is
    /// skipped with a warning so one bad file cannot take down a run.
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let mut paths: Vec<_> = fs::read_dir(dir)
            .with_context(|| format!("failed to read rule directory: {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("toml"))
            .collect();
        paths.sort();

        let mut added = 0;
        for path in paths {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read rule file: {}", path.display()))?;
            match self.add_toml(&content) {
                Ok(count) => added += count,
                Err(e) => {
                    log::warn!("skipping rule file {}: {e:#}", path.display());
                }
            }
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}
