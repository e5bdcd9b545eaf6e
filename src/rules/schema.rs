//! Rule Schema Types
//!
//! Orthographic rules are declarative data: a regular expression, a
//! category, a human-readable message and a polarity flag. They are read
//! from TOML and compiled once at load time; scanning never recompiles.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::report::Category;

/// Root rule file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleFile {
    pub ruleset: RulesetMeta,
    pub rules: Vec<RuleDef>,
}

/// Rule set metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RulesetMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// One rule as written in a rule file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleDef {
    pub pattern: String,
    pub category: Category,
    pub message: String,
    /// Flips the polarity: report once when the pattern matches nowhere
    /// in the line
    #[serde(default)]
    pub negated: bool,
}

/// A compiled rule ready to scan lines
#[derive(Debug, Clone)]
pub struct Rule {
    pub regex: Regex,
    pub category: Category,
    pub message: String,
    pub negated: bool,
}

/// One finding from scanning a line with one rule
#[derive(Debug, Clone, PartialEq)]
pub struct RuleHit {
    /// Full line with the matched span wrapped in `**`; negated rules
    /// have no span to show
    pub excerpt: Option<String>,
}

impl Rule {
    /// Compile a rule definition
    pub fn compile(def: &RuleDef) -> Result<Self> {
        let regex = Regex::new(&def.pattern)
            .with_context(|| format!("invalid rule pattern `{}`", def.pattern))?;
        Ok(Self {
            regex,
            category: def.category,
            message: def.message.clone(),
            negated: def.negated,
        })
    }

    /// Scan one full line, yielding one hit per finding
    ///
    /// Positive rules hit once per non-overlapping match. Negated rules
    /// hit exactly once when the pattern is absent from the whole line.
    pub fn scan(&self, line: &str) -> Vec<RuleHit> {
        if self.negated {
            if self.regex.is_match(line) {
                Vec::new()
            } else {
                vec![RuleHit { excerpt: None }]
            }
        } else {
            self.regex
                .find_iter(line)
                .map(|m| RuleHit {
                    excerpt: Some(highlight_span(line, m.start(), m.end())),
                })
                .collect()
        }
    }
}

/// Wrap `line[start..end]` in `**` markers so the span stands out in the log
fn highlight_span(line: &str, start: usize, end: usize) -> String {
    format!("{}**{}**{}", &line[..start], &line[start..end], &line[end..])
}
