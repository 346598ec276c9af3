//! Rule file loading.
//!
//! # Responsibilities
//! - Read a rules file (TOML, or JSON by `.json` extension)
//! - Check every rule, reporting all problems at once
//! - Produce a normalized `RuleSet`

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use thiserror::Error;

use crate::rules::model::RedirectRule;
use crate::rules::repository::RuleSet;

/// Error type for rule file loading.
#[derive(Debug, Error)]
pub enum RuleLoadError {
    #[error("failed to read rules from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML rules: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON rules: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{} invalid rule(s): {}", .0.len(), join(.0))]
    Invalid(Vec<InvalidRule>),
}

/// A rule rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRule {
    /// Position of the rule in the file, starting at 0.
    pub index: usize,
    pub from_base: String,
    pub reason: String,
}

impl fmt::Display for InvalidRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule #{} ({}): {}", self.index, self.from_base, self.reason)
    }
}

fn join(errors: &[InvalidRule]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuleFile {
    rules: Vec<RedirectRule>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonRuleFile {
    List(Vec<RedirectRule>),
    Document(RuleFile),
}

/// Load, validate and index the rules in `path`.
pub fn load_rules(path: &Path) -> Result<RuleSet, RuleLoadError> {
    let content = fs::read_to_string(path).map_err(|source| RuleLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let rules = if is_json {
        parse_json_rules(&content)?
    } else {
        parse_toml_rules(&content)?
    };

    validate_rules(&rules).map_err(RuleLoadError::Invalid)?;

    tracing::debug!(path = %path.display(), rules = rules.len(), "Rules file loaded");
    Ok(RuleSet::new(rules))
}

/// Parse a TOML document holding `[[rules]]` tables.
pub fn parse_toml_rules(content: &str) -> Result<Vec<RedirectRule>, RuleLoadError> {
    let file: RuleFile = toml::from_str(content)?;
    Ok(file.rules)
}

/// Parse a JSON array of rules, or an object with a `rules` array.
pub fn parse_json_rules(content: &str) -> Result<Vec<RedirectRule>, RuleLoadError> {
    let rules = match serde_json::from_str(content)? {
        JsonRuleFile::List(rules) => rules,
        JsonRuleFile::Document(file) => file.rules,
    };
    Ok(rules)
}

/// Semantic checks serde cannot express. Returns every failure.
pub fn validate_rules(rules: &[RedirectRule]) -> Result<(), Vec<InvalidRule>> {
    let mut errors = Vec::new();

    for (index, rule) in rules.iter().enumerate() {
        let mut reject = |reason: String| {
            errors.push(InvalidRule {
                index,
                from_base: rule.from_base.clone(),
                reason,
            })
        };

        if rule.from_base.trim().is_empty() {
            reject("from_base is empty".to_string());
        }
        if rule.to.trim().is_empty() {
            reject("to is empty".to_string());
        }
        if let Some(code) = rule.redirect_code {
            // Non-positive codes mean "unset".
            if code > 0 && !(300..=399).contains(&code) {
                reject(format!("redirect_code {} is not a 3xx status", code));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
