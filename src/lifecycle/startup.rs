//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the initial rule set
//! - Start the rules reload task when watching is enabled
//!
//! # Design Decisions
//! - Fail fast: an unreadable or invalid rules file at startup is fatal
//! - Later reload failures keep the rules already in service
//! - Reloads wait for the file to settle; a zero-byte file is treated as a
//!   write in progress and never replaces the rules in service

use std::path::Path;
use std::sync::Arc;
use notify::RecommendedWatcher;
use tokio::sync::broadcast;

use crate::config::RedirectsConfig;
use crate::rules::loader::{load_rules, RuleLoadError};
use crate::rules::watcher::{settled_change, RulesWatcher, RELOAD_QUIET_PERIOD};
use crate::rules::{RuleSet, RuleStore};

/// Load the configured rules file, or start with no rules when none is set.
pub fn initial_rules(config: &RedirectsConfig) -> Result<RuleSet, RuleLoadError> {
    match &config.rules_path {
        Some(path) => {
            let rules = load_rules(path)?;
            tracing::info!(path = %path.display(), rules = rules.len(), "Redirect rules loaded");
            Ok(rules)
        }
        None => {
            tracing::warn!("No rules file configured; only the legacy fixup can redirect");
            Ok(RuleSet::default())
        }
    }
}

/// Watch `path` and swap reloaded rule sets into `store` until shutdown.
///
/// The returned watcher stops watching when dropped.
pub fn start_rules_reload(
    path: &Path,
    store: Arc<RuleStore>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<RecommendedWatcher, notify::Error> {
    let (watcher, mut changes) = RulesWatcher::new(path);
    let handle = watcher.run()?;
    let path = path.to_path_buf();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                change = settled_change(&mut changes, RELOAD_QUIET_PERIOD) => match change {
                    Some(()) => reload_rules(&path, &store),
                    None => break,
                },
                _ = shutdown.recv() => break,
            }
        }
        tracing::debug!("Rules reload task stopped");
    });

    Ok(handle)
}

/// Reload `path` into `store`, keeping the current rules on any failure.
fn reload_rules(path: &Path, store: &RuleStore) {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => {
            tracing::warn!(
                path = %path.display(),
                "Rules file is empty, keeping current rules until it is written"
            );
            return;
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "Rules file unreadable, keeping current rules"
            );
            return;
        }
    }

    match load_rules(path) {
        Ok(rules) => store.replace(rules),
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "Failed to reload rules, keeping current rules"
            );
        }
    }
}
