//! Rules file watcher for hot reload.
//!
//! The watcher only reports that the file changed. Loading happens once the
//! writes have settled, so an editor that truncates before writing is never
//! read halfway through.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// How long the rules file must stay untouched before it is reloaded.
pub const RELOAD_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Watches the rules file and reports changes to it.
pub struct RulesWatcher {
    path: PathBuf,
    change_tx: mpsc::UnboundedSender<()>,
}

impl RulesWatcher {
    /// Returns the watcher and the receiving end of its change notifications.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (change_tx, change_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            change_tx,
        };
        (watcher, change_rx)
    }

    /// Start watching. The returned handle must be kept alive for as long as
    /// reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.change_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::debug!(
                        path = %path.display(),
                        kind = ?event.kind,
                        "Rules file changed"
                    );
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Rules watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), "Rules watcher started");
        Ok(watcher)
    }
}

/// Wait for a change, then keep absorbing changes until none arrives for
/// `quiet`. Returns `None` once the watcher is gone and nothing is pending.
pub async fn settled_change(
    changes: &mut mpsc::UnboundedReceiver<()>,
    quiet: Duration,
) -> Option<()> {
    changes.recv().await?;
    let mut coalesced = 0usize;
    loop {
        match timeout(quiet, changes.recv()).await {
            Ok(Some(())) => coalesced += 1,
            Ok(None) | Err(_) => break,
        }
    }
    if coalesced > 0 {
        tracing::debug!(coalesced, "Rules file changes coalesced");
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_burst_of_changes_settles_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        for _ in 0..3 {
            tx.send(()).unwrap();
        }

        let sender = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            tx.send(()).unwrap();
            tx
        });

        assert_eq!(settled_change(&mut rx, RELOAD_QUIET_PERIOD).await, Some(()));
        let tx = sender.await.unwrap();
        assert!(rx.try_recv().is_err(), "every change in the burst is absorbed");
        drop(tx);
        assert_eq!(settled_change(&mut rx, RELOAD_QUIET_PERIOD).await, None);
    }

    #[tokio::test]
    async fn test_separate_changes_settle_separately() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(()).unwrap();
        assert_eq!(settled_change(&mut rx, RELOAD_QUIET_PERIOD).await, Some(()));

        tx.send(()).unwrap();
        assert_eq!(settled_change(&mut rx, RELOAD_QUIET_PERIOD).await, Some(()));
        assert!(rx.try_recv().is_err());
    }
}
