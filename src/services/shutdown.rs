//! Session shutdown
//!
//! However the interface ended (clean quit, terminal setup failure, a
//! failed restore) pending tasks get a grace period and the store is then
//! closed exactly once.

use anyhow::{Context, Result};
use std::time::Duration;

use super::tasks::TaskRunner;
use crate::vfs::Storage;

/// How long pending tasks may keep running after the interface is gone
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Drain `runner`, shut `storage` down and combine both outcomes
///
/// An interface error takes precedence over a shutdown error; the shutdown
/// itself runs in either case.
pub async fn finish_session(
    ui_result: Result<()>,
    runner: &TaskRunner,
    storage: &dyn Storage,
    grace: Duration,
) -> Result<()> {
    if let Err(e) = &ui_result {
        tracing::error!(error = %format!("{:#}", e), "interface stopped with an error");
    }

    runner.wait_idle(grace).await;

    let shutdown = storage.shutdown().context("failed to properly close VFS");
    match &shutdown {
        Ok(()) => tracing::info!("storage shut down"),
        Err(e) => tracing::error!(error = %format!("{:#}", e), "storage shutdown failed"),
    }

    ui_result.and(shutdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::PreviewOptions;
    use crate::vfs::Vfs;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn runner_for(vfs: &Arc<Vfs>) -> TaskRunner {
        let storage: Arc<dyn Storage> = vfs.clone();
        let (tx, _rx) = mpsc::unbounded_channel();
        TaskRunner::new(storage, tx, PreviewOptions::default())
    }

    #[tokio::test]
    async fn test_failed_setup_still_shuts_down() {
        let vfs = Arc::new(Vfs::in_memory());
        let runner = runner_for(&vfs);

        let setup = Err(anyhow::anyhow!("failed to enable raw mode"));
        let result = finish_session(setup, &runner, &*vfs, SHUTDOWN_GRACE).await;

        assert_eq!(result.unwrap_err().to_string(), "failed to enable raw mode");
        // Already closed: a second shutdown is refused
        assert!(vfs.shutdown().is_err());
    }

    #[tokio::test]
    async fn test_interface_error_wins_over_shutdown_error() {
        let vfs = Arc::new(Vfs::in_memory());
        vfs.shutdown().unwrap();
        let runner = runner_for(&vfs);

        let result = finish_session(
            Err(anyhow::anyhow!("failed to restore terminal")),
            &runner,
            &*vfs,
            SHUTDOWN_GRACE,
        )
        .await;
        assert_eq!(result.unwrap_err().to_string(), "failed to restore terminal");
    }

    #[tokio::test]
    async fn test_shutdown_error_reported_after_clean_run() {
        let vfs = Arc::new(Vfs::in_memory());
        vfs.shutdown().unwrap();
        let runner = runner_for(&vfs);

        let result = finish_session(Ok(()), &runner, &*vfs, SHUTDOWN_GRACE).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "failed to properly close VFS"
        );
    }

    #[tokio::test]
    async fn test_clean_run_and_shutdown() {
        let vfs = Arc::new(Vfs::in_memory());
        let runner = runner_for(&vfs);

        assert!(finish_session(Ok(()), &runner, &*vfs, SHUTDOWN_GRACE)
            .await
            .is_ok());
    }
}
