//! Periodic refresh loop.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::error;

use super::NewsService;

/// Drive the refresh on a fixed interval until shutdown is signalled.
///
/// Each pass runs inline in this task, so two refreshes can never overlap:
/// a slow upstream delays the next tick instead of stacking executions. A
/// failed pass is logged and the schedule carries on.
pub(super) async fn run(service: Arc<NewsService>, mut shutdown: watch::Receiver<bool>) {
    let mut interval = tokio::time::interval(service.config.refresh_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick resolves immediately and the initial refresh already
    // ran in `start`, so consume it before entering the loop.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = interval.tick() => {
                if let Err(e) = service.refresh_now().await {
                    error!(error = %e, "scheduled news refresh failed; serving previous snapshot");
                }
            }
        }
    }
}
