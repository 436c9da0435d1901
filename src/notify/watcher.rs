use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::{
    error::AppError,
    notify::observer::{DashboardObserver, DashboardSnapshot},
    store::TimesheetStore,
    utils::clock::SharedClock,
};

/// Read side of a watcher: the most recent snapshot it published.
pub type DashboardFeed = watch::Receiver<Arc<DashboardSnapshot>>;

/// Runs a [`DashboardObserver`] on a fixed interval until stopped,
/// publishing every refreshed snapshot to its subscribers.
pub struct DashboardWatcher {
    stop: watch::Sender<bool>,
    feed: DashboardFeed,
    task: JoinHandle<()>,
}

impl DashboardWatcher {
    pub async fn spawn(
        store: TimesheetStore,
        clock: SharedClock,
        period: Duration,
    ) -> Result<Self, AppError> {
        let mut observer = DashboardObserver::start(store, clock).await?;
        let (feed_tx, feed) = watch::channel(observer.snapshot());
        let (stop, mut stop_rx) = watch::channel(false);

        info!(
            period_ms = period.as_millis() as u64,
            marker = observer.last_seen(),
            "Dashboard watcher started"
        );

        let task = actix_web::rt::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => match observer.poll().await {
                        Ok(Some(snapshot)) => {
                            debug!(marker = snapshot.marker, date = %snapshot.date, "Dashboard refreshed");
                            feed_tx.send_replace(snapshot);
                        }
                        Ok(None) => {}
                        Err(e) => warn!(error = %e, "Dashboard refresh failed, retrying next tick"),
                    },
                }
            }

            info!("Dashboard watcher stopped");
        });

        Ok(Self { stop, feed, task })
    }

    pub fn subscribe(&self) -> DashboardFeed {
        self.feed.clone()
    }

    pub fn latest(&self) -> Arc<DashboardSnapshot> {
        self.feed.borrow().clone()
    }

    /// Signals the loop and waits for it to finish its current tick.
    pub async fn stop(self) {
        self.stop.send_replace(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "Dashboard watcher ended abnormally");
        }
    }
}
