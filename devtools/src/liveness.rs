//! Quick-links liveness: is the local dev server / CMS studio up?
//!
//! Checks run periodically and publish a status per link. A failed check only
//! flips that link to `Down` until the next round; there is no retry or
//! backoff. Lifecycle is explicit: the poller runs until its handle is told to
//! stop.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Seconds between polling rounds.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
/// Per-check abort timeout.
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuickLink {
    pub label: String,
    pub url: String,
}

impl QuickLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// The two local services the status bar links to.
pub fn default_links() -> Vec<QuickLink> {
    vec![
        QuickLink::new("Site", "http://localhost:3000"),
        QuickLink::new("Studio", "http://localhost:3333"),
    ]
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// Not checked yet.
    #[default]
    Unknown,
    Up,
    Down,
}

impl LinkStatus {
    pub fn from_reachable(reachable: bool) -> Self {
        if reachable { Self::Up } else { Self::Down }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReport {
    pub link: QuickLink,
    pub status: LinkStatus,
}

/// Every link in `Unknown` state, the starting point before the first round.
pub fn initial_reports(links: &[QuickLink]) -> Vec<LinkReport> {
    links
        .iter()
        .map(|link| LinkReport {
            link: link.clone(),
            status: LinkStatus::Unknown,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }
}

#[cfg(feature = "native")]
pub use native::{HttpProbe, PollerHandle, Probe, check_all, spawn_liveness_poller};

#[cfg(feature = "native")]
mod native {
    use std::future::Future;
    use std::time::Duration;

    use tokio::sync::watch;
    use tokio::task::{JoinError, JoinHandle};
    use tokio_util::sync::CancellationToken;

    use super::{LinkReport, LinkStatus, PollSettings, QuickLink, initial_reports};

    /// One reachability check against a URL.
    pub trait Probe: Send + Sync + 'static {
        fn check(&self, url: &str, timeout: Duration) -> impl Future<Output = bool> + Send;
    }

    /// Any HTTP response counts as reachable; connection errors and timeouts don't.
    #[derive(Clone, Debug, Default)]
    pub struct HttpProbe {
        client: reqwest::Client,
    }

    impl HttpProbe {
        pub fn new(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl Probe for HttpProbe {
        async fn check(&self, url: &str, timeout: Duration) -> bool {
            match self.client.get(url).timeout(timeout).send().await {
                Ok(resp) => {
                    tracing::trace!(url, status = %resp.status(), "link reachable");
                    true
                }
                Err(e) => {
                    tracing::debug!(url, "link unreachable: {e}");
                    false
                }
            }
        }
    }

    /// Check every link concurrently, bounding each by `timeout`.
    pub async fn check_all<P: Probe>(
        probe: &P,
        links: &[QuickLink],
        timeout: Duration,
    ) -> Vec<LinkReport> {
        let checks = links.iter().map(|link| async move {
            let reachable = tokio::time::timeout(timeout, probe.check(&link.url, timeout))
                .await
                .unwrap_or(false);
            LinkReport {
                link: link.clone(),
                status: LinkStatus::from_reachable(reachable),
            }
        });
        futures::future::join_all(checks).await
    }

    /// Handle for a running poller. Dropping it does not stop the task; call
    /// [`PollerHandle::stop`].
    pub struct PollerHandle {
        shutdown: CancellationToken,
        statuses: watch::Receiver<Vec<LinkReport>>,
        join_handle: JoinHandle<()>,
    }

    impl PollerHandle {
        /// Request shutdown. In-flight checks are abandoned.
        pub fn stop(&self) {
            self.shutdown.cancel();
        }

        /// Receiver that sees every published round.
        pub fn statuses(&self) -> watch::Receiver<Vec<LinkReport>> {
            self.statuses.clone()
        }

        pub fn current(&self) -> Vec<LinkReport> {
            self.statuses.borrow().clone()
        }

        pub fn is_running(&self) -> bool {
            !self.join_handle.is_finished()
        }

        /// Wait for the task to finish (after [`PollerHandle::stop`]).
        pub async fn wait(self) -> Result<(), JoinError> {
            self.join_handle.await
        }
    }

    /// Spawn the periodic checker on the current tokio runtime. The first
    /// round runs immediately.
    pub fn spawn_liveness_poller<P: Probe>(
        probe: P,
        links: Vec<QuickLink>,
        settings: PollSettings,
    ) -> PollerHandle {
        let shutdown = CancellationToken::new();
        let (tx, rx) = watch::channel(initial_reports(&links));

        let token = shutdown.clone();
        let join_handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(settings.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                let reports = tokio::select! {
                    _ = token.cancelled() => break,
                    reports = check_all(&probe, &links, settings.timeout) => reports,
                };
                tx.send_replace(reports);
            }
            tracing::debug!("liveness poller stopped");
        });

        PollerHandle {
            shutdown,
            statuses: rx,
            join_handle,
        }
    }
}
