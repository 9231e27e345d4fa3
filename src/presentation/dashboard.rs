//! Civic health dashboard: aggregate statistics and per-area health.
//!
//! Refreshes run without holding the state lock, so a manual refresh and a
//! timer tick may overlap; whichever finishes last wins.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::client::CivicApi;
use super::display::AreaHealthCard;
use crate::models::{AdminStatsResponse, AreaHealthItem};

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

pub const MSG_FETCH_FAILED: &str = "Failed to fetch data";

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub stats: Option<AdminStatsResponse>,
    pub areas: Vec<AreaHealthItem>,
    pub loading: bool,
    /// Error banner; previously loaded data stays visible underneath it
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl DashboardState {
    pub fn cards(&self) -> Vec<AreaHealthCard> {
        self.areas.iter().map(AreaHealthCard::from).collect()
    }

    /// Initial spinner only shows while nothing has been loaded yet
    pub fn show_spinner(&self) -> bool {
        self.loading && self.areas.is_empty()
    }

    pub fn show_empty_notice(&self) -> bool {
        !self.loading && self.areas.is_empty()
    }
}

#[derive(Clone)]
pub struct Dashboard {
    state: Arc<Mutex<DashboardState>>,
    api: Arc<dyn CivicApi>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn CivicApi>) -> Self {
        Self {
            state: Arc::new(Mutex::new(DashboardState::default())),
            api,
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.lock().clone()
    }

    /// Fetch stats and area health together; both must succeed to replace the data.
    pub async fn refresh(&self) {
        {
            let mut state = self.state.lock();
            state.loading = true;
            state.error = None;
        }

        let (stats, areas) = tokio::join!(self.api.admin_stats(), self.api.area_health());

        let mut state = self.state.lock();
        match (stats, areas) {
            (Ok(stats), Ok(areas)) => {
                state.stats = Some(stats);
                state.areas = areas;
                state.last_updated = Some(Utc::now());
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "Dashboard refresh failed");
                state.error = Some(MSG_FETCH_FAILED.to_string());
            }
        }
        state.loading = false;
    }

    /// Start periodic refreshing; the first refresh happens immediately.
    pub fn start_polling(&self, period: Duration) -> DashboardPoller {
        let token = CancellationToken::new();
        let dashboard = self.clone();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => dashboard.refresh().await,
                }
            }
            tracing::debug!("Dashboard polling stopped");
        });

        DashboardPoller {
            token,
            handle: Some(handle),
        }
    }
}

/// Handle to the refresh task; stops it on [`DashboardPoller::stop`] or drop.
pub struct DashboardPoller {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl DashboardPoller {
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Dashboard polling task ended abnormally");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DashboardPoller {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
