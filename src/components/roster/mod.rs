mod actor;
mod handle;
pub mod models;
pub mod schedule;
pub mod seed;
pub mod stats;
pub mod time;

pub use actor::RosterUpdate;
pub use handle::RosterHandle;

use crate::config::Config;
use crate::error::AppResult;
use async_trait::async_trait;
use seed::seed_roster;
use std::sync::Arc;
use time::MonthClock;
use tokio::sync::RwLock;
use tracing::info;

/// Roster component owning the training center store
#[derive(Default)]
pub struct Roster {
    handle: RwLock<Option<RosterHandle>>,
}

impl Roster {
    /// Create a new roster component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<RosterHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }
}

#[async_trait]
impl super::Component for Roster {
    fn name(&self) -> &'static str {
        "roster"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> AppResult<()> {
        let clock = MonthClock::Wall(config.read().await.tz()?);

        // Create a new handle if one doesn't exist
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            let centers = seed_roster(clock.current_month());
            info!("Seeding roster with {} centers", centers.len());
            *handle_lock = Some(RosterHandle::new(centers, clock));
        }

        Ok(())
    }

    async fn shutdown(&self) -> AppResult<()> {
        // Shutdown the handle if it exists
        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }

        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
