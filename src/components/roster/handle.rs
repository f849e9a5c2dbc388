use super::actor::{RosterActor, RosterActorHandle, RosterUpdate};
use super::models::{OccupancyBlock, TrainingCenter};
use super::schedule::MetaUpdate;
use super::stats::{DashboardStats, MonthlyOccupancy};
use super::time::MonthClock;
use crate::error::AppResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the roster actor
#[derive(Clone)]
pub struct RosterHandle {
    actor_handle: RosterActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl RosterHandle {
    /// Create a new RosterHandle and spawn the actor
    pub fn new(centers: Vec<TrainingCenter>, clock: MonthClock) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = RosterActor::new(centers, clock);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Get every center in roster order
    pub async fn list_centers(&self) -> AppResult<Vec<TrainingCenter>> {
        self.actor_handle.list_centers().await
    }

    /// Get a single center by id
    pub async fn get_center(&self, center_id: impl Into<String>) -> AppResult<TrainingCenter> {
        self.actor_handle.get_center(center_id).await
    }

    /// Get the occupancy blocks of a center
    pub async fn get_blocks(&self, center_id: impl Into<String>) -> AppResult<Vec<OccupancyBlock>> {
        self.actor_handle.get_blocks(center_id).await
    }

    /// Get the dashboard statistics
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        self.actor_handle.stats().await
    }

    /// Get the per-month booked center counts
    pub async fn trend(&self) -> AppResult<Vec<MonthlyOccupancy>> {
        self.actor_handle.trend().await
    }

    /// Dispatch an update message
    pub async fn apply(&self, update: RosterUpdate) -> AppResult<TrainingCenter> {
        self.actor_handle.apply(update).await
    }

    /// Book a tenant for a month range
    pub async fn assign_tenant(
        &self,
        center_id: impl Into<String>,
        start_month: usize,
        end_month: usize,
        tenant: impl Into<String>,
    ) -> AppResult<TrainingCenter> {
        self.apply(RosterUpdate::AssignTenant {
            center_id: center_id.into(),
            start_month,
            end_month,
            tenant: tenant.into(),
        })
        .await
    }

    /// Clear a month range
    pub async fn clear_schedule(
        &self,
        center_id: impl Into<String>,
        start_month: usize,
        end_month: usize,
    ) -> AppResult<TrainingCenter> {
        self.apply(RosterUpdate::ClearSchedule {
            center_id: center_id.into(),
            start_month,
            end_month,
        })
        .await
    }

    /// Clear the booking block covering a month
    pub async fn clear_block(
        &self,
        center_id: impl Into<String>,
        month: usize,
    ) -> AppResult<TrainingCenter> {
        self.apply(RosterUpdate::ClearBlock {
            center_id: center_id.into(),
            month,
        })
        .await
    }

    /// Edit name, location or capacity
    pub async fn edit_meta(
        &self,
        center_id: impl Into<String>,
        fields: MetaUpdate,
    ) -> AppResult<TrainingCenter> {
        self.apply(RosterUpdate::EditMeta {
            center_id: center_id.into(),
            fields,
        })
        .await
    }

    /// Put a center into or out of maintenance
    pub async fn set_maintenance(
        &self,
        center_id: impl Into<String>,
        maintenance: bool,
    ) -> AppResult<TrainingCenter> {
        self.apply(RosterUpdate::SetMaintenance {
            center_id: center_id.into(),
            maintenance,
        })
        .await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        self.actor_handle.shutdown().await
    }
}
