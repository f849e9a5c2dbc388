use super::models::{OccupancyBlock, TrainingCenter, MONTHS_PER_YEAR};
use super::schedule::{assign_tenant, clear_schedule, edit_meta, set_maintenance, MetaUpdate};
use super::stats::{compute_stats, monthly_trend, DashboardStats, MonthlyOccupancy};
use super::time::MonthClock;
use crate::error::{roster_error, AppResult, Error};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A change to one center, applied by the roster actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RosterUpdate {
    AssignTenant {
        center_id: String,
        start_month: usize,
        end_month: usize,
        tenant: String,
    },
    ClearSchedule {
        center_id: String,
        start_month: usize,
        end_month: usize,
    },
    /// Clear the whole booking block that covers `month`
    ClearBlock {
        center_id: String,
        month: usize,
    },
    EditMeta {
        center_id: String,
        fields: MetaUpdate,
    },
    SetMaintenance {
        center_id: String,
        maintenance: bool,
    },
}

impl RosterUpdate {
    pub fn center_id(&self) -> &str {
        match self {
            RosterUpdate::AssignTenant { center_id, .. }
            | RosterUpdate::ClearSchedule { center_id, .. }
            | RosterUpdate::ClearBlock { center_id, .. }
            | RosterUpdate::EditMeta { center_id, .. }
            | RosterUpdate::SetMaintenance { center_id, .. } => center_id,
        }
    }
}

/// The roster actor that owns every center record
pub struct RosterActor {
    centers: Vec<TrainingCenter>,
    clock: MonthClock,
    command_rx: mpsc::Receiver<RosterCommand>,
}

/// Commands that can be sent to the roster actor
pub enum RosterCommand {
    ListCenters(mpsc::Sender<Vec<TrainingCenter>>),
    GetCenter(String, mpsc::Sender<AppResult<TrainingCenter>>),
    GetBlocks(String, mpsc::Sender<AppResult<Vec<OccupancyBlock>>>),
    GetStats(mpsc::Sender<DashboardStats>),
    GetTrend(mpsc::Sender<Vec<MonthlyOccupancy>>),
    Apply(RosterUpdate, mpsc::Sender<AppResult<TrainingCenter>>),
    Shutdown,
}

/// Handle for communicating with the roster actor
#[derive(Clone)]
pub struct RosterActorHandle {
    command_tx: mpsc::Sender<RosterCommand>,
}

impl RosterActorHandle {
    async fn request<T>(
        &self,
        command: impl FnOnce(mpsc::Sender<T>) -> RosterCommand,
    ) -> AppResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(command(response_tx))
            .await
            .map_err(|e| roster_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| roster_error("Response channel closed"))
    }

    /// Snapshot of every center in roster order
    pub async fn list_centers(&self) -> AppResult<Vec<TrainingCenter>> {
        self.request(RosterCommand::ListCenters).await
    }

    pub async fn get_center(&self, center_id: impl Into<String>) -> AppResult<TrainingCenter> {
        let center_id = center_id.into();
        self.request(|tx| RosterCommand::GetCenter(center_id, tx))
            .await?
    }

    pub async fn get_blocks(
        &self,
        center_id: impl Into<String>,
    ) -> AppResult<Vec<OccupancyBlock>> {
        let center_id = center_id.into();
        self.request(|tx| RosterCommand::GetBlocks(center_id, tx))
            .await?
    }

    pub async fn stats(&self) -> AppResult<DashboardStats> {
        self.request(RosterCommand::GetStats).await
    }

    pub async fn trend(&self) -> AppResult<Vec<MonthlyOccupancy>> {
        self.request(RosterCommand::GetTrend).await
    }

    /// Apply an update and return the replaced center record
    pub async fn apply(&self, update: RosterUpdate) -> AppResult<TrainingCenter> {
        self.request(|tx| RosterCommand::Apply(update, tx)).await?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        let _ = self.command_tx.send(RosterCommand::Shutdown).await;
        Ok(())
    }
}

impl RosterActor {
    /// Create a new actor and return its handle
    pub fn new(centers: Vec<TrainingCenter>, clock: MonthClock) -> (Self, RosterActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            centers,
            clock,
            command_rx,
        };

        let handle = RosterActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Roster actor started with {} centers", self.centers.len());

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                RosterCommand::ListCenters(response_tx) => {
                    let _ = response_tx.send(self.centers.clone()).await;
                }
                RosterCommand::GetCenter(center_id, response_tx) => {
                    let result = self.find(&center_id).cloned();
                    let _ = response_tx.send(result).await;
                }
                RosterCommand::GetBlocks(center_id, response_tx) => {
                    let result = self.find(&center_id).map(TrainingCenter::blocks);
                    let _ = response_tx.send(result).await;
                }
                RosterCommand::GetStats(response_tx) => {
                    let _ = response_tx.send(compute_stats(&self.centers)).await;
                }
                RosterCommand::GetTrend(response_tx) => {
                    let _ = response_tx.send(monthly_trend(&self.centers)).await;
                }
                RosterCommand::Apply(update, response_tx) => {
                    let result = self.apply(update);
                    let _ = response_tx.send(result).await;
                }
                RosterCommand::Shutdown => {
                    info!("Roster actor shutting down");
                    break;
                }
            }
        }

        info!("Roster actor shut down");
    }

    fn find(&self, center_id: &str) -> AppResult<&TrainingCenter> {
        self.centers
            .iter()
            .find(|c| c.id == center_id)
            .ok_or_else(|| Error::CenterNotFound(center_id.to_string()))
    }

    /// Validate an update, run the matching mutator and replace the record
    fn apply(&mut self, update: RosterUpdate) -> AppResult<TrainingCenter> {
        validate(&update)?;

        let index = self
            .centers
            .iter()
            .position(|c| c.id == update.center_id())
            .ok_or_else(|| Error::CenterNotFound(update.center_id().to_string()))?;

        let current_month = self.clock.current_month();
        let center = &self.centers[index];
        let updated = match &update {
            RosterUpdate::AssignTenant {
                start_month,
                end_month,
                tenant,
                ..
            } => assign_tenant(center, *start_month, *end_month, tenant.trim(), current_month),
            RosterUpdate::ClearSchedule {
                start_month,
                end_month,
                ..
            } => clear_schedule(center, *start_month, *end_month, current_month),
            RosterUpdate::ClearBlock { month, .. } => {
                let block = center.block_at(*month).ok_or_else(|| {
                    roster_error(&format!("No booking in month {} of {}", month, center.id))
                })?;
                clear_schedule(center, block.start_month, block.end_month, current_month)
            }
            RosterUpdate::EditMeta { fields, .. } => edit_meta(center, fields),
            RosterUpdate::SetMaintenance { maintenance, .. } => {
                set_maintenance(center, *maintenance, current_month)
            }
        };

        debug!(
            "Applied {:?} to {}: occupancy {}% status {:?}",
            update, updated.id, updated.occupancy_rate, updated.status
        );
        self.centers[index] = updated.clone();

        Ok(updated)
    }
}

/// Reject updates the mutators would otherwise accept silently
fn validate(update: &RosterUpdate) -> AppResult<()> {
    match update {
        RosterUpdate::AssignTenant {
            start_month,
            end_month,
            tenant,
            ..
        } => {
            if tenant.trim().is_empty() {
                warn!("Rejected schedule without tenant name");
                return Err(roster_error("Tenant name must not be empty"));
            }
            validate_range(*start_month, *end_month)
        }
        RosterUpdate::ClearSchedule {
            start_month,
            end_month,
            ..
        } => validate_range(*start_month, *end_month),
        RosterUpdate::ClearBlock { month, .. } => validate_range(*month, *month),
        RosterUpdate::EditMeta { fields, .. } => {
            if fields.capacity == Some(0) {
                return Err(roster_error("Capacity must be positive"));
            }
            if fields.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
                return Err(roster_error("Center name must not be empty"));
            }
            Ok(())
        }
        RosterUpdate::SetMaintenance { .. } => Ok(()),
    }
}

fn validate_range(start_month: usize, end_month: usize) -> AppResult<()> {
    if start_month >= MONTHS_PER_YEAR {
        return Err(roster_error(&format!(
            "Start month {} is outside the year",
            start_month
        )));
    }
    if start_month > end_month {
        return Err(roster_error(&format!(
            "Start month {} is after end month {}",
            start_month, end_month
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_wire_format() {
        let update: RosterUpdate = serde_json::from_str(
            r#"{"type":"assign_tenant","center_id":"center-1","start_month":2,"end_month":5,"tenant":"Camp"}"#,
        )
        .unwrap();
        assert_eq!(update.center_id(), "center-1");
        assert!(matches!(update, RosterUpdate::AssignTenant { end_month: 5, .. }));

        let update: RosterUpdate = serde_json::from_str(
            r#"{"type":"edit_meta","center_id":"center-2","fields":{"capacity":30}}"#,
        )
        .unwrap();
        assert_eq!(
            update,
            RosterUpdate::EditMeta {
                center_id: "center-2".to_string(),
                fields: MetaUpdate {
                    capacity: Some(30),
                    ..Default::default()
                },
            }
        );
    }

    #[test]
    fn test_validation() {
        let blank = RosterUpdate::AssignTenant {
            center_id: "center-1".to_string(),
            start_month: 0,
            end_month: 0,
            tenant: "   ".to_string(),
        };
        assert!(validate(&blank).is_err());

        let inverted = RosterUpdate::ClearSchedule {
            center_id: "center-1".to_string(),
            start_month: 4,
            end_month: 2,
        };
        assert!(validate(&inverted).is_err());

        let past_year = RosterUpdate::ClearSchedule {
            center_id: "center-1".to_string(),
            start_month: 12,
            end_month: 12,
        };
        assert!(validate(&past_year).is_err());

        // End months past December are clipped by the mutators
        let clipped = RosterUpdate::ClearSchedule {
            center_id: "center-1".to_string(),
            start_month: 10,
            end_month: 13,
        };
        assert!(validate(&clipped).is_ok());
    }
}
