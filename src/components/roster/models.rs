use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of monthly slots in a center's calendar
pub const MONTHS_PER_YEAR: usize = 12;

/// Block label for occupied months without a recorded tenant
pub const UNASSIGNED_TENANT: &str = "unassigned";

/// Whole-center status shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CenterStatus {
    Available,
    Occupied,
    Maintenance,
}

impl CenterStatus {
    /// Stable identifier used in prompts and templates
    pub fn as_str(&self) -> &'static str {
        match self {
            CenterStatus::Available => "AVAILABLE",
            CenterStatus::Occupied => "OCCUPIED",
            CenterStatus::Maintenance => "MAINTENANCE",
        }
    }

    /// Localized label for the status
    pub fn label(&self) -> String {
        match self {
            CenterStatus::Available => t!("status_available").to_string(),
            CenterStatus::Occupied => t!("status_occupied").to_string(),
            CenterStatus::Maintenance => t!("status_maintenance").to_string(),
        }
    }
}

/// One month of a center's calendar.
///
/// A tenant can only be recorded on an occupied month, so an available slot
/// never carries a stale tenant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonthlySlot {
    #[default]
    Available,
    Occupied {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tenant: Option<String>,
    },
}

impl MonthlySlot {
    /// Occupied slot for the given tenant
    pub fn occupied(tenant: impl Into<String>) -> Self {
        MonthlySlot::Occupied {
            tenant: Some(tenant.into()),
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, MonthlySlot::Occupied { .. })
    }

    pub fn tenant(&self) -> Option<&str> {
        match self {
            MonthlySlot::Occupied { tenant } => tenant.as_deref(),
            MonthlySlot::Available => None,
        }
    }

    pub fn status(&self) -> CenterStatus {
        match self {
            MonthlySlot::Available => CenterStatus::Available,
            MonthlySlot::Occupied { .. } => CenterStatus::Occupied,
        }
    }
}

/// A maximal run of occupied months sharing one tenant label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyBlock {
    pub start_month: usize,
    pub end_month: usize,
    pub tenant: String,
}

impl OccupancyBlock {
    /// Number of months covered by the block
    pub fn months(&self) -> usize {
        self.end_month - self.start_month + 1
    }

    pub fn contains(&self, month: usize) -> bool {
        (self.start_month..=self.end_month).contains(&month)
    }
}

/// A training center room and its monthly calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingCenter {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Seats
    pub capacity: u32,
    /// Whole currency units
    pub monthly_rent: u64,
    /// Derived from the current month's slot unless under maintenance
    pub status: CenterStatus,
    /// Whole-center maintenance override, independent of the monthly slots
    pub maintenance: bool,
    pub current_tenant: Option<String>,
    /// Percent of the year's slots that are occupied
    pub occupancy_rate: u8,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
    pub monthly_slots: [MonthlySlot; MONTHS_PER_YEAR],
}

impl TrainingCenter {
    /// Number of occupied months in the calendar
    pub fn occupied_months(&self) -> usize {
        self.monthly_slots
            .iter()
            .filter(|slot| slot.is_occupied())
            .count()
    }

    /// Occupancy blocks for the timeline
    pub fn blocks(&self) -> Vec<OccupancyBlock> {
        derive_blocks(&self.monthly_slots)
    }

    /// The block covering a month, if that month is occupied
    pub fn block_at(&self, month: usize) -> Option<OccupancyBlock> {
        self.blocks().into_iter().find(|block| block.contains(month))
    }

    /// Recompute every derived field from the slots.
    ///
    /// `current_month` is the zero-based index of the month treated as "now".
    pub fn refresh_derived(&mut self, current_month: usize) {
        self.occupancy_rate = occupancy_rate(self.occupied_months());

        let current_slot = self.monthly_slots.get(current_month);
        self.current_tenant = current_slot.and_then(|slot| slot.tenant().map(str::to_string));
        self.status = if self.maintenance {
            CenterStatus::Maintenance
        } else {
            current_slot
                .map(MonthlySlot::status)
                .unwrap_or(CenterStatus::Available)
        };
    }
}

/// Rounded percentage of occupied months over a full year
pub fn occupancy_rate(occupied_months: usize) -> u8 {
    let occupied = occupied_months.min(MONTHS_PER_YEAR);
    (occupied as f64 * 100.0 / MONTHS_PER_YEAR as f64).round() as u8
}

/// Collapse a monthly calendar into occupancy blocks.
///
/// Adjacent occupied months merge only when their tenant labels match.
pub fn derive_blocks(slots: &[MonthlySlot]) -> Vec<OccupancyBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<OccupancyBlock> = None;

    for (month, slot) in slots.iter().enumerate() {
        let MonthlySlot::Occupied { tenant } = slot else {
            if let Some(block) = open.take() {
                blocks.push(block);
            }
            continue;
        };

        let label = tenant.as_deref().unwrap_or(UNASSIGNED_TENANT);
        match open.as_mut() {
            Some(block) if block.tenant == label => block.end_month = month,
            _ => {
                if let Some(block) = open.take() {
                    blocks.push(block);
                }
                open = Some(OccupancyBlock {
                    start_month: month,
                    end_month: month,
                    tenant: label.to_string(),
                });
            }
        }
    }

    if let Some(block) = open {
        blocks.push(block);
    }

    blocks
}

/// Localized short label for a zero-based month index
pub fn month_label(month: usize) -> String {
    let number = month + 1;
    t!("month_short", month = number).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pattern: &[Option<Option<&str>>]) -> Vec<MonthlySlot> {
        pattern
            .iter()
            .map(|entry| match entry {
                None => MonthlySlot::Available,
                Some(tenant) => MonthlySlot::Occupied {
                    tenant: tenant.map(str::to_string),
                },
            })
            .collect()
    }

    #[test]
    fn test_empty_calendar_has_no_blocks() {
        let calendar = vec![MonthlySlot::Available; MONTHS_PER_YEAR];
        assert!(derive_blocks(&calendar).is_empty());
    }

    #[test]
    fn test_same_tenant_merges_and_different_tenant_splits() {
        let calendar = slots(&[
            Some(Some("A")),
            Some(Some("A")),
            Some(Some("B")),
            None,
            Some(Some("A")),
        ]);

        let blocks = derive_blocks(&calendar);
        assert_eq!(blocks.len(), 3);
        assert_eq!((blocks[0].start_month, blocks[0].end_month), (0, 1));
        assert_eq!(blocks[0].tenant, "A");
        assert_eq!((blocks[1].start_month, blocks[1].end_month), (2, 2));
        assert_eq!(blocks[1].tenant, "B");
        assert_eq!((blocks[2].start_month, blocks[2].end_month), (4, 4));
        assert_eq!(blocks[2].months(), 1);
    }

    #[test]
    fn test_unnamed_occupied_runs_merge_under_placeholder() {
        let calendar = slots(&[None, Some(None), Some(None), Some(Some("C"))]);

        let blocks = derive_blocks(&calendar);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].tenant, UNASSIGNED_TENANT);
        assert_eq!((blocks[0].start_month, blocks[0].end_month), (1, 2));
        assert_eq!(blocks[1].tenant, "C");
    }

    #[test]
    fn test_block_flushed_at_end_of_year() {
        let mut calendar = vec![MonthlySlot::Available; MONTHS_PER_YEAR];
        calendar[10] = MonthlySlot::occupied("Winter School");
        calendar[11] = MonthlySlot::occupied("Winter School");

        let blocks = derive_blocks(&calendar);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].end_month, 11);
        assert!(blocks[0].contains(10));
        assert!(!blocks[0].contains(9));
    }

    #[test]
    fn test_occupancy_rate_rounding() {
        assert_eq!(occupancy_rate(0), 0);
        assert_eq!(occupancy_rate(1), 8);
        assert_eq!(occupancy_rate(2), 17);
        assert_eq!(occupancy_rate(4), 33);
        assert_eq!(occupancy_rate(5), 42);
        assert_eq!(occupancy_rate(12), 100);
    }

    #[test]
    fn test_slot_serialization_shape() {
        let json = serde_json::to_value(MonthlySlot::occupied("Camp")).unwrap();
        assert_eq!(json["status"], "OCCUPIED");
        assert_eq!(json["tenant"], "Camp");

        let json = serde_json::to_value(MonthlySlot::Available).unwrap();
        assert_eq!(json["status"], "AVAILABLE");
        assert!(json.get("tenant").is_none());
    }
}
