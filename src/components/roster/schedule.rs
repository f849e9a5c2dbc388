use super::models::{MonthlySlot, TrainingCenter, MONTHS_PER_YEAR};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Metadata fields an operator can edit on a center
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

/// Month indices of `[start_month, end_month]` that fall inside the year.
///
/// Months past December are dropped and an inverted range is empty.
pub fn clipped_months(start_month: usize, end_month: usize) -> Range<usize> {
    let stop = end_month.saturating_add(1).min(MONTHS_PER_YEAR);
    start_month.min(stop)..stop
}

/// Book `tenant` for every month in the range, replacing earlier occupants.
pub fn assign_tenant(
    center: &TrainingCenter,
    start_month: usize,
    end_month: usize,
    tenant: &str,
    current_month: usize,
) -> TrainingCenter {
    let mut updated = center.clone();
    for slot in &mut updated.monthly_slots[clipped_months(start_month, end_month)] {
        *slot = MonthlySlot::occupied(tenant);
    }
    updated.refresh_derived(current_month);
    updated
}

/// Reset every month in the range to available.
pub fn clear_schedule(
    center: &TrainingCenter,
    start_month: usize,
    end_month: usize,
    current_month: usize,
) -> TrainingCenter {
    let mut updated = center.clone();
    for slot in &mut updated.monthly_slots[clipped_months(start_month, end_month)] {
        *slot = MonthlySlot::Available;
    }
    updated.refresh_derived(current_month);
    updated
}

/// Replace the provided metadata fields.
pub fn edit_meta(center: &TrainingCenter, update: &MetaUpdate) -> TrainingCenter {
    let mut updated = center.clone();
    if let Some(name) = &update.name {
        updated.name = name.clone();
    }
    if let Some(location) = &update.location {
        updated.location = location.clone();
    }
    if let Some(capacity) = update.capacity {
        updated.capacity = capacity;
    }
    updated
}

/// Toggle the whole-center maintenance override.
pub fn set_maintenance(
    center: &TrainingCenter,
    maintenance: bool,
    current_month: usize,
) -> TrainingCenter {
    let mut updated = center.clone();
    updated.maintenance = maintenance;
    updated.refresh_derived(current_month);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::roster::models::{occupancy_rate, CenterStatus, OccupancyBlock};
    use crate::components::roster::seed::seed_roster;

    const JANUARY: usize = 0;

    fn center() -> TrainingCenter {
        seed_roster(JANUARY).remove(0)
    }

    #[test]
    fn test_clipped_months() {
        assert_eq!(clipped_months(2, 5), 2..6);
        assert_eq!(clipped_months(10, 13), 10..12);
        assert_eq!(clipped_months(11, usize::MAX), 11..12);
        assert!(clipped_months(12, 20).is_empty());
        assert!(clipped_months(5, 2).is_empty());
    }

    #[test]
    fn test_single_month_assignment_creates_block() {
        for month in 0..MONTHS_PER_YEAR {
            let updated = assign_tenant(&center(), month, month, "X", JANUARY);
            let block = updated.block_at(month).expect("block for assigned month");
            assert_eq!(block.tenant, "X");
        }
    }

    #[test]
    fn test_assign_then_clear_round_trip() {
        for start in 0..MONTHS_PER_YEAR {
            for end in start..MONTHS_PER_YEAR {
                let booked = assign_tenant(&center(), start, end, "X", JANUARY);
                let cleared = clear_schedule(&booked, start, end, JANUARY);
                assert_eq!(cleared.occupancy_rate, 0);
                assert!(cleared.blocks().is_empty());
                assert_eq!(cleared.status, CenterStatus::Available);
            }
        }
    }

    #[test]
    fn test_adjacent_months_same_tenant_merge() {
        let first = assign_tenant(&center(), 0, 0, "A", JANUARY);
        let merged = assign_tenant(&first, 1, 1, "A", JANUARY);
        assert_eq!(
            merged.blocks(),
            vec![OccupancyBlock {
                start_month: 0,
                end_month: 1,
                tenant: "A".to_string(),
            }]
        );

        let split = assign_tenant(&first, 1, 1, "B", JANUARY);
        assert_eq!(split.blocks().len(), 2);
    }

    #[test]
    fn test_range_past_december_is_clipped() {
        let updated = assign_tenant(&center(), 10, 13, "Winter School", JANUARY);
        assert_eq!(updated.monthly_slots.len(), MONTHS_PER_YEAR);
        assert_eq!(updated.occupied_months(), 2);
        let blocks = updated.blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!((blocks[0].start_month, blocks[0].end_month), (10, 11));
    }

    #[test]
    fn test_last_write_wins() {
        let first = assign_tenant(&center(), 0, 5, "A", JANUARY);
        let second = assign_tenant(&first, 3, 4, "B", JANUARY);
        assert_eq!(second.monthly_slots[2].tenant(), Some("A"));
        assert_eq!(second.monthly_slots[3].tenant(), Some("B"));
        assert_eq!(second.monthly_slots[5].tenant(), Some("A"));
        assert_eq!(second.blocks().len(), 3);
    }

    #[test]
    fn test_rate_matches_occupied_count_after_mutations() {
        let mut current = center();
        let edits: [(usize, usize, Option<&str>); 6] = [
            (0, 3, Some("A")),
            (2, 8, Some("B")),
            (5, 6, None),
            (11, 14, Some("C")),
            (0, 0, None),
            (7, 7, Some("A")),
        ];

        for (start, end, tenant) in edits {
            current = match tenant {
                Some(tenant) => assign_tenant(&current, start, end, tenant, JANUARY),
                None => clear_schedule(&current, start, end, JANUARY),
            };
            assert_eq!(current.occupancy_rate, occupancy_rate(current.occupied_months()));
            assert!(current
                .monthly_slots
                .iter()
                .all(|slot| slot.is_occupied() || slot.tenant().is_none()));
        }
    }

    #[test]
    fn test_status_follows_current_month() {
        let updated = assign_tenant(&center(), 2, 5, "Youth Coding Camp", 3);
        assert_eq!(updated.status, CenterStatus::Occupied);
        assert_eq!(updated.current_tenant.as_deref(), Some("Youth Coding Camp"));

        let outside = assign_tenant(&center(), 2, 5, "Youth Coding Camp", 9);
        assert_eq!(outside.status, CenterStatus::Available);
        assert_eq!(outside.current_tenant, None);
    }

    #[test]
    fn test_mutators_do_not_touch_input() {
        let original = center();
        let _ = assign_tenant(&original, 0, 11, "A", JANUARY);
        assert_eq!(original.occupied_months(), 0);
        assert_eq!(original, center());
    }

    #[test]
    fn test_maintenance_overrides_slot_status() {
        let booked = assign_tenant(&center(), 0, 2, "A", JANUARY);
        let paused = set_maintenance(&booked, true, JANUARY);
        assert_eq!(paused.status, CenterStatus::Maintenance);

        // Schedule edits keep the override in place
        let edited = assign_tenant(&paused, 3, 3, "B", JANUARY);
        assert_eq!(edited.status, CenterStatus::Maintenance);

        let resumed = set_maintenance(&edited, false, JANUARY);
        assert_eq!(resumed.status, CenterStatus::Occupied);
    }

    #[test]
    fn test_edit_meta_replaces_only_given_fields() {
        let original = center();
        let updated = edit_meta(
            &original,
            &MetaUpdate {
                name: Some("Lab A".to_string()),
                capacity: Some(48),
                ..Default::default()
            },
        );
        assert_eq!(updated.name, "Lab A");
        assert_eq!(updated.capacity, 48);
        assert_eq!(updated.location, original.location);
    }
}
