use super::models::{CenterStatus, TrainingCenter};
use chrono::NaiveDate;

/// Number of rooms in the managed roster
pub const ROSTER_SIZE: usize = 13;

/// Rooms up to this index are in the Gangnam building
const GANGNAM_ROOMS: usize = 7;

const BASE_CAPACITY: u32 = 20;
const CAPACITY_STEP: u32 = 5;
const BASE_RENT: u64 = 1_500_000;
const RENT_STEP: u64 = 100_000;

/// Build the startup roster with every month available.
pub fn seed_roster(current_month: usize) -> Vec<TrainingCenter> {
    let last_maintenance = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default();
    let next_maintenance = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap_or_default();

    (0..ROSTER_SIZE)
        .map(|i| {
            let location = if i < GANGNAM_ROOMS {
                "강남 테헤란로"
            } else {
                "종로 인사동"
            };

            let mut center = TrainingCenter {
                id: format!("center-{}", i + 1),
                name: format!("교육장 {:02}호", i + 1),
                location: location.to_string(),
                capacity: BASE_CAPACITY + CAPACITY_STEP * i as u32,
                monthly_rent: BASE_RENT + RENT_STEP * i as u64,
                status: CenterStatus::Available,
                maintenance: false,
                current_tenant: None,
                occupancy_rate: 0,
                last_maintenance,
                next_maintenance,
                monthly_slots: Default::default(),
            };
            center.refresh_derived(current_month);
            center
        })
        .collect()
}
