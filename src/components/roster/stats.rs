use super::models::{CenterStatus, TrainingCenter, MONTHS_PER_YEAR};
use serde::{Deserialize, Serialize};

/// Roster-wide summary shown on the dashboard cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_centers: usize,
    /// Estimated people served: half the capacity for every occupied month
    pub total_beneficiaries: f64,
    pub avg_occupancy: u8,
    pub maintenance_count: usize,
    pub available_count: usize,
}

/// Number of centers booked in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOccupancy {
    pub month: usize,
    pub occupied_centers: usize,
}

/// Summarize the roster.
pub fn compute_stats(centers: &[TrainingCenter]) -> DashboardStats {
    let total_beneficiaries = centers
        .iter()
        .map(|center| center.occupied_months() as f64 * (center.capacity as f64 / 2.0))
        .sum();

    let avg_occupancy = if centers.is_empty() {
        0
    } else {
        let total: u32 = centers.iter().map(|c| c.occupancy_rate as u32).sum();
        (total as f64 / centers.len() as f64).round() as u8
    };

    DashboardStats {
        total_centers: centers.len(),
        total_beneficiaries,
        avg_occupancy,
        maintenance_count: count_status(centers, CenterStatus::Maintenance),
        available_count: count_status(centers, CenterStatus::Available),
    }
}

fn count_status(centers: &[TrainingCenter], status: CenterStatus) -> usize {
    centers.iter().filter(|c| c.status == status).count()
}

/// Booked center count for each month of the year
pub fn monthly_trend(centers: &[TrainingCenter]) -> Vec<MonthlyOccupancy> {
    (0..MONTHS_PER_YEAR)
        .map(|month| MonthlyOccupancy {
            month,
            occupied_centers: centers
                .iter()
                .filter(|c| c.monthly_slots[month].is_occupied())
                .count(),
        })
        .collect()
}
