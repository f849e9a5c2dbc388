use crate::components::roster::models::{CenterStatus, TrainingCenter};
use serde::{Deserialize, Serialize};

pub const SYSTEM_PROMPT: &str = "You are an analyst for public and social-contribution facilities. The operator lends training rooms free of charge, so maximizing occupancy is what creates value. Write in a warm but analytical business tone and format the answer in markdown.";

const USER_PROMPT_TEMPLATE: &str = "The operator manages {count} training centers and lends them for free.

Data summary:
{centers}

Based on this data, analyze:
1. The current space utilization efficiency (occupancy matters most because the rooms are free).
2. Operational improvements that would let more trainees benefit.
3. Maintenance risks and how to prevent facility aging.

Answer in {language} using markdown headings and lists.";

/// The per-center figures sent to the summarizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterSnapshot {
    pub name: String,
    pub status: CenterStatus,
    pub occupancy_rate: u8,
    pub capacity: u32,
}

impl From<&TrainingCenter> for CenterSnapshot {
    fn from(center: &TrainingCenter) -> Self {
        Self {
            name: center.name.clone(),
            status: center.status,
            occupancy_rate: center.occupancy_rate,
            capacity: center.capacity,
        }
    }
}

impl CenterSnapshot {
    /// One summary line for the prompt
    pub fn summary_line(&self) -> String {
        format!(
            "{}: status={}, annual occupancy={}%, capacity={} people",
            self.name,
            self.status.as_str(),
            self.occupancy_rate,
            self.capacity
        )
    }
}

/// Snapshots for every center in roster order
pub fn snapshots(centers: &[TrainingCenter]) -> Vec<CenterSnapshot> {
    centers.iter().map(CenterSnapshot::from).collect()
}

/// Answer language for a locale code
pub fn language_for_locale(locale: &str) -> &'static str {
    match locale.split(['-', '_']).next().unwrap_or_default() {
        "ko" => "Korean",
        _ => "English",
    }
}

/// Build the user prompt for a roster snapshot
pub fn build_prompt(snapshots: &[CenterSnapshot], locale: &str) -> String {
    let centers = snapshots
        .iter()
        .map(CenterSnapshot::summary_line)
        .collect::<Vec<_>>()
        .join("\n");

    USER_PROMPT_TEMPLATE
        .replace("{count}", &snapshots.len().to_string())
        .replace("{centers}", &centers)
        .replace("{language}", language_for_locale(locale))
}
