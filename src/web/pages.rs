use askama::Template;
use axum::{extract::State, response::Html};

use super::{ApiError, AppState};
use crate::components::roster::models::{month_label, CenterStatus, TrainingCenter, MONTHS_PER_YEAR};
use crate::components::roster::stats::{DashboardStats, MonthlyOccupancy};
use crate::error::Error;
use crate::utils::format::{thousands, year_percent};

/// Cards shown on the dashboard overview
const OVERVIEW_CARDS: usize = 6;

struct StatCard {
    title: String,
    value: String,
    tone: &'static str,
}

struct CenterCard {
    id: String,
    name: String,
    location: String,
    capacity: u32,
    occupancy_rate: u8,
    status_label: String,
    status_class: &'static str,
    tenant: String,
}

struct TrendBar {
    label: String,
    count: usize,
    height: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    title: String,
    stat_cards: Vec<StatCard>,
    center_heading: String,
    centers: Vec<CenterCard>,
    trend_heading: String,
    trend: Vec<TrendBar>,
    insight_heading: String,
    insight_hint: String,
}

struct BlockBar {
    tenant: String,
    range: String,
    left: String,
    width: String,
    start_month: usize,
}

struct TimelineRow {
    id: String,
    name: String,
    location: String,
    capacity: u32,
    occupancy_rate: u8,
    blocks: Vec<BlockBar>,
}

#[derive(Template)]
#[template(path = "timeline.html")]
struct TimelineTemplate {
    title: String,
    badge: String,
    heading: String,
    months: Vec<String>,
    rows: Vec<TimelineRow>,
}

fn status_class(status: CenterStatus) -> &'static str {
    match status {
        CenterStatus::Available => "status-available",
        CenterStatus::Occupied => "status-occupied",
        CenterStatus::Maintenance => "status-maintenance",
    }
}

fn stat_cards(stats: &DashboardStats) -> Vec<StatCard> {
    vec![
        StatCard {
            title: t!("stat_total_users").to_string(),
            value: thousands(stats.total_beneficiaries),
            tone: "blue",
        },
        StatCard {
            title: t!("stat_avg_occupancy").to_string(),
            value: format!("{}%", stats.avg_occupancy),
            tone: "purple",
        },
        StatCard {
            title: t!("stat_maintenance").to_string(),
            value: stats.maintenance_count.to_string(),
            tone: "amber",
        },
        StatCard {
            title: t!("stat_available").to_string(),
            value: stats.available_count.to_string(),
            tone: "emerald",
        },
    ]
}

fn center_card(center: &TrainingCenter) -> CenterCard {
    CenterCard {
        id: center.id.clone(),
        name: center.name.clone(),
        location: center.location.clone(),
        capacity: center.capacity,
        occupancy_rate: center.occupancy_rate,
        status_label: center.status.label(),
        status_class: status_class(center.status),
        tenant: center
            .current_tenant
            .clone()
            .unwrap_or_else(|| t!("vacant").to_string()),
    }
}

fn trend_bars(trend: &[MonthlyOccupancy], total_centers: usize) -> Vec<TrendBar> {
    let scale = total_centers.max(1) as f64;
    trend
        .iter()
        .map(|m| TrendBar {
            label: month_label(m.month),
            count: m.occupied_centers,
            height: format!("{:.1}", m.occupied_centers as f64 * 100.0 / scale),
        })
        .collect()
}

fn timeline_row(center: &TrainingCenter) -> TimelineRow {
    let blocks = center
        .blocks()
        .into_iter()
        .map(|block| BlockBar {
            range: format!(
                "{} - {}",
                month_label(block.start_month),
                month_label(block.end_month)
            ),
            left: year_percent(block.start_month),
            width: year_percent(block.months()),
            start_month: block.start_month,
            tenant: block.tenant,
        })
        .collect();

    TimelineRow {
        id: center.id.clone(),
        name: center.name.clone(),
        location: center.location.clone(),
        capacity: center.capacity,
        occupancy_rate: center.occupancy_rate,
        blocks,
    }
}

fn render(template: &impl Template) -> Result<Html<String>, ApiError> {
    template
        .render()
        .map(Html)
        .map_err(|e| ApiError(Error::Render(e.to_string())))
}

/// Handler for the dashboard overview page
pub async fn dashboard_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let centers = state.roster.list_centers().await?;
    let stats = state.roster.stats().await?;
    let trend = state.roster.trend().await?;

    let template = DashboardTemplate {
        title: t!("page_overview").to_string(),
        stat_cards: stat_cards(&stats),
        center_heading: t!("center_overview").to_string(),
        centers: centers.iter().take(OVERVIEW_CARDS).map(center_card).collect(),
        trend_heading: t!("monthly_occupancy").to_string(),
        trend: trend_bars(&trend, stats.total_centers),
        insight_heading: t!("ai_analysis").to_string(),
        insight_hint: t!("insight_hint").to_string(),
    };

    render(&template)
}

/// Handler for the planning timeline page
pub async fn timeline_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let centers = state.roster.list_centers().await?;
    let year = state.fiscal_year;

    let template = TimelineTemplate {
        title: t!("page_planning").to_string(),
        badge: t!("fiscal_year", year = year).to_string(),
        heading: t!("schedule_title", year = year).to_string(),
        months: (0..MONTHS_PER_YEAR).map(month_label).collect(),
        rows: centers.iter().map(timeline_row).collect(),
    };

    render(&template)
}
