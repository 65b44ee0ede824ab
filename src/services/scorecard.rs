// Executive scorecard service: assembles every derived metric the
// summary screen renders: health score, cost position, category spend,
// overdue list, status highlights, and recent activity.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Config;
use crate::report::{
    self, CategoryMetric, CostTotals, OverdueStatus, StatusCounts, StatusHighlights,
};
use crate::store::TableStore;
use crate::types::Finding;

use super::findings::{load_findings, RECENT_ACTIVITY_LIMIT};

/// Items shown per status column, as the scorecard renders them.
const HIGHLIGHT_LIMIT: usize = 4;

/// One overdue punch-list entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueItem {
    pub id: String,
    pub item: String,
    pub days_overdue: i64,
}

/// Everything the executive scorecard screen needs, computed from one
/// punch-list snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub property_name: String,
    /// Date the overdue math was computed against; the screen title's
    /// month comes from here.
    pub as_of: NaiveDate,
    pub status_counts: StatusCounts,
    pub health_score: f64,
    pub cost_totals: CostTotals,
    pub category_costs: BTreeMap<String, f64>,
    pub highlights: StatusHighlights,
    pub overdue_items: Vec<OverdueItem>,
    pub recent_activity: Vec<Finding>,
}

/// Result of building the scorecard.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ScorecardResult {
    Success { data: Scorecard },
    Empty { message: String },
    Error { message: String },
}

/// Build the scorecard for one property (or the whole portfolio when no
/// property is given) as of an explicit date.
pub fn build_scorecard(
    store: &TableStore,
    config: &Config,
    property: Option<&str>,
    as_of: NaiveDate,
) -> ScorecardResult {
    let findings = match load_findings(store, config, property) {
        Ok(findings) => findings,
        Err(e) => {
            return ScorecardResult::Error {
                message: e.to_string(),
            }
        }
    };

    let property_name = property.unwrap_or(&config.default_property).to_string();
    if findings.is_empty() {
        return ScorecardResult::Empty {
            message: format!("No findings logged for {property_name} yet."),
        };
    }

    let mut overdue_items: Vec<OverdueItem> = findings
        .iter()
        .filter(|f| f.status != crate::types::Status::Resolved)
        .filter_map(|f| match report::overdue(f, as_of) {
            OverdueStatus::Overdue { days } => Some(OverdueItem {
                id: f.id.clone(),
                item: f.item.clone(),
                days_overdue: days,
            }),
            _ => None,
        })
        .collect();
    overdue_items.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));

    let recent_activity = report::recent(&findings, RECENT_ACTIVITY_LIMIT).to_vec();

    ScorecardResult::Success {
        data: Scorecard {
            property_name,
            as_of,
            status_counts: report::status_counts(&findings),
            health_score: report::health_score(&findings),
            cost_totals: report::cost_totals(&findings),
            category_costs: report::category_breakdown(&findings, CategoryMetric::Cost),
            highlights: report::status_highlights(&findings, HIGHLIGHT_LIMIT),
            overdue_items,
            recent_activity,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::findings::{log_finding, NewFinding};
    use crate::types::{Category, Impact, Status};

    fn log(store: &TableStore, item: &str, status: Status, cost: f64, due: Option<NaiveDate>) {
        log_finding(
            store,
            NewFinding {
                property_name: None,
                date: NaiveDate::from_ymd_opt(2026, 7, 1),
                category: Category::Mechanical,
                item: item.to_string(),
                status,
                impact: Impact::Medium,
                due_date: due,
                cost: Some(cost),
            },
        )
        .unwrap();
    }

    #[test]
    fn test_scorecard_aggregates_one_snapshot() {
        let store = TableStore::in_memory();
        let config = Config::default();
        let as_of = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        log(&store, "Fixed gate", Status::Resolved, 100.0, None);
        log(
            &store,
            "Pool heater",
            Status::NeedsAttention,
            50.0,
            NaiveDate::from_ymd_opt(2026, 8, 1),
        );

        match build_scorecard(&store, &config, None, as_of) {
            ScorecardResult::Success { data } => {
                assert_eq!(data.health_score, 50.0);
                assert_eq!(data.cost_totals.invested, 100.0);
                assert_eq!(data.cost_totals.liability, 50.0);
                assert_eq!(data.status_counts.needs_attention, 1);
                assert_eq!(data.overdue_items.len(), 1);
                assert_eq!(data.overdue_items[0].days_overdue, 5);
                assert_eq!(data.highlights.fixed, ["Fixed gate"]);
                assert_eq!(data.highlights.urgent, ["Pool heater"]);
                assert_eq!(data.recent_activity.len(), 2);
                assert_eq!(data.property_name, config.default_property);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_resolved_rows_never_count_as_overdue() {
        let store = TableStore::in_memory();
        let config = Config::default();
        let as_of = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        log(
            &store,
            "Done late",
            Status::Resolved,
            0.0,
            NaiveDate::from_ymd_opt(2026, 7, 1),
        );

        match build_scorecard(&store, &config, None, as_of) {
            ScorecardResult::Success { data } => assert!(data.overdue_items.is_empty()),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_scorecard_names_the_property() {
        let store = TableStore::in_memory();
        let config = Config::default();
        let as_of = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        match build_scorecard(&store, &config, Some("12 Harbor Ln"), as_of) {
            ScorecardResult::Empty { message } => {
                assert!(message.contains("12 Harbor Ln"));
            }
            other => panic!("expected empty, got {other:?}"),
        }
    }

    #[test]
    fn test_overdue_items_sorted_most_overdue_first() {
        let store = TableStore::in_memory();
        let config = Config::default();
        let as_of = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        log(
            &store,
            "A little late",
            Status::Pending,
            0.0,
            NaiveDate::from_ymd_opt(2026, 8, 4),
        );
        log(
            &store,
            "Very late",
            Status::Pending,
            0.0,
            NaiveDate::from_ymd_opt(2026, 7, 1),
        );

        match build_scorecard(&store, &config, None, as_of) {
            ScorecardResult::Success { data } => {
                assert_eq!(data.overdue_items[0].item, "Very late");
                assert_eq!(data.overdue_items[1].item, "A little late");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }
}
