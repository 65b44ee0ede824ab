// Findings service: field audit entry and the recent-activity view.
// Mutations go through the store's append/update primitives; the only
// in-place change in the whole system is resolve-by-id.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::StoreError;
use crate::schema::PUNCH_LIST;
use crate::store::TableStore;
use crate::types::{Category, Finding, Impact, Status};

/// How many rows the recent-activity table shows.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Form payload for logging a finding. Everything optional has the
/// documented default: today's date, the default property, cost 0.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFinding {
    #[serde(default)]
    pub property_name: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub category: Category,
    pub item: String,
    pub status: Status,
    pub impact: Impact,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub cost: Option<f64>,
}

/// Result of loading the recent-activity view.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ActivityResult {
    Success { data: Vec<Finding> },
    Empty { message: String },
    Error { message: String },
}

/// Append one finding to the punch list. Returns the stored entity with
/// its generated id.
pub fn log_finding(store: &TableStore, new: NewFinding) -> Result<Finding, String> {
    if new.item.trim().is_empty() {
        return Err("Observation text is required".to_string());
    }

    let finding = Finding {
        id: Uuid::new_v4().to_string(),
        // Stored empty when unset; readers resolve it to the default
        // property, matching rows written by single-property deployments.
        property_name: new.property_name.unwrap_or_default(),
        date: Some(new.date.unwrap_or_else(|| Utc::now().date_naive())),
        category: new.category,
        item: new.item.trim().to_string(),
        status: new.status,
        impact: new.impact,
        due_date: new.due_date,
        cost: new.cost.unwrap_or(0.0).max(0.0),
    };

    store
        .append(PUNCH_LIST.name, finding.to_row())
        .map_err(|e| e.to_string())?;
    log::info!("Logged finding {:?} ({})", finding.item, finding.id);
    Ok(finding)
}

/// Mark one finding resolved, addressed by its generated id.
pub fn mark_resolved(store: &TableStore, id: &str) -> Result<(), String> {
    let found = store
        .update_row(PUNCH_LIST.name, id, |row| {
            row.set("status", Status::Resolved.as_str())
        })
        .map_err(|e| e.to_string())?;

    if !found {
        return Err(format!("Finding {id} not found"));
    }
    log::info!("Marked finding {id} resolved");
    Ok(())
}

/// The last few findings, newest last, optionally filtered to one
/// property.
pub fn recent_activity(
    store: &TableStore,
    config: &Config,
    property: Option<&str>,
) -> ActivityResult {
    match load_findings(store, config, property) {
        Ok(findings) if findings.is_empty() => ActivityResult::Empty {
            message: "No activity logged yet.".to_string(),
        },
        Ok(findings) => {
            let start = findings.len().saturating_sub(RECENT_ACTIVITY_LIMIT);
            ActivityResult::Success {
                data: findings[start..].to_vec(),
            }
        }
        Err(e) => ActivityResult::Error {
            message: e.to_string(),
        },
    }
}

/// Fetch and type the punch list, applying the property filter.
pub(crate) fn load_findings(
    store: &TableStore,
    config: &Config,
    property: Option<&str>,
) -> Result<Vec<Finding>, StoreError> {
    let table = store.fetch(PUNCH_LIST.name)?;
    let mut findings: Vec<Finding> = table.rows.iter().map(Finding::from_row).collect();
    if let Some(wanted) = property {
        findings.retain(|f| super::belongs_to(&f.property_name, wanted, &config.default_property));
    }
    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_finding(item: &str) -> NewFinding {
        NewFinding {
            property_name: None,
            date: NaiveDate::from_ymd_opt(2026, 8, 1),
            category: Category::Mechanical,
            item: item.to_string(),
            status: Status::Pending,
            impact: Impact::Low,
            due_date: None,
            cost: None,
        }
    }

    #[test]
    fn test_log_finding_appends_with_defaults() {
        let store = TableStore::in_memory();

        let finding = log_finding(&store, new_finding("Flush water heater")).unwrap();
        assert!(!finding.id.is_empty());
        assert_eq!(finding.cost, 0.0);

        let table = store.fetch("punch_list").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].text("item"), "Flush water heater");
    }

    #[test]
    fn test_log_finding_rejects_blank_item() {
        let store = TableStore::in_memory();
        assert!(log_finding(&store, new_finding("   ")).is_err());
    }

    #[test]
    fn test_missing_cost_reads_back_as_zero() {
        let store = TableStore::in_memory();
        let config = Config::default();
        log_finding(&store, new_finding("No estimate yet")).unwrap();

        let findings = load_findings(&store, &config, None).unwrap();
        assert_eq!(findings[0].cost, 0.0);
        let totals = crate::report::cost_totals(&findings);
        assert_eq!(totals.liability, 0.0);
        assert_eq!(totals.invested, 0.0);
    }

    #[test]
    fn test_mark_resolved_by_id() {
        let store = TableStore::in_memory();
        let config = Config::default();
        // Two findings with the same item text; only the addressed one flips
        let first = log_finding(&store, new_finding("Replace bulb")).unwrap();
        let second = log_finding(&store, new_finding("Replace bulb")).unwrap();

        mark_resolved(&store, &first.id).unwrap();

        let findings = load_findings(&store, &config, None).unwrap();
        let by_id = |id: &str| findings.iter().find(|f| f.id == id).unwrap();
        assert_eq!(by_id(&first.id).status, Status::Resolved);
        assert_eq!(by_id(&second.id).status, Status::Pending);
    }

    #[test]
    fn test_mark_resolved_unknown_id_errors() {
        let store = TableStore::in_memory();
        assert!(mark_resolved(&store, "no-such-id").is_err());
    }

    #[test]
    fn test_recent_activity_caps_at_limit() {
        let store = TableStore::in_memory();
        let config = Config::default();
        for i in 0..12 {
            log_finding(&store, new_finding(&format!("item {i}"))).unwrap();
        }

        match recent_activity(&store, &config, None) {
            ActivityResult::Success { data } => {
                assert_eq!(data.len(), 5);
                assert_eq!(data[0].item, "item 7");
                assert_eq!(data[4].item, "item 11");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_recent_activity_empty_state() {
        let store = TableStore::in_memory();
        let config = Config::default();
        assert!(matches!(
            recent_activity(&store, &config, None),
            ActivityResult::Empty { .. }
        ));
    }

    #[test]
    fn test_property_filter_with_default_fallback() {
        let store = TableStore::in_memory();
        let config = Config::default();

        // Written before multi-property: no property column
        log_finding(&store, new_finding("Legacy row")).unwrap();

        let mut other = new_finding("Harbor row");
        other.property_name = Some("12 Harbor Ln".to_string());
        log_finding(&store, other).unwrap();

        let default_rows =
            load_findings(&store, &config, Some(&config.default_property)).unwrap();
        assert_eq!(default_rows.len(), 1);
        assert_eq!(default_rows[0].item, "Legacy row");

        let harbor_rows = load_findings(&store, &config, Some("12 Harbor Ln")).unwrap();
        assert_eq!(harbor_rows.len(), 1);
        assert_eq!(harbor_rows[0].item, "Harbor row");
    }
}
