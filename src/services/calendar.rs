// Calendar service: the recurring-maintenance guideline list.
// Guidelines display grouped by frequency, most frequent first, matching
// how operators read the 52-week calendar.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::schema::MASTER_CALENDAR;
use crate::store::TableStore;
use crate::types::{Category, Frequency, Guideline};

/// Form payload for a new guideline.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGuideline {
    #[serde(default)]
    pub property_name: Option<String>,
    pub frequency: Frequency,
    pub system: Category,
    pub task: String,
    #[serde(default)]
    pub instructions: String,
}

/// Result of loading the calendar view.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CalendarResult {
    Success { data: Vec<Guideline> },
    Empty { message: String },
    Error { message: String },
}

/// Append one guideline to the master calendar.
pub fn add_guideline(store: &TableStore, new: NewGuideline) -> Result<Guideline, String> {
    if new.task.trim().is_empty() {
        return Err("Task name is required".to_string());
    }

    let guideline = Guideline {
        id: Uuid::new_v4().to_string(),
        property_name: new.property_name.unwrap_or_default(),
        frequency: new.frequency,
        system: new.system,
        task: new.task.trim().to_string(),
        instructions: new.instructions.trim().to_string(),
    };

    store
        .append(MASTER_CALENDAR.name, guideline.to_row())
        .map_err(|e| e.to_string())?;
    log::info!("Added guideline {:?} ({})", guideline.task, guideline.id);
    Ok(guideline)
}

/// All guidelines for a property, sorted by frequency rank (stable, so
/// entry order is kept within a frequency).
pub fn list_guidelines(
    store: &TableStore,
    config: &Config,
    property: Option<&str>,
) -> CalendarResult {
    let table = match store.fetch(MASTER_CALENDAR.name) {
        Ok(table) => table,
        Err(e) => {
            return CalendarResult::Error {
                message: e.to_string(),
            }
        }
    };

    let mut guidelines: Vec<Guideline> = table.rows.iter().map(Guideline::from_row).collect();
    if let Some(wanted) = property {
        guidelines
            .retain(|g| super::belongs_to(&g.property_name, wanted, &config.default_property));
    }

    if guidelines.is_empty() {
        return CalendarResult::Empty {
            message: "Your calendar is currently empty. Use the form above to add your first task."
                .to_string(),
        };
    }

    guidelines.sort_by_key(|g| g.frequency.sort_rank());
    CalendarResult::Success { data: guidelines }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_guideline(task: &str, frequency: Frequency) -> NewGuideline {
        NewGuideline {
            property_name: None,
            frequency,
            system: Category::Mechanical,
            task: task.to_string(),
            instructions: String::new(),
        }
    }

    #[test]
    fn test_add_and_list_sorted_by_frequency() {
        let store = TableStore::in_memory();
        let config = Config::default();

        add_guideline(&store, new_guideline("Roof inspection", Frequency::Annual)).unwrap();
        add_guideline(&store, new_guideline("Test GFCI outlets", Frequency::Monthly)).unwrap();
        add_guideline(&store, new_guideline("Service HVAC", Frequency::Quarterly)).unwrap();

        match list_guidelines(&store, &config, None) {
            CalendarResult::Success { data } => {
                let tasks: Vec<&str> = data.iter().map(|g| g.task.as_str()).collect();
                assert_eq!(tasks, ["Test GFCI outlets", "Service HVAC", "Roof inspection"]);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_calendar_message() {
        let store = TableStore::in_memory();
        let config = Config::default();
        match list_guidelines(&store, &config, None) {
            CalendarResult::Empty { message } => {
                assert!(message.contains("currently empty"));
            }
            other => panic!("expected empty, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_task_rejected() {
        let store = TableStore::in_memory();
        assert!(add_guideline(&store, new_guideline("", Frequency::Monthly)).is_err());
    }
}
