//! Domain entities for the three tables, with tolerant row conversion.
//!
//! Conversion never fails: a missing column becomes its default, an
//! unrecognized enum label degrades to a neutral value, and unparseable
//! dates come through as `None`. The typed side enforces the invariants
//! (status is always one of three, cost is never negative) on the way
//! back into a row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::table::Row;

// =============================================================================
// Enums
// =============================================================================

/// Finding status. The three values are closed: anything else found in
/// storage degrades to Pending on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Resolved,
    Pending,
    NeedsAttention,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Resolved => "Resolved",
            Status::Pending => "Pending",
            Status::NeedsAttention => "Needs Attention",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "resolved" => Some(Status::Resolved),
            "pending" => Some(Status::Pending),
            "needs attention" => Some(Status::NeedsAttention),
            _ => None,
        }
    }

    fn from_stored(text: &str) -> Self {
        Status::parse(text).unwrap_or_else(|| {
            if !text.trim().is_empty() {
                log::warn!("Unrecognized status {text:?}, treating as Pending");
            }
            Status::Pending
        })
    }
}

/// System category for findings, calendar guidelines, and vendor
/// services. Open-ended: labels outside the known set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Mechanical,
    Envelope,
    Aesthetics,
    Safety,
    Pool,
    Landscaping,
    Site,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Mechanical => "Mechanical",
            Category::Envelope => "Envelope",
            Category::Aesthetics => "Aesthetics",
            Category::Safety => "Safety",
            Category::Pool => "Pool",
            Category::Landscaping => "Landscaping",
            Category::Site => "Site",
            Category::Other(label) => label,
        }
    }

    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "mechanical" => Category::Mechanical,
            "envelope" => Category::Envelope,
            "aesthetics" => Category::Aesthetics,
            "safety" => Category::Safety,
            "pool" => Category::Pool,
            "landscaping" => Category::Landscaping,
            "site" => Category::Site,
            _ => Category::Other(text.trim().to_string()),
        }
    }
}

/// Impact on asset health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "low" => Some(Impact::Low),
            "medium" => Some(Impact::Medium),
            "high" => Some(Impact::High),
            _ => None,
        }
    }
}

/// Recurrence of a maintenance guideline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Frequency {
    Monthly,
    Quarterly,
    BiAnnual,
    Annual,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::BiAnnual => "Bi-Annual",
            Frequency::Annual => "Annual",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "monthly" => Some(Frequency::Monthly),
            "quarterly" => Some(Frequency::Quarterly),
            "bi-annual" | "biannual" | "bi annual" => Some(Frequency::BiAnnual),
            "annual" => Some(Frequency::Annual),
            _ => None,
        }
    }

    /// Display ordering for the calendar: most frequent first.
    pub fn sort_rank(&self) -> u8 {
        match self {
            Frequency::Monthly => 0,
            Frequency::Quarterly => 1,
            Frequency::BiAnnual => 2,
            Frequency::Annual => 3,
        }
    }
}

// =============================================================================
// Entities
// =============================================================================

/// One logged maintenance observation (a `punch_list` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    /// Empty string means the deployment's default property.
    pub property_name: String,
    pub date: Option<NaiveDate>,
    pub category: Category,
    pub item: String,
    pub status: Status,
    pub impact: Impact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub cost: f64,
}

impl Finding {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.text("id"),
            property_name: row.text("property_name"),
            date: row.date("date"),
            category: Category::parse(&row.text("category")),
            item: row.text("item"),
            status: Status::from_stored(&row.text("status")),
            impact: Impact::parse(&row.text("impact")).unwrap_or(Impact::Low),
            due_date: row.date("due_date"),
            cost: row.number("cost").max(0.0),
        }
    }

    pub fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("property_name", self.property_name.as_str())
            .with("date", self.date)
            .with("category", self.category.as_str())
            .with("item", self.item.as_str())
            .with("status", self.status.as_str())
            .with("impact", self.impact.as_str())
            .with("due_date", self.due_date)
            .with("cost", self.cost.max(0.0))
    }
}

/// One recurring maintenance standard (a `master_calendar` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guideline {
    pub id: String,
    pub property_name: String,
    pub frequency: Frequency,
    pub system: Category,
    pub task: String,
    pub instructions: String,
}

impl Guideline {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.text("id"),
            property_name: row.text("property_name"),
            frequency: Frequency::parse(&row.text("frequency")).unwrap_or(Frequency::Monthly),
            system: Category::parse(&row.text("system")),
            task: row.text("task"),
            instructions: row.text("instructions"),
        }
    }

    pub fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("property_name", self.property_name.as_str())
            .with("frequency", self.frequency.as_str())
            .with("system", self.system.as_str())
            .with("task", self.task.as_str())
            .with("instructions", self.instructions.as_str())
    }
}

/// One vendor directory entry (a `vendors` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub company_name: String,
    pub service: Category,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Vendor {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.text("id"),
            company_name: row.text("company_name"),
            service: Category::parse(&row.text("service")),
            name: row.text("name"),
            phone: row.text("phone"),
            email: row.text("email"),
        }
    }

    pub fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("company_name", self.company_name.as_str())
            .with("service", self.service.as_str())
            .with("name", self.name.as_str())
            .with("phone", self.phone.as_str())
            .with("email", self.email.as_str())
    }
}
