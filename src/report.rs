//! Scorecard metrics over a punch-list snapshot.
//!
//! Every function here is a total, stateless transform of an immutable
//! slice of findings. Filtering by property happens before these are
//! called; dates come in as an explicit `as_of` so nothing reads the
//! clock.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{Finding, Status};

/// Row counts per status value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub resolved: usize,
    pub pending: usize,
    pub needs_attention: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.resolved + self.pending + self.needs_attention
    }
}

pub fn status_counts(findings: &[Finding]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for finding in findings {
        match finding.status {
            Status::Resolved => counts.resolved += 1,
            Status::Pending => counts.pending += 1,
            Status::NeedsAttention => counts.needs_attention += 1,
        }
    }
    counts
}

/// Percentage of findings resolved. 0.0 for an empty table.
pub fn health_score(findings: &[Finding]) -> f64 {
    let counts = status_counts(findings);
    if counts.total() == 0 {
        return 0.0;
    }
    counts.resolved as f64 / counts.total() as f64 * 100.0
}

/// Cost split: money spent on resolved work vs. estimated cost still
/// outstanding. Rows without a cost count as 0 on both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostTotals {
    pub invested: f64,
    pub liability: f64,
}

pub fn cost_totals(findings: &[Finding]) -> CostTotals {
    let mut totals = CostTotals::default();
    for finding in findings {
        if finding.status == Status::Resolved {
            totals.invested += finding.cost;
        } else {
            totals.liability += finding.cost;
        }
    }
    totals
}

/// Where a finding stands relative to its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum OverdueStatus {
    /// Due date has passed by this many whole days.
    Overdue { days: i64 },
    /// Due date is today or later.
    Upcoming { due: NaiveDate },
    /// No due date, or one that could not be parsed.
    Unknown,
}

pub fn overdue(finding: &Finding, as_of: NaiveDate) -> OverdueStatus {
    match finding.due_date {
        Some(due) => {
            let days = (as_of - due).num_days();
            if days > 0 {
                OverdueStatus::Overdue { days }
            } else {
                OverdueStatus::Upcoming { due }
            }
        }
        None => OverdueStatus::Unknown,
    }
}

/// Aggregate to compute per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMetric {
    Count,
    Cost,
}

/// Category label → aggregate, ordered by label for stable chart axes.
pub fn category_breakdown(findings: &[Finding], metric: CategoryMetric) -> BTreeMap<String, f64> {
    let mut breakdown = BTreeMap::new();
    for finding in findings {
        let slot = breakdown
            .entry(finding.category.as_str().to_string())
            .or_insert(0.0);
        match metric {
            CategoryMetric::Count => *slot += 1.0,
            CategoryMetric::Cost => *slot += finding.cost,
        }
    }
    breakdown
}

/// Last `n` findings in table order. Appends always land at the end, so
/// table order is recency order.
pub fn recent(findings: &[Finding], n: usize) -> &[Finding] {
    let start = findings.len().saturating_sub(n);
    &findings[start..]
}

/// The executive scorecard's three columns: most recent item names per
/// status bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHighlights {
    /// Resolved: "THE GOOD"
    pub fixed: Vec<String>,
    /// Pending: "CAUTION"
    pub monitoring: Vec<String>,
    /// Needs attention: "ACTION REQUIRED"
    pub urgent: Vec<String>,
}

pub fn status_highlights(findings: &[Finding], per_status_limit: usize) -> StatusHighlights {
    let bucket = |status: Status| -> Vec<String> {
        let items: Vec<String> = findings
            .iter()
            .filter(|f| f.status == status)
            .map(|f| f.item.clone())
            .collect();
        let start = items.len().saturating_sub(per_status_limit);
        items[start..].to_vec()
    };

    StatusHighlights {
        fixed: bucket(Status::Resolved),
        monitoring: bucket(Status::Pending),
        urgent: bucket(Status::NeedsAttention),
    }
}
