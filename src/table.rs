//! Generic tabular model: scalar values, rows, and whole-table snapshots.
//!
//! Column sets are owned by the table schema and grow across deployments,
//! so rows are tolerant by construction: a missing column reads as
//! [`Value::Empty`], an unparseable date or number coerces to a default
//! instead of failing. Hard errors stop at the storage boundary.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::TableSchema;

/// Canonical serialization format for date columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One scalar cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Empty,
}

impl Value {
    /// Text view. Numbers and dates render in canonical form; `Empty`
    /// renders as "".
    pub fn as_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => format_number(*n),
            Value::Date(d) => d.format(DATE_FORMAT).to_string(),
            Value::Empty => String::new(),
        }
    }

    /// Numeric view. Numeric-looking text parses; everything else is 0.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse().unwrap_or(0.0),
            Value::Date(_) | Value::Empty => 0.0,
        }
    }

    /// Date view. Text is parsed leniently (see [`parse_date`]); an
    /// unparseable value is `None`, never an error.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Text(s) => parse_date(s),
            Value::Number(_) | Value::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Value::Empty
        } else {
            Value::Text(s.to_string())
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Value::Empty
        } else {
            Value::Text(s)
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Empty,
        }
    }
}

/// Parse a date from the formats seen across deployments: canonical ISO,
/// US slashed, and RFC 3339 timestamps (date part taken).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        return Some(d);
    }
    // Timestamp forms: take the leading date segment
    if let Some(prefix) = trimmed.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(prefix, DATE_FORMAT) {
            return Some(d);
        }
    }
    None
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// One row: column name → value. Ordering lives in the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style set, used when assembling a row for append.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        let value = value.into();
        if matches!(value, Value::Empty) {
            self.values.remove(column);
        } else {
            self.values.insert(column.to_string(), value);
        }
    }

    /// Value for a column; a column absent from the row reads as Empty.
    pub fn get(&self, column: &str) -> &Value {
        self.values.get(column).unwrap_or(&Value::Empty)
    }

    pub fn text(&self, column: &str) -> String {
        self.get(column).as_text()
    }

    pub fn number(&self, column: &str) -> f64 {
        self.get(column).as_number()
    }

    pub fn date(&self, column: &str) -> Option<NaiveDate> {
        self.get(column).as_date()
    }
}

/// Full snapshot of one named table. Disposable: the backing store is the
/// source of truth and snapshots are refreshed through the store's cache.
#[derive(Debug, Clone)]
pub struct Table {
    pub schema: &'static TableSchema,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(schema: &'static TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.schema.name
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
