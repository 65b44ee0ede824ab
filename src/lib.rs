//! Estate OS core: the data layer behind a property-maintenance portal.
//!
//! Three named tables (`punch_list`, `master_calendar`, `vendors`) live in
//! a local SQLite store accessed wholesale: fetch all rows, append one,
//! write all rows back. A per-store TTL cache keeps repeated reads cheap
//! and is invalidated on every save. On top of that sits a set of pure
//! scorecard metrics (health score, cost position, overdue math) and a
//! service layer returning explicit success/empty/error results for the
//! presentation shell to render.
//!
//! The shell itself (forms, tabs, the access-key prompt) is not here;
//! it calls `services::*` and draws whatever comes back.

pub mod config;
pub mod error;
pub mod report;
pub mod schema;
pub mod services;
pub mod store;
pub mod table;
pub mod types;

pub use config::Config;
pub use error::StoreError;
pub use store::TableStore;
pub use types::{Category, Finding, Frequency, Guideline, Impact, Status, Vendor};
