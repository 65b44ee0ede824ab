//! Presentation-facing operations. Each service returns either a plain
//! `Result` (mutations) or a serde-tagged success/empty/error enum
//! (listings), so the shell can tell an empty table from an unreachable
//! store without catching anything.

pub mod calendar;
pub mod findings;
pub mod scorecard;
pub mod vendors;

/// Property filter: a row with an empty `property_name` belongs to the
/// deployment's default property.
pub(crate) fn belongs_to(row_property: &str, wanted: &str, default_property: &str) -> bool {
    if row_property.is_empty() {
        wanted == default_property
    } else {
        row_property == wanted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_property_maps_to_default() {
        assert!(belongs_to("", "3739 Knollwood Dr", "3739 Knollwood Dr"));
        assert!(!belongs_to("", "12 Harbor Ln", "3739 Knollwood Dr"));
        assert!(belongs_to("12 Harbor Ln", "12 Harbor Ln", "3739 Knollwood Dr"));
        assert!(!belongs_to("12 Harbor Ln", "3739 Knollwood Dr", "3739 Knollwood Dr"));
    }
}
