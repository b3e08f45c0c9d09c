//! Include/exclude filtering by list name and completion state.

use regex::Regex;

use crate::error::{ExportError, ExportResult};
use crate::reminder::Reminder;

/// Include pattern matching every list.
pub const DEFAULT_INCLUDE_LISTS: &str = ".*";

/// Defaults to including every open reminder.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
    include_completed: bool,
}

impl ListFilter {
    /// Compile both patterns up front. An empty pattern disables that side:
    /// an empty include matches every list, an empty exclude matches none.
    pub fn new(include: &str, exclude: &str, include_completed: bool) -> ExportResult<Self> {
        Ok(ListFilter {
            include: compile(include)?,
            exclude: compile(exclude)?,
            include_completed,
        })
    }

    pub fn should_include(&self, reminder: &Reminder) -> bool {
        if !self.include_completed && reminder.is_completed {
            return false;
        }

        if self
            .exclude
            .as_ref()
            .is_some_and(|exclude| exclude.is_match(&reminder.list))
        {
            return false;
        }

        match &self.include {
            Some(include) => include.is_match(&reminder.list),
            None => true,
        }
    }
}

fn compile(pattern: &str) -> ExportResult<Option<Regex>> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(pattern)
        .map(Some)
        .map_err(|source| ExportError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder(list: &str, completed: bool) -> Reminder {
        Reminder {
            calendar_item_identifier: format!("{list}-{completed}"),
            list: list.to_string(),
            account: "iCloud".to_string(),
            is_completed: completed,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_include_open_reminders_in_any_list() {
        let filter = ListFilter::new(DEFAULT_INCLUDE_LISTS, "", false).unwrap();
        assert!(filter.should_include(&reminder("Personal", false)));
        assert!(filter.should_include(&reminder("", false)));
        assert!(!filter.should_include(&reminder("Personal", true)));

        let default = ListFilter::default();
        assert!(default.should_include(&reminder("Groceries", false)));
        assert!(!default.should_include(&reminder("Groceries", true)));
    }

    #[test]
    fn test_completed_excluded_regardless_of_patterns() {
        let filter = ListFilter::new("Personal", "", false).unwrap();
        assert!(!filter.should_include(&reminder("Personal", true)));
    }

    #[test]
    fn test_include_completed() {
        let filter = ListFilter::new(".*", "", true).unwrap();
        assert!(filter.should_include(&reminder("Personal", true)));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let filter = ListFilter::new(".*", "Work", false).unwrap();
        assert!(!filter.should_include(&reminder("Work Tasks", false)));
        assert!(filter.should_include(&reminder("Home", false)));
    }

    #[test]
    fn test_include_is_unanchored_search() {
        let filter = ListFilter::new("roc", "", false).unwrap();
        assert!(filter.should_include(&reminder("Groceries", false)));
        assert!(!filter.should_include(&reminder("Personal", false)));

        let anchored = ListFilter::new("^Home$", "", false).unwrap();
        assert!(anchored.should_include(&reminder("Home", false)));
        assert!(!anchored.should_include(&reminder("Home Office", false)));
    }

    #[test]
    fn test_empty_include_matches_everything() {
        let filter = ListFilter::new("", "", false).unwrap();
        assert!(filter.should_include(&reminder("Anything", false)));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = ListFilter::new("(unclosed", "", false).unwrap_err();
        assert!(matches!(err, ExportError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));

        assert!(ListFilter::new(".*", "[z-a]", false).is_err());
    }
}
