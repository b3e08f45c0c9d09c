use serde_json::Value;

use super::Record;
use crate::reminder::RecurrenceRule;

/// `{"rrule": <rule body>}`. The recurrence end is not exported.
pub fn map_recurrence(rule: &RecurrenceRule) -> Record {
    let mut record = Record::new();
    record.insert("rrule".into(), Value::from(rule.rule_text()));
    record
}
