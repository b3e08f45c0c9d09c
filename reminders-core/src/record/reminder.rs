use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{Record, map_alarm, map_recurrence};
use crate::date_format::{format_full, format_simple};
use crate::error::{ExportError, ExportResult};
use crate::reminder::Reminder;

fn insert_str(record: &mut Record, key: &str, value: Option<&String>) {
    if let Some(value) = value {
        record.insert(key.into(), Value::from(value.as_str()));
    }
}

fn insert_date(
    record: &mut Record,
    key: &str,
    date: Option<DateTime<Utc>>,
    format: fn(&DateTime<Utc>) -> String,
) {
    if let Some(date) = date {
        record.insert(key.into(), Value::from(format(&date)));
    }
}

/// Map a reminder with the full key set.
///
/// List and account names are left out; they only serve as grouping keys.
pub fn map_full(reminder: &Reminder) -> Record {
    let mut record = Record::new();

    record.insert(
        "calendarItemIdentifier".into(),
        Value::from(reminder.calendar_item_identifier.as_str()),
    );
    insert_str(
        &mut record,
        "calendarItemExternalIdentifier",
        reminder.calendar_item_external_identifier.as_ref(),
    );
    insert_str(&mut record, "title", reminder.title.as_ref());
    insert_str(&mut record, "location", reminder.location.as_ref());

    insert_date(&mut record, "creationDate", reminder.creation_date, format_full);
    insert_date(&mut record, "lastModifiedDate", reminder.last_modified_date, format_full);

    insert_str(&mut record, "timeZone", reminder.time_zone.as_ref());
    insert_str(&mut record, "url", reminder.url.as_ref());
    insert_str(&mut record, "notes", reminder.notes.as_ref());

    let alarms: Vec<Value> = reminder
        .alarms()
        .iter()
        .map(|alarm| Value::Object(map_alarm(alarm)))
        .collect();
    if !alarms.is_empty() {
        record.insert("alarms".into(), Value::Array(alarms));
    }

    let rules: Vec<Value> = reminder
        .recurrence_rules()
        .iter()
        .map(|rule| Value::Object(map_recurrence(rule)))
        .collect();
    if !rules.is_empty() {
        record.insert("recurrenceRules".into(), Value::Array(rules));
    }

    record.insert("priority".into(), Value::from(reminder.priority));

    insert_date(&mut record, "startDate", reminder.start_date(), format_full);
    insert_date(&mut record, "dueDate", reminder.due_date(), format_full);

    record.insert("completed".into(), Value::from(reminder.is_completed));

    insert_date(&mut record, "completionDate", reminder.completion_date, format_full);

    record
}

/// Map a reminder with the reduced key set.
///
/// Fails when the reminder has more than one recurrence rule, since the
/// single `recurrence` field can't represent them.
pub fn map_simple(reminder: &Reminder) -> ExportResult<Record> {
    let mut record = Record::new();

    insert_str(&mut record, "title", reminder.title.as_ref());
    insert_date(&mut record, "creationDate", reminder.creation_date, format_simple);
    insert_str(&mut record, "timeZone", reminder.time_zone.as_ref());
    insert_str(&mut record, "notes", reminder.notes.as_ref());

    match reminder.recurrence_rules() {
        [] => {}
        [rule] => {
            record.insert("recurrence".into(), Value::from(rule.rule_text()));
        }
        rules => {
            return Err(ExportError::MultipleRecurrenceRules {
                identifier: reminder.calendar_item_identifier.clone(),
                count: rules.len(),
            });
        }
    }

    record.insert("priority".into(), Value::from(reminder.priority));

    insert_date(&mut record, "startDate", reminder.start_date(), format_simple);
    insert_date(&mut record, "dueDate", reminder.due_date(), format_simple);

    record.insert("completed".into(), Value::from(reminder.is_completed));

    insert_date(&mut record, "completionDate", reminder.completion_date, format_simple);

    Ok(record)
}
