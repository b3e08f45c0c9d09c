//! Grouping mapped reminders by account and list.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::{ExportError, ExportResult};
use crate::filter::ListFilter;
use crate::record::Record;
use crate::reminder::Reminder;

/// account name -> list name -> records in creation order
pub type Grouped = BTreeMap<String, BTreeMap<String, Vec<Record>>>;

/// Sort the batch by creation date, filter it, map each kept reminder and
/// group the records under their account and list names.
///
/// Every reminder in the batch needs a creation date, including those the
/// filter would drop. The first mapping error aborts the whole aggregation.
pub fn aggregate<F>(reminders: &[Reminder], filter: &ListFilter, map: F) -> ExportResult<Grouped>
where
    F: Fn(&Reminder) -> ExportResult<Record>,
{
    let mut ordered: Vec<(DateTime<Utc>, &Reminder)> = reminders
        .iter()
        .map(|reminder| {
            reminder
                .creation_date
                .map(|created| (created, reminder))
                .ok_or_else(|| {
                    ExportError::MissingCreationDate(reminder.calendar_item_identifier.clone())
                })
        })
        .collect::<ExportResult<_>>()?;

    // Stable, so equal creation dates keep source order
    ordered.sort_by_key(|(created, _)| *created);

    let mut grouped = Grouped::new();
    let mut skipped = 0usize;

    for (_, reminder) in ordered {
        if !filter.should_include(reminder) {
            skipped += 1;
            continue;
        }

        let record = map(reminder)?;

        grouped
            .entry(reminder.account.clone())
            .or_default()
            .entry(reminder.list.clone())
            .or_default()
            .push(record);
    }

    log::debug!(
        "Aggregated {} reminders ({} skipped by filter)",
        reminders.len() - skipped,
        skipped
    );

    Ok(grouped)
}
