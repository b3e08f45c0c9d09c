//! Reminder snapshot types.
//!
//! These mirror what a host reminder store exposes for a single task item.
//! Sources deserialize their data into these types; the export pipeline
//! only ever reads them.

use chrono::{DateTime, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A reminder as read from the host store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub calendar_item_identifier: String,
    #[serde(default)]
    pub calendar_item_external_identifier: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,

    /// Time zone identifier (e.g. "Europe/Paris")
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub alarms: Option<Vec<Alarm>>,
    #[serde(default)]
    pub recurrence_rules: Option<Vec<RecurrenceRule>>,

    /// 0 means no priority
    #[serde(default)]
    pub priority: i64,

    #[serde(default)]
    pub start_date_components: Option<DateComponents>,
    #[serde(default)]
    pub due_date_components: Option<DateComponents>,

    #[serde(default)]
    pub is_completed: bool,

    /// Name of the list (calendar) the reminder belongs to
    pub list: String,
    /// Name of the account (source) owning the list
    pub account: String,
}

impl Reminder {
    /// Start date, if the start components resolve to a concrete instant.
    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date_components.as_ref()?.date()
    }

    /// Due date, if the due components resolve to a concrete instant.
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date_components.as_ref()?.date()
    }

    pub fn recurrence_rules(&self) -> &[RecurrenceRule] {
        self.recurrence_rules.as_deref().unwrap_or_default()
    }

    pub fn alarms(&self) -> &[Alarm] {
        self.alarms.as_deref().unwrap_or_default()
    }
}

/// Calendar date components, possibly partial.
///
/// Reminders store their start and due dates as components rather than
/// instants, so a due "day" without a time is representable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateComponents {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub hour: Option<u32>,
    #[serde(default)]
    pub minute: Option<u32>,
    #[serde(default)]
    pub second: Option<u32>,
    /// IANA zone the components are expressed in; UTC when absent.
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl DateComponents {
    /// Resolve the components to an instant.
    ///
    /// Needs year, month and day; time fields default to midnight.
    /// Components without a zone resolve in UTC, not the host's local zone,
    /// so a zone-less all-day date lands on UTC midnight of that day.
    /// Returns None for invalid dates, unknown zones and local times that
    /// don't exist in the zone. Ambiguous local times take the earlier instant.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        let date = NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)?;
        let naive = date.and_hms_opt(
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
        )?;

        match &self.time_zone {
            None => Some(naive.and_utc()),
            Some(tzid) => {
                let tz: Tz = tzid.parse().ok()?;
                match tz.from_local_datetime(&naive) {
                    LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
                    LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
                    LocalResult::None => None,
                }
            }
        }
    }
}

/// An alarm attached to a reminder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    #[serde(default)]
    pub absolute_date: Option<DateTime<Utc>>,
    /// Seconds relative to the reminder's date; non-positive means no offset
    #[serde(default)]
    pub relative_offset: f64,
    #[serde(default)]
    pub structured_location: Option<StructuredLocation>,
    #[serde(default)]
    pub proximity: Proximity,
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredLocation {
    #[serde(default)]
    pub title: Option<String>,
}

/// Geofence trigger for location-based alarms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proximity {
    #[default]
    None,
    Enter,
    Leave,
}

/// A recurrence rule attached to a reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// Canonical textual description, e.g. "EKRecurrenceRule <0x6000> RRULE FREQ=DAILY;INTERVAL=1"
    pub description: String,
}

const RRULE_MARKER: &str = "RRULE ";

impl RecurrenceRule {
    pub fn new(description: impl Into<String>) -> Self {
        RecurrenceRule {
            description: description.into(),
        }
    }

    /// The iCalendar rule body: everything after the last "RRULE " marker,
    /// or the whole description when there is no marker.
    pub fn rule_text(&self) -> &str {
        self.description
            .rsplit(RRULE_MARKER)
            .next()
            .unwrap_or(&self.description)
    }
}
