use serde_json::{Number, Value};

use super::Record;
use crate::date_format::format_full;
use crate::reminder::{Alarm, Proximity};

/// Map an alarm to a record. Alarm type and sound are never exported.
pub fn map_alarm(alarm: &Alarm) -> Record {
    let mut record = Record::new();

    if let Some(absolute_date) = &alarm.absolute_date {
        record.insert("absoluteDate".into(), Value::from(format_full(absolute_date)));
    }

    if let Some(offset) = positive_seconds(alarm.relative_offset) {
        record.insert("relativeOffset".into(), offset);
    }

    if let Some(location) = &alarm.structured_location {
        if let Some(title) = &location.title {
            record.insert("structuredLocation".into(), Value::from(title.as_str()));
        }
        match alarm.proximity {
            Proximity::Enter => {
                record.insert("proximity".into(), Value::from("enter"));
            }
            Proximity::Leave => {
                record.insert("proximity".into(), Value::from("leave"));
            }
            Proximity::None => {}
        }
    }

    if let Some(email) = &alarm.email_address {
        record.insert("emailAddress".into(), Value::from(email.as_str()));
    }

    record
}

/// Zero and negative offsets mean "no offset". Whole seconds serialize as
/// JSON integers (`900`, not `900.0`).
fn positive_seconds(seconds: f64) -> Option<Value> {
    if seconds <= 0.0 || seconds.is_nan() {
        return None;
    }
    if seconds.fract() == 0.0 && seconds <= i64::MAX as f64 {
        Some(Value::from(seconds as i64))
    } else {
        Number::from_f64(seconds).map(Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::StructuredLocation;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn mapped(alarm: &Alarm) -> Value {
        Value::Object(map_alarm(alarm))
    }

    #[test]
    fn test_empty_alarm_maps_to_empty_record() {
        assert!(map_alarm(&Alarm::default()).is_empty());
    }

    #[test]
    fn test_absolute_and_relative() {
        let alarm = Alarm {
            absolute_date: Some(Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()),
            relative_offset: 900.0,
            ..Default::default()
        };
        assert_eq!(
            mapped(&alarm),
            json!({ "absoluteDate": "2025-06-01 08:00:00", "relativeOffset": 900 })
        );
    }

    #[test]
    fn test_fractional_offset_stays_float() {
        let alarm = Alarm {
            relative_offset: 1.5,
            ..Default::default()
        };
        assert_eq!(mapped(&alarm), json!({ "relativeOffset": 1.5 }));
    }

    #[test]
    fn test_non_positive_offset_omitted() {
        for offset in [0.0, -600.0] {
            let alarm = Alarm {
                relative_offset: offset,
                ..Default::default()
            };
            assert!(map_alarm(&alarm).get("relativeOffset").is_none());
        }
    }

    #[test]
    fn test_location_with_proximity() {
        let alarm = Alarm {
            structured_location: Some(StructuredLocation {
                title: Some("Office".to_string()),
            }),
            proximity: Proximity::Leave,
            ..Default::default()
        };
        assert_eq!(
            mapped(&alarm),
            json!({ "structuredLocation": "Office", "proximity": "leave" })
        );
    }

    #[test]
    fn test_proximity_ignored_without_location() {
        let alarm = Alarm {
            proximity: Proximity::Enter,
            email_address: Some("me@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(mapped(&alarm), json!({ "emailAddress": "me@example.com" }));
    }

    #[test]
    fn test_location_without_proximity() {
        let alarm = Alarm {
            structured_location: Some(StructuredLocation {
                title: Some("Gym".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(mapped(&alarm), json!({ "structuredLocation": "Gym" }));
    }
}
