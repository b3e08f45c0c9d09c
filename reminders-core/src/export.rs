//! Serializing the grouped export and running the whole pipeline.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::aggregate::{Grouped, aggregate};
use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};
use crate::filter::ListFilter;
use crate::source::ReminderSource;

/// Key the grouped reminders are nested under.
pub const ROOT_KEY: &str = "reminders";

/// Serialize `{"reminders": grouped}` as pretty JSON with sorted keys.
///
/// Object keys are sorted at every level; array order is left untouched.
pub fn export(grouped: &Grouped) -> ExportResult<Vec<u8>> {
    let grouped =
        serde_json::to_value(grouped).map_err(|e| ExportError::Serialization(e.to_string()))?;
    let mut root = Map::new();
    root.insert(ROOT_KEY.to_string(), grouped);
    let value = sort_keys(Value::Object(root));

    let mut bytes = serde_json::to_vec_pretty(&value)
        .map_err(|e| ExportError::Serialization(e.to_string()))?;
    bytes.push(b'\n');

    Ok(bytes)
}

// Key order must not depend on serde_json's `preserve_order` feature.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Fetch, filter, map, group and serialize.
///
/// Patterns are compiled before the source is touched, so a bad pattern
/// fails without querying the store. A denied access request only logs a
/// warning; the fetch is attempted anyway.
pub async fn run_export<S: ReminderSource>(source: &S, config: &ExportConfig) -> ExportResult<Vec<u8>> {
    let filter = ListFilter::new(
        &config.include_lists,
        &config.exclude_lists,
        config.include_completed,
    )?;

    if !source.request_access().await? {
        log::warn!("Access to reminders was not granted; the export may be empty or fail");
    }

    let reminders = source.fetch_reminders().await?;
    log::info!("Fetched {} reminders", reminders.len());

    let schema = config.output_format.schema();
    let grouped = aggregate(&reminders, &filter, |reminder| schema.map(reminder))?;

    export(&grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_export_wraps_under_root_key() {
        let grouped = Grouped::new();
        let bytes = export(&grouped).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({ "reminders": {} }));
    }

    #[test]
    fn test_export_is_pretty_sorted_and_keeps_array_order() {
        let mut grouped = Grouped::new();
        grouped.entry("iCloud".into()).or_default().insert(
            "Personal".into(),
            vec![
                record(&[("title", json!("zebra")), ("completed", json!(false))]),
                record(&[("title", json!("apple")), ("alarms", json!([{ "b": 1, "a": 2 }]))]),
            ],
        );

        let text = String::from_utf8(export(&grouped).unwrap()).unwrap();
        let expected = r#"{
  "reminders": {
    "iCloud": {
      "Personal": [
        {
          "completed": false,
          "title": "zebra"
        },
        {
          "alarms": [
            {
              "a": 2,
              "b": 1
            }
          ],
          "title": "apple"
        }
      ]
    }
  }
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_sort_keys_recurses() {
        let sorted = sort_keys(json!({ "b": { "d": 1, "c": [{ "f": 1, "e": 2 }] }, "a": null }));
        assert_eq!(
            serde_json::to_string(&sorted).unwrap(),
            r#"{"a":null,"b":{"c":[{"e":2,"f":1}],"d":1}}"#
        );
    }
}
