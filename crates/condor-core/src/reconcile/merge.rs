//! Merge of server-observed values into the last-known manifest.
//!
//! Scalars always follow the server so later plans see no drift. Structure the
//! user wrote locally (non-empty objects and arrays) is kept verbatim because
//! the server may echo it back reshaped without any semantic change.

use crate::log_anomaly;
use crate::manifest::{is_primitive, value_type_name, Manifest, TASKS_KEY};
use serde_json::Value;

/// Copy every key of `from` that is missing from `into` or primitive in `from`.
pub fn merge(from: &Manifest, into: &mut Manifest) {
    for (key, value) in from {
        if !into.contains_key(key) || is_primitive(value) {
            into.insert(key.clone(), value.clone());
        }
    }
}

/// Merge task elements pairwise by position, up to the shorter array.
///
/// Reordered or inserted tasks are not realigned; the element at index `i` on
/// the server is merged into the element at index `i` locally.
pub fn merge_tasks(from: &Manifest, into: &mut Manifest) {
    let Some(from_tasks) = task_array(from, "server") else {
        return;
    };
    match into.get(TASKS_KEY) {
        Some(Value::Array(_)) => {}
        None => {
            tracing::debug!("local manifest has no 'tasks' key, skipping task merge");
            return;
        }
        Some(other) => {
            log_anomaly!(
                TASKS_KEY,
                format!("local value is {}, expected an array", value_type_name(other))
            );
            return;
        }
    }
    let Some(Value::Array(into_tasks)) = into.get_mut(TASKS_KEY) else {
        return;
    };

    for (index, (from_item, into_item)) in from_tasks.iter().zip(into_tasks.iter_mut()).enumerate() {
        match (from_item, into_item) {
            (Value::Object(from_task), Value::Object(into_task)) => merge(from_task, into_task),
            (from_item, into_item) => log_anomaly!(
                format!("{}[{}]", TASKS_KEY, index),
                format!(
                    "cannot merge {} into {}, both must be objects",
                    value_type_name(from_item),
                    value_type_name(into_item)
                )
            ),
        }
    }
}

fn task_array<'a>(manifest: &'a Manifest, side: &str) -> Option<&'a Vec<Value>> {
    match manifest.get(TASKS_KEY) {
        Some(Value::Array(items)) => Some(items),
        Some(other) => {
            log_anomaly!(
                TASKS_KEY,
                format!("{} value is {}, expected an array", side, value_type_name(other))
            );
            None
        }
        None => {
            tracing::debug!(side, "manifest has no 'tasks' key, skipping task merge");
            None
        }
    }
}
