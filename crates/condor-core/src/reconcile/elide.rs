//! Default elision.
//!
//! Removes top-level keys whose values carry no information the server would
//! not add back on its own: nulls, empty containers and primitives equal to
//! their default. Only one level is normalized here; the `tasks` array of a
//! workflow gets a second pass with the task-element table.

use crate::defaults::{zero_value_of, DefaultTable};
use crate::log_anomaly;
use crate::manifest::{value_type_name, Manifest, TASKS_KEY};
use crate::reconcile::equality::values_equal;
use serde_json::Value;

/// Strip null, empty and defaulted keys from the top level of `tree`.
pub fn elide(tree: &mut Manifest, defaults: &DefaultTable) {
    let doomed: Vec<String> = tree
        .iter()
        .filter(|(key, value)| is_elidable(key, value, defaults))
        .map(|(key, _)| key.clone())
        .collect();

    for key in doomed {
        tree.remove(&key);
    }
}

fn is_elidable(key: &str, value: &Value, defaults: &DefaultTable) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            let resolved = defaults.get(key).cloned().or_else(|| zero_value_of(value));
            resolved.is_some_and(|default| values_equal(value, &default))
        }
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
    }
}

/// Apply [`elide`] to every object in `tree["tasks"]`.
///
/// A missing `tasks` key is normal after elision of an empty array. A `tasks`
/// value that is not an array, or an element that is not an object, is
/// reported and left untouched.
pub fn elide_tasks(tree: &mut Manifest, task_defaults: &DefaultTable) {
    let Some(tasks) = tree.get_mut(TASKS_KEY) else {
        tracing::debug!("manifest has no 'tasks' key, skipping task elision");
        return;
    };

    let items = match tasks {
        Value::Array(items) => items,
        other => {
            log_anomaly!(
                TASKS_KEY,
                format!("expected an array, found {}", value_type_name(other))
            );
            return;
        }
    };

    for (index, item) in items.iter_mut().enumerate() {
        match item {
            Value::Object(task) => elide(task, task_defaults),
            other => log_anomaly!(
                format!("{}[{}]", TASKS_KEY, index),
                format!("expected an object, found {}", value_type_name(other))
            ),
        }
    }
}
