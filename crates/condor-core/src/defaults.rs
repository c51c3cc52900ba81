//! Canonical default values the Conductor server fills in.
//!
//! A [`DefaultTable`] is immutable once built; the reconciliation passes
//! receive the tables they need through [`Reconciler`](crate::Reconciler).

use serde_json::{json, Map, Value};

/// Mapping from key to the value the server assumes when the key is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultTable {
    entries: Map<String, Value>,
}

impl DefaultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(key, value)` pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Task definition document defaults.
    pub fn task_def() -> Self {
        Self::from_pairs([
            ("backoffScaleFactor", json!(1)),
            ("rateLimitFrequencyInSeconds", json!(1)),
            ("responseTimeoutSeconds", json!(3600)),
            ("retryCount", json!(3)),
            ("retryDelaySeconds", json!(60)),
            ("retryLogic", json!("FIXED")),
            ("timeoutPolicy", json!("TIME_OUT_WF")),
        ])
    }

    /// Workflow definition document defaults.
    pub fn workflow_def() -> Self {
        Self::from_pairs([
            ("schemaVersion", json!(2)),
            ("timeoutPolicy", json!("ALERT_ONLY")),
            ("enforceSchema", json!(true)),
            ("restartable", json!(true)),
        ])
    }

    /// Defaults for each element of a workflow's `tasks` array.
    pub fn workflow_task() -> Self {
        Self::from_pairs([("type", json!("SIMPLE"))])
    }
}

/// The value a primitive of this shape falls back to when no default is
/// declared: `false`, `0` or `""`. `None` for non-primitives.
pub fn zero_value_of(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(Value::Bool(false)),
        Value::Number(_) => Some(json!(0)),
        Value::String(_) => Some(Value::String(String::new())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
