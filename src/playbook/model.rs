use std::collections::BTreeMap;
use std::fmt;

/// A parsed playbook run: ordered plays plus the end-of-run recap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playbook {
    pub plays: Vec<Play>,
    pub stats: BTreeMap<String, RecapEntry>,
}

/// Per-host recap counters (`ok`, `changed`, `failed` and friends), kept as
/// the strings they arrived as.
pub type RecapEntry = BTreeMap<String, String>;

/// A named group of tasks, in appearance order.
#[derive(Debug, Clone, PartialEq)]
pub struct Play {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Play {
    /// A play with no tasks yet.
    pub fn named(name: impl Into<String>) -> Self {
        Play {
            name: name.into(),
            tasks: Vec::new(),
        }
    }
}

/// A single step within a play.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub name: String,
    pub duration: TaskDuration,
    /// Per-host outcome fields; only structured records carry these.
    pub hosts: BTreeMap<String, HostResult>,
}

impl Task {
    /// A task with nothing recorded beyond its name.
    pub fn named(name: impl Into<String>) -> Self {
        Task {
            name: name.into(),
            duration: TaskDuration::Absent,
            hosts: BTreeMap::new(),
        }
    }
}

/// Scalar outcome fields reported for one host of one task.
pub type HostResult = BTreeMap<String, Scalar>;

/// How (and whether) a task's runtime was recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskDuration {
    Absent,
    /// Plain seconds, from a timing annotation or a numeric duration field.
    Seconds(f64),
    /// The `elapsed` field of a nested duration mapping.
    Elapsed(f64),
}

impl TaskDuration {
    /// Seconds spent, when any were recorded.
    pub fn resolve(self) -> Option<f64> {
        match self {
            TaskDuration::Absent => None,
            TaskDuration::Seconds(secs) | TaskDuration::Elapsed(secs) => Some(secs),
        }
    }
}

/// A host-result value small enough to render as a leaf node.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    /// Scalar view of a JSON value; arrays and mappings are not scalars.
    pub fn of(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Scalar::Text(s.clone())),
            serde_json::Value::Number(n) => Some(Scalar::Number(n.clone())),
            serde_json::Value::Bool(b) => Some(Scalar::Bool(*b)),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn resolve_treats_both_recorded_forms_alike() {
        assert_eq!(TaskDuration::Absent.resolve(), None);
        assert_eq!(TaskDuration::Seconds(2.5).resolve(), Some(2.5));
        assert_eq!(TaskDuration::Elapsed(7.0).resolve(), Some(7.0));
    }

    #[test]
    fn scalar_of_accepts_strings_numbers_bools() {
        assert_eq!(Scalar::of(&json!("done")), Some(Scalar::Text("done".to_string())));
        assert_eq!(Scalar::of(&json!(true)), Some(Scalar::Bool(true)));
        assert!(matches!(Scalar::of(&json!(3)), Some(Scalar::Number(_))));
    }

    #[test]
    fn scalar_of_rejects_containers_and_null() {
        assert_eq!(Scalar::of(&json!(null)), None);
        assert_eq!(Scalar::of(&json!([1, 2])), None);
        assert_eq!(Scalar::of(&json!({"a": 1})), None);
    }

    #[test]
    fn scalar_display_matches_leaf_rendering() {
        assert_eq!(Scalar::Text("changed".to_string()).to_string(), "changed");
        assert_eq!(Scalar::Bool(false).to_string(), "false");
        assert_eq!(Scalar::of(&json!(2.5)).map(|s| s.to_string()), Some("2.5".to_string()));
    }
}
