//! Structured record ingestion.
//!
//! Callback plugins and wrapper scripts emit the run as JSON instead of a
//! console transcript. The field names vary between emitters, so each slot
//! is looked up through an ordered alias list; the first alias holding a
//! value of the expected shape wins. Values of the wrong shape are passed
//! over, never reported.

use crate::playbook::model::{HostResult, Play, Playbook, RecapEntry, Scalar, Task, TaskDuration};
use crate::playbook::parse::parse_text;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Accepted names for a play's task list.
const TASK_LIST_ALIASES: [&str; 3] = ["tasks", "tasks_results", "tasks_list"];
/// Accepted names for a play's own name.
const PLAY_NAME_ALIASES: [&str; 2] = ["name", "play.name"];
/// Accepted names for a task's name.
const TASK_NAME_ALIASES: [&str; 3] = ["name", "task.name", "action"];
/// Accepted names for the per-host recap mapping.
const RECAP_ALIASES: [&str; 2] = ["stats", "playbook_recap"];

/// Route content that parses as a JSON mapping through the record path;
/// everything else takes the transcript grammar.
pub fn parse_any(raw: &str) -> Playbook {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if value.is_object() => from_record(&value),
        _ => parse_text(raw),
    }
}

/// Build the model from a structured record. Anything that is not a JSON
/// mapping produces an empty model.
pub fn from_record(record: &Value) -> Playbook {
    let root = match record.as_object() {
        Some(map) => map,
        None => return Playbook::default(),
    };

    let mut playbook = Playbook::default();
    if let Some(entries) = root.get("plays").and_then(Value::as_array) {
        for entry in entries {
            if let Some(play) = entry.as_object() {
                playbook.plays.push(Play {
                    name: string_alias(play, &PLAY_NAME_ALIASES).unwrap_or_default(),
                    tasks: tasks_of(play),
                });
            }
        }
    }
    playbook.stats = recap_of(root);
    playbook
}

fn tasks_of(play: &Map<String, Value>) -> Vec<Task> {
    array_alias(play, &TASK_LIST_ALIASES)
        .map(|entries| entries.iter().map(task_of).collect())
        .unwrap_or_default()
}

fn task_of(entry: &Value) -> Task {
    match entry.as_object() {
        Some(task) => Task {
            name: string_alias(task, &TASK_NAME_ALIASES).unwrap_or_default(),
            duration: duration_of(task),
            hosts: hosts_of(task),
        },
        // A bare value still names a task; it carries no duration or hosts.
        None => Task::named(text_of(entry)),
    }
}

/// Duration priority: numeric `duration`, then `duration_seconds`, then the
/// `elapsed` field of a `duration` mapping.
fn duration_of(task: &Map<String, Value>) -> TaskDuration {
    if let Some(secs) = task.get("duration").and_then(Value::as_f64) {
        return TaskDuration::Seconds(secs);
    }
    if let Some(secs) = task.get("duration_seconds").and_then(Value::as_f64) {
        return TaskDuration::Seconds(secs);
    }
    let elapsed = task
        .get("duration")
        .and_then(Value::as_object)
        .and_then(|duration| duration.get("elapsed"))
        .and_then(Value::as_f64);
    match elapsed {
        Some(secs) => TaskDuration::Elapsed(secs),
        None => TaskDuration::Absent,
    }
}

fn hosts_of(task: &Map<String, Value>) -> BTreeMap<String, HostResult> {
    let mut hosts = BTreeMap::new();
    if let Some(results) = task.get("hosts").and_then(Value::as_object) {
        for (host, result) in results {
            let mut fields = HostResult::new();
            if let Some(map) = result.as_object() {
                for (key, value) in map {
                    if let Some(scalar) = Scalar::of(value) {
                        fields.insert(key.clone(), scalar);
                    }
                }
            }
            hosts.insert(host.clone(), fields);
        }
    }
    hosts
}

fn recap_of(root: &Map<String, Value>) -> BTreeMap<String, RecapEntry> {
    let mut stats = BTreeMap::new();
    if let Some(recap) = object_alias(root, &RECAP_ALIASES) {
        for (host, counters) in recap {
            let mut entry = RecapEntry::new();
            if let Some(map) = counters.as_object() {
                for (key, value) in map {
                    entry.insert(key.clone(), text_of(value));
                }
            }
            stats.insert(host.clone(), entry);
        }
    }
    stats
}

/// The value as display text: strings verbatim, everything else as JSON.
fn text_of(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// First alias resolving to a non-empty string.
fn string_alias(obj: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        lookup(obj, alias)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// First alias resolving to an array.
fn array_alias<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Vec<Value>> {
    aliases
        .iter()
        .find_map(|alias| lookup(obj, alias).and_then(Value::as_array))
}

/// First alias resolving to a mapping.
fn object_alias<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Map<String, Value>> {
    aliases
        .iter()
        .find_map(|alias| lookup(obj, alias).and_then(Value::as_object))
}

/// Dotted aliases descend one level: `"task.name"` reads `obj["task"]["name"]`.
fn lookup<'a>(obj: &'a Map<String, Value>, alias: &str) -> Option<&'a Value> {
    match alias.split_once('.') {
        Some((outer, inner)) => obj.get(outer).and_then(Value::as_object)?.get(inner),
        None => obj.get(alias),
    }
}
