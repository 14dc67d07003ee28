//! Slowest-task ranking.

use crate::playbook::Playbook;
use serde::Serialize;
use std::cmp::Ordering;

/// Ranking depth used when the caller does not ask for another one.
pub const DEFAULT_TOP_N: usize = 20;

/// One row of the slowest-task ranking. Names are reported exactly as
/// parsed, without the label cleaning the mindmap applies.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskTiming {
    pub play: String,
    pub task: String,
    pub duration_seconds: f64,
}

/// Rank every task with a recorded duration, longest first, keeping at most
/// `limit` rows.
///
/// The sort is stable, so tasks with equal durations stay in encounter
/// order: plays as they appeared, tasks in order within each play.
pub fn top_tasks(playbook: &Playbook, limit: usize) -> Vec<TaskTiming> {
    let mut rows: Vec<TaskTiming> = Vec::new();
    for (i, play) in playbook.plays.iter().enumerate() {
        for (j, task) in play.tasks.iter().enumerate() {
            if let Some(secs) = task.duration.resolve() {
                rows.push(TaskTiming {
                    play: fallback_name(&play.name, "Play", i + 1),
                    task: fallback_name(&task.name, "Task", j + 1),
                    duration_seconds: secs,
                });
            }
        }
    }
    rows.sort_by(|a, b| {
        b.duration_seconds
            .partial_cmp(&a.duration_seconds)
            .unwrap_or(Ordering::Equal)
    });
    rows.truncate(limit);
    rows
}

fn fallback_name(name: &str, kind: &str, index: usize) -> String {
    if name.is_empty() {
        format!("{kind} {index}")
    } else {
        name.to_string()
    }
}
