//! Console transcript parsing.
//!
//! The transcript grammar is line oriented. Play and task markers open
//! sections, a parenthesised `(H:MM:SS[.frac])` annotation times the task
//! that is currently open, and everything after a `PLAY RECAP` marker is
//! read as per-host `key=value` counters. Unrecognized lines are skipped,
//! so arbitrary text degrades to a partial or empty model, never an error.

use crate::playbook::model::{Play, Playbook, RecapEntry, Task, TaskDuration};
use regex::Regex;

/// Play marker: the keyword plus a bracketed name, e.g. `PLAY [Setup] ****`.
const PLAY_LINE_RE: &str = r"^PLAY \[([^\]]*)\]";
/// Task marker, e.g. `TASK [install pkg] ****`.
const TASK_LINE_RE: &str = r"^TASK \[([^\]]*)\]";
/// Duration annotation anywhere on the line, e.g. `ok: [web1] (0:00:02.500000)`.
const DURATION_RE: &str = r"\((\d+):(\d{2}):(\d{2}(?:\.\d+)?)\)";
/// Start of the recap section.
const RECAP_MARKER: &str = "PLAY RECAP";

enum Scan {
    Body,
    Recap,
}

/// Parse a console transcript into the structured model.
pub fn parse_text(raw: &str) -> Playbook {
    let play_re = Regex::new(PLAY_LINE_RE).expect("valid play marker pattern");
    let task_re = Regex::new(TASK_LINE_RE).expect("valid task marker pattern");
    let duration_re = Regex::new(DURATION_RE).expect("valid duration pattern");

    let mut playbook = Playbook::default();
    let mut state = Scan::Body;
    // True between a task marker and the annotation (or marker) that closes it.
    let mut in_task = false;

    for raw_line in raw.lines() {
        let line = raw_line.trim();
        match state {
            Scan::Body => {
                if let Some(caps) = play_re.captures(line) {
                    playbook.plays.push(Play::named(&caps[1]));
                    in_task = false;
                } else if let Some(caps) = task_re.captures(line) {
                    // A task marker outside any play has nowhere to attach.
                    if let Some(play) = playbook.plays.last_mut() {
                        play.tasks.push(Task::named(&caps[1]));
                        in_task = true;
                    }
                } else if in_task && duration_re.is_match(line) {
                    if let Some(secs) = duration_seconds(&duration_re, line) {
                        if let Some(task) = current_task(&mut playbook) {
                            task.duration = TaskDuration::Seconds(secs);
                        }
                    }
                    in_task = false;
                } else if line.starts_with(RECAP_MARKER) {
                    state = Scan::Recap;
                }
            }
            Scan::Recap => {
                if line.is_empty() {
                    continue;
                }
                let tokens: Vec<&str> = line.split_whitespace().collect();
                if tokens.len() < 2 {
                    // Too short to carry stats; the recap never resumes.
                    break;
                }
                if !tokens[1..].iter().any(|t| t.contains('=')) {
                    continue;
                }
                let mut entry = RecapEntry::new();
                for token in &tokens[1..] {
                    if let Some((key, value)) = token.split_once('=') {
                        entry.insert(key.to_string(), value.to_string());
                    }
                }
                playbook.stats.insert(tokens[0].to_string(), entry);
            }
        }
    }

    playbook
}

fn current_task(playbook: &mut Playbook) -> Option<&mut Task> {
    playbook.plays.last_mut().and_then(|play| play.tasks.last_mut())
}

/// Seconds represented by the first duration annotation on the line.
fn duration_seconds(re: &Regex, line: &str) -> Option<f64> {
    let caps = re.captures(line)?;
    let hours: f64 = caps[1].parse().unwrap_or(0.0);
    let minutes: f64 = caps[2].parse().unwrap_or(0.0);
    let seconds: f64 = caps[3].parse().unwrap_or(0.0);
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}
