//! Mindmap assembly from a parsed playbook.
//!
//! The tree always hangs from a single root. Plays fan out under a `Plays`
//! bucket and the recap under `Play Recap`; either bucket is omitted when
//! its section is empty, so an unparseable log still yields a root-only map.

use crate::mindmap::graph::{markdown_outline, nest, Edge, NestedNode, Node};
use crate::mindmap::id::fresh_id;
use crate::playbook::Playbook;
use serde::Serialize;

/// Everything the builder produces for one playbook.
#[derive(Debug, Clone)]
pub struct Mindmap {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub nested: NestedNode,
    pub markdown: String,
    pub status_meanings: StatusMeanings,
}

/// Legend for the status keys that appear on result and recap leaves.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusMeanings {
    pub ok: &'static str,
    pub changed: &'static str,
    pub fatal: &'static str,
    pub skipped: &'static str,
    pub unreachable: &'static str,
    pub rescued: &'static str,
    pub ignored: &'static str,
}

impl Default for StatusMeanings {
    fn default() -> Self {
        StatusMeanings {
            ok: "Task succeeded (no error)",
            changed: "Task made changes on target host",
            fatal: "Task failed",
            skipped: "Task was skipped",
            unreachable: "Host was unreachable",
            rescued: "Task failed but rescued by 'rescue' block",
            ignored: "Failure ignored via 'ignore_errors'",
        }
    }
}

/// Strip decoration characters (`*`, `[`, `]`) and collapse runs of
/// whitespace to single spaces.
pub fn clean_label(label: &str) -> String {
    let stripped: String = label
        .chars()
        .filter(|c| !matches!(c, '*' | '[' | ']'))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the full mindmap for one playbook run.
pub fn build_mindmap(playbook: &Playbook) -> Mindmap {
    let mut map = MindmapBuilder::new();
    let root = map.root_id();

    if !playbook.plays.is_empty() {
        let plays_bucket = map.add_node("Plays".to_string(), &root, Some("plays"));
        for (i, play) in playbook.plays.iter().enumerate() {
            let mut play_label = clean_label(&play.name);
            if play_label.is_empty() {
                play_label = format!("Play {}", i + 1);
            }
            let play_id = map.add_node(play_label, &plays_bucket, Some("play"));

            let tasks_bucket = map.add_node("Tasks".to_string(), &play_id, Some("tasks"));
            for (j, task) in play.tasks.iter().enumerate() {
                let mut task_label = clean_label(&task.name);
                if task_label.is_empty() {
                    task_label = format!("Task {}", j + 1);
                }
                let task_id =
                    map.add_node(format!("{:02}. {}", j + 1, task_label), &tasks_bucket, Some("task"));

                for (host, result) in &task.hosts {
                    let host_id = map.add_node(format!("Host: {host}"), &task_id, None);
                    for (field, value) in result {
                        map.add_node(format!("{field}: {value}"), &host_id, Some("status"));
                    }
                }
            }
        }
    }

    if !playbook.stats.is_empty() {
        let recap_bucket = map.add_node("Play Recap".to_string(), &root, Some("recap"));
        for (host, entry) in &playbook.stats {
            let host_id = map.add_node(format!("Host: {host}"), &recap_bucket, None);
            for (key, value) in entry {
                map.add_node(format!("{key}: {value}"), &host_id, Some("recap-item"));
            }
        }
    }

    map.finish()
}

struct MindmapBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl MindmapBuilder {
    /// Start a build; the root node exists from the outset.
    fn new() -> Self {
        let root = Node {
            id: fresh_id(),
            label: "Playbook Output".to_string(),
            title: "Root: Playbook Output".to_string(),
            group: None,
        };
        MindmapBuilder { nodes: vec![root], edges: Vec::new() }
    }

    fn root_id(&self) -> String {
        self.nodes[0].id.clone()
    }

    /// Append a node under `parent` and return its id. The title always
    /// mirrors the label for non-root nodes.
    fn add_node(&mut self, label: String, parent: &str, group: Option<&str>) -> String {
        let id = fresh_id();
        self.nodes.push(Node {
            id: id.clone(),
            label: label.clone(),
            title: label,
            group: group.map(str::to_string),
        });
        self.edges.push(Edge { from: parent.to_string(), to: id.clone() });
        id
    }

    fn finish(self) -> Mindmap {
        let nested = nest(&self.nodes[0], &self.nodes, &self.edges);
        let markdown = markdown_outline(&nested);
        Mindmap {
            nodes: self.nodes,
            edges: self.edges,
            nested,
            markdown,
            status_meanings: StatusMeanings::default(),
        }
    }
}
