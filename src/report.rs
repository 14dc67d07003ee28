//! Conversion response assembly.

use crate::mindmap::{build_mindmap, Edge, NestedNode, Node, StatusMeanings};
use crate::playbook::Playbook;
use crate::timing::{top_tasks, TaskTiming};
use serde::Serialize;

/// The full conversion response: flat graph, nested tree, outline, status
/// legend, and the slowest-task ranking.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub nested_json: NestedNode,
    pub markdown: String,
    pub status_meanings: StatusMeanings,
    /// The key is part of the response contract and stays `top_20_...`
    /// whatever ranking depth was requested.
    pub top_20_time_consuming_tasks: Vec<TaskTiming>,
}

/// Run the whole pipeline over a parsed playbook.
pub fn build_report(playbook: &Playbook, top_n: usize) -> Report {
    let mindmap = build_mindmap(playbook);
    let timings = top_tasks(playbook, top_n);
    Report {
        nodes: mindmap.nodes,
        edges: mindmap.edges,
        nested_json: mindmap.nested,
        markdown: mindmap.markdown,
        status_meanings: mindmap.status_meanings,
        top_20_time_consuming_tasks: timings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playbook::parse_text;
    use crate::timing::DEFAULT_TOP_N;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
PLAY [Setup] *********************************************************
TASK [install pkg] **************************************************
ok: [host1] (0:00:02.500000)

PLAY RECAP ***********************************************************
host1                     : ok=1    changed=0    unreachable=0    failed=0
";

    #[test]
    fn report_ties_the_pieces_together() {
        let report = build_report(&parse_text(SAMPLE), DEFAULT_TOP_N);

        assert_eq!(report.nodes.len(), report.edges.len() + 1);
        assert_eq!(report.markdown.lines().count(), report.nodes.len());
        assert_eq!(report.nested_json.label, "Playbook Output");

        assert_eq!(report.top_20_time_consuming_tasks.len(), 1);
        let top = &report.top_20_time_consuming_tasks[0];
        assert_eq!(top.play, "Setup");
        assert_eq!(top.task, "install pkg");
        assert_eq!(top.duration_seconds, 2.5);
    }

    #[test]
    fn report_serializes_with_the_contract_keys() {
        let report = build_report(&parse_text(SAMPLE), DEFAULT_TOP_N);
        let json = serde_json::to_value(&report).unwrap();

        let object = json.as_object().unwrap();
        for key in [
            "nodes",
            "edges",
            "nested_json",
            "markdown",
            "status_meanings",
            "top_20_time_consuming_tasks",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(json["status_meanings"]["fatal"], "Task failed");
        assert_eq!(json["top_20_time_consuming_tasks"][0]["duration_seconds"], 2.5);
    }

    #[test]
    fn empty_input_still_produces_the_full_shape() {
        let report = build_report(&parse_text(""), DEFAULT_TOP_N);
        assert_eq!(report.nodes.len(), 1);
        assert_eq!(report.edges.len(), 0);
        assert_eq!(report.markdown, "- Playbook Output");
        assert_eq!(report.top_20_time_consuming_tasks.len(), 0);
        assert_eq!(report.status_meanings, StatusMeanings::default());
    }

    #[test]
    fn untimed_tasks_stay_in_the_tree_but_not_the_ranking() {
        let log = "PLAY [p] ***\nTASK [timed] ***\nok: [h] (0:00:01.000000)\nTASK [quiet] ***\n";
        let report = build_report(&parse_text(log), DEFAULT_TOP_N);

        assert!(report.markdown.contains("- 02. quiet"));
        assert_eq!(report.top_20_time_consuming_tasks.len(), 1);
        assert_eq!(report.top_20_time_consuming_tasks[0].task, "timed");
    }

    #[test]
    fn ranking_depth_follows_the_request() {
        let mut log = String::from("PLAY [p] ***\n");
        for n in 0..5 {
            log.push_str(&format!("TASK [t{n}] ***\nok: [h] (0:00:0{n}.000000)\n"));
        }
        let report = build_report(&parse_text(&log), 2);
        assert_eq!(report.top_20_time_consuming_tasks.len(), 2);
        assert_eq!(report.top_20_time_consuming_tasks[0].task, "t4");
    }
}
