//! Flat graph form and its two derived shapes: nested tree and outline.

use serde::Serialize;
use std::collections::BTreeMap;

/// One vertex of the mindmap graph.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Node {
    pub id: String,
    pub label: String,
    /// Hover text; equals the label except on the root.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Directed parent-to-child connection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// The graph re-materialized as a tree for collapsible frontends.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NestedNode {
    pub id: String,
    pub label: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub children: Vec<NestedNode>,
}

/// Hang the flat graph from `root` as a tree.
///
/// Children attach in edge insertion order, so the tree preserves document
/// order. Edges pointing at unknown ids are dropped.
pub fn nest(root: &Node, nodes: &[Node], edges: &[Edge]) -> NestedNode {
    let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for edge in edges {
        children.entry(edge.from.as_str()).or_default().push(edge.to.as_str());
    }
    let by_id: BTreeMap<&str, &Node> = nodes.iter().map(|node| (node.id.as_str(), node)).collect();
    attach(root, &by_id, &children)
}

fn attach(
    node: &Node,
    by_id: &BTreeMap<&str, &Node>,
    children: &BTreeMap<&str, Vec<&str>>,
) -> NestedNode {
    let kids = children
        .get(node.id.as_str())
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(|id| by_id.get(id))
        .map(|child| attach(child, by_id, children))
        .collect();
    NestedNode {
        id: node.id.clone(),
        label: node.label.clone(),
        title: node.title.clone(),
        group: node.group.clone(),
        children: kids,
    }
}

/// Render the tree as a markdown outline, one `- label` bullet per node,
/// indented two spaces per depth level.
pub fn markdown_outline(root: &NestedNode) -> String {
    let mut lines = Vec::new();
    outline_into(root, 0, &mut lines);
    lines.join("\n")
}

fn outline_into(node: &NestedNode, depth: usize, lines: &mut Vec<String>) {
    lines.push(format!("{}- {}", "  ".repeat(depth), node.label));
    for child in &node.children {
        outline_into(child, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: &str, label: &str) -> Node {
        Node {
            id: id.to_string(),
            label: label.to_string(),
            title: label.to_string(),
            group: None,
        }
    }

    fn edge(from: &str, to: &str) -> Edge {
        Edge { from: from.to_string(), to: to.to_string() }
    }

    #[test]
    fn nest_preserves_edge_insertion_order() {
        let nodes = vec![node("r", "root"), node("b", "second"), node("a", "first")];
        let edges = vec![edge("r", "a"), edge("r", "b")];
        let tree = nest(&nodes[0], &nodes, &edges);

        assert_eq!(tree.label, "root");
        let labels: Vec<&str> = tree.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second"]);
    }

    #[test]
    fn nest_handles_deep_chains() {
        let nodes = vec![node("1", "a"), node("2", "b"), node("3", "c")];
        let edges = vec![edge("1", "2"), edge("2", "3")];
        let tree = nest(&nodes[0], &nodes, &edges);
        assert_eq!(tree.children[0].children[0].label, "c");
        assert_eq!(tree.children[0].children[0].children.len(), 0);
    }

    #[test]
    fn nest_drops_edges_to_unknown_ids() {
        let nodes = vec![node("r", "root")];
        let edges = vec![edge("r", "ghost")];
        let tree = nest(&nodes[0], &nodes, &edges);
        assert_eq!(tree.children.len(), 0);
    }

    #[test]
    fn outline_indents_two_spaces_per_level() {
        let nodes = vec![node("r", "root"), node("c", "child"), node("g", "grandchild")];
        let edges = vec![edge("r", "c"), edge("c", "g")];
        let tree = nest(&nodes[0], &nodes, &edges);
        assert_eq!(
            markdown_outline(&tree),
            "- root\n  - child\n    - grandchild"
        );
    }

    #[test]
    fn outline_has_one_line_per_node() {
        let nodes = vec![node("r", "root"), node("a", "a"), node("b", "b"), node("c", "c")];
        let edges = vec![edge("r", "a"), edge("r", "b"), edge("b", "c")];
        let tree = nest(&nodes[0], &nodes, &edges);
        assert_eq!(markdown_outline(&tree).lines().count(), nodes.len());
    }

    #[test]
    fn group_is_omitted_from_json_when_absent() {
        let with = Node { group: Some("task".to_string()), ..node("x", "X") };
        let without = node("y", "Y");
        let with_json = serde_json::to_string(&with).unwrap();
        let without_json = serde_json::to_string(&without).unwrap();
        assert!(with_json.contains("\"group\":\"task\""));
        assert!(!without_json.contains("group"));
    }
}
