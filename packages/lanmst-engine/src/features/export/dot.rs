//! Graphviz DOT hand-off for rendering collaborators
//!
//! Every cable run is emitted with its weight as label; spanning-tree edges
//! are drawn bold, the rest dashed.

use lanmst_storage::GraphSnapshot;
use std::fmt::Write;

use super::edge_list::format_weight;
use crate::features::spanning_tree::MstResult;

const TREE_STYLE: &str = "color=\"#e76f51\", penwidth=3";
const OTHER_STYLE: &str = "color=\"#adb5bd\", style=dashed";

/// Render the network as an undirected DOT graph
///
/// With `mst`, tree edges are highlighted and the total cost goes in the
/// graph label.
pub fn to_dot(snapshot: &GraphSnapshot, mst: Option<&MstResult>) -> String {
    let mut out = String::from("graph lan {\n");
    if let Some(tree) = mst {
        let _ = writeln!(
            out,
            "    label=\"Total Cost: {}\";",
            format_weight(tree.total_cost)
        );
    }

    for label in snapshot.nodes() {
        let _ = writeln!(out, "    {};", quote(label));
    }

    for edge in snapshot.edges() {
        let style = match mst {
            Some(tree) if tree.contains(&edge.source, &edge.target) => TREE_STYLE,
            Some(_) => OTHER_STYLE,
            None => "",
        };
        let separator = if style.is_empty() { "" } else { ", " };
        let _ = writeln!(
            out,
            "    {} -- {} [label=\"{}\"{}{}];",
            quote(&edge.source),
            quote(&edge.target),
            format_weight(edge.weight),
            separator,
            style
        );
    }

    out.push_str("}\n");
    out
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
