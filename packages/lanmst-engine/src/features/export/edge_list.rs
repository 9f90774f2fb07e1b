//! Plain-text edge list
//!
//! ```text
//! Edge List (Node1 -- Node2 [Weight])
//! -----------------------------------
//! A -- B [4.0m]
//! ```

use lanmst_storage::GraphSnapshot;
use std::fmt::Write;

pub const EDGE_LIST_HEADER: &str = "Edge List (Node1 -- Node2 [Weight])";
const RULE_WIDTH: usize = 35;

/// Render every edge as `u -- v [<weight><unit>]`
pub fn to_edge_list_text(snapshot: &GraphSnapshot, unit: &str) -> String {
    let mut out = String::new();
    out.push_str(EDGE_LIST_HEADER);
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for edge in snapshot.edges() {
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "{} -- {} [{}{}]",
            edge.source,
            edge.target,
            format_weight(edge.weight),
            unit
        );
    }
    out
}

/// Integral weights keep one decimal (`4.0`), others print as-is (`2.5`)
pub fn format_weight(weight: f64) -> String {
    if weight.is_finite() && weight.fract() == 0.0 && weight.abs() < 1e16 {
        format!("{:.1}", weight)
    } else {
        format!("{}", weight)
    }
}
