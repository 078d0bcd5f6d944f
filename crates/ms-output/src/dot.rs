//! Graphviz export of a [`TransitionGraph`].
//!
//! Terminal states are drawn as double circles, contingent transitions as
//! dashed edges, and the initial state gets a bold outline.

use std::io::Write;

use ms_graph::TransitionGraph;

use crate::OutputResult;

/// Write `graph` as a Graphviz `digraph` to `out`.
///
/// Nodes appear in registration order, edges in transition-id order, so the
/// output is stable for a given graph.
pub fn write_dot<C, W: Write>(graph: &TransitionGraph<C>, mut out: W) -> OutputResult<()> {
    writeln!(out, "digraph transitions {{")?;
    writeln!(out, "    rankdir=LR;")?;
    for state in graph.states() {
        let shape = if graph.is_terminal(state.id()) { "doublecircle" } else { "circle" };
        let style = if state.id() == graph.initial_state() { ", style=bold" } else { "" };
        writeln!(out, "    \"{}\" [shape={shape}{style}];", escape(state.name()))?;
    }
    for t in graph.transitions() {
        let dashed = if t.is_contingent() { ", style=dashed" } else { "" };
        writeln!(
            out,
            "    \"{}\" -> \"{}\" [label=\"{}\"{dashed}];",
            escape(graph.state_name(t.from())),
            escape(graph.state_name(t.to())),
            escape(t.label()),
        )?;
    }
    writeln!(out, "}}")?;
    out.flush()?;
    Ok(())
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
