//! Rendering of the link graph for the command line.

use notegraph_core::prelude::*;
use notegraph_core::to_json_string;
use notegraph_graph::LinkGraph;
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// Output format for the rendered graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed graph snapshot
    #[default]
    Json,
    /// One line per node and per edge
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!(
                "Unknown output format '{}'. Valid options: json, text",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Render the current graph state in `format`
pub fn render_graph(graph: &LinkGraph, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json_string(&graph.snapshot(), "graph snapshot"),
        OutputFormat::Text => Ok(render_text(graph)),
    }
}

fn render_text(graph: &LinkGraph) -> String {
    let mut out = String::new();
    let stats = graph.stats();
    let _ = writeln!(
        out,
        "{} documents, {} links ({} dangling)",
        stats.total_nodes, stats.total_edges, stats.dangling_edges
    );

    for node in graph.nodes() {
        let _ = writeln!(out, "{}  {}", node.label, node.path.display());
        for edge in graph.outgoing(&node.path) {
            match graph.node_by_id(&edge.target) {
                Some(target) => {
                    let _ = writeln!(out, "  -> {}", target.label);
                }
                None => {
                    let _ = writeln!(out, "  -> ? {}", short_id(&edge.target));
                }
            }
        }
    }
    out
}

fn short_id(id: &NodeId) -> &str {
    let s = id.as_str();
    &s[..s.len().min(12)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn sample_graph() -> LinkGraph {
        let mut graph = LinkGraph::new();
        graph.apply_document(
            Path::new("/ws/a.md"),
            Some("Alpha"),
            &[PathBuf::from("/ws/b.md"), PathBuf::from("/ws/gone.md")],
        );
        graph.apply_document(Path::new("/ws/b.md"), Some("Beta"), &[]);
        graph
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }

    #[test]
    fn test_render_json_snapshot() {
        let rendered = render_graph(&sample_graph(), OutputFormat::Json).unwrap();
        let snapshot: GraphSnapshot = serde_json::from_str(&rendered).unwrap();
        assert_eq!(snapshot, sample_graph().snapshot());
    }

    #[test]
    fn test_render_text() {
        let rendered = render_graph(&sample_graph(), OutputFormat::Text).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "2 documents, 2 links (1 dangling)");
        assert_eq!(lines[1], "Alpha  /ws/a.md");
        assert_eq!(lines[2], "  -> Beta");
        assert!(lines[3].starts_with("  -> ? "));
        assert_eq!(lines[4], "Beta  /ws/b.md");
    }
}
