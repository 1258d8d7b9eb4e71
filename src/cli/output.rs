//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, QuandaArgs};
use crate::error::Result;
use crate::graph::CandidateGraph;

/// Result structure for the `answer` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResult {
    pub question: String,
    /// `None` when the question was empty (no-result), as opposed to an
    /// empty list of answers.
    pub answers: Option<Vec<String>>,
    pub duration_ms: u64,
}

/// A node as printed by the `graph` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeView {
    pub content: String,
    pub explanation: usize,
}

/// An edge as printed by the `graph` command, with node contents instead
/// of arena indices.
#[derive(Debug, Serialize, Deserialize)]
pub struct EdgeView {
    pub from: String,
    pub relation: String,
    pub to: String,
}

/// Result structure for the `graph` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphResult {
    pub question: String,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl GraphResult {
    /// Snapshot a candidate graph for output.
    pub fn from_graph(question: &str, graph: &CandidateGraph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|n| NodeView {
                content: n.content.clone(),
                explanation: n.explanation,
            })
            .collect();
        let edges = graph
            .edges()
            .iter()
            .map(|e| EdgeView {
                from: graph.nodes()[e.from].content.clone(),
                relation: e.relation.clone(),
                to: graph.nodes()[e.to].content.clone(),
            })
            .collect();
        GraphResult {
            question: question.to_string(),
            nodes,
            edges,
        }
    }
}

/// Result structure for the `lookup` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResult {
    pub phrase: String,
    pub entities: Vec<String>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &QuandaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &QuandaArgs) -> Result<()> {
    if args.verbosity() > 0 && !message.is_empty() {
        println!("{message}");
    }

    let value = serde_json::to_value(result)?;
    match &value {
        serde_json::Value::Object(map) => {
            for (key, entry) in map {
                print_entry(key, entry, 0);
            }
        }
        other => println!("{other}"),
    }
    Ok(())
}

fn print_entry(key: &str, value: &serde_json::Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        serde_json::Value::Array(items) => {
            println!("{pad}{key}:");
            for item in items {
                match item {
                    serde_json::Value::Object(map) => {
                        let line: Vec<String> = map
                            .iter()
                            .map(|(k, v)| format!("{k}={}", render_scalar(v)))
                            .collect();
                        println!("{pad}  - {}", line.join("  "));
                    }
                    other => println!("{pad}  - {}", render_scalar(other)),
                }
            }
        }
        serde_json::Value::Object(map) => {
            println!("{pad}{key}:");
            for (k, v) in map {
                print_entry(k, v, indent + 1);
            }
        }
        other => println!("{pad}{key}: {}", render_scalar(other)),
    }
}

fn render_scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "none".to_string(),
        other => other.to_string(),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &QuandaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_result_uses_node_contents_for_edges() {
        use crate::graph::CandidateGraph;

        let mut graph = CandidateGraph::new();
        let s = graph.register_span(2);
        graph.add_node("http://e/A", 2, s);
        let snapshot = GraphResult::from_graph("a question", &graph);
        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(snapshot.nodes[0].content, "http://e/A");
        assert_eq!(snapshot.nodes[0].explanation, 2);
        assert!(snapshot.edges.is_empty());
    }
}
