//! Renderers for [`GraphExport`]. The graph itself knows nothing about
//! these formats.

use crate::graph::GraphExport;
use std::fs;
use std::io;
use std::path::Path;

/// vis-network compatible `{nodes, edges}` document.
pub fn to_visjs_json(export: &GraphExport) -> serde_json::Value {
    let nodes: Vec<serde_json::Value> = export
        .nodes
        .iter()
        .map(|n| {
            serde_json::json!({
                "id": n.id,
                "label": n.label,
                "title": n.title,
                "shape": n.shape,
                "color": n.color,
                "size": n.size,
            })
        })
        .collect();

    let edges: Vec<serde_json::Value> = export
        .edges
        .iter()
        .map(|e| serde_json::json!({ "from": e.from, "to": e.to }))
        .collect();

    serde_json::json!({
        "nodes": nodes,
        "edges": edges
    })
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Standalone interactive page backed by vis-network.
pub fn to_html(export: &GraphExport, title: &str) -> String {
    // `</` inside an inline script would end it early
    let graph_data = to_visjs_json(export).to_string().replace("</", "<\\/");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script type="text/javascript" src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
    <style>
        body {{ margin: 0; padding: 0; font-family: system-ui, sans-serif; }}
        #graph {{ width: 100%; height: 800px; }}
        #config {{ padding: 10px; }}
    </style>
</head>
<body>
    <div id="graph"></div>
    <div id="config"></div>
    <script>
        const data = {graph_data};

        const options = {{
            nodes: {{ font: {{ size: 14, face: 'system-ui' }} }},
            edges: {{ smooth: false, color: {{ inherit: 'from' }} }},
            physics: {{
                stabilization: {{ iterations: 150 }},
                barnesHut: {{ gravitationalConstant: -8000, springLength: 120 }}
            }},
            interaction: {{ hover: true, tooltipDelay: 100 }},
            configure: {{
                enabled: true,
                filter: 'physics',
                container: document.getElementById('config')
            }}
        }};

        const container = document.getElementById('graph');
        new vis.Network(container, data, options);
    </script>
</body>
</html>"#,
        title = escape_html(title),
        graph_data = graph_data
    )
}

/// Graphviz source; undirected, so edges use `--`.
pub fn to_dot(export: &GraphExport) -> String {
    let quote = |s: &str| s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n");

    let mut dot = String::from("graph sentiment_graph {\n");
    dot.push_str("    layout=neato;\n    overlap=false;\n\n");

    for node in &export.nodes {
        let shape = match node.shape.as_str() {
            "dot" => "circle",
            "square" => "box",
            other => other,
        };
        dot.push_str(&format!(
            "    \"{}\" [label=\"{}\", tooltip=\"{}\", shape={}, style=filled, fillcolor=\"{}\"];\n",
            quote(&node.id),
            quote(&node.label),
            quote(&node.title),
            shape,
            node.color
        ));
    }

    dot.push('\n');

    for edge in &export.edges {
        dot.push_str(&format!("    \"{}\" -- \"{}\";\n", quote(&edge.from), quote(&edge.to)));
    }

    dot.push_str("}\n");
    dot
}

pub fn write_html(export: &GraphExport, title: &str, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_html(export, title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::post::fixtures::post;
    use crate::sentiment::FixedClassifier;

    fn export() -> GraphExport {
        let mut builder = GraphBuilder::new("AI <ethics>", FixedClassifier::new()).unwrap();
        builder
            .build(&[post("1", "closing </script> tag", "alice", &[])])
            .unwrap();
        builder.export()
    }

    #[test]
    fn test_visjs_json_shape() {
        let json = to_visjs_json(&export());
        assert_eq!(json["nodes"].as_array().unwrap().len(), 6);
        assert_eq!(json["edges"].as_array().unwrap().len(), 5);
        assert_eq!(json["edges"][0]["from"], "AI <ethics>");
        assert_eq!(json["edges"][0]["to"], "Positive");
    }

    #[test]
    fn test_html_escapes_title_and_script() {
        let html = to_html(&export(), "AI <ethics>");
        assert!(html.contains("<title>AI &lt;ethics&gt;</title>"));
        assert!(!html.contains("closing </script>"));
        assert!(html.contains("vis.Network"));
    }

    #[test]
    fn test_dot_lists_nodes_and_edges() {
        let dot = to_dot(&export());
        assert!(dot.starts_with("graph sentiment_graph {"));
        assert!(dot.contains("\"post_1\" [label=\"Post\""));
        assert!(dot.contains("\"Neutral\" -- \"post_1\";"));
        assert!(dot.contains("shape=circle"));
    }

    #[test]
    fn test_write_html() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("graph.html");
        write_html(&export(), "AI", &path).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("<!DOCTYPE html>"));
    }
}
