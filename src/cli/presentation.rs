//! CLI presentation: text and json formatters for seal results.

use crate::cli::parse::OutputFormat;
use crate::error::ApiError;
use crate::tree::hasher::HashAlgorithm;
use crate::tree::node::Node;
use comfy_table::Table;

fn to_json(value: &serde_json::Value) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::OutputError(e.to_string()))
}

/// Format the root digests.
///
/// Plain text prints the bare seal hex so the output can be piped and
/// compared; `show_content` adds the content digest on a labelled line.
pub fn format_seal(
    root: &Node,
    algorithm: HashAlgorithm,
    show_content: bool,
    format: OutputFormat,
) -> Result<String, ApiError> {
    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "path": root.path().display().to_string(),
                "algorithm": algorithm.name(),
                "seal": root.seal_digest(),
                "content": root.content_digest(),
            });
            to_json(&out)
        }
        OutputFormat::Text if show_content => Ok(format!(
            "seal:    {}\ncontent: {}",
            root.seal_digest(),
            root.content_digest()
        )),
        OutputFormat::Text => Ok(root.seal_digest().to_hex()),
    }
}

/// Format every node of the tree in pre-order, root first.
pub fn format_tree(
    root: &Node,
    algorithm: HashAlgorithm,
    format: OutputFormat,
) -> Result<String, ApiError> {
    if format == OutputFormat::Json {
        let nodes: Vec<serde_json::Value> = root
            .iter()
            .map(|(depth, node)| {
                serde_json::json!({
                    "path": node.path().display().to_string(),
                    "depth": depth,
                    "kind": node.kind_label(),
                    "mode": format!("{:04o}", node.permissions()),
                    "content": node.content_digest(),
                    "seal": node.seal_digest(),
                })
            })
            .collect();
        let out = serde_json::json!({
            "algorithm": algorithm.name(),
            "seal": root.seal_digest(),
            "nodes": nodes,
        });
        return to_json(&out);
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Path", "Kind", "Mode", "Content", "Seal"]);
    for (depth, node) in root.iter() {
        let label = if depth == 0 {
            node.path().display().to_string()
        } else {
            format!("{}{}", "  ".repeat(depth), node.name().to_string_lossy())
        };
        table.add_row(vec![
            label,
            node.kind_label().to_string(),
            format!("{:04o}", node.permissions()),
            node.content_digest().to_hex(),
            node.seal_digest().to_hex(),
        ]);
    }
    Ok(format!(
        "{}\n{} seal: {}",
        table,
        algorithm.name(),
        root.seal_digest()
    ))
}
