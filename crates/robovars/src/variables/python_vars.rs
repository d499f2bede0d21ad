//
// variables/python_vars.rs
//
// Module-level variables of a Python variable file
//

use anyhow::anyhow;
use tree_sitter::Node;

use super::record::VariableRecord;
use crate::document::RobotDocument;

/// Prefixes marking list and dict variables in Python variable files
const TYPED_PREFIXES: [&str; 2] = ["LIST__", "DICT__"];

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

/// `NAME = value` and `NAME: T = value` at module level. Private names
/// (leading underscore) are skipped.
pub fn load_python_variables<F>(
    doc: &RobotDocument,
    accepts: F,
) -> anyhow::Result<Vec<VariableRecord>>
where
    F: Fn(&str) -> bool,
{
    let tree = doc
        .python_tree()
        .ok_or_else(|| anyhow!("Unable to parse {}", doc.path().display()))?;
    let source = doc.text();
    let root = tree.root_node();

    let mut records = Vec::new();
    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        if statement.kind() != "expression_statement" {
            continue;
        }
        let Some(assignment) = statement.named_child(0) else {
            continue;
        };
        if assignment.kind() != "assignment" {
            continue;
        }
        let (Some(left), Some(right)) = (
            assignment.child_by_field_name("left"),
            assignment.child_by_field_name("right"),
        ) else {
            continue;
        };
        if left.kind() != "identifier" {
            continue;
        }

        let raw_name = node_text(left, source);
        if raw_name.starts_with('_') {
            continue;
        }
        let name = TYPED_PREFIXES
            .iter()
            .find_map(|prefix| raw_name.strip_prefix(prefix))
            .unwrap_or(raw_name);
        if name.is_empty() || !accepts(name) {
            continue;
        }

        records.push(VariableRecord::from_python(
            name,
            node_text(right, source),
            doc.path(),
            left.start_position().row as u32,
        ));
    }
    Ok(records)
}
