//
// variables/variable_files.rs
//
// Loading of Python and YAML variable files
//

use std::path::Path;

use anyhow::{anyhow, bail};
use serde_yaml::Value;

use super::collector::VariablesCollector;
use super::python_vars::load_python_variables;
use super::record::VariableRecord;
use crate::document::RobotDocument;

/// Format of a variable file, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableFileFormat {
    Python,
    Yaml,
}

impl VariableFileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "py" => Some(Self::Python),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Emit the variables of a variable file. Failures are logged and the file
/// contributes nothing.
pub fn load(
    doc: &RobotDocument,
    line_search_budget: usize,
    collector: &mut dyn VariablesCollector,
) {
    let result = {
        let accepts = |name: &str| collector.accepts(name);
        match VariableFileFormat::from_path(doc.path()) {
            Some(VariableFileFormat::Python) => load_python_variables(doc, accepts),
            Some(VariableFileFormat::Yaml) => load_yaml(doc, line_search_budget, accepts),
            None => Err(anyhow!("Unsupported variable file type")),
        }
    };

    match result {
        Ok(records) => {
            log::trace!(
                "Loaded {} variables from {}",
                records.len(),
                doc.path().display()
            );
            for record in records {
                collector.on_variable(record);
            }
        }
        Err(e) => log::warn!(
            "Failed to load variables from {}: {}",
            doc.path().display(),
            e
        ),
    }
}

fn key_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_repr(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other)
            .or_else(|_| serde_yaml::to_string(other).map(|s| s.trim_end().to_string()))
            .unwrap_or_default(),
    }
}

/// Top-level keys of a YAML mapping. Lines are located by text search only
/// when `lines * entries` stays within `line_search_budget`.
pub fn load_yaml<F>(
    doc: &RobotDocument,
    line_search_budget: usize,
    accepts: F,
) -> anyhow::Result<Vec<VariableRecord>>
where
    F: Fn(&str) -> bool,
{
    let value = doc.yaml().map_err(|e| anyhow!("{}", e))?;
    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(Vec::new()),
        _ => bail!("Expected a mapping at the top level"),
    };

    let search_lines = doc.newline_count().saturating_mul(mapping.len()) <= line_search_budget;

    let mut records = Vec::new();
    for (key, value) in mapping {
        let Some(name) = key_name(key) else {
            log::debug!("Skipping non-scalar key in {}", doc.path().display());
            continue;
        };
        if !accepts(&name) {
            continue;
        }
        let line = if search_lines {
            doc.last_line_col_with_contents(&name)
                .map(|(line, _)| line)
                .unwrap_or(0)
        } else {
            0
        };
        records.push(VariableRecord::from_yaml(
            name,
            value_repr(value),
            doc.path(),
            line,
        ));
    }
    Ok(records)
}
