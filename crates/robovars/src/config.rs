//
// config.rs
//
// Configuration for variable resolution
//

use std::path::{Path, PathBuf};

use anyhow::Context;
use indexmap::IndexMap;
use serde_json::Value;

/// Default cost bound for the YAML line-number search
pub const DEFAULT_YAML_LINE_SEARCH_BUDGET: usize = 200;

/// Variable resolution configuration
#[derive(Debug, Clone, PartialEq)]
pub struct VariablesConfig {
    /// `robot.variables`: user supplied values, by name as written
    pub variables: IndexMap<String, String>,
    /// Argument files whose `--variable` options contribute static variables
    pub arguments_files: Vec<PathBuf>,
    /// Extra directories searched for relative import targets
    pub python_path: Vec<PathBuf>,
    /// Directory substituted for `${EXECDIR}`; the process cwd when unset
    pub workspace_root: Option<PathBuf>,
    /// YAML line numbers are only searched when `lines * entries` stays under this
    pub yaml_line_search_budget: usize,
}

impl Default for VariablesConfig {
    fn default() -> Self {
        Self {
            variables: IndexMap::new(),
            arguments_files: Vec::new(),
            python_path: Vec::new(),
            workspace_root: None,
            yaml_line_search_budget: DEFAULT_YAML_LINE_SEARCH_BUDGET,
        }
    }
}

impl VariablesConfig {
    /// Parse configuration from editor settings.
    ///
    /// Accepts the nested shape (`{"robot": {"variables": {...}}}`), the dotted
    /// shape (`{"robot.variables": {...}}`) and the bare shape
    /// (`{"variables": {...}}`). Unknown keys and values of the wrong type are
    /// ignored.
    ///
    /// ```
    /// use robovars::config::VariablesConfig;
    ///
    /// let settings = serde_json::json!({
    ///     "robot": {
    ///         "variables": { "ENV": "staging" },
    ///         "pythonpath": ["/opt/libs"]
    ///     }
    /// });
    /// let config = VariablesConfig::from_settings(&settings);
    /// assert_eq!(config.variables.get("ENV").map(String::as_str), Some("staging"));
    /// assert_eq!(config.python_path.len(), 1);
    /// ```
    pub fn from_settings(settings: &Value) -> Self {
        let mut config = Self::default();
        let lookup = |keys: &[&str]| setting(settings, keys);

        if let Some(vars) = lookup(&["variables"]).and_then(|v| v.as_object()) {
            for (name, value) in vars {
                config.variables.insert(name.clone(), value_to_string(value));
            }
        }
        if let Some(v) = lookup(&["argumentsFiles", "loadVariablesFromArgumentsFile"]) {
            config.arguments_files = path_list(v);
        }
        if let Some(v) = lookup(&["pythonPath", "pythonpath"]) {
            config.python_path = path_list(v);
        }
        if let Some(v) = lookup(&["workspaceRoot"]).and_then(|v| v.as_str()) {
            if !v.is_empty() {
                config.workspace_root = Some(PathBuf::from(v));
            }
        }
        if let Some(v) = lookup(&["yamlLineSearchBudget"]).and_then(|v| v.as_u64()) {
            config.yaml_line_search_budget = v as usize;
        }

        log::debug!("Variables configuration loaded:");
        log::debug!("  variables: {}", config.variables.len());
        log::debug!("  arguments_files: {:?}", config.arguments_files);
        log::debug!("  python_path: {:?}", config.python_path);
        log::debug!("  workspace_root: {:?}", config.workspace_root);
        log::debug!(
            "  yaml_line_search_budget: {}",
            config.yaml_line_search_budget
        );

        config
    }

    /// Load configuration from a JSON file in any of the settings shapes.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let settings: Value = serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON in config file {}", path.display()))?;
        Ok(Self::from_settings(&settings))
    }

    /// `${EXECDIR}` replacement
    pub fn exec_dir(&self) -> Option<PathBuf> {
        self.workspace_root
            .clone()
            .or_else(|| std::env::current_dir().ok())
    }
}

/// First of `keys` found under `robot`, as `robot.<key>`, or at the top level.
fn setting<'a>(settings: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let nested = settings.get("robot");
    keys.iter().find_map(|key| {
        nested
            .and_then(|robot| robot.get(*key))
            .or_else(|| settings.get(format!("robot.{}", key)))
            .or_else(|| settings.get(*key))
    })
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A single path string, a `os.pathsep` separated list or a JSON array.
fn path_list(value: &Value) -> Vec<PathBuf> {
    let valid = |s: &&str| !s.is_empty() && !s.contains('\0');
    match value {
        Value::String(s) => std::env::split_paths(s)
            .filter(|p| !p.as_os_str().is_empty())
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|p| p.as_str())
            .filter(valid)
            .map(PathBuf::from)
            .collect(),
        _ => Vec::new(),
    }
}
