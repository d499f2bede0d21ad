//
// variables/globals.rs
//
// Static variable sources: builtins, editor settings and argument files
//

use indexmap::IndexMap;

use super::normalize::{normalize_robot_name, strip_sigils};
use super::record::VariableRecord;
use crate::config::VariablesConfig;

/// Variables every suite sees at run time, with the value shown as documentation.
/// Values that depend on the executing suite are left empty.
fn builtin_table() -> Vec<(&'static str, String)> {
    let path_separator = if cfg!(windows) { ";" } else { ":" };
    vec![
        ("${CURDIR}", String::new()),
        ("${TEMPDIR}", std::env::temp_dir().display().to_string()),
        ("${EXECDIR}", String::new()),
        ("${/}", std::path::MAIN_SEPARATOR.to_string()),
        ("${:}", path_separator.to_string()),
        ("${\\n}", "\n".to_string()),
        ("${SPACE}", " ".to_string()),
        ("${True}", "True".to_string()),
        ("${False}", "False".to_string()),
        ("${None}", "None".to_string()),
        ("${null}", "None".to_string()),
        ("${EMPTY}", String::new()),
        ("@{EMPTY}", "[]".to_string()),
        ("&{EMPTY}", "{}".to_string()),
        ("${TEST NAME}", String::new()),
        ("@{TEST TAGS}", String::new()),
        ("${TEST DOCUMENTATION}", String::new()),
        ("${TEST STATUS}", String::new()),
        ("${TEST MESSAGE}", String::new()),
        ("${PREV TEST NAME}", String::new()),
        ("${PREV TEST STATUS}", String::new()),
        ("${PREV TEST MESSAGE}", String::new()),
        ("${SUITE NAME}", String::new()),
        ("${SUITE SOURCE}", String::new()),
        ("${SUITE DOCUMENTATION}", String::new()),
        ("&{SUITE METADATA}", String::new()),
        ("${SUITE STATUS}", String::new()),
        ("${SUITE MESSAGE}", String::new()),
        ("${KEYWORD STATUS}", String::new()),
        ("${KEYWORD MESSAGE}", String::new()),
        ("${LOG LEVEL}", String::new()),
        ("${OUTPUT DIR}", String::new()),
        ("${OUTPUT FILE}", String::new()),
        ("${LOG FILE}", String::new()),
        ("${REPORT FILE}", String::new()),
        ("${DEBUG FILE}", String::new()),
        ("&{OPTIONS}", String::new()),
    ]
}

/// Normalized-name maps of the sources shared by every document.
///
/// Built once per configuration and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct GlobalVariables {
    pub settings: IndexMap<String, VariableRecord>,
    pub builtins: IndexMap<String, VariableRecord>,
    pub argument_files: IndexMap<String, VariableRecord>,
}

impl GlobalVariables {
    pub fn from_config(config: &VariablesConfig) -> Self {
        let mut settings = IndexMap::new();
        for (raw, value) in &config.variables {
            let (name, _) = strip_sigils(raw);
            settings.insert(
                normalize_robot_name(name),
                VariableRecord::from_static(name, value.clone()),
            );
        }

        let mut builtins = IndexMap::new();
        for (raw, value) in builtin_table() {
            let (name, _) = strip_sigils(raw);
            builtins
                .entry(normalize_robot_name(name))
                .or_insert_with(|| VariableRecord::from_static(name, value));
        }

        let mut argument_files = IndexMap::new();
        for path in &config.arguments_files {
            match std::fs::read_to_string(path) {
                Ok(text) => {
                    for (name, value) in parse_argument_file(&text) {
                        argument_files.insert(
                            normalize_robot_name(&name),
                            VariableRecord::from_static(name, value),
                        );
                    }
                }
                Err(e) => log::warn!("Failed to read arguments file {}: {}", path.display(), e),
            }
        }

        Self {
            settings,
            builtins,
            argument_files,
        }
    }
}

/// Extract `--variable NAME:value` options from an argument file.
///
/// Supported forms are `--variable NAME:value`, `--variable=NAME:value` and
/// `-v NAME:value`. Lines starting with `#` are comments.
pub fn parse_argument_file(text: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let spec = if let Some(rest) = line.strip_prefix("--variable=") {
            rest
        } else if let Some(rest) = line
            .strip_prefix("--variable ")
            .or_else(|| line.strip_prefix("-v "))
        {
            rest.trim_start()
        } else {
            continue;
        };

        if let Some((name, value)) = spec.split_once(':') {
            let name = name.trim();
            if !name.is_empty() {
                out.push((name.to_string(), value.to_string()));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_argument_file_forms() {
        let text = "\
# comment
--variable HOST:localhost
--variable=PORT:8080
-v  URL:http://x:1/
--outputdir out
-v NOCOLON
";
        let vars = parse_argument_file(text);
        assert_eq!(
            vars,
            vec![
                ("HOST".to_string(), "localhost".to_string()),
                ("PORT".to_string(), "8080".to_string()),
                ("URL".to_string(), "http://x:1/".to_string()),
            ]
        );
    }

    #[test]
    fn test_builtins_are_keyed_by_normalized_name() {
        let globals = GlobalVariables::from_config(&VariablesConfig::default());
        let space = globals.builtins.get("space").unwrap();
        assert_eq!(space.name, "SPACE");
        assert_eq!(space.value_repr, " ");
        assert!(globals.builtins.contains_key("testname"));
        // `${EMPTY}` wins over the list and dict forms
        assert_eq!(globals.builtins.get("empty").unwrap().value_repr, "");
    }

    #[test]
    fn test_settings_and_argument_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "--variable BROWSER:firefox").unwrap();

        let mut config = VariablesConfig::default();
        config
            .variables
            .insert("${ENV NAME}".to_string(), "qa".to_string());
        config.arguments_files.push(file.path().to_path_buf());
        config.arguments_files.push("/nonexistent/args.txt".into());

        let globals = GlobalVariables::from_config(&config);
        assert_eq!(globals.settings.get("envname").unwrap().name, "ENV NAME");
        assert_eq!(
            globals.argument_files.get("browser").unwrap().value_repr,
            "firefox"
        );
        assert!(!globals.settings.contains_key("browser"));
    }
}
