//! Deterministic fixture workspace generator for benchmarks and tests.
//!
//! Generates synthetic Robot Framework workspaces with controlled
//! characteristics: a suite file importing a chain of resource files, each
//! declaring variables and calling `Set Suite Variable`, plus YAML variable
//! files imported from the suite.
//!
//! All output is deterministic, so benchmarks are reproducible.

use std::fmt::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the generated suite file
pub const SUITE_FILE: &str = "suite.robot";

/// Configuration for generating a fixture workspace.
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// Number of `resource_N.resource` files
    pub resource_count: usize,
    /// `resource_N` imports `resource_N+1` for N below this depth
    pub resource_chain_depth: usize,
    pub variables_per_file: usize,
    pub setters_per_file: usize,
    /// Number of `vars_N.yaml` files imported by the suite
    pub yaml_files: usize,
    pub yaml_entries_per_file: usize,
}

impl FixtureConfig {
    /// Small workspace: 5 resources in a chain of 3, one YAML file.
    pub fn small() -> Self {
        Self {
            resource_count: 5,
            resource_chain_depth: 3,
            variables_per_file: 5,
            setters_per_file: 1,
            yaml_files: 1,
            yaml_entries_per_file: 5,
        }
    }

    /// Medium workspace: 30 resources in a chain of 10.
    pub fn medium() -> Self {
        Self {
            resource_count: 30,
            resource_chain_depth: 10,
            variables_per_file: 10,
            setters_per_file: 2,
            yaml_files: 3,
            yaml_entries_per_file: 20,
        }
    }

    /// Large workspace: 100 resources in a chain of 40.
    pub fn large() -> Self {
        Self {
            resource_count: 100,
            resource_chain_depth: 40,
            variables_per_file: 20,
            setters_per_file: 3,
            yaml_files: 5,
            yaml_entries_per_file: 50,
        }
    }
}

fn generate_resource_content(index: usize, config: &FixtureConfig) -> String {
    let mut content = String::new();

    if index < config.resource_chain_depth && index + 1 < config.resource_count {
        content.push_str("*** Settings ***\n");
        writeln!(content, "Resource    resource_{}.resource", index + 1).unwrap();
        content.push('\n');
    }

    content.push_str("*** Variables ***\n");
    for var_i in 0..config.variables_per_file {
        writeln!(content, "${{RES_{}_{}}}    value {}", index, var_i, var_i).unwrap();
    }
    content.push('\n');

    content.push_str("*** Keywords ***\n");
    writeln!(content, "Setup Resource {}", index).unwrap();
    content.push_str("    [Arguments]    ${arg}\n");
    for setter_i in 0..config.setters_per_file {
        writeln!(
            content,
            "    Set Suite Variable    ${{SUITE_{}_{}}}    ${{arg}}",
            index, setter_i
        )
        .unwrap();
    }
    content.push_str("    No Operation\n");
    content
}

fn generate_yaml_content(index: usize, config: &FixtureConfig) -> String {
    let mut content = String::new();
    for entry_i in 0..config.yaml_entries_per_file {
        writeln!(content, "YAML_{}_{}: entry {}", index, entry_i, entry_i).unwrap();
    }
    content
}

fn generate_suite_content(config: &FixtureConfig) -> String {
    let mut content = String::from("*** Settings ***\n");
    if config.resource_count > 0 {
        content.push_str("Resource    resource_0.resource\n");
    }
    for yaml_i in 0..config.yaml_files {
        writeln!(content, "Variables    vars_{}.yaml", yaml_i).unwrap();
    }
    content.push_str("\n*** Test Cases ***\nGenerated\n");
    content.push_str("    ${local}=    Set Variable    1\n");
    content.push_str("    Log    ${\n");
    content
}

/// Line and UTF-16 column of the cursor inside the open `${` of the suite file.
pub fn suite_cursor(config: &FixtureConfig) -> (u32, u32) {
    let line = generate_suite_content(config).lines().count() as u32 - 1;
    (line, 13)
}

/// Path of the suite file inside a generated workspace.
pub fn suite_path(dir: &Path) -> PathBuf {
    dir.join(SUITE_FILE)
}

/// Create a temporary fixture workspace from the given configuration.
///
/// The directory is cleaned up when the `TempDir` is dropped. Calling this
/// twice with the same `FixtureConfig` produces byte-identical files.
pub fn create_fixture_workspace(config: &FixtureConfig) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for fixture workspace");
    write_fixture_workspace(temp_dir.path(), config);
    temp_dir
}

/// Write fixture files into an existing directory.
pub fn write_fixture_workspace(dir: &Path, config: &FixtureConfig) {
    let mut files = vec![(SUITE_FILE.to_string(), generate_suite_content(config))];
    for i in 0..config.resource_count {
        files.push((
            format!("resource_{}.resource", i),
            generate_resource_content(i, config),
        ));
    }
    for i in 0..config.yaml_files {
        files.push((format!("vars_{}.yaml", i), generate_yaml_content(i, config)));
    }

    for (filename, content) in files {
        std::fs::write(dir.join(&filename), &content)
            .unwrap_or_else(|e| panic!("Failed to write fixture file {}: {}", filename, e));
    }
}
