//
// document.rs
//
// Source document with lazily derived representations
//

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::anyhow;
use indexmap::IndexMap;

use crate::parser_pool::with_parser;
use crate::syntax::{self, File, SectionKind, StatementKind, TokenKind};
use crate::variables::{normalize_robot_name, strip_sigils, VariableRecord};

/// A document of the workspace.
///
/// Each derived representation is computed at most once per instance; a
/// changed file gets a new instance.
#[derive(Debug)]
pub struct RobotDocument {
    path: PathBuf,
    text: String,
    ast: OnceLock<File>,
    variables: OnceLock<IndexMap<String, VariableRecord>>,
    yaml: OnceLock<Result<serde_yaml::Value, String>>,
    python: OnceLock<Option<tree_sitter::Tree>>,
}

impl RobotDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            ast: OnceLock::new(),
            variables: OnceLock::new(),
            yaml: OnceLock::new(),
            python: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Directory containing the document, substituted for `${CURDIR}`
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn ast(&self) -> &File {
        self.ast.get_or_init(|| syntax::parse(&self.text))
    }

    /// Variables declared in the variables sections, keyed by normalized name.
    /// A later declaration replaces the value of an earlier one.
    pub fn variables(&self) -> &IndexMap<String, VariableRecord> {
        self.variables.get_or_init(|| {
            let mut map = IndexMap::new();
            for section in self.ast().sections_of(SectionKind::Variables) {
                for stmt in section.statements() {
                    if stmt.kind != StatementKind::VariableDeclaration {
                        continue;
                    }
                    let Some(token) = stmt.get_token(TokenKind::Variable) else {
                        continue;
                    };
                    let (name, offset) = strip_sigils(&token.value);
                    if name.is_empty() {
                        continue;
                    }
                    let value = stmt
                        .arguments()
                        .map(|t| t.value.as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    let name_token = token.with_value(name, token.col + offset);
                    map.insert(
                        normalize_robot_name(name),
                        VariableRecord::from_token(&self.path, name_token, value),
                    );
                }
            }
            map
        })
    }

    /// Parsed YAML content, or the parse error message.
    pub fn yaml(&self) -> Result<&serde_yaml::Value, &str> {
        self.yaml
            .get_or_init(|| serde_yaml::from_str(&self.text).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(String::as_str)
    }

    /// Python syntax tree of the document.
    pub fn python_tree(&self) -> Option<&tree_sitter::Tree> {
        self.python
            .get_or_init(|| with_parser(|parser| parser.parse(&self.text, None)))
            .as_ref()
    }

    /// Last line and UTF-16 column where `contents` occurs.
    pub fn last_line_col_with_contents(&self, contents: &str) -> anyhow::Result<(u32, u32)> {
        for (line_no, line) in self.text.lines().enumerate().collect::<Vec<_>>().into_iter().rev() {
            if let Some(idx) = line.rfind(contents) {
                let col = line[..idx].encode_utf16().count() as u32;
                return Ok((line_no as u32, col));
            }
        }
        Err(anyhow!(
            "Unable to find '{}' in {}",
            contents,
            self.path.display()
        ))
    }

    /// Number of newlines in the source
    pub fn newline_count(&self) -> usize {
        self.text.matches('\n').count()
    }
}
