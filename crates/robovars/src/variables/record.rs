//
// variables/record.rs
//
// Description of one discovered variable
//

use std::path::{Path, PathBuf};

use tower_lsp::lsp_types::{Location, Position, Range, Url};

use crate::syntax::Token;

/// Kind of a discovered variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Plain,
    /// Declared as a keyword argument
    Argument,
}

/// Where a variable came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableSource {
    /// Declared by a token of a parsed document
    Token { path: PathBuf, token: Token },
    /// Top-level key of a YAML variable file; `line` is 0 when unknown
    Yaml { path: PathBuf, line: u32 },
    /// Module-level binding of a Python variable file; `line` is 0 when unknown
    Python { path: PathBuf, line: u32 },
    /// Builtins, editor settings and argument files
    Static,
}

/// One discovered variable. `name` never carries sigils or braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRecord {
    pub name: String,
    /// Textual value shown as documentation; may be empty
    pub value_repr: String,
    pub kind: VariableKind,
    pub source: VariableSource,
}

impl VariableRecord {
    /// Record declared by `token`, whose value must already be the bare name.
    pub fn from_token(path: &Path, token: Token, value_repr: impl Into<String>) -> Self {
        Self {
            name: token.value.clone(),
            value_repr: value_repr.into(),
            kind: VariableKind::Plain,
            source: VariableSource::Token {
                path: path.to_path_buf(),
                token,
            },
        }
    }

    pub fn argument(path: &Path, token: Token) -> Self {
        Self {
            kind: VariableKind::Argument,
            ..Self::from_token(path, token, "")
        }
    }

    pub fn from_yaml(
        name: impl Into<String>,
        value_repr: impl Into<String>,
        path: &Path,
        line: u32,
    ) -> Self {
        Self {
            name: name.into(),
            value_repr: value_repr.into(),
            kind: VariableKind::Plain,
            source: VariableSource::Yaml {
                path: path.to_path_buf(),
                line,
            },
        }
    }

    pub fn from_python(
        name: impl Into<String>,
        value_repr: impl Into<String>,
        path: &Path,
        line: u32,
    ) -> Self {
        Self {
            name: name.into(),
            value_repr: value_repr.into(),
            kind: VariableKind::Plain,
            source: VariableSource::Python {
                path: path.to_path_buf(),
                line,
            },
        }
    }

    pub fn from_static(name: impl Into<String>, value_repr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_repr: value_repr.into(),
            kind: VariableKind::Plain,
            source: VariableSource::Static,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            VariableSource::Token { path, .. }
            | VariableSource::Yaml { path, .. }
            | VariableSource::Python { path, .. } => Some(path),
            VariableSource::Static => None,
        }
    }

    /// Definition location for go-to style consumers.
    pub fn location(&self) -> Option<Location> {
        let range = match &self.source {
            VariableSource::Token { token, .. } => Range::new(
                Position::new(token.line, token.col),
                Position::new(token.line, token.end_col),
            ),
            VariableSource::Yaml { line, .. } | VariableSource::Python { line, .. } => {
                Range::new(Position::new(*line, 0), Position::new(*line, 0))
            }
            VariableSource::Static => return None,
        };
        let uri = Url::from_file_path(self.path()?).ok()?;
        Some(Location::new(uri, range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TokenKind;

    #[test]
    fn test_argument_record_has_empty_value() {
        let token = Token::new(TokenKind::Argument, "arg", 3, 20);
        let record = VariableRecord::argument(Path::new("/ws/a.robot"), token);
        assert_eq!(record.kind, VariableKind::Argument);
        assert_eq!(record.name, "arg");
        assert!(record.value_repr.is_empty());
    }

    #[test]
    fn test_token_location() {
        let token = Token::new(TokenKind::Variable, "NAME", 4, 2);
        let record = VariableRecord::from_token(Path::new("/ws/a.robot"), token, "value");
        let location = record.location().unwrap();
        assert_eq!(location.range.start, Position::new(4, 2));
        assert_eq!(location.range.end, Position::new(4, 6));
    }

    #[test]
    fn test_static_has_no_location() {
        let record = VariableRecord::from_static("SPACE", " ");
        assert!(record.location().is_none());
        assert!(record.path().is_none());
    }
}
