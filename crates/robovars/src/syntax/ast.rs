//
// syntax/ast.rs
//
// Document model consumed by variable resolution
//

use crate::variables::normalize_robot_name;

/// Classification of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `*** Section ***` header
    Header,
    /// Keyword / test case name, or the target of an import
    Name,
    /// Keyword being called
    Keyword,
    Argument,
    /// Assignment target (`${x}=` before a call, loop variable, `VAR` name)
    Assign,
    /// Declared variable in the variables section
    Variable,
    /// Setting name (`Resource`, `[Arguments]`, ...)
    Setting,
    /// Control marker (`FOR`, `IN`, `IF`, `END`, `VAR`, ...)
    Control,
}

/// A single-line cell with its location.
///
/// Lines are 0-based, columns are 0-based UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
    pub col: u32,
    pub end_col: u32,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, line: u32, col: u32) -> Self {
        let value = value.into();
        let end_col = col + value.encode_utf16().count() as u32;
        Self {
            kind,
            value,
            line,
            col,
            end_col,
        }
    }

    /// Copy of this token with a different value, starting at `col`.
    pub fn with_value(&self, value: impl Into<String>, col: u32) -> Self {
        Self::new(self.kind, value, self.line, col)
    }

    pub fn contains(&self, line: u32, col: u32) -> bool {
        self.line == line && self.col <= col && col <= self.end_col
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    KeywordCall,
    /// `[Arguments]` of a keyword
    Arguments,
    /// `[Setup]`, `[Teardown]`, `Suite Setup`, `Test Teardown`, ...
    FixtureSetting,
    ResourceImport,
    VariablesImport,
    LibraryImport,
    VariableDeclaration,
    ForHeader,
    /// `IF` / `ELSE IF` / `ELSE` / `WHILE` / `TRY` / `EXCEPT` / `FINALLY` / `END`
    ControlHeader,
    /// Inline `VAR` declaration
    Var,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    pub tokens: Vec<Token>,
}

impl Statement {
    pub fn new(kind: StatementKind, tokens: Vec<Token>) -> Self {
        Self { kind, tokens }
    }

    pub fn first_line(&self) -> u32 {
        self.tokens.first().map_or(0, |t| t.line)
    }

    pub fn last_line(&self) -> u32 {
        self.tokens.last().map_or(0, |t| t.line)
    }

    /// First column of the statement on its first line
    pub fn col(&self) -> u32 {
        self.tokens.first().map_or(0, |t| t.col)
    }

    pub fn end_col(&self) -> u32 {
        self.tokens.last().map_or(0, |t| t.end_col)
    }

    pub fn get_token(&self, kind: TokenKind) -> Option<&Token> {
        self.tokens.iter().find(|t| t.kind == kind)
    }

    pub fn tokens_of(&self, kind: TokenKind) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(move |t| t.kind == kind)
    }

    pub fn keyword(&self) -> Option<&Token> {
        self.get_token(TokenKind::Keyword)
    }

    pub fn arguments(&self) -> impl Iterator<Item = &Token> {
        self.tokens_of(TokenKind::Argument)
    }

    /// Source text reconstructed from all token values joined by a single space.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.value.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.first_line() <= line && line <= self.last_line()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Keyword,
    TestCase,
    For,
    While,
    If,
    Try,
}

impl BlockKind {
    /// Keyword and test-case definitions delimit local variable scope.
    pub fn is_definition(self) -> bool {
        matches!(self, BlockKind::Keyword | BlockKind::TestCase)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Definition name for keywords and test cases
    pub name: Option<Token>,
    /// Opening statement for control blocks (`FOR ...`, `IF ...`)
    pub header: Option<Statement>,
    pub body: Vec<Item>,
    pub start_line: u32,
    pub end_line: u32,
}

impl Block {
    pub fn new(kind: BlockKind, start_line: u32) -> Self {
        Self {
            kind,
            name: None,
            header: None,
            body: Vec::new(),
            start_line,
            end_line: start_line,
        }
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    /// Every statement in this block, headers of nested blocks included, in
    /// document order.
    pub fn statements(&self) -> Vec<&Statement> {
        let mut out = Vec::new();
        if let Some(header) = &self.header {
            out.push(header);
        }
        collect_statements(&self.body, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Statement(Statement),
    Block(Block),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Content before the first section header
    Implicit,
    Settings,
    Variables,
    TestCases,
    Keywords,
    Comments,
    Unknown,
}

impl SectionKind {
    /// Classify a header line such as `*** Test Cases ***`.
    pub fn from_header(header: &str) -> Self {
        let trimmed = header.trim_matches(|c: char| c == '*' || c.is_whitespace());
        let name = normalize_robot_name(trimmed);
        match name.as_str() {
            "settings" | "setting" => SectionKind::Settings,
            "variables" | "variable" => SectionKind::Variables,
            "testcases" | "testcase" | "tasks" | "task" => SectionKind::TestCases,
            "keywords" | "keyword" => SectionKind::Keywords,
            "comments" | "comment" => SectionKind::Comments,
            _ => SectionKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub header: Option<Token>,
    pub body: Vec<Item>,
    pub start_line: u32,
    pub end_line: u32,
}

impl Section {
    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    pub fn statements(&self) -> Vec<&Statement> {
        let mut out = Vec::new();
        collect_statements(&self.body, &mut out);
        out
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.body.iter().filter_map(|item| match item {
            Item::Block(block) => Some(block),
            Item::Statement(_) => None,
        })
    }
}

/// Root of a parsed document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    pub sections: Vec<Section>,
}

impl File {
    /// Every statement of the document in document order.
    pub fn statements(&self) -> Vec<&Statement> {
        let mut out = Vec::new();
        for section in &self.sections {
            collect_statements(&section.body, &mut out);
        }
        out
    }

    pub fn section_at(&self, line: u32) -> Option<&Section> {
        self.sections.iter().find(|s| s.contains_line(line))
    }

    pub fn sections_of(&self, kind: SectionKind) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.kind == kind)
    }

    /// Import statements of the settings sections, in document order.
    pub fn imports(&self, kind: StatementKind) -> Vec<&Statement> {
        self.sections_of(SectionKind::Settings)
            .flat_map(|s| s.statements())
            .filter(|stmt| stmt.kind == kind)
            .collect()
    }

    /// Block-nesting stack at `line`, outermost first.
    pub fn block_stack_at(&self, line: u32) -> Vec<&Block> {
        let mut stack = Vec::new();
        let Some(section) = self.section_at(line) else {
            return stack;
        };
        let mut items = section.body.as_slice();
        'descend: loop {
            for item in items {
                if let Item::Block(block) = item {
                    if block.contains_line(line) {
                        stack.push(block);
                        items = block.body.as_slice();
                        continue 'descend;
                    }
                }
            }
            break;
        }
        stack
    }
}

fn collect_statements<'a>(items: &'a [Item], out: &mut Vec<&'a Statement>) {
    for item in items {
        match item {
            Item::Statement(stmt) => out.push(stmt),
            Item::Block(block) => {
                if let Some(header) = &block.header {
                    out.push(header);
                }
                collect_statements(&block.body, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_end_col_counts_utf16() {
        let tok = Token::new(TokenKind::Argument, "a😀b", 0, 4);
        assert_eq!(tok.end_col, 8);
    }

    #[test]
    fn test_section_kind_from_header() {
        assert_eq!(SectionKind::from_header("*** Settings ***"), SectionKind::Settings);
        assert_eq!(SectionKind::from_header("***Test Cases***"), SectionKind::TestCases);
        assert_eq!(SectionKind::from_header("*** Tasks ***"), SectionKind::TestCases);
        assert_eq!(SectionKind::from_header("* Keyword"), SectionKind::Keywords);
        assert_eq!(SectionKind::from_header("*** Whatever ***"), SectionKind::Unknown);
    }

    #[test]
    fn test_statement_text_joins_with_single_space() {
        let stmt = Statement::new(
            StatementKind::KeywordCall,
            vec![
                Token::new(TokenKind::Assign, "${x}=", 3, 4),
                Token::new(TokenKind::Keyword, "Set Variable", 3, 13),
                Token::new(TokenKind::Argument, "10", 3, 29),
            ],
        );
        assert_eq!(stmt.text(), "${x}= Set Variable 10");
        assert_eq!(stmt.keyword().map(|t| t.value.as_str()), Some("Set Variable"));
    }
}
