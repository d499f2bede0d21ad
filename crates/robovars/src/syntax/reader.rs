//
// syntax/reader.rs
//
// Line-oriented reader for the plain-text test data format
//

use regex::Regex;
use std::sync::OnceLock;

use super::ast::{
    Block, BlockKind, File, Item, Section, SectionKind, Statement, StatementKind, Token, TokenKind,
};
use crate::variables::normalize_robot_name;

/// A cell of a row with its UTF-16 start column
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    text: String,
    col: u32,
}

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"\s*(?:\t|  )\s*").unwrap())
}

fn pipe_separator() -> &'static Regex {
    static PIPE: OnceLock<Regex> = OnceLock::new();
    PIPE.get_or_init(|| Regex::new(r"\s+\|(?:\s+|$)").unwrap())
}

fn assign_pattern() -> &'static Regex {
    static ASSIGN: OnceLock<Regex> = OnceLock::new();
    ASSIGN.get_or_init(|| Regex::new(r"^[$@&]\{.+\}\s*=?$").unwrap())
}

fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

/// Split a row into cells. The first cell is empty when the row is indented.
///
/// A cell starting with `#` turns the rest of the row into a comment, which is
/// dropped.
fn split_cells(line: &str) -> Vec<Cell> {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(rest) = line.strip_prefix("| ") {
        return split_pipe_cells(rest);
    }

    let mut cells = Vec::new();
    if line.starts_with(' ') || line.starts_with('\t') {
        cells.push(Cell {
            text: String::new(),
            col: 0,
        });
    }

    let mut last = 0;
    for m in separator().find_iter(line) {
        if m.start() > last {
            push_cell(&mut cells, &line[last..m.start()], utf16_len(&line[..last]));
        }
        last = m.end();
    }
    if last < line.len() {
        push_cell(&mut cells, &line[last..], utf16_len(&line[..last]));
    }

    strip_comment(cells)
}

/// Pipe format rows: `| cell | cell |`, `rest` is the row after the leading `| `.
fn split_pipe_cells(rest: &str) -> Vec<Cell> {
    const PREFIX: u32 = 2;
    let mut cells = Vec::new();
    let mut last = 0;
    for m in pipe_separator().find_iter(rest) {
        push_cell(&mut cells, &rest[last..m.start()], PREFIX + utf16_len(&rest[..last]));
        last = m.end();
    }
    if last < rest.len() {
        push_cell(&mut cells, &rest[last..], PREFIX + utf16_len(&rest[..last]));
    }
    strip_comment(cells)
}

fn push_cell(cells: &mut Vec<Cell>, raw: &str, col: u32) {
    // A single leading space is not a separator but is not part of the value either.
    let trimmed = raw.trim_start();
    let col = col + utf16_len(&raw[..raw.len() - trimmed.len()]);
    cells.push(Cell {
        text: trimmed.trim_end().to_string(),
        col,
    });
}

fn strip_comment(mut cells: Vec<Cell>) -> Vec<Cell> {
    if let Some(pos) = cells.iter().position(|c| c.text.starts_with('#')) {
        cells.truncate(pos);
    }
    cells
}

fn is_assign(text: &str) -> bool {
    assign_pattern().is_match(text)
}

/// Open blocks of the current definition, innermost last
#[derive(Default)]
struct BlockStack {
    blocks: Vec<Block>,
}

impl BlockStack {
    fn push_item(&mut self, item: Item, line: u32) -> Option<Item> {
        match self.blocks.last_mut() {
            Some(block) => {
                block.end_line = block.end_line.max(line);
                block.body.push(item);
                None
            }
            None => Some(item),
        }
    }

    /// Close the innermost control block. Definitions are never closed by `END`.
    fn close_control(&mut self, line: u32) {
        if self.blocks.len() < 2 {
            return;
        }
        if let Some(mut block) = self.blocks.pop() {
            block.end_line = line;
            if let Some(parent) = self.blocks.last_mut() {
                parent.end_line = parent.end_line.max(line);
                parent.body.push(Item::Block(block));
            }
        }
    }

    /// Close everything and return the definition block, if any.
    fn finish(&mut self) -> Option<Block> {
        while self.blocks.len() > 1 {
            if let Some(block) = self.blocks.pop() {
                if let Some(parent) = self.blocks.last_mut() {
                    parent.end_line = parent.end_line.max(block.end_line);
                    parent.body.push(Item::Block(block));
                }
            }
        }
        self.blocks.pop()
    }

    fn last_statement_mut(&mut self) -> Option<&mut Statement> {
        let block = self.blocks.last_mut()?;
        match block.body.last_mut() {
            Some(Item::Statement(stmt)) => Some(stmt),
            _ => None,
        }
    }
}

struct SectionBuilder {
    section: Section,
    open: BlockStack,
}

impl SectionBuilder {
    fn new(kind: SectionKind, header: Option<Token>, start_line: u32) -> Self {
        Self {
            section: Section {
                kind,
                header,
                body: Vec::new(),
                start_line,
                end_line: start_line,
            },
            open: BlockStack::default(),
        }
    }

    fn push_statement(&mut self, stmt: Statement) {
        let line = stmt.last_line();
        if let Some(item) = self.open.push_item(Item::Statement(stmt), line) {
            self.section.body.push(item);
        }
    }

    fn finish_definition(&mut self, next_start: Option<u32>) {
        if let Some(mut block) = self.open.finish() {
            if let Some(next) = next_start {
                block.end_line = block.end_line.max(next.saturating_sub(1));
            }
            self.section.body.push(Item::Block(block));
        }
    }

    fn finish(mut self, end_line: u32) -> Section {
        self.finish_definition(Some(end_line + 1));
        self.section.end_line = end_line;
        self.section
    }

    /// Append continuation cells (`...`) to the previous statement.
    fn continue_statement(&mut self, cells: &[Cell], line: u32) -> bool {
        let last = if self.open.blocks.is_empty() {
            match self.section.body.last_mut() {
                Some(Item::Statement(stmt)) => Some(stmt),
                _ => None,
            }
        } else {
            self.open.last_statement_mut()
        };
        let Some(stmt) = last else {
            return false;
        };
        for cell in cells {
            if !cell.text.is_empty() {
                stmt.tokens.push(Token::new(
                    TokenKind::Argument,
                    cell.text.clone(),
                    line,
                    cell.col,
                ));
            }
        }
        if let Some(block) = self.open.blocks.last_mut() {
            block.end_line = block.end_line.max(line);
        }
        true
    }
}

/// Parse document text into the document model. Never fails: rows that are
/// not understood become `Other` statements.
pub fn parse(text: &str) -> File {
    let mut file = File::default();
    let mut current = SectionBuilder::new(SectionKind::Implicit, None, 0);
    let mut last_line = 0u32;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx as u32;
        last_line = line;

        if raw_line.starts_with('*') {
            let previous = std::mem::replace(
                &mut current,
                SectionBuilder::new(
                    SectionKind::from_header(raw_line),
                    Some(Token::new(TokenKind::Header, raw_line.trim_end(), line, 0)),
                    line,
                ),
            );
            push_section(&mut file, previous.finish(line.saturating_sub(1)));
            continue;
        }

        let cells = split_cells(raw_line);
        if cells.iter().all(|c| c.text.is_empty()) {
            continue;
        }

        match current.section.kind {
            SectionKind::Comments | SectionKind::Unknown => {}
            SectionKind::Settings => read_setting_row(&mut current, &cells, line),
            SectionKind::Variables => read_variable_row(&mut current, &cells, line),
            SectionKind::TestCases | SectionKind::Keywords => {
                let kind = if current.section.kind == SectionKind::Keywords {
                    BlockKind::Keyword
                } else {
                    BlockKind::TestCase
                };
                read_definition_row(&mut current, kind, &cells, line);
            }
            SectionKind::Implicit => {
                let body = non_empty(&cells);
                if !body.is_empty() {
                    current.push_statement(other_statement(&body, line));
                }
            }
        }
    }

    // A cursor on the empty row after a trailing newline still belongs to the last section.
    let end_line = if text.ends_with('\n') {
        last_line + 1
    } else {
        last_line
    };
    push_section(&mut file, current.finish(end_line));
    file
}

fn push_section(file: &mut File, section: Section) {
    if section.kind == SectionKind::Implicit && section.body.is_empty() {
        return;
    }
    file.sections.push(section);
}

fn non_empty(cells: &[Cell]) -> Vec<Cell> {
    cells.iter().filter(|c| !c.text.is_empty()).cloned().collect()
}

fn is_continuation(cells: &[Cell]) -> bool {
    cells
        .iter()
        .find(|c| !c.text.is_empty())
        .is_some_and(|c| c.text == "...")
}

fn continuation_cells(cells: &[Cell]) -> Vec<Cell> {
    let body = non_empty(cells);
    body.into_iter().skip(1).collect()
}

fn other_statement(cells: &[Cell], line: u32) -> Statement {
    let mut tokens = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let kind = if i == 0 {
            TokenKind::Setting
        } else {
            TokenKind::Argument
        };
        tokens.push(Token::new(kind, cell.text.clone(), line, cell.col));
    }
    Statement::new(StatementKind::Other, tokens)
}

fn read_setting_row(current: &mut SectionBuilder, cells: &[Cell], line: u32) {
    if is_continuation(cells) {
        current.continue_statement(&continuation_cells(cells), line);
        return;
    }
    let body = non_empty(cells);
    let Some((first, rest)) = body.split_first() else {
        return;
    };
    let setting = Token::new(TokenKind::Setting, first.text.clone(), line, first.col);
    let normalized = normalize_robot_name(&first.text);

    let kind = match normalized.as_str() {
        "resource" => StatementKind::ResourceImport,
        "variables" => StatementKind::VariablesImport,
        "library" => StatementKind::LibraryImport,
        "suitesetup" | "suiteteardown" | "testsetup" | "testteardown" | "tasksetup"
        | "taskteardown" => StatementKind::FixtureSetting,
        _ => StatementKind::Other,
    };

    let mut tokens = vec![setting];
    for (i, cell) in rest.iter().enumerate() {
        let token_kind = match (kind, i) {
            (
                StatementKind::ResourceImport
                | StatementKind::VariablesImport
                | StatementKind::LibraryImport,
                0,
            ) => TokenKind::Name,
            (StatementKind::FixtureSetting, 0) => TokenKind::Keyword,
            _ => TokenKind::Argument,
        };
        tokens.push(Token::new(token_kind, cell.text.clone(), line, cell.col));
    }
    current.push_statement(Statement::new(kind, tokens));
}

fn read_variable_row(current: &mut SectionBuilder, cells: &[Cell], line: u32) {
    if is_continuation(cells) {
        current.continue_statement(&continuation_cells(cells), line);
        return;
    }
    let body = non_empty(cells);
    let Some((first, rest)) = body.split_first() else {
        return;
    };
    let mut tokens = Vec::with_capacity(body.len());
    let name = crate::variables::strip_assign_marker(&first.text);
    tokens.push(Token::new(TokenKind::Variable, name, line, first.col));
    for cell in rest {
        tokens.push(Token::new(TokenKind::Argument, cell.text.clone(), line, cell.col));
    }
    current.push_statement(Statement::new(StatementKind::VariableDeclaration, tokens));
}

fn read_definition_row(current: &mut SectionBuilder, kind: BlockKind, cells: &[Cell], line: u32) {
    let starts_definition = cells.first().is_some_and(|c| !c.text.is_empty());

    if starts_definition {
        current.finish_definition(Some(line));
        let name_cell = &cells[0];
        let mut block = Block::new(kind, line);
        block.name = Some(Token::new(TokenKind::Name, name_cell.text.clone(), line, name_cell.col));
        current.open.blocks.push(block);

        let rest = non_empty(&cells[1..]);
        if !rest.is_empty() {
            read_body_statement(current, &rest, line);
        }
        return;
    }

    if current.open.blocks.is_empty() {
        // Indented rows before any definition
        let body = non_empty(cells);
        current.push_statement(other_statement(&body, line));
        return;
    }

    if is_continuation(cells) {
        current.continue_statement(&continuation_cells(cells), line);
        return;
    }

    let body = non_empty(cells);
    if !body.is_empty() {
        read_body_statement(current, &body, line);
    }
}

fn control_token(cell: &Cell, line: u32) -> Token {
    Token::new(TokenKind::Control, cell.text.clone(), line, cell.col)
}

fn argument_tokens(cells: &[Cell], line: u32) -> Vec<Token> {
    cells
        .iter()
        .map(|c| Token::new(TokenKind::Argument, c.text.clone(), line, c.col))
        .collect()
}

fn open_control_block(current: &mut SectionBuilder, kind: BlockKind, header: Statement, line: u32) {
    let mut block = Block::new(kind, line);
    block.header = Some(header);
    current.open.blocks.push(block);
}

fn read_body_statement(current: &mut SectionBuilder, cells: &[Cell], line: u32) {
    let first = &cells[0];
    let marker = first.text.as_str();

    if marker.starts_with('[') && marker.ends_with(']') {
        let setting = Token::new(TokenKind::Setting, marker, line, first.col);
        let normalized = normalize_robot_name(&marker[1..marker.len() - 1]);
        let stmt = match normalized.as_str() {
            "arguments" => {
                let mut tokens = vec![setting];
                tokens.extend(argument_tokens(&cells[1..], line));
                Statement::new(StatementKind::Arguments, tokens)
            }
            "setup" | "teardown" => {
                let mut tokens = vec![setting];
                if let Some((kw, args)) = cells[1..].split_first() {
                    tokens.push(Token::new(TokenKind::Keyword, kw.text.clone(), line, kw.col));
                    tokens.extend(argument_tokens(args, line));
                }
                Statement::new(StatementKind::FixtureSetting, tokens)
            }
            _ => {
                let mut tokens = vec![setting];
                tokens.extend(argument_tokens(&cells[1..], line));
                Statement::new(StatementKind::Other, tokens)
            }
        };
        current.push_statement(stmt);
        return;
    }

    match marker {
        "FOR" => {
            let mut tokens = vec![control_token(first, line)];
            let mut in_values = false;
            for cell in &cells[1..] {
                if !in_values && cell.text.starts_with("IN") {
                    in_values = true;
                    tokens.push(control_token(cell, line));
                } else if in_values {
                    tokens.push(Token::new(TokenKind::Argument, cell.text.clone(), line, cell.col));
                } else {
                    tokens.push(Token::new(TokenKind::Assign, cell.text.clone(), line, cell.col));
                }
            }
            open_control_block(
                current,
                BlockKind::For,
                Statement::new(StatementKind::ForHeader, tokens),
                line,
            );
        }
        "WHILE" | "TRY" => {
            let mut tokens = vec![control_token(first, line)];
            tokens.extend(argument_tokens(&cells[1..], line));
            let kind = if marker == "WHILE" {
                BlockKind::While
            } else {
                BlockKind::Try
            };
            open_control_block(
                current,
                kind,
                Statement::new(StatementKind::ControlHeader, tokens),
                line,
            );
        }
        "IF" => {
            let mut tokens = vec![control_token(first, line)];
            if let Some(condition) = cells.get(1) {
                tokens.push(Token::new(
                    TokenKind::Argument,
                    condition.text.clone(),
                    line,
                    condition.col,
                ));
            }
            let header = Statement::new(StatementKind::ControlHeader, tokens);
            if cells.len() > 2 {
                // Inline IF: every branch sits on the same row.
                current.push_statement(header);
                push_inline_branches(current, &cells[2..], line);
            } else {
                open_control_block(current, BlockKind::If, header, line);
            }
        }
        "ELSE" | "ELSE IF" | "EXCEPT" | "FINALLY" => {
            let mut tokens = vec![control_token(first, line)];
            tokens.extend(argument_tokens(&cells[1..], line));
            current.push_statement(Statement::new(StatementKind::ControlHeader, tokens));
        }
        "END" => {
            current.open.close_control(line);
        }
        "VAR" => {
            let mut tokens = vec![control_token(first, line)];
            if let Some((name, values)) = cells[1..].split_first() {
                tokens.push(Token::new(
                    TokenKind::Assign,
                    crate::variables::strip_assign_marker(&name.text),
                    line,
                    name.col,
                ));
                tokens.extend(argument_tokens(values, line));
            }
            current.push_statement(Statement::new(StatementKind::Var, tokens));
        }
        "RETURN" | "BREAK" | "CONTINUE" => {
            let mut tokens = vec![control_token(first, line)];
            tokens.extend(argument_tokens(&cells[1..], line));
            current.push_statement(Statement::new(StatementKind::Other, tokens));
        }
        _ => current.push_statement(keyword_call(cells, line)),
    }
}

fn is_branch_marker(cell: &Cell) -> bool {
    cell.text == "ELSE" || cell.text == "ELSE IF"
}

/// Split the cells after an inline IF condition at each `ELSE` / `ELSE IF`.
///
/// The first segment is the IF body; every later segment starts with its marker.
fn split_inline_branches(cells: &[Cell]) -> Vec<&[Cell]> {
    let mut branches = Vec::new();
    let mut start = 0;
    for (i, cell) in cells.iter().enumerate() {
        if i > start && is_branch_marker(cell) {
            branches.push(&cells[start..i]);
            start = i;
        }
    }
    branches.push(&cells[start..]);
    branches
}

fn push_inline_branches(current: &mut SectionBuilder, cells: &[Cell], line: u32) {
    for branch in split_inline_branches(cells) {
        let body = match branch.first() {
            Some(marker) if is_branch_marker(marker) => {
                let condition_len = usize::from(marker.text == "ELSE IF").min(branch.len() - 1);
                let (condition, body) = branch[1..].split_at(condition_len);
                let mut tokens = vec![control_token(marker, line)];
                tokens.extend(argument_tokens(condition, line));
                current.push_statement(Statement::new(StatementKind::ControlHeader, tokens));
                body
            }
            _ => branch,
        };
        if !body.is_empty() {
            current.push_statement(keyword_call(body, line));
        }
    }
}

fn keyword_call(cells: &[Cell], line: u32) -> Statement {
    let mut tokens = Vec::with_capacity(cells.len());
    let mut iter = cells.iter().peekable();
    while let Some(cell) = iter.peek() {
        if is_assign(&cell.text) {
            tokens.push(Token::new(TokenKind::Assign, cell.text.clone(), line, cell.col));
            iter.next();
        } else {
            break;
        }
    }
    if let Some(kw) = iter.next() {
        tokens.push(Token::new(TokenKind::Keyword, kw.text.clone(), line, kw.col));
    }
    for cell in iter {
        tokens.push(Token::new(TokenKind::Argument, cell.text.clone(), line, cell.col));
    }
    Statement::new(StatementKind::KeywordCall, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_texts(line: &str) -> Vec<(String, u32)> {
        split_cells(line).into_iter().map(|c| (c.text, c.col)).collect()
    }

    #[test]
    fn test_split_cells_two_spaces() {
        assert_eq!(
            cell_texts("Log    hello world"),
            vec![("Log".to_string(), 0), ("hello world".to_string(), 7)]
        );
    }

    #[test]
    fn test_split_cells_indented() {
        assert_eq!(
            cell_texts("    ${x}=    Set Variable    1"),
            vec![
                (String::new(), 0),
                ("${x}=".to_string(), 4),
                ("Set Variable".to_string(), 13),
                ("1".to_string(), 29),
            ]
        );
    }

    #[test]
    fn test_split_cells_tab_and_comment() {
        assert_eq!(
            cell_texts("\tLog\tvalue  # trailing"),
            vec![
                (String::new(), 0),
                ("Log".to_string(), 1),
                ("value".to_string(), 5),
            ]
        );
    }

    #[test]
    fn test_split_cells_pipe_format() {
        assert_eq!(
            cell_texts("|  | Log | hi |"),
            vec![
                (String::new(), 2),
                ("Log".to_string(), 5),
                ("hi".to_string(), 11),
            ]
        );
    }

    #[test]
    fn test_parse_sections_and_imports() {
        let file = parse(
            "*** Settings ***\nResource    common.resource\nVariables    vars.yaml    arg\n\n*** Variables ***\n${NAME}    value\n",
        );
        assert_eq!(file.sections.len(), 2);
        let resources = file.imports(StatementKind::ResourceImport);
        assert_eq!(resources.len(), 1);
        assert_eq!(
            resources[0].get_token(TokenKind::Name).map(|t| t.value.as_str()),
            Some("common.resource")
        );
        let variables = file.imports(StatementKind::VariablesImport);
        assert_eq!(variables[0].arguments().count(), 1);

        let decls = file.sections[1].statements();
        assert_eq!(decls[0].kind, StatementKind::VariableDeclaration);
        assert_eq!(decls[0].tokens[0].value, "${NAME}");
    }

    #[test]
    fn test_parse_keyword_body() {
        let text = "\
*** Keywords ***
My Keyword
    [Arguments]    ${a}    ${b}=2
    ${x}=    Set Variable    1
    FOR    ${i}    IN RANGE    3
        Log    ${i}
    END
    Log    done

Other Keyword
    No Operation
";
        let file = parse(text);
        let section = &file.sections[0];
        let blocks: Vec<_> = section.blocks().collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name.as_ref().map(|t| t.value.as_str()), Some("My Keyword"));
        assert_eq!(blocks[0].start_line, 1);
        assert_eq!(blocks[0].end_line, 8);
        assert_eq!(blocks[1].start_line, 9);

        let stmts = blocks[0].statements();
        assert_eq!(stmts[0].kind, StatementKind::Arguments);
        assert_eq!(stmts[1].kind, StatementKind::KeywordCall);
        assert_eq!(stmts[1].tokens[0].kind, TokenKind::Assign);
        assert_eq!(stmts[2].kind, StatementKind::ForHeader);
        assert_eq!(stmts[2].tokens[1].kind, TokenKind::Assign);
        assert_eq!(stmts[3].keyword().map(|t| t.value.as_str()), Some("Log"));

        let stack = file.block_stack_at(5);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack[0].kind, BlockKind::Keyword);
        assert_eq!(stack[1].kind, BlockKind::For);
    }

    #[test]
    fn test_parse_continuation_row() {
        let text = "\
*** Test Cases ***
Case
    Set Suite Variable    ${X}
    ...    1
";
        let file = parse(text);
        let stmts = file.statements();
        assert_eq!(stmts.len(), 1);
        let args: Vec<_> = stmts[0].arguments().map(|t| t.value.as_str()).collect();
        assert_eq!(args, vec!["${X}", "1"]);
        assert_eq!(stmts[0].last_line(), 3);
    }

    #[test]
    fn test_parse_var_and_inline_if() {
        let text = "\
*** Test Cases ***
Case
    VAR    ${name}    value    scope=SUITE
    IF    $cond    Log    yes
";
        let file = parse(text);
        let stmts = file.statements();
        assert_eq!(stmts[0].kind, StatementKind::Var);
        assert_eq!(stmts[0].tokens[1].kind, TokenKind::Assign);
        assert_eq!(stmts[1].kind, StatementKind::ControlHeader);
        assert_eq!(stmts[2].keyword().map(|t| t.value.as_str()), Some("Log"));
    }

    #[test]
    fn test_inline_if_keeps_every_branch() {
        let text = "\
*** Keywords ***
Choose
    IF    $c    Set Suite Variable    ${A}    1    ELSE IF    $d    Log    d    ELSE    Set Suite Variable    ${B}    2
";
        let file = parse(text);
        let stmts = file.statements();
        let kinds: Vec<_> = stmts.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StatementKind::ControlHeader,
                StatementKind::KeywordCall,
                StatementKind::ControlHeader,
                StatementKind::KeywordCall,
                StatementKind::ControlHeader,
                StatementKind::KeywordCall,
            ]
        );
        let else_if: Vec<_> = stmts[2].tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(else_if, vec!["ELSE IF", "$d"]);
        let last: Vec<_> = stmts[5].arguments().map(|t| t.value.as_str()).collect();
        assert_eq!(last, vec!["${B}", "2"]);
        assert_eq!(stmts[5].keyword().map(|t| t.value.as_str()), Some("Set Suite Variable"));
    }

    #[test]
    fn test_comments_section_ignored() {
        let file = parse("*** Comments ***\nSet Suite Variable    ${X}    1\n");
        assert!(file.statements().is_empty());
    }
}
