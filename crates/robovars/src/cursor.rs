//
// cursor.rs
//
// Token and variable reference under the cursor
//

use crate::syntax::{Block, File, Statement, StatementKind, Token, TokenKind};
use crate::variables::normalize_robot_name;

/// How a variable reference is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarContext {
    /// `${name}`, `@{name}`, `&{name}` or `%{name}`
    Braces,
    /// `$name` inside an evaluated expression
    Expression,
}

/// Cell under the cursor with its statement and enclosing blocks
#[derive(Debug, Clone)]
pub struct TokenInfo<'a> {
    pub statement: &'a Statement,
    pub token: &'a Token,
    /// Enclosing blocks, outermost first
    pub stack: Vec<&'a Block>,
}

/// Variable reference under the cursor.
///
/// `token` spans only the name part of the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarTokenInfo {
    pub token: Token,
    /// The enclosing cell is an assignment target
    pub is_assign: bool,
    pub context: VarContext,
    /// Name text between the start of the reference and the cursor
    pub typed: String,
}

pub fn token_at(file: &File, line: u32, col: u32) -> Option<TokenInfo<'_>> {
    let section = file.section_at(line)?;
    let statements = section.statements();
    let statement = statements.into_iter().find(|s| s.contains_line(line))?;
    let token = statement.tokens.iter().find(|t| t.contains(line, col))?;
    Some(TokenInfo {
        statement,
        token,
        stack: file.block_stack_at(line),
    })
}

/// Variable reference under the cursor, if any.
pub fn variable_at(file: &File, line: u32, col: u32) -> Option<VarTokenInfo> {
    let info = token_at(file, line, col)?;
    let token = info.token;

    let chars: Vec<char> = token.value.chars().collect();
    // UTF-16 column of each char, plus one past the end
    let mut cols = Vec::with_capacity(chars.len() + 1);
    let mut at = token.col;
    for ch in &chars {
        cols.push(at);
        at += ch.len_utf16() as u32;
    }
    cols.push(at);
    let cursor = cols.iter().position(|&c| c >= col).unwrap_or(chars.len());

    let (start, end, context) = match braced_reference(&chars, cursor) {
        Some((start, end)) => (start, end, VarContext::Braces),
        None if is_expression_cell(info.statement, token) => {
            let (start, end) = expression_reference(&chars, cursor)?;
            (start, end, VarContext::Expression)
        }
        None => return None,
    };

    let name: String = chars[start..end].iter().collect();
    let typed: String = chars[start..cursor.max(start)].iter().collect();
    Some(VarTokenInfo {
        token: Token {
            kind: token.kind,
            value: name,
            line: token.line,
            col: cols[start],
            end_col: cols[end],
        },
        is_assign: token.kind == TokenKind::Assign,
        context,
        typed,
    })
}

fn is_sigil(ch: char) -> bool {
    matches!(ch, '$' | '@' | '&' | '%')
}

/// Name span of the innermost `X{...}` reference open at `cursor`.
fn braced_reference(chars: &[char], cursor: usize) -> Option<(usize, usize)> {
    let mut open: Vec<usize> = Vec::new();
    let mut i = 0;
    while i < cursor {
        if is_sigil(chars[i]) && chars.get(i + 1) == Some(&'{') && i + 1 < cursor {
            open.push(i + 2);
            i += 2;
            continue;
        }
        if chars[i] == '}' {
            open.pop();
        }
        i += 1;
    }
    let start = *open.last()?;

    // The reference ends at its closing brace, or with the cell when unclosed.
    let mut depth = 0usize;
    let mut j = cursor;
    while j < chars.len() {
        if is_sigil(chars[j]) && chars.get(j + 1) == Some(&'{') {
            depth += 1;
            j += 2;
            continue;
        }
        if chars[j] == '}' {
            if depth == 0 {
                return Some((start, j));
            }
            depth -= 1;
        }
        j += 1;
    }
    Some((start, chars.len()))
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Name span of a `$name` reference around `cursor`.
fn expression_reference(chars: &[char], cursor: usize) -> Option<(usize, usize)> {
    let mut start = cursor;
    while start > 0 && is_name_char(chars[start - 1]) {
        start -= 1;
    }
    if start == 0 || chars[start - 1] != '$' {
        return None;
    }
    let mut end = cursor;
    while end < chars.len() && is_name_char(chars[end]) {
        end += 1;
    }
    Some((start, end))
}

/// Cells evaluated as Python expressions: `IF` / `ELSE IF` / `WHILE`
/// conditions and the arguments of `Evaluate`.
fn is_expression_cell(statement: &Statement, token: &Token) -> bool {
    if token.kind != TokenKind::Argument {
        return false;
    }
    match statement.kind {
        StatementKind::ControlHeader => {
            let marker = statement
                .get_token(TokenKind::Control)
                .map(|t| t.value.as_str());
            let is_condition = matches!(marker, Some("IF" | "ELSE IF" | "WHILE"));
            is_condition
                && statement
                    .arguments()
                    .next()
                    .is_some_and(|first| std::ptr::eq(first, token))
        }
        StatementKind::KeywordCall => statement.keyword().is_some_and(|kw| {
            let name = normalize_robot_name(&kw.value);
            name == "evaluate" || name == "builtin.evaluate"
        }),
        _ => false,
    }
}
