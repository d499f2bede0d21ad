//
// variables/keyword_usage.rs
//
// Keyword calls of a statement, including those nested in run-keyword variants
//

use super::normalize::{normalize_robot_name, strip_sigils};
use super::record::VariableRecord;
use crate::syntax::{Statement, StatementKind, Token};

use std::path::Path;

/// One keyword call with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordUsage<'a> {
    pub name: &'a Token,
    pub args: Vec<&'a Token>,
}

impl KeywordUsage<'_> {
    /// Keyword name normalized, library prefix `BuiltIn.` removed.
    pub fn normalized_name(&self) -> String {
        let normalized = normalize_robot_name(&self.name.value);
        match normalized.strip_prefix("builtin.") {
            Some(rest) => rest.to_string(),
            None => normalized,
        }
    }
}

/// Number of leading arguments before the nested keyword, per run-keyword variant
fn run_keyword_skip(normalized: &str) -> Option<usize> {
    match normalized {
        "runkeyword"
        | "runkeywordandignoreerror"
        | "runkeywordandreturnstatus"
        | "runkeywordandcontinueonfailure"
        | "runkeywordandreturn"
        | "runkeywordandwarnonfailure" => Some(0),
        "runkeywordif"
        | "runkeywordunless"
        | "runkeywordandexpecterror"
        | "runkeywordandreturnif"
        | "runkeywordifalltestspassed"
        | "runkeywordifanytestsfailed" => Some(1),
        "waituntilkeywordsucceeds" | "repeatkeyword" => Some(2),
        _ => None,
    }
}

fn is_else_marker(token: &Token) -> bool {
    token.value == "ELSE" || token.value == "ELSE IF"
}

/// Keyword calls of `stmt`: the called keyword and every keyword it runs.
pub fn keyword_usages(stmt: &Statement) -> Vec<KeywordUsage<'_>> {
    if !matches!(
        stmt.kind,
        StatementKind::KeywordCall | StatementKind::FixtureSetting
    ) {
        return Vec::new();
    }
    let Some(name) = stmt.keyword() else {
        return Vec::new();
    };
    let mut out = Vec::new();
    expand(
        KeywordUsage {
            name,
            args: stmt.arguments().collect(),
        },
        &mut out,
    );
    out
}

fn expand<'a>(usage: KeywordUsage<'a>, out: &mut Vec<KeywordUsage<'a>>) {
    let normalized = usage.normalized_name();
    let nested: Vec<KeywordUsage<'a>> = if normalized == "runkeywords" {
        split_run_keywords(&usage.args)
    } else if let Some(skip) = run_keyword_skip(&normalized) {
        let mut rest = usage.args.iter().skip(skip).copied();
        match rest.next() {
            Some(name) => {
                let args = rest.take_while(|t| !is_else_marker(t)).collect();
                vec![KeywordUsage { name, args }]
            }
            None => Vec::new(),
        }
    } else {
        Vec::new()
    };

    out.push(usage);
    for inner in nested {
        expand(inner, out);
    }
}

/// `Run Keywords  A  arg  AND  B`: keywords separated by `AND`, or every
/// argument a keyword when no `AND` is present.
fn split_run_keywords<'a>(args: &[&'a Token]) -> Vec<KeywordUsage<'a>> {
    if !args.iter().any(|t| t.value == "AND") {
        return args
            .iter()
            .map(|&name| KeywordUsage {
                name,
                args: Vec::new(),
            })
            .collect();
    }
    args.split(|t| t.value == "AND")
        .filter_map(|group| {
            let (&name, rest) = group.split_first()?;
            Some(KeywordUsage {
                name,
                args: rest.to_vec(),
            })
        })
        .collect()
}

/// Variable declared by a `Set ... Variable` call: the first argument is the
/// name and the second, if any, the value.
pub fn pseudo_setter_record(
    usage: &KeywordUsage<'_>,
    path: &Path,
    accepts: &dyn Fn(&str) -> bool,
) -> Option<VariableRecord> {
    let first = usage.args.first()?;
    let (name, offset) = strip_sigils(&first.value);
    if name.is_empty() || !accepts(name) {
        return None;
    }
    let value = usage.args.get(1).map_or("", |t| t.value.as_str());
    let token = first.with_value(name, first.col + offset);
    Some(VariableRecord::from_token(path, token, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{parse, File};

    fn usages_of_line(file: &File, line: u32) -> Vec<(String, Vec<String>)> {
        let stmt = file
            .statements()
            .into_iter()
            .find(|s| s.first_line() == line)
            .unwrap();
        keyword_usages(stmt)
            .into_iter()
            .map(|u| {
                (
                    u.name.value.clone(),
                    u.args.iter().map(|t| t.value.clone()).collect(),
                )
            })
            .collect()
    }

    const SOURCE: &str = "\
*** Test Cases ***
T
    [Setup]    Set Suite Variable    ${A}    1
    Run Keyword If    $x    Set Test Variable    ${B}    2    ELSE    Log    no
    Run Keywords    Set Global Variable    ${C}    AND    No Operation
    Wait Until Keyword Succeeds    3x    1s    BuiltIn.Set Task Variable    ${D}
    Run Keywords    First    Second
";

    #[test]
    fn test_fixture_setting_usage() {
        let file = parse(SOURCE);
        let usages = usages_of_line(&file, 2);
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].0, "Set Suite Variable");
        assert_eq!(usages[0].1, vec!["${A}", "1"]);
    }

    #[test]
    fn test_run_keyword_if_stops_at_else() {
        let file = parse(SOURCE);
        let usages = usages_of_line(&file, 3);
        assert_eq!(usages.len(), 2);
        assert_eq!(usages[1].0, "Set Test Variable");
        assert_eq!(usages[1].1, vec!["${B}", "2"]);
    }

    #[test]
    fn test_run_keywords_with_and() {
        let file = parse(SOURCE);
        let usages = usages_of_line(&file, 4);
        let names: Vec<_> = usages.iter().map(|u| u.0.as_str()).collect();
        assert_eq!(names, vec!["Run Keywords", "Set Global Variable", "No Operation"]);
        assert_eq!(usages[1].1, vec!["${C}"]);
    }

    #[test]
    fn test_run_keywords_without_and() {
        let file = parse(SOURCE);
        let usages = usages_of_line(&file, 6);
        let names: Vec<_> = usages.iter().map(|u| u.0.as_str()).collect();
        assert_eq!(names, vec!["Run Keywords", "First", "Second"]);
    }

    #[test]
    fn test_wait_until_and_library_prefix() {
        let file = parse(SOURCE);
        let stmt = file
            .statements()
            .into_iter()
            .find(|s| s.first_line() == 5)
            .unwrap();
        let usages = keyword_usages(stmt);
        assert_eq!(usages[1].normalized_name(), "settaskvariable");

        let record =
            pseudo_setter_record(&usages[1], Path::new("/ws/t.robot"), &|_: &str| true).unwrap();
        assert_eq!(record.name, "D");
        assert_eq!(record.value_repr, "");
    }

    #[test]
    fn test_pseudo_setter_escaped_name_and_column() {
        let file = parse("*** Test Cases ***\nT\n    Set Suite Variable    \\${X}    value\n");
        let stmt = file.statements()[0];
        let usages = keyword_usages(stmt);
        let record =
            pseudo_setter_record(&usages[0], Path::new("/ws/t.robot"), &|_: &str| true).unwrap();
        assert_eq!(record.name, "X");
        assert_eq!(record.value_repr, "value");
        match record.source {
            crate::variables::VariableSource::Token { token, .. } => assert_eq!(token.col, 29),
            other => panic!("unexpected source {:?}", other),
        }
    }

    #[test]
    fn test_pseudo_setter_rejected_by_filter() {
        let file = parse("*** Test Cases ***\nT\n    Set Suite Variable    ${X}\n");
        let usages = keyword_usages(file.statements()[0]);
        let rejected = pseudo_setter_record(&usages[0], Path::new("/ws/t.robot"), &|_: &str| false);
        assert!(rejected.is_none());
    }
}
