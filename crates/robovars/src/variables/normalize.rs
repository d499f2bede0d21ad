//
// variables/normalize.rs
//
// Sigil stripping and name normalization for variable tokens
//

/// Strip the escape marker, sigil and enclosing braces from a raw variable token.
///
/// Returns the bare name and how many characters were removed from the front,
/// which is the amount a token's start column must be shifted to point at the
/// bare name. Each step is applied at most once, in order:
///
/// 1. a leading `\` (escaped variable)
/// 2. a leading `@`, `$` or `&`
/// 3. an enclosing `{` ... `}` pair
///
/// ```
/// use robovars::variables::strip_sigils;
///
/// assert_eq!(strip_sigils("${name}"), ("name", 2));
/// assert_eq!(strip_sigils("\\@{items}"), ("items", 3));
/// assert_eq!(strip_sigils("plain"), ("plain", 0));
/// ```
pub fn strip_sigils(raw: &str) -> (&str, u32) {
    let mut name = raw;
    let mut offset_delta = 0;

    if let Some(rest) = name.strip_prefix('\\') {
        name = rest;
        offset_delta += 1;
    }

    if let Some(rest) = name.strip_prefix(['@', '$', '&']) {
        name = rest;
        offset_delta += 1;
    }

    if name.len() >= 2 && name.starts_with('{') && name.ends_with('}') {
        name = &name[1..name.len() - 1];
        offset_delta += 1;
    }

    (name, offset_delta)
}

/// Strip the trailing `=` of an assignment target (`${x}=` or `${x} =`).
pub fn strip_assign_marker(raw: &str) -> &str {
    match raw.strip_suffix('=') {
        Some(rest) => rest.trim_end(),
        None => raw,
    }
}

/// Normalize a name the way the test-automation language compares names:
/// case-insensitive, ignoring spaces and underscores.
pub fn normalize_robot_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != ' ' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_scalar() {
        assert_eq!(strip_sigils("${var}"), ("var", 2));
    }

    #[test]
    fn test_strip_list_and_dict() {
        assert_eq!(strip_sigils("@{items}"), ("items", 2));
        assert_eq!(strip_sigils("&{mapping}"), ("mapping", 2));
    }

    #[test]
    fn test_strip_escaped() {
        assert_eq!(strip_sigils("\\${var}"), ("var", 3));
    }

    #[test]
    fn test_strip_braces_only() {
        assert_eq!(strip_sigils("{var}"), ("var", 1));
    }

    #[test]
    fn test_unclosed_brace_kept() {
        assert_eq!(strip_sigils("${var"), ("{var", 1));
    }

    #[test]
    fn test_no_sigils() {
        assert_eq!(strip_sigils("var"), ("var", 0));
        assert_eq!(strip_sigils(""), ("", 0));
    }

    #[test]
    fn test_single_brace_not_stripped_twice() {
        assert_eq!(strip_sigils("${{x}}"), ("{x}", 2));
        assert_eq!(strip_sigils("}"), ("}", 0));
    }

    #[test]
    fn test_strip_assign_marker() {
        assert_eq!(strip_assign_marker("${x}="), "${x}");
        assert_eq!(strip_assign_marker("${x} ="), "${x}");
        assert_eq!(strip_assign_marker("${x}"), "${x}");
    }

    #[test]
    fn test_normalize_robot_name() {
        assert_eq!(normalize_robot_name("Set Suite Variable"), "setsuitevariable");
        assert_eq!(normalize_robot_name("set_suite_variable"), "setsuitevariable");
        assert_eq!(normalize_robot_name("MY VAR"), "myvar");
    }

    proptest! {
        #[test]
        fn prop_offset_matches_removed_prefix(
            escaped in any::<bool>(),
            sigil in prop::sample::select(vec!["", "$", "@", "&"]),
            braced in any::<bool>(),
            body in "[A-Za-z0-9 _]{0,12}",
        ) {
            let mut raw = String::new();
            let mut expected_delta = 0;
            if escaped {
                raw.push('\\');
                expected_delta += 1;
            }
            raw.push_str(sigil);
            expected_delta += sigil.len() as u32;
            if braced {
                raw.push('{');
                raw.push_str(&body);
                raw.push('}');
                expected_delta += 1;
            } else {
                raw.push_str(&body);
            }

            let (name, delta) = strip_sigils(&raw);
            prop_assert_eq!(name, body.as_str());
            prop_assert_eq!(delta, expected_delta);
            prop_assert_eq!(&raw[delta as usize..delta as usize + name.len()], name);
        }
    }
}
