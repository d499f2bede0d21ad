//
// variables/matcher.rs
//
// Filtering of candidate names against the partially typed text
//

use super::normalize::normalize_robot_name;

/// Decides whether a candidate name matches what the user typed so far.
pub trait Matcher {
    fn accepts(&self, name: &str) -> bool;
}

/// Default matcher: both sides are normalized (case, spaces and underscores
/// ignored) and the typed text must be a substring of the candidate.
#[derive(Debug, Clone)]
pub struct RobotStringMatcher {
    filter_text: String,
}

impl RobotStringMatcher {
    pub fn new(filter_text: &str) -> Self {
        Self {
            filter_text: normalize_robot_name(filter_text),
        }
    }
}

impl Matcher for RobotStringMatcher {
    fn accepts(&self, name: &str) -> bool {
        self.filter_text.is_empty() || normalize_robot_name(name).contains(&self.filter_text)
    }
}

impl<F> Matcher for F
where
    F: Fn(&str) -> bool,
{
    fn accepts(&self, name: &str) -> bool {
        self(name)
    }
}
