//
// variables/mod.rs
//
// Variable discovery and completion
//
// Resolvers walk the cursor's local scope, the document, its resource imports
// and variable files, and finally the static sources, handing every accepted
// variable to a `VariablesCollector`.
//

pub mod collector;
pub mod completion;
pub mod dependency;
pub mod document_scope;
pub mod globals;
pub mod keyword_usage;
pub mod local_scope;
pub mod matcher;
pub mod normalize;
pub mod python_vars;
pub mod record;
pub mod resolve;
pub mod variable_files;

pub use collector::{
    CompletionCandidate, CompletionCollector, UnresolvedVariableImport, VariablesCollector,
};
pub use completion::{collect_variables, complete, complete_with_diagnostics, CompletionOutcome};
pub use globals::GlobalVariables;
pub use matcher::{Matcher, RobotStringMatcher};
pub use normalize::{normalize_robot_name, strip_assign_marker, strip_sigils};
pub use record::{VariableKind, VariableRecord, VariableSource};
