//
// lib.rs
//
// Static variable resolution and completion for Robot Framework documents
//

pub mod cli;
pub mod config;
pub mod context;
pub mod cursor;
pub mod document;
pub mod parser_pool;
pub mod path_resolve;
pub mod perf;
pub mod syntax;
pub mod variables;
pub mod workspace;

// test_utils is available in test builds and when the `test-support` feature is enabled.
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
