//
// syntax/mod.rs
//
// Document model for the plain-text test data format
//

pub mod ast;
pub mod reader;

pub use ast::*;
pub use reader::parse;
