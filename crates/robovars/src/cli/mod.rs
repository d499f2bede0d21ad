//
// cli/mod.rs
//
// Command-line subcommands
//

pub mod complete;
