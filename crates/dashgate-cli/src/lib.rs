//! Command-line front end for the dashgate dashboard gateway.

pub mod bootstrap;
pub mod parser;
pub mod replay;

pub use bootstrap::{CliContext, bootstrap, run};
pub use parser::Cli;
