//! Script front end: directive parsing, compilation and execution

mod compiler;
pub mod runner;
mod script_file;

pub use compiler::Compiler;
pub use script_file::ScriptFile;
