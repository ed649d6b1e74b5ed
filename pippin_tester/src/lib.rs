mod commands;
mod displayer;
mod executor;
mod pest_parser;
mod pippin_binary;
mod until_condition;
mod utils;

pub use commands::*;
pub use displayer::{CliDisplayer, Displayer};
pub use executor::{Executor, ExecutorConfiguration};
pub use pest_parser::CliCommandParser;
pub use pippin_binary::PippinBinary;

pub type AppResult<T> = anyhow::Result<T>;
