//! Parsing and typed lookup of sectioned key/value documents.

mod bind;
mod coerce;
mod data;
mod error;
mod parser;

pub use bind::{bind_from, bind_str, Populate};
pub use data::{ParsedConfig, Section};
pub use error::ConfigError;
pub use parser::{parse, parse_bytes, parse_reader};
