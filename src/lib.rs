//! A small reader for `[section]` / `key = value` configuration documents.
//!
//! ```
//! let config = dragon_conf::parse(
//!     "[server]\nhost = \"localhost\"\nport = 8080\ndebug = true\n",
//! )?;
//!
//! assert_eq!(config.get_string("server", "host"), "localhost");
//! assert_eq!(config.get_int("server", "port"), 8080);
//! assert!(config.get_bool("SERVER", "debug"));
//! assert_eq!(config.get_string("server", "missing"), "");
//! # Ok::<(), dragon_conf::ConfigError>(())
//! ```

pub mod config;

pub use config::{
    bind_from, bind_str, parse, parse_bytes, parse_reader, ConfigError, ParsedConfig, Populate,
    Section,
};
