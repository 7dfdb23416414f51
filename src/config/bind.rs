use super::data::ParsedConfig;
use super::parser::{parse, parse_bytes};
use super::ConfigError;

/// A destination that fills itself in from a parsed document.
///
/// Implementors typically read their fields with the typed lookups on
/// [`ParsedConfig`], which never fail.
pub trait Populate {
    fn populate(&mut self, config: &ParsedConfig);
}

/// Parses `raw` and hands the result to `target`.
///
/// `target` is left untouched if parsing fails.
pub fn bind_from<T: Populate + ?Sized>(
    raw: impl AsRef<[u8]>,
    target: &mut T,
) -> Result<(), ConfigError> {
    let config = parse_bytes(raw.as_ref())?;
    target.populate(&config);
    Ok(())
}

/// Like [`bind_from`], for text that is already a `str`.
pub fn bind_str<T: Populate + ?Sized>(text: &str, target: &mut T) -> Result<(), ConfigError> {
    let config = parse(text)?;
    target.populate(&config);
    Ok(())
}
