//! Single-pass line scanner for `[section]` / `key = value` documents.
//!
//! Parsing is total: malformed lines are skipped and never abort the pass.
//! Comment stripping is naive, so a `#` inside a quoted value still starts a
//! comment.

use std::io::Read;

use tracing::{debug, trace};

use super::data::ParsedConfig;
use super::ConfigError;

/// One input line, classified.
#[derive(Debug, PartialEq, Eq)]
enum RawLine<'a> {
    Section(&'a str),
    Pair { key: &'a str, value: &'a str },
    Ignored,
}

impl<'a> RawLine<'a> {
    fn classify(line: &'a str) -> Self {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            return RawLine::Ignored;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            return RawLine::Section(name.trim());
        }

        match line.find('=') {
            Some(eq) if eq > 0 => RawLine::Pair {
                key: line[..eq].trim(),
                value: line[eq + 1..].trim(),
            },
            _ => {
                trace!(line, "ignoring unrecognized line");
                RawLine::Ignored
            }
        }
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

/// Parses a configuration document.
///
/// Section names are lowercased. A repeated `[section]` header starts that
/// section over from empty. Pairs before the first header, or after an empty
/// `[]` header, are dropped.
///
/// The error channel is reserved; this function currently always succeeds.
pub fn parse(text: &str) -> Result<ParsedConfig, ConfigError> {
    let mut config = ParsedConfig::default();
    let mut current = String::new();

    for (index, line) in text.split('\n').enumerate() {
        match RawLine::classify(line) {
            RawLine::Section(name) => {
                current = name.to_lowercase();
                config.open_section(current.clone());
            }
            RawLine::Pair { key, value } => match config.section_mut(&current) {
                Some(section) if !current.is_empty() => {
                    section.insert(key.to_string(), value.to_string());
                }
                _ => trace!(lineno = index + 1, key, "discarding pair outside any section"),
            },
            RawLine::Ignored => {}
        }
    }

    debug!(sections = config.len(), "parsed config document");
    Ok(config)
}

/// Parses raw bytes, replacing invalid UTF-8 with U+FFFD.
pub fn parse_bytes(raw: &[u8]) -> Result<ParsedConfig, ConfigError> {
    parse(&String::from_utf8_lossy(raw))
}

/// Reads `reader` to the end and parses its contents as [`parse_bytes`] does.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<ParsedConfig, ConfigError> {
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|source| ConfigError::ReadError { source })?;
    parse_bytes(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom, Write};
    use tempfile::tempfile;

    #[test]
    fn test_classify_lines() {
        assert_eq!(RawLine::classify("  [ Net ]  "), RawLine::Section("Net"));
        assert_eq!(
            RawLine::classify("a = b = c"),
            RawLine::Pair { key: "a", value: "b = c" }
        );
        assert_eq!(RawLine::classify("= value"), RawLine::Ignored);
        assert_eq!(RawLine::classify("   "), RawLine::Ignored);
        assert_eq!(RawLine::classify("# [section]"), RawLine::Ignored);
        assert_eq!(RawLine::classify("just words"), RawLine::Ignored);
        assert_eq!(RawLine::classify("[open # note]"), RawLine::Ignored);
    }

    #[test]
    fn test_server_document() {
        let config = parse(
            r#"
            [server]
            host = "localhost"
            port = 8080
            debug = true
            "#,
        )
        .unwrap();

        assert_eq!(config.get_string("server", "host"), "localhost");
        assert_eq!(config.get_int("server", "port"), 8080);
        assert!(config.get_bool("SERVER", "debug"));
        assert_eq!(config.get_string("server", "missing"), "");
    }

    #[test]
    fn test_section_names_are_lowercased() {
        let config = parse("[Server]\nname = hello\n").unwrap();
        assert_eq!(config.sections().map(|(name, _)| name).collect::<Vec<_>>(), ["server"]);
        for section in ["server", "SERVER", "Server"] {
            assert_eq!(config.get_string(section, "name"), "hello");
        }
    }

    #[test]
    fn test_inline_comment_is_stripped() {
        let config = parse("[a]\nx = 1 # comment\n").unwrap();
        assert_eq!(config.get_int("a", "x"), 1);
        assert_eq!(config.get_raw("a", "x"), Some("1"));
    }

    #[test]
    fn test_hash_inside_quotes_truncates() {
        let config = parse("[a]\ns = \"a#b\"\n").unwrap();
        assert_eq!(config.get_raw("a", "s"), Some("\"a"));
        assert_eq!(config.get_string("a", "s"), "\"a");
    }

    #[test]
    fn test_redeclared_section_starts_over() {
        let config = parse("[a]\nfirst = 1\n[b]\nx = 2\n[A]\nsecond = 3\n").unwrap();
        assert_eq!(config.get_raw("a", "first"), None);
        assert_eq!(config.get_int("a", "second"), 3);
        assert_eq!(config.get_int("b", "x"), 2);
    }

    #[test]
    fn test_pairs_before_first_section_are_dropped() {
        let config = parse("orphan = 1\n\n[a]\nkept = 2\n").unwrap();
        assert_eq!(config.len(), 1);
        assert_eq!(config.get_raw("a", "orphan"), None);
        assert_eq!(config.get_int("a", "kept"), 2);
    }

    #[test]
    fn test_empty_header_discards_following_pairs() {
        let config = parse("[a]\nx = 1\n[]\ny = 2\n").unwrap();
        assert!(config.contains_section(""));
        assert!(config.section("").unwrap().is_empty());
        assert_eq!(config.get_raw("a", "y"), None);
        assert_eq!(config.get_int("a", "x"), 1);
    }

    #[test]
    fn test_later_key_overwrites_earlier() {
        let config = parse("[a]\nk = 1\nk = 2\n").unwrap();
        assert_eq!(config.get_int("a", "k"), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let config = parse("[net]\r\nport = 22\r\nname = \"box\"\r\n").unwrap();
        assert_eq!(config.get_int("net", "port"), 22);
        assert_eq!(config.get_string("net", "name"), "box");
    }

    #[test]
    fn test_empty_section_is_kept() {
        let config = parse("[empty]\n# nothing here\n").unwrap();
        assert!(config.contains_section("empty"));
        assert!(config.section("empty").unwrap().is_empty());
    }

    #[test]
    fn test_garbage_input_never_fails() {
        let config = parse("]]][[[\n===\n\u{0}\n[").unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_parse_bytes_is_lossy() {
        let config = parse_bytes(b"[a]\nname = caf\xff\n").unwrap();
        assert_eq!(config.get_string("a", "name"), "caf\u{FFFD}");
    }

    #[test]
    fn test_parse_reader_from_file() {
        let mut file = tempfile().unwrap();
        writeln!(file, "[db]\nport = 5432").unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        let config = parse_reader(file).unwrap();
        assert_eq!(config.get_int("db", "port"), 5432);
    }

    #[test]
    fn test_parse_reader_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("boom"))
            }
        }

        let result = parse_reader(Broken);
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
