//! The parsed two-level mapping and its typed lookups.

use std::collections::HashMap;

use serde::Serialize;

/// Key/value pairs of a single `[section]`.
///
/// Keys are stored exactly as written and matched case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Section {
    entries: HashMap<String, String>,
}

impl Section {
    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }
}

/// A parsed configuration document.
///
/// Maps lowercased section names to their [`Section`]. Built once by
/// [`parse`](crate::parse) and read-only afterwards.
///
/// The typed lookups (`get_string`, `get_bool`, `get_int`, `get_float`) never
/// fail: a missing section, a missing key and an unparsable value all yield the
/// type's zero value. Use [`get_raw`](Self::get_raw) when absence matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParsedConfig {
    sections: HashMap<String, Section>,
}

impl ParsedConfig {
    /// Looks up a section by name, ignoring case.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(&name.to_lowercase())
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Iterates over `(lowercased name, section)` pairs in arbitrary order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the raw, uncoerced value for `key` in `section`.
    pub fn get_raw(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// Returns the trimmed value with one pair of surrounding double quotes
    /// removed, or `""` when absent. No escape processing is done.
    pub fn get_string(&self, section: &str, key: &str) -> String {
        self.get_raw(section, key)
            .map(|raw| unquote(raw).to_string())
            .unwrap_or_default()
    }

    /// Returns the boolean value, or `false` when absent or unparsable.
    ///
    /// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
    /// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
    pub fn get_bool(&self, section: &str, key: &str) -> bool {
        self.lookup(section, key, parse_bool)
    }

    /// Returns the base-10 integer value, or `0` when absent or unparsable.
    pub fn get_int(&self, section: &str, key: &str) -> i64 {
        self.lookup(section, key, |s| s.parse().ok())
    }

    /// Returns the floating-point value, or `0.0` when absent or unparsable.
    ///
    /// Values that overflow `f64` are treated as unparsable; only an explicit
    /// `inf`, `infinity` or `nan` spelling yields a non-finite result.
    pub fn get_float(&self, section: &str, key: &str) -> f64 {
        self.lookup(section, key, parse_float)
    }

    fn lookup<T: Default>(
        &self,
        section: &str,
        key: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> T {
        self.get_raw(section, key)
            .and_then(|raw| parse(raw.trim()))
            .unwrap_or_default()
    }

    /// Returns the section for `name`, replacing any existing one with an
    /// empty section. `name` must already be lowercased.
    pub(crate) fn open_section(&mut self, name: String) -> &mut Section {
        let section = self.sections.entry(name).or_default();
        *section = Section::default();
        section
    }

    pub(crate) fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }
}

pub(crate) fn unquote(raw: &str) -> &str {
    let s = raw.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_float(s: &str) -> Option<f64> {
    let f: f64 = s.parse().ok()?;
    if f.is_finite() {
        return Some(f);
    }
    let word = s.strip_prefix(['+', '-']).unwrap_or(s);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|spelling| word.eq_ignore_ascii_case(spelling))
        .then_some(f)
}
