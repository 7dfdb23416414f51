//! Conversion of a [`ParsedConfig`] into serde-deserializable TOML values.

use serde::de::DeserializeOwned;
use toml::{Table, Value};

use super::data::{unquote, ParsedConfig};
use super::ConfigError;

impl ParsedConfig {
    /// Deserializes the whole document into `T`.
    ///
    /// Each section becomes a table and each raw value is coerced to the most
    /// specific TOML type it looks like. Quoted values always stay strings.
    ///
    /// ```
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Settings {
    ///     server: Server,
    /// }
    ///
    /// #[derive(Deserialize)]
    /// struct Server {
    ///     host: String,
    ///     port: u16,
    /// }
    ///
    /// let config = dragon_conf::parse("[server]\nhost = \"localhost\"\nport = 8080\n")?;
    /// let settings: Settings = config.try_deserialize()?;
    /// assert_eq!(settings.server.host, "localhost");
    /// assert_eq!(settings.server.port, 8080);
    /// # Ok::<(), dragon_conf::ConfigError>(())
    /// ```
    pub fn try_deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        Value::Table(self.to_table())
            .try_into()
            .map_err(ConfigError::DeserializeError)
    }

    fn to_table(&self) -> Table {
        self.sections()
            .map(|(name, section)| {
                let table: Table = section
                    .iter()
                    .map(|(key, raw)| (key.to_string(), coerce_value(raw)))
                    .collect();
                (name.to_string(), Value::Table(table))
            })
            .collect()
    }
}

fn coerce_value(raw: &str) -> Value {
    let s = raw.trim();

    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        return Value::String(unquote(s).to_string());
    }

    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    if looks_like_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
    }

    if s.contains(['.', 'e', 'E']) && looks_numeric(s) {
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::String(s.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

// Keeps words such as "infinite" or "none" out of the float branch.
fn looks_numeric(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+'))
}
