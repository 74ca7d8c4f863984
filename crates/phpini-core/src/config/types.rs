//! Configuration types and structures

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::ser::SerializeMap;

use crate::error::PhpIniError;

/// Token in a setting value replaced by the installation directory
pub const PATH_PLACEHOLDER: &str = "{PATH}";

/// Ordered mapping of ini setting name to desired value
///
/// JSON object order is kept so settings are applied in the order the
/// configuration author wrote them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings(Vec<(String, String)>);

impl Settings {
    /// Create an empty settings map
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a setting, replacing the value of an existing entry with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Look up a setting value by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs in configuration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of settings
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no settings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut settings = Self::new();
        for (name, value) in iter {
            settings.insert(name, value);
        }
        settings
    }
}

/// Scalar JSON values accepted as setting values
#[derive(Deserialize)]
#[serde(untagged)]
enum SettingValue {
    Text(String),
    Number(serde_json::Number),
}

impl From<SettingValue> for String {
    fn from(value: SettingValue) -> Self {
        match value {
            SettingValue::Text(s) => s,
            SettingValue::Number(n) => n.to_string(),
        }
    }
}

struct SettingsVisitor;

impl<'de> Visitor<'de> for SettingsVisitor {
    type Value = Settings;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping ini setting names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Settings, A::Error> {
        let mut settings = Settings::new();
        while let Some((name, value)) = map.next_entry::<String, SettingValue>()? {
            if settings.get(&name).is_some() {
                return Err(de::Error::custom(format!("duplicate setting '{name}'")));
            }
            settings.insert(name, value);
        }
        Ok(settings)
    }
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SettingsVisitor)
    }
}

impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Configuration file as written on disk, before required keys are checked
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    /// Glob patterns for installation directories
    pub paths: Option<Vec<String>>,
    /// Candidate base ini filenames
    pub base: Option<Vec<String>>,
    /// Desired settings
    pub settings: Option<Settings>,
    /// Extensions to enable
    pub extensions: Option<Vec<String>>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Glob patterns expanded to installation directories, in order
    pub paths: Vec<String>,

    /// Candidate template filenames used to seed a missing `php.ini`, tried in order
    pub base: Vec<String>,

    /// Setting name to desired value; values may contain [`PATH_PLACEHOLDER`]
    pub settings: Settings,

    /// Extension identifiers to activate (e.g. `mbstring`)
    pub extensions: Vec<String>,
}

impl TryFrom<RawConfig> for Config {
    type Error = PhpIniError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            paths: raw.paths.ok_or(PhpIniError::MissingConfigKey("paths"))?,
            base: raw.base.ok_or(PhpIniError::MissingConfigKey("base"))?,
            settings: raw
                .settings
                .ok_or(PhpIniError::MissingConfigKey("settings"))?,
            extensions: raw
                .extensions
                .ok_or(PhpIniError::MissingConfigKey("extensions"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_preserve_json_order() {
        let json = r#"{
            "zlib.output_compression": "Off",
            "date.timezone": "UTC",
            "allow_url_fopen": "On"
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = settings.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["zlib.output_compression", "date.timezone", "allow_url_fopen"]
        );
    }

    #[test]
    fn test_settings_accept_numbers() {
        let settings: Settings =
            serde_json::from_str(r#"{"max_execution_time": 300, "precision": 14.5}"#).unwrap();

        assert_eq!(settings.get("max_execution_time"), Some("300"));
        assert_eq!(settings.get("precision"), Some("14.5"));
    }

    #[test]
    fn test_settings_reject_non_scalars() {
        let result: Result<Settings, _> = serde_json::from_str(r#"{"memory_limit": ["1G"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_reject_duplicates() {
        let result: Result<Settings, _> =
            serde_json::from_str(r#"{"memory_limit": "1G", "memory_limit": "2G"}"#);
        assert!(result.unwrap_err().to_string().contains("duplicate setting"));
    }

    #[test]
    fn test_settings_serialize_in_order() {
        let settings: Settings = [("b", "2"), ("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
    }

    #[test]
    fn test_config_requires_every_key() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"paths": [], "base": [], "settings": {}}"#).unwrap();

        let err = Config::try_from(raw).unwrap_err();
        assert!(matches!(err, PhpIniError::MissingConfigKey("extensions")));
    }

    #[test]
    fn test_config_from_complete_raw() {
        let raw: RawConfig = serde_json::from_str(
            r#"{
                "paths": ["C:/php/*"],
                "base": ["php.ini-development"],
                "settings": {"extension_dir": "{PATH}/ext"},
                "extensions": ["curl"]
            }"#,
        )
        .unwrap();

        let config = Config::try_from(raw).unwrap();
        assert_eq!(config.paths, vec!["C:/php/*"]);
        assert_eq!(config.settings.get("extension_dir"), Some("{PATH}/ext"));
        assert_eq!(config.extensions, vec!["curl"]);
    }
}
