use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A typed value held under a channel configuration key.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ConfigValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Channel configuration as a copyable key-value bag.
///
/// The handshake manager clones the caller's configuration at chain start,
/// so stages mutate (or wholesale replace) a private copy. A security
/// stage, for example, swaps in the configuration it negotiated without
/// the caller's original ever changing.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    entries: BTreeMap<String, ConfigValue>,
}

impl ChannelConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        let _previous = self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(ConfigValue::Str(value)) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(ConfigValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(ConfigValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_typed_values() {
        let mut config = ChannelConfig::new();
        config.set("proxy.host", "example.net");
        config.set("timeout_ms", 250_i64);
        config.set("tls", true);

        assert_eq!(config.get_str("proxy.host"), Some("example.net"));
        assert_eq!(config.get_int("timeout_ms"), Some(250));
        assert_eq!(config.get_bool("tls"), Some(true));
        assert_eq!(config.get_str("timeout_ms"), None);
        assert_eq!(config.len(), 3);
    }

    #[test]
    fn set_replaces_existing_value() {
        let mut config = ChannelConfig::new();
        config.set("tls", "off");
        config.set("tls", "on");

        assert_eq!(config.get_str("tls"), Some("on"));
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn clone_is_independent_of_original() {
        let mut original = ChannelConfig::new();
        original.set("tls", "off");

        let mut copy = original.clone();
        copy.set("tls", "on");
        assert_eq!(copy.remove("tls"), Some(ConfigValue::from("on")));

        assert_eq!(original.get_str("tls"), Some("off"));
    }
}
