use std::collections::BTreeMap;

use super::discovery::CONFIG_KEYS;
use super::{Config, ConfigSource};

fn source_label(source: Option<&ConfigSource>) -> String {
    source.unwrap_or(&ConfigSource::Default).to_string()
}

impl Config {
    /// Get effective configuration as key -> (value, source) pairs
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, String)> {
        CONFIG_KEYS
            .iter()
            .map(|key| {
                let value = match *key {
                    "source_dir" => self.source_dir().to_string(),
                    "target_dir" => self.target_dir().to_string(),
                    "completed_dir" => self.completed_dir().to_string(),
                    "extension" => self.extension(),
                    "max_size_gib" => self.max_size_gib().to_string(),
                    "min_size_gib" => self.min_size_gib().to_string(),
                    "age_cutoff_hours" => self.age_cutoff_hours().to_string(),
                    _ => self.order().to_string(),
                };
                let source = source_label(self.source_attribution.get(*key));
                ((*key).to_string(), (value, source))
            })
            .collect()
    }
}
