use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once, validates it and hands out copies.
///
/// A missing backing store yields `TConfig::default()` without caching it, so a
/// later `set_config` still decides what gets persisted.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    cached: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl AsRef<Path>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config_serializer,
            config_content_provider,
            cached: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = cached.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *cached = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized = self.config_serializer.serialize(config)?;
        self.config_content_provider.set_config_content(&serialized)?;

        let mut cached = self
            .cached
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *cached = Some(config.clone());
        Ok(())
    }
}
