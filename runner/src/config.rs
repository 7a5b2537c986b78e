use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use snake_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_common::snake::SimulationSettings;

const CONFIG_FILE_NAME: &str = "snake_runner_config.yaml";

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, RunnerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path.unwrap_or_else(get_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ReplayConfig {
    pub save: bool,
    pub location: String,
}

impl Validate for ReplayConfig {
    fn validate(&self) -> Result<(), String> {
        if self.save && self.location.trim().is_empty() {
            return Err("replays.location must not be empty when saving replays".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct RunnerConfig {
    pub simulation: SimulationSettings,
    pub replays: ReplayConfig,
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        self.simulation.validate()?;
        self.replays.validate()?;
        if self.max_ticks == Some(0) {
            return Err("max_ticks must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationSettings::default(),
            replays: ReplayConfig {
                save: false,
                location: "snakereplays".to_string(),
            },
            max_ticks: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_runner_config_{}.yaml", random_number));
        path
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(RunnerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = RunnerConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: RunnerConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_config_round_trips_through_manager() {
        let file_path = get_temp_file_path();
        let manager = get_config_manager(Some(file_path.clone()));
        let config = RunnerConfig {
            max_ticks: Some(500),
            ..RunnerConfig::default()
        };

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let reloaded = get_config_manager(Some(file_path.clone()));
        assert_eq!(reloaded.get_config().unwrap(), config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager(Some(PathBuf::from("this_runner_config_does_not_exist.yaml")));
        assert_eq!(manager.get_config().unwrap(), RunnerConfig::default());
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            simulation:
              field_width: 2
              field_height: 20
              tick_interval_ms: 150
              food_score: 10
              input_buffering: LatestOnly
            replays:
              save: false
              location: snakereplays
        "#;

        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider
            .set_config_content(invalid_config_content)
            .unwrap();

        let manager: ConfigManager<_, RunnerConfig, _> =
            ConfigManager::new(content_provider, YamlConfigSerializer::new());
        assert!(manager.get_config().is_err());

        let _ = std::fs::remove_file(file_path);
    }
}
