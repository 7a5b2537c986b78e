use std::path::Path;

use crate::config::Validate;
use super::{REPLAY_FILE_EXTENSION, REPLAY_VERSION, Replay};

#[derive(Debug)]
pub enum ReplayError {
    IoError(std::io::Error),
    FormatError(serde_yaml_ng::Error),
    UnsupportedVersion { found: u32, expected: u32 },
    InvalidSettings(String),
    EmptyFile,
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::IoError(e) => write!(f, "IO error: {}", e),
            ReplayError::FormatError(e) => write!(f, "Replay format error: {}", e),
            ReplayError::UnsupportedVersion { found, expected } => {
                write!(f, "Unsupported replay version: found {}, expected {}", found, expected)
            }
            ReplayError::InvalidSettings(e) => write!(f, "Invalid replay settings: {}", e),
            ReplayError::EmptyFile => write!(f, "Empty replay file"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::IoError(e)
    }
}

impl From<serde_yaml_ng::Error> for ReplayError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ReplayError::FormatError(e)
    }
}

pub fn save_replay_to_string(replay: &Replay) -> Result<String, ReplayError> {
    Ok(serde_yaml_ng::to_string(replay)?)
}

pub fn save_replay(path: &Path, replay: &Replay) -> Result<(), ReplayError> {
    let content = save_replay_to_string(replay)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_replay_from_str(content: &str) -> Result<Replay, ReplayError> {
    if content.trim().is_empty() {
        return Err(ReplayError::EmptyFile);
    }

    let replay: Replay = serde_yaml_ng::from_str(content)?;
    if replay.version != REPLAY_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: replay.version,
            expected: REPLAY_VERSION,
        });
    }
    replay.settings.validate().map_err(ReplayError::InvalidSettings)?;
    Ok(replay)
}

pub fn load_replay(path: &Path) -> Result<Replay, ReplayError> {
    let content = std::fs::read_to_string(path)?;
    load_replay_from_str(&content)
}

pub fn generate_replay_filename(seed: u64) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    format!("{}_SNAKE_{}.{}", timestamp, seed, REPLAY_FILE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::TurnAction;
    use crate::snake::{Direction, SimulationSettings};

    fn sample_replay() -> Replay {
        Replay {
            version: REPLAY_VERSION,
            engine_version: "1.0.0".to_string(),
            recorded_at: "2026-01-01T00:00:00+00:00".to_string(),
            seed: 42,
            settings: SimulationSettings::default(),
            actions: vec![
                TurnAction { tick: 0, direction: Direction::Up },
                TurnAction { tick: 5, direction: Direction::Left },
            ],
            final_score: 30,
            final_tick: 57,
        }
    }

    #[test]
    fn test_save_load_replay_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("snake_replay_{}.{}", rand::random::<u32>(), REPLAY_FILE_EXTENSION));

        let replay = sample_replay();
        save_replay(&path, &replay).unwrap();
        let loaded = load_replay(&path).unwrap();
        assert_eq!(loaded, replay);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_generate_replay_filename() {
        let filename = generate_replay_filename(99);
        assert!(filename.ends_with(".snakereplay"));
        assert!(filename.contains("SNAKE_99"));
    }

    #[test]
    fn test_load_empty_content_error() {
        assert!(matches!(load_replay_from_str("  \n"), Err(ReplayError::EmptyFile)));
    }

    #[test]
    fn test_load_unsupported_version_error() {
        let mut replay = sample_replay();
        replay.version = 99;
        let text = save_replay_to_string(&replay).unwrap();
        assert!(matches!(
            load_replay_from_str(&text),
            Err(ReplayError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_load_rejects_out_of_range_settings() {
        let mut replay = sample_replay();
        replay.settings.field_width = 2;
        let text = save_replay_to_string(&replay).unwrap();
        match load_replay_from_str(&text) {
            Err(ReplayError::InvalidSettings(message)) => assert!(message.contains("field_width")),
            other => panic!("expected invalid settings, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_huge_field() {
        let mut replay = sample_replay();
        replay.settings.field_width = usize::MAX;
        let text = save_replay_to_string(&replay).unwrap();
        assert!(matches!(
            load_replay_from_str(&text),
            Err(ReplayError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_load_garbage_is_format_error() {
        assert!(matches!(
            load_replay_from_str("seed: [not, a, number"),
            Err(ReplayError::FormatError(_))
        ));
    }
}
