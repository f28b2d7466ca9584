use anyhow::Context;
use clap::ValueEnum;
use smines_core::{CellCount, Coord, GameConfig};
use std::{fs, path::Path};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for GameConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => GameConfig::beginner(),
            Preset::Intermediate => GameConfig::intermediate(),
            Preset::Expert => GameConfig::expert(),
        }
    }
}

/// Individual values given on the command line, applied last.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub rows: Option<Coord>,
    pub cols: Option<Coord>,
    pub mines: Option<CellCount>,
}

pub fn load(path: &Path) -> anyhow::Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("could not parse config file {}", path.display()))?;
    Ok(config)
}

/// Config file, then preset, then overrides; later sources win.
pub fn resolve(
    file: Option<GameConfig>,
    preset: Option<Preset>,
    overrides: Overrides,
) -> anyhow::Result<GameConfig> {
    let mut config = file.unwrap_or_default();
    if let Some(preset) = preset {
        config = preset.into();
    }
    if let Some(rows) = overrides.rows {
        config.rows = rows;
    }
    if let Some(cols) = overrides.cols {
        config.cols = cols;
    }
    if let Some(mines) = overrides.mines {
        config.mines = mines;
    }

    config
        .validate()
        .with_context(|| format!("invalid game config {config:?}"))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_beginner() {
        let config = resolve(None, None, Overrides::default()).unwrap();
        assert_eq!(config, GameConfig::beginner());
    }

    #[test]
    fn later_sources_win() {
        let file = GameConfig::new(20, 20, 50).unwrap();

        let config = resolve(Some(file), None, Overrides::default()).unwrap();
        assert_eq!(config, file);

        let config = resolve(Some(file), Some(Preset::Expert), Overrides::default()).unwrap();
        assert_eq!(config, GameConfig::expert());

        let overrides = Overrides {
            mines: Some(12),
            ..Default::default()
        };
        let config = resolve(Some(file), Some(Preset::Beginner), overrides).unwrap();
        assert_eq!(config, GameConfig::new(9, 9, 12).unwrap());
    }

    #[test]
    fn rejects_impossible_config() {
        let overrides = Overrides {
            rows: Some(2),
            cols: Some(2),
            mines: Some(4),
        };
        assert!(resolve(None, None, overrides).is_err());
    }

    #[test]
    fn loads_json_file() {
        let path = std::env::temp_dir().join(format!("smines-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "rows": 12, "cols": 20, "mines": 30 }"#).unwrap();

        let config = load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config, GameConfig::new(12, 20, 30).unwrap());
        assert!(load(&path).is_err());
    }
}
