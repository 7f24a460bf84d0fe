//! Named board presets: base size, start hole, input handling and coloring.
//! Loaded from TOML at runtime, with a built-in set when no file is found.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::engine::error::ConfigError;
use crate::games::peg_solitaire::board::slot_count;
use crate::games::peg_solitaire::coloring::ColoringStyle;
use crate::games::peg_solitaire::controller::{DirectionResolver, InputMode};
use crate::games::peg_solitaire::game::{GameSettings, StartHole};
use crate::games::peg_solitaire::types::PegColor;

/// Smallest base row size a preset may ask for.
pub const MIN_BASE_ROW_SIZE: usize = 5;
/// Largest base row size a preset may ask for.
pub const MAX_BASE_ROW_SIZE: usize = 20;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BoardPreset {
    pub description: Option<String>,
    #[serde(default = "default_base_row_size")]
    pub base_row_size: usize,
    #[serde(default)]
    pub start_hole: StartHole,
    #[serde(default)]
    pub input_mode: InputMode,
    #[serde(default)]
    pub resolver: DirectionResolver,
    #[serde(default)]
    pub coloring: ColoringStyle,
}

fn default_base_row_size() -> usize {
    MIN_BASE_ROW_SIZE
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct PresetDefaults {
    pub preset: Option<String>,
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PresetsFile {
    #[serde(default)]
    pub presets: HashMap<String, BoardPreset>,
    #[serde(default)]
    pub defaults: PresetDefaults,
}

static BUILTIN_PRESETS: Lazy<PresetsFile> = Lazy::new(|| {
    let mut presets = HashMap::new();
    presets.insert(
        "classic".to_string(),
        BoardPreset {
            description: Some("Classic 15-hole board, banded colors".into()),
            base_row_size: 5,
            start_hole: StartHole::Apex,
            input_mode: InputMode::ClickClick,
            resolver: DirectionResolver::Graph,
            coloring: ColoringStyle::row_by_row(),
        },
    );
    presets.insert(
        "single".to_string(),
        BoardPreset {
            description: Some("15-hole board in one color, pick your own start hole".into()),
            base_row_size: 5,
            start_hole: StartHole::Choose,
            input_mode: InputMode::ClickClick,
            resolver: DirectionResolver::Graph,
            coloring: ColoringStyle::SingleColor { color: PegColor::RED },
        },
    );
    presets.insert(
        "large".to_string(),
        BoardPreset {
            description: Some("Eight-row board with a random start hole".into()),
            base_row_size: 8,
            start_hole: StartHole::Random,
            input_mode: InputMode::DragDrop,
            resolver: DirectionResolver::Geometric,
            coloring: ColoringStyle::row_by_row(),
        },
    );
    PresetsFile {
        presets,
        defaults: PresetDefaults {
            preset: Some("classic".to_string()),
        },
    }
});

impl BoardPreset {
    /// Check the size range and, for a fixed start hole, that it lies on the board.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !(MIN_BASE_ROW_SIZE..=MAX_BASE_ROW_SIZE).contains(&self.base_row_size) {
            return Err(ConfigError::BaseRowSizeOutOfRange {
                preset: name.to_string(),
                size: self.base_row_size,
                min: MIN_BASE_ROW_SIZE,
                max: MAX_BASE_ROW_SIZE,
            });
        }
        if let StartHole::At(coord) = self.start_hole {
            if coord.row + coord.col >= self.base_row_size {
                return Err(ConfigError::StartHoleOutOfRange {
                    preset: name.to_string(),
                    coord,
                });
            }
        }
        Ok(())
    }

    /// Game settings for this preset. `seed` only matters for random start holes.
    pub fn to_settings(&self, seed: Option<u64>) -> GameSettings {
        GameSettings {
            base_row_size: self.base_row_size,
            coloring: self.coloring.clone(),
            start_hole: self.start_hole,
            input_mode: self.input_mode,
            resolver: self.resolver,
            seed,
        }
    }

    pub fn slot_count(&self) -> usize {
        slot_count(self.base_row_size)
    }
}

impl PresetsFile {
    /// The presets compiled into the crate.
    pub fn builtin() -> Self {
        BUILTIN_PRESETS.clone()
    }

    /// Look up a preset by name; `None` picks the file's default.
    pub fn resolve(&self, name: Option<&str>) -> Result<(&str, &BoardPreset), ConfigError> {
        let name = name
            .or(self.defaults.preset.as_deref())
            .unwrap_or("classic");
        let (key, preset) = self
            .presets
            .get_key_value(name)
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        preset.validate(key)?;
        Ok((key.as_str(), preset))
    }

    /// Preset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn validate_all(&self) -> Result<(), ConfigError> {
        let mut names: Vec<&String> = self.presets.keys().collect();
        names.sort();
        for name in names {
            self.presets[name].validate(name)?;
        }
        Ok(())
    }
}

/// Load presets from a TOML file at the given path. Every preset is validated.
pub fn load_presets(path: &Path) -> Result<PresetsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: PresetsFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    file.validate_all()?;
    Ok(file)
}

/// Try to load presets from well-known paths, returning the built-in set if none found.
pub fn load_default_presets() -> PresetsFile {
    let candidates = [
        "presets.toml",
        "../presets.toml",
        "/etc/peg-solitaire/presets.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_presets(p) {
                Ok(presets) => {
                    tracing::info!(path = %p.display(), count = presets.presets.len(), "loaded presets");
                    return presets;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load presets");
                }
            }
        }
    }
    tracing::info!("no presets.toml found, using built-in presets");
    PresetsFile::builtin()
}
