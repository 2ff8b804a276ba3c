//! Editor settings

use serde::{Deserialize, Serialize};

/// Placement behavior (centimeters / radians)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Joint thickness used for new layouts
    pub default_joint_cm: f64,
    /// Free translation step of the DPad / arrow keys
    pub dpad_increment_cm: f64,
    /// Rotation step for ghost and element rotation
    pub rotation_increment: f64,
    /// X offset of the duplicate ghost from its source
    pub duplicate_offset_cm: f64,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            default_joint_cm: 1.2,
            dpad_increment_cm: 1.0,
            rotation_increment: std::f64::consts::FRAC_PI_4,
            duplicate_offset_cm: 10.0,
        }
    }
}

/// Pointer gesture thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Press duration opening the context menu
    pub long_press_ms: u64,
    /// Displacement above which a press becomes a drag
    pub drag_threshold_px: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            long_press_ms: 500,
            drag_threshold_px: 5.0,
        }
    }
}

/// Ground grid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub visible: bool,
    /// Full extent of the ground (cm), centered on the origin
    pub size_cm: f64,
    /// Spacing between grid lines (cm)
    pub step_cm: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            size_cm: 1000.0,
            step_cm: 50.0,
        }
    }
}

impl GridSettings {
    pub fn half_extent(&self) -> f64 {
        self.size_cm / 2.0
    }
}

/// Viewport colors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub background_color: [u8; 3],
    pub selection_color: [u8; 3],
    /// Alpha of the placement ghost (0-255)
    pub ghost_alpha: u8,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [0x87, 0xCE, 0xEB],
            selection_color: [0xFF, 0xAA, 0x00],
            ghost_alpha: 128,
        }
    }
}

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    pub language: Language,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Language::default(),
        }
    }
}

/// All editor settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub placement: PlacementSettings,
    pub input: InputSettings,
    pub grid: GridSettings,
    pub viewport: ViewportSettings,
    pub ui: UiSettings,
}

pub(crate) fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "assise", "assise")
}

impl EditorSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = project_dirs() {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match serde_json::from_str(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring malformed {}: {}", config_path.display(), e),
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = project_dirs() {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(&config_path, json) {
                        tracing::error!("Failed to write {}: {}", config_path.display(), e);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = EditorSettings::default();
        assert_eq!(s.placement.default_joint_cm, 1.2);
        assert_eq!(s.input.long_press_ms, 500);
        assert_eq!(s.grid.half_extent(), 500.0);
        assert_eq!(s.viewport.selection_color, [0xFF, 0xAA, 0x00]);
        assert_eq!(s.ui.language, Language::Fr);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let s: EditorSettings =
            serde_json::from_str(r#"{"placement": {"dpad_increment_cm": 0.5}, "ui": {"language": "en"}}"#)
                .unwrap();
        assert_eq!(s.placement.dpad_increment_cm, 0.5);
        assert_eq!(s.placement.duplicate_offset_cm, 10.0);
        assert_eq!(s.ui.language, Language::En);
        assert_eq!(s.grid.step_cm, 50.0);
    }
}
