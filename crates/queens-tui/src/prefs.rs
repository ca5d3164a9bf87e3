use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Saved user preferences.
///
/// Settings only; solutions are never written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Board size (number of queens)
    pub size: usize,
    /// Pacing delay between search steps, in milliseconds
    pub delay_ms: u64,
    /// Theme name: dark, light, or high-contrast
    pub theme: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            size: 8,
            delay_ms: 50,
            theme: "dark".to_string(),
        }
    }
}

impl Preferences {
    /// Get the preferences file path
    fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("queens_prefs.json")
    }

    /// Load preferences from file, falling back to defaults
    pub fn load() -> Self {
        match fs::read_to_string(Self::path()) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save preferences to file (best effort)
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(Self::path(), json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let prefs = Preferences {
            size: 10,
            delay_ms: 5,
            theme: "light".to_string(),
        };
        let json = serde_json::to_string(&prefs).unwrap();
        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn test_garbage_falls_back_to_default() {
        let back: Preferences = serde_json::from_str("not json").unwrap_or_default();
        assert_eq!(back, Preferences::default());
    }
}
