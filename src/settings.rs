//! Effect settings and preferences
//!
//! Persisted by the host as a JSON blob; effect state itself never is.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Overall particle budget the host should render per frame
    pub fn particle_budget(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 400,
            QualityPreset::High => 800,
        }
    }
}

/// Effect toggles and preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Pointer shockwaves and trail dots
    pub cursor_effects: bool,
    /// Scroll-wheel ring ripples
    pub scroll_ripples: bool,
    /// Ambient synaptic mesh
    pub synaptic_mesh: bool,
    /// Scheduled rain/meteor sessions
    pub weather: bool,
    /// Per-glyph gravity, glitch and burst effects
    pub kinetic_text: bool,

    // === Accessibility ===
    /// Reduced motion (suppresses weather and shockwaves)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            cursor_effects: true,
            scroll_ripples: true,
            synaptic_mesh: true,
            weather: true,
            kinetic_text: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (Low sheds the ambient extras)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        if preset == QualityPreset::Low {
            self.synaptic_mesh = false;
            self.weather = false;
        }
    }

    /// Effective weather toggle (respects reduced_motion)
    pub fn effective_weather(&self) -> bool {
        self.weather && !self.reduced_motion
    }

    /// Effective cursor effects (respects reduced_motion)
    pub fn effective_cursor_effects(&self) -> bool {
        self.cursor_effects && !self.reduced_motion
    }

    /// Effective ambient mesh (respects reduced_motion)
    pub fn effective_mesh(&self) -> bool {
        self.synaptic_mesh && !self.reduced_motion
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let mut settings = Settings::default();
        settings.reduced_motion = true;
        settings.quality = QualityPreset::High;
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.quality, QualityPreset::High);
        assert!(back.reduced_motion);
        assert!(back.weather);
        assert!(!back.effective_weather());
    }

    #[test]
    fn low_preset_sheds_ambient_effects() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.synaptic_mesh);
        assert!(!settings.weather);
        assert!(settings.cursor_effects);
    }

    #[test]
    fn preset_parse_round_trip() {
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(QualityPreset::parse(preset.as_str()), Some(preset));
        }
        assert_eq!(QualityPreset::parse("ultra"), None);
    }
}
