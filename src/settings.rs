//! Game settings and preferences
//!
//! Display preferences only; game progress is never persisted. Stored in
//! LocalStorage on the web build.

use serde::{Deserialize, Serialize};

/// Background detail levels
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

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Number of clouds drawn across the level
    pub fn cloud_count(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 8,
            QualityPreset::High => 16,
        }
    }

    /// Segments used for round shapes (coins, clouds)
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 24,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visuals ===
    /// Parallax clouds behind the level
    pub clouds: bool,
    /// Walk cycles, coin spin and enemy steps
    pub animations: bool,
    /// Blink the player while invulnerable
    pub invulnerability_blink: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Host ===
    /// Pause the simulation while the tab is hidden
    pub pause_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no blinking, no animation cycles)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            clouds: true,
            animations: true,
            invulnerability_blink: true,

            show_fps: false,

            pause_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        if preset == QualityPreset::Low {
            self.clouds = false;
        }
    }

    /// Effective animation cycles (respects reduced_motion)
    pub fn effective_animations(&self) -> bool {
        self.animations && !self.reduced_motion
    }

    /// Effective invulnerability blink (respects reduced_motion)
    pub fn effective_blink(&self) -> bool {
        self.invulnerability_blink && !self.reduced_motion
    }

    /// Effective cloud count
    pub fn cloud_count(&self) -> usize {
        if !self.clouds {
            0
        } else {
            self.quality.cloud_count()
        }
    }

    /// Flip the preference bound to a hotkey. Returns true if anything changed.
    ///
    /// `F` toggles the FPS counter, `C` the clouds, `M` reduced motion.
    pub fn toggle_for_key(&mut self, key: &str) -> bool {
        match key {
            "f" | "F" => self.show_fps = !self.show_fps,
            "c" | "C" => self.clouds = !self.clouds,
            "m" | "M" => self.reduced_motion = !self.reduced_motion,
            _ => return false,
        }
        true
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "brick_runner_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::debug!("Settings not persisted on native ({})", Self::STORAGE_KEY);
    }
}
