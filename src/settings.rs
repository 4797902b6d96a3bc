use crate::CONFY_APP_NAME;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitMode {
    /// Whole skeleton visible, letterboxed.
    Fit,
    /// Fills the window; parts may be cropped.
    Expand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub clear_color: [f32; 4],
    pub show_bones: bool,
    pub fit_mode: FitMode,
    /// Bounds are scaled by this before the camera is fitted to them.
    pub padding: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.2, 0.2, 1.0],
            show_bones: false,
            fit_mode: FitMode::Fit,
            padding: 1.1,
        }
    }
}

impl DisplaySettings {
    pub fn load() -> Self {
        load_or_default("display")
    }

    pub fn save(&self) {
        store("display", self);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    pub default_animation: Option<String>,
    pub default_skins: Vec<String>,
    pub looping: bool,
    pub default_mix: f32,
    /// Longest frame delta fed to the animation, in seconds.
    pub max_delta: f32,
    pub scale: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            default_animation: None,
            default_skins: Vec::new(),
            looping: true,
            default_mix: 0.0,
            max_delta: 0.064,
            scale: 1.0,
        }
    }
}

impl PlaybackSettings {
    pub fn load() -> Self {
        load_or_default("playback")
    }

    pub fn save(&self) {
        store("playback", self);
    }
}

fn load_or_default<T>(name: &str) -> T
where
    T: Default + Serialize + for<'de> Deserialize<'de>,
{
    confy::load(CONFY_APP_NAME, name).unwrap_or_else(|e| {
        warn!("Could not read {} settings, using defaults: {}", name, e);
        T::default()
    })
}

fn store<T: Serialize>(name: &str, value: &T) {
    if let Err(e) = confy::store(CONFY_APP_NAME, name, value) {
        warn!("Could not save {} settings: {}", name, e);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewSettings {
    pub display: DisplaySettings,
    pub playback: PlaybackSettings,
}

impl PreviewSettings {
    pub fn load() -> Self {
        Self {
            display: DisplaySettings::load(),
            playback: PlaybackSettings::load(),
        }
    }

    pub fn save(&self) {
        self.display.save();
        self.playback.save();
    }
}
