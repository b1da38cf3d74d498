// Gesture tuning. A JSON object in localStorage may override any subset of fields.

use serde::Deserialize;

pub const STORAGE_KEY: &str = "gallery_viewer_config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale change per wheel delta unit (sign inverted: wheel up zooms in).
    pub wheel_factor: f64,
    pub double_tap_ms: f64,
    pub double_tap_scale: f64,
    pub dismiss_distance_px: f64,
    /// Symmetric pan bound per axis (px). Does not grow with scale.
    pub pan_limit_px: f64,
    /// Travel under this (px) still counts as a tap.
    pub tap_slop_px: f64,
    pub swipe_threshold_px: f64,
    pub button_zoom_step: f64,
    pub open_delay_ms: u32,
    pub close_delay_ms: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 4.0,
            wheel_factor: 0.002,
            double_tap_ms: 250.0,
            double_tap_scale: 2.6,
            dismiss_distance_px: 120.0,
            pan_limit_px: 300.0,
            tap_slop_px: 10.0,
            swipe_threshold_px: 50.0,
            button_zoom_step: 0.5,
            open_delay_ms: 10,
            close_delay_ms: 150,
        }
    }
}

impl GestureConfig {
    /// Parse overrides from JSON. Missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<GestureConfig>(raw).map(GestureConfig::sanitized)
    }

    /// Repair values that would break the clamp invariants.
    pub fn sanitized(mut self) -> Self {
        let defaults = GestureConfig::default();
        if !self.min_scale.is_finite() || self.min_scale < 1.0 {
            self.min_scale = defaults.min_scale;
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            self.max_scale = self.min_scale.max(defaults.max_scale);
        }
        if !self.double_tap_scale.is_finite() {
            self.double_tap_scale = defaults.double_tap_scale;
        }
        self.double_tap_scale = self.double_tap_scale.clamp(self.min_scale, self.max_scale);
        for value in [
            &mut self.wheel_factor,
            &mut self.double_tap_ms,
            &mut self.dismiss_distance_px,
            &mut self.pan_limit_px,
            &mut self.tap_slop_px,
            &mut self.swipe_threshold_px,
            &mut self.button_zoom_step,
        ] {
            if !value.is_finite() || *value < 0.0 {
                *value = 0.0;
            }
        }
        self
    }

    /// Defaults merged with any localStorage overrides.
    pub fn load() -> Self {
        let Some(raw) = read_override() else {
            return GestureConfig::default();
        };
        match GestureConfig::from_json(&raw) {
            Ok(config) => {
                log::info!("Loaded gesture config overrides from localStorage");
                config
            }
            Err(e) => {
                log::warn!("Ignoring malformed gesture config in localStorage: {}", e);
                GestureConfig::default()
            }
        }
    }
}

fn read_override() -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(STORAGE_KEY).ok()?
}
