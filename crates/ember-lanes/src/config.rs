// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Renderer configuration, deserialized from RON.

use ember_core::math::LinearRgba;
use ember_core::shading::PcfSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which terminal render strategy the pipeline executes each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Per-draw lighting.
    #[default]
    Forward,
    /// Geometry buffer, then one lighting resolve.
    Deferred,
}

/// An error loading renderer settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The RON text failed to parse.
    #[error("failed to parse renderer settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Renderer settings, loaded once at startup.
///
/// The shadow-filtering block defaults to the compiled-in tuned constants;
/// overriding any of them is a versioned visual change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    /// The terminal render strategy.
    pub mode: RenderMode,
    /// Clear color of the main target.
    pub clear_color: LinearRgba,
    /// Shadow-comparison overrides.
    pub pcf: PcfSettings,
    /// Poisson-disk filter radius in shadow-map UV units.
    pub shadow_filter_radius: f32,
    /// Seed of the per-context Poisson disk.
    pub poisson_seed: u32,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Forward,
            clear_color: LinearRgba::new(0.05, 0.05, 0.08, 1.0),
            pcf: PcfSettings::default(),
            shadow_filter_radius: 0.004,
            poisson_seed: 1,
        }
    }
}

impl RendererSettings {
    /// Parses settings from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::shading::SHADOW_DEPTH_BIAS;

    #[test]
    fn default_settings_use_the_tuned_constants() {
        let settings = RendererSettings::default();
        assert_eq!(settings.mode, RenderMode::Forward);
        assert_eq!(settings.pcf.depth_bias, SHADOW_DEPTH_BIAS);
    }

    #[test]
    fn partial_ron_overrides_only_named_fields() {
        let settings =
            RendererSettings::from_ron("(mode: Deferred, shadow_filter_radius: 0.01)").unwrap();
        assert_eq!(settings.mode, RenderMode::Deferred);
        assert_eq!(settings.shadow_filter_radius, 0.01);
        // Unnamed fields keep their defaults.
        assert_eq!(settings.poisson_seed, 1);
    }

    #[test]
    fn malformed_ron_is_an_error() {
        assert!(RendererSettings::from_ron("(mode: Sideways)").is_err());
    }
}
