//! Visual configuration for the particle views handed to a renderer.

use serde::{Deserialize, Serialize};

use crate::view::ColorMode;

/// How particles should look. Has no effect on the physics.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisualConfig {
    pub color_mode: ColorMode,
}

impl VisualConfig {
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }
}
