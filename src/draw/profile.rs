//! Pen presets: the per-kind defaults applied when a stroke starts.

use serde::{Deserialize, Serialize};

use super::color::{self, Color};
use super::factory;
use super::shape::{CharcoalTexture, Shape, StrokeKind};

/// A pen preset: everything needed to start a stroke of one kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PenProfile {
    pub kind: StrokeKind,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub texture: CharcoalTexture,
}

fn default_width() -> f64 {
    3.0
}

impl PenProfile {
    /// The stock preset for a stroke kind.
    pub fn default_for(kind: StrokeKind) -> Self {
        let (width, color) = match kind {
            StrokeKind::Pencil => (3.0, color::GRAY),
            StrokeKind::Brush => (8.0, color::BLUE),
            StrokeKind::Marker => (20.0, color::RED),
            StrokeKind::NeoBrush => (25.0, color::BLACK),
            StrokeKind::Charcoal => (15.0, color::SADDLE_BROWN),
        };
        Self {
            kind,
            width,
            color,
            texture: CharcoalTexture::default(),
        }
    }

    /// One stock preset per kind, in tag order.
    pub fn default_profiles() -> Vec<Self> {
        [
            StrokeKind::Pencil,
            StrokeKind::Brush,
            StrokeKind::Marker,
            StrokeKind::NeoBrush,
            StrokeKind::Charcoal,
        ]
        .into_iter()
        .map(Self::default_for)
        .collect()
    }

    /// Creates an empty stroke styled by this preset.
    pub fn make_shape(&self) -> Shape {
        let mut shape = factory::create_shape(self.kind.tag());
        shape.width = self.width;
        shape.color = self.color;
        shape.texture = self.texture;
        shape
    }
}

/// TOML file shape for loading a set of presets.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProfileSet {
    #[serde(default)]
    pub profiles: Vec<PenProfile>,
}

impl ProfileSet {
    /// Parses presets from TOML; an empty file yields the stock presets.
    pub fn from_toml(input: &str) -> Result<Vec<PenProfile>, toml::de::Error> {
        let set: ProfileSet = toml::from_str(input)?;
        if set.profiles.is_empty() {
            Ok(PenProfile::default_profiles())
        } else {
            Ok(set.profiles)
        }
    }
}
