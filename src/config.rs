//! Renderer configuration, loadable from TOML.
//!
//! ```toml
//! canvasSize = 800
//! lengthMode = "field"
//!
//! [params]
//! tiles = 120
//! brushWeight = 4.0
//!
//! [palette]
//! background = "#fff9da"
//! high = "#ff1b37"
//! low = "#ff33d2"
//! ```
//! Missing keys take their defaults; parameters are clamped into their domains on load.

use {
  crate::{
    brush::Palette,
    field::AngleRange,
    noise_field::NoiseDetail,
    params::Params,
    renderer::LengthMode
  },
  anyhow::{Context, Result},
  serde::{Deserialize, Serialize},
  std::path::Path,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RendererConfig {
  /// side of the square canvas, pixels
  pub canvas_size: u32,
  pub length_mode: LengthMode,
  /// third noise coordinate, 0 for still images
  pub time: f64,
  pub params: Params,
  pub palette: Palette,
  pub angle_range: AngleRange,
  pub noise: NoiseDetail,
}

impl Default for RendererConfig {
  fn default() -> Self {
    Self {
      canvas_size: 800,
      length_mode: LengthMode::default(),
      time: 0.0,
      params: Params::default(),
      palette: Palette::default(),
      angle_range: AngleRange::default(),
      noise: NoiseDetail::default()
    }
  }
}

impl RendererConfig {
  pub fn from_toml_str(s: &str) -> Result<Self> {
    let mut config: Self = toml::from_str(s).context("parsing renderer config")?;
    config.params.clamp_all();
    Ok(config)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
      .with_context(|| format!("reading {}", path.display()))?;
    Self::from_toml_str(&text)
  }

  pub fn to_toml_string(&self) -> Result<String> {
    Ok(toml::to_string(self)?)
  }
}
