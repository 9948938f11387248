//! The parameter set and its partial-update semantics.
//!
//! Parameters travel as a flat JSON object ([`ParamBag`]). [`Params::apply`] merges only the
//! fields that are present and correctly typed; numbers are clamped into their [`Domain`].

use {
  crate::field::{Classifier, LengthBand},
  serde::{Deserialize, Serialize},
  serde_json::Value,
  tracing::debug,
};

mod domain;

pub use domain::Domain;

/// Flat key-value parameter object, as exchanged with controls and the hand-off store.
pub type ParamBag = serde_json::Map<String, Value>;

/// Numeric parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Param {
  Tiles,
  BrushLengthBase,
  BrushLengthRange,
  BrushLengthTopMultiplier,
  BrushWeight,
  BrushVibration,
  AreaNoiseScale,
  AngleNoiseScale,
  LengthNoiseScale,
  AreaNoiseMultiplier,
  AngleNoiseMultiplier,
  LengthNoiseMultiplier,
  ThresholdLow,
  ThresholdMid,
  ThresholdHigh,
}

impl Param {
  pub const ALL: [Param; 15] = {
    use Param::*;
    [
      Tiles, BrushLengthBase, BrushLengthRange, BrushLengthTopMultiplier, BrushWeight,
      BrushVibration, AreaNoiseScale, AngleNoiseScale, LengthNoiseScale, AreaNoiseMultiplier,
      AngleNoiseMultiplier, LengthNoiseMultiplier, ThresholdLow, ThresholdMid, ThresholdHigh
    ]
  };

  pub fn key(self) -> &'static str {
    use Param::*;
    match self {
      Tiles => "tiles",
      BrushLengthBase => "brushLengthBase",
      BrushLengthRange => "brushLengthRange",
      BrushLengthTopMultiplier => "brushLengthTopMultiplier",
      BrushWeight => "brushWeight",
      BrushVibration => "brushVibration",
      AreaNoiseScale => "areaNoiseScale",
      AngleNoiseScale => "angleNoiseScale",
      LengthNoiseScale => "lengthNoiseScale",
      AreaNoiseMultiplier => "areaNoiseMultiplier",
      AngleNoiseMultiplier => "angleNoiseMultiplier",
      LengthNoiseMultiplier => "lengthNoiseMultiplier",
      ThresholdLow => "thresholdLow",
      ThresholdMid => "thresholdMid",
      ThresholdHigh => "thresholdHigh",
    }
  }

  /// Names the interactive control panel uses for the same value.
  pub fn aliases(self) -> &'static [&'static str] {
    use Param::*;
    match self {
      BrushLengthBase => &["brushLengthBottom"],
      AreaNoiseScale => &["areaDensityBase"],
      AngleNoiseScale => &["angleDensityBase"],
      AreaNoiseMultiplier => &["topVsBottomDensity"],
      AngleNoiseMultiplier => &["topVsBottomAngle"],
      _ => &[],
    }
  }

  pub fn domain(self) -> Domain {
    use Param::*;
    match self {
      Tiles => Domain::new(10.0, 200.0, 1.0),
      BrushLengthBase => Domain::new(0.5, 2.5, 0.1),
      BrushLengthRange => Domain::new(1.0, 4.0, 0.1),
      BrushLengthTopMultiplier => Domain::new(0.5, 2.0, 0.05),
      BrushWeight => Domain::new(1.0, 10.0, 0.1),
      BrushVibration => Domain::new(0.0, 5.0, 0.1),
      AreaNoiseScale => Domain::new(0.001, 0.05, 0.001),
      AngleNoiseScale => Domain::new(0.001, 0.1, 0.001),
      LengthNoiseScale => Domain::new(0.001, 0.05, 0.001),
      AreaNoiseMultiplier | AngleNoiseMultiplier | LengthNoiseMultiplier => Domain::new(0.5, 2.0, 0.05),
      ThresholdLow | ThresholdMid | ThresholdHigh => Domain::new(0.0, 1.0, 0.01),
    }
  }

  /// Whether the explorer samples this parameter. Thresholds stay at their current value.
  pub fn tunable(self) -> bool {
    !matches!(self, Param::ThresholdLow | Param::ThresholdMid | Param::ThresholdHigh)
  }

  fn lookup(self, bag: &ParamBag) -> Option<(&str, &Value)> {
    std::iter::once(self.key())
      .chain(self.aliases().iter().copied())
      .find_map(|key| bag.get(key).map(|value| (key, value)))
  }
}

/// Layer visibility switches. Changing only these replays the current geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Visibility {
  pub tiles: bool,
  pub bottom: bool,
  pub top: bool,
}

impl Visibility {
  pub const KEYS: [&'static str; 3] = ["showTiles", "showBottomAreas", "showTopAreas"];
}

impl Default for Visibility {
  fn default() -> Self {
    Self { tiles: false, bottom: true, top: true }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Params {
  pub tiles: u32,
  pub brush_length_base: f64,
  pub brush_length_range: f64,
  pub brush_length_top_multiplier: f64,
  pub brush_weight: f64,
  pub brush_vibration: f64,
  pub area_noise_scale: f64,
  pub angle_noise_scale: f64,
  pub length_noise_scale: f64,
  pub area_noise_multiplier: f64,
  pub angle_noise_multiplier: f64,
  pub length_noise_multiplier: f64,
  pub threshold_low: f64,
  pub threshold_mid: f64,
  pub threshold_high: f64,
  pub show_tiles: bool,
  pub show_bottom_areas: bool,
  pub show_top_areas: bool,
}

impl Default for Params {
  fn default() -> Self {
    Self {
      tiles: 100,
      brush_length_base: 1.5,
      brush_length_range: 2.0,
      brush_length_top_multiplier: 0.8,
      brush_weight: 5.0,
      brush_vibration: 1.0,
      area_noise_scale: 0.005,
      angle_noise_scale: 0.01,
      length_noise_scale: 0.01,
      area_noise_multiplier: 2.0,
      angle_noise_multiplier: 2.0,
      length_noise_multiplier: 1.0,
      threshold_low: 0.28,
      threshold_mid: 0.45,
      threshold_high: 0.65,
      show_tiles: false,
      show_bottom_areas: true,
      show_top_areas: true,
    }
  }
}

impl Params {
  pub fn from_bag(bag: &ParamBag) -> Self {
    let mut params = Self::default();
    params.apply(bag);
    params
  }

  pub fn get(&self, param: Param) -> f64 {
    use Param::*;
    match param {
      Tiles => self.tiles as f64,
      BrushLengthBase => self.brush_length_base,
      BrushLengthRange => self.brush_length_range,
      BrushLengthTopMultiplier => self.brush_length_top_multiplier,
      BrushWeight => self.brush_weight,
      BrushVibration => self.brush_vibration,
      AreaNoiseScale => self.area_noise_scale,
      AngleNoiseScale => self.angle_noise_scale,
      LengthNoiseScale => self.length_noise_scale,
      AreaNoiseMultiplier => self.area_noise_multiplier,
      AngleNoiseMultiplier => self.angle_noise_multiplier,
      LengthNoiseMultiplier => self.length_noise_multiplier,
      ThresholdLow => self.threshold_low,
      ThresholdMid => self.threshold_mid,
      ThresholdHigh => self.threshold_high,
    }
  }

  /// Store `value` clamped into the parameter's domain, returns the stored value.
  pub fn set(&mut self, param: Param, value: f64) -> f64 {
    use Param::*;
    let value = param.domain().clamp(value);
    let slot = match param {
      Tiles => {
        self.tiles = value.round() as u32;
        return self.tiles as f64;
      }
      BrushLengthBase => &mut self.brush_length_base,
      BrushLengthRange => &mut self.brush_length_range,
      BrushLengthTopMultiplier => &mut self.brush_length_top_multiplier,
      BrushWeight => &mut self.brush_weight,
      BrushVibration => &mut self.brush_vibration,
      AreaNoiseScale => &mut self.area_noise_scale,
      AngleNoiseScale => &mut self.angle_noise_scale,
      LengthNoiseScale => &mut self.length_noise_scale,
      AreaNoiseMultiplier => &mut self.area_noise_multiplier,
      AngleNoiseMultiplier => &mut self.angle_noise_multiplier,
      LengthNoiseMultiplier => &mut self.length_noise_multiplier,
      ThresholdLow => &mut self.threshold_low,
      ThresholdMid => &mut self.threshold_mid,
      ThresholdHigh => &mut self.threshold_high,
    };
    *slot = value;
    value
  }

  /// Merge present, correctly typed fields of `bag`. Returns the number of fields taken.
  pub fn apply(&mut self, bag: &ParamBag) -> usize {
    let mut applied = 0;

    for param in Param::ALL {
      let (key, value) = match param.lookup(bag) {
        Some(entry) => entry,
        None => continue
      };
      match value.as_f64().filter(|v| v.is_finite()) {
        Some(requested) => {
          let stored = self.set(param, requested);
          if stored != requested {
            debug!(key, requested, stored, "parameter clamped");
          }
          applied += 1;
        }
        None => debug!(key, %value, "ignoring non-numeric parameter")
      }
    }

    let flags = [&mut self.show_tiles, &mut self.show_bottom_areas, &mut self.show_top_areas];
    for (key, flag) in Visibility::KEYS.iter().zip(flags) {
      match bag.get(*key).map(Value::as_bool) {
        Some(Some(value)) => {
          *flag = value;
          applied += 1;
        }
        Some(None) => debug!(key, "ignoring non-boolean flag"),
        None => ()
      }
    }

    applied
  }

  /// Re-clamp every field, for values that bypassed [`Params::set`] (deserialization).
  pub fn clamp_all(&mut self) {
    for param in Param::ALL {
      self.set(param, self.get(param));
    }
  }

  pub fn to_bag(&self) -> ParamBag {
    let mut bag = ParamBag::new();
    for param in Param::ALL {
      let value = match param {
        Param::Tiles => Value::from(self.tiles),
        _ => Value::from(self.get(param))
      };
      bag.insert(param.key().to_string(), value);
    }
    let flags = [self.show_tiles, self.show_bottom_areas, self.show_top_areas];
    for (key, flag) in Visibility::KEYS.iter().zip(flags) {
      bag.insert(key.to_string(), Value::Bool(flag));
    }
    bag
  }

  pub fn visibility(&self) -> Visibility {
    Visibility {
      tiles: self.show_tiles,
      bottom: self.show_bottom_areas,
      top: self.show_top_areas
    }
  }

  pub fn thresholds(&self) -> [f64; 3] {
    [self.threshold_low, self.threshold_mid, self.threshold_high]
  }

  pub fn classifier(&self) -> Classifier {
    Classifier::new(self.thresholds())
  }

  pub fn length_band(&self) -> LengthBand {
    LengthBand::new(self.brush_length_base, self.brush_length_range)
  }
}
